//! Settings for `vsvm run`, resolved from flags and the environment.

use thiserror::Error;
use vsvm_vm::{VmConfig, DEFAULT_STACK_CAPACITY};

/// Environment variable supplying the stack capacity when `--stack-size`
/// is absent.
pub const STACK_SIZE_ENV: &str = "VSVM_STACK_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("run requires an input file")]
    MissingInput,

    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },

    #[error("invalid value '{value}' for {source_name}: expected a non-negative integer")]
    InvalidValue { source_name: String, value: String },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Everything `vsvm run` needs, fixed before the program is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: String,
    pub entry_point: usize,
    pub stack_size: usize,
    pub trace: bool,
}

impl RunConfig {
    /// Resolve from command-line arguments and the process environment.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let env_stack_size = std::env::var(STACK_SIZE_ENV).ok();
        Self::resolve(args, env_stack_size.as_deref())
    }

    /// Resolve with an explicit environment value. `--stack-size` wins over
    /// `env_stack_size`.
    pub fn resolve(args: &[String], env_stack_size: Option<&str>) -> Result<Self, ConfigError> {
        let mut input = None;
        let mut entry_point = 0;
        let mut stack_size = None;
        let mut trace = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--entry" => {
                    let value = iter.next().ok_or(ConfigError::MissingValue { flag: "--entry" })?;
                    entry_point = parse_count("--entry", value)?;
                }
                "--stack-size" => {
                    let value = iter
                        .next()
                        .ok_or(ConfigError::MissingValue { flag: "--stack-size" })?;
                    stack_size = Some(parse_count("--stack-size", value)?);
                }
                "--trace" => trace = true,
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownOption(flag.to_string()))
                }
                positional if input.is_none() => input = Some(positional.to_string()),
                extra => return Err(ConfigError::UnexpectedArgument(extra.to_string())),
            }
        }

        let stack_size = match (stack_size, env_stack_size) {
            (Some(size), _) => size,
            (None, Some(value)) => parse_count(STACK_SIZE_ENV, value)?,
            (None, None) => DEFAULT_STACK_CAPACITY,
        };

        Ok(Self {
            input: input.ok_or(ConfigError::MissingInput)?,
            entry_point,
            stack_size,
            trace,
        })
    }

    pub fn vm_config(&self) -> VmConfig {
        VmConfig::new(self.entry_point, self.stack_size)
    }
}

fn parse_count(source_name: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidValue {
            source_name: source_name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let config = RunConfig::resolve(&args(&["prog.vsb"]), None).unwrap();
        assert_eq!(
            config,
            RunConfig {
                input: "prog.vsb".to_string(),
                entry_point: 0,
                stack_size: DEFAULT_STACK_CAPACITY,
                trace: false,
            }
        );
        assert_eq!(config.vm_config(), VmConfig::default());
    }

    #[test]
    fn flags_in_any_order() {
        let config = RunConfig::resolve(
            &args(&["--trace", "--stack-size", "16", "prog.vsa", "--entry", "7"]),
            None,
        )
        .unwrap();
        assert_eq!(config.input, "prog.vsa");
        assert_eq!(config.vm_config(), VmConfig::new(7, 16));
        assert!(config.trace);
    }

    #[test]
    fn environment_supplies_stack_size() {
        let config = RunConfig::resolve(&args(&["p.vsb"]), Some("32")).unwrap();
        assert_eq!(config.stack_size, 32);
    }

    #[test]
    fn flag_overrides_environment() {
        let config =
            RunConfig::resolve(&args(&["p.vsb", "--stack-size", "8"]), Some("32")).unwrap();
        assert_eq!(config.stack_size, 8);
    }

    #[test]
    fn bad_environment_value_is_reported() {
        let err = RunConfig::resolve(&args(&["p.vsb"]), Some("lots")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'lots' for VSVM_STACK_SIZE: expected a non-negative integer"
        );
    }

    #[test]
    fn missing_input() {
        assert_eq!(
            RunConfig::resolve(&args(&["--trace"]), None),
            Err(ConfigError::MissingInput)
        );
    }

    #[test]
    fn missing_flag_value() {
        assert_eq!(
            RunConfig::resolve(&args(&["p.vsb", "--entry"]), None),
            Err(ConfigError::MissingValue { flag: "--entry" })
        );
    }

    #[test]
    fn negative_entry_is_invalid() {
        let err = RunConfig::resolve(&args(&["p.vsb", "--entry", "-1"]), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_option_and_extra_argument() {
        assert_eq!(
            RunConfig::resolve(&args(&["p.vsb", "--fast"]), None),
            Err(ConfigError::UnknownOption("--fast".to_string()))
        );
        assert_eq!(
            RunConfig::resolve(&args(&["a.vsb", "b.vsb"]), None),
            Err(ConfigError::UnexpectedArgument("b.vsb".to_string()))
        );
    }
}
