//! CLI command implementations.

use crate::config::RunConfig;
use crate::console::ConsoleTracer;
use crate::logging;
use std::fs;
use std::path::Path;
use vsvm_common::Program;

/// Assemble a .vsa text file to a .vsb binary.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    logging::init(false);

    let (input, output) = match args {
        [input] => (input, Path::new(input).with_extension("vsb")),
        [input, flag, output] if flag == "-o" => (input, Path::new(output).to_path_buf()),
        _ => {
            eprintln!("error: assemble requires an input file");
            eprintln!("Usage: vsvm assemble <input.vsa> [-o output.vsb]");
            return Err(1);
        }
    };

    let program = assemble_file(input)?;
    let bytes = program.encode();

    fs::write(&output, &bytes).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;

    eprintln!(
        "assembled {} words ({} bytes) -> {}",
        program.len(),
        bytes.len(),
        output.display()
    );
    Ok(())
}

/// Disassemble a .vsb binary to text on stdout.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    logging::init(false);

    let [input] = args else {
        eprintln!("error: disassemble requires an input file");
        eprintln!("Usage: vsvm disassemble <input.vsb>");
        return Err(1);
    };

    let program = read_binary(input)?;
    print!("{}", vsvm_assembler::disassemble(&program));
    Ok(())
}

/// Execute a program. `.vsa` files are assembled in memory first.
pub fn run(args: &[String]) -> Result<(), i32> {
    let config = RunConfig::from_args(args).map_err(|e| {
        eprintln!("error: {e}");
        eprintln!("Usage: vsvm run <input> [--entry N] [--stack-size N] [--trace]");
        1
    })?;
    logging::init(config.trace);

    let program = read_program(&config.input)?;
    tracing::debug!(
        words = program.len(),
        entry = config.entry_point,
        stack_size = config.stack_size,
        "loaded {}",
        config.input
    );

    let mut tracer = ConsoleTracer::default();
    match vsvm_vm::run_with_tracer(&program, config.vm_config(), &mut tracer) {
        Ok(outcome) => {
            tracing::info!(steps = outcome.steps, reason = ?outcome.reason, "halted");
            println!("stack: {:?}", outcome.stack);
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(2)
        }
    }
}

fn read_program(path: &str) -> Result<Program, i32> {
    if path.ends_with(".vsa") {
        assemble_file(path)
    } else {
        read_binary(path)
    }
}

fn assemble_file(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    vsvm_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn read_binary(path: &str) -> Result<Program, i32> {
    let bytes = fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    Program::decode(&bytes).map_err(|e| {
        eprintln!("error: invalid binary: {e}");
        1
    })
}
