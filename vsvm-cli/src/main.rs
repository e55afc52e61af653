//! vsvm CLI: assemble, disassemble, and execute stack-machine programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage/input/decode/assembly error
//! - 2: Runtime fault

mod commands;
mod config;
mod console;
mod logging;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "assemble" => commands::assemble(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "run" => commands::run(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: vsvm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  assemble <input.vsa> [-o output.vsb]   Assemble text to binary");
    eprintln!("  disassemble <input.vsb>                Disassemble binary to text");
    eprintln!("  run <input> [options]                  Execute a .vsa or binary program");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --entry N         Word index to start at (default 0)");
    eprintln!("  --stack-size N    Operand stack capacity (default 100, or $VSVM_STACK_SIZE)");
    eprintln!("  --trace           Log every step to stderr");
    eprintln!();
    eprintln!("Set VSVM_LOG to control log filtering (e.g. VSVM_LOG=debug).");
}
