//! Tagsum CLI

use std::io::{IsTerminal, Write};

use tagsumc::commands::{check_source, expand_source, explain_code, read_file, run_source};
use tagsumc::{init_tracing, CommandOutput, CompileOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let mut options = CompileOptions {
        tty: std::io::stderr().is_terminal(),
        ..CompileOptions::default()
    };
    let positional = match options.parse_args(&args[2..]) {
        Ok(positional) => positional,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let output = match command.as_str() {
        "check" | "expand" | "run" => {
            let Some(path) = positional.first() else {
                eprintln!("Usage: tagsum {command} <file.tsum> [options]");
                std::process::exit(1);
            };
            let source = match read_file(path) {
                Ok(source) => source,
                Err(message) => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
            };
            match command.as_str() {
                "check" => check_source(path, &source, &options),
                "expand" => expand_source(path, &source, &options),
                _ => run_source(path, &source, &options),
            }
        }
        "explain" | "--explain" => {
            let Some(code) = positional.first() else {
                eprintln!("Usage: tagsum explain <ERROR_CODE>");
                eprintln!("Example: tagsum explain E3003");
                std::process::exit(1);
            };
            explain_code(code)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-v" => {
            println!("Tagsum {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    finish(&output);
}

fn finish(output: &CommandOutput) {
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    let _ = std::io::stdout().flush();
    if !output.success {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Tagsum: closed sum types with exhaustive match dispatch");
    println!();
    println!("Usage: tagsum <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file.tsum>    Report errors and warnings");
    println!("  expand <file.tsum>   Print generated declarations and expanded matches");
    println!("  run <file.tsum>      Run `main` and print its result");
    println!("  explain <code>       Explain an error code (e.g., E3003)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --deny-warnings      Treat warnings as errors");
    println!("  --color=<mode>       Colored diagnostics: auto, always, never");
    println!("  --error-limit=<n>    Stop reporting after n errors (0 = unlimited)");
    println!("  --max-depth=<n>      Maximum call depth when running (default 256)");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=debug tagsum run main.tsum");
    println!();
    println!("Examples:");
    println!("  tagsum check shapes.tsum");
    println!("  tagsum expand shapes.tsum");
    println!("  tagsum run shapes.tsum --max-depth=1000");
    println!("  tagsum explain W3001");
}
