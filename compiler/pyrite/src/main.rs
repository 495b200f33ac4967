//! Pyrite CLI
//!
//! Runs one expression through the evaluation pipeline.

use pyrite::{global_cache, init_tracing, EvalError};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    match command {
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("pyrite {}", env!("CARGO_PKG_VERSION"));
        }
        "eval" | "exec" | "interpret" | "disasm" => {
            let Some(source) = args.get(2) else {
                eprintln!("Usage: pyrite {command} <source>");
                std::process::exit(1);
            };
            if let Err(err) = run(command, source) {
                report(source, &err);
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run(command: &str, source: &str) -> Result<(), EvalError> {
    let cache = global_cache();
    let source = source.as_bytes();
    match command {
        "eval" => println!("{:?}", cache.evaluate(source)?),
        "exec" => cache.execute_statement(source)?,
        "interpret" => println!("{:?}", cache.interpret_source(source)?),
        _ => print!("{}", cache.compile(source)?),
    }
    Ok(())
}

fn report(source: &str, err: &EvalError) {
    eprintln!("{err}");
    if let Some(span) = err.span {
        let start = usize::try_from(span.start).unwrap_or(0);
        let end = usize::try_from(span.end).unwrap_or(start);
        if let Some(snippet) = source.get(start..end) {
            eprintln!("  --> {span}: {snippet}");
        }
    }
}

fn print_usage() {
    println!("Pyrite dynamic execution core");
    println!();
    println!("Usage: pyrite <command> <source>");
    println!();
    println!("Commands:");
    println!("  eval <source>        Compile (cached) and evaluate an expression, print its repr");
    println!("  exec <source>        Run an expression as a statement, discarding the value");
    println!("  interpret <source>   Evaluate with the tree interpreter (supports builtins)");
    println!("  disasm <source>      Compile and print the bytecode listing");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Examples:");
    println!("  pyrite eval '1 + 2 * 3'");
    println!("  pyrite interpret \"print(len('abc'))\"");
    println!("  pyrite disasm '-7 // 2'");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=pyrite=debug) for tracing output.");
}
