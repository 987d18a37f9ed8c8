//! OKL kernel validator CLI.

use oklc::commands::{check_file, explain_error, parse_check_options, EXIT_USAGE};

fn main() {
    oklc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(EXIT_USAGE);
    }

    let command = &args[1];

    let status = match command.as_str() {
        "check" => match parse_check_options(&args[2..]) {
            Ok(options) => check_file(&options),
            Err(message) => {
                eprintln!("error: {message}");
                eprintln!();
                print_check_usage();
                EXIT_USAGE
            }
        },
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: oklc explain <ERROR_CODE>");
                eprintln!("Example: oklc explain E3003");
                EXIT_USAGE
            } else {
                explain_error(&args[2])
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("oklc {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            EXIT_USAGE
        }
    };

    std::process::exit(status);
}

fn print_check_usage() {
    eprintln!("Usage: oklc check <ast.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --all                    Report every problem, not just the first per kernel");
    eprintln!("  --format=<fmt>           Output format: terminal (default), json");
    eprintln!("  --source=<kernel.okl>    Kernel source, for line numbers and snippets");
    eprintln!("  --color=<when>           Colors: auto (default), always, never");
    eprintln!("  --no-parallel            Check kernels on one thread");
}

fn print_usage() {
    println!("OKL kernel validator");
    println!();
    println!("Usage: oklc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <ast.json>     Validate every @kernel in a parsed AST");
    println!("  explain <code>       Explain an error code (e.g., E3003)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Exit status: 0 if every kernel passes, 1 if one is rejected, 2 on usage errors.");
    println!("Set RUST_LOG=debug to trace validation stages.");
}
