//! Recos CLI
//!
//! Renders components from JSON bundles.

use recosc::commands::{list_file, parse_render_options, render_file};

fn main() {
    recosc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "render" => {
            if args.len() < 3 {
                eprintln!("Usage: recos render <bundle.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --component=<name>     Component to render (default: HelloWorld)");
                eprintln!("  --arg=<name>=<value>   Named argument; value is JSON or a plain string");
                eprintln!("  --click=<n>            Click the n-th onClick handler, then re-render");
                eprintln!("  --strict               Unresolved identifiers are errors");
                eprintln!("  --lexical-blocks       Blocks open their own scope");
                eprintln!("  --max-depth=<n|none>   Call depth limit");
                eprintln!("  --profile              Print evaluation counters to stderr");
                std::process::exit(1);
            }
            let options = match parse_render_options(&args[3..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            render_file(&args[2], &options);
        }
        "list" => {
            if args.len() < 3 {
                eprintln!("Usage: recos list <bundle.json>");
                std::process::exit(1);
            }
            list_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("recos {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Recos - declarative UI component evaluator");
    println!();
    println!("Usage: recos <command> [options]");
    println!();
    println!("Commands:");
    println!("  render <bundle.json>   Render a component and print the element tree");
    println!("  list <bundle.json>     List the components a bundle declares");
    println!("  help                   Show this message");
    println!("  version                Show version information");
    println!();
    println!("Set RUST_LOG=recos_eval=debug for evaluation traces.");
}
