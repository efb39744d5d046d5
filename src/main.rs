/*
    Thin command line harness: compile a grammar file and match text with it
*/

mod cli;

use std::process::exit;

use clap::Parser;

use muncher::compiler::{compile, CompileOptions};

fn main() {
    let args = cli::Cli::parse();
    stderrlog::new().verbosity(args.verbose as usize).init().unwrap();

    let grammar_text = match std::fs::read_to_string(&args.file) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("Could not read {}: {}", args.file.display(), error);
            exit(1);
        }
    };

    log::info!("compiling grammar...");
    let options = CompileOptions {
        start_symbol: args.start,
        epsilon_token: args.epsilon,
    };
    let grammar = match compile(&grammar_text, options) {
        Ok(grammar) => grammar,
        Err(error) => {
            eprintln!("{}", error);
            exit(1);
        }
    };

    let text = match args.text {
        Some(text) => text,
        None => match std::io::read_to_string(std::io::stdin()) {
            Ok(text) => text,
            Err(error) => {
                eprintln!("Could not read standard input: {}", error);
                exit(1);
            }
        },
    };

    log::info!("matching...");
    match grammar.parse_with_limit(&text, args.depth_limit) {
        Ok(Some(result)) => {
            println!("{}", result.tree);
            if !result.remainder.is_empty() {
                println!("Unmatched: {:?}", result.remainder);
            }
        }
        Ok(None) => {
            eprintln!("No match");
            exit(1);
        }
        Err(error) => {
            eprintln!("{}", error);
            exit(1);
        }
    }
}
