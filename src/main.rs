// minicc: mini-language compiler front end producing three-address code

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::process;

use minicc::parser::lexer::Lexer;
use minicc::parser::parser::Parser;
use minicc::report;
use minicc::sema::SemanticAnalyzer;
use minicc::tac::TacGenerator;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("minicc");
        eprintln!("Usage: {} [source-file]", program_name);
        eprintln!();
        eprintln!("Compiles the given file, or standard input when no file is given.");
        process::exit(1);
    }

    let source = match args.get(1) {
        Some(path) => {
            if !Path::new(path).exists() {
                eprintln!("Error: File '{}' not found", path);
                process::exit(1);
            }
            match fs::read_to_string(path) {
                Ok(source) => source,
                Err(err) => {
                    eprintln!("Error: Failed to read '{}': {}", path, err);
                    process::exit(1);
                }
            }
        }
        None => match io::read_to_string(io::stdin()) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("Error: Failed to read standard input: {}", err);
                process::exit(1);
            }
        },
    };

    // Each section is printed as soon as its phase succeeds, so a failing
    // phase leaves the earlier sections on stdout and its own absent.
    let tokens = match Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(err) => fail(&err),
    };
    print!("{}", report::render_tokens(&tokens));

    let program = match Parser::new(&tokens).parse_program() {
        Ok(program) => program,
        Err(err) => fail(&err),
    };

    let symbols = match SemanticAnalyzer::new().analyze(&program) {
        Ok(symbols) => symbols,
        Err(err) => fail(&err),
    };
    print!("{}", report::render_symbol_table(&symbols));

    let tac = TacGenerator::new().generate(&program);
    print!("{}", report::render_tac(&tac));
}

/// Report a compile error the way the hosting contract expects: exactly one
/// diagnostic line on stderr and a non-zero exit status.
fn fail(err: &dyn fmt::Display) -> ! {
    eprintln!("{}", err);
    process::exit(1);
}
