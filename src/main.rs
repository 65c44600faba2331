// Agar: front end for a small imperative language

use std::fs;

use agar::parser::lexer::Lexer;
use agar::parser::parser::Parser as AgarParser;
use agar::parser::trace::ParseTrace;
use clap::Parser;

#[derive(Parser)]
#[command(name = "agar", version, about = "Parse an Agar source file")]
struct Cli {
    /// Path to the Agar source file
    input: String,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Print one line per parse event after a successful parse
    #[arg(long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();

    // Read source code
    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", cli.input, e);
            std::process::exit(1);
        }
    };

    eprintln!("Parsing {}...", cli.input);

    let tokens = match Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if cli.tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    // Parse the token stream, recording events for --trace
    let mut trace = ParseTrace::new();
    let mut parser = AgarParser::with_observer(tokens, &mut trace);
    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} top-level statements.",
        program.statements.len()
    );

    if cli.trace {
        println!("Parsed Program Structure:");
        for line in trace.lines() {
            println!("{}", line);
        }
    }

    println!("Parsing completed successfully!");
}
