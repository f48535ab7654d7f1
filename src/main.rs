use std::{fs::read_to_string, path::PathBuf, process, rc::Rc, time::Instant};

use clap::Parser as ClapParser;
use wordlang::{display_error, lexer::lexer::tokenize, parser::parser::parse};

#[derive(ClapParser)]
#[command(name = "wordlang")]
#[command(about = "Tokenize and parse a wordlang source file, printing its syntax tree")]
#[command(version)]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream instead of the syntax tree
    #[arg(long)]
    tokens: bool,

    /// Print the full debug representation of each statement
    #[arg(long)]
    debug: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(&source, Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &source, &file_name);
            process::exit(1);
        }
    };

    tracing::info!("Tokenized in {:?}", start.elapsed());

    if cli.tokens {
        for token in &tokens {
            token.debug();
        }
        return;
    }

    let parse_start = Instant::now();

    let program = match parse(tokens, Rc::new(file_name.clone())) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &source, &file_name);
            process::exit(1);
        }
    };

    tracing::info!("Parsed in {:?}", parse_start.elapsed());

    for stmt in program.iter() {
        if cli.debug {
            println!("{:#?}", stmt);
        } else {
            println!("{}", stmt);
        }
    }
}
