use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use asl_parser::{
    features::Features, lexer::lexer::tokenize, parser::parser::parse, render_error,
};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// Basic types, control flow and I/O only
    Minimal,
    /// Adds arrays, `%` and try/catch/throw
    Extended,
}

impl From<Profile> for Features {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Minimal => Features::MINIMAL,
            Profile::Extended => Features::EXTENDED,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Emit {
    None,
    Ast,
    Source,
}

#[derive(Debug, Parser)]
#[command(name = "aslp", about = "Syntax checker for ASL programs")]
struct Cli {
    /// Source file; standard input is read when omitted
    file: Option<PathBuf>,

    /// Grammar profile to accept
    #[arg(long, value_enum, default_value = "extended")]
    profile: Profile,

    /// What to print once the program parses
    #[arg(long, value_enum, default_value = "none")]
    emit: Emit,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aslp=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (file_name, source) = match &cli.file {
        Some(path) => {
            let source = read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.to_string_lossy().into_owned(), source)
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            (String::from("stdin"), source)
        }
    };

    let features = Features::from(cli.profile);
    let start = Instant::now();

    let tokens = match tokenize(&source, Some(file_name.clone()), features) {
        Ok(tokens) => tokens,
        Err(error) => {
            print!("{}", render_error(&error, &source, &file_name));
            println!("Syntax errors have been found.");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let parsed = parse(tokens, features);

    info!("Parsed in {:?}", parse_start.elapsed());

    let program = match parsed {
        Ok(program) => program,
        Err(errors) => {
            for error in &errors {
                print!("{}", render_error(error, &source, &file_name));
            }
            println!("Syntax errors have been found.");
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.emit {
        Emit::None => {}
        Emit::Ast => println!("{:#?}", program),
        Emit::Source => print!("{}", program),
    }

    info!("Total time: {:?}", start.elapsed());

    Ok(ExitCode::SUCCESS)
}
