use clap::{Args, Parser, Subcommand};

use minilang::{generator::Generator, interpreter::Interpreter};

#[derive(Debug, Parser)]
#[command(about = "Interpreter and JavaScript translator for a minimal BEGIN/END language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a program and execute it directly
    Run(FileArgs),
    /// Parse a program and print the equivalent JavaScript
    Compile(FileArgs),
}

#[derive(Debug, Args)]
struct FileArgs {
    file: String,
}

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] minilang::parser::ParseError),
    #[error(transparent)]
    Execution(#[from] minilang::interpreter::ExecutionError),
}

fn main() {
    let args = Cli::parse();

    let result = match &args.command {
        Command::Run(args) => run_command(args),
        Command::Compile(args) => compile_command(args),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run_command(args: &FileArgs) -> Result<(), CommandError> {
    let source = std::fs::read_to_string(&args.file)?;
    let program = minilang::parser::parse(&source)?;
    Interpreter::default().run(&program)?;
    Ok(())
}

fn compile_command(args: &FileArgs) -> Result<(), CommandError> {
    let source = std::fs::read_to_string(&args.file)?;
    let program = minilang::parser::parse(&source)?;
    println!("{}", Generator::new().generate(&program));
    Ok(())
}
