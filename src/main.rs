use ansi_term::Colour::Red;
use clap::{Parser, Subcommand};
use sketch::mach::{Program, Recorder, Runtime};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sketch", version, about = "Interpreter for a small drawing language")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compile and run a program, printing each drawing operation
    Run { file: PathBuf },
    /// Compile a program and report diagnostics without running it
    Check { file: PathBuf },
    /// Compile a program and print its command listing
    List { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Cmd::Run { file } => run(&file),
        Cmd::Check { file } => compile(&file).map(|_| ()),
        Cmd::List { file } => list(&file),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", Red.paint(error));
            }
            ExitCode::FAILURE
        }
    }
}

fn compile(path: &Path) -> Result<Program, Vec<String>> {
    let source = std::fs::read_to_string(path)
        .map_err(|error| vec![format!("{}: {}", path.display(), error)])?;
    Program::compile(&source)
        .map_err(|errors| errors.iter().map(|error| error.to_string()).collect())
}

fn run(path: &Path) -> Result<(), Vec<String>> {
    let program = compile(path)?;
    let mut canvas = Recorder::new();
    let result = Runtime::new(program).run(&mut canvas);
    for call in &canvas.calls {
        println!("{}", call);
    }
    result.map_err(|errors| errors.iter().map(|error| error.to_string()).collect())
}

fn list(path: &Path) -> Result<(), Vec<String>> {
    print!("{}", compile(path)?);
    Ok(())
}
