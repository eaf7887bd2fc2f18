use anyhow::Result;
use clap::Parser;

use tomlpath::args::Commands;
use tomlpath::ops;

/// Command line interface for toml files.
#[derive(Parser)]
#[command(name = "tomlpath", version, about, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get(args) => ops::run_get(args)?,
        Commands::Set(args) => ops::run_set(args)?,
        Commands::AddSection(args) => ops::run_add_section(args)?,
        Commands::Unset(args) => ops::run_unset(args)?,
        Commands::Search(args) => ops::run_search(args)?,
        Commands::UpdateDependencyList(args) => ops::run_update_dependency_list(args)?,
    }
    Ok(())
}

fn main() {
    env_logger::init();

    // One-line diagnostic on stderr and a failure exit for every error;
    // clap handles usage errors and the no-command help (exit code 2)
    // itself.
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
