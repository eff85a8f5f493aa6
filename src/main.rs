//! hotshade - hot-reloading shader program cache.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    hotshade::logger::set_verbose(cli.verbose);

    let config = cli::common::load_config(&cli)?;

    match &cli.command {
        Commands::Expand { program, stage } => {
            cli::expand::expand_program(config, program, stage.map(Into::into))
        }
        Commands::Deps { program } => cli::deps::print_deps(config, program),
        Commands::Build { programs } => cli::build::build_programs(config, programs),
        Commands::Watch { programs } => cli::watch::watch_programs(config, programs),
    }
}
