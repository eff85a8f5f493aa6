//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use hotshade::backend::StageKind;

/// Hot-reloading shader program cache
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = hotshade::config::CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the preprocessed text of a program's stages
    #[command(visible_alias = "e")]
    Expand {
        /// Program name, e.g. `post/blur`
        program: String,

        /// Only print this stage
        #[arg(short, long)]
        stage: Option<StageArg>,
    },

    /// List every source a program is built from
    #[command(visible_alias = "d")]
    Deps {
        /// Program name, e.g. `post/blur`
        program: String,
    },

    /// Build programs once and report failures
    #[command(visible_alias = "b")]
    Build {
        /// Program names
        #[arg(required = true)]
        programs: Vec<String>,
    },

    /// Build programs, then rebuild them whenever their sources change
    #[command(visible_alias = "w")]
    Watch {
        /// Program names
        #[arg(required = true)]
        programs: Vec<String>,
    },
}

/// Stage selector for `expand --stage`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageArg {
    Vertex,
    Fragment,
}

impl From<StageArg> for StageKind {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Vertex => StageKind::Vertex,
            StageArg::Fragment => StageKind::Fragment,
        }
    }
}
