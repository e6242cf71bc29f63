pub mod completion;
pub mod script;
pub mod table;

pub use completion::{Completion, CompletionGenerator, CompletionType};
pub use script::{Shell, generate_script};

use std::path::PathBuf;

/// Tab completion for the grond command line tool
#[derive(Debug, clap::Parser)]
#[command(name = "grond-complete", version, about)]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true, value_name = "FILE", env = "GROND_COMPLETE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the candidates for one cursor position, one per line
    Complete(CompleteCommand),
    /// Print the shell hook that registers completion for grond
    Script(ScriptCommand),
    /// Print the completion table as YAML
    Table,
}

/// Answer a single completion request
#[derive(Debug, Clone, clap::Args)]
pub struct CompleteCommand {
    /// Index of the token being completed (0 is the program name)
    #[arg(long, value_name = "INDEX")]
    pub cword: usize,

    /// Directory the file and directory listers start from
    #[arg(long, value_name = "DIR", env = "GROND_COMPLETE_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Emit `candidate<TAB>description` lines for fish
    #[arg(long)]
    pub fish: bool,

    /// Command line tokens typed so far, program name first
    #[arg(last = true, value_name = "TOKENS")]
    pub tokens: Vec<String>,
}

/// Print the registration hook for a shell
#[derive(Debug, Clone, clap::Args)]
pub struct ScriptCommand {
    #[arg(value_enum)]
    pub shell: Shell,
}
