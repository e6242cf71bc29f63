use eyre::{Report, Result};
use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;

use crate::cfg::ConfigSpec;
use crate::cli::{Cli, Command, CompleteCommand, CompletionGenerator, ScriptCommand, generate_script, table};
use crate::ports::RealFs;

/// Dispatch a parsed command line, writing results to `out`
pub fn run(cli: Cli, out: &mut impl Write) -> Result<(), Report> {
    match cli.command {
        Command::Complete(cmd) => {
            let config = load_config_lenient(cli.config.as_deref());
            execute_complete_command(&cmd, &config, out)
        }
        Command::Script(cmd) => {
            let config = ConfigSpec::discover(cli.config.as_deref())?;
            execute_script_command(&cmd, &config, out)
        }
        Command::Table => execute_table_command(out),
    }
}

/// Completion never reports errors to the shell; a broken config means defaults.
fn load_config_lenient(path: Option<&Path>) -> ConfigSpec {
    ConfigSpec::discover(path).unwrap_or_else(|e| {
        warn!("ignoring config: {e}");
        ConfigSpec::default()
    })
}

// ============================================================================
// Completion
// ============================================================================

/// Candidate lines for a completion request. A lister that cannot be created
/// yields no dynamic candidates, static ones still resolve.
pub fn complete_lines(cmd: &CompleteCommand, config: &ConfigSpec) -> Vec<String> {
    let fs = match &cmd.base_dir {
        Some(dir) => RealFs::new(dir),
        None => match RealFs::current_dir() {
            Ok(fs) => fs,
            Err(e) => {
                debug!("no working directory: {e}");
                RealFs::new("")
            }
        },
    };
    let generator = CompletionGenerator::new(fs).with_follow_dirs(config.follow_dirs);

    generator
        .resolve(cmd.tokens.as_slice(), cmd.cword)
        .into_iter()
        .map(|c| {
            if cmd.fish {
                format!("{}\t{}", c.text, c.completion_type.description())
            } else {
                c.text
            }
        })
        .collect()
}

/// Execute the `complete` subcommand
pub fn execute_complete_command(cmd: &CompleteCommand, config: &ConfigSpec, out: &mut impl Write) -> Result<(), Report> {
    debug!("complete cword={} tokens={:?}", cmd.cword, cmd.tokens);
    for line in complete_lines(cmd, config) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Execute the `script` subcommand
pub fn execute_script_command(cmd: &ScriptCommand, config: &ConfigSpec, out: &mut impl Write) -> Result<(), Report> {
    info!("generating {:?} hook for '{}'", cmd.shell, config.program);
    write!(out, "{}", generate_script(cmd.shell, config))?;
    Ok(())
}

/// Execute the `table` subcommand
pub fn execute_table_command(out: &mut impl Write) -> Result<(), Report> {
    write!(out, "{}", serde_yaml::to_string(&table::dump())?)?;
    Ok(())
}
