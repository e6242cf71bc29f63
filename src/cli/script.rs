use crate::cfg::ConfigSpec;

/// Name of the binary the hook scripts call back into
pub const BIN: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Render the hook that registers completion for `config.program` in `shell`
pub fn generate_script(shell: Shell, config: &ConfigSpec) -> String {
    match shell {
        Shell::Bash => BashCompletionGenerator::generate_script(config),
        Shell::Zsh => ZshCompletionGenerator::generate_script(config),
        Shell::Fish => FishCompletionGenerator::generate_script(config),
    }
}

fn function_name(program: &str) -> String {
    let sanitized: String = program
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("_{sanitized}_completion")
}

// Shell-specific completion generators
pub struct BashCompletionGenerator;
pub struct ZshCompletionGenerator;
pub struct FishCompletionGenerator;

/// Shell command printing one candidate per line for the current `COMP_WORDS`
fn complete_call() -> String {
    format!("{BIN} complete --cword \"$COMP_CWORD\" -- \"${{COMP_WORDS[@]}}\" 2>/dev/null")
}

/// `complete` registration line shared by bash and zsh (via bashcompinit)
fn registration(func: &str, config: &ConfigSpec) -> String {
    let mut line = String::from("complete");
    if config.no_trailing_space {
        line.push_str(" -o nospace");
    }
    if config.treat_as_filenames {
        line.push_str(" -o filenames");
    }
    line.push_str(&format!(" -F {func} {}\n", config.program));
    line
}

impl BashCompletionGenerator {
    pub fn generate_script(config: &ConfigSpec) -> String {
        let func = function_name(&config.program);

        // mapfile keeps each line verbatim: no word splitting, no pathname expansion
        let mut script = format!("{func}() {{\n");
        script.push_str("    COMPREPLY=()\n");
        script.push_str(&format!("    mapfile -t COMPREPLY < <({})\n", complete_call()));
        script.push_str("    return 0\n");
        script.push_str("}\n");
        script.push_str(&registration(&func, config));

        script
    }
}

impl ZshCompletionGenerator {
    pub fn generate_script(config: &ConfigSpec) -> String {
        let func = function_name(&config.program);

        let mut script = String::from("autoload -U +X bashcompinit && bashcompinit\n");
        script.push_str(&format!("{func}() {{\n"));
        // (f) splits on newlines only; without GLOB_SUBST the lines are not globbed
        script.push_str(&format!("    COMPREPLY=( ${{(f)\"$({})\"}} )\n", complete_call()));
        script.push_str("    return 0\n");
        script.push_str("}\n");
        script.push_str(&registration(&func, config));

        script
    }
}

impl FishCompletionGenerator {
    pub fn generate_script(config: &ConfigSpec) -> String {
        let func = format!("_{}", function_name(&config.program));

        let mut script = format!("function {func}\n");
        script.push_str("    set -l tokens (commandline -opc) (commandline -ct)\n");
        script.push_str(&format!(
            "    {BIN} complete --fish --cword (math (count $tokens) - 1) -- $tokens 2>/dev/null\n"
        ));
        script.push_str("end\n");
        script.push_str(&format!("complete -c {} -f -a '({func})'\n", config.program));

        script
    }
}
