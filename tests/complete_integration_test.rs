use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Command with logs and config redirected into `home`
fn grond_complete(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("grond-complete");
    cmd.env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("GROND_COMPLETE_CONFIG")
        .env_remove("GROND_COMPLETE_BASE_DIR");
    cmd
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout).lines().map(str::to_string).collect()
}

#[test]
fn test_subcommands_at_depth_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = grond_complete(temp.path())
        .args(["complete", "--cword", "1", "--", "grond", ""])
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["init", "check", "go", "forward", "harvest", "map-geometry", "plot", "export"]
    );
    Ok(())
}

#[test]
fn test_go_lists_files_in_working_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let work = temp.path().join("work");
    fs::create_dir_all(work.join("config"))?;
    fs::write(work.join("config").join("ws.gronf"), "")?;
    fs::write(work.join("ws.gronf"), "")?;

    let output = grond_complete(temp.path())
        .current_dir(&work)
        .args(["complete", "--cword", "2", "--", "grond", "go", ""])
        .output()?;

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["config", "ws.gronf"]);

    let output = grond_complete(temp.path())
        .current_dir(&work)
        .args(["complete", "--cword", "2", "--", "grond", "go", "config/"])
        .output()?;
    assert_eq!(stdout_lines(&output), vec!["config/ws.gronf"]);
    Ok(())
}

#[test]
fn test_plot_flag_prefix() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("dir1"))?;

    grond_complete(temp.path())
        .args(["complete", "--base-dir"])
        .arg(temp.path())
        .args(["--cword", "3", "--", "grond", "plot", "dir1", "--f"])
        .assert()
        .success()
        .stdout("--format\n");
    Ok(())
}

#[test]
fn test_unknown_subcommand_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    grond_complete(temp.path())
        .args(["complete", "--cword", "2", "--", "grond", "unknown", "x"])
        .assert()
        .success()
        .stdout("");
    Ok(())
}

#[test]
fn test_out_of_range_cursor_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    grond_complete(temp.path())
        .args(["complete", "--cword", "7", "--", "grond", "go"])
        .assert()
        .success()
        .stdout("");
    Ok(())
}

#[test]
fn test_broken_config_does_not_break_completion() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("broken.yml");
    fs::write(&config, "follow_dirs: [not, a, bool]\n")?;

    grond_complete(temp.path())
        .env("GROND_COMPLETE_CONFIG", &config)
        .args(["complete", "--cword", "2", "--", "grond", "export", "m"])
        .assert()
        .success()
        .stdout("mean\n")
        .stderr("");
    Ok(())
}

#[test]
fn test_broken_config_fails_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("broken.yml");
    fs::write(&config, "follow_dirs: [not, a, bool]\n")?;

    grond_complete(temp.path())
        .args(["--config"])
        .arg(&config)
        .args(["script", "bash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("serde yaml error"));
    Ok(())
}

#[test]
fn test_bash_script_honours_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("config.yml");
    fs::write(&config, "no_trailing_space: false\n")?;

    grond_complete(temp.path())
        .args(["--config"])
        .arg(&config)
        .args(["script", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -o filenames -F _grond_completion grond"))
        .stdout(predicate::str::contains("-o nospace").not());
    Ok(())
}

#[test]
fn test_table_lists_every_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut assert = grond_complete(temp.path()).arg("table").assert().success();
    for sub in ["init:", "check:", "go:", "forward:", "harvest:", "map-geometry:", "plot:", "export:"] {
        assert = assert.stdout(predicate::str::contains(sub));
    }
    Ok(())
}

#[test]
fn test_completion_writes_log_file_not_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    grond_complete(temp.path())
        .env("RUST_LOG", "debug")
        .args(["complete", "--cword", "1", "--", "grond", "p"])
        .assert()
        .success()
        .stdout("plot\n")
        .stderr("");

    let log = temp.path().join("data").join("grond-complete").join("logs").join("grond-complete.log");
    assert!(fs::read_to_string(log)?.contains("resolved 1 completions"));
    Ok(())
}

/// Source the generated bash hook in `work` and return `COMPREPLY` for `grond harvest <partial>`.
/// None when no bash is installed.
fn bash_compreply(home: &Path, work: &Path, partial: &str) -> Result<Option<Vec<String>>, Box<dyn std::error::Error>> {
    if Command::new("bash").arg("--version").output().is_err() {
        return Ok(None);
    }

    let bin_dir = PathBuf::from(env!("CARGO_BIN_EXE_grond-complete"))
        .parent()
        .map(Path::to_path_buf)
        .ok_or("binary has no parent directory")?;
    let path = std::env::join_paths(
        std::iter::once(bin_dir).chain(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default())),
    )?;

    let hook = r#"
eval "$(grond-complete script bash)"
COMP_WORDS=(grond harvest "$1")
COMP_CWORD=2
_grond_completion
printf '%s\n' "${COMPREPLY[@]}"
"#;
    let output = Command::new("bash")
        .args(["-c", hook, "bash", partial])
        .current_dir(work)
        .env("PATH", path)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("GROND_COMPLETE_CONFIG")
        .env_remove("GROND_COMPLETE_BASE_DIR")
        .output()?;
    assert!(output.status.success(), "bash hook failed: {}", String::from_utf8_lossy(&output.stderr));

    Ok(Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    ))
}

#[test]
fn test_bash_hook_keeps_candidates_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let work = temp.path().join("work");
    for dir in ["run[1]", "run1", "a*b", "ab", "my run"] {
        fs::create_dir_all(work.join(dir))?;
    }

    let Some(bracket) = bash_compreply(temp.path(), &work, "run[")? else {
        return Ok(());
    };
    assert_eq!(bracket, vec!["run[1]"]);

    let star = bash_compreply(temp.path(), &work, "a")?.unwrap_or_default();
    assert_eq!(star, vec!["a*b", "ab"]);

    let space = bash_compreply(temp.path(), &work, "my")?.unwrap_or_default();
    assert_eq!(space, vec!["my run"]);

    let all = bash_compreply(temp.path(), &work, "")?.unwrap_or_default();
    assert_eq!(all, vec!["a*b", "ab", "my run", "run1", "run[1]"]);
    Ok(())
}
