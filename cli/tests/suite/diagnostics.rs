use anyhow::Result;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::json;
use toolwrap_core::Target;

use super::support::StagedLauncher;

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn missing_config_file_is_reported() -> Result<()> {
    let launcher = StagedLauncher::new()?;

    let output = launcher
        .command()
        .assert()
        .code(1)
        .stdout(contains("Missing configuration file"))
        .stdout(contains("DotnetToolWrapper.json"))
        .get_output()
        .clone();

    assert_eq!(
        stdout_lines(&output),
        vec![format!(
            "Missing configuration file {}",
            launcher.config_path().display()
        )]
    );
    assert!(output.stderr.is_empty(), "launcher wrote to stderr");
    Ok(())
}

#[test]
fn unsupported_target_is_reported() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    launcher.write_config(&json!({ "fake-target": { "program": "fake" } }))?;

    let output = launcher
        .command()
        .assert()
        .code(1)
        .stdout(contains("does not support"))
        .get_output()
        .clone();

    assert_eq!(
        stdout_lines(&output),
        vec![format!(
            "This tool does not support the {} target",
            Target::current()
        )]
    );
    Ok(())
}

#[test]
fn bad_configuration_is_reported() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    let target = Target::current().key();
    launcher.write_config(&json!({ target: { "notprogram": "fake" } }))?;

    let output = launcher
        .command()
        .assert()
        .code(1)
        .stdout(contains("Bad configuration"))
        .get_output()
        .clone();

    assert_eq!(
        stdout_lines(&output),
        vec![format!("Bad configuration for {} target", Target::current())]
    );
    Ok(())
}

#[test]
fn non_string_program_is_bad_configuration() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    let target = Target::current().key();
    launcher.write_config(&json!({ target: { "program": 7 } }))?;

    launcher
        .command()
        .assert()
        .code(1)
        .stdout(contains("Bad configuration"));
    Ok(())
}

#[test]
fn malformed_config_is_reported() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    std::fs::write(launcher.config_path(), "{ \"linux-x64\": ")?;

    let output = launcher
        .command()
        .assert()
        .code(1)
        .stdout(contains("Invalid configuration file"))
        .stdout(contains("DotnetToolWrapper.json"))
        .get_output()
        .clone();

    assert_eq!(stdout_lines(&output).len(), 1);
    Ok(())
}

#[test]
fn unstartable_program_is_reported() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    launcher.map_current_target("no-such-tool")?;

    let output = launcher
        .command()
        .arg("ignored")
        .assert()
        .code(1)
        .stdout(contains("Unable to start process"))
        .get_output()
        .clone();

    assert_eq!(
        stdout_lines(&output),
        vec![format!(
            "Unable to start process {}",
            launcher.dir().join("no-such-tool").display()
        )]
    );
    Ok(())
}
