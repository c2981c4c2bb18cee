use anyhow::Result;
use predicates::str::contains;
use serde_json::json;
use toolwrap_core::Target;

use super::support::StagedLauncher;
use super::support::shell_args;
use super::support::shell_program;

#[test]
fn shell_exit_codes_are_forwarded() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    launcher.map_current_target(&shell_program())?;

    for expected in [0, 1, 42, 255] {
        launcher
            .command()
            .args(shell_args(&format!("exit {expected}")))
            .assert()
            .code(expected);
    }
    Ok(())
}

#[test]
fn shell_arguments_reach_the_program() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    launcher.map_current_target(&shell_program())?;

    launcher
        .command()
        .args(shell_args("echo HelloWorld"))
        .assert()
        .success()
        .stdout(contains("HelloWorld"));
    Ok(())
}

#[test]
fn child_stderr_is_inherited() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    launcher.map_current_target(&shell_program())?;

    launcher
        .command()
        .args(shell_args("echo complaint 1>&2 && exit 3"))
        .assert()
        .code(3)
        .stderr(contains("complaint"));
    Ok(())
}

#[test]
fn config_with_byte_order_mark_is_accepted() -> Result<()> {
    let launcher = StagedLauncher::new()?;
    let target = Target::current().key();
    let document = serde_json::to_string(&json!({ target: { "program": shell_program() } }))?;
    std::fs::write(launcher.config_path(), format!("\u{feff}{document}"))?;

    launcher
        .command()
        .args(shell_args("exit 4"))
        .assert()
        .code(4);
    Ok(())
}

#[cfg(unix)]
mod unix {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    use crate::suite::support::command_for;

    #[test]
    fn arguments_are_not_split_or_requoted() -> Result<()> {
        let launcher = StagedLauncher::new()?;
        launcher.map_current_target("/bin/sh")?;

        let output = launcher
            .command()
            .args([
                "-c",
                r#"for arg in "$@"; do printf '[%s]\n' "$arg"; done"#,
                "sh",
                "two words",
                r#"double " and 'single' quotes"#,
                "",
                "*",
                "--flag=$HOME",
            ])
            .assert()
            .success()
            .get_output()
            .clone();

        assert_eq!(
            String::from_utf8(output.stdout)?,
            "[two words]\n[double \" and 'single' quotes]\n[]\n[*]\n[--flag=$HOME]\n"
        );
        Ok(())
    }

    #[test]
    fn stdin_is_inherited() -> Result<()> {
        let launcher = StagedLauncher::new()?;
        launcher.map_current_target("/bin/sh")?;

        launcher
            .command()
            .args(["-c", "cat"])
            .write_stdin("piped through")
            .assert()
            .success()
            .stdout("piped through");
        Ok(())
    }

    #[test]
    fn child_runs_in_the_callers_working_directory() -> Result<()> {
        let launcher = StagedLauncher::new()?;
        launcher.map_current_target("/bin/sh")?;
        let cwd = TempDir::new()?;

        let output = launcher
            .command()
            .args(["-c", "pwd -P"])
            .current_dir(cwd.path())
            .assert()
            .success()
            .get_output()
            .clone();

        assert_eq!(
            String::from_utf8(output.stdout)?.trim_end(),
            cwd.path().canonicalize()?.to_string_lossy()
        );
        Ok(())
    }

    #[test]
    fn relative_program_resolves_against_the_launcher_directory() -> Result<()> {
        let launcher = StagedLauncher::new()?;
        std::fs::create_dir(launcher.dir().join("native"))?;
        symlink("/bin/sh", launcher.dir().join("native").join("bundled-sh"))?;
        launcher.map_current_target("native/bundled-sh")?;
        let elsewhere = TempDir::new()?;

        launcher
            .command()
            .args(["-c", "exit 5"])
            .current_dir(elsewhere.path())
            .assert()
            .code(5);
        Ok(())
    }

    #[test]
    fn environment_references_in_program_are_expanded() -> Result<()> {
        let launcher = StagedLauncher::new()?;

        launcher.map_current_target("%TOOLWRAP_TEST_SHELL%")?;
        launcher
            .command()
            .env("TOOLWRAP_TEST_SHELL", "/bin/sh")
            .args(["-c", "exit 6"])
            .assert()
            .code(6);

        launcher.map_current_target("${TOOLWRAP_TEST_BIN}/sh")?;
        launcher
            .command()
            .env("TOOLWRAP_TEST_BIN", "/bin")
            .args(["-c", "exit 7"])
            .assert()
            .code(7);
        Ok(())
    }

    #[test]
    fn unset_environment_reference_stays_literal() -> Result<()> {
        let launcher = StagedLauncher::new()?;
        launcher.map_current_target("%TOOLWRAP_TEST_UNSET%")?;

        launcher
            .command()
            .env_remove("TOOLWRAP_TEST_UNSET")
            .assert()
            .code(1)
            .stdout(contains("Unable to start process"))
            .stdout(contains("%TOOLWRAP_TEST_UNSET%"));
        Ok(())
    }

    #[test]
    fn signal_termination_maps_to_128_plus_signal() -> Result<()> {
        let launcher = StagedLauncher::new()?;
        launcher.map_current_target("/bin/sh")?;

        launcher
            .command()
            .args(["-c", "kill -TERM $$"])
            .assert()
            .code(143);
        Ok(())
    }

    #[test]
    fn launcher_reached_through_a_symlink_uses_its_own_directory() -> Result<()> {
        let launcher = StagedLauncher::new()?;
        launcher.map_current_target("/bin/sh")?;
        let links = TempDir::new()?;
        let link = links.path().join("wrapped-tool");
        symlink(launcher.exe(), &link)?;

        command_for(&link)
            .args(["-c", "exit 9"])
            .assert()
            .code(9);
        Ok(())
    }
}
