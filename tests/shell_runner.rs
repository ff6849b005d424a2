// tests/shell_runner.rs

#![cfg(unix)]

use tdaemon::exec::{CommandRunner, ShellRunner};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::test]
async fn interleaves_stdout_and_stderr_in_emission_order() -> TestResult {
    let mut runner = ShellRunner::new();
    let report = runner
        .run("echo 'E FAIL: test_x' 1>&2; sleep 0.05; echo 'ran 1 test'; echo FAILED 1>&2")
        .await?;

    assert!(report.success());
    assert_eq!(report.output, "E FAIL: test_x\nran 1 test\nFAILED");
    Ok(())
}

#[tokio::test]
async fn trailing_comment_does_not_break_the_wrapper() -> TestResult {
    let report = ShellRunner::new().run("echo out # done").await?;

    assert_eq!(report.exit_code, Some(0));
    assert_eq!(report.output, "out");
    Ok(())
}

#[tokio::test]
async fn failing_command_is_a_report_not_an_error() -> TestResult {
    let mut runner = ShellRunner::new();
    let report = runner.run("echo boom; exit 3").await?;

    assert_eq!(report.exit_code, Some(3));
    assert!(!report.success());
    assert_eq!(report.output, "boom");
    Ok(())
}

#[tokio::test]
async fn commands_run_through_the_shell_verbatim() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cmd = format!("cd {} && touch ran && ls", dir.path().display());

    let report = ShellRunner::new().run(&cmd).await?;
    assert!(report.success());
    assert_eq!(report.output, "ran");
    assert!(dir.path().join("ran").exists());
    Ok(())
}
