// tests/config_validation.rs

mod common;
use crate::common::{init_tracing, write_file, TestResult};

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::{tempdir, NamedTempFile};

use tdaemon::config::loader::parse_str;
use tdaemon::config::{
    check_size, confirm_custom_command, load_from_path, validate, validate_with, Settings,
};
use tdaemon::errors::TdaemonError;
use tdaemon::exec::TestCommand;
use tdaemon::fs::mock::MockFileSystem;
use tdaemon::fs::{FileSystem, RealFileSystem};
use tdaemon_test_utils::builders::{CliArgsBuilder, ScriptedConfirm};

#[test]
fn validate_accepts_existing_dir_and_known_program() -> TestResult {
    let dir = tempdir()?;
    for id in ["nose", "nosetests", "django", "py"] {
        validate(dir.path(), id, false)?;
    }
    Ok(())
}

#[test]
fn validate_rejects_missing_root() {
    let err = validate(Path::new("/definitely/not/here"), "nose", false).unwrap_err();
    assert!(matches!(err, TdaemonError::InvalidPath(_)));
    assert!(err.is_config());
    assert!(err.to_string().contains("is not a directory"));
}

#[test]
fn validate_rejects_file_as_root() -> TestResult {
    let file = NamedTempFile::new()?;
    let err = validate(file.path(), "nose", false).unwrap_err();
    assert!(matches!(err, TdaemonError::InvalidPath(_)));
    Ok(())
}

#[test]
fn unknown_program_only_matters_without_custom_command() {
    let fs = MockFileSystem::new();
    fs.add_dir("/proj");

    let err = validate_with(&fs, Path::new("/proj"), "jest", false).unwrap_err();
    assert!(matches!(err, TdaemonError::UnknownTestProgram { .. }));
    assert!(err.is_config());

    assert!(validate_with(&fs, Path::new("/proj"), "jest", true).is_ok());
}

#[test]
fn size_guard_is_silent_under_threshold() -> TestResult {
    let mut confirm = ScriptedConfirm::default();
    check_size(25, 25, &mut confirm)?;
    assert!(confirm.prompts().is_empty());
    Ok(())
}

#[test]
fn size_guard_asks_and_respects_the_answer() {
    let mut confirm = ScriptedConfirm::new([true, false]);

    assert!(check_size(40, 25, &mut confirm).is_ok());
    let err = check_size(40, 25, &mut confirm).unwrap_err();
    assert!(matches!(err, TdaemonError::UserDeclined(_)));
    assert!(!err.is_config());

    let prompts = confirm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("40MiB"));
    assert!(prompts[0].contains("25MiB"));
}

#[test]
fn custom_command_warning_accepts_closures() {
    let mut seen = Vec::new();
    let mut yes = |prompt: &str| {
        seen.push(prompt.to_string());
        true
    };
    assert!(confirm_custom_command("rm -rf build && make test", &mut yes).is_ok());
    assert!(seen[0].contains("$ rm -rf build && make test"));

    let mut no = |_: &str| false;
    let err = confirm_custom_command("make test", &mut no).unwrap_err();
    assert!(matches!(err, TdaemonError::UserDeclined(ref msg) if msg == "Ok, bye..."));
}

#[test]
fn settings_defaults_match_cli_surface() -> TestResult {
    let args = CliArgsBuilder::new(".").build();
    let settings = Settings::from_sources(&args, None)?;

    assert_eq!(settings.root, Path::new("."));
    assert_eq!(settings.test_program, "nose");
    assert_eq!(settings.command, TestCommand::Known("nose".to_string()));
    assert_eq!(settings.size_max, 25);
    assert_eq!(settings.interval, Duration::from_secs(1));
    assert!(!settings.debug);
    Ok(())
}

#[test]
fn cli_flags_override_config_file() -> TestResult {
    let file = parse_str(
        r#"
[daemon]
test_program = "django"
size_max = 100
interval_ms = 250
debug = true

[ignore]
dirs = ["node_modules"]
exclude = ["build/**"]
"#,
    )?;

    let args = CliArgsBuilder::new("/proj")
        .test_program("py")
        .size_max(10)
        .build();
    let settings = Settings::from_sources(&args, Some(file))?;

    assert_eq!(settings.command, TestCommand::Known("py".to_string()));
    assert_eq!(settings.size_max, 10);
    assert_eq!(settings.interval, Duration::from_millis(250));
    assert!(settings.debug);
    assert!(settings.ignore.is_ignored_dir("node_modules"));
    assert!(settings.ignore.is_ignored_dir(".git"));
    assert!(!settings.ignore.includes(Path::new("build/x.py")));
    Ok(())
}

#[test]
fn config_file_custom_command_is_used_unless_cli_overrides() -> TestResult {
    let file = parse_str("[daemon]\ncustom_command = \"make check\"\n")?;

    let settings = Settings::from_sources(&CliArgsBuilder::new(".").build(), Some(file.clone()))?;
    assert_eq!(settings.command, TestCommand::Custom("make check".to_string()));

    let args = CliArgsBuilder::new(".").custom_command("tox").build();
    let settings = Settings::from_sources(&args, Some(file))?;
    assert_eq!(settings.command, TestCommand::Custom("tox".to_string()));
    Ok(())
}

#[test]
fn zero_interval_is_rejected() {
    let args = CliArgsBuilder::new(".").interval_ms(0).build();
    let err = Settings::from_sources(&args, None).unwrap_err();
    assert!(matches!(err, TdaemonError::ConfigError(_)));
}

#[test]
fn bad_glob_in_config_is_a_config_error() -> TestResult {
    let file = parse_str("[ignore]\nexclude = [\"src/[\"]\n")?;
    let err = Settings::from_sources(&CliArgsBuilder::new(".").build(), Some(file)).unwrap_err();
    assert!(matches!(err, TdaemonError::ConfigError(ref msg) if msg.contains("invalid glob")));
    Ok(())
}

#[test]
fn load_from_path_reads_toml_and_reports_syntax_errors() -> TestResult {
    let mut good = NamedTempFile::new()?;
    write!(good, "[daemon]\ntest_program = \"py\"\n")?;
    let cfg = load_from_path(good.path())?;
    assert_eq!(cfg.daemon.test_program.as_deref(), Some("py"));

    let mut bad = NamedTempFile::new()?;
    write!(bad, "[daemon\n")?;
    let err = load_from_path(bad.path()).unwrap_err();
    assert!(matches!(err, TdaemonError::TomlError(_)));
    assert!(err.is_config());
    Ok(())
}

#[test]
fn prepare_runs_warnings_validation_and_size_guard_in_order() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    write_file(dir.path(), "a.py", "x = 1")?;

    let args = CliArgsBuilder::new(dir.path())
        .custom_command("make test")
        .size_max(0)
        .build();
    let settings = Settings::from_sources(&args, None)?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    // Tree is well under 1 MiB, so only the custom-command prompt fires.
    let mut confirm = ScriptedConfirm::new([true]);
    let (snapshotter, initial) = tdaemon::prepare(fs.clone(), &settings, &mut confirm)?;
    assert_eq!(confirm.prompts().len(), 1);
    assert!(confirm.prompts()[0].starts_with("BIG FAT WARNING"));
    assert_eq!(snapshotter.root(), dir.path());
    assert!(initial.contains("a.py"));

    let mut decline = ScriptedConfirm::new([false]);
    let err = tdaemon::prepare(fs, &settings, &mut decline).unwrap_err();
    assert!(matches!(err, TdaemonError::UserDeclined(_)));
    Ok(())
}

#[test]
fn prepare_asks_about_oversized_trees() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/proj/data.bin", vec![0u8; 2 * 1024 * 1024]);
    let fs: Arc<dyn FileSystem> = Arc::new(fs);

    let args = CliArgsBuilder::new("/proj").size_max(1).build();
    let settings = Settings::from_sources(&args, None)?;

    let mut decline = ScriptedConfirm::new([false]);
    let err = tdaemon::prepare(fs.clone(), &settings, &mut decline).unwrap_err();
    assert!(matches!(err, TdaemonError::UserDeclined(_)));
    assert!(decline.prompts()[0].contains("2MiB"));

    let mut accept = ScriptedConfirm::new([true]);
    let (_snapshotter, initial) = tdaemon::prepare(fs, &settings, &mut accept)?;
    assert_eq!(initial.len(), 1);
    Ok(())
}

#[test]
fn prepare_fails_fast_on_invalid_configuration() {
    let fs: Arc<dyn FileSystem> = Arc::new(MockFileSystem::new());
    let args = CliArgsBuilder::new("/proj").test_program("jest").build();
    let settings = Settings::from_sources(&args, None).unwrap();

    let mut confirm = ScriptedConfirm::default();
    let err = tdaemon::prepare(fs, &settings, &mut confirm).unwrap_err();
    assert!(err.is_config());
    assert!(confirm.prompts().is_empty());
}

#[tokio::test]
async fn startup_prompts_run_off_the_async_thread() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    write_file(dir.path(), "a.py", "x = 1")?;

    let args = CliArgsBuilder::new(dir.path())
        .custom_command("make test")
        .build();
    let settings = Settings::from_sources(&args, None)?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let runtime_thread = std::thread::current().id();
    let asked_on = Arc::new(std::sync::Mutex::new(Vec::new()));
    let record = Arc::clone(&asked_on);
    let confirm = move |_prompt: &str| {
        record.lock().unwrap().push(std::thread::current().id());
        true
    };

    let (_snapshotter, initial) = tdaemon::prepare_blocking(fs, settings, confirm).await?;
    assert!(initial.contains("a.py"));

    let asked_on = asked_on.lock().unwrap();
    assert_eq!(asked_on.len(), 1);
    assert_ne!(asked_on[0], runtime_thread);
    Ok(())
}

#[tokio::test]
async fn declined_prompt_on_blocking_pool_surfaces_as_user_declined() -> TestResult {
    let dir = tempdir()?;
    let args = CliArgsBuilder::new(dir.path())
        .custom_command("make test")
        .build();
    let settings = Settings::from_sources(&args, None)?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let confirm = ScriptedConfirm::new([false]);
    let err = tdaemon::prepare_blocking(fs, settings, confirm.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, TdaemonError::UserDeclined(_)));
    assert_eq!(confirm.prompts().len(), 1);
    Ok(())
}
