// tests/lifecycle.rs
//
// End-to-end startup behaviour of `texwatch::run` with a config file on
// disk. No model is ever loaded: the predictor program does not exist.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use texwatch::cli::CliArgs;
use texwatch::errors::TexwatchError;
use texwatch::watch::WatchTarget;
use texwatch::{resolve_config, run};
use texwatch_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(dir: &Path, target: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("Texwatch.toml");
    fs::write(
        &path,
        format!(
            r#"
[watch]
target = '{}'

[predictor]
mode = "command"
program = "texwatch-no-such-predictor"

[delivery]
clipboard = false
notifications = false
"#,
            target.display()
        ),
    )?;
    Ok(path)
}

fn args(config: PathBuf, target: Option<&Path>, dry_run: bool) -> CliArgs {
    CliArgs {
        config,
        target: target.map(|t| t.display().to_string()),
        log_level: None,
        dry_run,
    }
}

#[tokio::test]
async fn dry_run_succeeds_without_loading_the_model() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let shots = dir.path().join("shots");
    let config = write_config(dir.path(), &shots.join("latexPredict.png"))?;

    with_timeout(run(args(config, None, true))).await?;

    assert!(!shots.exists(), "dry-run must not touch the watch directory");
    Ok(())
}

#[tokio::test]
async fn model_load_failure_stops_before_watching() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let shots = dir.path().join("shots");
    let config = write_config(dir.path(), &shots.join("latexPredict.png"))?;

    match with_timeout(run(args(config, None, false))).await {
        Err(TexwatchError::Startup(msg)) => {
            assert!(msg.contains("texwatch-no-such-predictor"), "{msg}")
        }
        other => panic!("expected Startup error, got {other:?}"),
    }

    assert!(!shots.exists(), "nothing may be created before the model loads");
    Ok(())
}

#[tokio::test]
async fn missing_config_file_is_an_error() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let res = with_timeout(run(args(dir.path().join("absent.toml"), None, true))).await;

    assert!(res.is_err(), "got {res:?}");
    Ok(())
}

#[test]
fn target_flag_overrides_the_config() -> TestResult {
    let dir = tempfile::tempdir()?;
    let from_file = dir.path().join("shots").join("latexPredict.png");
    let config = write_config(dir.path(), &from_file)?;

    let cfg = resolve_config(&args(config.clone(), None, false))?;
    assert_eq!(cfg.watch.target, from_file);

    let other = dir.path().join("elsewhere.png");
    let cfg = resolve_config(&args(config, Some(&other), false))?;
    assert_eq!(cfg.watch.target, other);
    Ok(())
}

#[cfg(unix)]
#[test]
fn prepared_target_sees_through_a_symlinked_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let real = dir.path().join("real");
    fs::create_dir(&real)?;
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&real, &link)?;

    let target = WatchTarget::prepare(link.join("shots").join("latexPredict.png"))?;

    assert!(real.join("shots").is_dir());
    assert!(target.matches(&link.join("shots").join("latexPredict.png")));
    let canonical = fs::canonicalize(&real)?.join("shots").join("latexPredict.png");
    assert!(target.matches(&canonical), "{target} should match {canonical:?}");
    Ok(())
}
