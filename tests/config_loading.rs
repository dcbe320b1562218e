// tests/config_loading.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use texwatch::config::{load_and_validate, parse_and_validate, parse_duration, DEFAULT_TARGET};
use texwatch::errors::TexwatchError;
use texwatch::types::{OutputFormat, PredictorMode};
use texwatch_test_utils::builders::ConfigFileBuilder;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn minimal_config_gets_all_defaults() -> TestResult {
    let cfg = parse_and_validate(
        r#"
        [predictor]
        program = "python3"
        "#,
    )?;

    assert_eq!(cfg.watch.target, PathBuf::from(DEFAULT_TARGET));
    assert_eq!(cfg.watch.debounce, Duration::from_secs(1));

    assert_eq!(cfg.predictor.mode, PredictorMode::Worker);
    assert_eq!(cfg.predictor.program, "python3");
    assert!(cfg.predictor.args.is_empty());
    assert_eq!(cfg.predictor.startup_timeout, Duration::from_secs(300));
    assert!(!cfg.predictor.warmup);

    assert_eq!(cfg.inference.out_format, OutputFormat::Katex);
    assert!(!cfg.inference.keep_style);
    assert_eq!(cfg.inference.num_beams, 1);

    assert_eq!(cfg.delivery.title, "TexTeller");
    assert!(cfg.delivery.clipboard);
    assert!(cfg.delivery.notifications);
    assert!(cfg.delivery.notify_on_start);
    assert_eq!(cfg.delivery.clipboard_command, None);
    Ok(())
}

#[test]
fn full_config_round_trips_every_section() -> TestResult {
    let cfg = parse_and_validate(
        r#"
        [watch]
        target = "/home/me/shots/eq.png"
        debounce = "750ms"

        [predictor]
        mode = "command"
        program = "texteller-cli"
        args = ["--image", "{image}"]
        startup_timeout = "2m"
        warmup = true

        [inference]
        out_format = "latex"
        keep_style = true
        num_beams = 3

        [delivery]
        title = "Eq"
        clipboard_command = ["wl-copy", "--type", "text/plain"]
        notify_on_start = false
        "#,
    )?;

    assert_eq!(cfg.watch.target, PathBuf::from("/home/me/shots/eq.png"));
    assert_eq!(cfg.watch.debounce, Duration::from_millis(750));
    assert_eq!(cfg.predictor.mode, PredictorMode::Command);
    assert_eq!(cfg.predictor.args, vec!["--image", "{image}"]);
    assert_eq!(cfg.predictor.startup_timeout, Duration::from_secs(120));
    assert!(cfg.predictor.warmup);
    assert_eq!(cfg.inference.out_format, OutputFormat::Latex);
    assert!(cfg.inference.keep_style);
    assert_eq!(cfg.inference.num_beams, 3);
    assert_eq!(cfg.delivery.title, "Eq");
    assert!(!cfg.delivery.notify_on_start);
    assert_eq!(
        cfg.delivery.clipboard_command,
        Some(vec!["wl-copy".to_string(), "--type".to_string(), "text/plain".to_string()])
    );
    Ok(())
}

#[test]
fn missing_predictor_section_is_a_parse_error() {
    let err = parse_and_validate("[watch]\ntarget = \"/tmp/a.png\"\n").unwrap_err();
    assert!(matches!(err, TexwatchError::TomlError(_)), "got {err:?}");
}

#[test]
fn unknown_output_format_is_rejected() {
    let err = parse_and_validate(
        r#"
        [predictor]
        program = "python3"
        [inference]
        out_format = "mathml"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, TexwatchError::TomlError(_)), "got {err:?}");
}

#[test]
fn semantic_errors_are_config_errors() {
    let cases = [
        ConfigFileBuilder::new().program("   ").build_raw(),
        ConfigFileBuilder::new().target("").build_raw(),
        ConfigFileBuilder::new().target("/").build_raw(),
        ConfigFileBuilder::new().debounce("0s").build_raw(),
        ConfigFileBuilder::new().debounce("soon").build_raw(),
        ConfigFileBuilder::new().startup_timeout("5 parsecs").build_raw(),
        ConfigFileBuilder::new().num_beams(0).build_raw(),
        ConfigFileBuilder::new().clipboard_command(&[]).build_raw(),
        ConfigFileBuilder::new().clipboard_command(&[""]).build_raw(),
    ];

    for raw in cases {
        let dbg = format!("{raw:?}");
        match texwatch::config::ConfigFile::try_from(raw) {
            Err(TexwatchError::ConfigError(_)) => {}
            other => panic!("expected ConfigError for {dbg}, got {other:?}"),
        }
    }
}

#[test]
fn load_from_disk_and_override_target() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Texwatch.toml");
    fs::write(
        &path,
        r#"
        [predictor]
        program = "python3"
        args = ["-u", "worker.py"]
        "#,
    )?;

    let cfg = load_and_validate(&path)?.with_target("/srv/shot.png");

    assert_eq!(cfg.watch.target, PathBuf::from("/srv/shot.png"));
    assert_eq!(cfg.predictor.args, vec!["-u", "worker.py"]);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_and_validate(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, TexwatchError::IoError(_)), "got {err:?}");
}

#[test]
fn parse_duration_units() {
    assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
    assert_eq!(parse_duration("1s"), Ok(Duration::from_secs(1)));
    assert_eq!(parse_duration(" 5m "), Ok(Duration::from_secs(300)));
    assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
    assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
}

#[test]
fn parse_duration_rejects_garbage() {
    for bad in ["", "10", "s", "1.5s", "3d", "-1s", "99999999999999999999h"] {
        assert!(parse_duration(bad).is_err(), "{bad:?} should not parse");
    }
}
