// tests/command_predictor.rs
#![cfg(unix)]

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use texwatch::config::PredictorConfig;
use texwatch::errors::TexwatchError;
use texwatch::predict::command::program_available;
use texwatch::predict::{CommandPredictor, InferenceOptions, Predictor};
use texwatch::types::{OutputFormat, PredictorMode};
use texwatch_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn sh_command(args: &[&str]) -> PredictorConfig {
    PredictorConfig {
        mode: PredictorMode::Command,
        program: "sh".to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        startup_timeout: Duration::from_secs(5),
        warmup: false,
    }
}

#[test]
fn placeholders_are_substituted() -> TestResult {
    let p = CommandPredictor::new(&sh_command(&[
        "--image={image}",
        "--format",
        "{format}",
        "--beams={num_beams}",
        "--keep-style={keep_style}",
    ]))?;
    let options = InferenceOptions {
        out_format: OutputFormat::Latex,
        keep_style: true,
        num_beams: 5,
    };

    assert_eq!(
        p.build_args(Path::new("/tmp/eq.png"), &options),
        vec![
            "--image=/tmp/eq.png",
            "--format",
            "latex",
            "--beams=5",
            "--keep-style=true",
        ]
    );
    Ok(())
}

#[test]
fn image_is_appended_without_placeholder() -> TestResult {
    let p = CommandPredictor::new(&sh_command(&["--format", "{format}"]))?;

    assert_eq!(
        p.build_args(Path::new("/tmp/eq.png"), &InferenceOptions::default()),
        vec!["--format", "katex", "/tmp/eq.png"]
    );
    Ok(())
}

#[tokio::test]
async fn stdout_is_the_trimmed_prediction() -> TestResult {
    init_tracing();

    // The appended image path lands in `$0`.
    let mut p = CommandPredictor::new(&sh_command(&["-c", "echo \"  latex for $0  \""]))?;
    let images = vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")];

    let texts = with_timeout(p.predict(&images, &InferenceOptions::default())).await?;

    assert_eq!(texts, vec!["latex for /tmp/a.png", "latex for /tmp/b.png"]);
    assert_eq!(p.device(), "external command");
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_is_an_inference_error_with_stderr() -> TestResult {
    init_tracing();

    let mut p = CommandPredictor::new(&sh_command(&["-c", "echo 'no formula found' >&2; exit 2"]))?;
    let images = vec![PathBuf::from("/tmp/a.png")];

    match with_timeout(p.predict(&images, &InferenceOptions::default())).await {
        Err(TexwatchError::Inference(msg)) => {
            assert!(msg.contains("no formula found"), "{msg}");
            assert!(msg.contains("code 2"), "{msg}");
        }
        other => panic!("expected Inference error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn warm_up_is_a_no_op() -> TestResult {
    let mut p = CommandPredictor::new(&sh_command(&["-c", "exit 1"]))?;
    with_timeout(p.warm_up(&InferenceOptions::default())).await?;
    Ok(())
}

#[test]
fn missing_program_fails_at_startup() {
    let cfg = PredictorConfig {
        program: "texwatch-no-such-predictor".to_string(),
        ..sh_command(&[])
    };
    assert!(matches!(CommandPredictor::new(&cfg), Err(TexwatchError::Startup(_))));
}

#[test]
fn program_lookup() {
    assert!(program_available("sh"));
    assert!(!program_available("texwatch-no-such-predictor"));
    assert!(!program_available("/definitely/not/here/predict"));
}
