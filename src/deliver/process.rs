// src/deliver/process.rs

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::errors::{Result, TexwatchError};

/// Run a helper program to completion, optionally feeding `input` on stdin.
///
/// stdout/stderr are not piped: clipboard helpers such as `xclip` leave a
/// background process holding the selection, and that process would keep a
/// pipe open forever.
pub async fn run_helper(program: &str, args: &[String], input: Option<&str>) -> Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let mut child = cmd
        .spawn()
        .map_err(|e| TexwatchError::Delivery(format!("spawning '{program}': {e}")))?;

    if let Some(input) = input {
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .await
                .map_err(|e| TexwatchError::Delivery(format!("writing to '{program}': {e}")))?;
            // Dropping stdin closes the pipe so the helper sees EOF.
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| TexwatchError::Delivery(format!("waiting for '{program}': {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(TexwatchError::Delivery(format!(
            "'{program}' exited with code {}",
            status.code().unwrap_or(-1)
        )))
    }
}
