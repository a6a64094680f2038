// Standard library
use std::ffi::OsStr;
use std::thread;
use std::time::{Duration, Instant};

// External crates
use crate::error::{CheckerError, Result};
use duct::cmd;
use tracing::debug;
use which::which;

/// Number of trailing stderr lines kept in a command failure message.
const ERROR_CONTEXT_LINES: usize = 20;

fn render_command<A: AsRef<OsStr>>(command: &str, args: &[A]) -> String {
    std::iter::once(command.to_string())
        .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace `\r\n` and stray `\r` line endings with `\n`.
///
/// wmic terminates lines with `\r\r\n`, which would otherwise leave
/// carriage returns glued to the last column.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "")
}

fn tail(text: &str, lines: usize) -> String {
    let collected: Vec<&str> = text.lines().collect();
    let start = collected.len().saturating_sub(lines);
    collected[start..].join("\n")
}

/// Run a command to completion and capture its stdout as text.
///
/// A missing executable, a non-zero exit status, or exceeding `timeout`
/// is reported as a command failure carrying the full command line.
/// The child is killed when the timeout elapses.
pub fn run_capture<A: AsRef<OsStr>>(
    command: &str,
    args: &[A],
    timeout: Option<Duration>,
) -> Result<String> {
    let full_command = render_command(command, args);

    if !is_tool_installed(command) {
        return Err(CheckerError::command(
            &full_command,
            format!("'{}' was not found in PATH", command),
        ));
    }

    debug!(command = %full_command, "Running inventory command");

    let handle = cmd(command, args)
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .start()
        .map_err(|e| CheckerError::command(&full_command, format!("failed to start: {}", e)))?;

    let start = Instant::now();
    let output = loop {
        match handle.try_wait() {
            Ok(Some(output)) => break output.clone(),
            Ok(None) => {
                if let Some(limit) = timeout {
                    if start.elapsed() >= limit {
                        let _ = handle.kill();
                        return Err(CheckerError::Timeout {
                            command: full_command,
                            limit,
                        });
                    }
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(CheckerError::command(
                    &full_command,
                    format!("error waiting for command: {}", e),
                ));
            }
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CheckerError::command(
            &full_command,
            format!(
                "exited with code {:?}\n{}",
                output.status.code(),
                tail(&stderr, ERROR_CONTEXT_LINES)
            ),
        ));
    }

    debug!(
        command = %full_command,
        elapsed_ms = start.elapsed().as_millis() as u64,
        bytes = output.stdout.len(),
        "Inventory command finished"
    );

    Ok(normalize_line_endings(&String::from_utf8_lossy(
        &output.stdout,
    )))
}

/// Checks if a command-line tool is available in the system's PATH.
pub fn is_tool_installed(tool_name: &str) -> bool {
    which(tool_name).is_ok()
}
