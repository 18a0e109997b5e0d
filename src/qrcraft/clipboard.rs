use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{QrCraftError, Result};

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut child = spawn_clipboard_command()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| QrCraftError::Api(format!("Failed to write to clipboard: {}", e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| QrCraftError::Api(format!("Failed to wait for clipboard command: {}", e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(QrCraftError::Api(
            "Clipboard command exited with error".to_string(),
        ))
    }
}

#[cfg(target_os = "macos")]
fn spawn_clipboard_command() -> Result<std::process::Child> {
    Command::new("pbcopy")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| QrCraftError::Api(format!("Failed to spawn pbcopy: {}", e)))
}

#[cfg(target_os = "linux")]
fn spawn_clipboard_command() -> Result<std::process::Child> {
    // Try xclip first, then xsel
    let xclip = Command::new("xclip")
        .args(["-selection", "clipboard"])
        .stdin(Stdio::piped())
        .spawn();

    match xclip {
        Ok(child) => Ok(child),
        Err(_) => Command::new("xsel")
            .args(["--clipboard", "--input"])
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                QrCraftError::Api(format!(
                    "Failed to spawn xclip or xsel: {}. Install xclip or xsel.",
                    e
                ))
            }),
    }
}

#[cfg(target_os = "windows")]
fn spawn_clipboard_command() -> Result<std::process::Child> {
    Command::new("clip")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| QrCraftError::Api(format!("Failed to spawn clip: {}", e)))
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn spawn_clipboard_command() -> Result<std::process::Child> {
    Err(QrCraftError::Api(
        "Clipboard not supported on this platform".to_string(),
    ))
}
