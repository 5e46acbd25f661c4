use std::process::{Command, Output, Stdio};

use crate::foundation::error::{ReelError, ReelResult};

/// External programs driven by the video pipelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Ffmpeg,
    Ffprobe,
    /// macOS text-to-speech.
    Say,
}

impl Tool {
    pub fn program(self) -> &'static str {
        match self {
            Self::Ffmpeg => "ffmpeg",
            Self::Ffprobe => "ffprobe",
            Self::Say => "say",
        }
    }

    /// How to get the tool onto `PATH`.
    pub fn install_hint(self) -> &'static str {
        match self {
            Self::Ffmpeg | Self::Ffprobe => {
                "install FFmpeg (macOS: `brew install ffmpeg`, Debian/Ubuntu: `apt install ffmpeg`)"
            }
            Self::Say => "`say` ships with macOS; narration requires a macOS host",
        }
    }

    fn probe_args(self) -> &'static [&'static str] {
        match self {
            Self::Ffmpeg | Self::Ffprobe => &["-version"],
            Self::Say => &["-v", "?"],
        }
    }

    /// Return `true` when the tool can be invoked from `PATH`.
    pub fn is_available(self) -> bool {
        Command::new(self.program())
            .args(self.probe_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Fail with an install hint unless the tool is available.
    pub fn require(self) -> ReelResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(self.missing())
        }
    }

    fn missing(self) -> ReelError {
        ReelError::process(format!(
            "{} is required but was not found on PATH; {}",
            self.program(),
            self.install_hint()
        ))
    }

    /// Run `cmd` (built for this tool) to completion, capturing its output.
    ///
    /// A non-zero exit becomes a [`ReelError::Process`] carrying the trimmed stderr.
    pub fn run(self, cmd: &mut Command) -> ReelResult<Output> {
        tracing::debug!(tool = self.program(), cmd = ?cmd, "running");
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => self.missing(),
                _ => ReelError::process(format!("failed to spawn {}: {e}", self.program())),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::process(format!(
                "{} exited with status {}: {}",
                self.program(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(output)
    }

    /// A fresh command for this tool.
    pub fn command(self) -> Command {
        Command::new(self.program())
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/tool.rs"]
mod tests;
