use crate::pairs::ExamplePair;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitStatus;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Handle to the pre-built spacegrep executable.
///
/// The executable is opaque to the driver: the only contract is that it
/// accepts `-p <pattern-file> -d <document-file>` and reports success or
/// failure through its exit status.
pub struct Matcher {
    executable: PathBuf,
}

impl Matcher {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Render the invocation for `pair` as a shell-like command line.
    ///
    /// This is exactly what [`Matcher::invoke`] will run, echoed for the user
    /// before each invocation.
    pub fn command_line(&self, pair: &ExamplePair) -> String {
        format!(
            "{} -p {} -d {}",
            self.executable.display(),
            pair.pattern.display(),
            pair.doc.display()
        )
    }

    /// Run the matcher on one pair, blocking until it exits.
    ///
    /// The child inherits this process's standard streams, so whatever the
    /// matcher prints passes through unmodified. A spawn failure (e.g. the
    /// executable does not exist) is an error; a child that runs and fails is
    /// reported through the returned exit code.
    pub fn invoke(&self, pair: &ExamplePair) -> Result<ExitCode> {
        let mut child = std::process::Command::new(&self.executable)
            .arg("-p")
            .arg(&pair.pattern)
            .arg("-d")
            .arg(&pair.doc)
            .spawn()
            .with_context(|| format!("cannot run matcher {}", self.executable.display()))?;
        let exit_status = child
            .wait()
            .with_context(|| format!("cannot wait for matcher {}", self.executable.display()))?;
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }

    /// Run the matcher on one pair with its output captured.
    ///
    /// Unlike [`Matcher::invoke`], nothing streams through: stdout carries
    /// the match results and is collected for report generation, stderr is
    /// collected for the caller to relay.
    pub fn capture(&self, pair: &ExamplePair) -> Result<Captured> {
        let output = std::process::Command::new(&self.executable)
            .arg("-p")
            .arg(&pair.pattern)
            .arg("-d")
            .arg(&pair.doc)
            .output()
            .with_context(|| format!("cannot run matcher {}", self.executable.display()))?;
        let code = match output.status.code() {
            Some(x) => x,
            None => terminated_by_signal(output.status),
        };
        Ok(Captured {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code,
        })
    }
}

/// Everything collected from one captured invocation.
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
    pub code: ExitCode,
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
