//! Child process execution
//!
//! Every external tool runs through [`CommandRunner`], which blocks until
//! the child exits. The core only sees this trait, so tests can replace
//! the real runner.
//!
//! [`ProcessRunner`] relays the child's stdout and stderr line by line while
//! it runs, and keeps a copy of each for the caller.

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Result, SolutionError};

/// Runs an external program and returns its standard output
pub trait CommandRunner {
    /// Run `program` with `args`, waiting for it to finish
    ///
    /// When `quiet` is false the child's output is also shown to the user.
    /// Spawn failures and nonzero exits are tool execution errors.
    fn execute(&self, program: &Path, args: &[String], quiet: bool) -> Result<String>;
}

/// Runner backed by real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    env: Vec<(OsString, OsString)>,
}

impl ProcessRunner {
    /// Create a runner that inherits the current environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add variables to the child environment
    #[must_use]
    pub fn with_env(mut self, vars: Vec<(OsString, OsString)>) -> Self {
        self.env.extend(vars);
        self
    }
}

/// Display name of a tool binary
pub fn tool_name(program: &Path) -> String {
    program
        .file_stem()
        .map_or_else(|| program.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// Copy `pipe` into a string, echoing each line to `sink` when given
fn relay(pipe: Option<impl Read>, mut sink: Option<impl Write>) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };
    let mut reader = BufReader::new(pipe);
    let mut captured = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("stopped reading child output: {e}");
                break;
            }
        }
        if let Some(out) = sink.as_mut() {
            if let Err(e) = out.write_all(&line).and_then(|()| out.flush()) {
                tracing::debug!("failed to echo child output: {e}");
                sink = None;
            }
        }
        captured.extend_from_slice(&line);
    }

    String::from_utf8_lossy(&captured).into_owned()
}

impl CommandRunner for ProcessRunner {
    fn execute(&self, program: &Path, args: &[String], quiet: bool) -> Result<String> {
        let tool = tool_name(program);
        tracing::debug!("running {} {}", program.display(), args.join(" "));

        let spawn_error = |e: io::Error| {
            tracing::error!("failed to run {tool}: {e}");
            SolutionError::ToolExecution {
                tool: tool.clone(),
                message: e.to_string(),
            }
        };

        let mut child = Command::new(program)
            .args(args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let (stdout, stderr) = thread::scope(|scope| {
            let errors = scope.spawn(move || relay(stderr_pipe, (!quiet).then(io::stderr)));
            let stdout = relay(stdout_pipe, (!quiet).then(io::stdout));
            (stdout, errors.join().unwrap_or_default())
        });

        let status = child.wait().map_err(spawn_error)?;

        if !status.success() {
            let status = status
                .code()
                .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit status {c}"));
            let detail = stderr.trim();
            let message = if detail.is_empty() {
                status
            } else {
                format!("{status}: {detail}")
            };
            tracing::error!("{tool} {}: {message}", args.join(" "));
            return Err(SolutionError::ToolExecution { tool, message });
        }

        Ok(stdout)
    }
}
