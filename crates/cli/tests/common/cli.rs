//! Runs the `mq` binary and captures what it printed

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Builder around one `mq` invocation
pub struct MqCommand {
    inner: Command,
    shown_args: Vec<String>,
    input: Option<String>,
    hold: Option<Duration>,
}

impl MqCommand {
    /// `mq` with `dir` as working directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut inner = Command::new(env!("CARGO_BIN_EXE_mq"));
        inner.current_dir(dir.as_ref());
        // Keep the user's overrides out of test runs
        inner.env_remove("MARQUEE_CLIENT_ID");

        Self {
            inner,
            shown_args: Vec::new(),
            input: None,
            hold: None,
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        for arg in args {
            self.inner.arg(arg);
            self.shown_args.push(arg.to_string());
        }
        self
    }

    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.inner.env(key, value);
        self
    }

    /// Lines fed to stdin; stdin is closed afterwards
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.input = Some(data.to_string());
        self
    }

    /// Keep stdin open for `duration` after writing, as a user pausing
    /// before the next keystroke would
    pub fn hold_stdin(&mut self, duration: Duration) -> &mut Self {
        self.hold = Some(duration);
        self
    }

    pub fn execute(&mut self) -> Result<Run> {
        let mut child = self
            .inner
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn mq")?;

        let mut stdin = child.stdin.take().context("stdin not captured")?;
        if let Some(input) = &self.input {
            stdin.write_all(input.as_bytes())?;
            stdin.flush()?;
        }
        if let Some(hold) = self.hold {
            std::thread::sleep(hold);
        }
        drop(stdin);

        let output = child.wait_with_output().context("Failed to wait for mq")?;
        Ok(Run {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run and require exit status 0
    pub fn assert_success(&mut self) -> Result<Run> {
        let run = self.execute()?;
        anyhow::ensure!(
            run.success(),
            "mq {:?} exited with {:?}\n--- stdout\n{}--- stderr\n{}",
            self.shown_args,
            run.code,
            run.stdout,
            run.stderr
        );
        Ok(run)
    }

    /// Run and require a non-zero exit status
    pub fn assert_failure(&mut self) -> Result<Run> {
        let run = self.execute()?;
        anyhow::ensure!(
            !run.success(),
            "mq {:?} unexpectedly succeeded\n--- stdout\n{}",
            self.shown_args,
            run.stdout
        );
        Ok(run)
    }
}

/// Captured output of a finished run
#[derive(Debug, Clone)]
pub struct Run {
    /// `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Run {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Stdout lines containing `text`
    pub fn count_stdout(&self, text: &str) -> usize {
        self.stdout.lines().filter(|line| line.contains(text)).count()
    }

    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// `mq` invocation inside a `TestHome`
///
/// ```ignore
/// mq!(&home, "search", "mariners").assert_success()?;
/// ```
#[macro_export]
macro_rules! mq {
    ($home:expr, $($arg:expr),* $(,)?) => {{
        let home: &$crate::common::TestHome = $home;
        let mut cmd = home.command();
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
