//! External command probes with a bounded timeout.
//!
//! A probe never fails: a missing executable, a non-zero exit or a timeout
//! all come back as a [`ProbeOutput`] with `success == false`.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Timeout applied to every probe unless the manifest overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Stderr sentinel reported when a probe exceeds its timeout.
pub const TIMEOUT_MESSAGE: &str = "Command timed out";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Minimum time left to drain pipes after the child exits.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Result of running an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutput {
    /// Whether the command ran to completion with exit code 0.
    pub success: bool,

    /// Exit code (None if the command never ran, timed out or was killed by a signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error, or a description of why the command could not run.
    pub stderr: String,
}

impl ProbeOutput {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Create the result reported for a timed out command.
    pub fn timed_out() -> Self {
        Self::failure(None, TIMEOUT_MESSAGE)
    }

    /// Whether this result represents a timeout.
    pub fn is_timeout(&self) -> bool {
        !self.success && self.exit_code.is_none() && self.stderr == TIMEOUT_MESSAGE
    }
}

/// Runs external commands on behalf of the checks.
///
/// Implemented by [`SystemRunner`] for real runs and by
/// [`ScriptedRunner`](super::ScriptedRunner) in tests.
pub trait CommandRunner {
    /// Run `argv[0]` with the remaining arguments and capture its output.
    fn run(&self, argv: &[&str]) -> ProbeOutput;
}

/// Runs commands as child processes, killing them after a timeout.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl SystemRunner {
    /// Create a runner with the given per-command timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

enum Exit {
    Finished(ExitStatus),
    TimedOut,
    WaitFailed(String),
}

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[&str]) -> ProbeOutput {
        let start = Instant::now();
        let Some((program, args)) = argv.split_first() else {
            return ProbeOutput::failure(None, "empty command");
        };

        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                debug!("probe {:?} could not start: {}", argv, e);
                return ProbeOutput::failure(None, e.to_string());
            }
        };

        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let exit = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Exit::Finished(status),
                Ok(None) if start.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    break Exit::TimedOut;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => break Exit::WaitFailed(e.to_string()),
            }
        };

        match exit {
            // A background grandchild may keep the pipes open past the child's exit.
            Exit::Finished(status) => {
                let deadline = (start + self.timeout).max(Instant::now() + DRAIN_GRACE);
                let stdout = drain_reader(stdout, deadline);
                let stderr = drain_reader(stderr, deadline);
                debug!(
                    "probe {:?} exited with {:?} after {:?}",
                    argv,
                    status.code(),
                    start.elapsed()
                );
                ProbeOutput {
                    success: status.success(),
                    exit_code: status.code(),
                    stdout,
                    stderr,
                }
            }
            // Readers are left detached: grandchildren may still hold the pipes open.
            Exit::TimedOut => {
                warn!("probe {:?} timed out after {:?}", argv, self.timeout);
                ProbeOutput::timed_out()
            }
            Exit::WaitFailed(message) => {
                warn!("probe {:?} could not be awaited: {}", argv, message);
                ProbeOutput::failure(None, message)
            }
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut chunk = [0u8; 4096];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(chunk[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Collect whatever a reader delivers before `deadline`.
fn drain_reader(reader: Option<Receiver<Vec<u8>>>, deadline: Instant) -> String {
    let mut buf = Vec::new();
    if let Some(rx) = reader {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(chunk) => buf.extend_from_slice(&chunk),
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    debug!("pipe still open at deadline, keeping partial output");
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
