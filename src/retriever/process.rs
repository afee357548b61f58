//! One request/response exchange with a freshly spawned server process.
//!
//! The child is wrapped in `ServerProcess`, which kills and reaps it on drop
//! so every early return (write failure, timeout, non-zero exit) releases the
//! process. Stdout and stderr are drained on their own threads while the
//! caller waits, otherwise a server that writes more than a pipe buffer
//! before exiting would never finish. A single deadline covers both the wait
//! and the collection of output: a background job that inherited the pipes
//! can keep them open after the direct child exits.

use crate::config::CommandSpec;
use crate::error::RetrieveError;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

type PipeReceiver = Receiver<io::Result<String>>;

#[derive(Clone, Copy, Debug)]
struct Deadline {
    at: Instant,
    limit: Duration,
}

impl Deadline {
    fn after(limit: Duration) -> Self {
        Self {
            at: Instant::now() + limit,
            limit,
        }
    }

    fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    fn expired(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// Spawn `command`, send `request`, close stdin, and return the stdout of a
/// server that exited successfully.
pub fn exchange(
    command: &CommandSpec,
    request: &str,
    timeout: Option<Duration>,
) -> Result<String, RetrieveError> {
    let deadline = timeout.map(Deadline::after);
    let mut process = ServerProcess::spawn(command)?;
    process.send(request)?;

    let stdout = process.drain_stdout();
    let stderr = process.drain_stderr();
    let status = process.wait(deadline)?;

    let stdout = process.collect(stdout, deadline)?;
    let stderr = process.collect(stderr, deadline)?;

    if !status.success() {
        return Err(RetrieveError::Exit {
            code: status.code(),
            stderr: stderr.trim().to_string(),
        });
    }
    if !stderr.trim().is_empty() {
        debug!(stderr = %stderr.trim(), "server wrote to stderr");
    }
    Ok(stdout)
}

struct ServerProcess {
    child: Child,
    label: String,
}

impl ServerProcess {
    fn spawn(command: &CommandSpec) -> Result<Self, RetrieveError> {
        let label = command.display();
        debug!(command = %label, "spawning server");
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RetrieveError::Spawn {
                program: command.program.to_string_lossy().into_owned(),
                source,
            })?;
        Ok(Self { child, label })
    }

    /// Write the request and close stdin to signal end of input.
    fn send(&mut self, request: &str) -> Result<(), RetrieveError> {
        let Some(mut stdin) = self.child.stdin.take() else {
            return Ok(());
        };
        match stdin.write_all(request.as_bytes()).and_then(|()| stdin.flush()) {
            Ok(()) => Ok(()),
            // A server that exits without reading still gets judged on its
            // exit status and output.
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!(command = %self.label, "server closed stdin before reading the request");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn drain_stdout(&mut self) -> Option<PipeReceiver> {
        self.child.stdout.take().map(spawn_reader::<ChildStdout>)
    }

    fn drain_stderr(&mut self) -> Option<PipeReceiver> {
        self.child.stderr.take().map(spawn_reader::<ChildStderr>)
    }

    fn wait(&mut self, deadline: Option<Deadline>) -> Result<ExitStatus, RetrieveError> {
        let Some(deadline) = deadline else {
            return Ok(self.child.wait()?);
        };
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            if deadline.expired() {
                return Err(self.timed_out(deadline));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Receive one pipe's contents, giving up when the deadline passes.
    ///
    /// On expiry the reader thread is left behind; it ends once whoever
    /// still holds the pipe closes it.
    fn collect(
        &mut self,
        pipe: Option<PipeReceiver>,
        deadline: Option<Deadline>,
    ) -> Result<String, RetrieveError> {
        let Some(pipe) = pipe else {
            return Ok(String::new());
        };
        let received = match deadline {
            Some(deadline) => match pipe.recv_timeout(deadline.remaining()) {
                Err(RecvTimeoutError::Timeout) => return Err(self.timed_out(deadline)),
                other => other.ok(),
            },
            None => pipe.recv().ok(),
        };
        match received {
            Some(result) => Ok(result?),
            None => Err(RetrieveError::Io(io::Error::other("output reader stopped"))),
        }
    }

    fn timed_out(&mut self, deadline: Deadline) -> RetrieveError {
        warn!(command = %self.label, timeout = ?deadline.limit, "server timed out; killing it");
        self.stop();
        RetrieveError::Timeout(deadline.limit)
    }

    /// Kill and reap the child if it is still running.
    fn stop(&mut self) {
        if let Ok(Some(_)) = self.child.try_wait() {
            return;
        }
        if let Err(err) = self.child.kill() {
            debug!(command = %self.label, error = %err, "kill failed");
        }
        if let Err(err) = self.child.wait() {
            debug!(command = %self.label, error = %err, "reaping server failed");
        }
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> PipeReceiver {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = pipe
            .read_to_end(&mut buf)
            .map(|_| String::from_utf8_lossy(&buf).into_owned());
        // The receiver is gone when the caller already gave up on this pipe.
        let _ = tx.send(result);
    });
    rx
}
