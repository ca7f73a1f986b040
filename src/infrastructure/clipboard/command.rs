//! Clipboard bridge backed by external copy/paste programs

use std::io;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::application::ports::{ClipboardBridge, ClipboardError};
use crate::domain::clipboard::ClipboardCommand;
use crate::domain::duration::Duration;

/// Clipboard bridge that pipes bytes through a clipboard-set program's
/// stdin and out of a clipboard-get program's stdout.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    copy: ClipboardCommand,
    paste: ClipboardCommand,
    timeout: Option<Duration>,
}

impl CommandClipboard {
    /// Create a bridge from explicit copy and paste commands
    pub fn new(copy: ClipboardCommand, paste: ClipboardCommand) -> Self {
        Self {
            copy,
            paste,
            timeout: None,
        }
    }

    /// Kill the program and fail the operation if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The clipboard-set command
    pub fn copy_command(&self) -> &ClipboardCommand {
        &self.copy
    }

    /// The clipboard-get command
    pub fn paste_command(&self) -> &ClipboardCommand {
        &self.paste
    }

    fn spawn(
        command: &ClipboardCommand,
        stdin: Stdio,
        stdout: Stdio,
    ) -> Result<Child, ClipboardError> {
        Command::new(command.program())
            .args(command.args())
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    ClipboardError::ProgramNotFound(command.program().to_string())
                } else {
                    ClipboardError::SpawnFailed {
                        program: command.program().to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    /// Run `fut` under the configured timeout. Dropping the future on expiry
    /// drops the child, which kills it.
    async fn bounded<F, T>(&self, program: &str, fut: F) -> Result<T, ClipboardError>
    where
        F: std::future::Future<Output = Result<T, ClipboardError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit.as_std(), fut)
                .await
                .map_err(|_| ClipboardError::TimedOut {
                    program: program.to_string(),
                    after: limit.to_string(),
                })?,
            None => fut.await,
        }
    }
}

#[async_trait]
impl ClipboardBridge for CommandClipboard {
    async fn write(
        &self,
        source: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<(), ClipboardError> {
        let program = self.copy.program();
        let mut child = Self::spawn(&self.copy, Stdio::piped(), Stdio::null())?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ClipboardError::Io("stdin was not captured".to_string()))?;

        self.bounded(program, async move {
            let feed = async move {
                let copied = tokio::io::copy(&mut *source, &mut stdin).await;
                // Closing stdin is the end-of-content marker for the program
                let closed = stdin.shutdown().await;
                copied.and(closed)
            };
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            let output = output.map_err(|e| ClipboardError::Io(e.to_string()))?;

            check_status(program, output.status, &output.stderr)?;
            match fed {
                // A program that exits cleanly may stop reading early
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                    Err(ClipboardError::Io(e.to_string()))
                }
                _ => Ok(()),
            }
        })
        .await
    }

    async fn read(
        &self,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<(), ClipboardError> {
        let program = self.paste.program();
        let mut child = Self::spawn(&self.paste, Stdio::null(), Stdio::piped())?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| ClipboardError::Io("stdout was not captured".to_string()))?;

        self.bounded(program, async move {
            let drain = async move {
                tokio::io::copy(&mut stdout, &mut *destination).await?;
                destination.flush().await
            };
            let (drained, output) = tokio::join!(drain, child.wait_with_output());
            let output = output.map_err(|e| ClipboardError::Io(e.to_string()))?;

            check_status(program, output.status, &output.stderr)?;
            drained.map_err(|e| ClipboardError::Io(e.to_string()))?;
            Ok(())
        })
        .await
    }
}

fn check_status(program: &str, status: ExitStatus, stderr: &[u8]) -> Result<(), ClipboardError> {
    if status.success() {
        return Ok(());
    }
    Err(ClipboardError::ExitFailure {
        program: program.to_string(),
        status: status.to_string(),
        stderr: String::from_utf8_lossy(stderr).into_owned(),
    })
}
