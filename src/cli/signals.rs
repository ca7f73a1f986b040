//! Termination signal handling: first signal drains, second one forces exit

use std::fmt;
use std::io;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Exit status used when a second signal cuts the drain short
pub const EXIT_FORCED: i32 = 130;

/// Signals that stop the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Hangup,
    Terminate,
    Quit,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interrupt => "SIGINT",
            Self::Hangup => "SIGHUP",
            Self::Terminate => "SIGTERM",
            Self::Quit => "SIGQUIT",
        };
        write!(f, "{}", name)
    }
}

/// Listener for SIGINT, SIGHUP, SIGTERM and SIGQUIT.
///
/// Handlers are installed on construction, so signals that arrive before
/// `recv` is polled are not lost.
#[cfg(unix)]
pub struct ShutdownSignals {
    interrupt: Signal,
    hangup: Signal,
    terminate: Signal,
    quit: Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    /// Install the signal handlers
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            hangup: signal(SignalKind::hangup())?,
            terminate: signal(SignalKind::terminate())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    /// Wait for the next termination signal
    pub async fn recv(&mut self) -> TerminationSignal {
        tokio::select! {
            _ = self.interrupt.recv() => TerminationSignal::Interrupt,
            _ = self.hangup.recv() => TerminationSignal::Hangup,
            _ = self.terminate.recv() => TerminationSignal::Terminate,
            _ = self.quit.recv() => TerminationSignal::Quit,
        }
    }
}

/// Ctrl-C listener for platforms without unix signals
#[cfg(not(unix))]
pub struct ShutdownSignals;

#[cfg(not(unix))]
impl ShutdownSignals {
    /// Nothing to install up front on this platform
    pub fn new() -> io::Result<Self> {
        Ok(Self)
    }

    /// Wait for the next Ctrl-C
    pub async fn recv(&mut self) -> TerminationSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        TerminationSignal::Interrupt
    }
}

impl ShutdownSignals {
    /// Cancel `shutdown` on the first signal; exit the process on the second.
    pub async fn watch(mut self, shutdown: CancellationToken) {
        let first = self.recv().await;
        info!(signal = %first, "Exiting...");
        shutdown.cancel();

        let second = self.recv().await;
        error!(signal = %second, "Force quitting...");
        std::process::exit(EXIT_FORCED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_names() {
        assert_eq!(TerminationSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(TerminationSignal::Hangup.to_string(), "SIGHUP");
        assert_eq!(TerminationSignal::Terminate.to_string(), "SIGTERM");
        assert_eq!(TerminationSignal::Quit.to_string(), "SIGQUIT");
    }

    #[test]
    fn forced_exit_is_nonzero() {
        assert_ne!(EXIT_FORCED, 0);
    }

    #[tokio::test]
    async fn handlers_install() {
        assert!(ShutdownSignals::new().is_ok());
    }
}
