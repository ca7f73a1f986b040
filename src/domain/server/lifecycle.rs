//! Server lifecycle state machine

use std::fmt;
use thiserror::Error;

/// Server lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServerState {
    #[default]
    NotStarted,
    Listening,
    Stopping,
    Stopped,
}

impl ServerState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Listening => "listening",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: ServerState,
    pub action: String,
}

/// Server lifecycle entity.
///
/// State machine:
///   NOT STARTED -> LISTENING (start)
///   LISTENING -> STOPPING (begin_stop)
///   STOPPING -> STOPPED (finish_stop)
///
/// There is no way back to LISTENING once stopping has begun.
#[derive(Debug, Default)]
pub struct ServerLifecycle {
    state: ServerState,
}

impl ServerLifecycle {
    /// Create a new lifecycle in the not-started state
    pub fn new() -> Self {
        Self {
            state: ServerState::NotStarted,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Check if the listener is accepting connections
    pub fn is_listening(&self) -> bool {
        self.state == ServerState::Listening
    }

    /// Check that `start` would succeed, without transitioning
    pub fn can_start(&self) -> Result<(), InvalidStateTransition> {
        if self.state != ServerState::NotStarted {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "start".to_string(),
            });
        }
        Ok(())
    }

    /// Transition from NOT STARTED to LISTENING
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(ServerState::NotStarted, ServerState::Listening, "start")
    }

    /// Transition from LISTENING to STOPPING
    pub fn begin_stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(ServerState::Listening, ServerState::Stopping, "stop")
    }

    /// Transition from STOPPING to STOPPED, once all connections are drained
    pub fn finish_stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(ServerState::Stopping, ServerState::Stopped, "finish stopping")
    }

    fn transition(
        &mut self,
        from: ServerState,
        to: ServerState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != from {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lifecycle_is_not_started() {
        let lifecycle = ServerLifecycle::new();
        assert_eq!(lifecycle.state(), ServerState::NotStarted);
        assert!(!lifecycle.is_listening());
        assert_ne!(lifecycle.state(), ServerState::Stopped);
    }

    #[test]
    fn full_cycle() {
        let mut lifecycle = ServerLifecycle::new();
        lifecycle.start().unwrap();
        assert!(lifecycle.is_listening());

        lifecycle.begin_stop().unwrap();
        assert_eq!(lifecycle.state(), ServerState::Stopping);

        lifecycle.finish_stop().unwrap();
        assert_eq!(lifecycle.state(), ServerState::Stopped);
    }

    #[test]
    fn start_twice_fails() {
        let mut lifecycle = ServerLifecycle::new();
        lifecycle.start().unwrap();

        let err = lifecycle.start().unwrap_err();
        assert_eq!(err.current_state, ServerState::Listening);
        assert!(err.action.contains("start"));
    }

    #[test]
    fn can_start_only_once() {
        let mut lifecycle = ServerLifecycle::new();
        assert!(lifecycle.can_start().is_ok());
        assert_eq!(lifecycle.state(), ServerState::NotStarted);

        lifecycle.start().unwrap();
        assert!(lifecycle.can_start().is_err());
    }

    #[test]
    fn stop_before_start_fails() {
        let mut lifecycle = ServerLifecycle::new();

        let err = lifecycle.begin_stop().unwrap_err();
        assert_eq!(err.current_state, ServerState::NotStarted);
    }

    #[test]
    fn no_restart_after_stop() {
        let mut lifecycle = ServerLifecycle::new();
        lifecycle.start().unwrap();
        lifecycle.begin_stop().unwrap();
        lifecycle.finish_stop().unwrap();

        let err = lifecycle.start().unwrap_err();
        assert_eq!(err.current_state, ServerState::Stopped);
    }

    #[test]
    fn finish_without_begin_fails() {
        let mut lifecycle = ServerLifecycle::new();
        lifecycle.start().unwrap();

        assert!(lifecycle.finish_stop().is_err());
        assert!(lifecycle.is_listening());
    }

    #[test]
    fn state_display() {
        assert_eq!(ServerState::NotStarted.to_string(), "not started");
        assert_eq!(ServerState::Listening.to_string(), "listening");
        assert_eq!(ServerState::Stopping.to_string(), "stopping");
        assert_eq!(ServerState::Stopped.to_string(), "stopped");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: ServerState::Stopped,
            action: "start".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("start"));
        assert!(msg.contains("stopped"));
    }
}
