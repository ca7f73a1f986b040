//! Server lifecycle domain

mod lifecycle;

pub use lifecycle::{InvalidStateTransition, ServerLifecycle, ServerState};
