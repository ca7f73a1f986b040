//! pbserver - share the system clipboard over HTTP
//!
//! `GET /pb` returns the clipboard, `PUT /pb` or `POST /pb` replaces it.
//! Clipboard access goes through the platform's copy/paste programs.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, server lifecycle, and errors
//! - **Application**: Port interfaces (traits) for the clipboard and config store
//! - **Infrastructure**: Adapter implementations (clipboard programs, XDG config file)
//! - **HTTP**: Router and listener with graceful shutdown
//! - **CLI**: Argument parsing, logging, signal handling, and the server runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod http;
pub mod infrastructure;
