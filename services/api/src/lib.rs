//! Sozo API Library Crate
//!
//! This library contains the web-facing half of the lesson runner: the
//! configuration, the shared application state, the session store, the API
//! handlers and routing. The `api` binary is a thin wrapper around it.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod session;
pub mod state;
