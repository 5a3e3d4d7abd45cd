//! HTTP front end for a single, startup-selected handler function.
//!
//! `POST /` forwards `{"payload": ...}` to the handler resolved from
//! `HANDLER_FUNCTION` and answers `{"result": ...}`. `GET /health` is a
//! liveness probe. This crate contains the configuration, application state,
//! error mapping, schema types, route definitions, and the startup sequence.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod startup;
pub mod state;
