//! HTTP handler modules for the worker API.
//!
//! Handlers stay thin: they check state, extract the request, and hand the
//! payload to the resolved function. No payload-specific logic lives here.

pub mod health;
pub mod invoke;
