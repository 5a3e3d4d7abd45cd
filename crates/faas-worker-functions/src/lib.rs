//! Handler functions bundled with the worker.
//!
//! Each module registers its handlers with `inventory::submit!` under the
//! identifier a deployment puts in `HANDLER_FUNCTION`:
//!
//! - `function.handler.handle` / `function.handler.handle_async`: decode the
//!   payload as JSON, or echo it back as a string.
//! - `decoders.decode_type_a`: `"id,value,timestamp"` device readings.
//! - `decoders.decode_type_a_strict`: same format, failing on bad input.
//! - `decoders.decode_type_b`: reverses the payload.

use faas_worker_core::{HandlerRegistry, RegistryError};

pub mod decoders;
pub mod function;

/// Builds the registry of every handler shipped in this crate (and any other
/// linked crate that submits registrations).
pub fn registry() -> Result<HandlerRegistry, RegistryError> {
    HandlerRegistry::from_inventory()
}
