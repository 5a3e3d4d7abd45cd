//! Device payload decoders.
//!
//! Type A devices send `"id,value,timestamp"`; type B devices send free text
//! that is returned reversed.

use faas_worker_core::{sync_handler, HandlerError, HandlerRegistration, SharedHandler};
use serde::Serialize;

const TYPE_A: &str = "decoder_type_a";
const TYPE_B: &str = "decoder_type_b";
const TYPE_A_FORMAT_ERROR: &str = "Invalid data format. Expected 'id,value,timestamp'.";

/// A decoded type A reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAReading {
    pub handler: &'static str,
    pub device_id: String,
    pub metric_value: f64,
    pub timestamp: i64,
    pub status: &'static str,
}

/// Type A payload that could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAFailure {
    pub handler: &'static str,
    pub error: &'static str,
    pub original_data: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeAOutcome {
    Decoded(TypeAReading),
    Failed(TypeAFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeBReading {
    pub handler: &'static str,
    pub reversed_data: String,
    pub status: &'static str,
}

/// Parses `"id,value,timestamp"`. Fields past the third are ignored.
///
/// The metric must be finite: `nan` and `inf` have no JSON representation.
fn parse_type_a(payload: &str) -> Option<TypeAReading> {
    let mut parts = payload.split(',');
    let device_id = parts.next()?.to_string();
    let metric_value = parts
        .next()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())?;
    let timestamp = parts.next()?.trim().parse::<i64>().ok()?;
    Some(TypeAReading {
        handler: TYPE_A,
        device_id,
        metric_value,
        timestamp,
        status: "decoded_successfully",
    })
}

/// Decodes a type A payload. Malformed input is reported in the result
/// rather than as an error.
pub fn decode_type_a(payload: &str) -> Result<TypeAOutcome, HandlerError> {
    tracing::debug!(payload, "decoder type A received payload");
    Ok(match parse_type_a(payload) {
        Some(reading) => TypeAOutcome::Decoded(reading),
        None => TypeAOutcome::Failed(TypeAFailure {
            handler: TYPE_A,
            error: TYPE_A_FORMAT_ERROR,
            original_data: payload.to_string(),
            status: "decoding_failed",
        }),
    })
}

/// Decodes a type A payload, failing the invocation on malformed input.
pub fn decode_type_a_strict(payload: &str) -> Result<TypeAReading, HandlerError> {
    parse_type_a(payload).ok_or_else(|| HandlerError::msg(TYPE_A_FORMAT_ERROR))
}

/// Reverses the payload, character by character.
pub fn decode_type_b(payload: &str) -> Result<TypeBReading, HandlerError> {
    tracing::debug!(payload, "decoder type B received payload");
    Ok(TypeBReading {
        handler: TYPE_B,
        reversed_data: payload.chars().rev().collect(),
        status: "decoded_successfully",
    })
}

fn register_type_a() -> SharedHandler {
    sync_handler(decode_type_a)
}

fn register_type_a_strict() -> SharedHandler {
    sync_handler(decode_type_a_strict)
}

fn register_type_b() -> SharedHandler {
    sync_handler(decode_type_b)
}

inventory::submit! {
    HandlerRegistration::new("decoders.decode_type_a", register_type_a)
}

inventory::submit! {
    HandlerRegistration::new("decoders.decode_type_a_strict", register_type_a_strict)
}

inventory::submit! {
    HandlerRegistration::new("decoders.decode_type_b", register_type_b)
}
