//! The `function` namespace, home of the default handler.

pub mod handler;
