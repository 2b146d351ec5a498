//! cobi - Corner-based interpolated image codec
//!
//! PNG input/output, the `.cobi` container and the compress/decompress
//! pipeline around the `cobi-codec` core.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
