//! Conversions to and from other JSON representations.
#[cfg(feature = "serde_json")]
mod serde_json;
