//! # Fleet Core
//!
//! Error type and provider interfaces shared by the fleet map crates.

mod error;
mod provider;

pub use crate::error::*;
pub use crate::provider::*;
