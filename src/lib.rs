// src/lib.rs

//! Turn vendor comparison tables into one normalized, priced record set.

pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod price;
pub mod record;
pub mod table;
pub mod write;

pub use error::{Error, Result};
