#![warn(clippy::pedantic)]

pub mod memory;
pub mod rest;
pub mod wire;

pub use memory::MemoryStorage;
pub use rest::{ApiError, RestStorage};
