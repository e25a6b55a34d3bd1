//! Durable records of won sessions. Cancelled sessions leave no record.
mod archive;
mod memory;
mod outcome;
#[cfg(feature = "database")]
mod postgres;

pub use archive::*;
pub use memory::*;
pub use outcome::*;
