//! Terminal front end for the `bookie` demo binary.
//!
//! Lines like `alice bet 50 @bob` are parsed into a [`Line`], submitted to a
//! [`crate::book::Bookie`], and rendered back through the [`Terminal`] notifier.
mod args;
mod directory;
mod line;
mod terminal;

pub use args::*;
pub use directory::*;
pub use line::*;
pub use terminal::*;
