mod member;
mod venue;

pub use member::*;
pub use venue::*;
