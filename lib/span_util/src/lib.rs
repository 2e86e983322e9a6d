mod span;

pub use span::*;
