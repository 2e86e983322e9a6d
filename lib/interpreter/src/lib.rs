mod interpreter;

pub use crate::interpreter::*;
