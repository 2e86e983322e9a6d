mod environment;
mod natives;
mod runtime_error;
mod value;

pub use environment::*;
pub use natives::*;
pub use runtime_error::*;
pub use value::*;
