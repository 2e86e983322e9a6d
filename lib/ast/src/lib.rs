mod argument_error;
mod arguments;
mod funcall;
mod if_function;
mod literal;
mod node;
mod operation;
mod options;
mod statement;
mod unary_operation;
mod variable;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use argument_error::*;
pub use arguments::*;
pub use funcall::*;
pub use if_function::*;
pub use literal::*;
pub use node::*;
pub use operation::*;
pub use options::*;
pub use statement::*;
pub use unary_operation::*;
pub use variable::*;
