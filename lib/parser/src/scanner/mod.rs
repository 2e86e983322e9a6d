#[allow(clippy::module_inception)]
mod scanner;
mod token;
mod token_type;

pub use self::scanner::*;
pub use token::*;
pub use token_type::*;
