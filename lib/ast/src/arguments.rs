use indexmap::IndexMap;

use crate::{ArgumentError, Node};

/// Roles of `if()` resolved from a call's argument list.
///
/// A role is `None` when neither a positional nor a named argument filled it.
#[derive(Debug, Default)]
pub struct BoundArguments {
    pub condition: Option<Box<dyn Node>>,
    pub if_true: Option<Box<dyn Node>>,
    pub if_false: Option<Box<dyn Node>>,
}

pub const IF_PARAMS: [&str; 3] = ["condition", "if_true", "if_false"];

/// Resolves `if()` arguments onto its three roles.
///
/// Each role takes the positional argument in its slot when there is one and
/// otherwise consumes the matching entry from `named`. Entries left in `named`
/// afterwards are an error naming the first one in insertion order.
pub fn bind(
    positional: Vec<Box<dyn Node>>,
    named: &mut IndexMap<String, Box<dyn Node>>,
) -> Result<BoundArguments, ArgumentError> {
    if positional.len() > IF_PARAMS.len() {
        return Err(ArgumentError::TooManyArguments(positional.len()));
    }

    let mut positional = positional.into_iter();
    let mut slot = |name: &str| match positional.next() {
        Some(node) => Some(node),
        None => named.shift_remove(name),
    };

    let bound = BoundArguments {
        condition: slot(IF_PARAMS[0]),
        if_true: slot(IF_PARAMS[1]),
        if_false: slot(IF_PARAMS[2]),
    };

    if let Some(surplus) = named.keys().next() {
        return Err(ArgumentError::InvalidArgument(surplus.clone()));
    }

    Ok(bound)
}
