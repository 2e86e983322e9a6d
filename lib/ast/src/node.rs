use std::{any::Any, fmt::Debug};

use runtime::{Environment, RuntimeResult};
use span_util::Span;

use crate::{Options, Variable};

/// A node of a SassScript expression tree.
///
/// Every variant performs itself against an [`Environment`], prints itself back
/// to source text, copies itself without sharing any child, and exposes its
/// children to generic walkers. Implementers in this crate are [`crate::Literal`],
/// [`crate::Variable`], [`crate::Operation`], [`crate::UnaryOperation`],
/// [`crate::Funcall`] and [`crate::IfFunction`].
///
/// Nodes only read the environment and never keep a reference to it. A node
/// instance is not meant to be performed from two contexts at once; give each
/// context its own [`Node::deep_copy`].
pub trait Node: Debug + Send {
    /// Evaluates the node.
    fn perform(&self, env: &Environment) -> RuntimeResult;

    /// Source text that parses back to an equivalent tree.
    fn to_sass(&self, opts: &Options) -> String;

    /// Returns an independent tree: no child is shared with `self` at any depth.
    fn deep_copy(&self) -> Box<dyn Node>;

    /// Diagnostic representation.
    fn inspect(&self) -> String;

    fn children(&self) -> Vec<&dyn Node>;

    fn span(&self) -> Span;

    fn as_any(&self) -> &dyn Any;
}

/// Visits `node` and all of its descendants, parents first.
pub fn walk<'a>(node: &'a dyn Node, f: &mut impl FnMut(&'a dyn Node)) {
    f(node);
    for child in node.children() {
        walk(child, f);
    }
}

/// Names of the variables referenced anywhere under `node`, in first-use order.
pub fn variables_used(node: &dyn Node) -> Vec<String> {
    let mut names: Vec<String> = vec![];
    walk(node, &mut |n| {
        if let Some(var) = n.as_any().downcast_ref::<Variable>() {
            if !names.contains(&var.name) {
                names.push(var.name.clone());
            }
        }
    });
    names
}
