use std::any::Any;

use indexmap::IndexMap;
use runtime::{Environment, RuntimeResult};
use span_util::Span;

use crate::{bind, ArgumentError, Node, Options, IF_PARAMS};

/// The inline `if($condition, $if_true, $if_false)` function.
///
/// Unlike an ordinary function call only the selected branch is performed, so
/// the other one may reference undefined variables or fail without effect.
#[derive(Debug)]
pub struct IfFunction {
    condition: Box<dyn Node>,
    if_true: Box<dyn Node>,
    if_false: Box<dyn Node>,
    span: Span,
}

impl IfFunction {
    /// Builds the node from a parsed argument list.
    pub fn new(
        args: Vec<Box<dyn Node>>,
        mut keywords: IndexMap<String, Box<dyn Node>>,
        span: Span,
    ) -> Result<IfFunction, ArgumentError> {
        let bound = bind(args, &mut keywords)?;
        let missing = |idx: usize| ArgumentError::MissingArgument(IF_PARAMS[idx].to_string());

        let condition = bound.condition.ok_or_else(|| missing(0))?;
        let if_true = bound.if_true.ok_or_else(|| missing(1))?;
        let if_false = bound.if_false.ok_or_else(|| missing(2))?;

        Ok(IfFunction::from_parts(condition, if_true, if_false, span))
    }

    pub fn from_parts(
        condition: Box<dyn Node>,
        if_true: Box<dyn Node>,
        if_false: Box<dyn Node>,
        span: Span,
    ) -> IfFunction {
        IfFunction {
            condition,
            if_true,
            if_false,
            span,
        }
    }

    pub fn condition(&self) -> &dyn Node {
        self.condition.as_ref()
    }

    pub fn if_true(&self) -> &dyn Node {
        self.if_true.as_ref()
    }

    pub fn if_false(&self) -> &dyn Node {
        self.if_false.as_ref()
    }
}

impl Node for IfFunction {
    fn perform(&self, env: &Environment) -> RuntimeResult {
        let taken = self.condition.perform(env)?.to_bool();
        tracing::trace!(taken, "if() selected branch");

        if taken {
            self.if_true.perform(env)
        } else {
            self.if_false.perform(env)
        }
    }

    fn to_sass(&self, opts: &Options) -> String {
        format!(
            "if({}, {}, {})",
            self.condition.to_sass(opts),
            self.if_true.to_sass(opts),
            self.if_false.to_sass(opts)
        )
    }

    fn deep_copy(&self) -> Box<dyn Node> {
        Box::new(IfFunction::from_parts(
            self.condition.deep_copy(),
            self.if_true.deep_copy(),
            self.if_false.deep_copy(),
            self.span,
        ))
    }

    fn inspect(&self) -> String {
        format!(
            "if({}, {}, {})",
            self.condition.inspect(),
            self.if_true.inspect(),
            self.if_false.inspect()
        )
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![
            self.condition.as_ref(),
            self.if_true.as_ref(),
            self.if_false.as_ref(),
        ]
    }

    fn span(&self) -> Span {
        self.span
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod test {
    use std::{any::Any, cell::RefCell, thread};

    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use runtime::{Environment, RuntimeError, RuntimeResult, Value};
    use span_util::Span;

    use crate::test_utils::*;
    use crate::{ArgumentError, BinaryOperator, IfFunction, Node, Options};

    /// Fails the test if it is ever performed.
    #[derive(Debug)]
    struct Untouchable;

    impl Node for Untouchable {
        fn perform(&self, _env: &Environment) -> RuntimeResult {
            panic!("untaken branch was performed")
        }

        fn to_sass(&self, _opts: &Options) -> String {
            String::from("untouchable")
        }

        fn deep_copy(&self) -> Box<dyn Node> {
            Box::new(Untouchable)
        }

        fn inspect(&self) -> String {
            String::from("untouchable")
        }

        fn children(&self) -> Vec<&dyn Node> {
            vec![]
        }

        fn span(&self) -> Span {
            Span::fake()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Remembers the first value it read from the environment.
    #[derive(Debug)]
    struct Memo {
        name: String,
        cached: RefCell<Option<Value>>,
    }

    impl Memo {
        fn boxed(name: &str) -> Box<dyn Node> {
            Box::new(Memo {
                name: name.to_string(),
                cached: RefCell::new(None),
            })
        }
    }

    impl Node for Memo {
        fn perform(&self, env: &Environment) -> RuntimeResult {
            if let Some(value) = self.cached.borrow().as_ref() {
                return Ok(value.clone());
            }
            let value = env
                .var(&self.name)
                .ok_or_else(|| RuntimeError::UndefinedVariable(self.name.clone(), Span::fake()))?;
            *self.cached.borrow_mut() = Some(value.clone());
            Ok(value)
        }

        fn to_sass(&self, _opts: &Options) -> String {
            format!("${}", self.name)
        }

        fn deep_copy(&self) -> Box<dyn Node> {
            Box::new(Memo {
                name: self.name.clone(),
                cached: RefCell::new(self.cached.borrow().clone()),
            })
        }

        fn inspect(&self) -> String {
            format!("memo(${})", self.name)
        }

        fn children(&self) -> Vec<&dyn Node> {
            vec![]
        }

        fn span(&self) -> Span {
            Span::fake()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn addr(node: &dyn Node) -> *const () {
        node as *const dyn Node as *const ()
    }

    fn new_if(
        args: Vec<Box<dyn Node>>,
        named: IndexMap<String, Box<dyn Node>>,
    ) -> Result<IfFunction, ArgumentError> {
        IfFunction::new(args, named, Span::fake())
    }

    #[test]
    fn children_in_supplied_order() {
        let node = new_if(vec![var("a"), var("b"), var("c")], IndexMap::new()).unwrap();
        let children: Vec<String> = node.children().iter().map(|c| c.inspect()).collect();
        assert_eq!(children, vec!["$a", "$b", "$c"]);
    }

    #[test]
    fn named_if_false() {
        let node = new_if(
            vec![var("a"), var("b")],
            keywords(vec![("if_false", var("c"))]),
        )
        .unwrap();
        assert_eq!(node.condition().inspect(), "$a");
        assert_eq!(node.if_true().inspect(), "$b");
        assert_eq!(node.if_false().inspect(), "$c");
    }

    #[test]
    fn surplus_keyword_is_rejected() {
        let err = new_if(
            vec![var("a"), var("b"), var("c")],
            keywords(vec![("else", var("d"))]),
        )
        .unwrap_err();
        assert_eq!(err, ArgumentError::InvalidArgument("else".into()));
    }

    #[test]
    fn missing_role_is_rejected() {
        let err = new_if(vec![var("a"), var("b")], IndexMap::new()).unwrap_err();
        assert_eq!(err, ArgumentError::MissingArgument("if_false".into()));
        assert_eq!(err.to_string(), "Missing argument $if_false.");

        let err = new_if(vec![], keywords(vec![("if_true", var("b"))])).unwrap_err();
        assert_eq!(err, ArgumentError::MissingArgument("condition".into()));
    }

    #[test]
    fn falsy_condition_skips_if_true() {
        let env = Environment::new();
        for condition in [bool_lit(false), null()] {
            let node = new_if(
                vec![condition, Box::new(Untouchable), px(2.0)],
                IndexMap::new(),
            )
            .unwrap();
            assert_eq!(node.perform(&env), Ok(Value::number_with_unit(2.0, "px")));
        }
    }

    #[test]
    fn truthy_condition_skips_if_false() {
        let env = Environment::new();
        for condition in [bool_lit(true), number(0.0), string_lit("")] {
            let node = new_if(
                vec![condition, string_lit("yes"), Box::new(Untouchable)],
                IndexMap::new(),
            )
            .unwrap();
            assert_eq!(node.perform(&env), Ok(Value::quoted("yes")));
        }
    }

    #[test]
    fn untaken_branch_may_reference_undefined_names() {
        let mut env = Environment::new();
        env.define("enabled", Value::Bool(true));
        let node = if_fn(var("enabled"), number(1.0), var("does-not-exist"));
        assert_eq!(node.perform(&env), Ok(Value::number(1.0)));
    }

    #[test]
    fn errors_from_taken_branch_propagate_unchanged() {
        let env = Environment::new();
        let node = if_fn(bool_lit(true), var("nope"), number(1.0));
        assert_eq!(
            node.perform(&env),
            Err(RuntimeError::UndefinedVariable("nope".into(), Span::fake()))
        );

        let node = if_fn(var("cond"), number(1.0), number(2.0));
        assert_eq!(
            node.perform(&env),
            Err(RuntimeError::UndefinedVariable("cond".into(), Span::fake()))
        );
    }

    #[test]
    fn to_sass_literals() {
        let node = if_fn(bool_lit(true), number(1.0), number(2.0));
        assert_eq!(node.to_sass(&Options::default()), "if(true, 1, 2)");
    }

    #[test]
    fn to_sass_threads_options_to_children() {
        let node = if_fn(
            op(var("a"), BinaryOperator::GreaterThan, number(0.5)),
            unit_number(0.25, "em"),
            string_lit("none"),
        );
        assert_eq!(
            node.to_sass(&Options::default()),
            "if($a > 0.5, 0.25em, \"none\")"
        );
        assert_eq!(
            node.to_sass(&Options::compressed()),
            "if($a > .5, .25em, \"none\")"
        );
    }

    #[test]
    fn inspect_mirrors_serialization() {
        let node = if_fn(
            op(var("a"), BinaryOperator::Plus, number(1.0)),
            string_lit("x"),
            null(),
        );
        assert_eq!(node.inspect(), "if((plus $a 1), \"x\", null)");
    }

    #[test]
    fn deep_copy_shares_no_children() {
        let original = new_if(
            vec![
                op(var("a"), BinaryOperator::Equal, number(1.0)),
                funcall("abs", vec![var("b")]),
                if_fn(var("c"), number(1.0), number(2.0)),
            ],
            IndexMap::new(),
        )
        .unwrap();
        let copy = original.deep_copy();

        let mut originals = vec![];
        crate::walk(&original, &mut |n| originals.push(addr(n)));
        let mut copies = vec![];
        crate::walk(copy.as_ref(), &mut |n| copies.push(addr(n)));

        assert_eq!(originals.len(), copies.len());
        for ptr in &copies {
            assert!(!originals.contains(ptr));
        }

        let opts = Options::default();
        assert_eq!(copy.to_sass(&opts), original.to_sass(&opts));
        assert_eq!(copy.inspect(), original.inspect());
    }

    #[test]
    fn deep_copies_do_not_share_node_state() {
        let original = if_fn(bool_lit(true), Memo::boxed("x"), number(0.0));
        let copy = original.deep_copy();

        let mut env_a = Environment::new();
        env_a.define("x", Value::number(1.0));
        let mut env_b = Environment::new();
        env_b.define("x", Value::number(2.0));

        assert_eq!(original.perform(&env_a), Ok(Value::number(1.0)));
        assert_eq!(copy.perform(&env_b), Ok(Value::number(2.0)));
        // the original keeps its own cached state
        assert_eq!(original.perform(&env_b), Ok(Value::number(1.0)));
    }

    #[test]
    fn concurrent_evaluation_of_original_and_copies() {
        fn evaluate(node: Box<dyn Node>, i: usize) -> (Box<dyn Node>, Vec<RuntimeResult>) {
            let mut env = Environment::new();
            env.define("flag", Value::Bool(i % 2 == 0));
            env.define("x", Value::number(i as f64));
            env.define("y", Value::number(-(i as f64)));
            let results = (0..50).map(|_| node.perform(&env)).collect();
            (node, results)
        }

        fn expected(i: usize) -> Value {
            if i % 2 == 0 {
                Value::number(i as f64)
            } else {
                Value::number(-(i as f64))
            }
        }

        let original = if_fn(var("flag"), Memo::boxed("x"), var("y"));
        let copies: Vec<Box<dyn Node>> = (1..4).map(|_| original.deep_copy()).collect();

        // the original runs as thread 0, next to its copies
        let handles: Vec<_> = std::iter::once(original)
            .chain(copies)
            .enumerate()
            .map(|(i, node)| thread::spawn(move || evaluate(node, i)))
            .collect();

        let mut nodes = vec![];
        for (i, handle) in handles.into_iter().enumerate() {
            let (node, results) = handle.join().expect("evaluation thread panicked");
            assert_eq!(results.len(), 50);
            assert!(results.iter().all(|r| *r == Ok(expected(i))));
            nodes.push(node);
        }

        // the original kept the value it cached on its own thread
        let mut env = Environment::new();
        env.define("flag", Value::Bool(true));
        env.define("x", Value::number(42.0));
        env.define("y", Value::number(0.0));
        assert_eq!(nodes[0].perform(&env), Ok(Value::number(0.0)));
        assert_eq!(nodes[2].perform(&env), Ok(Value::number(2.0)));
    }
}
