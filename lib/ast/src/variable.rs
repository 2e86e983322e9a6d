use std::any::Any;

use runtime::{Environment, RuntimeError, RuntimeResult};
use span_util::Span;

use crate::{Node, Options};

/// A `$name` reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub span: Span,
}

impl Variable {
    pub fn new(name: impl Into<String>, span: Span) -> Variable {
        Variable {
            name: name.into(),
            span,
        }
    }
}

impl Node for Variable {
    fn perform(&self, env: &Environment) -> RuntimeResult {
        env.var(&self.name)
            .ok_or_else(|| RuntimeError::UndefinedVariable(self.name.clone(), self.span))
    }

    fn to_sass(&self, _opts: &Options) -> String {
        format!("${}", self.name)
    }

    fn deep_copy(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn inspect(&self) -> String {
        format!("${}", self.name)
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![]
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
    use pretty_assertions::assert_eq;
    use runtime::{Environment, RuntimeError, Value};

    use crate::test_utils::var;
    use crate::Node;

    #[test]
    fn perform_looks_up_normalized_name() {
        let mut env = Environment::new();
        env.define("base_size", Value::number_with_unit(16.0, "px"));

        assert_eq!(
            var("base-size").perform(&env),
            Ok(Value::number_with_unit(16.0, "px"))
        );
    }

    #[test]
    fn perform_undefined_variable() {
        let env = Environment::new();
        assert_eq!(
            var("missing").perform(&env),
            Err(RuntimeError::UndefinedVariable(
                "missing".into(),
                span_util::Span::fake()
            ))
        );
    }
}
