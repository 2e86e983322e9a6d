use std::any::Any;

use indexmap::IndexMap;
use runtime::{Environment, RuntimeError, RuntimeResult, Value, DEFAULT_PRECISION};
use span_util::Span;

use crate::{Node, Options};

/// A call to a builtin, or to a function the language doesn't know about,
/// which is passed through as plain CSS.
#[derive(Debug)]
pub struct Funcall {
    pub name: String,
    pub args: Vec<Box<dyn Node>>,
    pub keywords: IndexMap<String, Box<dyn Node>>,
    pub span: Span,
}

impl Funcall {
    pub fn new(
        name: impl Into<String>,
        args: Vec<Box<dyn Node>>,
        keywords: IndexMap<String, Box<dyn Node>>,
        span: Span,
    ) -> Funcall {
        Funcall {
            name: name.into(),
            args,
            keywords,
            span,
        }
    }

    fn format_args(&self, f: impl Fn(&dyn Node) -> String) -> String {
        let mut out: Vec<String> = self.args.iter().map(|a| f(a.as_ref())).collect();
        for (name, value) in &self.keywords {
            out.push(format!("${}: {}", name, f(value.as_ref())));
        }
        format!("{}({})", self.name, out.join(", "))
    }
}

impl Node for Funcall {
    fn perform(&self, env: &Environment) -> RuntimeResult {
        let args = self
            .args
            .iter()
            .map(|a| a.perform(env))
            .collect::<Result<Vec<Value>, RuntimeError>>()?;

        let mut keywords = IndexMap::new();
        for (name, value) in &self.keywords {
            keywords.insert(name.clone(), value.perform(env)?);
        }

        match env.function(&self.name) {
            Some(builtin) => builtin.call(args, keywords, self.span),
            None => {
                if !keywords.is_empty() {
                    return Err(RuntimeError::PlainFunctionKeywords(
                        self.name.clone(),
                        self.span,
                    ));
                }
                let args: Vec<String> = args.iter().map(|a| a.to_css(DEFAULT_PRECISION)).collect();
                Ok(Value::unquoted(format!("{}({})", self.name, args.join(", "))))
            }
        }
    }

    fn to_sass(&self, opts: &Options) -> String {
        self.format_args(|n| n.to_sass(opts))
    }

    fn deep_copy(&self) -> Box<dyn Node> {
        let args = self.args.iter().map(|a| a.deep_copy()).collect();
        let keywords = self
            .keywords
            .iter()
            .map(|(name, value)| (name.clone(), value.deep_copy()))
            .collect();
        Box::new(Funcall::new(self.name.clone(), args, keywords, self.span))
    }

    fn inspect(&self) -> String {
        self.format_args(|n| n.inspect())
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.args
            .iter()
            .map(|a| a.as_ref())
            .chain(self.keywords.values().map(|v| v.as_ref()))
            .collect()
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
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use runtime::{Environment, RuntimeError, Value};
    use span_util::Span;

    use crate::test_utils::*;
    use crate::{BinaryOperator, Funcall, Node, Options};

    #[test]
    fn perform_builtin() {
        let env = Environment::global();
        assert_eq!(
            funcall("abs", vec![px(-3.0)]).perform(&env),
            Ok(Value::number_with_unit(3.0, "px"))
        );
        assert_eq!(
            funcall("type_of", vec![string_lit("a")]).perform(&env),
            Ok(Value::unquoted("string"))
        );
    }

    #[test]
    fn perform_builtin_with_keywords() {
        let env = Environment::global();
        let mut keywords = IndexMap::new();
        keywords.insert(String::from("number"), number(0.5));
        let call = Funcall::new("percentage", vec![], keywords, Span::fake());
        assert_eq!(call.perform(&env), Ok(Value::number_with_unit(50.0, "%")));
    }

    #[test]
    fn unknown_keyword_message() {
        let env = Environment::global();
        let mut keywords = IndexMap::new();
        keywords.insert(String::from("else"), number(1.0));
        let call = Funcall::new("abs", vec![number(1.0)], keywords, Span::fake());
        assert_eq!(
            call.perform(&env).map_err(|e| e.to_string()),
            Err(String::from("Function abs doesn't have an argument named $else."))
        );
    }

    #[test]
    fn plain_css_function() {
        let env = Environment::global();
        let call = funcall(
            "translate",
            vec![px(1.0), op(px(1.0), BinaryOperator::Plus, px(2.0))],
        );
        assert_eq!(call.perform(&env), Ok(Value::unquoted("translate(1px, 3px)")));

        let mut keywords = IndexMap::new();
        keywords.insert(String::from("x"), number(1.0));
        let call = Funcall::new("translate", vec![], keywords, Span::fake());
        assert!(matches!(
            call.perform(&env),
            Err(RuntimeError::PlainFunctionKeywords(..))
        ));
    }

    #[test]
    fn to_sass_and_inspect() {
        let mut keywords = IndexMap::new();
        keywords.insert(String::from("b"), var("y"));
        let call = Funcall::new("max", vec![var("x")], keywords, Span::fake());
        assert_eq!(call.to_sass(&Options::default()), "max($x, $b: $y)");
        assert_eq!(call.inspect(), "max($x, $b: $y)");
    }

    #[test]
    fn children_are_args_then_keywords() {
        let mut keywords = IndexMap::new();
        keywords.insert(String::from("b"), var("y"));
        let call = Funcall::new("max", vec![var("x")], keywords, Span::fake());
        let children: Vec<String> = call.children().iter().map(|c| c.inspect()).collect();
        assert_eq!(children, vec!["$x", "$y"]);
    }
}
