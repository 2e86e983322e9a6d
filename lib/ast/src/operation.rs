use std::any::Any;

use runtime::{Environment, RuntimeResult};
use span_util::Span;

use crate::{Node, Options};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Plus,
    Minus,
    Times,
    Div,
    Mod,
}

impl BinaryOperator {
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Or => 0,
            BinaryOperator::And => 1,
            BinaryOperator::Equal | BinaryOperator::NotEqual => 2,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanEqual => 3,
            BinaryOperator::Plus | BinaryOperator::Minus => 4,
            BinaryOperator::Times | BinaryOperator::Div | BinaryOperator::Mod => 5,
        }
    }

    /// `(a + b) + c` prints the same as `a + (b + c)`.
    pub fn is_associative(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Plus | BinaryOperator::Times | BinaryOperator::And | BinaryOperator::Or
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "or",
            BinaryOperator::And => "and",
            BinaryOperator::Equal => "eq",
            BinaryOperator::NotEqual => "neq",
            BinaryOperator::LessThan => "lt",
            BinaryOperator::LessThanEqual => "lte",
            BinaryOperator::GreaterThan => "gt",
            BinaryOperator::GreaterThanEqual => "gte",
            BinaryOperator::Plus => "plus",
            BinaryOperator::Minus => "minus",
            BinaryOperator::Times => "times",
            BinaryOperator::Div => "div",
            BinaryOperator::Mod => "mod",
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Or => write!(f, "or"),
            BinaryOperator::And => write!(f, "and"),
            BinaryOperator::Equal => write!(f, "=="),
            BinaryOperator::NotEqual => write!(f, "!="),
            BinaryOperator::LessThan => write!(f, "<"),
            BinaryOperator::LessThanEqual => write!(f, "<="),
            BinaryOperator::GreaterThan => write!(f, ">"),
            BinaryOperator::GreaterThanEqual => write!(f, ">="),
            BinaryOperator::Plus => write!(f, "+"),
            BinaryOperator::Minus => write!(f, "-"),
            BinaryOperator::Times => write!(f, "*"),
            BinaryOperator::Div => write!(f, "/"),
            BinaryOperator::Mod => write!(f, "%"),
        }
    }
}

#[derive(Debug)]
pub struct Operation {
    pub operand1: Box<dyn Node>,
    pub operator: BinaryOperator,
    pub operand2: Box<dyn Node>,
    pub span: Span,
}

impl Operation {
    pub fn new(
        operand1: Box<dyn Node>,
        operator: BinaryOperator,
        operand2: Box<dyn Node>,
        span: Span,
    ) -> Operation {
        Operation {
            operand1,
            operator,
            operand2,
            span,
        }
    }

    fn operand_to_sass(&self, operand: &dyn Node, opts: &Options, right: bool) -> String {
        let text = operand.to_sass(opts);
        let child = match operand.as_any().downcast_ref::<Operation>() {
            Some(child) => child.operator,
            None => return text,
        };

        // `a * (b % c)` keeps its parentheses, `a + (b + c)` doesn't need them
        let needs_parens = child.precedence() < self.operator.precedence()
            || (right
                && child.precedence() == self.operator.precedence()
                && !(child == self.operator && self.operator.is_associative()));

        if needs_parens {
            format!("({})", text)
        } else {
            text
        }
    }
}

impl Node for Operation {
    fn perform(&self, env: &Environment) -> RuntimeResult {
        let value1 = self.operand1.perform(env)?;
        match self.operator {
            BinaryOperator::And if !value1.to_bool() => return Ok(value1),
            BinaryOperator::Or if value1.to_bool() => return Ok(value1),
            _ => {}
        }

        let value2 = self.operand2.perform(env)?;
        let res = match self.operator {
            BinaryOperator::And | BinaryOperator::Or => Ok(value2),
            BinaryOperator::Equal => value1.equals(&value2),
            BinaryOperator::NotEqual => value1.not_equals(&value2),
            BinaryOperator::LessThan => value1.lt(&value2),
            BinaryOperator::LessThanEqual => value1.lte(&value2),
            BinaryOperator::GreaterThan => value1.gt(&value2),
            BinaryOperator::GreaterThanEqual => value1.gte(&value2),
            BinaryOperator::Plus => value1.plus(&value2),
            BinaryOperator::Minus => value1.minus(&value2),
            BinaryOperator::Times => value1.times(&value2),
            BinaryOperator::Div => value1.div(&value2),
            BinaryOperator::Mod => value1.modulo(&value2),
        };

        res.map_err(|e| e.at(self.span))
    }

    fn to_sass(&self, opts: &Options) -> String {
        format!(
            "{} {} {}",
            self.operand_to_sass(self.operand1.as_ref(), opts, false),
            self.operator,
            self.operand_to_sass(self.operand2.as_ref(), opts, true)
        )
    }

    fn deep_copy(&self) -> Box<dyn Node> {
        Box::new(Operation::new(
            self.operand1.deep_copy(),
            self.operator,
            self.operand2.deep_copy(),
            self.span,
        ))
    }

    fn inspect(&self) -> String {
        format!(
            "({} {} {})",
            self.operator.name(),
            self.operand1.inspect(),
            self.operand2.inspect()
        )
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.operand1.as_ref(), self.operand2.as_ref()]
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
    use runtime::{Environment, Value};

    use crate::test_utils::*;
    use crate::{BinaryOperator, Node, Options};

    #[test]
    fn perform_arithmetic() {
        let env = Environment::new();
        let expr = op(px(10.0), BinaryOperator::Plus, number(5.0));
        assert_eq!(expr.perform(&env), Ok(Value::number_with_unit(15.0, "px")));

        let expr = op(number(7.0), BinaryOperator::Mod, number(2.0));
        assert_eq!(expr.perform(&env), Ok(Value::number(1.0)));
    }

    #[test]
    fn and_or_short_circuit() {
        let env = Environment::new();

        let expr = op(bool_lit(false), BinaryOperator::And, var("undefined"));
        assert_eq!(expr.perform(&env), Ok(Value::Bool(false)));

        let expr = op(number(1.0), BinaryOperator::Or, var("undefined"));
        assert_eq!(expr.perform(&env), Ok(Value::number(1.0)));

        let expr = op(null(), BinaryOperator::Or, string_lit("fallback"));
        assert_eq!(expr.perform(&env), Ok(Value::quoted("fallback")));
    }

    #[test]
    fn perform_errors_carry_operation_span() {
        let env = Environment::new();
        let expr = op(number(1.0), BinaryOperator::LessThan, bool_lit(true));
        let err = expr.perform(&env).map_err(|e| e.to_string());
        assert_eq!(err, Err(String::from("Undefined operation: \"1 < true\".")));
    }

    #[test]
    fn to_sass_parenthesizes_by_precedence() {
        let opts = Options::default();

        let expr = op(
            op(number(1.0), BinaryOperator::Plus, number(2.0)),
            BinaryOperator::Times,
            number(3.0),
        );
        assert_eq!(expr.to_sass(&opts), "(1 + 2) * 3");

        let expr = op(
            number(1.0),
            BinaryOperator::Minus,
            op(number(2.0), BinaryOperator::Minus, number(3.0)),
        );
        assert_eq!(expr.to_sass(&opts), "1 - (2 - 3)");

        let expr = op(
            op(number(1.0), BinaryOperator::Minus, number(2.0)),
            BinaryOperator::Minus,
            number(3.0),
        );
        assert_eq!(expr.to_sass(&opts), "1 - 2 - 3");

        let expr = op(
            number(2.0),
            BinaryOperator::Times,
            op(number(5.0), BinaryOperator::Mod, number(3.0)),
        );
        assert_eq!(expr.to_sass(&opts), "2 * (5 % 3)");

        let expr = op(
            var("a"),
            BinaryOperator::Times,
            op(var("b"), BinaryOperator::Div, var("c")),
        );
        assert_eq!(expr.to_sass(&opts), "$a * ($b / $c)");

        let expr = op(
            number(1.0),
            BinaryOperator::Plus,
            op(number(2.0), BinaryOperator::Plus, number(3.0)),
        );
        assert_eq!(expr.to_sass(&opts), "1 + 2 + 3");
    }

    #[test]
    fn inspect() {
        let expr = op(var("a"), BinaryOperator::Equal, string_lit("b"));
        assert_eq!(expr.inspect(), "(eq $a \"b\")");
    }
}
