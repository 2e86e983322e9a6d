use indexmap::IndexMap;
use runtime::Value;
use span_util::Span;

use crate::{
    BinaryOperator, Funcall, IfFunction, Literal, Node, Operation, Statement, UnaryOperation,
    UnaryOperator, Variable,
};

pub fn literal(value: Value) -> Box<dyn Node> {
    Box::new(Literal::new(value, Span::fake()))
}

pub fn number(val: f64) -> Box<dyn Node> {
    literal(Value::number(val))
}

pub fn unit_number(val: f64, unit: &str) -> Box<dyn Node> {
    literal(Value::number_with_unit(val, unit))
}

pub fn px(val: f64) -> Box<dyn Node> {
    unit_number(val, "px")
}

pub fn string_lit(val: &str) -> Box<dyn Node> {
    literal(Value::quoted(val))
}

pub fn unquoted(val: &str) -> Box<dyn Node> {
    literal(Value::unquoted(val))
}

pub fn bool_lit(val: bool) -> Box<dyn Node> {
    literal(Value::Bool(val))
}

pub fn null() -> Box<dyn Node> {
    literal(Value::Null)
}

pub fn var(name: &str) -> Box<dyn Node> {
    Box::new(Variable::new(name, Span::fake()))
}

pub fn op(left: Box<dyn Node>, operator: BinaryOperator, right: Box<dyn Node>) -> Box<dyn Node> {
    Box::new(Operation::new(left, operator, right, Span::fake()))
}

pub fn unary(operator: UnaryOperator, operand: Box<dyn Node>) -> Box<dyn Node> {
    Box::new(UnaryOperation::new(operator, operand, Span::fake()))
}

pub fn funcall(name: &str, args: Vec<Box<dyn Node>>) -> Box<dyn Node> {
    Box::new(Funcall::new(name, args, IndexMap::new(), Span::fake()))
}

pub fn if_fn(
    condition: Box<dyn Node>,
    if_true: Box<dyn Node>,
    if_false: Box<dyn Node>,
) -> Box<dyn Node> {
    Box::new(IfFunction::from_parts(condition, if_true, if_false, Span::fake()))
}

pub fn keywords(entries: Vec<(&str, Box<dyn Node>)>) -> IndexMap<String, Box<dyn Node>> {
    entries
        .into_iter()
        .map(|(name, node)| (name.to_string(), node))
        .collect()
}

pub fn create_var_decl(name: &str, expr: Box<dyn Node>) -> Statement {
    Statement::create_var_decl(name, expr, false, Span::fake())
}

pub fn create_debug(expr: Box<dyn Node>) -> Statement {
    Statement::create_debug(expr, Span::fake())
}
