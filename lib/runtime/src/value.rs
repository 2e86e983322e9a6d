use span_util::Span;

use crate::RuntimeError;

/// Number of decimal digits kept when a number is printed.
pub const DEFAULT_PRECISION: usize = 5;

type OperationResult = Result<Value, RuntimeError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    String(SassString),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SassString {
    pub value: String,
    pub quoted: bool,
}

pub fn format_float(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return String::from(text);
    }

    let rounded = format!("{:.*}", precision, value);
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };

    match trimmed {
        "-0" => String::from("0"),
        s => s.to_string(),
    }
}

impl Number {
    pub fn new(value: f64, unit: Option<String>) -> Number {
        Number { value, unit }
    }

    pub fn unitless(value: f64) -> Number {
        Number { value, unit: None }
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_none()
    }

    pub fn unit_str(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }

    pub fn format(&self, precision: usize) -> String {
        format!("{}{}", format_float(self.value, precision), self.unit_str())
    }

    /// Unit shared by both operands of an additive or comparison operation.
    fn common_unit(&self, other: &Number) -> Result<Option<String>, RuntimeError> {
        match (&self.unit, &other.unit) {
            (None, None) => Ok(None),
            (Some(u), None) | (None, Some(u)) => Ok(Some(u.clone())),
            (Some(a), Some(b)) if a == b => Ok(Some(a.clone())),
            (Some(a), Some(b)) => Err(RuntimeError::IncompatibleUnits(
                a.clone(),
                b.clone(),
                Span::fake(),
            )),
        }
    }

    fn sass_eq(&self, other: &Number) -> bool {
        self.unit == other.unit && self.value == other.value
    }
}

impl SassString {
    pub fn quoted(value: impl Into<String>) -> SassString {
        SassString {
            value: value.into(),
            quoted: true,
        }
    }

    pub fn unquoted(value: impl Into<String>) -> SassString {
        SassString {
            value: value.into(),
            quoted: false,
        }
    }

    pub fn inspect(&self) -> String {
        if !self.quoted {
            return self.value.clone();
        }

        let value = self.value.replace('\\', "\\\\");
        if value.contains('"') && !value.contains('\'') {
            format!("'{}'", value)
        } else {
            format!("\"{}\"", value.replace('"', "\\\""))
        }
    }
}

impl Value {
    pub fn number(value: f64) -> Value {
        Value::Number(Number::unitless(value))
    }

    pub fn number_with_unit(value: f64, unit: impl Into<String>) -> Value {
        Value::Number(Number::new(value, Some(unit.into())))
    }

    pub fn quoted(value: impl Into<String>) -> Value {
        Value::String(SassString::quoted(value))
    }

    pub fn unquoted(value: impl Into<String>) -> Value {
        Value::String(SassString::unquoted(value))
    }

    /// Only `false` and `null` are falsy.
    pub fn to_bool(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Null)
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "null",
        }
    }

    pub fn inspect(&self, precision: usize) -> String {
        match self {
            Value::Number(n) => n.format(precision),
            Value::String(s) => s.inspect(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::from("null"),
        }
    }

    pub fn to_css(&self, precision: usize) -> String {
        match self {
            Value::Null => String::new(),
            _ => self.inspect(precision),
        }
    }

    /// Text used when the value is spliced into a string.
    pub fn unquoted_text(&self) -> String {
        match self {
            Value::String(s) => s.value.clone(),
            _ => self.to_css(DEFAULT_PRECISION),
        }
    }

    fn undefined(&self, op: &str, other: &Value) -> RuntimeError {
        RuntimeError::UndefinedOperation(
            format!("{} {} {}", self, op, other),
            Span::fake(),
        )
    }

    fn join(&self, sep: &str, other: &Value) -> Value {
        Value::unquoted(format!(
            "{}{}{}",
            self.unquoted_text(),
            sep,
            other.unquoted_text()
        ))
    }

    pub fn plus(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                let unit = a.common_unit(b)?;
                Ok(Value::Number(Number::new(a.value + b.value, unit)))
            }
            (Value::String(s), _) => Ok(Value::String(SassString {
                value: format!("{}{}", s.value, other.unquoted_text()),
                quoted: s.quoted,
            })),
            (_, Value::String(s)) => Ok(Value::String(SassString {
                value: format!("{}{}", self.unquoted_text(), s.value),
                quoted: s.quoted,
            })),
            _ => Err(self.undefined("+", other)),
        }
    }

    pub fn minus(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                let unit = a.common_unit(b)?;
                Ok(Value::Number(Number::new(a.value - b.value, unit)))
            }
            (Value::String(_), _) | (_, Value::String(_)) => Ok(self.join("-", other)),
            _ => Err(self.undefined("-", other)),
        }
    }

    pub fn times(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                let unit = match (&a.unit, &b.unit) {
                    (Some(_), Some(_)) => return Err(self.undefined("*", other)),
                    (Some(u), None) | (None, Some(u)) => Some(u.clone()),
                    (None, None) => None,
                };
                Ok(Value::Number(Number::new(a.value * b.value, unit)))
            }
            _ => Err(self.undefined("*", other)),
        }
    }

    pub fn div(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                let unit = match (&a.unit, &b.unit) {
                    (Some(x), Some(y)) if x == y => None,
                    (Some(x), Some(y)) => {
                        return Err(RuntimeError::IncompatibleUnits(
                            x.clone(),
                            y.clone(),
                            Span::fake(),
                        ))
                    }
                    (Some(u), None) => Some(u.clone()),
                    (None, Some(_)) => return Err(self.undefined("/", other)),
                    (None, None) => None,
                };
                Ok(Value::Number(Number::new(a.value / b.value, unit)))
            }
            (Value::String(_), _) | (_, Value::String(_)) => Ok(self.join("/", other)),
            _ => Err(self.undefined("/", other)),
        }
    }

    pub fn modulo(&self, other: &Value) -> OperationResult {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                let unit = a.common_unit(b)?;
                // floored, so the result takes the sign of the divisor
                let mut rem = a.value % b.value;
                if rem != 0.0 && (rem < 0.0) != (b.value < 0.0) {
                    rem += b.value;
                }
                Ok(Value::Number(Number::new(rem, unit)))
            }
            _ => Err(self.undefined("%", other)),
        }
    }

    fn compare(&self, op: &str, other: &Value, f: fn(f64, f64) -> bool) -> OperationResult {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                a.common_unit(b)?;
                Ok(Value::Bool(f(a.value, b.value)))
            }
            _ => Err(self.undefined(op, other)),
        }
    }

    pub fn lt(&self, other: &Value) -> OperationResult {
        self.compare("<", other, |a, b| a < b)
    }

    pub fn lte(&self, other: &Value) -> OperationResult {
        self.compare("<=", other, |a, b| a <= b)
    }

    pub fn gt(&self, other: &Value) -> OperationResult {
        self.compare(">", other, |a, b| a > b)
    }

    pub fn gte(&self, other: &Value) -> OperationResult {
        self.compare(">=", other, |a, b| a >= b)
    }

    /// Equality as the language sees it: string quoting is ignored.
    pub fn sass_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.sass_eq(b),
            (Value::String(a), Value::String(b)) => a.value == b.value,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }

    pub fn equals(&self, other: &Value) -> OperationResult {
        Ok(Value::Bool(self.sass_eq(other)))
    }

    pub fn not_equals(&self, other: &Value) -> OperationResult {
        Ok(Value::Bool(!self.sass_eq(other)))
    }

    pub fn unary_minus(&self) -> OperationResult {
        match self {
            Value::Number(n) => Ok(Value::Number(Number::new(-n.value, n.unit.clone()))),
            _ => Ok(Value::unquoted(format!("-{}", self.unquoted_text()))),
        }
    }

    pub fn unary_plus(&self) -> OperationResult {
        match self {
            Value::Number(_) => Ok(self.clone()),
            _ => Ok(Value::unquoted(format!("+{}", self.unquoted_text()))),
        }
    }

    pub fn unary_not(&self) -> OperationResult {
        Ok(Value::Bool(!self.to_bool()))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inspect(DEFAULT_PRECISION))
    }
}
