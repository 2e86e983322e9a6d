use std::collections::HashMap;

use indexmap::IndexMap;
use span_util::Span;

use crate::{normalize_name, Number, RuntimeError, SassString, Value};

type BuiltinResult = Result<Value, RuntimeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    TypeOf,
    Unquote,
    Quote,
    Abs,
    Percentage,
    Unit,
    Unitless,
    Max,
    Min,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::TypeOf => "type-of",
            Builtin::Unquote => "unquote",
            Builtin::Quote => "quote",
            Builtin::Abs => "abs",
            Builtin::Percentage => "percentage",
            Builtin::Unit => "unit",
            Builtin::Unitless => "unitless",
            Builtin::Max => "max",
            Builtin::Min => "min",
        }
    }

    /// Parameter names in declaration order.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Builtin::TypeOf => &["value"],
            Builtin::Unquote | Builtin::Quote => &["string"],
            Builtin::Abs | Builtin::Percentage | Builtin::Unit | Builtin::Unitless => {
                &["number"]
            }
            Builtin::Max | Builtin::Min => &["number1", "number2"],
        }
    }

    pub fn builtins() -> Vec<Builtin> {
        vec![
            Builtin::TypeOf,
            Builtin::Unquote,
            Builtin::Quote,
            Builtin::Abs,
            Builtin::Percentage,
            Builtin::Unit,
            Builtin::Unitless,
            Builtin::Max,
            Builtin::Min,
        ]
    }

    /// Maps positional and keyword values onto the signature.
    pub fn bind(
        &self,
        args: Vec<Value>,
        keywords: IndexMap<String, Value>,
        span: Span,
    ) -> Result<Vec<Value>, RuntimeError> {
        let params = self.params();
        let name = self.name().to_string();

        if args.len() > params.len() {
            return Err(RuntimeError::TooManyArguments(
                name,
                params.len(),
                args.len(),
                span,
            ));
        }

        let mut bound: Vec<Option<Value>> = args.into_iter().map(Some).collect();
        bound.resize(params.len(), None);

        for (keyword, value) in keywords {
            let normalized = normalize_name(&keyword);
            match params.iter().position(|p| normalize_name(p) == normalized) {
                Some(idx) if bound[idx].is_none() => bound[idx] = Some(value),
                Some(_) => return Err(RuntimeError::DuplicateArgument(name, keyword, span)),
                None => return Err(RuntimeError::UnknownKeyword(name, keyword, span)),
            }
        }

        bound
            .into_iter()
            .zip(params.iter())
            .map(|(value, param)| {
                value.ok_or_else(|| {
                    RuntimeError::MissingArgument(name.clone(), param.to_string(), span)
                })
            })
            .collect()
    }

    pub fn call(
        &self,
        args: Vec<Value>,
        keywords: IndexMap<String, Value>,
        span: Span,
    ) -> BuiltinResult {
        let args = self.bind(args, keywords, span)?;
        tracing::trace!(builtin = self.name(), argc = args.len(), "calling builtin");
        let res = match self {
            Builtin::TypeOf => builtin_type_of(&args[0]),
            Builtin::Unquote => builtin_unquote(&args[0]),
            Builtin::Quote => builtin_quote(&args[0]),
            Builtin::Abs => builtin_abs(&args[0]),
            Builtin::Percentage => builtin_percentage(&args[0]),
            Builtin::Unit => builtin_unit(&args[0]),
            Builtin::Unitless => builtin_unitless(&args[0]),
            Builtin::Max => builtin_extremum(self.name(), &args[0], &args[1], Value::gt),
            Builtin::Min => builtin_extremum(self.name(), &args[0], &args[1], Value::lt),
        };
        res.map_err(|e| e.at(span))
    }
}

pub fn get_builtins() -> HashMap<String, Builtin> {
    Builtin::builtins()
        .into_iter()
        .map(|b| (normalize_name(b.name()), b))
        .collect()
}

fn type_mismatch(param: &str, value: &Value, expected: &str, function: &str) -> RuntimeError {
    RuntimeError::TypeMismatch(
        format!("${}: {} is not {} for `{}'", param, value, expected, function),
        Span::fake(),
    )
}

fn expect_number<'a>(value: &'a Value, function: &str) -> Result<&'a Number, RuntimeError> {
    match value {
        Value::Number(n) => Ok(n),
        _ => Err(type_mismatch("number", value, "a number", function)),
    }
}

fn builtin_type_of(value: &Value) -> BuiltinResult {
    Ok(Value::unquoted(value.type_of()))
}

fn builtin_unquote(value: &Value) -> BuiltinResult {
    match value {
        Value::String(s) => Ok(Value::String(SassString::unquoted(s.value.clone()))),
        _ => Ok(value.clone()),
    }
}

fn builtin_quote(value: &Value) -> BuiltinResult {
    match value {
        Value::String(s) => Ok(Value::String(SassString::quoted(s.value.clone()))),
        _ => Err(type_mismatch("string", value, "a string", "quote")),
    }
}

fn builtin_abs(value: &Value) -> BuiltinResult {
    let n = expect_number(value, "abs")?;
    Ok(Value::Number(Number::new(n.value.abs(), n.unit.clone())))
}

fn builtin_percentage(value: &Value) -> BuiltinResult {
    let n = expect_number(value, "percentage")?;
    if !n.is_unitless() {
        return Err(type_mismatch("number", value, "a unitless number", "percentage"));
    }
    Ok(Value::number_with_unit(n.value * 100.0, "%"))
}

fn builtin_unit(value: &Value) -> BuiltinResult {
    let n = expect_number(value, "unit")?;
    Ok(Value::quoted(n.unit_str()))
}

fn builtin_unitless(value: &Value) -> BuiltinResult {
    let n = expect_number(value, "unitless")?;
    Ok(Value::Bool(n.is_unitless()))
}

fn builtin_extremum(
    function: &str,
    a: &Value,
    b: &Value,
    wins: fn(&Value, &Value) -> Result<Value, RuntimeError>,
) -> BuiltinResult {
    expect_number(a, function)?;
    expect_number(b, function)?;
    if wins(b, a)?.to_bool() {
        Ok(b.clone())
    } else {
        Ok(a.clone())
    }
}

#[cfg(test)]
mod test {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use span_util::Span;

    use super::{get_builtins, Builtin};
    use crate::{RuntimeError, Value};

    fn call(builtin: Builtin, args: Vec<Value>) -> Result<Value, RuntimeError> {
        builtin.call(args, IndexMap::new(), Span::fake())
    }

    #[test]
    fn builtins_are_registered_by_normalized_name() {
        let builtins = get_builtins();
        assert_eq!(builtins.get("type_of"), Some(&Builtin::TypeOf));
        assert_eq!(builtins.get("not"), None);
        assert_eq!(builtins.len(), Builtin::builtins().len());
    }

    #[test]
    fn call_builtins() {
        assert_eq!(
            call(Builtin::TypeOf, vec![Value::number(1.0)]),
            Ok(Value::unquoted("number"))
        );
        assert_eq!(
            call(Builtin::Abs, vec![Value::number_with_unit(-3.0, "px")]),
            Ok(Value::number_with_unit(3.0, "px"))
        );
        assert_eq!(
            call(Builtin::Percentage, vec![Value::number(0.25)]),
            Ok(Value::number_with_unit(25.0, "%"))
        );
        assert_eq!(
            call(Builtin::Unit, vec![Value::number_with_unit(1.0, "em")]),
            Ok(Value::quoted("em"))
        );
        assert_eq!(
            call(Builtin::Max, vec![Value::number(1.0), Value::number(4.0)]),
            Ok(Value::number(4.0))
        );
        assert_eq!(
            call(Builtin::Min, vec![Value::number(1.0), Value::number(4.0)]),
            Ok(Value::number(1.0))
        );
    }

    #[test]
    fn bind_keywords() {
        let mut keywords = IndexMap::new();
        keywords.insert(String::from("number"), Value::number(-2.0));
        assert_eq!(
            Builtin::Abs.call(vec![], keywords, Span::fake()),
            Ok(Value::number(2.0))
        );

        let mut keywords = IndexMap::new();
        keywords.insert(String::from("foo"), Value::number(-2.0));
        assert_eq!(
            Builtin::Abs
                .call(vec![Value::number(1.0)], keywords, Span::fake())
                .map_err(|e| e.to_string()),
            Err(String::from("Function abs doesn't have an argument named $foo."))
        );
    }

    #[test]
    fn bind_errors() {
        assert!(matches!(
            call(Builtin::Abs, vec![]),
            Err(RuntimeError::MissingArgument(..))
        ));
        assert!(matches!(
            call(Builtin::Abs, vec![Value::number(1.0), Value::number(2.0)]),
            Err(RuntimeError::TooManyArguments(_, 1, 2, _))
        ));
        assert_eq!(
            call(Builtin::Abs, vec![Value::Bool(true)]).map_err(|e| e.to_string()),
            Err(String::from("$number: true is not a number for `abs'"))
        );
    }
}
