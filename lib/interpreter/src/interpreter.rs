use std::{cell::RefCell, rc::Rc};

use ast::{Node, Program, Statement};
use runtime::{
    get_builtins, Environment, Number, RuntimeError, RuntimeResult, Value, DEFAULT_PRECISION,
};
use span_util::Span;

#[derive(Debug)]
pub struct Interpreter {
    env: Rc<RefCell<Environment>>,
    precision: usize,
    debug_output: Vec<String>,
}

// macro used for swapping the parent environment with the new supplied environment
// the parent is restored before the result is returned, also on errors
macro_rules! eval_with_new_env_in_scope {
    ($self:ident, $env:expr, $fun:ident, $stmts:expr) => {{
        let parent_env = $self.env.clone();
        $self.env = $env;
        let res = $self.$fun($stmts);
        $self.env = parent_env;
        res
    }};
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            env: Rc::new(RefCell::new(Environment::global())),
            precision: DEFAULT_PRECISION,
            debug_output: vec![],
        }
    }

    /// Runs against an environment owned by the caller, e.g. one kept alive
    /// across REPL lines.
    pub fn with_env(env: Rc<RefCell<Environment>>) -> Interpreter {
        env.borrow_mut().extend_functions(get_builtins());
        Interpreter {
            env,
            precision: DEFAULT_PRECISION,
            debug_output: vec![],
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Interpreter {
        self.precision = precision;
        self
    }

    /// Lines written by `@debug` so far.
    pub fn debug_output(&self) -> &[String] {
        &self.debug_output
    }

    pub fn take_debug_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.debug_output)
    }

    /// Runs the program and returns the value of its last expression statement.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn run(&mut self, program: &Program) -> RuntimeResult {
        self.eval(program)
    }

    /// Evaluates a single expression in the interpreter's environment.
    pub fn eval_expression(&mut self, expr: &dyn Node) -> RuntimeResult {
        expr.perform(&self.env.borrow())
    }

    fn eval(&mut self, stmts: &[Statement]) -> RuntimeResult {
        let mut res = Value::Null;
        for stmt in stmts {
            if let Some(value) = self.statement(stmt)? {
                res = value;
            }
        }
        Ok(res)
    }

    fn statement(&mut self, stmt: &Statement) -> Result<Option<Value>, RuntimeError> {
        match stmt {
            Statement::VariableDecl {
                name,
                expr,
                guarded,
                ..
            } => {
                self.eval_variable_decl(name, expr.as_ref(), *guarded)?;
                Ok(None)
            }
            Statement::Debug { expr, .. } => {
                self.eval_debug(expr.as_ref())?;
                Ok(None)
            }
            Statement::Expr { expr, .. } => Ok(Some(self.eval_expression(expr.as_ref())?)),
            Statement::For {
                var,
                from,
                to,
                inclusive,
                body,
                span,
            } => {
                self.eval_for(var, from.as_ref(), to.as_ref(), *inclusive, body, *span)?;
                Ok(None)
            }
        }
    }

    fn eval_variable_decl(
        &mut self,
        name: &str,
        expr: &dyn Node,
        guarded: bool,
    ) -> Result<(), RuntimeError> {
        if guarded {
            let current = self.env.borrow().var(name);
            if matches!(current, Some(value) if value != Value::Null) {
                return Ok(());
            }
        }

        let value = self.eval_expression(expr)?;
        self.env.borrow_mut().assign(name, value);
        Ok(())
    }

    fn eval_debug(&mut self, expr: &dyn Node) -> Result<(), RuntimeError> {
        let value = self.eval_expression(expr)?;
        let line = format!("DEBUG: {}", value.inspect(self.precision));
        tracing::debug!(%value, "@debug");
        self.debug_output.push(line);
        Ok(())
    }

    fn eval_for(
        &mut self,
        var: &str,
        from: &dyn Node,
        to: &dyn Node,
        inclusive: bool,
        body: &[Statement],
        span: Span,
    ) -> Result<(), RuntimeError> {
        let from = self.eval_expression(from)?;
        let to = self.eval_expression(to)?;
        let (start, start_unit) = loop_bound(from, span)?;
        let (end, end_unit) = loop_bound(to, span)?;

        let unit = match (start_unit, end_unit) {
            (Some(a), Some(b)) if a != b => {
                return Err(RuntimeError::IncompatibleUnits(a, b, span));
            }
            (a, b) => a.or(b),
        };

        let steps: Box<dyn Iterator<Item = i64>> = match (start <= end, inclusive) {
            (true, true) => Box::new(start..=end),
            (true, false) => Box::new(start..end),
            (false, true) => Box::new((end..=start).rev()),
            (false, false) => Box::new((end + 1..=start).rev()),
        };
        tracing::trace!(var, start, end, inclusive, "@for");

        for i in steps {
            let mut scope = Environment::with_outer(self.env.clone());
            scope.define(var, Value::Number(Number::new(i as f64, unit.clone())));

            // every iteration runs on its own copy of the body
            let copy: Program = body.iter().map(Statement::deep_copy).collect();
            eval_with_new_env_in_scope!(self, Rc::new(RefCell::new(scope)), eval, &copy)?;
        }

        Ok(())
    }
}

/// Largest magnitude an `@for` bound may have; every integer up to it is exact in f64.
const MAX_LOOP_BOUND: f64 = 9_007_199_254_740_992.0;

fn loop_bound(value: Value, span: Span) -> Result<(i64, Option<String>), RuntimeError> {
    match value {
        Value::Number(n) if n.value.fract() == 0.0 && n.value.abs() <= MAX_LOOP_BOUND => {
            Ok((n.value as i64, n.unit))
        }
        Value::Number(n) if n.value.fract() == 0.0 => Err(RuntimeError::TypeMismatch(
            format!("{} is out of range for @for.", n.format(DEFAULT_PRECISION)),
            span,
        )),
        Value::Number(n) => Err(RuntimeError::TypeMismatch(
            format!("{} is not an int.", n.format(DEFAULT_PRECISION)),
            span,
        )),
        other => Err(RuntimeError::TypeMismatch(
            format!("{} is not a number.", other),
            span,
        )),
    }
}
