use span_util::Span;

use crate::{Node, Options};

pub type Program = Vec<Statement>;

#[derive(Debug)]
pub enum Statement {
    /// `$name: expr;`, or `$name: expr !default;` when `guarded`.
    VariableDecl {
        name: String,
        expr: Box<dyn Node>,
        guarded: bool,
        span: Span,
    },
    Debug {
        expr: Box<dyn Node>,
        span: Span,
    },
    Expr {
        expr: Box<dyn Node>,
        span: Span,
    },
    For {
        var: String,
        from: Box<dyn Node>,
        to: Box<dyn Node>,
        inclusive: bool,
        body: Vec<Statement>,
        span: Span,
    },
}

impl Statement {
    pub fn create_var_decl(
        name: impl Into<String>,
        expr: Box<dyn Node>,
        guarded: bool,
        span: Span,
    ) -> Statement {
        Statement::VariableDecl {
            name: name.into(),
            expr,
            guarded,
            span,
        }
    }

    pub fn create_debug(expr: Box<dyn Node>, span: Span) -> Statement {
        Statement::Debug { expr, span }
    }

    pub fn create_expr(expr: Box<dyn Node>, span: Span) -> Statement {
        Statement::Expr { expr, span }
    }

    pub fn create_for(
        var: impl Into<String>,
        from: Box<dyn Node>,
        to: Box<dyn Node>,
        inclusive: bool,
        body: Vec<Statement>,
        span: Span,
    ) -> Statement {
        Statement::For {
            var: var.into(),
            from,
            to,
            inclusive,
            body,
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::VariableDecl { span, .. }
            | Statement::Debug { span, .. }
            | Statement::Expr { span, .. }
            | Statement::For { span, .. } => *span,
        }
    }

    pub fn deep_copy(&self) -> Statement {
        match self {
            Statement::VariableDecl {
                name,
                expr,
                guarded,
                span,
            } => Statement::create_var_decl(name.clone(), expr.deep_copy(), *guarded, *span),
            Statement::Debug { expr, span } => Statement::create_debug(expr.deep_copy(), *span),
            Statement::Expr { expr, span } => Statement::create_expr(expr.deep_copy(), *span),
            Statement::For {
                var,
                from,
                to,
                inclusive,
                body,
                span,
            } => Statement::create_for(
                var.clone(),
                from.deep_copy(),
                to.deep_copy(),
                *inclusive,
                body.iter().map(Statement::deep_copy).collect(),
                *span,
            ),
        }
    }

    /// Expression roots held by this statement, not descending into `@for` bodies.
    pub fn expressions(&self) -> Vec<&dyn Node> {
        match self {
            Statement::VariableDecl { expr, .. }
            | Statement::Debug { expr, .. }
            | Statement::Expr { expr, .. } => vec![expr.as_ref()],
            Statement::For { from, to, .. } => vec![from.as_ref(), to.as_ref()],
        }
    }

    pub fn to_sass(&self, opts: &Options) -> String {
        self.to_sass_indented(opts, 0)
    }

    fn to_sass_indented(&self, opts: &Options, depth: usize) -> String {
        let indent = if opts.is_compressed() {
            String::new()
        } else {
            "  ".repeat(depth)
        };

        match self {
            Statement::VariableDecl {
                name,
                expr,
                guarded,
                ..
            } => {
                let default = if *guarded { " !default" } else { "" };
                format!("{}${}: {}{};", indent, name, expr.to_sass(opts), default)
            }
            Statement::Debug { expr, .. } => format!("{}@debug {};", indent, expr.to_sass(opts)),
            Statement::Expr { expr, .. } => format!("{}{};", indent, expr.to_sass(opts)),
            Statement::For {
                var,
                from,
                to,
                inclusive,
                body,
                ..
            } => {
                let keyword = if *inclusive { "through" } else { "to" };
                let header = format!(
                    "{}@for ${} from {} {} {} {{",
                    indent,
                    var,
                    from.to_sass(opts),
                    keyword,
                    to.to_sass(opts)
                );
                let body: Vec<String> = body
                    .iter()
                    .map(|s| s.to_sass_indented(opts, depth + 1))
                    .collect();

                if opts.is_compressed() {
                    format!("{}{}}}", header, body.join(""))
                } else {
                    let mut lines = vec![header];
                    lines.extend(body);
                    lines.push(format!("{}}}", indent));
                    lines.join("\n")
                }
            }
        }
    }
}

/// Prints a whole program, one top level statement per line.
pub fn program_to_sass(program: &[Statement], opts: &Options) -> String {
    let separator = if opts.is_compressed() { "" } else { "\n" };
    program
        .iter()
        .map(|s| s.to_sass(opts))
        .collect::<Vec<String>>()
        .join(separator)
}
