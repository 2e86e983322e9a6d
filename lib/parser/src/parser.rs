use ast::{
    BinaryOperator, Funcall, IfFunction, Literal, Node, Operation, Program, Statement,
    UnaryOperation, UnaryOperator, Variable,
};
use indexmap::IndexMap;
use runtime::{normalize_name, Number, SassString, Value};
use span_util::Span;

use crate::scanner::{Scanner, Token, TokenType};
use crate::ParserError;

const RECOVER_SET: [TokenType; 2] = [TokenType::Variable, TokenType::AtKeyword];

type ExprResult = Result<Box<dyn Node>, ParserError>;

#[derive(Debug)]
pub struct Parser {
    scanner: Scanner,
    prev_token: Token,
    curr_token: Token,
    peek_token: Token,
}

impl Parser {
    pub fn new(mut scanner: Scanner) -> Parser {
        let curr_token = scanner.next_token();
        let peek_token = scanner.next_token();
        Parser {
            scanner,
            prev_token: Token::eof(0..0),
            curr_token,
            peek_token,
        }
    }

    pub fn parse(&mut self) -> (Program, Vec<ParserError>) {
        let mut program = Vec::new();
        let mut errors = Vec::new();
        while !self.is_end() {
            match self.statement() {
                Ok(stmt) => program.push(stmt),
                Err(err) => {
                    self.sync();
                    errors.push(err);
                }
            }
        }
        (program, errors)
    }

    /// Parses a single expression that must span the whole input.
    pub fn parse_expression(&mut self) -> ExprResult {
        let expr = self.expression()?;
        self.eat_optional(TokenType::SemiColon);
        if !self.is_end() {
            return Err(ParserError::UnexpectedToken(self.curr_token.clone()));
        }
        Ok(expr)
    }

    fn sync(&mut self) {
        self.advance();

        while !self.is_end() {
            if self.prev_token.token_type == TokenType::SemiColon {
                return;
            }

            if RECOVER_SET.contains(&self.curr_token.token_type) {
                return;
            }
            self.advance();
        }
    }

    fn matches(&mut self, types: &[TokenType]) -> bool {
        for token_type in types.iter() {
            if *token_type == self.curr_token.token_type {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.curr_token.token_type == token_type
    }

    fn check_peek(&self, token_type: TokenType) -> bool {
        self.peek_token.token_type == token_type
    }

    fn advance(&mut self) -> Token {
        self.prev_token = self.curr_token.clone();
        self.curr_token = self.peek_token.clone();
        self.peek_token = self.scanner.next_token();

        self.prev_token.clone()
    }

    fn is_end(&self) -> bool {
        self.curr_token.is_eof()
    }

    fn eat(&mut self, token_type: TokenType, msg: &str) -> Result<Token, ParserError> {
        if self.curr_token.token_type == token_type {
            return Ok(self.advance());
        }
        Err(ParserError::ExpectedToken(
            msg.to_string(),
            self.curr_token.clone(),
        ))
    }

    fn eat_optional(&mut self, token_type: TokenType) -> Option<Token> {
        if self.curr_token.token_type == token_type {
            return Some(self.advance());
        }
        None
    }

    fn eat_word(&mut self, word: &str) -> Result<Token, ParserError> {
        if self.curr_token.is_word(word) {
            return Ok(self.advance());
        }
        Err(ParserError::ExpectedToken(
            format!("Expected '{}'", word),
            self.curr_token.clone(),
        ))
    }

    /// Span from `start` up to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.extend(self.prev_token.span)
    }

    /// `;` may be left out before the end of a block or of the input.
    fn end_statement(&mut self, msg: &str) -> Result<(), ParserError> {
        if self.eat_optional(TokenType::SemiColon).is_some()
            || self.check(TokenType::RightBrace)
            || self.is_end()
        {
            return Ok(());
        }
        Err(ParserError::ExpectedToken(
            msg.to_string(),
            self.curr_token.clone(),
        ))
    }

    fn statement(&mut self) -> Result<Statement, ParserError> {
        if self.check(TokenType::Variable) && self.check_peek(TokenType::Colon) {
            return self.variable_declaration();
        }
        if self.check(TokenType::AtKeyword) {
            return self.at_rule();
        }
        self.expression_statement()
    }

    fn variable_declaration(&mut self) -> Result<Statement, ParserError> {
        let name = self.advance();
        self.advance();

        let expr = self.expression()?;
        let guarded = self.eat_optional(TokenType::Default).is_some();
        let span = self.span_from(name.span);
        self.end_statement("Expected ';' after variable declaration")?;

        Ok(Statement::create_var_decl(name.value, expr, guarded, span))
    }

    fn at_rule(&mut self) -> Result<Statement, ParserError> {
        let keyword = self.advance();
        match keyword.value.as_str() {
            "debug" => {
                let expr = self.expression()?;
                let span = self.span_from(keyword.span);
                self.end_statement("Expected ';' after @debug")?;
                Ok(Statement::create_debug(expr, span))
            }
            "for" => self.for_statement(keyword.span),
            _ => Err(ParserError::UnknownAtRule(keyword.value, keyword.span)),
        }
    }

    fn for_statement(&mut self, start: Span) -> Result<Statement, ParserError> {
        let var = self.eat(TokenType::Variable, "Expected variable after @for")?;
        self.eat_word("from")?;
        let from = self.expression()?;

        let inclusive = if self.curr_token.is_word("through") {
            true
        } else if self.curr_token.is_word("to") {
            false
        } else {
            return Err(ParserError::ExpectedToken(
                "Expected 'through' or 'to'".to_string(),
                self.curr_token.clone(),
            ));
        };
        self.advance();

        let to = self.expression()?;
        self.eat(TokenType::LeftBrace, "Expected '{' before @for body")?;

        let mut body = vec![];
        while !self.check(TokenType::RightBrace) && !self.is_end() {
            body.push(self.statement()?);
        }
        self.eat(TokenType::RightBrace, "Expected '}' after @for body")?;

        Ok(Statement::create_for(
            var.value,
            from,
            to,
            inclusive,
            body,
            self.span_from(start),
        ))
    }

    fn expression_statement(&mut self) -> Result<Statement, ParserError> {
        let start = self.curr_token.span;
        let expr = self.expression()?;
        let span = self.span_from(start);
        self.end_statement("Expected ';' after expression")?;
        Ok(Statement::create_expr(expr, span))
    }

    fn expression(&mut self) -> ExprResult {
        self.or()
    }

    /// Folds a left-associative chain of operators handled by `operand`.
    fn binary(
        &mut self,
        operators: &[(TokenType, BinaryOperator)],
        operand: fn(&mut Parser) -> ExprResult,
    ) -> ExprResult {
        let mut expr = operand(self)?;

        while let Some(operator) = operators
            .iter()
            .find(|(t, _)| self.check(*t))
            .map(|(_, op)| *op)
        {
            self.advance();
            let right = operand(self)?;
            let span = expr.span().extend(right.span());
            expr = Box::new(Operation::new(expr, operator, right, span));
        }

        Ok(expr)
    }

    fn or(&mut self) -> ExprResult {
        self.binary(&[(TokenType::Or, BinaryOperator::Or)], Parser::and)
    }

    fn and(&mut self) -> ExprResult {
        self.binary(&[(TokenType::And, BinaryOperator::And)], Parser::equality)
    }

    fn equality(&mut self) -> ExprResult {
        self.binary(
            &[
                (TokenType::EqualEqual, BinaryOperator::Equal),
                (TokenType::NotEqual, BinaryOperator::NotEqual),
            ],
            Parser::comparison,
        )
    }

    fn comparison(&mut self) -> ExprResult {
        self.binary(
            &[
                (TokenType::LessThan, BinaryOperator::LessThan),
                (TokenType::LessThanEqual, BinaryOperator::LessThanEqual),
                (TokenType::GreaterThan, BinaryOperator::GreaterThan),
                (TokenType::GreaterThanEqual, BinaryOperator::GreaterThanEqual),
            ],
            Parser::additive,
        )
    }

    fn additive(&mut self) -> ExprResult {
        self.binary(
            &[
                (TokenType::Plus, BinaryOperator::Plus),
                (TokenType::Minus, BinaryOperator::Minus),
            ],
            Parser::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> ExprResult {
        self.binary(
            &[
                (TokenType::Star, BinaryOperator::Times),
                (TokenType::Slash, BinaryOperator::Div),
                (TokenType::Percent, BinaryOperator::Mod),
            ],
            Parser::unary,
        )
    }

    fn unary(&mut self) -> ExprResult {
        let operator = match self.curr_token.token_type {
            TokenType::Minus => UnaryOperator::Minus,
            TokenType::Plus => UnaryOperator::Plus,
            TokenType::Not => UnaryOperator::Not,
            _ => return self.primary(),
        };
        let start = self.advance().span;
        let operand = self.unary()?;
        let span = start.extend(operand.span());
        Ok(Box::new(UnaryOperation::new(operator, operand, span)))
    }

    fn primary(&mut self) -> ExprResult {
        let token = self.curr_token.clone();
        let span = token.span;
        let literal = |value: Value| -> ExprResult { Ok(Box::new(Literal::new(value, span))) };

        match token.token_type {
            TokenType::Number => {
                self.advance();
                literal(Value::Number(parse_number(&token)?))
            }
            TokenType::StringConst => {
                self.advance();
                literal(Value::String(SassString::quoted(token.value.clone())))
            }
            TokenType::True => {
                self.advance();
                literal(Value::Bool(true))
            }
            TokenType::False => {
                self.advance();
                literal(Value::Bool(false))
            }
            TokenType::Null => {
                self.advance();
                literal(Value::Null)
            }
            TokenType::Variable => {
                self.advance();
                Ok(Box::new(Variable::new(token.value.clone(), token.span)))
            }
            TokenType::Identifier => {
                self.advance();
                if self.check(TokenType::LeftParen) {
                    return self.call(token);
                }
                literal(Value::String(SassString::unquoted(token.value.clone())))
            }
            TokenType::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.eat(TokenType::RightParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            TokenType::Illegal => Err(ParserError::UnexpectedToken(token)),
            _ => Err(ParserError::ExpectedExpression(token)),
        }
    }

    fn call(&mut self, name: Token) -> ExprResult {
        self.eat(TokenType::LeftParen, "Expected '('")?;

        let mut args: Vec<Box<dyn Node>> = vec![];
        let mut keywords: IndexMap<String, Box<dyn Node>> = IndexMap::new();

        while !self.check(TokenType::RightParen) {
            if self.check(TokenType::Variable) && self.check_peek(TokenType::Colon) {
                let keyword = self.advance();
                self.advance();
                let value = self.expression()?;
                let key = normalize_name(&keyword.value);
                if keywords.contains_key(&key) {
                    return Err(ParserError::DuplicateArgument(keyword.value, keyword.span));
                }
                keywords.insert(key, value);
            } else {
                let start = self.curr_token.span;
                let value = self.expression()?;
                if !keywords.is_empty() {
                    return Err(ParserError::PositionalAfterKeyword(self.span_from(start)));
                }
                args.push(value);
            }

            if self.eat_optional(TokenType::Comma).is_none() {
                break;
            }
        }

        self.eat(TokenType::RightParen, "Expected ')' after arguments")?;
        let span = self.span_from(name.span);

        if name.value == "if" {
            let node = IfFunction::new(args, keywords, span)
                .map_err(|err| ParserError::Argument(err, span))?;
            return Ok(Box::new(node));
        }

        Ok(Box::new(Funcall::new(name.value, args, keywords, span)))
    }
}

/// Splits a number token like `10px` or `.5em` into value and unit.
fn parse_number(token: &Token) -> Result<Number, ParserError> {
    let text = token.value.as_str();
    let idx = text
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(text.len());
    let (digits, unit) = text.split_at(idx);

    let value: f64 = digits
        .parse()
        .map_err(|_| ParserError::InvalidNumber(text.to_string(), token.span))?;
    let unit = if unit.is_empty() {
        None
    } else {
        Some(unit.to_string())
    };
    Ok(Number::new(value, unit))
}
