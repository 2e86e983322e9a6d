use super::Token;

#[derive(Debug)]
pub struct Scanner {
    source: Vec<char>,
    pos: usize,
    ch: char,
}

impl Scanner {
    pub fn new(source: &str) -> Scanner {
        let source: Vec<char> = source.chars().collect();
        let ch = source.first().copied().unwrap_or('\0');
        Scanner {
            source,
            pos: 0,
            ch,
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.ch = self.source.get(self.pos).copied().unwrap_or('\0');
    }

    fn is_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn is_digit(&self, ch: char) -> bool {
        ch.is_ascii_digit()
    }

    fn is_alpha(&self, ch: char) -> bool {
        ch == '_' || ch.is_ascii_alphabetic()
    }

    fn is_name_char(&self, ch: char) -> bool {
        self.is_alpha(ch) || self.is_digit(ch) || ch == '-'
    }

    fn peek(&self) -> char {
        self.source.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while !self.is_end() && self.ch.is_whitespace() {
            self.advance();
        }
    }

    fn read_name(&mut self) -> String {
        let mut res = vec![];
        while !self.is_end() && self.is_name_char(self.ch) {
            res.push(self.ch);
            self.advance();
        }
        res.into_iter().collect()
    }

    fn read_number(&mut self) -> Token {
        let mut res = vec![];
        let pos = self.pos;
        while !self.is_end() && self.is_digit(self.ch) {
            res.push(self.ch);
            self.advance();
        }

        if self.ch == '.' && self.is_digit(self.peek()) {
            res.push(self.ch);
            self.advance();
            while !self.is_end() && self.is_digit(self.ch) {
                res.push(self.ch);
                self.advance();
            }
        }

        // unit
        if self.ch == '%' {
            res.push(self.ch);
            self.advance();
        } else {
            while !self.is_end() && self.ch.is_ascii_alphabetic() {
                res.push(self.ch);
                self.advance();
            }
        }

        Token::number(res.into_iter().collect(), pos..self.pos)
    }

    fn read_identifier(&mut self) -> Token {
        let pos = self.pos;
        let value = self.read_name();
        let label = pos..self.pos;

        match value.as_str() {
            "true" => Token::true_token(label),
            "false" => Token::false_token(label),
            "null" => Token::null(label),
            "and" => Token::and(label),
            "or" => Token::or(label),
            "not" => Token::not(label),
            _ => Token::identifier(value, label),
        }
    }

    fn read_string(&mut self, quote: char) -> Token {
        let pos = self.pos;
        let mut out = vec![];
        self.advance();

        loop {
            match self.ch {
                '\0' if self.is_end() => {
                    return Token::illegal("unterminated string".into(), pos..self.pos)
                }
                '\\' => {
                    self.advance();
                    if self.is_end() {
                        continue;
                    }
                    out.push(self.ch);
                    self.advance();
                }
                c if c == quote => {
                    self.advance();
                    break;
                }
                c => {
                    out.push(c);
                    self.advance();
                }
            }
        }

        Token::string_const(out.into_iter().collect(), pos..self.pos)
    }

    /// Reads the name after a sigil like `$` or `@`.
    fn read_sigil(&mut self, make: fn(String, std::ops::Range<usize>) -> Token) -> Token {
        let pos = self.pos;
        let sigil = self.ch;
        self.advance();

        if !self.is_alpha(self.ch) && self.ch != '-' {
            return Token::illegal(sigil.to_string(), pos..self.pos);
        }
        let name = self.read_name();
        make(name, pos..self.pos)
    }

    fn skip_line_comment(&mut self) {
        while !self.is_end() && self.ch != '\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        // opening `/*`
        self.advance();
        self.advance();
        while !self.is_end() {
            if self.ch == '*' && self.peek() == '/' {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let curr_ch = self.ch;
        let pos = self.pos;

        if self.is_end() {
            return Token::eof(pos..pos);
        }

        let two = |scanner: &mut Scanner, make: fn(std::ops::Range<usize>) -> Token| {
            scanner.advance();
            scanner.advance();
            make(pos..scanner.pos)
        };

        let token = match curr_ch {
            '+' => Token::plus(pos..pos + 1),
            '-' => Token::minus(pos..pos + 1),
            '*' => Token::star(pos..pos + 1),
            '%' => Token::percent(pos..pos + 1),
            '/' => match self.peek() {
                '/' => {
                    self.skip_line_comment();
                    return self.next_token();
                }
                '*' => {
                    self.skip_block_comment();
                    return self.next_token();
                }
                _ => Token::slash(pos..pos + 1),
            },
            '=' => {
                if self.peek() == '=' {
                    return two(self, Token::equal_equal);
                }
                Token::illegal(curr_ch.to_string(), pos..pos + 1)
            }
            '!' => {
                if self.peek() == '=' {
                    return two(self, Token::not_equal);
                }
                self.advance();
                let name = self.read_name();
                return match name.as_str() {
                    "default" => Token::default(pos..self.pos),
                    _ => Token::illegal(format!("!{}", name), pos..self.pos),
                };
            }
            '<' => {
                if self.peek() == '=' {
                    return two(self, Token::less_than_equal);
                }
                Token::less_than(pos..pos + 1)
            }
            '>' => {
                if self.peek() == '=' {
                    return two(self, Token::greater_than_equal);
                }
                Token::greater_than(pos..pos + 1)
            }
            '(' => Token::left_paren(pos..pos + 1),
            ')' => Token::right_paren(pos..pos + 1),
            '{' => Token::left_brace(pos..pos + 1),
            '}' => Token::right_brace(pos..pos + 1),
            ',' => Token::comma(pos..pos + 1),
            ':' => Token::colon(pos..pos + 1),
            ';' => Token::semi_colon(pos..pos + 1),
            '"' | '\'' => return self.read_string(curr_ch),
            '$' => return self.read_sigil(Token::variable),
            '@' => return self.read_sigil(Token::at_keyword),
            '.' if self.is_digit(self.peek()) => return self.read_number(),
            _ if self.is_digit(curr_ch) => return self.read_number(),
            _ if self.is_alpha(curr_ch) => return self.read_identifier(),
            _ => Token::illegal(curr_ch.to_string(), pos..pos + 1),
        };

        self.advance();
        token
    }
}
