use super::token::{Operator, Token};
use super::{Column, Error};
use tracing::debug;

/// Scans a whole string.
pub fn lex(s: &str) -> Vec<Token> {
    Scanner::new(s).collect()
}

fn is_colt_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_colt_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_colt_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// ## Breaks a string into lexemes
///
/// Tokens are requested one at a time with [`next_token`](Scanner::next_token).
/// The value of the most recent identifier, string, integer or double
/// literal stays available on the scanner until the next literal of the
/// same kind replaces it.
pub struct Scanner<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    line_begin: usize,
    lexeme_begin: usize,
    lexeme_line: usize,
    lexeme_line_begin: usize,
    parsed_identifier: String,
    parsed_string: String,
    parsed_double: f64,
    parsed_integer: u64,
    error: Option<Error>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            offset: 0,
            line: 1,
            line_begin: 0,
            lexeme_begin: 0,
            lexeme_line: 1,
            lexeme_line_begin: 0,
            parsed_identifier: String::new(),
            parsed_string: String::new(),
            parsed_double: 0.0,
            parsed_integer: 0,
            error: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.parsed_identifier
    }

    pub fn string(&self) -> &str {
        &self.parsed_string
    }

    pub fn double(&self) -> f64 {
        self.parsed_double
    }

    pub fn integer(&self) -> u64 {
        self.parsed_integer
    }

    /// Line of the current lexeme.
    pub fn line(&self) -> usize {
        self.lexeme_line
    }

    /// Byte range of the current lexeme within its line.
    pub fn column(&self) -> Column {
        (self.lexeme_begin - self.lexeme_line_begin)..(self.offset - self.lexeme_line_begin)
    }

    pub fn lexeme(&self) -> &'a str {
        &self.source[self.lexeme_begin..self.offset]
    }

    /// The error behind the last `Token::Error`, cleared by the next request.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn source_line(&self, line: usize) -> Option<&'a str> {
        if line == 0 {
            return None;
        }
        self.source.lines().nth(line - 1)
    }

    pub fn next_token(&mut self) -> Token {
        self.error = None;
        if let Err(token) = self.skip_trivia() {
            return token;
        }
        self.begin_lexeme();
        let ch = match self.next_char() {
            Some(ch) => ch,
            None => return Token::Eof,
        };
        if is_colt_alphabetic(ch) {
            return self.word();
        }
        if ch.is_ascii_digit() {
            return self.number(ch);
        }
        if ch == '.' && self.peek(0).map_or(false, |c| c.is_ascii_digit()) {
            return self.number(ch);
        }
        if ch == '"' {
            return self.string_literal();
        }
        self.minutia(ch)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.source[self.offset..].chars().next()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.line_begin = self.offset;
        }
        Some(ch)
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn begin_lexeme(&mut self) {
        self.lexeme_begin = self.offset;
        self.lexeme_line = self.line;
        self.lexeme_line_begin = self.line_begin;
    }

    fn fail(&mut self, error: Error) -> Token {
        let error = error.in_line_number(Some(self.lexeme_line)).in_column(&self.column());
        debug!(%error, "scan error");
        self.error = Some(error);
        Token::Error
    }

    fn skip_trivia(&mut self) -> Result<(), Token> {
        loop {
            match self.peek(0) {
                Some(c) if is_colt_whitespace(c) => {
                    self.next_char();
                }
                Some('/') if self.peek(1) == Some('/') => {
                    while let Some(c) = self.peek(0) {
                        if c == '\n' {
                            break;
                        }
                        self.next_char();
                    }
                }
                Some('/') if self.peek(1) == Some('*') => {
                    self.begin_lexeme();
                    self.next_char();
                    self.next_char();
                    loop {
                        match self.next_char() {
                            Some('*') if self.peek(0) == Some('/') => {
                                self.next_char();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                // Report only the opening delimiter.
                                self.offset = self.lexeme_begin + 2;
                                self.line = self.lexeme_line;
                                self.line_begin = self.lexeme_line_begin;
                                let token =
                                    self.fail(error!(SyntaxError; "unterminated block comment"));
                                self.offset = self.source.len();
                                return Err(token);
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn word(&mut self) -> Token {
        while let Some(c) = self.peek(0) {
            if !is_colt_alphanumeric(c) {
                break;
            }
            self.next_char();
        }
        let source = self.source;
        self.parsed_identifier.clear();
        self.parsed_identifier
            .push_str(&source[self.lexeme_begin..self.offset]);
        Token::from_word(&self.parsed_identifier).unwrap_or(Token::Identifier)
    }

    fn digits(&mut self) {
        while let Some(c) = self.peek(0) {
            if !(c.is_ascii_digit() || c == '_') {
                break;
            }
            self.next_char();
        }
    }

    fn number(&mut self, first: char) -> Token {
        if first == '0' {
            let base = match self.peek(0) {
                Some('x') | Some('X') => 16,
                Some('b') | Some('B') => 2,
                Some('o') | Some('O') => 8,
                _ => 10,
            };
            if base != 10 {
                self.next_char();
                return self.based_integer(base);
            }
        }
        let mut is_double = first == '.';
        self.digits();
        if !is_double
            && self.peek(0) == Some('.')
            && self.peek(1).map_or(false, |c| c.is_ascii_digit())
        {
            self.next_char();
            self.digits();
            is_double = true;
        }
        if let Some('e') | Some('E') = self.peek(0) {
            self.next_char();
            if let Some('+') | Some('-') = self.peek(0) {
                self.next_char();
            }
            if !self.peek(0).map_or(false, |c| c.is_ascii_digit()) {
                return self.fail(error!(InvalidNumber; "missing exponent digits"));
            }
            self.digits();
            is_double = true;
        }
        if self.peek(0).map_or(false, is_colt_alphabetic) {
            while self.peek(0).map_or(false, is_colt_alphanumeric) {
                self.next_char();
            }
            return self.fail(error!(InvalidNumber; "invalid digit in number literal"));
        }
        let text: String = self.lexeme().chars().filter(|c| *c != '_').collect();
        if is_double {
            match text.parse::<f64>() {
                Ok(d) => {
                    self.parsed_double = d;
                    Token::Double
                }
                Err(_) => self.fail(error!(InvalidNumber)),
            }
        } else {
            match text.parse::<u64>() {
                Ok(i) => {
                    self.parsed_integer = i;
                    Token::Integer
                }
                Err(_) => self.fail(error!(Overflow; "integer literal too big")),
            }
        }
    }

    fn based_integer(&mut self, base: u32) -> Token {
        let start = self.offset;
        while self.peek(0).map_or(false, is_colt_alphanumeric) {
            self.next_char();
        }
        let digits: String = self.source[start..self.offset]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        if digits.is_empty() {
            return self.fail(error!(InvalidNumber; "missing digits after base prefix"));
        }
        if !digits.chars().all(|c| c.is_digit(base)) {
            return self.fail(error!(InvalidNumber; "invalid digit for the base"));
        }
        match u64::from_str_radix(&digits, base) {
            Ok(i) => {
                self.parsed_integer = i;
                Token::Integer
            }
            Err(_) => self.fail(error!(Overflow; "integer literal too big")),
        }
    }

    fn string_literal(&mut self) -> Token {
        self.parsed_string.clear();
        loop {
            match self.peek(0) {
                None | Some('\n') => return self.fail(error!(UnterminatedString)),
                Some('"') => {
                    self.next_char();
                    return Token::String;
                }
                Some('\\') => {
                    self.next_char();
                    match self.peek(0) {
                        None | Some('\n') => return self.fail(error!(UnterminatedString)),
                        Some(c) => {
                            self.next_char();
                            match c {
                                'n' => self.parsed_string.push('\n'),
                                't' => self.parsed_string.push('\t'),
                                'r' => self.parsed_string.push('\r'),
                                '0' => self.parsed_string.push('\0'),
                                '\\' | '"' => self.parsed_string.push(c),
                                _ => {
                                    self.parsed_string.push('\\');
                                    self.parsed_string.push(c);
                                }
                            }
                        }
                    }
                }
                Some(c) => {
                    self.next_char();
                    self.parsed_string.push(c);
                }
            }
        }
    }

    fn choose(&mut self, choices: &[(char, Operator)], default: Operator) -> Token {
        if let Some(pk) = self.peek(0) {
            for (ch, op) in choices {
                if *ch == pk {
                    self.next_char();
                    return Token::Operator(*op);
                }
            }
        }
        Token::Operator(default)
    }

    fn minutia(&mut self, ch: char) -> Token {
        use Operator::*;
        match ch {
            '+' => self.choose(&[('+', PlusPlus), ('=', PlusEqual)], Plus),
            '-' => self.choose(&[('-', MinusMinus), ('=', MinusEqual)], Minus),
            '*' => self.choose(&[('=', StarEqual)], Star),
            '/' => self.choose(&[('=', SlashEqual)], Slash),
            '%' => self.choose(&[('=', PercentEqual)], Percent),
            '<' => self.choose(&[('<', LessLess), ('=', LessEqual), (':', LessColon)], Less),
            '>' => self.choose(&[('>', GreaterGreater), ('=', GreaterEqual)], Greater),
            '=' => self.choose(&[('=', EqualEqual)], Equal),
            '!' => self.choose(&[('=', BangEqual)], Bang),
            '&' => self.choose(&[('&', AndAnd), ('=', AndEqual)], And),
            '|' => self.choose(&[('|', OrOr), ('=', OrEqual)], Or),
            '^' => self.choose(&[('=', XorEqual)], Xor),
            '~' => Token::Operator(Tilde),
            ':' => {
                if self.peek(0) == Some('>') {
                    self.next_char();
                    Token::Operator(ColonGreater)
                } else {
                    Token::Colon
                }
            }
            ',' => Token::Comma,
            '.' => Token::Dot,
            ';' => Token::Semicolon,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            _ => self.fail(error!(SyntaxError; "unexpected character")),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Token::Eof => None,
            token => Some(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::token::Keyword;
    use super::*;

    #[test]
    fn test_identifier_slot() {
        let mut s = Scanner::new("  foo_1 while");
        assert_eq!(s.next_token(), Token::Identifier);
        assert_eq!(s.identifier(), "foo_1");
        assert_eq!(s.column(), 2..7);
        assert_eq!(s.next_token(), Token::Keyword(Keyword::While));
        assert_eq!(s.next_token(), Token::Eof);
        assert_eq!(s.next_token(), Token::Eof);
    }

    #[test]
    fn test_lines() {
        let mut s = Scanner::new("a\n\n  b");
        s.next_token();
        assert_eq!(s.line(), 1);
        s.next_token();
        assert_eq!(s.line(), 3);
        assert_eq!(s.column(), 2..3);
    }

    #[test]
    fn test_block_comment_unterminated() {
        let mut s = Scanner::new("1 /* never closed");
        assert_eq!(s.next_token(), Token::Integer);
        assert_eq!(s.next_token(), Token::Error);
        assert_eq!(s.error().map(|e| e.column()), Some(2..4));
        assert_eq!(s.next_token(), Token::Eof);
    }
}
