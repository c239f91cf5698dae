use std::collections::HashMap;

thread_local!(
    static WORD_TO_TOKEN: HashMap<&'static str, Token> = Keyword::ALL
        .iter()
        .map(|k| (k.as_str(), Token::Keyword(*k)))
        .chain(vec![
            ("and", Token::Operator(Operator::AndAnd)),
            ("or", Token::Operator(Operator::OrOr)),
        ])
        .collect();
);

/// Lexeme kinds of the Colt language.
///
/// Literal tokens carry no value. The [`Scanner`](super::Scanner) that
/// produced them holds the parsed identifier, string, integer or double.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Token {
    Operator(Operator),
    Keyword(Keyword),
    Identifier,
    String,
    Integer,
    Double,
    Comma,
    Dot,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// Returned once the whole input is consumed, and every time after.
    Eof,
    /// Unterminated strings, malformed numbers and unknown characters.
    Error,
}

impl Token {
    /// Keywords and the operators spelled as words.
    pub fn from_word(s: &str) -> Option<Token> {
        WORD_TO_TOKEN.with(|wtt| wtt.get(s).copied())
    }

    pub fn name(&self) -> String {
        use Token::*;
        match self {
            Operator(op) => format!("TKN_OPERATOR_{}", op.name()),
            Keyword(kw) => format!("TKN_KEYWORD_{}", kw.as_str().to_ascii_uppercase()),
            Identifier => "TKN_IDENTIFIER".into(),
            String => "TKN_STRING".into(),
            Integer => "TKN_INTEGER".into(),
            Double => "TKN_DOUBLE".into(),
            Comma => "TKN_COMMA".into(),
            Dot => "TKN_DOT".into(),
            Colon => "TKN_COLON".into(),
            Semicolon => "TKN_SEMICOLON".into(),
            LParen => "TKN_LEFT_PAREN".into(),
            RParen => "TKN_RIGHT_PAREN".into(),
            LBrace => "TKN_LEFT_CURLY".into(),
            RBrace => "TKN_RIGHT_CURLY".into(),
            LBracket => "TKN_LEFT_SQUARE".into(),
            RBracket => "TKN_RIGHT_SQUARE".into(),
            Eof => "TKN_EOF".into(),
            Error => "TKN_ERROR".into(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Operator(op) => write!(f, "{}", op),
            Keyword(kw) => write!(f, "{}", kw),
            Identifier => write!(f, "identifier"),
            String => write!(f, "string literal"),
            Integer => write!(f, "integer literal"),
            Double => write!(f, "double literal"),
            Comma => write!(f, ","),
            Dot => write!(f, "."),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            LBrace => write!(f, "{{"),
            RBrace => write!(f, "}}"),
            LBracket => write!(f, "["),
            RBracket => write!(f, "]"),
            Eof => write!(f, "end of file"),
            Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Break,
    Case,
    Continue,
    Default,
    Elif,
    Else,
    For,
    Goto,
    If,
    Switch,
    While,
}

impl Keyword {
    pub const ALL: [Keyword; 11] = [
        Keyword::Break,
        Keyword::Case,
        Keyword::Continue,
        Keyword::Default,
        Keyword::Elif,
        Keyword::Else,
        Keyword::For,
        Keyword::Goto,
        Keyword::If,
        Keyword::Switch,
        Keyword::While,
    ];

    pub fn as_str(&self) -> &'static str {
        use Keyword::*;
        match self {
            Break => "break",
            Case => "case",
            Continue => "continue",
            Default => "default",
            Elif => "elif",
            Else => "else",
            For => "for",
            Goto => "goto",
            If => "if",
            Switch => "switch",
            While => "while",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    MinusMinus,
    MinusEqual,
    Star,
    StarEqual,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    Less,
    LessLess,
    LessEqual,
    Greater,
    GreaterGreater,
    GreaterEqual,
    LessColon,
    ColonGreater,
    Equal,
    EqualEqual,
    Bang,
    BangEqual,
    And,
    AndEqual,
    AndAnd,
    Or,
    OrEqual,
    OrOr,
    Xor,
    XorEqual,
    Tilde,
}

impl Operator {
    fn name(&self) -> &'static str {
        use Operator::*;
        match self {
            Plus => "PLUS",
            PlusPlus => "PLUS_PLUS",
            PlusEqual => "PLUS_EQUAL",
            Minus => "MINUS",
            MinusMinus => "MINUS_MINUS",
            MinusEqual => "MINUS_EQUAL",
            Star => "STAR",
            StarEqual => "STAR_EQUAL",
            Slash => "SLASH",
            SlashEqual => "SLASH_EQUAL",
            Percent => "PERCENT",
            PercentEqual => "PERCENT_EQUAL",
            Less => "LESS",
            LessLess => "LESS_LESS",
            LessEqual => "LESS_EQUAL",
            Greater => "GREATER",
            GreaterGreater => "GREATER_GREATER",
            GreaterEqual => "GREATER_EQUAL",
            LessColon => "LESS_COLON",
            ColonGreater => "COLON_GREATER",
            Equal => "EQUAL",
            EqualEqual => "EQUAL_EQUAL",
            Bang => "BANG",
            BangEqual => "BANG_EQUAL",
            And => "AND",
            AndEqual => "AND_EQUAL",
            AndAnd => "AND_AND",
            Or => "OR",
            OrEqual => "OR_EQUAL",
            OrOr => "OR_OR",
            Xor => "XOR",
            XorEqual => "XOR_EQUAL",
            Tilde => "TILDE",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Plus => write!(f, "+"),
            PlusPlus => write!(f, "++"),
            PlusEqual => write!(f, "+="),
            Minus => write!(f, "-"),
            MinusMinus => write!(f, "--"),
            MinusEqual => write!(f, "-="),
            Star => write!(f, "*"),
            StarEqual => write!(f, "*="),
            Slash => write!(f, "/"),
            SlashEqual => write!(f, "/="),
            Percent => write!(f, "%"),
            PercentEqual => write!(f, "%="),
            Less => write!(f, "<"),
            LessLess => write!(f, "<<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterGreater => write!(f, ">>"),
            GreaterEqual => write!(f, ">="),
            LessColon => write!(f, "<:"),
            ColonGreater => write!(f, ":>"),
            Equal => write!(f, "="),
            EqualEqual => write!(f, "=="),
            Bang => write!(f, "!"),
            BangEqual => write!(f, "!="),
            And => write!(f, "&"),
            AndEqual => write!(f, "&="),
            AndAnd => write!(f, "&&"),
            Or => write!(f, "|"),
            OrEqual => write!(f, "|="),
            OrOr => write!(f, "||"),
            Xor => write!(f, "^"),
            XorEqual => write!(f, "^="),
            Tilde => write!(f, "~"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word() {
        let t = Token::from_word("while");
        assert_eq!(t, Some(Token::Keyword(Keyword::While)));
        let t = Token::from_word("and");
        assert_eq!(t, Some(Token::Operator(Operator::AndAnd)));
        let t = Token::from_word("pickles");
        assert_eq!(t, None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Token::Operator(Operator::Plus).name(), "TKN_OPERATOR_PLUS");
        assert_eq!(Token::Keyword(Keyword::Elif).name(), "TKN_KEYWORD_ELIF");
        assert_eq!(Token::Eof.name(), "TKN_EOF");
    }
}
