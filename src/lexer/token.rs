use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// Reserved words that head a special form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    /// `fn` - anonymous function
    Fn,
    /// `def` - bind a name in the current frame
    Def,
    /// `defun` - named function definition sugar
    Defun,
    /// `if` - two-way conditional
    If,
    /// `seq` - sequential evaluation
    Seq,
}

impl Keyword {
    /// Get keyword from identifier text
    pub fn from_ident(s: &str) -> Option<Keyword> {
        match s {
            "fn" => Some(Keyword::Fn),
            "def" => Some(Keyword::Def),
            "defun" => Some(Keyword::Defun),
            "if" => Some(Keyword::If),
            "seq" => Some(Keyword::Seq),
            _ => None,
        }
    }

    /// Source spelling of the keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Fn => "fn",
            Keyword::Def => "def",
            Keyword::Defun => "defun",
            Keyword::If => "if",
            Keyword::Seq => "seq",
        }
    }
}

/// All possible token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Identifier, including operator names such as `+`
    Identifier(String),
    /// Special-form keyword
    Keyword(Keyword),
    /// Integer literal
    Integer(i64),
    /// String literal (without the surrounding quotes)
    String(String),
    /// Quote for list literals (')
    Quote,
    /// End of input marker
    Eof,
}

impl TokenKind {
    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Keyword(_))
    }

    /// Human-readable name used in parse errors
    pub fn describe(&self) -> String {
        match self {
            TokenKind::LeftParen => "`(`".to_string(),
            TokenKind::RightParen => "`)`".to_string(),
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Keyword(kw) => format!("keyword `{}`", kw.as_str()),
            TokenKind::Integer(n) => format!("integer `{}`", n),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Quote => "`'`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Identifier(id) => write!(f, "{}", id),
            TokenKind::Keyword(kw) => write!(f, "{}", kw.as_str()),
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Quote => write!(f, "'"),
            TokenKind::Eof => write!(f, "<eof>"),
        }
    }
}
