use super::token::{Keyword, Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for yalig S-expression source
pub struct SExprScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Column where the current token starts
    start_column: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl SExprScanner {
    /// Creates a new S-expression scanner from source code
    pub fn new(source: &str) -> Self {
        SExprScanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            start_column: 1,
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans all tokens from source code and returns them, terminated by `Eof`
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        match self.scan_prefix() {
            (tokens, None) => Ok(tokens),
            (_, Some(err)) => Err(err),
        }
    }

    /// Scans up to the first lexical error.
    ///
    /// Returns the tokens before the error, terminated by `Eof`, together with
    /// the error if there was one.
    pub fn scan_prefix(&mut self) -> (Vec<Token>, Option<Error>) {
        let mut error = None;
        while !self.is_at_end() {
            self.start = self.current;
            self.start_column = self.column;
            if let Err(err) = self.scan_token() {
                error = Some(err);
                break;
            }
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        (std::mem::take(&mut self.tokens), error)
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            ' ' | '\r' | '\t' => {}
            '\n' => {
                self.line += 1;
                self.column = 1;
            }

            ';' => self.skip_line_comment(),

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '\'' => self.add_token(TokenKind::Quote),

            '"' => self.scan_string()?,

            '-' if self.peek().is_ascii_digit() => self.scan_number()?,
            c if c.is_ascii_digit() => self.scan_number()?,

            c if is_operator_char(c) => self.scan_operator(),

            c if c.is_alphabetic() || c == '_' => self.scan_identifier_or_keyword(),

            _ => {
                return Err(Error::ParseError(format!(
                    "Unexpected character '{}' at line {}, column {}",
                    c, self.line, self.start_column
                )));
            }
        }

        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<()> {
        let start_line = self.line;
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\\' {
                self.advance();
                if self.is_at_end() {
                    break;
                }
                let escaped = self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    _ => {
                        return Err(Error::ParseError(format!(
                            "Invalid escape sequence \\{} at line {}",
                            escaped, self.line
                        )));
                    }
                }
            } else {
                let c = self.advance();
                if c == '\n' {
                    self.line += 1;
                    self.column = 1;
                }
                value.push(c);
            }
        }

        if self.is_at_end() {
            return Err(Error::ParseError(format!(
                "Unterminated string starting at line {}",
                start_line
            )));
        }

        self.advance(); // Closing "

        self.add_token(TokenKind::String(value));
        Ok(())
    }

    fn scan_number(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // `12abc` is one malformed literal, not a number followed by a name
        if is_identifier_continue(self.peek()) {
            while is_identifier_continue(self.peek()) {
                self.advance();
            }
            let text = self.current_text();
            return Err(Error::ParseError(format!(
                "Invalid integer literal '{}' at line {}, column {}",
                text, self.line, self.start_column
            )));
        }

        let text = self.current_text();
        let value: i64 = text.parse().map_err(|_| {
            Error::ParseError(format!(
                "Integer literal '{}' out of range at line {}, column {}",
                text, self.line, self.start_column
            ))
        })?;
        self.add_token(TokenKind::Integer(value));
        Ok(())
    }

    fn scan_operator(&mut self) {
        while is_operator_char(self.peek()) {
            self.advance();
        }
        let text = self.current_text();
        self.add_token(TokenKind::Identifier(text));
    }

    fn scan_identifier_or_keyword(&mut self) {
        while is_identifier_continue(self.peek()) {
            self.advance();
        }

        let text = self.current_text();
        let kind = match Keyword::from_ident(&text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier(text),
        };
        self.add_token(kind);
    }

    fn current_text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.current_text();
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.start_column));
    }
}

/// Characters allowed after the first one of an identifier
fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '?' | '!')
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '<' | '>' | '=' | '!')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = SExprScanner::new(source);
        scanner
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_sexpr() {
        assert_eq!(
            kinds("(+ 1 2)"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Identifier("+".to_string()),
                TokenKind::Integer(1),
                TokenKind::Integer(2),
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("(fn (x) x)")[1],
            TokenKind::Keyword(Keyword::Fn)
        );
        assert_eq!(kinds("seq")[0], TokenKind::Keyword(Keyword::Seq));
        assert_eq!(
            kinds("define")[0],
            TokenKind::Identifier("define".to_string())
        );
    }

    #[test]
    fn test_quote() {
        let tokens = kinds("'(1 2 3)");
        assert_eq!(tokens[0], TokenKind::Quote);
        assert_eq!(tokens[1], TokenKind::LeftParen);
    }

    #[test]
    fn test_comment() {
        let tokens = kinds("; This is a comment\n(+ 1 2) ; trailing");
        assert_eq!(tokens[0], TokenKind::LeftParen);
        assert_eq!(tokens[1], TokenKind::Identifier("+".to_string()));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            kinds(r#""a \"b\"\n""#)[0],
            TokenKind::String("a \"b\"\n".to_string())
        );
    }

    #[test]
    fn test_negative_number_and_minus() {
        assert_eq!(kinds("-42")[0], TokenKind::Integer(-42));
        assert_eq!(kinds("- 4")[0], TokenKind::Identifier("-".to_string()));
    }

    #[test]
    fn test_operator_runs() {
        assert_eq!(kinds("<=")[0], TokenKind::Identifier("<=".to_string()));
        assert_eq!(kinds("=")[0], TokenKind::Identifier("=".to_string()));
    }

    #[test]
    fn test_positions() {
        let mut scanner = SExprScanner::new("(def x\n  42)");
        let tokens = scanner.scan_tokens().unwrap();
        let num = &tokens[3];
        assert_eq!(num.kind, TokenKind::Integer(42));
        assert_eq!((num.line, num.column), (2, 3));
    }

    #[test]
    fn test_malformed_literals() {
        assert!(SExprScanner::new("12abc").scan_tokens().is_err());
        assert!(SExprScanner::new("99999999999999999999").scan_tokens().is_err());
        assert!(SExprScanner::new("\"open").scan_tokens().is_err());
        assert!(SExprScanner::new("#").scan_tokens().is_err());
    }

    #[test]
    fn test_digits_glued_to_identifier_chars() {
        for source in ["12-3", "7?", "3!", "1_000", "-4x"] {
            match SExprScanner::new(source).scan_tokens() {
                Err(Error::ParseError(message)) => {
                    assert!(message.contains("Invalid integer literal"), "{}", message)
                }
                other => panic!("{} scanned to {:?}", source, other),
            }
        }
        // Separated by whitespace it is two literals
        assert_eq!(
            kinds("12 -3"),
            vec![
                TokenKind::Integer(12),
                TokenKind::Integer(-3),
                TokenKind::Eof
            ]
        );
        assert_eq!(kinds("(+ 1)")[3], TokenKind::RightParen);
    }

    #[test]
    fn test_prefix_before_error() {
        let (tokens, error) = SExprScanner::new("(+ 1 2) 12abc (x)").scan_prefix();
        assert!(matches!(error, Some(Error::ParseError(_))));
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[5].kind, TokenKind::Eof);

        let (tokens, error) = SExprScanner::new("x").scan_prefix();
        assert!(error.is_none());
        assert_eq!(tokens.len(), 2);
    }
}
