use super::token::{Token, TokenKind};

/// One-token-lookahead access to a token sequence.
///
/// This is everything the parser needs from a tokenizer. Once the stream is
/// exhausted both methods keep returning the `Eof` token.
pub trait TokenStream {
    /// Returns the current token without consuming it
    fn peek_token(&self) -> &Token;

    /// Consumes and returns the current token
    fn next_token(&mut self) -> Token;
}

/// A [`TokenStream`] over an already scanned token vector
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    current: usize,
}

impl TokenBuffer {
    /// Wraps scanned tokens. A trailing `Eof` is appended if missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof);
        if needs_eof {
            let (line, column) = tokens
                .last()
                .map(|t| (t.line, t.column + t.lexeme.chars().count()))
                .unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::Eof, String::new(), line, column));
        }
        TokenBuffer { tokens, current: 0 }
    }

    /// Number of tokens not yet consumed, excluding `Eof`
    pub fn remaining(&self) -> usize {
        self.tokens.len() - 1 - self.current
    }
}

impl TokenStream for TokenBuffer {
    fn peek_token(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn next_token(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, String::new(), 1, 1)
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let buffer = TokenBuffer::new(vec![tok(TokenKind::LeftParen), tok(TokenKind::Eof)]);
        assert_eq!(buffer.peek_token().kind, TokenKind::LeftParen);
        assert_eq!(buffer.peek_token().kind, TokenKind::LeftParen);
        assert_eq!(buffer.remaining(), 1);
    }

    #[test]
    fn test_next_stops_at_eof() {
        let mut buffer = TokenBuffer::new(vec![tok(TokenKind::Integer(1))]);
        assert_eq!(buffer.next_token().kind, TokenKind::Integer(1));
        assert_eq!(buffer.next_token().kind, TokenKind::Eof);
        assert_eq!(buffer.next_token().kind, TokenKind::Eof);
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn test_empty_gets_eof() {
        let buffer = TokenBuffer::new(Vec::new());
        assert_eq!(buffer.peek_token().kind, TokenKind::Eof);
    }
}
