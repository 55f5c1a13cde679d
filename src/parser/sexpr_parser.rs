use std::rc::Rc;

use super::ast::{Expression, Program};
use crate::error::{Error, Result};
use crate::lexer::{Keyword, Token, TokenBuffer, TokenKind, TokenStream};
use crate::stack::ensure_sufficient_stack;

/// Recursive-descent parser for yalig S-expressions
///
/// One token of lookahead, no backtracking. Each call to [`parse`](Self::parse)
/// consumes exactly one top-level form.
pub struct SExprParser<S = TokenBuffer> {
    tokens: S,
}

impl SExprParser<TokenBuffer> {
    /// Creates a parser over scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        SExprParser {
            tokens: TokenBuffer::new(tokens),
        }
    }
}

impl<S: TokenStream> SExprParser<S> {
    /// Creates a parser over any token stream
    pub fn from_stream(tokens: S) -> Self {
        SExprParser { tokens }
    }

    /// Parses the next top-level form.
    ///
    /// Returns `Ok(None)` once the token stream is exhausted.
    pub fn parse(&mut self) -> Result<Option<Expression>> {
        if self.is_at_end() {
            return Ok(None);
        }
        self.parse_expression().map(Some)
    }

    /// Parses every remaining form
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(Program { forms })
    }

    /// Gives back the underlying token stream
    pub fn into_inner(self) -> S {
        self.tokens
    }

    /// Parse an expression (the entry point for every child expression)
    fn parse_expression(&mut self) -> Result<Expression> {
        ensure_sufficient_stack(|| self.parse_expression_inner())
    }

    fn parse_expression_inner(&mut self) -> Result<Expression> {
        match self.peek().kind.clone() {
            TokenKind::LeftParen => self.parse_form(),
            TokenKind::Quote => self.parse_list_literal(),
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expression::Identifier(name))
            }
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expression::Number(n))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expression::StringLiteral(s))
            }
            TokenKind::Eof => Err(Error::UnexpectedEof {
                expected: "expression".to_string(),
            }),
            TokenKind::Keyword(kw) => Err(self.syntax_error(format!(
                "Keyword `{}` can only appear at the head of a form",
                kw.as_str()
            ))),
            other => Err(self.syntax_error(format!(
                "Unexpected token {} in expression",
                other.describe()
            ))),
        }
    }

    /// Parse a parenthesized form; the head token picks the rule
    fn parse_form(&mut self) -> Result<Expression> {
        self.consume(TokenKind::LeftParen)?;

        match self.peek().kind.clone() {
            TokenKind::Identifier(_) => self.parse_call(),
            TokenKind::Keyword(Keyword::Fn) => self.parse_func(),
            TokenKind::Keyword(Keyword::Def) => self.parse_def(),
            TokenKind::Keyword(Keyword::Defun) => self.parse_defun(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::Seq) => self.parse_seq(),
            TokenKind::Eof => Err(Error::UnexpectedEof {
                expected: "identifier or keyword after `(`".to_string(),
            }),
            other => Err(self.syntax_error(format!(
                "Unexpected form starting with {}. \
                 Expected an identifier or one of `fn`, `def`, `defun`, `if`, `seq`",
                other.describe()
            ))),
        }
    }

    /// Parse (callee args...)
    fn parse_call(&mut self) -> Result<Expression> {
        let callee = Box::new(self.parse_expression()?);
        let args = self.parse_until_close()?;
        Ok(Expression::Call { callee, args })
    }

    /// Parse (fn (params...) body)
    fn parse_func(&mut self) -> Result<Expression> {
        self.advance(); // consume 'fn'

        let params = self.parse_params()?;
        let body = Rc::new(self.parse_expression()?);
        self.consume(TokenKind::RightParen)?;

        Ok(Expression::Func { params, body })
    }

    /// Parse (def name binding)
    fn parse_def(&mut self) -> Result<Expression> {
        self.advance(); // consume 'def'

        let name = self.expect_identifier("name after `def`")?;
        let binding = Box::new(self.parse_expression()?);
        self.consume(TokenKind::RightParen)?;

        Ok(Expression::Def { name, binding })
    }

    /// Parse (defun name (params...) body) into (def name (fn (params...) body))
    fn parse_defun(&mut self) -> Result<Expression> {
        self.advance(); // consume 'defun'

        let name = self.expect_identifier("function name after `defun`")?;
        let params = self.parse_params()?;
        let body = Rc::new(self.parse_expression()?);
        self.consume(TokenKind::RightParen)?;

        Ok(Expression::Def {
            name,
            binding: Box::new(Expression::Func { params, body }),
        })
    }

    /// Parse (if antecedent consequent alternate)
    fn parse_if(&mut self) -> Result<Expression> {
        self.advance(); // consume 'if'

        let antecedent = Box::new(self.parse_expression()?);
        let consequent = Box::new(self.parse_expression()?);
        let alternate = Box::new(self.parse_expression()?);
        self.consume(TokenKind::RightParen)?;

        Ok(Expression::If {
            antecedent,
            consequent,
            alternate,
        })
    }

    /// Parse (seq exprs...)
    fn parse_seq(&mut self) -> Result<Expression> {
        self.advance(); // consume 'seq'
        Ok(Expression::Seq(self.parse_until_close()?))
    }

    /// Parse '(elements...)
    fn parse_list_literal(&mut self) -> Result<Expression> {
        self.consume(TokenKind::Quote)?;
        self.consume(TokenKind::LeftParen)?;
        Ok(Expression::List(self.parse_until_close()?))
    }

    /// Parse `(` identifier* `)`
    fn parse_params(&mut self) -> Result<Vec<String>> {
        self.consume(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        while !self.check(&TokenKind::RightParen) {
            params.push(self.expect_identifier("parameter name")?);
        }
        self.consume(TokenKind::RightParen)?;

        Ok(params)
    }

    /// Parse expressions up to and including the closing `)`
    fn parse_until_close(&mut self) -> Result<Vec<Expression>> {
        let mut exprs = Vec::new();
        while !self.check(&TokenKind::RightParen) {
            if self.is_at_end() {
                return Err(Error::UnexpectedEof {
                    expected: "`)`".to_string(),
                });
            }
            exprs.push(self.parse_expression()?);
        }
        self.consume(TokenKind::RightParen)?;
        Ok(exprs)
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        match self.peek().kind.clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            TokenKind::Eof => Err(Error::UnexpectedEof {
                expected: what.to_string(),
            }),
            other => {
                let token = self.peek();
                Err(Error::UnexpectedToken {
                    expected: what.to_string(),
                    got: other.describe(),
                    line: token.line,
                    col: token.column,
                })
            }
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        self.tokens.peek_token()
    }

    fn advance(&mut self) -> Token {
        self.tokens.next_token()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(&kind) {
            return Ok(self.advance());
        }

        let token = self.peek();
        if token.kind == TokenKind::Eof {
            return Err(Error::UnexpectedEof {
                expected: kind.describe(),
            });
        }
        Err(Error::UnexpectedToken {
            expected: kind.describe(),
            got: token.kind.describe(),
            line: token.line,
            col: token.column,
        })
    }

    fn syntax_error(&self, message: impl Into<String>) -> Error {
        let token = self.peek();
        Error::syntax(token.line, token.column, message)
    }
}
