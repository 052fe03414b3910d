//! Parser for netlists.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use super::MAX_NODES;
use crate::error::{NetworkError, Result};

/// Parser for netlists.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                // Skip empty lines
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier | TokenKind::Number => {
                    let resistor = self.parse_resistor()?;
                    ast.resistors.push(resistor);
                }
                TokenKind::Eof => break,
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Consume the newline ending a statement (or accept EOF).
    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(NetworkError::parse(
                self.current.line,
                format!("unexpected token: {:?}", self.current.text),
            )),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(NetworkError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// Parse a non-negative integer no greater than `max`.
    fn expect_bounded(&mut self, what: &str, max: usize) -> Result<usize> {
        let tok = self.expect(TokenKind::Number)?;
        let value = tok.text.parse::<usize>().map_err(|_| {
            NetworkError::parse(tok.line, format!("invalid {}: {}", what, tok.text))
        })?;
        if value > max {
            return Err(NetworkError::parse(
                tok.line,
                format!("{} {} exceeds the limit of {}", what, value, max),
            ));
        }
        Ok(value)
    }

    /// Parse a node index.
    fn expect_node(&mut self) -> Result<usize> {
        self.expect_bounded("node reference", MAX_NODES - 1)
    }

    fn parse_directive(&mut self, ast: &mut NetlistAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".nodes" => {
                if ast.node_count.is_some() {
                    return Err(NetworkError::parse(line, "duplicate .nodes directive"));
                }
                ast.node_count = Some(self.expect_bounded("node count", MAX_NODES)?);
            }
            ".measure" => {
                if ast.measure.is_some() {
                    return Err(NetworkError::parse(line, "duplicate .measure directive"));
                }
                let source = self.expect_node()?;
                let sink = self.expect_node()?;
                ast.measure = Some(Measure { source, sink, line });
            }
            _ => {
                return Err(NetworkError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_resistor(&mut self) -> Result<ResistorDef> {
        let line = self.current.line;

        let name = if self.current.kind == TokenKind::Identifier {
            let name = self.current.text.clone();
            if !name.to_uppercase().starts_with('R') {
                return Err(NetworkError::parse(
                    line,
                    format!("unknown element '{}' (only resistors are supported)", name),
                ));
            }
            self.advance()?;
            Some(name)
        } else {
            None
        };

        let a = self.expect_node()?;
        let b = self.expect_node()?;

        let value_tok = self.expect(TokenKind::Number)?;
        let value = parse_value(&value_tok.text).ok_or_else(|| {
            NetworkError::parse(line, format!("invalid resistance: {}", value_tok.text))
        })?;

        Ok(ResistorDef {
            name,
            nodes: [a, b],
            value,
            line,
        })
    }
}
