//! Reader for the textual symbolic IR.
//!
//! ```text
//! $0 = const 1.0
//! $1 = symbol @pos
//! $2 = $0 + $1
//! $3 = - $2
//! $4 = assign $1 $3
//! ```
//!
//! Labels are names, not identities: each label gets the next identity the
//! first time it is mentioned, whether as a definition or an operand.

use super::lexer::{line_col, tokenize, Spanned, Token};
use crate::ir::*;
use crate::CompileError;
use std::collections::{HashMap, HashSet};

pub fn parse_ir(source: &str) -> Result<Ir, CompileError> {
    let tokens = tokenize(source)?;
    Parser::new(source, tokens).parse_program()
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Spanned>,
    pos: usize,
    ir: Ir,
    labels: HashMap<usize, StmtId>,
    defined: HashSet<usize>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Spanned>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            ir: Ir::new(),
            labels: HashMap::new(),
            defined: HashSet::new(),
        }
    }

    fn parse_program(mut self) -> Result<Ir, CompileError> {
        while let Some(tok) = self.peek() {
            match tok {
                Token::Newline | Token::Semicolon => self.pos += 1,
                _ => {
                    self.parse_stmt()?;
                    self.expect_terminator()?;
                }
            }
        }
        Ok(self.ir)
    }

    fn parse_stmt(&mut self) -> Result<(), CompileError> {
        let label = self.expect_ref()?;
        if self.defined.contains(&label) {
            return Err(self.error_at(self.pos - 1, format!("${label} is already defined")));
        }
        let id = self.resolve(label);
        self.expect(Token::Assign)?;

        let kind: StmtKind = match self.peek() {
            Some(Token::Const) | Some(Token::Literal) => {
                self.pos += 1;
                LiteralStmt { name: self.expect_name()? }.into()
            }
            Some(Token::Symbol) => {
                self.pos += 1;
                SymbolStmt { name: self.expect_name()? }.into()
            }
            Some(Token::AssignKw) => {
                self.pos += 1;
                let dst = self.expect_operand()?;
                let src = self.expect_operand()?;
                AssignStmt { dst, src }.into()
            }
            Some(Token::StmtRef(_)) => {
                let lhs = self.expect_operand()?;
                let op = self.expect_name()?;
                let rhs = self.expect_operand()?;
                BinaryOpStmt { op, lhs, rhs }.into()
            }
            Some(Token::Word(_)) => {
                let op = self.expect_name()?;
                let src = self.expect_operand()?;
                UnaryOpStmt { op, src }.into()
            }
            _ => return Err(self.unexpected("a statement body")),
        };

        self.defined.insert(label);
        self.ir.push_clone(&Stmt { id, kind });
        Ok(())
    }

    // ── Label resolution ────────────────────────────────────────────────

    fn resolve(&mut self, label: usize) -> StmtId {
        if let Some(&id) = self.labels.get(&label) {
            return id;
        }
        let id = self.ir.reserve_id();
        self.labels.insert(label, id);
        id
    }

    // ── Token helpers ───────────────────────────────────────────────────

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t, _)| t)
    }

    fn expect(&mut self, expected: Token) -> Result<(), CompileError> {
        match self.peek() {
            Some(t) if *t == expected => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.unexpected(&format!("{expected}"))),
        }
    }

    fn expect_ref(&mut self) -> Result<usize, CompileError> {
        match self.peek() {
            Some(Token::StmtRef(n)) => {
                let n = *n;
                self.pos += 1;
                Ok(n)
            }
            _ => Err(self.unexpected("a statement reference")),
        }
    }

    fn expect_operand(&mut self) -> Result<StmtId, CompileError> {
        let label = self.expect_ref()?;
        Ok(self.resolve(label))
    }

    /// A name is taken verbatim from the source, keywords included.
    fn expect_name(&mut self) -> Result<String, CompileError> {
        match self.tokens.get(self.pos) {
            Some((
                start,
                Token::Word(_) | Token::Const | Token::Literal | Token::Symbol | Token::AssignKw,
                end,
            )) => {
                let name = self.source[*start..*end].to_string();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    fn expect_terminator(&mut self) -> Result<(), CompileError> {
        match self.peek() {
            None => Ok(()),
            Some(Token::Newline) | Some(Token::Semicolon) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.unexpected("end of statement")),
        }
    }

    // ── Errors ──────────────────────────────────────────────────────────

    fn unexpected(&self, expected: &str) -> CompileError {
        let found = match self.peek() {
            Some(t) => t.to_string(),
            None => "end of input".to_string(),
        };
        self.error_at(self.pos, format!("expected {expected}, found {found}"))
    }

    fn error_at(&self, index: usize, message: String) -> CompileError {
        let offset = self
            .tokens
            .get(index)
            .map(|(start, _, _)| *start)
            .unwrap_or(self.source.len());
        let (line, col) = line_col(self.source, offset);
        CompileError::Parse { line, col, message }
    }
}
