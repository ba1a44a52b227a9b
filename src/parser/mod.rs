//! Recognizer for `;`-terminated arithmetic statements.
//!
//! ```text
//! statements  -> statement statements | <empty>
//! statement   -> expression ';'
//! expression  -> term ( '+' term )*
//! term        -> factor ( '*' factor )*
//! factor      -> NUMBER_OR_IDENTIFIER | '(' expression ')'
//! ```
//!
//! The parser does not build a tree; it only reports whether each statement
//! is legal, along with diagnostics for the ones that aren't.

use log::{debug, info};
use std::io::{BufRead, Write};

mod iterative;
mod recursive;
pub(crate) mod recovery;

use crate::errors::*;
use crate::lexer::{Lexer, TokenKind};

enum_with_str_repr! {
    /// Control-flow shape used for the `expression` and `term` productions.
    /// Both shapes accept the same language and produce the same output.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub enum ParserStyle {
        /// Each repeated tail is its own mutually recursive production.
        Recursive = "recursive",
        /// Each repeated tail is a loop.
        Iterative = "iterative",
    }
}
impl Default for ParserStyle {
    fn default() -> Self {
        Self::Recursive
    }
}

/// Number of legal and illegal statements seen by one parse.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ParseSummary {
    /// Number of legal statements.
    pub legal: usize,
    /// Number of illegal statements.
    pub illegal: usize,
}
impl ParseSummary {
    /// Returns the total number of statements.
    pub fn total(self) -> usize {
        self.legal + self.illegal
    }
}

/// Recursive-descent recognizer that writes verdicts and diagnostics to `out`.
#[derive(Debug)]
pub struct Parser<'a, R, W> {
    /// The lexer to tokenize text in the input.
    lexer: &'a mut Lexer<R>,
    /// Destination for verdicts and diagnostics.
    out: W,
    style: ParserStyle,
    /// Whether the current statement is still legal.
    is_legal_statement: bool,
    summary: ParseSummary,
}
impl<'a, R: BufRead, W: Write> Parser<'a, R, W> {
    /// Constructs a parser reading tokens from `lexer`.
    pub fn new(lexer: &'a mut Lexer<R>, out: W, style: ParserStyle) -> Self {
        Self {
            lexer,
            out,
            style,
            is_legal_statement: true,
            summary: ParseSummary::default(),
        }
    }

    /// Parses statements until the end of input.
    ///
    /// Malformed statements are reported and skipped; only I/O errors are
    /// returned.
    pub fn statements(&mut self) -> LangResult<ParseSummary> {
        while !self.lexer.matches(TokenKind::EndOfInput)? {
            self.statement()?;
        }
        info!(
            "Parsed {} statements ({} legal, {} illegal) using {} descent",
            self.summary.total(),
            self.summary.legal,
            self.summary.illegal,
            self.style,
        );
        Ok(self.summary)
    }

    /// Parses a single statement and writes its verdict.
    fn statement(&mut self) -> LangResult<()> {
        self.is_legal_statement = true;

        match self.expression() {
            Ok(()) => {
                if let Some(e) = recovery::end_statement(self.lexer)? {
                    self.report(e)?;
                }
            }
            Err(e) if !e.is_fatal() => {
                self.report(e)?;
                recovery::skip_statement(self.lexer);
            }
            Err(e) => return Err(e),
        }

        if self.is_legal_statement {
            self.summary.legal += 1;
            writeln!(self.out, "The statement is legal")?;
        } else {
            self.summary.illegal += 1;
            writeln!(self.out, "The statement is illegal")?;
        }
        Ok(())
    }

    fn expression(&mut self) -> LangResult<()> {
        match self.style {
            ParserStyle::Recursive => self.expression_recursive(),
            ParserStyle::Iterative => self.expression_iterative(),
        }
    }

    /// Parses a factor.
    ///
    /// factor -> NUMBER_OR_IDENTIFIER | ( expression )
    fn factor(&mut self) -> LangResult<()> {
        if self.lexer.matches(TokenKind::NumberOrIdentifier)? {
            self.lexer.advance()?;
        } else if self.lexer.matches(TokenKind::LPAREN)? {
            self.lexer.advance()?;
            self.expression()?;
            if let Some(e) = recovery::expect_rparen(self.lexer)? {
                self.report(e)?;
            }
        } else {
            return Err(recovery::unexpected_symbol(self.lexer)?);
        }
        Ok(())
    }

    /// Marks the current statement illegal and writes a diagnostic.
    fn report(&mut self, e: LangError) -> LangResult<()> {
        debug!("Illegal statement: {}", e);
        self.is_legal_statement = false;
        writeln!(self.out, "{}", e)?;
        Ok(())
    }
}
