//! Grammar productions with each right-recursive tail collapsed into a loop.
//!
//! Calling `add_expression` recursively while the lookahead is `+` is the same
//! as looping over `'+' term` until it isn't; likewise for `*` and `factor`.

use std::io::{BufRead, Write};

use super::Parser;
use crate::errors::LangResult;
use crate::lexer::TokenKind;

impl<'a, R: BufRead, W: Write> Parser<'a, R, W> {
    pub(super) fn expression_iterative(&mut self) -> LangResult<()> {
        self.term_iterative()?;
        while self.lexer.matches(TokenKind::PLUS)? {
            self.lexer.advance()?;
            self.term_iterative()?;
        }
        Ok(())
    }

    fn term_iterative(&mut self) -> LangResult<()> {
        self.factor()?;
        while self.lexer.matches(TokenKind::TIMES)? {
            self.lexer.advance()?;
            self.factor()?;
        }
        Ok(())
    }
}
