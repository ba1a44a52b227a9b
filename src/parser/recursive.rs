//! Grammar productions written as mutual recursion, one function per
//! production:
//!
//! ```text
//! expression              -> term add_expression
//! add_expression          -> '+' term add_expression | <empty>
//! term                    -> factor sub_multiplication_term
//! sub_multiplication_term -> '*' factor sub_multiplication_term | <empty>
//! ```

use std::io::{BufRead, Write};

use super::Parser;
use crate::errors::LangResult;
use crate::lexer::TokenKind;

impl<'a, R: BufRead, W: Write> Parser<'a, R, W> {
    pub(super) fn expression_recursive(&mut self) -> LangResult<()> {
        self.term_recursive()?;
        self.add_expression()
    }

    fn add_expression(&mut self) -> LangResult<()> {
        if self.lexer.matches(TokenKind::PLUS)? {
            self.lexer.advance()?;
            self.term_recursive()?;
            self.add_expression()
        } else {
            // Empty production.
            Ok(())
        }
    }

    fn term_recursive(&mut self) -> LangResult<()> {
        self.factor()?;
        self.sub_multiplication_term()
    }

    fn sub_multiplication_term(&mut self) -> LangResult<()> {
        if self.lexer.matches(TokenKind::TIMES)? {
            self.lexer.advance()?;
            self.factor()?;
            self.sub_multiplication_term()
        } else {
            Ok(())
        }
    }
}
