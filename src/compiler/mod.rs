//! Code generation for `;`-terminated arithmetic statements.
//!
//! The generator walks the same grammar as the parser, passing each
//! production the register its value should end up in. Every operator's
//! right-hand side gets a fresh register, which is freed as soon as its value
//! has been folded into the left-hand side, so the number of live registers
//! is bounded by the nesting depth of the expression and not by its size.

use log::{debug, info, trace};
use std::io::{BufRead, Write};

mod config;
mod instruction;
mod registers;

pub use config::CompilerConfig;
pub use instruction::Instruction;
pub use registers::{Register, RegisterStack, DEFAULT_REGISTER_COUNT};

use crate::errors::*;
use crate::lexer::{Lexer, TokenKind};
use crate::parser::recovery;

/// Code generator that writes instructions and diagnostics to `out`.
#[derive(Debug)]
pub struct CodeGenerator<'a, R, W> {
    /// The lexer to tokenize text in the input.
    lexer: &'a mut Lexer<R>,
    /// Destination for instructions and diagnostics.
    out: W,
    registers: RegisterStack,
    /// Instructions emitted so far.
    instructions: Vec<Instruction>,
}
impl<'a, R: BufRead, W: Write> CodeGenerator<'a, R, W> {
    /// Constructs a code generator reading tokens from `lexer`.
    pub fn new(lexer: &'a mut Lexer<R>, out: W, config: &CompilerConfig) -> Self {
        Self {
            lexer,
            out,
            registers: RegisterStack::new(config.register_count),
            instructions: vec![],
        }
    }
    /// Returns the register stack.
    pub fn registers(&self) -> &RegisterStack {
        &self.registers
    }

    /// Generates code for statements until the end of input and returns the
    /// instructions emitted.
    ///
    /// Malformed statements are reported and skipped. Running out of
    /// registers, register stack underflow, and I/O errors are returned.
    pub fn statements(&mut self) -> LangResult<Vec<Instruction>> {
        let dst = self.allocate()?;
        while !self.lexer.matches(TokenKind::EndOfInput)? {
            self.statement(dst)?;
        }
        self.free()?;

        info!(
            "Generated {} instructions using at most {} of {} registers",
            self.instructions.len(),
            self.registers.peak(),
            self.registers.capacity(),
        );
        Ok(std::mem::take(&mut self.instructions))
    }

    fn statement(&mut self, dst: Register) -> LangResult<()> {
        match self.expression(dst) {
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
        Ok(())
    }

    /// Generates code for an expression, leaving its value in `dst`.
    ///
    /// expression -> term ( + term )*
    fn expression(&mut self, dst: Register) -> LangResult<()> {
        self.term(dst)?;
        while self.lexer.matches(TokenKind::PLUS)? {
            self.lexer.advance()?;
            let src = self.allocate()?;
            let result = self.term(src);
            self.free()?;
            result?;
            self.emit(Instruction::AddAssign { dst, src })?;
        }
        Ok(())
    }

    /// Generates code for a term, leaving its value in `dst`.
    ///
    /// term -> factor ( * factor )*
    fn term(&mut self, dst: Register) -> LangResult<()> {
        self.factor(dst)?;
        while self.lexer.matches(TokenKind::TIMES)? {
            self.lexer.advance()?;
            let src = self.allocate()?;
            let result = self.factor(src);
            self.free()?;
            result?;
            self.emit(Instruction::MulAssign { dst, src })?;
        }
        Ok(())
    }

    /// Generates code for a factor, leaving its value in `dst`.
    ///
    /// factor -> NUMBER_OR_IDENTIFIER | ( expression )
    fn factor(&mut self, dst: Register) -> LangResult<()> {
        if self.lexer.matches(TokenKind::NumberOrIdentifier)? {
            let value = self.lexer.peek()?.text.clone();
            self.emit(Instruction::Load { dst, value })?;
            self.lexer.advance()?;
        } else if self.lexer.matches(TokenKind::LPAREN)? {
            self.lexer.advance()?;
            self.expression(dst)?;
            if let Some(e) = recovery::expect_rparen(self.lexer)? {
                self.report(e)?;
            }
        } else {
            return Err(recovery::unexpected_symbol(self.lexer)?);
        }
        Ok(())
    }

    fn allocate(&mut self) -> LangResult<Register> {
        let line = self.lexer.line_number();
        self.registers.allocate().map_err(|msg| msg.at_line(line))
    }
    fn free(&mut self) -> LangResult<()> {
        let line = self.lexer.line_number();
        self.registers.free().map_err(|msg| msg.at_line(line))
    }

    fn emit(&mut self, instruction: Instruction) -> LangResult<()> {
        trace!("Emitting {}", instruction);
        writeln!(self.out, "{}", instruction)?;
        self.instructions.push(instruction);
        Ok(())
    }
    fn report(&mut self, e: LangError) -> LangResult<()> {
        debug!("Skipping statement: {}", e);
        writeln!(self.out, "{}", e)?;
        Ok(())
    }
}
