//! A miniature arithmetic-expression toolchain: a line-buffered lexer, a
//! recursive-descent recognizer, and a register-stack code generator for
//! `;`-terminated statements built from numbers, identifiers, `+`, `*`, and
//! parentheses.
#![warn(missing_docs)]

use std::io::{BufRead, Write};

#[macro_use]
mod utils;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod parser;
mod span;

pub use compiler::{CodeGenerator, CompilerConfig, Instruction, Register, RegisterStack};
pub use errors::{LangError, LangErrorMsg, LangResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseSummary, Parser, ParserStyle};
pub use span::Span;

enum_with_str_repr! {
    /// What to do with the input.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub enum Mode {
        /// Report whether each statement is legal.
        Parse = "parse",
        /// Emit pseudo-assembly for each statement.
        Generate = "generate",
        /// List every token.
        Tokens = "tokens",
    }
}
impl Default for Mode {
    fn default() -> Self {
        Self::Generate
    }
}

/// Reports whether each statement in `input` is legal, writing verdicts and
/// diagnostics to `out`.
pub fn parse(
    input: impl BufRead,
    out: impl Write,
    config: &CompilerConfig,
) -> LangResult<ParseSummary> {
    let mut lexer = Lexer::new(input);
    let mut parser = Parser::new(&mut lexer, out, config.parser_style);
    parser.statements()
}

/// Generates code for each statement in `input`, writing instructions and
/// diagnostics to `out`.
pub fn generate(
    input: impl BufRead,
    out: impl Write,
    config: &CompilerConfig,
) -> LangResult<Vec<Instruction>> {
    let mut lexer = Lexer::new(input);
    let mut generator = CodeGenerator::new(&mut lexer, out, config);
    generator.statements()
}

/// Writes every token in `input` to `out`. Returns the number of tokens.
pub fn dump_tokens(input: impl BufRead, mut out: impl Write) -> LangResult<usize> {
    Lexer::new(input).dump_tokens(&mut out)
}

/// Runs the given mode over `input`.
pub fn run(
    mode: Mode,
    input: impl BufRead,
    mut out: impl Write,
    config: &CompilerConfig,
) -> LangResult<()> {
    match mode {
        Mode::Parse => {
            parse(input, &mut out, config)?;
        }
        Mode::Generate => {
            generate(input, &mut out, config)?;
        }
        Mode::Tokens => {
            dump_tokens(input, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests;
