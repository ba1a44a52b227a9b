//! Error recovery rules shared by the parser and the code generator.
//!
//! Errors inside an expression abort the rest of that expression, and the
//! rest of the line it was found on is discarded. A missing `)` is the only
//! error that parsing continues past.

use std::io::BufRead;

use crate::errors::*;
use crate::lexer::{Lexer, TokenKind};

/// Returns an `UnexpectedSymbol` error for the lookahead token.
pub(crate) fn unexpected_symbol<R: BufRead>(lexer: &mut Lexer<R>) -> LangResult<LangError> {
    let token = lexer.peek()?;
    Ok(LangErrorMsg::UnexpectedSymbol(token.text.clone()).at_line(token.line))
}

/// Consumes a `)` closing a parenthesized expression.
///
/// Returns `Ok(Some(_))` with a recoverable diagnostic if the `)` is missing,
/// in which case parsing continues as if it were present. An unknown or
/// unsupported operator in its place aborts the expression instead.
pub(crate) fn expect_rparen<R: BufRead>(lexer: &mut Lexer<R>) -> LangResult<Option<LangError>> {
    let token = lexer.peek()?.clone();
    if token.kind == TokenKind::RPAREN {
        lexer.advance()?;
        Ok(None)
    } else if token.kind.is_unsupported_operator() {
        Err(LangErrorMsg::UnknownOperator(token.text).at_line(token.line))
    } else {
        Ok(Some(LangErrorMsg::UnmatchedParenthesis.at_line(token.line)))
    }
}

/// Consumes the `;` at the end of a statement whose expression was well
/// formed. If it is missing, discards the rest of the line and returns the
/// diagnostic.
pub(crate) fn end_statement<R: BufRead>(lexer: &mut Lexer<R>) -> LangResult<Option<LangError>> {
    let token = lexer.peek()?.clone();
    if token.kind == TokenKind::SEMICOLON {
        lexer.advance()?;
        return Ok(None);
    }
    let msg = if token.kind.is_unsupported_operator() {
        LangErrorMsg::UnknownOperator(token.text)
    } else {
        LangErrorMsg::MissingSemicolon
    };
    lexer.clear_line();
    Ok(Some(msg.at_line(token.line)))
}

/// Skips the rest of a statement whose expression was aborted by discarding
/// the rest of the current line, including the lookahead.
pub(crate) fn skip_statement<R: BufRead>(lexer: &mut Lexer<R>) {
    lexer.clear_line();
}
