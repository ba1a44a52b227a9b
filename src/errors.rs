//! Error reporting for the lexer, parser, and code generator.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::io;

/// `Result` type alias for diagnostics and fatal errors.
pub type LangResult<T> = Result<T, LangError>;

/// Exit status used for I/O failures and bad command-line arguments.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status used when an expression needs more registers than exist.
pub const EXIT_TOO_COMPLICATED: i32 = 2;
/// Exit status used when the register stack underflows.
pub const EXIT_STACK_UNDERFLOW: i32 = 3;

/// An error message attached to the line on which it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangError {
    /// 1-indexed line number, if known.
    pub line: Option<usize>,
    /// The error itself.
    pub msg: LangErrorMsg,
}
impl fmt::Display for LangError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.msg),
            None => write!(f, "{}", self.msg),
        }
    }
}
impl Error for LangError {}
impl LangError {
    /// Returns true if this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        self.msg.is_fatal()
    }
}

/// Every kind of error that can occur while scanning, parsing, or generating
/// code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LangErrorMsg {
    // Recoverable errors
    /// A well-formed expression was not followed by `;`.
    MissingSemicolon,
    /// A token that cannot start a factor.
    UnexpectedSymbol(String),
    /// An unknown symbol, `-`, or `/` where an operator was expected.
    UnknownOperator(String),
    /// A parenthesized expression was not followed by `)`.
    UnmatchedParenthesis,

    // Fatal errors
    /// An expression needs more scratch registers than exist.
    ExpressionTooComplicated,
    /// A register was freed when none were allocated.
    StackUnderflow,
    /// The input could not be read or the output could not be written.
    Io(Cow<'static, str>),
}
impl From<io::Error> for LangErrorMsg {
    fn from(error: io::Error) -> Self {
        Self::Io(error.to_string().into())
    }
}
impl fmt::Display for LangErrorMsg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingSemicolon => write!(f, "missing \";\""),
            Self::UnexpectedSymbol(s) => write!(f, "unexpected symbol \"{}\"", s),
            Self::UnknownOperator(s) => write!(f, "unknown or unsupported operator \"{}\"", s),
            Self::UnmatchedParenthesis => write!(f, "missing \")\""),

            Self::ExpressionTooComplicated => write!(f, "the expression is too complicated"),
            Self::StackUnderflow => write!(f, "internal error: register stack underflow"),
            Self::Io(s) => write!(f, "I/O error: {}", s),
        }
    }
}
impl LangErrorMsg {
    /// Attaches a line number to this message.
    pub fn at_line(self, line: usize) -> LangError {
        LangError {
            line: Some(line),
            msg: self,
        }
    }
    /// Wraps this message without a line number.
    pub fn without_line(self) -> LangError {
        LangError {
            line: None,
            msg: self,
        }
    }

    /// Returns true if this error cannot be recovered from by discarding the
    /// rest of a statement.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::MissingSemicolon
            | Self::UnexpectedSymbol(_)
            | Self::UnknownOperator(_)
            | Self::UnmatchedParenthesis => false,
            Self::ExpressionTooComplicated | Self::StackUnderflow | Self::Io(_) => true,
        }
    }

    /// Returns the process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExpressionTooComplicated => EXIT_TOO_COMPLICATED,
            Self::StackUnderflow => EXIT_STACK_UNDERFLOW,
            _ => EXIT_FAILURE,
        }
    }
}

impl From<io::Error> for LangError {
    fn from(error: io::Error) -> Self {
        LangErrorMsg::from(error).without_line()
    }
}
