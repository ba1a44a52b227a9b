//! Functions for tokenization.
//!
//! The lexer reads its input one physical line at a time and always holds at
//! most one token of lookahead. Tokens never span lines.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::fmt;
use std::io::{BufRead, Write};
use std::ops::Range;

use crate::errors::*;
use crate::Span;

/// A line consisting of exactly this text marks the end of the input.
pub const END_SENTINEL: &str = "end";

lazy_static! {
    /// A regex that skips leading whitespace and then matches one token:
    /// either a maximal run of letters and decimal digits, or any other single
    /// character.
    static ref TOKEN_PATTERN: Regex = Regex::new(r#"^\s*([\p{Alphabetic}\p{Nd}]+|\S)"#).unwrap();

    /// A regex that matches any number or identifier.
    static ref NUMBER_OR_IDENT_PATTERN: Regex = Regex::new(r#"^[\p{Alphabetic}\p{Nd}]+$"#).unwrap();
}

enum_with_str_repr! {
    /// Operator.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub enum OperatorToken {
        /// Addition.
        Plus = "+",
        /// Subtraction, which is lexed but not supported.
        Minus = "-",
        /// Multiplication.
        Asterisk = "*",
        /// Division, which is lexed but not supported.
        Slash = "/",
    }

    /// Punctuation.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub enum PunctuationToken {
        /// Statement terminator.
        Semicolon = ";",
        /// Left parenthesis.
        LParen = "(",
        /// Right parenthesis.
        RParen = ")",
    }
}

/// Classification of a token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The sentinel line, or the end of the underlying reader.
    EndOfInput,
    /// Semicolon or parenthesis.
    Punctuation(PunctuationToken),
    /// Arithmetic operator. Only `+` and `*` are part of the grammar.
    Operator(OperatorToken),
    /// Number or identifier; the lexer does not distinguish the two.
    NumberOrIdentifier,
    /// Any other single character.
    UnknownSymbol,
}
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EndOfInput => write!(f, "end of input"),
            Self::Punctuation(t) => write!(f, "punctuation '{}'", t),
            Self::Operator(t) => write!(f, "operator '{}'", t),
            Self::NumberOrIdentifier => write!(f, "number or identifier"),
            Self::UnknownSymbol => write!(f, "unknown symbol"),
        }
    }
}
impl From<OperatorToken> for TokenKind {
    fn from(op: OperatorToken) -> Self {
        Self::Operator(op)
    }
}
impl From<PunctuationToken> for TokenKind {
    fn from(p: PunctuationToken) -> Self {
        Self::Punctuation(p)
    }
}
impl TokenKind {
    /// `;`
    pub const SEMICOLON: Self = Self::Punctuation(PunctuationToken::Semicolon);
    /// `(`
    pub const LPAREN: Self = Self::Punctuation(PunctuationToken::LParen);
    /// `)`
    pub const RPAREN: Self = Self::Punctuation(PunctuationToken::RParen);
    /// `+`
    pub const PLUS: Self = Self::Operator(OperatorToken::Plus);
    /// `*`
    pub const TIMES: Self = Self::Operator(OperatorToken::Asterisk);

    /// Classifies a single token's text.
    fn classify(s: &str) -> Self {
        if let Ok(punctuation) = s.parse() {
            Self::Punctuation(punctuation)
        } else if let Ok(operator) = s.parse() {
            Self::Operator(operator)
        } else if NUMBER_OR_IDENT_PATTERN.is_match(s) {
            Self::NumberOrIdentifier
        } else {
            Self::UnknownSymbol
        }
    }

    /// Returns true if a token of this kind sitting where an operator is
    /// expected should be reported as an unknown or unsupported operator.
    pub fn is_unsupported_operator(self) -> bool {
        match self {
            Self::UnknownSymbol => true,
            Self::Operator(OperatorToken::Minus) | Self::Operator(OperatorToken::Slash) => true,
            _ => false,
        }
    }
}

/// A single token, along with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Classification of this token.
    pub kind: TokenKind,
    /// The exact source text of this token.
    pub text: String,
    /// 1-indexed number of the non-blank line on which this token starts.
    pub line: usize,
    /// Byte span of this token within its trimmed line.
    pub span: Span,
}
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Token: {}, Symbol: {}", self.kind, self.text)
    }
}

/// Line-buffered lexer with one token of lookahead.
#[derive(Debug)]
pub struct Lexer<R> {
    /// Source of input lines.
    input: R,
    /// Current line, trimmed of leading and trailing whitespace.
    line: String,
    /// Byte index of the first unscanned character in `line`.
    cursor: usize,
    /// Number of non-blank lines read so far, not counting the sentinel.
    line_number: usize,
    /// Next unconsumed token (None = not yet scanned).
    lookahead: Option<Token>,
    /// Whether the sentinel or the end of the reader has been reached.
    finished: bool,
}
impl<R: BufRead> Lexer<R> {
    /// Constructs a lexer reading lines from `input`.
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            cursor: 0,
            line_number: 0,
            lookahead: None,
            finished: false,
        }
    }
    /// Discards all state and starts reading from a new source.
    pub fn reset(&mut self, input: R) {
        *self = Self::new(input);
    }

    /// Returns the number of non-blank lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
    /// Returns the text of the current line that has not been scanned yet.
    pub fn remaining_line(&self) -> &str {
        &self.line[self.cursor..]
    }

    /// Returns the lookahead token without consuming it.
    pub fn peek(&mut self) -> LangResult<&Token> {
        let token = match self.lookahead.take() {
            Some(t) => t,
            None => self.scan()?,
        };
        Ok(self.lookahead.get_or_insert(token))
    }
    /// Consumes the lookahead token, scans the next one, and returns the
    /// consumed token.
    pub fn advance(&mut self) -> LangResult<Token> {
        self.peek()?;
        let next = self.scan()?;
        let consumed = self.lookahead.replace(next);
        Ok(consumed.unwrap_or_else(|| self.end_of_input()))
    }
    /// Returns true if the lookahead token is of the given kind.
    pub fn matches(&mut self, kind: impl Into<TokenKind>) -> LangResult<bool> {
        let kind = kind.into();
        Ok(self.peek()?.kind == kind)
    }
    /// Discards the rest of the current line, including the lookahead token.
    /// The next call to `peek()` resumes on the next line.
    pub fn clear_line(&mut self) {
        trace!(
            "Discarding rest of line {}: {:?}",
            self.line_number,
            self.remaining_line(),
        );
        self.cursor = self.line.len();
        self.lookahead = None;
    }

    /// Scans the next token, reading new lines as needed.
    fn scan(&mut self) -> LangResult<Token> {
        loop {
            if self.finished {
                return Ok(self.end_of_input());
            }
            let found = TOKEN_PATTERN
                .captures(&self.line[self.cursor..])
                .and_then(|captures| captures.get(1))
                .map(|m| Span::from(self.cursor + m.start()..self.cursor + m.end()));
            if let Some(span) = found {
                self.cursor = span.end;
                let text = &self.line[Range::from(span)];
                let token = Token {
                    kind: TokenKind::classify(text),
                    text: text.to_owned(),
                    line: self.line_number,
                    span,
                };
                trace!(
                    "Scanned {:?} at line {}, column {}",
                    token.text,
                    token.line,
                    span.column(&self.line),
                );
                return Ok(token);
            }
            self.read_line()?;
        }
    }
    /// Reads the next non-blank line into the line buffer, or marks the input
    /// as finished.
    fn read_line(&mut self) -> LangResult<()> {
        loop {
            self.line.clear();
            self.cursor = 0;
            if self.input.read_line(&mut self.line)? == 0 {
                debug!("Reader exhausted after line {}", self.line_number);
                self.finished = true;
                return Ok(());
            }

            let end = self.line.trim_end().len();
            self.line.truncate(end);
            let start = self.line.len() - self.line.trim_start().len();
            self.line.drain(..start);

            if self.line.is_empty() {
                continue;
            }
            if self.line == END_SENTINEL {
                debug!("End sentinel after line {}", self.line_number);
                self.line.clear();
                self.finished = true;
                return Ok(());
            }
            self.line_number += 1;
            debug!("Line {}: {}", self.line_number, self.line);
            return Ok(());
        }
    }
    fn end_of_input(&self) -> Token {
        Token {
            kind: TokenKind::EndOfInput,
            text: END_SENTINEL.to_owned(),
            line: self.line_number,
            span: Span::empty(0),
        }
    }

    /// Writes every token in the input to `out`, one per line. Each source
    /// line's tokens are preceded by a header with its line number and
    /// content, and followed by a blank line if more lines follow. Unknown
    /// symbols are reported as errors and the rest of their line is skipped.
    /// Returns the number of tokens written, not counting the end of input.
    pub fn dump_tokens(&mut self, out: &mut impl Write) -> LangResult<usize> {
        let mut count = 0;
        let mut last_line = None;
        loop {
            let token = self.peek()?.clone();
            if token.kind != TokenKind::EndOfInput && last_line != Some(token.line) {
                if last_line.is_some() {
                    writeln!(out)?;
                }
                // The lookahead always comes from the buffered line.
                writeln!(out, "Line number: {}, content: {}", token.line, self.line)?;
                last_line = Some(token.line);
            }

            match token.kind {
                TokenKind::EndOfInput => {
                    writeln!(out, "{}", token)?;
                    return Ok(count);
                }
                TokenKind::UnknownSymbol => {
                    let e = LangErrorMsg::UnexpectedSymbol(token.text).at_line(token.line);
                    writeln!(out, "{}", e)?;
                    self.clear_line();
                }
                _ => {
                    writeln!(out, "{}", token)?;
                    count += 1;
                    self.advance()?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexer(source: &str) -> Lexer<&[u8]> {
        Lexer::new(source.as_bytes())
    }

    /// Returns every token up to and including the end of input.
    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = lexer(source);
        let mut ret = vec![];
        loop {
            let token = lexer.advance().expect("Tokenization failed");
            let done = token.kind == TokenKind::EndOfInput;
            ret.push(token);
            if done {
                return ret;
            }
        }
    }

    fn texts(source: &str) -> Vec<String> {
        tokens(source).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenizer() {
        let tokens = tokens("3 + 4 * ( 5 + x );\nend\n");
        println!("{:?}", tokens);

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            vec![
                TokenKind::NumberOrIdentifier,
                TokenKind::PLUS,
                TokenKind::NumberOrIdentifier,
                TokenKind::TIMES,
                TokenKind::LPAREN,
                TokenKind::NumberOrIdentifier,
                TokenKind::PLUS,
                TokenKind::NumberOrIdentifier,
                TokenKind::RPAREN,
                TokenKind::SEMICOLON,
                TokenKind::EndOfInput,
            ],
            kinds,
        );
        assert_eq!("x", tokens[7].text);
        assert_eq!(Span::from(14..15), tokens[7].span);
        assert!(tokens.iter().all(|t| t.line == 1));
    }

    #[test]
    fn test_maximal_alphanumeric_run() {
        assert_eq!(vec!["abc123def", "+", "9", "end"], texts("abc123def+9"));
        // Non-ASCII letters and decimal digits are part of the same run.
        assert_eq!(
            vec!["\u{3b1}\u{3b2}1", "*", "\u{663}", "end"],
            texts("\u{3b1}\u{3b2}1*\u{663}"),
        );
    }

    #[test]
    fn test_unsupported_and_unknown_symbols() {
        let tokens = tokens("a - b / c $ d");
        assert_eq!(TokenKind::Operator(OperatorToken::Minus), tokens[1].kind);
        assert_eq!(TokenKind::Operator(OperatorToken::Slash), tokens[3].kind);
        assert_eq!(TokenKind::UnknownSymbol, tokens[5].kind);
        assert_eq!("$", tokens[5].text);
        // Scanning continues past the unknown symbol.
        assert_eq!("d", tokens[6].text);

        assert!(tokens[1].kind.is_unsupported_operator());
        assert!(tokens[3].kind.is_unsupported_operator());
        assert!(tokens[5].kind.is_unsupported_operator());
        assert!(!TokenKind::PLUS.is_unsupported_operator());
        assert!(!TokenKind::SEMICOLON.is_unsupported_operator());
    }

    #[test]
    fn test_blank_lines_and_line_numbers() {
        let tokens = tokens("\n   a\n\n \t \n  b ;  \n\nend\nc;\n");
        let lines: Vec<(&str, usize)> = tokens.iter().map(|t| (&*t.text, t.line)).collect();
        assert_eq!(vec![("a", 1), ("b", 2), (";", 2), ("end", 2)], lines);
    }

    #[test]
    fn test_sentinel_must_be_whole_line() {
        assert_eq!(vec!["x", "end", ";", "end"], texts("x end;\nend"));
        assert_eq!(vec!["endx", "end"], texts("endx\n  end  \n y"));
        let tokens = tokens("x end;\nend");
        assert_eq!(TokenKind::NumberOrIdentifier, tokens[1].kind);
        assert_eq!(TokenKind::EndOfInput, tokens[3].kind);
    }

    #[test]
    fn test_end_of_reader_is_end_of_input() {
        let mut lexer = lexer("a");
        assert_eq!("a", lexer.advance().unwrap().text);
        for _ in 0..3 {
            assert!(lexer.matches(TokenKind::EndOfInput).unwrap());
            lexer.advance().unwrap();
        }
        assert_eq!(1, lexer.line_number());
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut lexer = lexer("foo + bar\nend");
        let first = lexer.peek().unwrap().clone();
        assert_eq!(&first, lexer.peek().unwrap());
        assert!(lexer.matches(TokenKind::NumberOrIdentifier).unwrap());
        assert_eq!(first, lexer.advance().unwrap());
        assert!(lexer.matches(OperatorToken::Plus).unwrap());
    }

    #[test]
    fn test_clear_line() {
        let mut lexer = lexer("a b c\n\nd e\nend");
        assert_eq!("a", lexer.peek().unwrap().text);
        lexer.clear_line();
        assert_eq!("", lexer.remaining_line());
        let token = lexer.peek().unwrap().clone();
        assert_eq!(("d", 2), (&*token.text, token.line));
        assert_eq!(" e", lexer.remaining_line());

        // Clearing at the end of input stays at the end of input.
        lexer.clear_line();
        lexer.clear_line();
        assert!(lexer.matches(TokenKind::EndOfInput).unwrap());
        lexer.clear_line();
        assert!(lexer.matches(TokenKind::EndOfInput).unwrap());
    }

    #[test]
    fn test_reset() {
        let mut lexer = lexer("a\nb\nend");
        lexer.advance().unwrap();
        lexer.advance().unwrap();
        assert_eq!(2, lexer.line_number());
        lexer.reset("z;\nend".as_bytes());
        assert_eq!(0, lexer.line_number());
        assert_eq!("z", lexer.peek().unwrap().text);
        assert_eq!(1, lexer.line_number());
    }

    #[test]
    fn test_dump_tokens() {
        let mut out = vec![];
        let count = lexer("a + 1;\n\n  b $ c\n(d)\nend")
            .dump_tokens(&mut out)
            .unwrap();
        let expected = "\
Line number: 1, content: a + 1;
Token: number or identifier, Symbol: a
Token: operator '+', Symbol: +
Token: number or identifier, Symbol: 1
Token: punctuation ';', Symbol: ;

Line number: 2, content: b $ c
Token: number or identifier, Symbol: b
Line 2: unexpected symbol \"$\"

Line number: 3, content: (d)
Token: punctuation '(', Symbol: (
Token: number or identifier, Symbol: d
Token: punctuation ')', Symbol: )
Token: end of input, Symbol: end
";
        assert_eq!(expected, String::from_utf8(out).unwrap());
        assert_eq!(8, count);

        // Empty input lists only the end of input.
        let mut out = vec![];
        assert_eq!(0, lexer("\n\nend").dump_tokens(&mut out).unwrap());
        assert_eq!(
            "Token: end of input, Symbol: end\n",
            String::from_utf8(out).unwrap(),
        );
    }
}
