//! Black-box test suite for the parser and code generator.

use itertools::Itertools;

mod properties;

use crate::{CompilerConfig, Instruction, LangResult, ParseSummary, ParserStyle};

/// Parses the given source code with one parser style and returns everything
/// written to the output.
fn parse_output(source_code: &str, style: ParserStyle) -> (String, ParseSummary) {
    let config = CompilerConfig {
        parser_style: style,
        ..CompilerConfig::default()
    };
    let mut out = vec![];
    let summary = crate::parse(source_code.as_bytes(), &mut out, &config)
        .unwrap_or_else(|e| panic!("Parsing failed: {}\n\n{}", e, source_code));
    (String::from_utf8(out).unwrap(), summary)
}

/// Parses the given source code with both parser styles, checks that they
/// agree, and returns the output.
fn assert_parse(expected: &str, source_code: &str) -> ParseSummary {
    let (recursive, summary) = parse_output(source_code, ParserStyle::Recursive);
    let (iterative, iterative_summary) = parse_output(source_code, ParserStyle::Iterative);
    assert_eq!(recursive, iterative, "\n\nSource code:\n{}\n\n", source_code);
    assert_eq!(summary, iterative_summary);
    assert_eq!(expected, recursive, "\n\nSource code:\n{}\n\n", source_code);
    summary
}

/// Generates code for the given source code using the given number of
/// registers and returns everything written to the output along with the
/// result.
fn generate_output(
    source_code: &str,
    register_count: usize,
) -> (String, LangResult<Vec<Instruction>>) {
    let config = CompilerConfig {
        register_count,
        ..CompilerConfig::default()
    };
    let mut out = vec![];
    let result = crate::generate(source_code.as_bytes(), &mut out, &config);
    (String::from_utf8(out).unwrap(), result)
}

/// Generates code for the given source code, checks that generation
/// succeeded, and compares the output against the given lines.
fn assert_generate(expected_lines: &[&str], source_code: &str) -> Vec<Instruction> {
    let (output, result) = generate_output(source_code, crate::compiler::DEFAULT_REGISTER_COUNT);
    let instructions = result.unwrap_or_else(|e| panic!("Generation failed: {}", e));
    assert_eq!(
        expected_lines.iter().map(|line| format!("{}\n", line)).join(""),
        output,
        "\n\nSource code:\n{}\n\n",
        source_code,
    );
    instructions
}

/// Returns an expression of the form `1 + (1 + (... + (1)))` with `depth`
/// nested additions.
fn nested_sum(depth: usize) -> String {
    (0..depth).fold("1".to_owned(), |inner, _| format!("1 + ({})", inner))
}
