use proptest::prelude::*;

use super::*;
use crate::compiler::CodeGenerator;
use crate::{LangErrorMsg, Lexer, TokenKind};

/// Strategy producing well-formed expressions.
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof!["[a-z][a-z0-9]{0,3}", "[0-9]{1,3}"];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} + {}", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{}*{}", a, b)),
            inner.prop_map(|a| format!("( {} )", a)),
        ]
    })
}

/// Strategy producing source code made of well-formed statements, several to
/// a line.
fn legal_source() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(prop::collection::vec(expression(), 1..4), 0..5).prop_map(|lines| {
        let count: usize = lines.iter().map(Vec::len).sum();
        let source = lines
            .iter()
            .map(|line| line.iter().map(|expr| format!("{};", expr)).join(" "))
            .join("\n");
        (format!("{}\nend\n", source), count)
    })
}

/// Strategy producing arbitrary token soup, including blank lines, unknown
/// symbols, and unsupported operators.
fn arbitrary_source() -> impl Strategy<Value = String> {
    let token = "[-+*/();$]|[a-z0-9]{1,3}";
    let line = prop::collection::vec(token, 0..10).prop_map(|tokens| tokens.join(" "));
    prop::collection::vec(line, 0..6).prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// Tests that both parser styles produce identical output.
    #[test]
    fn test_parser_styles_agree(source_code in arbitrary_source()) {
        let (recursive, recursive_summary) = parse_output(&source_code, ParserStyle::Recursive);
        let (iterative, iterative_summary) = parse_output(&source_code, ParserStyle::Iterative);
        prop_assert_eq!(recursive, iterative);
        prop_assert_eq!(recursive_summary, iterative_summary);
    }

    /// Tests that well-formed statements are all legal and generate code
    /// without any diagnostics.
    #[test]
    fn test_legal_statements((source_code, count) in legal_source()) {
        for &style in ParserStyle::ALL {
            let (output, summary) = parse_output(&source_code, style);
            prop_assert_eq!(ParseSummary { legal: count, illegal: 0 }, summary);
            prop_assert_eq!("The statement is legal\n".repeat(count), output);
        }

        let (output, result) = generate_output(&source_code, 8);
        prop_assert!(result.is_ok());
        prop_assert!(!output.contains("Line"));
    }

    /// Tests that every register allocated is freed, and that the destination
    /// register is only ever written by loads and by folding in other
    /// registers.
    #[test]
    fn test_register_balance(source_code in arbitrary_source()) {
        let mut lexer = Lexer::new(source_code.as_bytes());
        let config = CompilerConfig::default();
        let mut generator = CodeGenerator::new(&mut lexer, vec![], &config);
        let instructions = match generator.statements() {
            Ok(instructions) => instructions,
            // Deeply nested soup can legitimately run out of registers.
            Err(e) => {
                prop_assert_eq!(LangErrorMsg::ExpressionTooComplicated, e.msg);
                return Ok(());
            }
        };
        let registers = generator.registers();
        prop_assert_eq!(0, registers.depth());
        prop_assert_eq!(registers.allocations(), registers.frees());
        for instruction in instructions {
            if let Instruction::AddAssign { dst, src } | Instruction::MulAssign { dst, src } = instruction {
                prop_assert!(dst < src);
            }
        }
    }

    /// Tests that peeking twice returns the same token.
    #[test]
    fn test_peek_is_idempotent(source_code in arbitrary_source()) {
        let mut lexer = Lexer::new(source_code.as_bytes());
        loop {
            let first = lexer.peek().unwrap().clone();
            prop_assert_eq!(&first, lexer.peek().unwrap());
            prop_assert!(lexer.matches(first.kind).unwrap());
            if first.kind == TokenKind::EndOfInput {
                break;
            }
            prop_assert_eq!(first, lexer.advance().unwrap());
        }
    }
}
