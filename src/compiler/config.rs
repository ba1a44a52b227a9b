use super::DEFAULT_REGISTER_COUNT;
use crate::parser::ParserStyle;

/// Toolchain configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Number of scratch registers available to the code generator.
    pub register_count: usize,
    /// Control-flow shape used by the parser.
    pub parser_style: ParserStyle,
}
impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            register_count: DEFAULT_REGISTER_COUNT,
            parser_style: ParserStyle::default(),
        }
    }
}
