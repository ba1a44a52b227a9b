use std::fmt;

use super::Register;

/// Pseudo-assembly instruction operating on scratch registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `dst = value`
    Load {
        /// Register to load into.
        dst: Register,
        /// Number or identifier text.
        value: String,
    },
    /// `dst += src`
    AddAssign {
        /// Left-hand side and destination.
        dst: Register,
        /// Right-hand side.
        src: Register,
    },
    /// `dst *= src`
    MulAssign {
        /// Left-hand side and destination.
        dst: Register,
        /// Right-hand side.
        src: Register,
    },
}
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Load { dst, value } => write!(f, "{} = {}", dst, value),
            Self::AddAssign { dst, src } => write!(f, "{} += {}", dst, src),
            Self::MulAssign { dst, src } => write!(f, "{} *= {}", dst, src),
        }
    }
}
impl Instruction {
    /// Returns the register written by this instruction.
    pub fn dst(&self) -> Register {
        match self {
            Self::Load { dst, .. } | Self::AddAssign { dst, .. } | Self::MulAssign { dst, .. } => {
                *dst
            }
        }
    }
}
