//! Fixed pool of scratch registers allocated in stack order.

use log::trace;
use std::fmt;

use crate::errors::LangErrorMsg;

/// Number of scratch registers available when not otherwise configured.
pub const DEFAULT_REGISTER_COUNT: usize = 8;

/// A scratch register, named `t0`, `t1`, etc.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(pub usize);
impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Stack of scratch registers.
///
/// `allocate()` always returns the lowest unused register and `free()`
/// always releases the most recently allocated one, so the registers in use
/// are exactly `t0` through `t{depth - 1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterStack {
    capacity: usize,
    /// Index of the next register to allocate.
    pointer: usize,
    /// Highest value `pointer` has reached.
    peak: usize,
    allocations: usize,
    frees: usize,
}
impl Default for RegisterStack {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTER_COUNT)
    }
}
impl RegisterStack {
    /// Constructs an empty stack of `capacity` registers.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            pointer: 0,
            peak: 0,
            allocations: 0,
            frees: 0,
        }
    }

    /// Allocates the lowest unused register, or returns
    /// `ExpressionTooComplicated` if all of them are in use.
    pub fn allocate(&mut self) -> Result<Register, LangErrorMsg> {
        if self.pointer >= self.capacity {
            return Err(LangErrorMsg::ExpressionTooComplicated);
        }
        let reg = Register(self.pointer);
        self.pointer += 1;
        self.peak = std::cmp::max(self.peak, self.pointer);
        self.allocations += 1;
        trace!("Allocated {}", reg);
        Ok(reg)
    }
    /// Frees the most recently allocated register, or returns
    /// `StackUnderflow` if none are allocated.
    pub fn free(&mut self) -> Result<(), LangErrorMsg> {
        if self.pointer == 0 {
            return Err(LangErrorMsg::StackUnderflow);
        }
        self.pointer -= 1;
        self.frees += 1;
        trace!("Freed {}", Register(self.pointer));
        Ok(())
    }

    /// Returns the total number of registers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// Returns the number of registers currently allocated.
    pub fn depth(&self) -> usize {
        self.pointer
    }
    /// Returns the largest number of registers that were ever allocated at
    /// once.
    pub fn peak(&self) -> usize {
        self.peak
    }
    /// Returns the number of successful calls to `allocate()`.
    pub fn allocations(&self) -> usize {
        self.allocations
    }
    /// Returns the number of successful calls to `free()`.
    pub fn frees(&self) -> usize {
        self.frees
    }
}
