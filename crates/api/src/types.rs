//! Identifiers shared between the scanner and its harness

use core::fmt;

/// Where a byte write was observed
///
/// Two program points are equal only when the calling context, the
/// instruction address and the address-space id all agree. The derived
/// ordering compares the fields in declaration order, which is the order
/// matches are reported in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramPoint {
    /// Return address of the innermost call frame
    pub caller: u64,
    /// Address of the writing instruction
    pub pc: u64,
    /// Execution-context (address-space) identifier
    pub context: u64,
}

impl ProgramPoint {
    /// Create a program point from its three components
    pub const fn new(caller: u64, pc: u64, context: u64) -> Self {
        Self {
            caller,
            pc,
            context,
        }
    }
}

impl From<(u64, u64, u64)> for ProgramPoint {
    fn from((caller, pc, context): (u64, u64, u64)) -> Self {
        Self::new(caller, pc, context)
    }
}

impl fmt::Display for ProgramPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x} {:016x} {:016x}", self.caller, self.pc, self.context)
    }
}
