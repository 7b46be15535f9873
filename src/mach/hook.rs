use super::littab::LiteralTable;
use super::Address;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Guarded program counter
///
/// Two observable states per dispatch cycle: sequential (nothing
/// assigned, the loop applies its default +1 advance) and jumped (an
/// explicit assignment repositioned the counter, so the loop must not
/// advance again). Every explicit assignment consults the literal
/// table first; landing strictly inside a scanned literal would
/// desynchronize the scanner, so it fails as an interpreter bug.

#[derive(Debug, Default)]
pub struct Hook {
    value: Address,
    jumped: bool,
}

impl Hook {
    pub fn new() -> Hook {
        Hook::default()
    }

    pub fn get(&self) -> Address {
        self.value
    }

    pub fn jumped(&self) -> bool {
        self.jumped
    }

    /// Start a dispatch cycle: forget any jump from the previous one.
    pub fn reset(&mut self) {
        self.jumped = false;
    }

    /// The default advance, applied only when nothing jumped this
    /// cycle.
    pub fn step(&mut self) {
        self.value += 1;
    }

    /// Explicit assignment: goto, brace matching and literal-scan
    /// advancement all come through here.
    pub fn jump(&mut self, target: Address, table: &LiteralTable) -> Result<()> {
        if table.contains(target) {
            return Err(error!(JumpIntoLiteral; format!("target {}", target)));
        }
        self.value = target;
        self.jumped = true;
        Ok(())
    }
}
