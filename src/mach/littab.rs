use super::Address;
use crate::error;
use crate::lang::Error;
use std::collections::BTreeMap;
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

/// ## Literal position bookkeeping
///
/// Append-only map from a literal's starting token index to the
/// half-open range of the buffer it occupies. There is no deletion:
/// literals, once scanned, permanently occupy their source positions
/// for the lifetime of one execution.

#[derive(Debug, Default)]
pub struct LiteralTable {
    ranges: BTreeMap<Address, Range<Address>>,
}

impl LiteralTable {
    pub fn new() -> LiteralTable {
        LiteralTable::default()
    }

    /// Record a scanned literal. Recording the same start index twice
    /// means the scanner ran twice over one position, which is a bug
    /// in the interpreter, never a recoverable user error.
    pub fn record(&mut self, start: Address, range: Range<Address>) -> Result<()> {
        if self.ranges.contains_key(&start) {
            return Err(error!(LiteralCollision; format!(
                "cannot record literal #{} at {:?}: literal exists",
                start, range
            )));
        }
        self.ranges.insert(start, range);
        Ok(())
    }

    /// Whether `target` falls strictly inside any recorded range.
    pub fn contains(&self, target: Address) -> bool {
        self.ranges
            .values()
            .any(|r| target > r.start && target < r.end)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn spans(&self) -> impl Iterator<Item = &Range<Address>> {
        self.ranges.values()
    }
}
