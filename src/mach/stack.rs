use super::operation::Operation;
use super::val::Val;
use crate::error;
use crate::lang::{Error, Log, Severity};
use std::io::Write;

type Result<T> = std::result::Result<T, Error>;

/// ## Size-limited operand stack
///
/// Multi-item pops are atomic: they either fully succeed or leave the
/// stack unchanged and signal `StackUnderflow`. Positional operations
/// accept negative indices counting from the top (`-1` inserts just
/// before the top); an index that cannot be resolved is an internal
/// bug, not a user error.

pub struct Stack {
    vec: Vec<Val>,
    log: Log,
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl Stack {
    pub fn new(log: Log) -> Stack {
        Stack { vec: vec![], log }
    }

    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }

    fn overflow_check(&self) -> Result<()> {
        if self.vec.len() > self.max_len() {
            Err(error!(StackOverflow))
        } else {
            Ok(())
        }
    }

    fn underflow_error(&self) -> Error {
        error!(StackUnderflow)
    }

    /// Resolve a possibly-negative index against the current length.
    /// `len` itself is only valid when `inserting`.
    fn resolve(&self, index: isize, inserting: bool) -> Result<usize> {
        let len = self.vec.len() as isize;
        let pos = if index < 0 { len + index } else { index };
        let limit = if inserting { len } else { len - 1 };
        if pos < 0 || pos > limit {
            Err(error!(BadIndex; format!("index {} in a stack of {}", index, len)))
        } else {
            Ok(pos as usize)
        }
    }

    pub fn items(&self) -> &[Val] {
        &self.vec
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Empty the stack and hand back the old contents.
    pub fn clean(&mut self) -> Vec<Val> {
        std::mem::take(&mut self.vec)
    }

    /// Swap the full contents of two stacks in one step.
    pub fn trade(&mut self, other: &mut Stack) {
        std::mem::swap(&mut self.vec, &mut other.vec);
    }

    pub fn push(&mut self, val: Val) -> Result<()> {
        self.vec.push(val);
        self.overflow_check()
    }

    pub fn push_all<I: IntoIterator<Item = Val>>(&mut self, vals: I) -> Result<()> {
        for val in vals {
            self.push(val)?;
        }
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Val> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }

    /// Non-signaling pop for operands the caller treats as optional.
    pub fn pop_or_empty(&mut self) -> Val {
        self.vec.pop().unwrap_or(Val::Empty)
    }

    /// Both operands of a binary operator: `(second-popped, first-popped)`.
    pub fn pop_2(&mut self) -> Result<(Val, Val)> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error());
        }
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }

    /// Pop `len` values in last-in-first-out order.
    pub fn pop_n(&mut self, len: usize) -> Result<Vec<Val>> {
        if len > self.vec.len() {
            Err(self.underflow_error())
        } else {
            let range = (self.vec.len() - len)..;
            let mut vals: Vec<Val> = self.vec.drain(range).collect();
            vals.reverse();
            Ok(vals)
        }
    }

    pub fn copy(&self) -> Result<Val> {
        match self.vec.last() {
            Some(v) => Ok(v.clone()),
            None => Err(self.underflow_error()),
        }
    }

    /// The top `len` values in stack order, without dropping them.
    pub fn copy_n(&self, len: usize) -> Result<Vec<Val>> {
        if len > self.vec.len() {
            Err(self.underflow_error())
        } else {
            Ok(self.vec[self.vec.len() - len..].to_vec())
        }
    }

    /// The `n`th value counting from the top, 1-indexed.
    pub fn index(&self, n: usize) -> Result<Val> {
        if n == 0 || n > self.vec.len() {
            return Err(self.underflow_error());
        }
        Ok(self.vec[self.vec.len() - n].clone())
    }

    pub fn insert(&mut self, item: Val, index: isize) -> Result<()> {
        let pos = self.resolve(index, true)?;
        self.vec.insert(pos, item);
        self.overflow_check()
    }

    pub fn insert_n<I: IntoIterator<Item = Val>>(&mut self, items: I, index: isize) -> Result<()> {
        let mut pos = self.resolve(index, true)? as isize;
        for item in items {
            self.insert(item, pos)?;
            pos += 1;
        }
        Ok(())
    }

    /// Delete and return the value at `index`.
    pub fn remove(&mut self, index: isize) -> Result<Val> {
        let pos = self.resolve(index, false)?;
        Ok(self.vec.remove(pos))
    }

    // begin math operators

    fn apply(&mut self, operator: fn(Val, Val) -> Result<Val>) -> Result<()> {
        let (lhs, rhs) = self.pop_2()?;
        match operator(lhs, rhs) {
            Ok(v) => self.push(v),
            Err(e) if e.severity() < Severity::Fatal => {
                self.log.warn(&e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn add(&mut self) -> Result<()> {
        self.apply(Operation::sum)
    }

    /// `( z y x -- z x-y )` for numbers. For two strings, removes up
    /// to `z` occurrences of the top string from the second, or all of
    /// them when no numeric count is below.
    pub fn sub(&mut self) -> Result<()> {
        let (lhs, rhs) = self.pop_2()?;
        if let (Val::Str(hay), Val::Str(needle)) = (&lhs, &rhs) {
            let count = self.pop_or_empty();
            return self.push(Operation::subtract_strings(hay, needle, &count));
        }
        match Operation::subtract(lhs, rhs) {
            Ok(v) => self.push(v),
            Err(e) if e.severity() < Severity::Fatal => {
                self.log.warn(&e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn mlt(&mut self) -> Result<()> {
        self.apply(Operation::multiply)
    }

    /// `( y x -- x%y x/y )`: remainder below, quotient on top, or
    /// neither on a zero divisor.
    pub fn dmd(&mut self) -> Result<()> {
        let (lhs, rhs) = self.pop_2()?;
        match Operation::divmod(lhs, rhs) {
            Ok((rem, quot)) => {
                self.push(rem)?;
                self.push(quot)
            }
            Err(e) if e.severity() < Severity::Fatal => {
                self.log.warn(&e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn flr(&mut self) -> Result<()> {
        self.apply(Operation::floor_divide)
    }

    pub fn lss(&mut self) -> Result<()> {
        self.apply(Operation::less)
    }

    pub fn gtr(&mut self) -> Result<()> {
        self.apply(Operation::greater)
    }

    pub fn equ(&mut self) -> Result<()> {
        self.apply(Operation::equal)
    }

    pub fn neg(&mut self) -> Result<()> {
        let val = self.pop()?;
        match Operation::negate(val) {
            Ok(v) => self.push(v),
            Err(e) if e.severity() < Severity::Fatal => {
                self.log.warn(&e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    // here ends math and begins the type-agnostic shuffle words

    pub fn dup(&mut self) -> Result<()> {
        let top = self.copy()?;
        self.push(top)
    }

    /// Copy the top `n` values, preserving their order.
    pub fn dup_n(&mut self, n: usize) -> Result<()> {
        let vals = self.copy_n(n)?;
        self.push_all(vals)
    }

    pub fn swap(&mut self) -> Result<()> {
        let (one, two) = self.pop_2()?;
        self.push(two)?;
        self.push(one)
    }

    /// `( a b c -- c a b )` on the top three.
    pub fn rot(&mut self) -> Result<()> {
        if self.vec.len() < 3 {
            return Err(self.underflow_error());
        }
        let top = self.pop()?;
        self.insert(top, -2)
    }

    /// `( a b c -- b c a )` on the top three; inverse of [`Stack::rot`].
    pub fn urot(&mut self) -> Result<()> {
        if self.vec.len() < 3 {
            return Err(self.underflow_error());
        }
        let third = self.remove(-3)?;
        self.push(third)
    }

    /// Rotate the whole stack up: the bottom value becomes the top.
    pub fn roll(&mut self) -> Result<()> {
        if self.vec.is_empty() {
            return Err(self.underflow_error());
        }
        let bottom = self.remove(0)?;
        self.push(bottom)
    }

    pub fn roll_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.roll()?;
        }
        Ok(())
    }

    /// Rotate the whole stack down: the top value becomes the bottom.
    pub fn uroll(&mut self) -> Result<()> {
        let top = self.pop()?;
        self.insert(top, 0)
    }

    pub fn uroll_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.uroll()?;
        }
        Ok(())
    }

    pub fn drop(&mut self) -> Result<()> {
        self.pop().map(|_| ())
    }

    pub fn drop_n(&mut self, n: usize) -> Result<()> {
        self.pop_n(n).map(|_| ())
    }

    pub fn over(&mut self) -> Result<()> {
        let second = self.index(2)?;
        self.push(second)
    }

    pub fn nip(&mut self) -> Result<()> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error());
        }
        self.remove(-2).map(|_| ())
    }

    pub fn tuck(&mut self) -> Result<()> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error());
        }
        let top = self.copy()?;
        self.insert(top, -2)
    }

    // i/o

    /// `( x -- )` pop and print the display form of the top value.
    pub fn put(&mut self, out: &mut dyn Write) -> Result<()> {
        let val = self.pop()?;
        if write!(out, "{}", val).and_then(|_| out.flush()).is_err() {
            self.log.warn(&error!(Io; "put"));
        }
        Ok(())
    }

    /// `( x -- )` pop a codepoint and print its character.
    pub fn emit(&mut self, out: &mut dyn Write) -> Result<()> {
        let val = self.pop()?;
        let code = match val.as_int() {
            Some(n) if n >= 0 && n <= u32::max_value() as i64 => std::char::from_u32(n as u32),
            _ => None,
        };
        match code {
            Some(c) => {
                if write!(out, "{}", c).and_then(|_| out.flush()).is_err() {
                    self.log.warn(&error!(Io; "emit"));
                }
            }
            None => self
                .log
                .warn(&error!(TypeMismatch; format!("{:?} is not a valid UTF-8 codepoint", val))),
        }
        Ok(())
    }

    /// Print the whole stack, pleasantly.
    pub fn reveal(&self, out: &mut dyn Write) -> Result<()> {
        let peek = self
            .vec
            .iter()
            .map(|v| format!("{:?}", v))
            .collect::<Vec<_>>()
            .join(", ");
        if write!(out, "<{}> {}", self.vec.len(), peek)
            .and_then(|_| out.flush())
            .is_err()
        {
            self.log.warn(&error!(Io; "reveal"));
        }
        Ok(())
    }
}
