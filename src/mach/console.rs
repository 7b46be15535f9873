use std::io;

/// Blocking input seam between the machine and whatever terminal is
/// driving it. Every read blocks the interpreter until input arrives;
/// nothing here is cancellable.
pub trait Console {
    /// One line of input, newline stripped.
    fn line(&mut self) -> io::Result<String>;

    /// Exactly `n` keypresses.
    fn exact(&mut self, n: usize) -> io::Result<String>;

    /// Keypresses up to and including `stop`.
    fn until(&mut self, stop: char) -> io::Result<String>;
}
