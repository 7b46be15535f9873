extern crate mortal;

use mortal::{Event, Key, PrepareConfig, Terminal};
use std::io::{self, Write};

/// Raw single-keypress reads backing the exact/until input operators.
/// The terminal is prepared per call and restored before returning;
/// keys are echoed as they arrive, like the cooked reads elsewhere.

fn read_keys<F: FnMut(&str, char) -> bool>(mut done: F) -> io::Result<String> {
    let term = Terminal::new()?;
    let state = term.prepare(PrepareConfig::default())?;
    let mut collected = String::new();
    let result = loop {
        match term.read_event(None) {
            Err(err) => break Err(err),
            Ok(Some(Event::Key(key))) => {
                let c = match key {
                    Key::Char(c) => c,
                    Key::Enter => '\n',
                    Key::Tab => '\t',
                    Key::Ctrl(c) => ((c as u8) & 0x1f) as char,
                    _ => continue,
                };
                print!("{}", c);
                let _ = io::stdout().flush();
                collected.push(c);
                if done(&collected, c) {
                    break Ok(());
                }
            }
            Ok(_) => continue,
        }
    };
    term.restore(state)?;
    result.map(|_| collected)
}

/// Get exactly `count` chars of stdin.
pub fn exact(count: usize) -> io::Result<String> {
    if count == 0 {
        return Ok(String::new());
    }
    read_keys(|collected, _| collected.chars().count() >= count)
}

/// Get chars of stdin until `stop` is read; `stop` is included.
pub fn until(stop: char) -> io::Result<String> {
    read_keys(|_, c| c == stop)
}
