use mouse::lang::Log;
use mouse::mach::{Console, Mouse, Val};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

/// Canned input standing in for the terminal.
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    keys: VecDeque<char>,
}

impl ScriptedConsole {
    pub fn new() -> ScriptedConsole {
        ScriptedConsole {
            lines: VecDeque::new(),
            keys: VecDeque::new(),
        }
    }

    pub fn with_lines(lines: &[&str]) -> ScriptedConsole {
        let mut console = ScriptedConsole::new();
        console.lines = lines.iter().map(|s| s.to_string()).collect();
        console
    }

    pub fn with_keys(keys: &str) -> ScriptedConsole {
        let mut console = ScriptedConsole::new();
        console.keys = keys.chars().collect();
        console
    }
}

fn out_of_input() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "out of scripted input")
}

impl Console for ScriptedConsole {
    fn line(&mut self) -> io::Result<String> {
        self.lines.pop_front().ok_or_else(out_of_input)
    }

    fn exact(&mut self, n: usize) -> io::Result<String> {
        let mut collected = String::new();
        for _ in 0..n {
            match self.keys.pop_front() {
                Some(c) => collected.push(c),
                None => return Err(out_of_input()),
            }
        }
        Ok(collected)
    }

    fn until(&mut self, stop: char) -> io::Result<String> {
        let mut collected = String::new();
        loop {
            match self.keys.pop_front() {
                Some(c) => {
                    collected.push(c);
                    if c == stop {
                        return Ok(collected);
                    }
                }
                None => return Err(out_of_input()),
            }
        }
    }
}

/// Shared byte sink standing in for stdout.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn new() -> Capture {
        Capture::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A machine wired to scripted input and captured output.
pub struct Runner {
    pub mouse: Mouse,
    out: Capture,
}

impl Runner {
    pub fn new() -> Runner {
        Runner::with_console(ScriptedConsole::new())
    }

    pub fn with_console(console: ScriptedConsole) -> Runner {
        let out = Capture::new();
        let log = Log {
            silent: true,
            ..Log::default()
        };
        let mouse = Mouse::new(log, Box::new(console), Box::new(out.clone()));
        Runner { mouse, out }
    }

    pub fn output(&self) -> String {
        self.out.contents()
    }

    pub fn stack_items(&self) -> Vec<Val> {
        self.mouse.stack().items().to_vec()
    }
}

/// Run a program that is expected to succeed.
pub fn run(source: &str) -> Runner {
    let mut runner = Runner::new();
    runner
        .mouse
        .execute_str(source)
        .expect("program should run");
    runner
}
