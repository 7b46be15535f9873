extern crate ansi_term;
extern crate linefeed;

mod keys;

use crate::lang::Log;
use crate::mach::{Console, Mouse};
use ansi_term::Style;
use linefeed::{Interface, ReadResult, Signal};
use std::fs;
use std::io::{self, Write};
use std::process::exit;

/// Run-time options gathered by the command line front end.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub files: Vec<String>,
    pub silent: bool,
    pub verbose: bool,
    pub trace: bool,
}

/// The real console: cooked line reads, raw keypress reads.
pub struct StdConsole;

impl Console for StdConsole {
    fn line(&mut self) -> io::Result<String> {
        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(buf)
    }

    fn exact(&mut self, n: usize) -> io::Result<String> {
        keys::exact(n)
    }

    fn until(&mut self, stop: char) -> io::Result<String> {
        keys::until(stop)
    }
}

pub fn main(config: Config) {
    let log = Log {
        silent: config.silent,
        verbose: config.verbose,
        trace: config.trace,
    };
    let mut mouse = Mouse::new(log, Box::new(StdConsole), Box::new(io::stdout()));

    if config.files.is_empty() {
        if let Err(error) = repl(&mut mouse, log) {
            eprintln!("{}", error);
        }
        return;
    }

    // a single script that cannot be found falls back to the typewriter
    if config.files.len() == 1 && fs::metadata(&config.files[0]).is_err() {
        eprintln!(
            "stat: cannot stat '{}': no such file or directory, interpreting using stdio instead\n",
            config.files[0]
        );
        if let Err(error) = repl(&mut mouse, log) {
            eprintln!("{}", error);
        }
        exit(2);
    }

    for filename in &config.files {
        let source = match fs::read_to_string(filename) {
            Ok(source) => source,
            Err(error) => {
                eprintln!("stat: cannot stat '{}': {}", filename, error);
                continue;
            }
        };
        mouse.set_from_file(true);
        mouse.set_filename(filename.as_str());
        if let Err(error) = mouse.execute_str(&source) {
            eprintln!(
                "{}",
                Style::new()
                    .bold()
                    .paint(format!("{}: {}", error.severity(), error))
            );
            exit(4);
        }
    }
}

fn repl(mouse: &mut Mouse, log: Log) -> io::Result<()> {
    println!(
        "mouse16 {}\nrun \"mouse16 --help\" in your shell for help\n\n        mouse16 interpreter",
        env!("CARGO_PKG_VERSION")
    );
    let interface = Interface::new("mouse16")?;
    interface.set_report_signal(Signal::Interrupt, true);
    let mut shellnum: usize = 0;
    loop {
        interface.set_prompt(&format!("\n mouse  {} )  ", shellnum))?;
        match interface.read_line()? {
            ReadResult::Input(line) => {
                shellnum += 1;
                if !line.trim().is_empty() {
                    interface.add_history_unique(line.clone());
                }
                if let Err(error) = mouse.execute_str(&line) {
                    // fatal errors end the program, not the session
                    log.warn(&error);
                }
                io::stdout().flush()?;
            }
            ReadResult::Signal(Signal::Interrupt) => {
                interface.set_buffer("")?;
                println!("\naborted (EOF to exit)");
            }
            ReadResult::Signal(_) => {}
            ReadResult::Eof => {
                println!("\nbye\n");
                break;
            }
        }
    }
    Ok(())
}
