use super::{Error, Severity};
use ansi_term::{Colour, Style};
use chrono::Local;

/// ## Warning and trace sink
///
/// Non-fatal signals are printed here and execution carries on; fatal
/// signals travel as `Result` errors and only pass through this sink
/// when the caller reports them.

#[derive(Debug, Clone, Copy, Default)]
pub struct Log {
    pub silent: bool,
    pub verbose: bool,
    pub trace: bool,
}

impl Log {
    pub fn warn(&self, error: &Error) {
        if self.silent {
            return;
        }
        let style = match error.severity() {
            Severity::Info => Style::new().dimmed(),
            Severity::TypeWarning | Severity::RuntimeWarning => Colour::Yellow.normal(),
            Severity::ParseWarning => Colour::Purple.normal(),
            Severity::Fatal | Severity::InternalBug => Colour::Red.bold(),
        };
        eprintln!(
            "{}",
            style.paint(format!("{}: {}", error.severity(), error))
        );
    }

    pub fn info(&self, message: &str) {
        if self.silent || !self.verbose {
            return;
        }
        eprintln!("{}", Style::new().dimmed().paint(message.to_string()));
    }

    pub fn trace(&self, message: &str) {
        if !self.trace {
            return;
        }
        eprintln!(
            "{} {}",
            Style::new()
                .dimmed()
                .paint(Local::now().format("%H:%M:%S%.3f").to_string()),
            message
        );
    }
}
