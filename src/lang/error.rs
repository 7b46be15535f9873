pub type Position = (usize, usize);

/// Every signal the interpreter can raise, from cosmetic notes to
/// internal bugs. `ErrorCode` picks the base message and the severity
/// class; line/char decoration is optional.
pub struct Error {
    code: ErrorCode,
    position: Option<Position>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr, $col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at(($line, $col))
    };
    ($err:ident, $line:expr, $col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at(($line, $col))
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            position: None,
            message: String::new(),
        }
    }

    pub fn at(mut self, position: Position) -> Error {
        debug_assert!(self.position.is_none());
        self.position = Some(position);
        self
    }

    pub fn message<S: Into<String>>(mut self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        self.message = message.into();
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() >= Severity::Fatal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ZeroDivision,
    StackUnderflow,
    StackOverflow,
    RecursionLimit,
    Overflow,
    TypeMismatch,
    UnterminatedString,
    CharAtEof,
    UndefinedToken,
    UnmatchedBrace,
    BadNumber,
    Io,
    JunkProgram,
    JumpIntoLiteral,
    LiteralCollision,
    BadIndex,
}

/// Ordered by consequence. Anything at `Fatal` or above halts the
/// current program; `InternalBug` marks contract violations that point
/// at a defect in the interpreter rather than the interpreted program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    TypeWarning,
    ParseWarning,
    RuntimeWarning,
    Fatal,
    InternalBug,
}

impl ErrorCode {
    pub fn severity(self) -> Severity {
        use ErrorCode::*;
        match self {
            TypeMismatch => Severity::TypeWarning,
            UnterminatedString | CharAtEof | UndefinedToken | UnmatchedBrace | BadNumber => {
                Severity::ParseWarning
            }
            Io | JunkProgram => Severity::RuntimeWarning,
            ZeroDivision | StackUnderflow | StackOverflow | RecursionLimit | Overflow => {
                Severity::Fatal
            }
            JumpIntoLiteral | LiteralCollision | BadIndex => Severity::InternalBug,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::TypeWarning => "type warning",
            Severity::ParseWarning => "parse warning",
            Severity::RuntimeWarning => "runtime warning",
            Severity::Fatal => "fatal",
            Severity::InternalBug => "internal bug",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let base = match self.code {
            ZeroDivision => "attempted to perform division or modulo by zero",
            StackUnderflow => "stack underflow: not enough operands on stack",
            StackOverflow => "stack overflow: stack size exceeded memory",
            RecursionLimit => "call stack exceeded maximum recursion depth",
            Overflow => "integer arithmetic overflowed",
            TypeMismatch => "undefined operator for operand types",
            UnterminatedString => "found EOF before closing quote",
            CharAtEof => "found EOF before character for literal",
            UndefinedToken => "undefined token",
            UnmatchedBrace => "found EOF before matching brace",
            BadNumber => "junk numeral",
            Io => "could not reach the i/o stream",
            JunkProgram => "tried to exec junk",
            JumpIntoLiteral => "the parser tried to jump inside a literal",
            LiteralCollision => "literal already recorded at this index",
            BadIndex => "junk stack index",
        };
        write!(f, "{}", base)?;
        if let Some((line, col)) = self.position {
            write!(f, " at char {}, line {}", col, line)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
