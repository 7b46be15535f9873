use super::console::Console;
use super::hook::Hook;
use super::littab::LiteralTable;
use super::op::Op;
use super::stack::Stack;
use super::val::Val;
use super::Address;
use crate::error;
use crate::lang::{Error, Log, Position};
use std::collections::BTreeMap;
use std::io::Write;

type Result<T> = std::result::Result<T, Error>;

/// Sub-program nesting cap for the run-string operator.
const MAX_DEPTH: usize = 128;

/// ## The parser + runner
///
/// Owns the two operand stacks, the operator table and the output
/// sink. Each call to [`Mouse::execute`] allocates a fresh program
/// counter and literal table, so nested sub-programs share data only
/// through the stacks.
///
/// A `Mouse` is single-threaded and blocking; it is not safe to share
/// one across threads without external synchronization.

pub struct Mouse {
    stack: Stack,
    retstk: Stack,
    ops: BTreeMap<char, Op>,
    log: Log,
    console: Box<dyn Console>,
    out: Box<dyn Write>,
    from_file: bool,
    filename: String,
    depth: usize,
}

impl Mouse {
    pub fn new(log: Log, console: Box<dyn Console>, out: Box<dyn Write>) -> Mouse {
        Mouse {
            stack: Stack::new(log),
            retstk: Stack::new(log),
            ops: Mouse::default_table(),
            log,
            console,
            out,
            from_file: false,
            filename: String::from("stdin (typewriter)"),
            depth: 0,
        }
    }

    fn default_table() -> BTreeMap<char, Op> {
        let mut table = BTreeMap::new();
        // quiet tokens: ^D, line endings, blanks
        table.insert('\u{4}', Op::Nop);
        table.insert('\n', Op::Nop);
        table.insert('\r', Op::Nop);
        table.insert(' ', Op::Nop);
        table.insert('"', Op::StrLit);
        table.insert('\'', Op::CharLit);
        // control structs, double sided
        table.insert('[', Op::If);
        table.insert(']', Op::Fi);
        table.insert('(', Op::While);
        table.insert(')', Op::Elihw);
        table.insert('{', Op::QuotOpen);
        table.insert('}', Op::QuotClose);
        table.insert('\\', Op::Goto);
        // misc/other operators
        table.insert('_', Op::Neg);
        table.insert('+', Op::Add);
        table.insert('-', Op::Sub);
        table.insert('*', Op::Mlt);
        table.insert('/', Op::Dmd);
        table.insert('>', Op::Gtr);
        table.insert('<', Op::Lss);
        table.insert('=', Op::Equ);
        table.insert('?', Op::Get);
        table.insert(',', Op::Emit);
        table.insert('!', Op::Put);
        table.insert('@', Op::Rot);
        table.insert('$', Op::Dup);
        table.insert('%', Op::Swap);
        table.insert('^', Op::Over);
        table.insert('&', Op::Roll);
        table.insert(';', Op::Reveal);
        table.insert('`', Op::RunString);
        table.insert('~', Op::Trade);
        table.insert(':', Op::ToAlt);
        table.insert('|', Op::FromAlt);
        table.insert('#', Op::Help);
        table
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    pub fn secondary(&self) -> &Stack {
        &self.retstk
    }

    pub fn set_from_file(&mut self, from_file: bool) {
        self.from_file = from_file;
    }

    pub fn set_filename<S: Into<String>>(&mut self, filename: S) {
        self.filename = filename.into();
    }

    /// Rebind a token. Returns whatever the token was bound to before.
    pub fn bind(&mut self, token: char, op: Op) -> Option<Op> {
        self.ops.insert(token, op)
    }

    /// The current string delimiter: whichever token is bound to the
    /// string-scan operation.
    pub fn string_delim(&self) -> Option<char> {
        self.ops
            .iter()
            .find(|(_, op)| **op == Op::StrLit)
            .map(|(tok, _)| *tok)
    }

    /// Run a pre-split token sequence. The stacks persist across
    /// calls; the program counter and literal table do not.
    pub fn execute(&mut self, tokens: &[char]) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(error!(RecursionLimit));
        }
        self.depth += 1;
        let result = self.run(tokens);
        self.depth -= 1;
        result
    }

    pub fn execute_str(&mut self, source: &str) -> Result<()> {
        let tokens: Vec<char> = source.chars().collect();
        self.execute(&tokens)
    }

    fn run(&mut self, tokens: &[char]) -> Result<()> {
        let mut hook = Hook::new();
        let mut table = LiteralTable::new();
        loop {
            hook.reset();
            let tok = match tokens.get(hook.get()) {
                Some(&t) => t,
                None => {
                    if self.from_file && !self.stack.is_empty() {
                        self.stack.put(&mut self.out)?;
                    }
                    break;
                }
            };
            if self.log.trace {
                self.log
                    .trace(&format!("#{} {:?} <{}>", hook.get(), tok, self.stack.len()));
            }
            if tok.is_ascii_digit() || tok == '.' {
                self.scan_number(tokens, &mut hook, &mut table)?;
                continue;
            }
            match self.ops.get(&tok) {
                Some(&op) => self.apply(op, tok, tokens, &mut hook, &mut table)?,
                None => {
                    let (line, col) = position(tokens, hook.get());
                    self.log.warn(&error!(UndefinedToken, line, col; format!(
                        "file {}: ignoring token {:?} which needs a definition before it can be used",
                        self.filename, tok
                    )));
                }
            }
            if !hook.jumped() {
                hook.step();
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        op: Op,
        tok: char,
        tokens: &[char],
        hook: &mut Hook,
        table: &mut LiteralTable,
    ) -> Result<()> {
        match op {
            Op::Nop | Op::Fi | Op::QuotClose => Ok(()),
            Op::StrLit => self.scan_string(tok, tokens, hook, table),
            Op::CharLit => self.scan_char(tokens, hook, table),
            Op::If => self.simple_if(tokens, hook, table),
            Op::While => self.simple_while(tokens, hook, table),
            Op::Elihw => self.simple_elihw(tokens, hook, table),
            Op::QuotOpen => self.mk_quot(tokens, hook, table),
            Op::Goto => self.goto(hook, table),
            Op::RunString => self.run_string(),
            Op::Neg => self.stack.neg(),
            Op::Add => self.stack.add(),
            Op::Sub => self.stack.sub(),
            Op::Mlt => self.stack.mlt(),
            Op::Dmd => self.stack.dmd(),
            Op::Flr => self.stack.flr(),
            Op::Gtr => self.stack.gtr(),
            Op::Lss => self.stack.lss(),
            Op::Equ => self.stack.equ(),
            Op::Rot => self.stack.rot(),
            Op::Dup => self.stack.dup(),
            Op::Swap => self.stack.swap(),
            Op::Over => self.stack.over(),
            Op::Roll => self.stack.roll(),
            Op::Trade => {
                self.stack.trade(&mut self.retstk);
                Ok(())
            }
            Op::ToAlt => {
                let val = self.stack.pop()?;
                self.retstk.push(val)
            }
            Op::FromAlt => {
                let val = self.retstk.pop()?;
                self.stack.push(val)
            }
            Op::Get => self.get(),
            Op::GetExact => self.get_exact(),
            Op::GetUntil => self.get_until(),
            Op::Emit => self.stack.emit(&mut self.out),
            Op::Put => self.stack.put(&mut self.out),
            Op::Reveal => self.stack.reveal(&mut self.out),
            Op::Help => self.print_bound_ops(),
        }
    }

    /// `( -- x )` catenate each contiguous run of numerals into one
    /// number and push it.
    fn scan_number(
        &mut self,
        tokens: &[char],
        hook: &mut Hook,
        table: &mut LiteralTable,
    ) -> Result<()> {
        let start = hook.get();
        let len = tokens[start..]
            .iter()
            .take_while(|c| c.is_ascii_digit() || **c == '.')
            .count();
        let end = start + len;
        table.record(start, start..end)?;
        let text: String = tokens[start..end].iter().collect();
        let val = if text.contains('.') {
            match text.parse::<f64>() {
                Ok(f) => Val::Float(f),
                Err(_) => {
                    let (line, col) = position(tokens, start);
                    self.log
                        .warn(&error!(BadNumber, line, col; format!("{:?}", text)));
                    Val::Float(0.0)
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => Val::Integer(i),
                Err(_) => {
                    let (line, col) = position(tokens, start);
                    self.log
                        .warn(&error!(BadNumber, line, col; format!("{:?}", text)));
                    Val::Float(0.0)
                }
            }
        };
        self.stack.push(val)?;
        hook.jump(end, table)
    }

    /// `( -- "string" )` push everything between unescaped delimiters,
    /// then record the range so the counter can never land inside it.
    fn scan_string(
        &mut self,
        delim: char,
        tokens: &[char],
        hook: &mut Hook,
        table: &mut LiteralTable,
    ) -> Result<()> {
        let start = hook.get();
        let mut contents = String::new();
        let mut i = start + 1;
        let mut closed = false;
        while i < tokens.len() {
            let c = tokens[i];
            if c == '\\' && i + 1 < tokens.len() {
                // a backslash escapes the delimiter; any other pair is
                // kept verbatim
                let escaped = tokens[i + 1];
                if escaped == delim {
                    contents.push(delim);
                } else {
                    contents.push('\\');
                    contents.push(escaped);
                }
                i += 2;
                continue;
            }
            if c == delim {
                closed = true;
                break;
            }
            contents.push(c);
            i += 1;
        }
        if !closed {
            let (line, col) = position(tokens, start);
            self.log
                .warn(&error!(UnterminatedString, line, col; format!("opened at {}", start)));
            return Ok(());
        }
        table.record(start, start..i + 1)?;
        self.stack.push(Val::Str(contents))?;
        hook.jump(i + 1, table)
    }

    /// `( -- x )` push the charcode of the next char in the program,
    /// then skip that char.
    fn scan_char(
        &mut self,
        tokens: &[char],
        hook: &mut Hook,
        table: &mut LiteralTable,
    ) -> Result<()> {
        let start = hook.get();
        match tokens.get(start + 1) {
            Some(&c) => {
                self.stack.push(Val::Integer(c as i64))?;
                table.record(start, start..start + 2)?;
                hook.jump(start + 2, table)
            }
            None => {
                let (line, col) = position(tokens, start);
                self.log
                    .warn(&error!(CharAtEof, line, col; format!("file {}", self.filename)));
                Ok(())
            }
        }
    }

    /// Walk the program forward from `from`, depth-counting the pair,
    /// to the absolute index of the matching closer.
    fn next_brace(
        &mut self,
        pair: (char, char),
        tokens: &[char],
        from: Address,
    ) -> Option<Address> {
        let (open, close) = pair;
        let mut depth = 0i64;
        for (i, &c) in tokens.iter().enumerate().skip(from) {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
            }
            if depth == 0 {
                return Some(i);
            }
        }
        let (line, col) = position(tokens, from);
        self.log.warn(&error!(UnmatchedBrace, line, col));
        None
    }

    /// Walk the program in reverse from `from` to the absolute index
    /// of the matching opener.
    fn last_brace(
        &mut self,
        pair: (char, char),
        tokens: &[char],
        from: Address,
    ) -> Option<Address> {
        let (open, close) = pair;
        let mut depth = 0i64;
        for i in (0..=from).rev() {
            let c = tokens[i];
            if c == close {
                depth += 1;
            } else if c == open {
                depth -= 1;
            }
            if depth == 0 {
                return Some(i);
            }
        }
        let (line, col) = position(tokens, from);
        self.log.warn(&error!(UnmatchedBrace, line, col));
        None
    }

    /// `( x -- )` fall through into the conditional body when x is
    /// true, jump to the matching close bracket when it is not. A
    /// missing operand tests false; an unmatched bracket skips the
    /// rest of the buffer after its warning.
    fn simple_if(
        &mut self,
        tokens: &[char],
        hook: &mut Hook,
        table: &mut LiteralTable,
    ) -> Result<()> {
        let cond = self.stack.pop_or_empty();
        if cond.truthy() {
            hook.jump(hook.get() + 1, table)
        } else {
            match self.next_brace(('[', ']'), tokens, hook.get()) {
                Some(close) => hook.jump(close, table),
                None => hook.jump(tokens.len(), table),
            }
        }
    }

    /// `( x -- )` loop entry: test x on every pass; when it is false,
    /// jump past the matching close paren. The body is expected to
    /// leave the next iteration's condition on the stack.
    fn simple_while(
        &mut self,
        tokens: &[char],
        hook: &mut Hook,
        table: &mut LiteralTable,
    ) -> Result<()> {
        let cond = self.stack.pop_or_empty();
        if cond.truthy() {
            return Ok(());
        }
        match self.next_brace(('(', ')'), tokens, hook.get()) {
            Some(close) => hook.jump(close + 1, table),
            None => hook.jump(tokens.len(), table),
        }
    }

    /// Loop exit: always jump back to the matching opener, which
    /// re-tests the condition.
    fn simple_elihw(
        &mut self,
        tokens: &[char],
        hook: &mut Hook,
        table: &mut LiteralTable,
    ) -> Result<()> {
        match self.last_brace(('(', ')'), tokens, hook.get()) {
            Some(open) => hook.jump(open, table),
            None => Ok(()),
        }
    }

    /// `( -- q )` capture everything up to the matching close brace as
    /// a quotation and continue past it.
    fn mk_quot(&mut self, tokens: &[char], hook: &mut Hook, table: &mut LiteralTable) -> Result<()> {
        let start = hook.get();
        match self.next_brace(('{', '}'), tokens, start) {
            Some(close) => {
                self.stack
                    .push(Val::Quotation(tokens[start + 1..close].to_vec()))?;
                hook.jump(close + 1, table)
            }
            None => Ok(()),
        }
    }

    /// `( x -- )` pop an int and jump to that char in the source,
    /// unless the position is occupied by a literal.
    fn goto(&mut self, hook: &mut Hook, table: &LiteralTable) -> Result<()> {
        let target = self.stack.pop_or_empty();
        match target.as_int() {
            Some(n) if n >= 0 => hook.jump(n as Address, table),
            _ => {
                self.log
                    .warn(&error!(TypeMismatch; "can't goto a non-numeral index"));
                Ok(())
            }
        }
    }

    /// `( x -- )` pop a string or quotation and give it to the runner.
    /// The stacks are shared with the sub-program; the counter and
    /// literal table are not.
    fn run_string(&mut self) -> Result<()> {
        let prog = self.stack.pop()?;
        match prog {
            Val::Str(s) => self.execute_str(&s),
            Val::Quotation(toks) => self.execute(&toks),
            Val::Integer(_) | Val::Float(_) => self.execute_str(&prog.to_string()),
            Val::Empty => {
                self.log
                    .warn(&error!(JunkProgram; "empty operand"));
                Ok(())
            }
        }
    }

    /// `( -- x )` push a line of stdin.
    fn get(&mut self) -> Result<()> {
        match self.console.line() {
            Ok(s) => self.stack.push(Val::Str(s)),
            Err(err) => {
                self.log.warn(&error!(Io; err.to_string()));
                Ok(())
            }
        }
    }

    /// `( x -- y )` read exactly x keys of stdin and push them.
    fn get_exact(&mut self) -> Result<()> {
        let count = self.stack.pop()?;
        match count.as_int() {
            Some(n) if n >= 0 => match self.console.exact(n as usize) {
                Ok(s) => self.stack.push(Val::Str(s)),
                Err(err) => {
                    self.log.warn(&error!(Io; err.to_string()));
                    Ok(())
                }
            },
            _ => {
                self.log.warn(&error!(TypeMismatch; format!(
                    "need a number of characters to get, not {}",
                    count.type_name()
                )));
                Ok(())
            }
        }
    }

    /// `( x -- y )` read stdin until the character with codepoint x is
    /// seen, pushing what was read.
    fn get_until(&mut self) -> Result<()> {
        let what = self.stack.pop()?;
        let stop = match &what {
            Val::Str(s) => s.chars().next(),
            _ => match what.as_int() {
                Some(n) if n >= 0 && n <= u32::max_value() as i64 => {
                    std::char::from_u32(n as u32)
                }
                _ => None,
            },
        };
        match stop {
            Some(c) => match self.console.until(c) {
                Ok(s) => self.stack.push(Val::Str(s)),
                Err(err) => {
                    self.log.warn(&error!(Io; err.to_string()));
                    Ok(())
                }
            },
            None => {
                self.log.warn(&error!(TypeMismatch; format!(
                    "need a character to read until, not {}",
                    what.type_name()
                )));
                Ok(())
            }
        }
    }

    /// `( -- )` print the currently bound operators and what they do.
    fn print_bound_ops(&mut self) -> Result<()> {
        let mut listing = String::from("\na list of currently bound functions and operators:\n\n");
        for (tok, op) in &self.ops {
            if op.describe().is_empty() {
                continue;
            }
            listing.push_str(&format!("{:?}\t{}\n\t{}\n\n", tok, op.name(), op.describe()));
        }
        if write!(self.out, "{}", listing).is_err() {
            self.log.warn(&error!(Io; "operator listing"));
        }
        Ok(())
    }
}

/// 1-based line and column of a token index in the buffer.
fn position(tokens: &[char], index: Address) -> Position {
    let mut line = 1;
    let mut col = 1;
    for &c in tokens.iter().take(index) {
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
