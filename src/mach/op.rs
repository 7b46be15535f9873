/// ## Operator table entries
///
/// Single tokens map to these operations at dispatch time. The table
/// itself lives on the interpreter and can be rebound at run time;
/// whichever key maps to `StrLit` is the current string delimiter.
///
/// Operations with no default key (`Flr`, `GetExact`, `GetUntil`) can
/// still be bound by embedders.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // *** Quiet tokens
    Nop,

    // *** Literal scanners
    StrLit,
    CharLit,

    // *** Control flow
    If,
    Fi,
    While,
    Elihw,
    QuotOpen,
    QuotClose,
    Goto,
    RunString,

    // *** Arithmetic and comparison
    Neg,
    Add,
    Sub,
    Mlt,
    Dmd,
    Flr,
    Gtr,
    Lss,
    Equ,

    // *** Stack shuffling
    Rot,
    Dup,
    Swap,
    Over,
    Roll,
    Trade,
    ToAlt,
    FromAlt,

    // *** I/O
    Get,
    GetExact,
    GetUntil,
    Emit,
    Put,
    Reveal,
    Help,
}

impl Op {
    pub fn name(self) -> &'static str {
        use Op::*;
        match self {
            Nop => "nop",
            StrLit => "lit_string",
            CharLit => "lit_char",
            If => "simple_if",
            Fi => "simple_fi",
            While => "simple_while",
            Elihw => "simple_elihw",
            QuotOpen => "mk_quot",
            QuotClose => "mk_touq",
            Goto => "goto",
            RunString => "string_as_mouse",
            Neg => "neg",
            Add => "add",
            Sub => "sub",
            Mlt => "mlt",
            Dmd => "dmd",
            Flr => "flr",
            Gtr => "gtr",
            Lss => "lss",
            Equ => "equ",
            Rot => "rot",
            Dup => "dup",
            Swap => "swap",
            Over => "over",
            Roll => "roll",
            Trade => "trade_ret_main",
            ToAlt => "push_ret",
            FromAlt => "pop_ret",
            Get => "get",
            GetExact => "get_exact",
            GetUntil => "get_until",
            Emit => "emit",
            Put => "put",
            Reveal => "reveal",
            Help => "print_bound_ops",
        }
    }

    /// One-line description shown by the operator listing.
    pub fn describe(self) -> &'static str {
        use Op::*;
        match self {
            Nop => "",
            StrLit => "( -- \"string\" ) push everything between unescaped quotes",
            CharLit => "( -- x ) push the charcode of the next char in the program",
            If => "( x -- ) jump past the matching bracket unless x is true",
            Fi => "ends a simple conditional",
            While => "( x -- ) test x on every entry; jump past the loop when false",
            Elihw => "jump back to the matching open paren",
            QuotOpen => "( -- q ) capture tokens up to the matching brace as a quotation",
            QuotClose => "ends a quotation",
            Goto => "( x -- ) jump to char x of the source",
            RunString => "( x -- ) run a string or quotation as a sub-program",
            Neg => "( x -- -x ) flip the sign of x; reverse a string or quotation",
            Add => "( y x -- x+y ) binary addition; catenates strings",
            Sub => "( z y x -- z x-y ) binary subtraction; removes substrings",
            Mlt => "( y x -- x*y ) binary multiplication; interleaves strings",
            Dmd => "( y x -- x%y x/y ) push x modulo y, then x divided by y",
            Flr => "( y x -- x//y ) divide x by y, flooring the result",
            Gtr => "( y x -- x>y? ) binary ordering",
            Lss => "( y x -- x<y? ) binary ordering",
            Equ => "( y x -- x=y? ) equality comparison",
            Rot => "( z y x w -- z w y x ) rotate the top three items up",
            Dup => "( y x -- y x x ) push a copy of the TOS",
            Swap => "( y x -- x y ) swap the top two items",
            Over => "( z y x -- z y x y ) copy second-to-top to the TOS",
            Roll => "( z y x -- y x z ) roll the stack up",
            Trade => "( ? -- ? ) swap the main stack with the secondary stack",
            ToAlt => "( x -- ) move the TOS to the secondary stack",
            FromAlt => "( -- x ) move the secondary stack's TOS here",
            Get => "( -- x ) read a line from stdin and push it",
            GetExact => "( x -- y ) read exactly x keys of stdin",
            GetUntil => "( x -- y ) read stdin until the char with codepoint x",
            Emit => "( x -- ) pop a codepoint and print its character",
            Put => "( x -- ) pop the top of the stack and print it",
            Reveal => "show the contents of the stack",
            Help => "print a list of currently bound operators",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
