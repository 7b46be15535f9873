use super::val::{codepoint_sum, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Polymorphic operator semantics
///
/// Every binary operator dispatches on the runtime type pair of its
/// operands. Unsupported pairings return a `TypeMismatch` error naming
/// the operator and both type names; the stack downgrades those to
/// warnings and pushes nothing.

pub struct Operation {}

fn nosuchop(operator: &str, lhs: &Val, rhs: &Val) -> Error {
    error!(TypeMismatch; format!(
        "operator: {}, operands: {} and {}",
        operator,
        lhs.type_name(),
        rhs.type_name()
    ))
}

fn bool_val(b: bool) -> Val {
    Val::Integer(if b { 1 } else { 0 })
}

/// Slice-style trim: a positive count drops that many characters from
/// the end, a negative count keeps that many from the front, zero
/// keeps nothing.
fn trim_by(s: &str, n: i64) -> String {
    let chars: Vec<char> = s.chars().collect();
    let keep = if n > 0 {
        chars.len().saturating_sub(n as usize)
    } else if n < 0 {
        ((-n) as usize).min(chars.len())
    } else {
        0
    };
    chars[..keep].iter().collect()
}

fn repeat(s: &str, n: i64) -> Val {
    if n <= 0 {
        Val::Str(String::new())
    } else {
        Val::Str(s.repeat(n as usize))
    }
}

fn interleave(a: &str, b: &str) -> String {
    let mut out = String::new();
    for (x, y) in a.chars().zip(b.chars()) {
        out.push(x);
        out.push(y);
    }
    out
}

/// string/number addition: numeric when the string coerces, display
/// concatenation in operand order otherwise
fn sum_mixed(lhs: Val, rhs: Val) -> Val {
    match (lhs.as_number(), rhs.as_number()) {
        (Some(a), Some(b)) => Val::Float(a + b),
        _ => Val::Str(format!("{}{}", lhs, rhs)),
    }
}

/// number minus string: the coerced string is the minuend, trim is the
/// fallback
fn sub_num_str(n: f64, s: &str) -> Val {
    match s.trim().parse::<f64>() {
        Ok(v) => Val::Float(v - n),
        Err(_) => Val::Str(trim_by(s, n.trunc() as i64)),
    }
}

/// string minus number: the coerced string is the minuend, trim is the
/// fallback
fn sub_str_num(s: &str, n: f64) -> Val {
    match s.trim().parse::<f64>() {
        Ok(v) => Val::Float(v - n),
        Err(_) => Val::Str(trim_by(s, n.trunc() as i64)),
    }
}

fn equal_str_num(s: &str, n: f64) -> Val {
    match s.trim().parse::<f64>() {
        Ok(v) => bool_val(v == n),
        Err(_) => bool_val(codepoint_sum(s) as f64 == n),
    }
}

impl Operation {
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Str(l), Str(r)) => Ok(Str(l + &r)),
            (Integer(l), Integer(r)) => match l.checked_add(r) {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow; "add")),
            },
            (Integer(l), Float(r)) => Ok(Float(l as f64 + r)),
            (Float(l), Integer(r)) => Ok(Float(l + r as f64)),
            (Float(l), Float(r)) => Ok(Float(l + r)),
            (l @ Str(_), r @ Integer(_))
            | (l @ Str(_), r @ Float(_))
            | (l @ Integer(_), r @ Str(_))
            | (l @ Float(_), r @ Str(_)) => Ok(sum_mixed(l, r)),
            (lhs, rhs) => Err(nosuchop("add", &lhs, &rhs)),
        }
    }

    /// String-against-string subtraction lives in
    /// [`Operation::subtract_strings`]; it needs the optional count
    /// operand the stack pops for it.
    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_sub(r) {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow; "sub")),
            },
            (Integer(l), Float(r)) => Ok(Float(l as f64 - r)),
            (Float(l), Integer(r)) => Ok(Float(l - r as f64)),
            (Float(l), Float(r)) => Ok(Float(l - r)),
            (Integer(l), Str(r)) => Ok(sub_num_str(l as f64, &r)),
            (Float(l), Str(r)) => Ok(sub_num_str(l, &r)),
            (Str(l), Integer(r)) => Ok(sub_str_num(&l, r as f64)),
            (Str(l), Float(r)) => Ok(sub_str_num(&l, r)),
            (lhs, rhs) => Err(nosuchop("sub", &lhs, &rhs)),
        }
    }

    /// Remove occurrences of `needle` from `hay`. A positive numeric
    /// count bounds the removals; anything else removes all of them.
    pub fn subtract_strings(hay: &str, needle: &str, count: &Val) -> Val {
        match count.as_int() {
            Some(n) if n > 0 => Val::Str(hay.replacen(needle, "", n as usize)),
            _ => Val::Str(hay.replace(needle, "")),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Str(l), Str(r)) => Ok(Str(interleave(&l, &r))),
            (Integer(l), Integer(r)) => match l.checked_mul(r) {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow; "mlt")),
            },
            (Integer(l), Float(r)) => Ok(Float(l as f64 * r)),
            (Float(l), Integer(r)) => Ok(Float(l * r as f64)),
            (Float(l), Float(r)) => Ok(Float(l * r)),
            (Str(l), Integer(r)) | (Integer(r), Str(l)) => Ok(repeat(&l, r)),
            (lhs, rhs) => Err(nosuchop("mlt", &lhs, &rhs)),
        }
    }

    /// Remainder and quotient, remainder first. Both values are
    /// computed before either is returned, so a zero divisor produces
    /// neither.
    pub fn divmod(lhs: Val, rhs: Val) -> Result<(Val, Val)> {
        use Val::*;
        if let (Integer(l), Integer(r)) = (&lhs, &rhs) {
            if *r == 0 {
                return Err(error!(ZeroDivision; "dmd"));
            }
            return match (l.checked_rem(*r), l.checked_div(*r)) {
                (Some(m), Some(d)) => Ok((Integer(m), Integer(d))),
                _ => Err(error!(Overflow; "dmd")),
            };
        }
        if lhs.is_number() && rhs.is_number() {
            if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
                if b == 0.0 {
                    return Err(error!(ZeroDivision; "dmd"));
                }
                return Ok((Float(a % b), Float(a / b)));
            }
        }
        Err(nosuchop("dmd", &lhs, &rhs))
    }

    pub fn floor_divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        if let (Integer(l), Integer(r)) = (&lhs, &rhs) {
            if *r == 0 {
                return Err(error!(ZeroDivision; "flr"));
            }
            return match l.checked_div_euclid(*r) {
                Some(d) => Ok(Integer(d)),
                None => Err(error!(Overflow; "flr")),
            };
        }
        if lhs.is_number() && rhs.is_number() {
            if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
                if b == 0.0 {
                    return Err(error!(ZeroDivision; "flr"));
                }
                return Ok(Float((a / b).floor()));
            }
        }
        Err(nosuchop("flr", &lhs, &rhs))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(bool_val(l < r)),
            (Integer(l), Float(r)) => Ok(bool_val((l as f64) < r)),
            (Float(l), Integer(r)) => Ok(bool_val(l < r as f64)),
            (Float(l), Float(r)) => Ok(bool_val(l < r)),
            (Str(l), Str(r)) => Ok(bool_val(l < r)),
            (lhs, rhs) => Err(nosuchop("lss", &lhs, &rhs)),
        }
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(bool_val(l > r)),
            (Integer(l), Float(r)) => Ok(bool_val(l as f64 > r)),
            (Float(l), Integer(r)) => Ok(bool_val(l > r as f64)),
            (Float(l), Float(r)) => Ok(bool_val(l > r)),
            (Str(l), Str(r)) => Ok(bool_val(l > r)),
            (lhs, rhs) => Err(nosuchop("gtr", &lhs, &rhs)),
        }
    }

    /// Equality is numeric where possible. Two strings compare by the
    /// sum of their character code points, not character by character.
    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(bool_val(l == r)),
            (Integer(l), Float(r)) => Ok(bool_val(l as f64 == r)),
            (Float(l), Integer(r)) => Ok(bool_val(l == r as f64)),
            (Float(l), Float(r)) => Ok(bool_val(l == r)),
            (Str(l), Str(r)) => Ok(bool_val(codepoint_sum(&l) == codepoint_sum(&r))),
            (Str(s), Integer(r)) => Ok(equal_str_num(&s, r as f64)),
            (Str(s), Float(r)) => Ok(equal_str_num(&s, r)),
            (Integer(l), Str(s)) => Ok(equal_str_num(&s, l as f64)),
            (Float(l), Str(s)) => Ok(equal_str_num(&s, l)),
            (lhs, rhs) => Err(nosuchop("equ", &lhs, &rhs)),
        }
    }

    /// Sign flip for numbers, element reversal for strings and
    /// quotations.
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(m) => Ok(Integer(m)),
                None => Err(error!(Overflow; "neg")),
            },
            Float(n) => Ok(Float(-n)),
            Str(s) => Ok(Str(s.chars().rev().collect())),
            Quotation(toks) => Ok(Quotation(toks.into_iter().rev().collect())),
            val => Err(error!(TypeMismatch; format!(
                "operator: neg, operand: {}",
                val.type_name()
            ))),
        }
    }
}
