use std::cmp::Ordering;
use std::fmt;

use model::{BinaryOp, RuntimeError, SignOp, StepOp, Type};

/// A runtime scalar. A variable keeps the tag it was created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Double(f64),
    Char(u8),
    Bool(bool),
}

impl Value {
    pub fn ty(self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Double(_) => Type::Double,
            Value::Char(_) => Type::Char,
            Value::Bool(_) => Type::Bool,
        }
    }

    /// Value of a declared but uninitialized variable. `void` has none.
    pub fn zero(ty: Type) -> Option<Value> {
        match ty {
            Type::Int => Some(Value::Int(0)),
            Type::Double => Some(Value::Double(0.0)),
            Type::Char => Some(Value::Char(0)),
            Type::Bool => Some(Value::Bool(false)),
            Type::Void => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{}", char::from(*v)),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Apply an arithmetic or comparison operator. Both operands must carry the
/// same tag.
pub fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    if op.is_comparison() {
        return compare(op, left, right).map(Value::Bool);
    }

    let op = op.compound_base().unwrap_or(op);
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => int_arith(op, l, r).map(Value::Int),
        (Value::Char(l), Value::Char(r)) => char_arith(op, l, r).map(Value::Char),
        (Value::Double(l), Value::Double(r)) => {
            let v = match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Pow => l.powf(r),
                _ => return Err(RuntimeError::InvalidOperand { op: op.symbol(), ty: Type::Double }),
            };
            Ok(Value::Double(v))
        }
        (Value::Bool(_), Value::Bool(_)) => {
            Err(RuntimeError::InvalidOperand { op: op.symbol(), ty: Type::Bool })
        }
        _ => Err(mismatch(op, left, right)),
    }
}

fn int_arith(op: BinaryOp, l: i32, r: i32) -> Result<i32, RuntimeError> {
    match op {
        BinaryOp::Add => Ok(l.wrapping_add(r)),
        BinaryOp::Sub => Ok(l.wrapping_sub(r)),
        BinaryOp::Mul => Ok(l.wrapping_mul(r)),
        BinaryOp::Div if r == 0 => Err(RuntimeError::DivisionByZero),
        BinaryOp::Div => Ok(l.wrapping_div(r)),
        BinaryOp::Pow => int_pow(l, r),
        _ => Err(RuntimeError::InvalidOperand { op: op.symbol(), ty: Type::Int }),
    }
}

/// Negative exponents compute `1 / base^n` truncated toward zero.
fn int_pow(base: i32, exp: i32) -> Result<i32, RuntimeError> {
    if let Ok(exp) = u32::try_from(exp) {
        return Ok(base.wrapping_pow(exp));
    }
    match base {
        0 => Err(RuntimeError::DivisionByZero),
        1 => Ok(1),
        -1 if exp % 2 == 0 => Ok(1),
        -1 => Ok(-1),
        _ => Ok(0),
    }
}

fn char_arith(op: BinaryOp, l: u8, r: u8) -> Result<u8, RuntimeError> {
    match op {
        BinaryOp::Add => Ok(l.wrapping_add(r)),
        BinaryOp::Sub => Ok(l.wrapping_sub(r)),
        BinaryOp::Mul => Ok(l.wrapping_mul(r)),
        BinaryOp::Div if r == 0 => Err(RuntimeError::DivisionByZero),
        BinaryOp::Div => Ok(l / r),
        BinaryOp::Pow => Ok(l.wrapping_pow(u32::from(r))),
        _ => Err(RuntimeError::InvalidOperand { op: op.symbol(), ty: Type::Char }),
    }
}

fn compare(op: BinaryOp, left: Value, right: Value) -> Result<bool, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Int(l), Value::Int(r)) => l.partial_cmp(&r),
        (Value::Double(l), Value::Double(r)) => l.partial_cmp(&r),
        (Value::Char(l), Value::Char(r)) => l.partial_cmp(&r),
        (Value::Bool(l), Value::Bool(r)) => l.partial_cmp(&r),
        _ => return Err(mismatch(op, left, right)),
    };

    // NaN compares unordered: only `!=` holds
    let Some(ordering) = ordering else {
        return Ok(op == BinaryOp::NotEqual);
    };

    Ok(match op {
        BinaryOp::Equal => ordering == Ordering::Equal,
        BinaryOp::NotEqual => ordering != Ordering::Equal,
        BinaryOp::Less => ordering == Ordering::Less,
        BinaryOp::Greater => ordering == Ordering::Greater,
        BinaryOp::LessEqual => ordering != Ordering::Greater,
        _ => ordering != Ordering::Less,
    })
}

pub fn sign(op: SignOp, value: Value) -> Result<Value, RuntimeError> {
    match (op, value) {
        (SignOp::Plus, Value::Int(_) | Value::Double(_) | Value::Char(_)) => Ok(value),
        (SignOp::Minus, Value::Int(v)) => Ok(Value::Int(v.wrapping_neg())),
        (SignOp::Minus, Value::Double(v)) => Ok(Value::Double(-v)),
        (SignOp::Minus, Value::Char(v)) => Ok(Value::Char(v.wrapping_neg())),
        (_, Value::Bool(_)) => Err(RuntimeError::InvalidOperand { op: op.symbol(), ty: Type::Bool }),
    }
}

pub fn step(op: StepOp, value: Value) -> Result<Value, RuntimeError> {
    let up = op == StepOp::Increment;
    match value {
        Value::Int(v) => Ok(Value::Int(if up { v.wrapping_add(1) } else { v.wrapping_sub(1) })),
        Value::Double(v) => Ok(Value::Double(if up { v + 1.0 } else { v - 1.0 })),
        Value::Char(v) => Ok(Value::Char(if up { v.wrapping_add(1) } else { v.wrapping_sub(1) })),
        Value::Bool(_) => Err(RuntimeError::InvalidOperand { op: op.symbol(), ty: Type::Bool }),
    }
}

fn mismatch(op: BinaryOp, left: Value, right: Value) -> RuntimeError {
    RuntimeError::OperandMismatch {
        op: op.symbol(),
        left: left.ty(),
        right: right.ty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_arithmetic_wraps() {
        assert_eq!(binary(BinaryOp::Add, Value::Int(i32::MAX), Value::Int(1)), Ok(Value::Int(i32::MIN)));
        assert_eq!(binary(BinaryOp::Div, Value::Int(i32::MIN), Value::Int(-1)), Ok(Value::Int(i32::MIN)));
        assert_eq!(binary(BinaryOp::Div, Value::Int(7), Value::Int(2)), Ok(Value::Int(3)));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(binary(BinaryOp::Div, Value::Int(1), Value::Int(0)), Err(RuntimeError::DivisionByZero));
        assert_eq!(binary(BinaryOp::DivAssign, Value::Char(1), Value::Char(0)), Err(RuntimeError::DivisionByZero));
        assert_eq!(
            binary(BinaryOp::Div, Value::Double(1.0), Value::Double(0.0)),
            Ok(Value::Double(f64::INFINITY))
        );
    }

    #[test]
    fn power() {
        assert_eq!(binary(BinaryOp::Pow, Value::Int(2), Value::Int(10)), Ok(Value::Int(1024)));
        assert_eq!(binary(BinaryOp::Pow, Value::Int(2), Value::Int(-1)), Ok(Value::Int(0)));
        assert_eq!(binary(BinaryOp::Pow, Value::Int(-1), Value::Int(-3)), Ok(Value::Int(-1)));
        assert_eq!(binary(BinaryOp::Pow, Value::Int(0), Value::Int(-2)), Err(RuntimeError::DivisionByZero));
        assert_eq!(binary(BinaryOp::Pow, Value::Double(2.0), Value::Double(3.0)), Ok(Value::Double(8.0)));
    }

    #[test]
    fn compound_operators_use_their_base() {
        assert_eq!(binary(BinaryOp::MulAssign, Value::Int(6), Value::Int(7)), Ok(Value::Int(42)));
        assert_eq!(binary(BinaryOp::SubAssign, Value::Char(b'c'), Value::Char(2)), Ok(Value::Char(b'a')));
    }

    #[test]
    fn comparisons_cover_all_tags() {
        assert_eq!(binary(BinaryOp::Less, Value::Int(1), Value::Int(2)), Ok(Value::Bool(true)));
        assert_eq!(binary(BinaryOp::GreaterEqual, Value::Char(b'a'), Value::Char(b'b')), Ok(Value::Bool(false)));
        assert_eq!(binary(BinaryOp::Equal, Value::Bool(true), Value::Bool(true)), Ok(Value::Bool(true)));
        assert_eq!(binary(BinaryOp::LessEqual, Value::Double(2.0), Value::Double(2.0)), Ok(Value::Bool(true)));
        assert_eq!(
            binary(BinaryOp::NotEqual, Value::Double(f64::NAN), Value::Double(f64::NAN)),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn mixed_tags_are_rejected() {
        assert_eq!(
            binary(BinaryOp::Add, Value::Int(1), Value::Double(1.0)),
            Err(RuntimeError::OperandMismatch { op: "+", left: Type::Int, right: Type::Double })
        );
        assert_eq!(
            binary(BinaryOp::Add, Value::Bool(true), Value::Bool(false)),
            Err(RuntimeError::InvalidOperand { op: "+", ty: Type::Bool })
        );
    }

    #[test]
    fn sign_and_step() {
        assert_eq!(sign(SignOp::Minus, Value::Int(3)), Ok(Value::Int(-3)));
        assert_eq!(sign(SignOp::Plus, Value::Double(1.5)), Ok(Value::Double(1.5)));
        assert_eq!(step(StepOp::Increment, Value::Char(b'a')), Ok(Value::Char(b'b')));
        assert_eq!(step(StepOp::Decrement, Value::Int(i32::MIN)), Ok(Value::Int(i32::MAX)));
        assert!(step(StepOp::Increment, Value::Bool(false)).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Double(2.5).to_string(), "2.5");
        assert_eq!(Value::Double(3.0).to_string(), "3");
        assert_eq!(Value::Char(b'z').to_string(), "z");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn zero_values() {
        assert_eq!(Value::zero(Type::Char), Some(Value::Char(0)));
        assert_eq!(Value::zero(Type::Void), None);
    }
}
