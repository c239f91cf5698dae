use super::{OperandType, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arith {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

macro_rules! integer {
    ($variant:ident, $l:expr, $r:expr, $op:expr) => {{
        let (l, r) = ($l, $r);
        let result = match $op {
            Arith::Add => l.checked_add(r),
            Arith::Subtract => l.checked_sub(r),
            Arith::Multiply => l.checked_mul(r),
            Arith::Divide | Arith::Modulo if r == 0 => return Err(error!(DivisionByZero)),
            Arith::Divide => l.checked_div(r),
            Arith::Modulo => l.checked_rem(r),
        };
        match result {
            Some(n) => Ok(Val::$variant(n)),
            None => Err(error!(Overflow)),
        }
    }};
}

macro_rules! floating {
    ($variant:ident, $l:expr, $r:expr, $op:expr) => {{
        let (l, r) = ($l, $r);
        Ok(Val::$variant(match $op {
            Arith::Add => l + r,
            Arith::Subtract => l - r,
            Arith::Multiply => l * r,
            Arith::Divide => l / r,
            Arith::Modulo => l % r,
        }))
    }};
}

/// ## Typed operations
///
/// Both sides of a binary operation are read through the same
/// [`OperandType`], so mixed operands are a byte-code error.
/// Integer arithmetic is checked; floating point follows IEEE 754.
pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            I8(n) => n.checked_neg().map(I8).ok_or_else(|| error!(Overflow)),
            I16(n) => n.checked_neg().map(I16).ok_or_else(|| error!(Overflow)),
            I32(n) => n.checked_neg().map(I32).ok_or_else(|| error!(Overflow)),
            I64(n) => n.checked_neg().map(I64).ok_or_else(|| error!(Overflow)),
            Float(n) => Ok(Float(-n)),
            Double(n) => Ok(Double(-n)),
            Bool(_) | U8(_) | U16(_) | U32(_) | U64(_) => {
                Err(error!(TypeMismatch; format!("CANNOT NEGATE {}", val.operand_type())))
            }
        }
    }

    /// Numeric `as` casts. Anything non-zero converts to `true`.
    pub fn convert(val: Val, to: OperandType) -> Val {
        macro_rules! cast {
            ($n:expr, $zero:expr) => {{
                let n = $n;
                match to {
                    OperandType::Bool => Val::Bool(n != $zero),
                    OperandType::I8 => Val::I8(n as i8),
                    OperandType::I16 => Val::I16(n as i16),
                    OperandType::I32 => Val::I32(n as i32),
                    OperandType::I64 => Val::I64(n as i64),
                    OperandType::U8 => Val::U8(n as u8),
                    OperandType::U16 => Val::U16(n as u16),
                    OperandType::U32 => Val::U32(n as u32),
                    OperandType::U64 => Val::U64(n as u64),
                    OperandType::Float => Val::Float(n as f32),
                    OperandType::Double => Val::Double(n as f64),
                }
            }};
        }
        use Val::*;
        match val {
            Bool(b) => cast!(b as u8, 0),
            I8(n) => cast!(n, 0),
            I16(n) => cast!(n, 0),
            I32(n) => cast!(n, 0),
            I64(n) => cast!(n, 0),
            U8(n) => cast!(n, 0),
            U16(n) => cast!(n, 0),
            U32(n) => cast!(n, 0),
            U64(n) => cast!(n, 0),
            Float(n) => cast!(n, 0.0),
            Double(n) => cast!(n, 0.0),
        }
    }

    pub fn add(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::arith(lhs, rhs, Arith::Add)
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::arith(lhs, rhs, Arith::Subtract)
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::arith(lhs, rhs, Arith::Multiply)
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::arith(lhs, rhs, Arith::Divide)
    }

    pub fn modulo(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::arith(lhs, rhs, Arith::Modulo)
    }

    fn arith(lhs: Val, rhs: Val, op: Arith) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (I8(l), I8(r)) => integer!(I8, l, r, op),
            (I16(l), I16(r)) => integer!(I16, l, r, op),
            (I32(l), I32(r)) => integer!(I32, l, r, op),
            (I64(l), I64(r)) => integer!(I64, l, r, op),
            (U8(l), U8(r)) => integer!(U8, l, r, op),
            (U16(l), U16(r)) => integer!(U16, l, r, op),
            (U32(l), U32(r)) => integer!(U32, l, r, op),
            (U64(l), U64(r)) => integer!(U64, l, r, op),
            (Float(l), Float(r)) => floating!(Float, l, r, op),
            (Double(l), Double(r)) => floating!(Double, l, r, op),
            _ => Err(error!(TypeMismatch; format!(
                "{} AND {}",
                lhs.operand_type(),
                rhs.operand_type()
            ))),
        }
    }

    /// Text written by `OP_PRINT`, without the newline.
    pub fn print(val: Val) -> String {
        val.to_string()
    }
}
