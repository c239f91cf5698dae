use super::OperandType;

/// ## Untyped 8-byte value slot
///
/// Every primitive fits in one `QWord`. Narrow values sit in the low
/// bytes with the remaining bytes zeroed. Nothing records which view is
/// valid; the instruction that consumes the slot decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct QWord(u64);

impl QWord {
    pub fn bits(self) -> u64 {
        self.0
    }
    pub fn byte(self) -> u8 {
        self.0 as u8
    }
    pub fn word(self) -> u16 {
        self.0 as u16
    }
    pub fn dword(self) -> u32 {
        self.0 as u32
    }

    pub fn from_bool(b: bool) -> QWord {
        QWord(b as u64)
    }
    pub fn from_i8(n: i8) -> QWord {
        QWord(n as u8 as u64)
    }
    pub fn from_i16(n: i16) -> QWord {
        QWord(n as u16 as u64)
    }
    pub fn from_i32(n: i32) -> QWord {
        QWord(n as u32 as u64)
    }
    pub fn from_i64(n: i64) -> QWord {
        QWord(n as u64)
    }
    pub fn from_f32(n: f32) -> QWord {
        QWord(n.to_bits() as u64)
    }
    pub fn from_f64(n: f64) -> QWord {
        QWord(n.to_bits())
    }

    pub fn as_bool(self) -> bool {
        self.byte() != 0
    }
    pub fn as_i8(self) -> i8 {
        self.byte() as i8
    }
    pub fn as_i16(self) -> i16 {
        self.word() as i16
    }
    pub fn as_i32(self) -> i32 {
        self.dword() as i32
    }
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
    pub fn as_u8(self) -> u8 {
        self.byte()
    }
    pub fn as_u16(self) -> u16 {
        self.word()
    }
    pub fn as_u32(self) -> u32 {
        self.dword()
    }
    pub fn as_u64(self) -> u64 {
        self.0
    }
    pub fn as_f32(self) -> f32 {
        f32::from_bits(self.dword())
    }
    pub fn as_f64(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<u8> for QWord {
    fn from(n: u8) -> QWord {
        QWord(n as u64)
    }
}

impl From<u16> for QWord {
    fn from(n: u16) -> QWord {
        QWord(n as u64)
    }
}

impl From<u32> for QWord {
    fn from(n: u32) -> QWord {
        QWord(n as u64)
    }
}

impl From<u64> for QWord {
    fn from(n: u64) -> QWord {
        QWord(n)
    }
}

/// A slot read through the view an operand names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Val {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Float(f32),
    Double(f64),
}

impl Val {
    pub fn from_qword(qword: QWord, ty: OperandType) -> Val {
        use OperandType::*;
        match ty {
            Bool => Val::Bool(qword.as_bool()),
            I8 => Val::I8(qword.as_i8()),
            I16 => Val::I16(qword.as_i16()),
            I32 => Val::I32(qword.as_i32()),
            I64 => Val::I64(qword.as_i64()),
            U8 => Val::U8(qword.as_u8()),
            U16 => Val::U16(qword.as_u16()),
            U32 => Val::U32(qword.as_u32()),
            U64 => Val::U64(qword.as_u64()),
            Float => Val::Float(qword.as_f32()),
            Double => Val::Double(qword.as_f64()),
        }
    }

    pub fn to_qword(self) -> QWord {
        match self {
            Val::Bool(b) => QWord::from_bool(b),
            Val::I8(n) => QWord::from_i8(n),
            Val::I16(n) => QWord::from_i16(n),
            Val::I32(n) => QWord::from_i32(n),
            Val::I64(n) => QWord::from_i64(n),
            Val::U8(n) => QWord::from(n),
            Val::U16(n) => QWord::from(n),
            Val::U32(n) => QWord::from(n),
            Val::U64(n) => QWord::from(n),
            Val::Float(n) => QWord::from_f32(n),
            Val::Double(n) => QWord::from_f64(n),
        }
    }

    pub fn operand_type(&self) -> OperandType {
        match self {
            Val::Bool(_) => OperandType::Bool,
            Val::I8(_) => OperandType::I8,
            Val::I16(_) => OperandType::I16,
            Val::I32(_) => OperandType::I32,
            Val::I64(_) => OperandType::I64,
            Val::U8(_) => OperandType::U8,
            Val::U16(_) => OperandType::U16,
            Val::U32(_) => OperandType::U32,
            Val::U64(_) => OperandType::U64,
            Val::Float(_) => OperandType::Float,
            Val::Double(_) => OperandType::Double,
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Val::*;
        match self {
            Bool(b) => write!(f, "{}", b),
            I8(n) => write!(f, "{}", n),
            I16(n) => write!(f, "{}", n),
            I32(n) => write!(f, "{}", n),
            I64(n) => write!(f, "{}", n),
            U8(n) => write!(f, "{}", n),
            U16(n) => write!(f, "{}", n),
            U32(n) => write!(f, "{}", n),
            U64(n) => write!(f, "{}", n),
            Float(n) => write!(f, "{}", n),
            Double(n) => write!(f, "{}", n),
        }
    }
}
