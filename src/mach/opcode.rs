use std::convert::TryFrom;

/// ## Virtual machine instruction set
///
/// The Colti virtual machine has no registers.
/// Every operation is performed on the stack.
///
/// An opcode is one byte. Immediates follow their opcode at the next
/// offset aligned to their width. Typed instructions are followed by one
/// [`OperandType`] byte (two for `Convert`).
///
/// For example: `-15 / 15` is
/// `[ImmediateQword(-15), ImmediateQword(15), Divide(INT64)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    // *** Immediate values
    ImmediateByte = 0,
    ImmediateWord = 1,
    ImmediateDword = 2,
    ImmediateQword = 3,

    // *** Typed operations
    /// Pop, negate, push.
    Negate = 4,
    /// Pop a `from`, convert it to `to`, push.
    Convert = 5,
    /// Pop rhs then lhs, push `lhs + rhs`.
    Add = 6,
    Subtract = 7,
    Multiply = 8,
    Divide = 9,
    Modulo = 10,

    // *** Statements
    /// Pop and write to the output. Kept for debugging programs.
    Print = 11,
    Return = 12,
}

impl OpCode {
    /// Number of [`OperandType`] bytes following the opcode.
    pub fn operand_count(self) -> usize {
        use OpCode::*;
        match self {
            ImmediateByte | ImmediateWord | ImmediateDword | ImmediateQword | Return => 0,
            Negate | Add | Subtract | Multiply | Divide | Modulo | Print => 1,
            Convert => 2,
        }
    }

    /// Width of the immediate following an `Immediate*` opcode.
    pub fn immediate_width(self) -> Option<usize> {
        match self {
            OpCode::ImmediateByte => Some(1),
            OpCode::ImmediateWord => Some(2),
            OpCode::ImmediateDword => Some(4),
            OpCode::ImmediateQword => Some(8),
            _ => None,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        use OpCode::*;
        match byte {
            0 => Ok(ImmediateByte),
            1 => Ok(ImmediateWord),
            2 => Ok(ImmediateDword),
            3 => Ok(ImmediateQword),
            4 => Ok(Negate),
            5 => Ok(Convert),
            6 => Ok(Add),
            7 => Ok(Subtract),
            8 => Ok(Multiply),
            9 => Ok(Divide),
            10 => Ok(Modulo),
            11 => Ok(Print),
            12 => Ok(Return),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use OpCode::*;
        match self {
            ImmediateByte => write!(f, "OP_IMMEDIATE_BYTE"),
            ImmediateWord => write!(f, "OP_IMMEDIATE_WORD"),
            ImmediateDword => write!(f, "OP_IMMEDIATE_DWORD"),
            ImmediateQword => write!(f, "OP_IMMEDIATE_QWORD"),
            Negate => write!(f, "OP_NEGATE"),
            Convert => write!(f, "OP_CONVERT"),
            Add => write!(f, "OP_ADD"),
            Subtract => write!(f, "OP_SUBTRACT"),
            Multiply => write!(f, "OP_MULTIPLY"),
            Divide => write!(f, "OP_DIVIDE"),
            Modulo => write!(f, "OP_MODULO"),
            Print => write!(f, "OP_PRINT"),
            Return => write!(f, "OP_RETURN"),
        }
    }
}

/// Type of the slot a typed instruction works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OperandType {
    Bool = 0,
    Double = 1,
    Float = 2,
    I8 = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    U8 = 7,
    U16 = 8,
    U32 = 9,
    U64 = 10,
}

impl TryFrom<u8> for OperandType {
    type Error = u8;
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        use OperandType::*;
        match byte {
            0 => Ok(Bool),
            1 => Ok(Double),
            2 => Ok(Float),
            3 => Ok(I8),
            4 => Ok(I16),
            5 => Ok(I32),
            6 => Ok(I64),
            7 => Ok(U8),
            8 => Ok(U16),
            9 => Ok(U32),
            10 => Ok(U64),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for OperandType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use OperandType::*;
        match self {
            Bool => write!(f, "BOOL"),
            Double => write!(f, "DOUBLE"),
            Float => write!(f, "FLOAT"),
            I8 => write!(f, "INT8"),
            I16 => write!(f, "INT16"),
            I32 => write!(f, "INT32"),
            I64 => write!(f, "INT64"),
            U8 => write!(f, "UINT8"),
            U16 => write!(f, "UINT16"),
            U32 => write!(f, "UINT32"),
            U64 => write!(f, "UINT64"),
        }
    }
}
