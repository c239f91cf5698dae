use super::{Address, Chunk, ChunkReader, OpCode, Operation, QWord, Stack, Val, STACK_CAPACITY};
use crate::error;
use crate::lang::Error;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack based virtual machine
///
/// Executes a [`Chunk`] from its first byte until `OP_RETURN`.
/// The operand stack holds untyped [`QWord`]s; each instruction's operand
/// byte says how to read them.
pub struct StackVM {
    stack: Stack<QWord>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Default for StackVM {
    fn default() -> Self {
        StackVM::new()
    }
}

impl std::fmt::Debug for StackVM {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackVM {:?}", self.stack)
    }
}

impl StackVM {
    pub fn new() -> StackVM {
        StackVM::with_capacity(STACK_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> StackVM {
        StackVM {
            stack: Stack::with_max_len("OPERAND STACK FULL", capacity),
            interrupt: None,
        }
    }

    /// A run stops with `BREAK` once `flag` is set. The flag is cleared
    /// when that happens.
    pub fn set_interrupt(&mut self, flag: Arc<AtomicBool>) {
        self.interrupt = Some(flag);
    }

    pub fn push(&mut self, qword: QWord) -> Result<()> {
        self.stack.push(qword)
    }

    pub fn pop(&mut self) -> Result<QWord> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<QWord> {
        self.stack.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.stack.max_len()
    }

    pub fn clear(&mut self) {
        self.stack.clear()
    }

    fn interrupted(&self) -> bool {
        match &self.interrupt {
            Some(flag) => flag.swap(false, Ordering::SeqCst),
            None => false,
        }
    }

    /// Runs `chunk`, writing `OP_PRINT` output to `out`. Errors carry the
    /// offset of the failing instruction. The stack is left as the
    /// program left it.
    pub fn run<W: Write>(&mut self, chunk: &Chunk, out: &mut W) -> Result<()> {
        let mut reader = chunk.reader();
        loop {
            let offset = reader.offset();
            if self.interrupted() {
                return Err(error!(Break, @offset));
            }
            if reader.is_at_end() {
                return Err(error!(MissingReturn, @offset));
            }
            match self.step(&mut reader, out) {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(error) => return Err(error.at_offset(offset)),
            }
        }
    }

    /// Executes one instruction. True after `OP_RETURN`.
    fn step<W: Write>(&mut self, reader: &mut ChunkReader<'_>, out: &mut W) -> Result<bool> {
        let offset: Address = reader.offset();
        let opcode = reader.read_opcode()?;
        trace!(offset, %opcode, depth = self.stack.len(), "dispatch");
        match opcode {
            OpCode::ImmediateByte => {
                let byte = reader.read_byte()?;
                self.stack.push(QWord::from(byte))?;
            }
            OpCode::ImmediateWord => {
                let word = reader.read_word()?;
                self.stack.push(QWord::from(word))?;
            }
            OpCode::ImmediateDword => {
                let dword = reader.read_dword()?;
                self.stack.push(QWord::from(dword))?;
            }
            OpCode::ImmediateQword => {
                let qword = reader.read_qword()?;
                self.stack.push(QWord::from(qword))?;
            }
            OpCode::Negate => {
                let ty = reader.read_operand()?;
                let val = Val::from_qword(self.stack.pop()?, ty);
                self.stack.push(Operation::negate(val)?.to_qword())?;
            }
            OpCode::Convert => {
                let from = reader.read_operand()?;
                let to = reader.read_operand()?;
                let val = Val::from_qword(self.stack.pop()?, from);
                self.stack.push(Operation::convert(val, to).to_qword())?;
            }
            OpCode::Add | OpCode::Subtract | OpCode::Multiply | OpCode::Divide | OpCode::Modulo => {
                let ty = reader.read_operand()?;
                let (lhs, rhs) = self.stack.pop_2()?;
                let lhs = Val::from_qword(lhs, ty);
                let rhs = Val::from_qword(rhs, ty);
                let val = match opcode {
                    OpCode::Add => Operation::add(lhs, rhs)?,
                    OpCode::Subtract => Operation::subtract(lhs, rhs)?,
                    OpCode::Multiply => Operation::multiply(lhs, rhs)?,
                    OpCode::Divide => Operation::divide(lhs, rhs)?,
                    _ => Operation::modulo(lhs, rhs)?,
                };
                self.stack.push(val.to_qword())?;
            }
            OpCode::Print => {
                let ty = reader.read_operand()?;
                let val = Val::from_qword(self.stack.pop()?, ty);
                writeln!(out, "{}", Operation::print(val))?;
            }
            OpCode::Return => {
                trace!(offset, "return");
                return Ok(true);
            }
        }
        Ok(false)
    }
}
