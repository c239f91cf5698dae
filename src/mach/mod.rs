/*!
## Rust Machine Module

This Rust module holds the byte-code buffer and the stack virtual machine
that executes it.

*/

pub type Address = usize;

/// Default number of slots on the operand stack.
pub const STACK_CAPACITY: usize = 256;

/// Bytes a [`Chunk`] holds before moving to the heap.
pub const INLINE_CAPACITY: usize = 8;

/// Written in place of the bytes skipped to align an immediate.
pub const PADDING_BYTE: u8 = 0xCD;

mod chunk;
mod codec;
mod listing;
mod opcode;
mod operation;
mod runtime;
mod stack;
mod val;

#[cfg(test)]
mod tests;

pub use chunk::Chunk;
pub use chunk::ChunkReader;
pub use codec::CHUNK_MAGIC;
pub use listing::disassemble;
pub use listing::disassemble_instruction;
pub use opcode::OpCode;
pub use opcode::OperandType;
pub use operation::Operation;
pub use runtime::StackVM;
pub use stack::Stack;
pub use val::QWord;
pub use val::Val;
