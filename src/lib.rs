//! # Colti
//!
//! Building blocks of the Colt language.
//!
//! * [`lang`] turns Colt source text into tokens.
//! * [`mach`] holds byte-code [`Chunk`](mach::Chunk)s and the
//!   [`StackVM`](mach::StackVM) that runs them.
//!
//! ```
//! use colti::mach::{Chunk, OpCode, OperandType, StackVM, Val};
//!
//! let mut chunk = Chunk::new();
//! chunk.write_immediate(Val::I64(-15));
//! chunk.write_opcode(OpCode::Negate);
//! chunk.write_operand(OperandType::I64);
//! chunk.write_opcode(OpCode::Print);
//! chunk.write_operand(OperandType::I64);
//! chunk.write_opcode(OpCode::Return);
//!
//! let mut out = Vec::new();
//! StackVM::new().run(&chunk, &mut out).unwrap();
//! assert_eq!(out, b"15\n");
//! ```

pub mod lang;
pub mod mach;
