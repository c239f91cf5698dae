use crate::lang::Error;
use crate::mach::{Chunk, OpCode, OperandType, StackVM, Val};


fn run(chunk: &Chunk) -> (String, Result<(), Error>) {
    let mut vm = StackVM::new();
    run_on(&mut vm, chunk)
}

fn run_on(vm: &mut StackVM, chunk: &Chunk) -> (String, Result<(), Error>) {
    let mut out: Vec<u8> = vec![];
    let result = vm.run(chunk, &mut out);
    (String::from_utf8_lossy(&out).into_owned(), result)
}

fn binary(lhs: Val, rhs: Val, opcode: OpCode) -> Chunk {
    let ty = lhs.operand_type();
    let mut chunk = Chunk::new();
    chunk.write_immediate(lhs);
    chunk.write_immediate(rhs);
    chunk.write_opcode(opcode);
    chunk.write_operand(ty);
    chunk.write_opcode(OpCode::Print);
    chunk.write_operand(ty);
    chunk.write_opcode(OpCode::Return);
    chunk
}

fn print_as(val: Val, ty: OperandType) -> Chunk {
    let mut chunk = Chunk::new();
    chunk.write_immediate(val);
    chunk.write_opcode(OpCode::Print);
    chunk.write_operand(ty);
    chunk.write_opcode(OpCode::Return);
    chunk
}
