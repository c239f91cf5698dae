#![allow(dead_code)]

use colti::lang::{Error, Scanner, Token};
use colti::mach::{Chunk, OpCode, OperandType, StackVM, Val};

/// Every token up to `Eof`, paired with the scanner's view of it.
pub fn scan(s: &str) -> Vec<(Token, String)> {
    let mut scanner = Scanner::new(s);
    let mut v = vec![];
    loop {
        let token = scanner.next_token();
        let text = match token {
            Token::Eof => break,
            Token::Identifier => scanner.identifier().to_string(),
            Token::String => scanner.string().to_string(),
            Token::Integer => scanner.integer().to_string(),
            Token::Double => scanner.double().to_string(),
            Token::Error => scanner.error().map(|e| e.to_string()).unwrap_or_default(),
            _ => scanner.lexeme().to_string(),
        };
        v.push((token, text));
    }
    v
}

pub fn exec(chunk: &Chunk) -> (String, Result<(), Error>) {
    let mut vm = StackVM::new();
    let mut out: Vec<u8> = vec![];
    let result = vm.run(chunk, &mut out);
    (String::from_utf8_lossy(&out).into_owned(), result)
}

/// `-15` negated and printed, `15` printed, then a divide that has
/// nothing left to divide.
pub fn demo_chunk() -> Chunk {
    let mut chunk = Chunk::new();
    chunk.write_opcode(OpCode::ImmediateQword);
    chunk.write_qword(-15i64 as u64);
    typed(&mut chunk, OpCode::Negate, OperandType::I64);
    typed(&mut chunk, OpCode::Print, OperandType::I64);
    chunk.write_opcode(OpCode::ImmediateQword);
    chunk.write_qword(15);
    typed(&mut chunk, OpCode::Print, OperandType::I64);
    typed(&mut chunk, OpCode::Divide, OperandType::I64);
    typed(&mut chunk, OpCode::Print, OperandType::I64);
    chunk.write_opcode(OpCode::Return);
    chunk
}

/// `15 / 15` printed.
pub fn division_chunk() -> Chunk {
    let mut chunk = Chunk::new();
    chunk.write_immediate(Val::I64(15));
    chunk.write_immediate(Val::I64(15));
    typed(&mut chunk, OpCode::Divide, OperandType::I64);
    typed(&mut chunk, OpCode::Print, OperandType::I64);
    chunk.write_opcode(OpCode::Return);
    chunk
}

pub fn typed(chunk: &mut Chunk, opcode: OpCode, ty: OperandType) {
    chunk.write_opcode(opcode);
    chunk.write_operand(ty);
}
