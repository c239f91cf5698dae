mod common;
use colti::mach::{disassemble, disassemble_instruction, Chunk, OpCode, OperandType, Val};

#[test]
fn test_demo_listing() {
    let s = disassemble(&common::demo_chunk(), "Test1").unwrap();
    assert_eq!(
        s,
        "============ Test1 ============\n\
         0000 OP_IMMEDIATE_QWORD '0xFFFFFFFFFFFFFFF1'\n\
         0016 OP_NEGATE 'INT64'\n\
         0018 OP_PRINT 'INT64'\n\
         0020 OP_IMMEDIATE_QWORD '0xF'\n\
         0032 OP_PRINT 'INT64'\n\
         0034 OP_DIVIDE 'INT64'\n\
         0036 OP_PRINT 'INT64'\n\
         0038 OP_RETURN\n"
    );
}

#[test]
fn test_convert_and_narrow_immediates() {
    let mut chunk = Chunk::new();
    chunk.write_immediate(Val::U8(7));
    chunk.write_immediate(Val::I16(0x1234));
    common::typed(&mut chunk, OpCode::Convert, OperandType::I16);
    chunk.write_operand(OperandType::Double);
    let s = disassemble(&chunk, "narrow").unwrap();
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines[1], "0000 OP_IMMEDIATE_BYTE '0x7'");
    assert_eq!(lines[2], "0002 OP_IMMEDIATE_WORD '0x1234'");
    assert_eq!(lines[3], "0006 OP_CONVERT 'INT16' -> 'DOUBLE'");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_single_instruction() {
    let chunk = common::division_chunk();
    let (s, next) = disassemble_instruction(&chunk, 32).unwrap();
    assert_eq!(s, "0032 OP_DIVIDE 'INT64'");
    assert_eq!(next, 34);
}

#[test]
fn test_mnemonics() {
    assert_eq!(OpCode::Modulo.to_string(), "OP_MODULO");
    assert_eq!(OpCode::ImmediateDword.to_string(), "OP_IMMEDIATE_DWORD");
    assert_eq!(OperandType::U16.to_string(), "UINT16");
    assert_eq!(OperandType::Bool.to_string(), "BOOL");
}
