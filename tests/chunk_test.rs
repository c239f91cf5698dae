mod common;
use colti::lang::ErrorCode;
use colti::mach::{Chunk, OpCode, OperandType, Val, INLINE_CAPACITY, PADDING_BYTE};

#[test]
fn test_demo_stays_aligned() {
    let chunk = common::demo_chunk();
    let bytes = chunk.as_bytes();
    assert_eq!(bytes.len(), 39);
    assert_eq!(bytes[0], OpCode::ImmediateQword as u8);
    assert!(bytes[1..8].iter().all(|b| *b == PADDING_BYTE));
    assert_eq!(&bytes[8..16], &(-15i64).to_le_bytes());
    assert_eq!(bytes[16], OpCode::Negate as u8);
    assert_eq!(bytes[17], OperandType::I64 as u8);
    assert_eq!(bytes[20], OpCode::ImmediateQword as u8);
    assert_eq!(&bytes[24..32], &15i64.to_le_bytes());
    assert_eq!(bytes[38], OpCode::Return as u8);
    assert!(!chunk.is_inline());
}

#[test]
fn test_get_immediates() {
    let mut chunk = Chunk::new();
    chunk.write_immediate(Val::U8(0xAB));
    chunk.write_immediate(Val::I16(-2));
    chunk.write_immediate(Val::Float(1.0));
    chunk.write_immediate(Val::U64(u64::max_value()));
    let (byte, next) = chunk.get_byte(0).unwrap();
    assert_eq!((byte, next), (0xAB, 2));
    let (word, next) = chunk.get_word(next).unwrap();
    assert_eq!((word, next), (0xFFFE, 6));
    let (dword, next) = chunk.get_dword(next).unwrap();
    assert_eq!((dword, next), (1.0f32.to_bits(), 12));
    let (qword, next) = chunk.get_qword(next).unwrap();
    assert_eq!((qword, next), (u64::max_value(), 24));
    assert_eq!(next, chunk.len());
}

#[test]
fn test_truncated_immediate() {
    let chunk = Chunk::from_bytes(vec![OpCode::ImmediateDword as u8, PADDING_BYTE, PADDING_BYTE]);
    let e = chunk.get_dword(0).unwrap_err();
    assert_eq!(e.code(), ErrorCode::TruncatedInstruction);
    assert_eq!(e.offset(), Some(0));
}

#[test]
fn test_write_bytes_grows_to_fit() {
    let mut chunk = Chunk::new();
    chunk.write_bytes(&[1; 40]);
    assert_eq!(chunk.len(), 40);
    assert!(chunk.capacity() >= 40);
    assert!(chunk.capacity() > INLINE_CAPACITY);
}

#[test]
fn test_reader_matches_writer() {
    let mut chunk = Chunk::new();
    chunk.write_byte(1);
    chunk.write_dword(0x0102_0304);
    chunk.write_word(7);
    chunk.write_qword(9);
    let mut r = chunk.reader();
    assert_eq!(r.read_byte().unwrap(), 1);
    assert_eq!(r.read_dword().unwrap(), 0x0102_0304);
    assert_eq!(r.read_word().unwrap(), 7);
    assert_eq!(r.read_qword().unwrap(), 9);
    assert!(r.is_at_end());
    assert_eq!(r.offset(), 24);
    assert_eq!(r.read_byte().unwrap_err().code(), ErrorCode::TruncatedInstruction);
}

#[test]
fn test_hex() {
    let mut chunk = Chunk::new();
    chunk.write_opcode(OpCode::ImmediateWord);
    chunk.write_word(0xBEEF);
    chunk.write_opcode(OpCode::Return);
    assert_eq!(chunk.hex(), "01 CD EF BE 0C");
    assert_eq!(Chunk::new().hex(), "");
}

#[test]
fn test_from_bytes_small_is_inline() {
    let chunk = Chunk::from_bytes(vec![OpCode::Return as u8]);
    assert!(chunk.is_inline());
    assert_eq!(chunk, {
        let mut c = Chunk::new();
        c.write_opcode(OpCode::Return);
        c
    });
}
