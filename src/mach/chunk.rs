use super::{Address, OpCode, OperandType, Val, INLINE_CAPACITY, PADDING_BYTE};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Byte-code buffer
///
/// A growable opcode stream. The first [`INLINE_CAPACITY`] bytes live
/// inside the `Chunk` itself; the buffer moves to the heap once it
/// outgrows them.
///
/// Multi-byte immediates are little-endian and aligned to their own width,
/// counted from the start of the chunk. Skipped bytes hold [`PADDING_BYTE`].
#[derive(Clone)]
pub struct Chunk {
    len: usize,
    capacity: usize,
    storage: Storage,
}

#[derive(Clone)]
enum Storage {
    Inline([u8; INLINE_CAPACITY]),
    Heap(Vec<u8>),
}

impl Default for Chunk {
    fn default() -> Self {
        Chunk::new()
    }
}

impl PartialEq for Chunk {
    fn eq(&self, other: &Chunk) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chunk[{}]", self.hex())
    }
}

impl Chunk {
    pub fn new() -> Chunk {
        Chunk {
            len: 0,
            capacity: INLINE_CAPACITY,
            storage: Storage::Inline([0; INLINE_CAPACITY]),
        }
    }

    pub fn with_capacity(capacity: usize) -> Chunk {
        if capacity <= INLINE_CAPACITY {
            return Chunk::new();
        }
        Chunk {
            len: 0,
            capacity,
            storage: Storage::Heap(Vec::with_capacity(capacity)),
        }
    }

    /// Adopts a raw opcode stream.
    pub fn from_bytes(bytes: Vec<u8>) -> Chunk {
        if bytes.len() <= INLINE_CAPACITY {
            let mut chunk = Chunk::new();
            chunk.write_bytes(&bytes);
            return chunk;
        }
        Chunk {
            len: bytes.len(),
            capacity: bytes.len(),
            storage: Storage::Heap(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True while the bytes still fit in the inline buffer.
    pub fn is_inline(&self) -> bool {
        matches!(self.storage, Storage::Inline(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Inline(buf) => &buf[..self.len],
            Storage::Heap(vec) => vec.as_slice(),
        }
    }

    /// Forgets the contents but keeps the capacity.
    pub fn clear(&mut self) {
        if let Storage::Heap(vec) = &mut self.storage {
            vec.clear();
        }
        self.len = 0;
    }

    pub fn reader(&self) -> ChunkReader<'_> {
        ChunkReader::new(self.as_bytes())
    }

    pub fn reader_at(&self, offset: Address) -> ChunkReader<'_> {
        let mut reader = self.reader();
        reader.offset = offset;
        reader
    }

    /// Space-separated upper-case hex pairs.
    pub fn hex(&self) -> String {
        self.as_bytes()
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn reserve(&mut self, additional: usize) {
        let needed = self.len + additional;
        if needed <= self.capacity {
            return;
        }
        let capacity = needed.max(self.capacity * 2);
        debug!(from = self.capacity, to = capacity, "chunk grows");
        let mut vec = Vec::with_capacity(capacity);
        vec.extend_from_slice(self.as_bytes());
        self.storage = Storage::Heap(vec);
        self.capacity = capacity;
    }

    fn pad_to(&mut self, width: usize) {
        let pad = (width - self.len % width) % width;
        for _ in 0..pad {
            self.write_byte(PADDING_BYTE);
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        match &mut self.storage {
            Storage::Inline(buf) => buf[self.len..self.len + bytes.len()].copy_from_slice(bytes),
            Storage::Heap(vec) => vec.extend_from_slice(bytes),
        }
        self.len += bytes.len();
    }

    pub fn write_opcode(&mut self, opcode: OpCode) {
        self.write_byte(opcode as u8);
    }

    pub fn write_operand(&mut self, operand: OperandType) {
        self.write_byte(operand as u8);
    }

    pub fn write_word(&mut self, word: u16) {
        self.reserve(1 + 2);
        self.pad_to(2);
        self.write_bytes(&word.to_le_bytes());
    }

    pub fn write_dword(&mut self, dword: u32) {
        self.reserve(3 + 4);
        self.pad_to(4);
        self.write_bytes(&dword.to_le_bytes());
    }

    pub fn write_qword(&mut self, qword: u64) {
        self.reserve(7 + 8);
        self.pad_to(8);
        self.write_bytes(&qword.to_le_bytes());
    }

    /// Emits the immediate opcode matching the width of `val`, then `val`.
    pub fn write_immediate(&mut self, val: Val) {
        use OperandType::*;
        let qword = val.to_qword();
        match val.operand_type() {
            Bool | I8 | U8 => {
                self.write_opcode(OpCode::ImmediateByte);
                self.write_byte(qword.byte());
            }
            I16 | U16 => {
                self.write_opcode(OpCode::ImmediateWord);
                self.write_word(qword.word());
            }
            I32 | U32 | Float => {
                self.write_opcode(OpCode::ImmediateDword);
                self.write_dword(qword.dword());
            }
            I64 | U64 | Double => {
                self.write_opcode(OpCode::ImmediateQword);
                self.write_qword(qword.bits());
            }
        }
    }

    fn immediate_at(&self, offset: Address, expected: OpCode) -> Result<ChunkReader<'_>> {
        let mut reader = self.reader_at(offset);
        let found = reader.read_byte().map_err(|e| e.at_offset(offset))?;
        if found != expected as u8 {
            return Err(error!(WrongImmediate, @offset; format!("expected {}", expected)));
        }
        Ok(reader)
    }

    /// `offset` points at an `OP_IMMEDIATE_BYTE`. Returns the byte and the
    /// offset of the next instruction.
    pub fn get_byte(&self, offset: Address) -> Result<(u8, Address)> {
        let mut reader = self.immediate_at(offset, OpCode::ImmediateByte)?;
        let byte = reader.read_byte().map_err(|e| e.at_offset(offset))?;
        Ok((byte, reader.offset()))
    }

    pub fn get_word(&self, offset: Address) -> Result<(u16, Address)> {
        let mut reader = self.immediate_at(offset, OpCode::ImmediateWord)?;
        let word = reader.read_word().map_err(|e| e.at_offset(offset))?;
        Ok((word, reader.offset()))
    }

    pub fn get_dword(&self, offset: Address) -> Result<(u32, Address)> {
        let mut reader = self.immediate_at(offset, OpCode::ImmediateDword)?;
        let dword = reader.read_dword().map_err(|e| e.at_offset(offset))?;
        Ok((dword, reader.offset()))
    }

    pub fn get_qword(&self, offset: Address) -> Result<(u64, Address)> {
        let mut reader = self.immediate_at(offset, OpCode::ImmediateQword)?;
        let qword = reader.read_qword().map_err(|e| e.at_offset(offset))?;
        Ok((qword, reader.offset()))
    }
}

/// ## Bounds-checked cursor over an opcode stream
///
/// Reads align exactly as the [`Chunk`] writers pad. Errors carry no
/// offset; callers know which instruction was being decoded.
pub struct ChunkReader<'a> {
    bytes: &'a [u8],
    offset: Address,
}

impl<'a> ChunkReader<'a> {
    pub fn new(bytes: &'a [u8]) -> ChunkReader<'a> {
        ChunkReader { bytes, offset: 0 }
    }

    pub fn offset(&self) -> Address {
        self.offset
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = match self.offset.checked_add(len) {
            Some(end) if end <= self.bytes.len() => end,
            _ => {
                return Err(error!(TruncatedInstruction; format!(
                    "needs {} bytes, {} remain",
                    len,
                    self.bytes.len().saturating_sub(self.offset)
                )))
            }
        };
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn align(&mut self, width: usize) -> Result<()> {
        let pad = (width - self.offset % width) % width;
        self.offset = self
            .offset
            .checked_add(pad)
            .ok_or_else(|| error!(TruncatedInstruction; "offset out of range"))?;
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_opcode(&mut self) -> Result<OpCode> {
        let byte = self.read_byte()?;
        OpCode::try_from(byte).map_err(|b| error!(UnknownOpcode; format!("'{}'", b)))
    }

    pub fn read_operand(&mut self) -> Result<OperandType> {
        let byte = self.read_byte()?;
        OperandType::try_from(byte).map_err(|b| error!(UnknownOperand; format!("'{}'", b)))
    }

    pub fn read_word(&mut self) -> Result<u16> {
        self.align(2)?;
        let mut buf = [0; 2];
        buf.copy_from_slice(self.take(2)?);
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_dword(&mut self) -> Result<u32> {
        self.align(4)?;
        let mut buf = [0; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_qword(&mut self) -> Result<u64> {
        self.align(8)?;
        let mut buf = [0; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_inline() {
        let chunk = Chunk::new();
        assert!(chunk.is_inline());
        assert!(chunk.is_empty());
        assert_eq!(chunk.capacity(), INLINE_CAPACITY);
        assert_eq!(Chunk::with_capacity(0).capacity(), INLINE_CAPACITY);
    }

    #[test]
    fn test_ninth_byte_doubles() {
        let mut chunk = Chunk::new();
        for n in 0..8 {
            chunk.write_byte(n);
        }
        assert!(chunk.is_inline());
        chunk.write_byte(8);
        assert!(!chunk.is_inline());
        assert_eq!(chunk.capacity(), 16);
        assert_eq!(chunk.as_bytes(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_word_padding() {
        let mut chunk = Chunk::new();
        chunk.write_opcode(OpCode::ImmediateWord);
        chunk.write_word(0x1234);
        assert_eq!(chunk.as_bytes(), &[1, 0xCD, 0x34, 0x12]);
        assert_eq!(chunk.get_word(0).unwrap(), (0x1234, 4));
    }

    #[test]
    fn test_wrong_immediate() {
        let mut chunk = Chunk::new();
        chunk.write_opcode(OpCode::ImmediateByte);
        chunk.write_byte(7);
        assert_eq!(chunk.get_byte(0).unwrap(), (7, 2));
        let e = chunk.get_word(0).unwrap_err();
        assert_eq!(e.code(), crate::lang::ErrorCode::WrongImmediate);
        assert_eq!(e.offset(), Some(0));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut chunk = Chunk::new();
        chunk.write_qword(1);
        chunk.write_qword(2);
        let capacity = chunk.capacity();
        chunk.clear();
        assert!(chunk.is_empty());
        assert_eq!(chunk.capacity(), capacity);
        chunk.write_byte(9);
        assert_eq!(chunk.as_bytes(), &[9]);
    }

    #[test]
    fn test_offset_past_end() {
        use crate::lang::ErrorCode;
        let mut chunk = Chunk::new();
        chunk.write_immediate(Val::U64(1));
        let e = chunk.get_byte(usize::MAX).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TruncatedInstruction);
        assert_eq!(e.offset(), Some(usize::MAX));
        let e = chunk.get_qword(usize::MAX - 1).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TruncatedInstruction);
        let e = chunk.reader_at(usize::MAX - 2).read_qword().unwrap_err();
        assert_eq!(e.code(), ErrorCode::TruncatedInstruction);
        let e = chunk.reader_at(usize::MAX).read_byte().unwrap_err();
        assert_eq!(e.code(), ErrorCode::TruncatedInstruction);
    }
}
