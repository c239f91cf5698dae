use super::{Address, Chunk, OpCode, OperandType};
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Human-readable listing of a whole chunk, one instruction per line.
pub fn disassemble(chunk: &Chunk, name: &str) -> Result<String> {
    let mut out = format!("============ {} ============\n", name);
    if chunk.is_empty() {
        out.push_str("!EMPTY CHUNK!\n");
        return Ok(out);
    }
    let mut offset = 0;
    while offset < chunk.len() {
        let (line, next) = disassemble_instruction(chunk, offset)?;
        out.push_str(&line);
        out.push('\n');
        offset = next;
    }
    Ok(out)
}

/// One instruction, prefixed with its offset. Returns the text and the
/// offset of the next instruction. Unknown opcodes advance a single byte.
pub fn disassemble_instruction(chunk: &Chunk, offset: Address) -> Result<(String, Address)> {
    let mut reader = chunk.reader_at(offset);
    let prefix = format!("{:04} ", offset);
    let byte = reader.read_byte().map_err(|e| e.at_offset(offset))?;
    let opcode = match OpCode::try_from(byte) {
        Ok(opcode) => opcode,
        Err(byte) => return Ok((format!("{}UNKNOWN OPCODE: '{}'", prefix, byte), offset + 1)),
    };
    if let Some(width) = opcode.immediate_width() {
        let (n, next) = match width {
            1 => chunk.get_byte(offset).map(|(n, next)| (u64::from(n), next))?,
            2 => chunk.get_word(offset).map(|(n, next)| (u64::from(n), next))?,
            4 => chunk.get_dword(offset).map(|(n, next)| (u64::from(n), next))?,
            _ => chunk.get_qword(offset)?,
        };
        return Ok((format!("{}{} '0x{:X}'", prefix, opcode, n), next));
    }
    let operands = (0..opcode.operand_count())
        .map(|_| reader.read_byte().map(operand_name))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| e.at_offset(offset))?;
    let text = match operands.as_slice() {
        [] => format!("{}{}", prefix, opcode),
        [from, to] => format!("{}{} '{}' -> '{}'", prefix, opcode, from, to),
        _ => format!("{}{} '{}'", prefix, opcode, operands.join("' '")),
    };
    Ok((text, reader.offset()))
}

fn operand_name(byte: u8) -> String {
    match OperandType::try_from(byte) {
        Ok(ty) => ty.to_string(),
        Err(_) => "UNKNOWN".into(),
    }
}
