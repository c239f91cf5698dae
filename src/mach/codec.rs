use super::Chunk;
use crate::error;
use crate::lang::Error;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// First bytes of every chunk file.
pub const CHUNK_MAGIC: [u8; 4] = *b"CTC\0";

const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = 4 + 4 + 8 + 4;

impl Chunk {
    /// Frames the opcode stream for storage.
    ///
    /// ```text
    /// 0..4    b"CTC\0"
    /// 4       format version
    /// 5..8    zero
    /// 8..16   body length, u64 LE
    /// 16..20  CRC-32 of the body, u32 LE
    /// 20..    body
    /// ```
    pub fn to_file_bytes(&self) -> Vec<u8> {
        let body = self.as_bytes();
        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
        bytes.extend_from_slice(&CHUNK_MAGIC);
        bytes.extend_from_slice(&[FORMAT_VERSION, 0, 0, 0]);
        bytes.extend_from_slice(&(body.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&crc::crc32::checksum_ieee(body).to_le_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    pub fn from_file_bytes(bytes: &[u8]) -> Result<Chunk> {
        if bytes.len() < HEADER_LEN {
            return Err(error!(BadChunkFile; "header truncated"));
        }
        if bytes[0..4] != CHUNK_MAGIC {
            return Err(error!(BadChunkFile; "not a chunk file"));
        }
        if bytes[4] != FORMAT_VERSION {
            return Err(error!(UnsupportedVersion; format!("version {}", bytes[4])));
        }
        let mut len = [0; 8];
        len.copy_from_slice(&bytes[8..16]);
        let len = u64::from_le_bytes(len);
        let mut crc = [0; 4];
        crc.copy_from_slice(&bytes[16..20]);
        let crc = u32::from_le_bytes(crc);
        let body = &bytes[HEADER_LEN..];
        if body.len() as u64 != len {
            return Err(error!(BadChunkFile; format!(
                "expected {} bytes of code, found {}",
                len,
                body.len()
            )));
        }
        if crc::crc32::checksum_ieee(body) != crc {
            return Err(error!(ChecksumMismatch));
        }
        Ok(Chunk::from_bytes(body.to_vec()))
    }

    pub fn serialize<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(&self.to_file_bytes())?;
        debug!(path = %path.display(), len = self.len(), "chunk serialized");
        Ok(())
    }

    pub fn deserialize<P: AsRef<Path>>(path: P) -> Result<Chunk> {
        let path = path.as_ref();
        let mut bytes = vec![];
        File::open(path)?.read_to_end(&mut bytes)?;
        let chunk = Chunk::from_file_bytes(&bytes)?;
        debug!(path = %path.display(), len = chunk.len(), "chunk deserialized");
        Ok(chunk)
    }
}
