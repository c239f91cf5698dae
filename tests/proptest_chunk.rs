use colti::mach::{Chunk, OpCode, PADDING_BYTE};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Write {
    Byte(u8),
    Word(u16),
    Dword(u32),
    Qword(u64),
}

fn write_strategy() -> impl Strategy<Value = Write> {
    prop_oneof![
        any::<u8>().prop_map(Write::Byte),
        any::<u16>().prop_map(Write::Word),
        any::<u32>().prop_map(Write::Dword),
        any::<u64>().prop_map(Write::Qword),
    ]
}

proptest! {
    #[test]
    fn immediates_are_aligned(writes in prop::collection::vec(write_strategy(), 0..40)) {
        let mut chunk = Chunk::new();
        let mut starts = vec![];
        for w in &writes {
            let before = chunk.len();
            let (width, value) = match w {
                Write::Byte(n) => { chunk.write_byte(*n); (1, *n as u64) }
                Write::Word(n) => { chunk.write_word(*n); (2, *n as u64) }
                Write::Dword(n) => { chunk.write_dword(*n); (4, *n as u64) }
                Write::Qword(n) => { chunk.write_qword(*n); (8, *n) }
            };
            let start = chunk.len() - width;
            prop_assert_eq!(start % width, 0);
            prop_assert!(start - before < width);
            prop_assert!(chunk.as_bytes()[before..start].iter().all(|b| *b == PADDING_BYTE));
            starts.push((start, width, value));
        }
        prop_assert!(chunk.capacity() >= chunk.len());
        for (start, width, value) in starts {
            let mut buf = [0u8; 8];
            buf[..width].copy_from_slice(&chunk.as_bytes()[start..start + width]);
            prop_assert_eq!(u64::from_le_bytes(buf), value);
        }
    }

    #[test]
    fn file_framing_preserves_bytes(body in prop::collection::vec(any::<u8>(), 0..200)) {
        let chunk = Chunk::from_bytes(body.clone());
        let loaded = Chunk::from_file_bytes(&chunk.to_file_bytes()).unwrap();
        prop_assert_eq!(loaded.as_bytes(), &body[..]);
    }

    #[test]
    fn flipped_body_bit_is_detected(body in prop::collection::vec(any::<u8>(), 1..64), index in any::<prop::sample::Index>(), bit in 0u8..8) {
        let mut bytes = Chunk::from_bytes(body.clone()).to_file_bytes();
        let at = 20 + index.index(body.len());
        bytes[at] ^= 1 << bit;
        prop_assert!(Chunk::from_file_bytes(&bytes).is_err());
    }

    #[test]
    fn qword_immediates_round_trip(n in any::<u64>(), lead in 0usize..8) {
        let mut chunk = Chunk::new();
        for _ in 0..lead {
            chunk.write_opcode(OpCode::Return);
        }
        chunk.write_opcode(OpCode::ImmediateQword);
        chunk.write_qword(n);
        let (value, next) = chunk.get_qword(lead).unwrap();
        prop_assert_eq!(value, n);
        prop_assert_eq!(next, chunk.len());
    }
}
