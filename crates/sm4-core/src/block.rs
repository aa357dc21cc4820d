//! Block representation helpers.

/// SM4 block of 16 bytes.
pub type Block = [u8; 16];

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Splits 16 bytes into four big-endian words.
#[inline]
pub(crate) fn load_words(bytes: &[u8; 16]) -> [u32; 4] {
    core::array::from_fn(|i| {
        let offset = i * 4;
        u32::from_be_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    })
}

/// Serializes four words as big-endian bytes in reverse word order
/// (`x3, x2, x1, x0`), the output transform R of the cipher.
#[inline]
pub(crate) fn store_words_reversed(words: [u32; 4]) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words.iter().rev()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}
