//! Core block type and hex helpers
//!
//! Every value flowing through the proof protocol - leaf, sibling,
//! intermediate node, root - is a fixed 32-byte block. Blocks have value
//! semantics and are never partially populated: the channel layer either
//! yields a whole block or reports end-of-stream.

/// Size of a tree node value and of the SHA-256 digest, in bytes.
pub const BLOCK_SIZE: usize = 32;

/// 32-byte tree node value (leaf, sibling, or root).
pub type Block = [u8; BLOCK_SIZE];

/// Convert a block to a lowercase hex string
pub fn to_hex(block: &Block) -> String {
    hex::encode(block)
}

/// Convert a hex string to a block
pub fn from_hex(hex_str: &str) -> Result<Block, hex::FromHexError> {
    let bytes = hex::decode(hex_str)?;
    if bytes.len() != BLOCK_SIZE {
        return Err(hex::FromHexError::InvalidStringLength);
    }
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&bytes);
    Ok(block)
}
