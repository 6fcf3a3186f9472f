//! Streaming Merkle inclusion-proof verifier
//!
//! Consumes a proof off a [`BlockChannel`] and folds it into a root in
//! O(1) memory: `leaf(32B) side(1B) sibling(32B) [side(1B) sibling(32B)]*`
//! terminated by end-of-stream. Each step is folded immediately and
//! discarded - working state is the leaf, the two fold operands, and one
//! hash engine, regardless of proof depth.
//!
//! Output is exactly two blocks written back through the channel: the
//! unmodified leaf, then the accumulated root (the leaf itself for a
//! degenerate single-leaf proof).

use thiserror::Error;

use crate::channel::BlockChannel;
use crate::sha256::Sha256;
use crate::types::Block;

/// Position of the currently-held node in the next hash concatenation.
///
/// Byte value `1` on the wire means [`Side::Right`]; every other byte value
/// means [`Side::Left`]. Swapping operand order changes the digest, so this
/// mapping is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn from_byte(byte: u8) -> Self {
        if byte == 1 {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// Verification failed before the grammar allows the stream to end.
///
/// End-of-stream at any sibling read is legitimate termination, not an
/// error; only a truncated leaf or a missing first side byte make a proof
/// malformed.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("stream ended before a full 32-byte leaf was read")]
    TruncatedLeaf,
    #[error("stream ended before the first side byte")]
    MissingFirstSide,
}

/// Result of a completed verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOutcome {
    /// The leaf exactly as read from the stream.
    pub leaf: Block,
    /// The accumulated root; equals `leaf` for a degenerate proof.
    pub root: Block,
    /// Number of fold steps performed (0 for a degenerate proof).
    pub depth: usize,
}

/// Hash two blocks into their parent node: `SHA256(left || right)`.
pub fn hash_pair(left: &Block, right: &Block) -> Block {
    let mut engine = Sha256::new();
    engine.update(left);
    engine.update(right);
    engine.finalize()
}

/// Drive one verification run over `channel`.
///
/// Reads the proof stream, writes the 64-byte `leaf || root` result back
/// through the channel, and returns the same data as a [`ProofOutcome`]
/// for library callers. All state is local to this call; separate runs
/// share nothing.
pub fn verify<C: BlockChannel>(channel: &mut C) -> Result<ProofOutcome, VerifyError> {
    let leaf = channel.read_block().ok_or(VerifyError::TruncatedLeaf)?;

    let side = match channel.read_byte() {
        Some(byte) => Side::from_byte(byte),
        None => return Err(VerifyError::MissingFirstSide),
    };

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    place(&mut left, &mut right, &leaf, side);

    // Degenerate proof: a one-leaf tree, the leaf is its own root.
    if !read_sibling(channel, &mut left, &mut right, side) {
        return Ok(finish(channel, leaf, leaf, 0));
    }

    let mut depth = 0;
    loop {
        let parent = hash_pair(&left, &right);
        depth += 1;

        let side = match channel.read_byte() {
            Some(byte) => Side::from_byte(byte),
            None => return Ok(finish(channel, leaf, parent, depth)),
        };

        place(&mut left, &mut right, &parent, side);
        if !read_sibling(channel, &mut left, &mut right, side) {
            return Ok(finish(channel, leaf, parent, depth));
        }
    }
}

/// Put `node` into the operand slot its side bit names.
fn place(left: &mut Block, right: &mut Block, node: &Block, side: Side) {
    match side {
        Side::Left => *left = *node,
        Side::Right => *right = *node,
    }
}

/// Read the next sibling into the slot opposite `side`.
/// Returns false if end-of-stream occurred before a full block.
fn read_sibling<C: BlockChannel>(
    channel: &mut C,
    left: &mut Block,
    right: &mut Block,
    side: Side,
) -> bool {
    let Some(sibling) = channel.read_block() else {
        return false;
    };
    match side {
        Side::Left => *right = sibling,
        Side::Right => *left = sibling,
    }
    true
}

fn finish<C: BlockChannel>(channel: &mut C, leaf: Block, root: Block, depth: usize) -> ProofOutcome {
    channel.write_block(&leaf);
    channel.write_block(&root);
    ProofOutcome { leaf, root, depth }
}
