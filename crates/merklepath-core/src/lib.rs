//! Streaming Merkle inclusion-proof verification
//!
//! Verifies binary-Merkle-tree inclusion proofs read incrementally off a
//! byte channel, folding the leaf up to the claimed root with an embedded
//! SHA-256 engine. Memory is O(1) in proof depth: the proof is consumed
//! one (side, sibling) step at a time, never buffered.
//!
//! # Wire format
//!
//! ```text
//! leaf(32B) side(1B) sibling(32B) [side(1B) sibling(32B)]* <end-of-stream>
//! ```
//!
//! Side byte `1` means the currently-held node is the right operand of the
//! next hash; any other value means left. The stream simply ends when the
//! proof is exhausted; the verifier writes back `leaf || root` (64 bytes).
//!
//! # Example
//!
//! ```rust
//! use merklepath_core::{hash_pair, verify, MemoryChannel};
//!
//! let leaf = [0x01u8; 32];
//! let sibling = [0x02u8; 32];
//!
//! let mut proof = leaf.to_vec();
//! proof.push(0); // leaf is the left child
//! proof.extend_from_slice(&sibling);
//!
//! let mut channel = MemoryChannel::new(&proof);
//! let outcome = verify(&mut channel).unwrap();
//! assert_eq!(outcome.root, hash_pair(&leaf, &sibling));
//! ```

pub mod channel;
pub mod sha256;
pub mod types;
pub mod verifier;

pub use channel::{BlockChannel, IoChannel, MemoryChannel};
pub use sha256::{sha256, Sha256};
pub use types::{from_hex, to_hex, Block, BLOCK_SIZE};
pub use verifier::{hash_pair, verify, ProofOutcome, Side, VerifyError};
