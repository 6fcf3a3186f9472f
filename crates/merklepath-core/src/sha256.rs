//! Embedded incremental SHA-256 engine (FIPS 180-4)
//!
//! Self-contained implementation with no dependency on the rest of the
//! crate beyond the [`Block`] digest type. Input is buffered into 64-byte
//! blocks; each full block runs the 64-round compression function. The
//! digest is insensitive to how input is chunked across `update` calls.
//!
//! The message length field in the final padding block uses the full
//! standard 64-bit encoding, so digests match SHA-256 for inputs of any
//! length, not just the fixed 64-byte inputs the proof verifier feeds it.

use crate::types::{Block, BLOCK_SIZE};

/// Input block size of the compression function, in bytes.
const MESSAGE_BLOCK_SIZE: usize = 64;

/// Round constants: first 32 bits of the fractional parts of the cube
/// roots of the first 64 primes.
const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Initial hash values: first 32 bits of the fractional parts of the
/// square roots of the first 8 primes.
const H0: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

#[inline]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// One application of the SHA-256 compression function to a 64-byte block.
fn compress(state: &mut [u32; 8], block: &[u8; MESSAGE_BLOCK_SIZE]) {
    // Message schedule: 16 big-endian input words expanded to 64.
    let mut w = [0u32; 64];
    for (i, word) in w.iter_mut().take(16).enumerate() {
        let j = i * 4;
        *word = u32::from_be_bytes([block[j], block[j + 1], block[j + 2], block[j + 3]]);
    }
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for i in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    state[5] = state[5].wrapping_add(f);
    state[6] = state[6].wrapping_add(g);
    state[7] = state[7].wrapping_add(h);
}

/// Incremental SHA-256 state.
///
/// `finalize` consumes the engine, so a finished state cannot be fed more
/// input by accident - start a fresh engine per digest.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; MESSAGE_BLOCK_SIZE],
    buffered: usize,
    bit_len: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256 {
    /// Create a fresh engine.
    pub fn new() -> Self {
        Self {
            state: H0,
            buffer: [0u8; MESSAGE_BLOCK_SIZE],
            buffered: 0,
            bit_len: 0,
        }
    }

    /// Absorb input bytes. May be called any number of times; the digest
    /// does not depend on how the input is split across calls.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.buffer[self.buffered] = byte;
            self.buffered += 1;
            if self.buffered == MESSAGE_BLOCK_SIZE {
                compress(&mut self.state, &self.buffer);
                self.bit_len += (MESSAGE_BLOCK_SIZE as u64) * 8;
                self.buffered = 0;
            }
        }
    }

    /// Pad, run the final compression(s), and return the 32-byte digest.
    pub fn finalize(mut self) -> Block {
        let bit_len = self.bit_len + (self.buffered as u64) * 8;

        self.buffer[self.buffered] = 0x80;
        self.buffered += 1;

        // No room for the 8-byte length field: close out this block first.
        if self.buffered > MESSAGE_BLOCK_SIZE - 8 {
            self.buffer[self.buffered..].fill(0);
            compress(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        self.buffer[self.buffered..MESSAGE_BLOCK_SIZE - 8].fill(0);
        self.buffer[MESSAGE_BLOCK_SIZE - 8..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &self.buffer);

        let mut digest = [0u8; BLOCK_SIZE];
        for (i, word) in self.state.iter().enumerate() {
            digest[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        digest
    }
}

/// Compute the SHA-256 digest of `data` in one call.
pub fn sha256(data: &[u8]) -> Block {
    let mut engine = Sha256::new();
    engine.update(data);
    engine.finalize()
}
