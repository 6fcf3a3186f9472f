//! Byte channel abstraction the verifier reads proofs from
//!
//! The proof protocol is delimited by end-of-stream rather than a length
//! prefix, so the read side must distinguish "no more bytes" from every
//! legal byte value. That distinction is `Option<u8>`: `None` exists only
//! at the channel layer and all 256 byte values remain valid proof data.

use std::io::{self, Read, Write};

use crate::types::{Block, BLOCK_SIZE};

/// Blocking byte-at-a-time input/output channel.
///
/// Reads block until the underlying transport supplies a byte or signals
/// end-of-stream; no timeout or cancellation is modeled. Writes model no
/// backpressure or failure.
pub trait BlockChannel {
    /// Next input byte, or `None` at end-of-stream.
    fn read_byte(&mut self) -> Option<u8>;

    /// Emit one output byte.
    fn write_byte(&mut self, byte: u8);

    /// Read a whole 32-byte block.
    ///
    /// Returns `None` if end-of-stream occurs on any of the 32 byte reads;
    /// a partial block is never surfaced.
    fn read_block(&mut self) -> Option<Block> {
        let mut block = [0u8; BLOCK_SIZE];
        for byte in block.iter_mut() {
            *byte = self.read_byte()?;
        }
        Some(block)
    }

    /// Write a 32-byte block in order.
    fn write_block(&mut self, block: &Block) {
        for &byte in block {
            self.write_byte(byte);
        }
    }
}

/// In-memory channel over a byte slice, collecting output in a `Vec`.
///
/// Used by tests and by callers that already hold the whole proof.
pub struct MemoryChannel<'a> {
    input: &'a [u8],
    pos: usize,
    output: Vec<u8>,
}

impl<'a> MemoryChannel<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            output: Vec::new(),
        }
    }

    /// Bytes written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Consume the channel, returning the written bytes.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

impl BlockChannel for MemoryChannel<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
}

/// Streaming channel over std `Read`/`Write` handles.
///
/// The channel contract has no failure path, so the first underlying I/O
/// error is latched: reads report end-of-stream and writes become no-ops
/// from then on. Callers inspect [`IoChannel::take_error`] after the run.
pub struct IoChannel<R, W> {
    reader: R,
    writer: W,
    error: Option<io::Error>,
}

impl<R: Read, W: Write> IoChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            error: None,
        }
    }

    /// First I/O error seen by either side, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flush the write side.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<R: Read, W: Write> BlockChannel for IoChannel<R, W> {
    fn read_byte(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_all(&[byte]) {
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_block_exact() {
        let input: Vec<u8> = (0..32).collect();
        let mut channel = MemoryChannel::new(&input);
        let block = channel.read_block().unwrap();
        assert_eq!(&block[..], &input[..]);
        assert_eq!(channel.read_byte(), None);
    }

    #[test]
    fn test_read_block_short_input() {
        let input = [7u8; 31];
        let mut channel = MemoryChannel::new(&input);
        assert_eq!(channel.read_block(), None);
    }

    #[test]
    fn test_read_block_empty_input() {
        let mut channel = MemoryChannel::new(&[]);
        assert_eq!(channel.read_block(), None);
    }

    #[test]
    fn test_write_block_order() {
        let mut channel = MemoryChannel::new(&[]);
        let block: Block = std::array::from_fn(|i| i as u8);
        channel.write_block(&block);
        assert_eq!(channel.output(), &block[..]);
    }

    #[test]
    fn test_io_channel_round_trip() {
        let input: Vec<u8> = (0..64).collect();
        let mut out = Vec::new();
        let mut channel = IoChannel::new(input.as_slice(), &mut out);

        let a = channel.read_block().unwrap();
        let b = channel.read_block().unwrap();
        channel.write_block(&b);
        channel.write_block(&a);
        assert_eq!(channel.read_byte(), None);
        assert!(channel.take_error().is_none());

        assert_eq!(&out[..32], &input[32..]);
        assert_eq!(&out[32..], &input[..32]);
    }
}
