//! BitReader: reads a packed bitstream most significant bit first.
//!
//! The reader stops at a caller-given bit limit so trailing padding bits are never handed out.
//!

const BIT_MASK: u8 = 0xff;

/// Reads bits from an in-memory packed buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    remaining: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a BitReader over every bit of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_limit(buffer, buffer.len() * 8)
    }

    /// Creates a BitReader that hands out at most `limit` bits of `buffer`.
    pub fn with_limit(buffer: &'a [u8], limit: usize) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            remaining: limit.min(buffer.len() * 8),
        }
    }

    /// Bits left before the limit.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let bit =
            (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        self.remaining -= 1;
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.bool_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
