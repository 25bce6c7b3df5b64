use log::{error, trace};

use crate::error::CodecError;
use crate::huffman_coding::codebook::Codebook;

/// Creates a bitstream for output. Bits are packed most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the size specified. Call flush() to push
    /// the final partial byte into the buffer.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        self.write_stream();
    }

    /// Puts a code written as a string of '0' and '1' on the stream.
    pub fn out_code(&mut self, code: &str) {
        code.bytes().for_each(|c| self.out_bit(c == b'1'));
    }

    /// Puts a full byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue = (self.queue << 8) | data as u64;
        self.q_bits += 8;
        self.write_stream();
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits. Returns how many padding bits were added.
    pub fn flush(&mut self) -> u8 {
        let padding = (8 - self.q_bits % 8) % 8;
        if padding > 0 {
            self.queue <<= padding; //pad the queue with zeros
            self.q_bits += padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
        padding
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = (self.output.len() * 8) + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}

/// Encode `data` with `codebook`, returning the packed bytes and the number of padding bits.
pub fn pack(data: &[u8], codebook: &Codebook) -> Result<(Vec<u8>, u8), CodecError> {
    // Look every code up once instead of once per byte.
    let mut table: [Option<&str>; 256] = [None; 256];
    codebook.iter().for_each(|(b, c)| table[b as usize] = Some(c));

    let mut bp = BitPacker::new(data.len());
    for &byte in data {
        let code = table[byte as usize]
            .ok_or(CodecError::CodebookIncomplete { byte: Some(byte) })?;
        bp.out_code(code);
    }
    trace!("Packed {} bytes, bitstream at {}", data.len(), bp.loc());
    let padding = bp.flush();
    Ok((bp.output, padding))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn out_bit_test() {
        let mut bp = BitPacker::new(4);
        [true, false, true].iter().for_each(|&b| bp.out_bit(b));
        assert_eq!("[0.3]", &bp.loc());
        assert_eq!(bp.flush(), 5);
        assert_eq!(bp.output, vec![0b1010_0000]);
        assert_eq!("[1.0]", &bp.loc());
    }

    #[test]
    fn out_code_and_out8_test() {
        let mut bp = BitPacker::new(4);
        bp.out_code("0010");
        bp.out_code("0001");
        bp.out8(b' ');
        assert_eq!(bp.flush(), 0);
        assert_eq!(bp.output, "! ".as_bytes());
    }

    #[test]
    fn pack_test() {
        let mut cb = Codebook::new();
        cb.insert(b'a', "10");
        cb.insert(b'b', "11");
        cb.insert(b'c', "0");
        // 10 10 0 0 0 0 0 11 0 10 11 11 -> 18 bits
        let (packed, padding) = pack(b"aacccccbcabb", &cb).unwrap();
        assert_eq!(packed, vec![0b1010_0000, 0b0110_1011, 0b1100_0000]);
        assert_eq!(padding, 6);
    }

    #[test]
    fn padding_bound_test() {
        let mut cb = Codebook::new();
        cb.insert(0, "1");
        cb.insert(1, "011");
        for n in 1..40 {
            let data: Vec<u8> = (0..n).map(|i| (i % 2) as u8).collect();
            let (packed, padding) = pack(&data, &cb).unwrap();
            let bits: usize = data.iter().map(|&b| if b == 0 { 1 } else { 3 }).sum();
            assert!(padding <= 7);
            assert_eq!((bits + padding as usize) % 8, 0);
            assert_eq!(packed.len() * 8, bits + padding as usize);
        }
    }

    #[test]
    fn incomplete_test() {
        let mut cb = Codebook::new();
        cb.insert(b'a', "0");
        assert_eq!(
            pack(b"aab", &cb),
            Err(CodecError::CodebookIncomplete { byte: Some(b'b') })
        );
    }
}
