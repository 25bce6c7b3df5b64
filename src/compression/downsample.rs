//! Optional lossy stage run after Huffman packing.
//!
//! `downsample` keeps the even-indexed bytes of the packed stream and drops the rest.
//! `upsample` puts a zero byte back after every kept byte. The pair only round-trips when every
//! dropped byte was zero to begin with, and an odd-length input comes back one zero byte longer.
//! Nothing downstream may assume this stage is lossless.

/// Keep every other byte, starting with the first.
pub fn downsample(data: &[u8]) -> Vec<u8> {
    data.iter().step_by(2).copied().collect()
}

/// Reinsert a zero byte after every byte.
pub fn upsample(data: &[u8]) -> Vec<u8> {
    data.iter().flat_map(|&b| [b, 0]).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn downsample_test() {
        assert_eq!(downsample(&[1, 2, 3, 4, 5]), vec![1, 3, 5]);
        assert_eq!(downsample(&[9]), vec![9]);
        assert!(downsample(&[]).is_empty());
    }

    #[test]
    fn upsample_test() {
        assert_eq!(upsample(&[1, 3, 5]), vec![1, 0, 3, 0, 5, 0]);
        assert!(upsample(&[]).is_empty());
    }

    #[test]
    fn round_trip_when_odd_bytes_are_zero_test() {
        let x = vec![0xde, 0, 0xad, 0, 0xbe, 0, 0xef, 0];
        assert_eq!(upsample(&downsample(&x)), x);
    }

    #[test]
    fn lossy_when_odd_bytes_are_not_zero_test() {
        let x = vec![0xde, 0x01, 0xad, 0, 0xbe, 0, 0xef, 0];
        let back = upsample(&downsample(&x));
        assert_ne!(back, x);
        assert_eq!(back, vec![0xde, 0, 0xad, 0, 0xbe, 0, 0xef, 0]);
    }

    #[test]
    fn odd_length_grows_test() {
        let x = vec![7, 0, 8];
        assert_eq!(upsample(&downsample(&x)), vec![7, 0, 8, 0]);
    }
}
