//! Codebooks map each byte value to its bit-string code.
//!
//! A codebook is produced fresh for every compress call and travels next to the payload. It
//! serializes as a JSON object keyed by the decimal byte value, e.g. `{"97": "10", "99": "0"}`.

use std::collections::BTreeMap;

use log::trace;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::huffman::{Node, NodeData};
use crate::error::CodecError;

/// Code given to the only symbol of a one-symbol input.
pub const DEGENERATE_CODE: &str = "0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Codebook {
    codes: BTreeMap<u8, String>,
}

impl Codebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed one entry codebook used when the input holds a single byte value.
    pub fn degenerate(byte: u8) -> Self {
        let mut codes = BTreeMap::new();
        codes.insert(byte, DEGENERATE_CODE.to_string());
        Self { codes }
    }

    pub fn insert(&mut self, byte: u8, code: impl Into<String>) {
        self.codes.insert(byte, code.into());
    }

    pub fn code(&self, byte: u8) -> Option<&str> {
        self.codes.get(&byte).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes.iter().map(|(&b, c)| (b, c.as_str()))
    }

    /// The byte of a one-entry codebook.
    pub fn sole_symbol(&self) -> Option<u8> {
        match self.codes.len() {
            1 => self.codes.keys().next().copied(),
            _ => None,
        }
    }

    /// Check every code is a non-empty run of '0' and '1'.
    pub fn validate(&self) -> Result<(), CodecError> {
        for (&byte, code) in &self.codes {
            if code.is_empty() || !code.bytes().all(|c| c == b'0' || c == b'1') {
                return Err(CodecError::InvalidCode {
                    byte,
                    code: code.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build the code to byte lookup used while decoding.
    pub fn invert(&self) -> Result<FxHashMap<String, u8>, CodecError> {
        self.validate()?;
        let mut inverted = FxHashMap::default();
        inverted.reserve(self.codes.len());
        for (&byte, code) in &self.codes {
            if inverted.insert(code.clone(), byte).is_some() {
                return Err(CodecError::AmbiguousCodebook { code: code.clone() });
            }
        }
        Ok(inverted)
    }

    /// True when no code is a prefix of another code.
    pub fn is_prefix_free(&self) -> bool {
        // In sorted order a prefix sorts directly before some code that extends it, so checking
        // neighbours is enough.
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }
}

/// Walk the tree and record the root-to-leaf path of every leaf: '0' for a left edge, '1' for a
/// right edge. A lone-leaf tree gets [`DEGENERATE_CODE`].
pub fn generate_codebook(root: &Node) -> Codebook {
    if let NodeData::Leaf(byte) = root.node_data {
        return Codebook::degenerate(byte);
    }
    let mut codebook = Codebook::new();
    let mut path = String::new();
    walk(root, &mut path, &mut codebook);
    trace!("Codebook: {:?}", codebook);
    codebook
}

/// Recursively walk the tree, extending `path` on the way down and trimming it on the way up.
fn walk(node: &Node, path: &mut String, codebook: &mut Codebook) {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            path.push('0');
            walk(left, path, codebook);
            path.pop();
            path.push('1');
            walk(right, path, codebook);
            path.pop();
        }
        NodeData::Leaf(byte) => codebook.insert(*byte, path.clone()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::huffman::build_tree;
    use crate::tools::freq_count::freqs;

    fn codebook_for(data: &[u8]) -> Codebook {
        generate_codebook(&build_tree(&freqs(data).unwrap()).unwrap())
    }

    #[test]
    fn known_codes_test() {
        let cb = codebook_for(b"aacccccbcabb");
        assert_eq!(cb.code(b'c'), Some("0"));
        assert_eq!(cb.code(b'a'), Some("10"));
        assert_eq!(cb.code(b'b'), Some("11"));
        assert_eq!(cb.code(b'x'), None);
    }

    #[test]
    fn degenerate_test() {
        let cb = codebook_for(&[7; 42]);
        assert_eq!(cb, Codebook::degenerate(7));
        assert_eq!(cb.sole_symbol(), Some(7));
    }

    #[test]
    fn prefix_free_test() {
        let inputs: Vec<Vec<u8>> = vec![
            b"ab".to_vec(),
            b"abracadabra".to_vec(),
            (0..=255_u8).collect(),
            (0..=255_u8).flat_map(|b| std::iter::repeat(b).take(b as usize + 1)).collect(),
            (0..40_u32).flat_map(|i| std::iter::repeat(i as u8).take(1 << (i % 20))).collect(),
        ];
        for input in inputs {
            let cb = codebook_for(&input);
            assert!(cb.len() >= 2);
            assert!(cb.is_prefix_free(), "not prefix free: {:?}", cb);
            let codes: Vec<&str> = cb.iter().map(|(_, c)| c).collect();
            for a in &codes {
                for b in &codes {
                    assert!(a == b || !b.starts_with(a));
                }
            }
        }
    }

    #[test]
    fn fresh_accumulator_test() {
        // A second, unrelated codebook must not inherit entries from the first.
        let first = codebook_for(b"xxyz");
        let second = codebook_for(b"ab");
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 2);
        assert_eq!(second.code(b'x'), None);
    }

    #[test]
    fn invert_test() {
        let cb = codebook_for(b"aacccccbcabb");
        let inv = cb.invert().unwrap();
        assert_eq!(inv.get("0"), Some(&b'c'));
        assert_eq!(inv.get("10"), Some(&b'a'));
        assert_eq!(inv.get("11"), Some(&b'b'));
    }

    #[test]
    fn invert_rejects_duplicates_test() {
        let mut cb = Codebook::new();
        cb.insert(1, "01");
        cb.insert(2, "01");
        assert_eq!(
            cb.invert(),
            Err(CodecError::AmbiguousCodebook {
                code: "01".to_string()
            })
        );
    }

    #[test]
    fn invalid_code_test() {
        let mut cb = Codebook::new();
        cb.insert(3, "0x1");
        assert!(matches!(cb.validate(), Err(CodecError::InvalidCode { byte: 3, .. })));
        let mut cb = Codebook::new();
        cb.insert(4, "");
        assert!(matches!(cb.invert(), Err(CodecError::InvalidCode { byte: 4, .. })));
    }

    #[test]
    fn json_test() {
        let cb = codebook_for(b"aacccccbcabb");
        let json = serde_json::to_string(&cb).unwrap();
        assert_eq!(json, r#"{"97":"10","98":"11","99":"0"}"#);
        let back: Codebook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cb);
    }
}
