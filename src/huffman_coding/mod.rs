//! The huffman module turns a frequency table into a prefix-free codebook.
//!
//! The tree is built greedily: the two lightest nodes are merged until one remains. Ties are
//! broken by insertion order, so the same input always produces the same tree and codebook.
//! Walking the tree then gives each byte value its code, '0' for every left edge and '1' for
//! every right edge.
//!
//! An input with a single distinct byte value has no edges to walk. Its one symbol is given the
//! code "0".
//!

pub mod codebook;
pub mod huffman;
