use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write;
use std::hash::Hash;
use std::slice;

use super::Error;
use super::Node;
use super::Tree;

/// Longest code a tree can produce. Counts sum up to at most `u64::MAX`,
/// which bounds the depth of a Huffman tree well below this.
pub const MAX_CODE_LEN: u8 = 128;

/// Bit sequence of a symbol, first bit in the most significant position.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    pub fn new(bits: u128, len: u8) -> Code {
        assert!(len <= MAX_CODE_LEN);
        assert!(len == MAX_CODE_LEN || bits >> len == 0);
        Code { bits, len }
    }
    fn pushed(self, bit: bool) -> Code {
        assert!(self.len < MAX_CODE_LEN);
        Code {
            bits: self.bits << 1 | bit as u128,
            len: self.len + 1,
        }
    }
    pub fn bits(self) -> u128 {
        self.bits
    }
    pub fn len(self) -> u8 {
        self.len
    }
    pub fn is_empty(self) -> bool {
        self.len == 0
    }
    /// Returns the `idx`-th bit, counting from the start of the code.
    pub fn bit(self, idx: u8) -> bool {
        assert!(idx < self.len);
        (self.bits >> (self.len - 1 - idx)) & 1 != 0
    }
    pub fn iter(self) -> impl Iterator<Item = bool> {
        (0..self.len).map(move |i| self.bit(i))
    }
    pub fn is_prefix_of(self, other: Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        shift == MAX_CODE_LEN || other.bits >> shift == self.bits
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.iter() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Symbol to code mapping derived from a [`Tree`].
#[derive(Clone, Debug)]
pub struct CodeTable<S> {
    codes: Vec<(S, Code)>,
    index: HashMap<S, usize>,
}

impl<S: Copy + Eq + Hash> CodeTable<S> {
    /// Walks the tree, appending a 0 bit for every left and a 1 bit for
    /// every right step.
    ///
    /// A tree consisting of a single leaf assigns the code `0` to it.
    pub fn from_tree(tree: &Tree<S>) -> CodeTable<S> {
        let mut codes = Vec::with_capacity(tree.num_leaves());
        let root = tree.root();
        if let Node::Leaf { symbol, .. } = *tree.node(root) {
            codes.push((symbol, Code::new(0, 1)));
        } else {
            let mut stack = vec![(root, Code::default())];
            while let Some((idx, code)) = stack.pop() {
                match *tree.node(idx) {
                    Node::Leaf { symbol, .. } => codes.push((symbol, code)),
                    Node::Internal { children, .. } => {
                        stack.push((children[1], code.pushed(true)));
                        stack.push((children[0], code.pushed(false)));
                    }
                }
            }
        }
        let index = codes.iter().enumerate().map(|(i, &(s, _))| (s, i)).collect();
        CodeTable { codes, index }
    }
    pub fn get(&self, symbol: S) -> Option<Code> {
        self.index.get(&symbol).map(|&i| self.codes[i].1)
    }
    /// Number of bits the encoding of `symbols` takes, excluding padding.
    pub fn encoded_bit_len<I>(&self, symbols: I) -> Result<u64, Error>
    where
        I: IntoIterator<Item = S>,
    {
        let mut result: u64 = 0;
        for (position, symbol) in symbols.into_iter().enumerate() {
            let code = self.get(symbol).ok_or(Error::UnknownSymbol { position })?;
            result += code.len() as u64;
        }
        Ok(result)
    }
    /// Number of bytes the encoding of `symbols` takes.
    pub fn encoded_len<I>(&self, symbols: I) -> Result<u64, Error>
    where
        I: IntoIterator<Item = S>,
    {
        Ok((self.encoded_bit_len(symbols)? + 7) / 8)
    }
}

impl<S> CodeTable<S> {
    /// Codes in left-to-right leaf order of the tree.
    pub fn iter(&self) -> slice::Iter<(S, Code)> {
        self.codes.iter()
    }
    pub fn len(&self) -> usize {
        self.codes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: fmt::Debug> fmt::Display for CodeTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut lines = self.codes.iter().map(|&(ref s, c)| format!("{:?} {}", s, c));
        write!(f, "{}", lines.join("\n"))
    }
}
