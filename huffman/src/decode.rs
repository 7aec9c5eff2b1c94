use warn::Warn;

use super::bits::Bits;
use super::Error;
use super::Node;
use super::Tree;
use super::Warning;

impl<S: Copy> Tree<S> {
    /// Decodes a bitstream produced with the code table of this tree.
    ///
    /// The last `padding` bits of the last byte are skipped. If the bits run
    /// out in the middle of a code, `Error::TruncatedStream` is returned.
    pub fn decode<W>(&self, warn: &mut W, bytes: &[u8], padding: u8) -> Result<Vec<S>, Error>
    where
        W: Warn<Warning>,
    {
        if padding >= 8 || (bytes.is_empty() && padding != 0) {
            return Err(Error::InvalidPadding(padding));
        }
        let mut result = Vec::with_capacity(bytes.len() * 2);
        let root = self.root();

        // The cursor only ever rests on internal nodes, so keep its children.
        let root_children = match *self.node(root) {
            Node::Internal { children, .. } => children,
            // A lone leaf has the one-bit code `0`, every bit is one symbol.
            Node::Leaf { symbol, .. } => {
                for i in 0..bytes.len() {
                    for bit in code_bits(warn, bytes, i, padding) {
                        if bit {
                            warn.warn(Warning::NonZeroCode);
                        }
                        result.push(symbol);
                    }
                }
                return Ok(result);
            }
        };
        let mut cursor = root;
        let mut children = root_children;
        for i in 0..bytes.len() {
            for bit in code_bits(warn, bytes, i, padding) {
                cursor = children[bit as usize];
                match *self.node(cursor) {
                    Node::Leaf { symbol, .. } => {
                        result.push(symbol);
                        cursor = root;
                        children = root_children;
                    }
                    Node::Internal { children: c, .. } => children = c,
                }
            }
        }
        if cursor != root {
            error!("bitstream ends inside a code, decoded={}", result.len());
            return Err(Error::TruncatedStream);
        }
        debug!("decoded {} bytes into {} symbols", bytes.len(), result.len());
        Ok(result)
    }
}

/// Code bits of byte `i`, checking the filler of the last byte.
fn code_bits<W: Warn<Warning>>(warn: &mut W, bytes: &[u8], i: usize, padding: u8) -> Bits {
    if i + 1 != bytes.len() {
        return Bits::new(bytes[i]);
    }
    let filler_mask = ((1u16 << padding) - 1) as u8;
    if bytes[i] & filler_mask != 0 {
        warn.warn(Warning::NonZeroPadding);
    }
    Bits::truncated(bytes[i], 8 - padding)
}
