/// Iterates over the bits of a byte, most significant bit first.
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    byte: u8,
    remaining_bits: u8,
}

impl Bits {
    pub fn new(byte: u8) -> Bits {
        Bits::truncated(byte, 8)
    }
    /// Only yields the `num_bits` most significant bits.
    pub fn truncated(byte: u8, num_bits: u8) -> Bits {
        assert!(num_bits <= 8);
        Bits {
            byte: byte,
            remaining_bits: num_bits,
        }
    }
}

impl Iterator for Bits {
    type Item = bool;
    fn next(&mut self) -> Option<bool> {
        if self.remaining_bits == 0 {
            return None;
        }
        self.remaining_bits -= 1;
        let result = self.byte & 0x80 != 0;
        self.byte <<= 1;
        Some(result)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Bits {
    fn len(&self) -> usize {
        self.remaining_bits as usize
    }
}

/// Packs bits into bytes, most significant bit first.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    num_bits: u8,
}

impl BitWriter {
    pub fn with_capacity(num_bytes: usize) -> BitWriter {
        BitWriter {
            bytes: Vec::with_capacity(num_bytes),
            ..Default::default()
        }
    }
    pub fn push(&mut self, bit: bool) {
        self.current = self.current << 1 | bit as u8;
        self.num_bits += 1;
        if self.num_bits == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.num_bits = 0;
        }
    }
    /// Pushes the low `len` bits of `bits`, highest of them first.
    pub fn push_bits(&mut self, bits: u128, len: u8) {
        for i in (0..len).rev() {
            self.push((bits >> i) & 1 != 0);
        }
    }
    /// Flushes a partial byte, filling it up with zero bits.
    ///
    /// Returns the bytes and the number of filler bits.
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        if self.num_bits == 0 {
            return (self.bytes, 0);
        }
        let padding = 8 - self.num_bits;
        self.bytes.push(self.current << padding);
        (self.bytes, padding)
    }
}
