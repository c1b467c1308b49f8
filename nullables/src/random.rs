//! Nullable random: a deterministic byte source for testing.

use rand::{CryptoRng, RngCore};

/// A deterministic random source for testing.
///
/// Returns the configured bytes in order, wrapping around at the end.
pub struct NullRandom {
    bytes: Vec<u8>,
    index: usize,
}

impl NullRandom {
    /// Create with a sequence of bytes to replay.
    ///
    /// An empty sequence behaves like [`NullRandom::zeros`].
    pub fn new(bytes: Vec<u8>) -> Self {
        let bytes = if bytes.is_empty() { vec![0] } else { bytes };
        Self { bytes, index: 0 }
    }

    /// A source that only ever yields zero bytes.
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }

    /// A source that repeats a single byte.
    pub fn constant(value: u8) -> Self {
        Self::new(vec![value])
    }

    /// Number of bytes handed out so far.
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RngCore for NullRandom {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.bytes[self.index % self.bytes.len()];
            self.index += 1;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// Not actually secure; lets tests drive APIs that demand a CSPRNG.
impl CryptoRng for NullRandom {}
