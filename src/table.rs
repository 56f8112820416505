use crate::error::DictionaryIndexError;
use alloc::vec::Vec;
use core::ops::Range;

/// Total number of addressable slots (12-bit codes).
pub const TABLE_CAPACITY: usize = 4096;

/// Number of permanently seeded single-byte slots.
pub const SEED_LEN: usize = 256;

/// The adaptive dictionary shared by the decoder and the encoder.
///
/// Entries are stored back to back in one byte arena with a span per slot. When the
/// table is full the next [`add`](Self::add) truncates both back to the seed region,
/// so slots past the reset point are gone rather than merely unreachable.
#[derive(Debug, Clone)]
pub struct CodeTable {
    bytes: Vec<u8>,
    spans: Vec<Range<u32>>,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeTable {
    /// Creates a table with slots 0..=255 seeded to their own byte value.
    #[must_use]
    pub fn new() -> Self {
        let mut spans = Vec::with_capacity(TABLE_CAPACITY);
        spans.extend((0..SEED_LEN as u32).map(|i| i..i + 1));
        Self {
            bytes: (0..=u8::MAX).collect(),
            spans,
        }
    }

    /// Number of valid slots. The next entry is written here unless the table is full.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Always false: the seed region cannot be removed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// True when the next [`add`](Self::add) wraps back to slot 256.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.spans.len() == TABLE_CAPACITY
    }

    /// Looks up the sequence stored at `code`.
    #[inline]
    pub fn get(&self, code: u16) -> Result<&[u8], DictionaryIndexError> {
        match self.spans.get(usize::from(code)) {
            Some(span) => Ok(&self.bytes[span.start as usize..span.end as usize]),
            None => Err(DictionaryIndexError {
                code,
                length: self.spans.len() as u16,
            }),
        }
    }

    /// Appends `sequence` and returns the slot it was written to.
    pub fn add(&mut self, sequence: &[u8]) -> u16 {
        debug_assert!(!sequence.is_empty(), "table entries are never empty");

        if self.is_full() {
            self.spans.truncate(SEED_LEN);
            self.bytes.truncate(SEED_LEN);
        }

        let start = self.bytes.len() as u32;
        self.bytes.extend_from_slice(sequence);
        let code = self.spans.len() as u16;
        self.spans.push(start..self.bytes.len() as u32);
        code
    }
}
