use crate::codes;
use crate::table::CodeTable;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Greedy LZW encoder that mirrors the decoder's table step for step.
///
/// Because the decoder learns each entry one code later than a textbook encoder
/// would, the encoder does not keep a dictionary of its own. It replays the decoder's
/// update rule on a [`CodeTable`] and only emits codes that table can resolve at the
/// moment the decoder reads them.
struct Encoder {
    table: CodeTable,
    /// Non-seed sequences currently reachable in `table`, keyed to their slot.
    index: BTreeMap<Vec<u8>, u16>,
    /// Sequence the decoder emitted for the previous code.
    last: Vec<u8>,
}

impl Encoder {
    fn new() -> Self {
        Self {
            table: CodeTable::new(),
            index: BTreeMap::new(),
            last: Vec::new(),
        }
    }

    /// Encodes all of `input`, handing each code to `emit` in stream order.
    fn run(mut self, input: &[u8], mut emit: impl FnMut(u16)) {
        let mut pos = 0;
        while pos < input.len() {
            let (code, len) = self.longest_match(&input[pos..]);
            emit(code);
            self.advance(code, &input[pos..pos + len]);
            pos += len;
        }
    }

    /// Finds the longest sequence the decoder can resolve at the head of `rest`.
    fn longest_match(&self, rest: &[u8]) -> (u16, usize) {
        let mut code = u16::from(rest[0]);
        let mut len = 1;

        // Entries are built by extending earlier ones one byte at a time, so the walk
        // stops at the first missing prefix. After a wrap that can miss a longer
        // entry; the result is still decodable.
        while len < rest.len() {
            match self.index.get(&rest[..=len]) {
                Some(&slot) => {
                    code = slot;
                    len += 1;
                }
                None => break,
            }
        }

        // The slot about to be filled decodes as `last` followed by its first byte.
        if !self.table.is_full() && !self.last.is_empty() {
            let pending = self.last.len() + 1;
            if pending > len
                && rest.len() >= pending
                && rest[..self.last.len()] == self.last[..]
                && rest[self.last.len()] == self.last[0]
            {
                return (self.table.len() as u16, pending);
            }
        }

        (code, len)
    }

    /// Applies the decoder's table update for `code`, which decodes to `output`.
    fn advance(&mut self, code: u16, output: &[u8]) {
        if usize::from(code) == self.table.len() {
            self.last.push(self.last[0]);
            let entry = self.last.clone();
            self.record(entry);
            return;
        }

        if !self.last.is_empty() {
            let mut entry = core::mem::take(&mut self.last);
            entry.push(output[0]);
            self.record(entry);
        }

        self.last.clear();
        self.last.extend_from_slice(output);
    }

    fn record(&mut self, entry: Vec<u8>) {
        if self.table.is_full() {
            self.index.clear();
        }
        let slot = self.table.add(&entry);
        self.index.insert(entry, slot);
    }
}

/// Compresses `input`, appending the packed stream to `output`.
///
/// Codes are packed two per 3-byte group. When the code count is odd the final code
/// is written as a two-byte trailing window.
pub fn compress(input: &[u8], output: &mut Vec<u8>) {
    output.reserve(input.len() / 2 + 2);

    let mut pending = None;
    Encoder::new().run(input, |code| match pending.take() {
        Some(first) => output.extend_from_slice(&codes::pack(first, code)),
        None => pending = Some(code),
    });

    if let Some(code) = pending {
        output.extend_from_slice(&codes::pack_tail(code));
    }
}

/// Returns the code sequence [`compress`] would pack for `input`.
#[must_use]
pub fn encode_codes(input: &[u8]) -> Vec<u16> {
    let mut out = Vec::new();
    Encoder::new().run(input, |code| out.push(code));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompress;
    use alloc::vec;

    #[test]
    fn test_aaaa_codes() {
        assert_eq!(encode_codes(b"AAAA"), vec![65, 256, 65]);
    }

    #[test]
    fn test_textbook_sequence() {
        // a, b, 256 ("ab"), then 258 ("aba") names the slot being filled.
        let codes = encode_codes(b"abababa");
        assert_eq!(codes, vec![97, 98, 256, 258]);

        let mut out = Vec::new();
        let mut packed = Vec::new();
        compress(b"abababa", &mut packed);
        decompress(&packed, &mut out).unwrap();
        assert_eq!(out, b"abababa");
    }

    #[test]
    fn test_packed_length() {
        let mut even = Vec::new();
        compress(b"ab", &mut even);
        assert_eq!(even.len(), 3);

        let mut odd = Vec::new();
        compress(b"abc", &mut odd);
        assert_eq!(odd.len(), 5);
        assert_eq!(odd[3] & 0xF0, 0xF0);

        let mut empty = Vec::new();
        compress(b"", &mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_round_trip_through_wraparound() {
        let mut seed: u32 = 0x1234_5678;
        let input: Vec<u8> = (0..80_000)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                // Small alphabet so entries grow and the table wraps several times.
                b'a' + (seed >> 28) as u8 % 6
            })
            .collect();

        assert!(encode_codes(&input).len() > 2 * 3840);

        let mut packed = Vec::new();
        compress(&input, &mut packed);
        let mut out = Vec::new();
        decompress(&packed, &mut out).unwrap();
        assert_eq!(out, input);
    }
}
