use crate::codes::{self, GROUP_LEN};
use crate::error::DecompressionError;
use crate::observer::DecodeObserver;
use crate::table::CodeTable;
use alloc::vec::Vec;

type Result<T> = core::result::Result<T, DecompressionError>;

/// Decompresses an entire stream, appending the decoded bytes to `output`.
///
/// The input is consumed as full 3-byte groups followed by an optional trailing window
/// of one or two bytes. See [`Decoder::finish`] for how that window is interpreted.
pub fn decompress(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    decompress_observed(input, output, ())?;
    Ok(())
}

/// Same as [`decompress`], reporting table additions and emissions to `observer`.
///
/// The observer is handed back once the stream has been fully decoded.
pub fn decompress_observed<O: DecodeObserver>(
    input: &[u8],
    output: &mut Vec<u8>,
    observer: O,
) -> Result<O> {
    // LZW output is at least as long as its input in practice.
    output.reserve(input.len());

    let mut decoder = Decoder::with_observer(observer);
    let mut groups = input.chunks_exact(GROUP_LEN);
    for group in &mut groups {
        decoder.decode_group([group[0], group[1], group[2]], output)?;
    }
    decoder.finish(groups.remainder(), output)
}

/// Incremental decoder for one stream.
///
/// Feed every full group through [`decode_group`](Self::decode_group), then hand the
/// leftover bytes to [`finish`](Self::finish). `finish` consumes the decoder, so no
/// group can be decoded after the end of the stream has been handled.
#[derive(Debug)]
pub struct Decoder<O = ()> {
    table: CodeTable,
    /// Output of the previous code. Empty only before the first code.
    last: Vec<u8>,
    scratch: Vec<u8>,
    offset: usize,
    observer: O,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(())
    }
}

impl<O: DecodeObserver> Decoder<O> {
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self {
            table: CodeTable::new(),
            last: Vec::new(),
            scratch: Vec::new(),
            offset: 0,
            observer,
        }
    }

    /// The code table as it stands after the groups decoded so far.
    #[must_use]
    pub const fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Number of input bytes consumed so far.
    #[must_use]
    pub const fn bytes_consumed(&self) -> usize {
        self.offset
    }

    /// Decodes both codes of one full group.
    pub fn decode_group(&mut self, group: [u8; GROUP_LEN], output: &mut Vec<u8>) -> Result<()> {
        let (first, second) = codes::unpack(group);
        self.decode_code(first, output)?;
        self.decode_code(second, output)?;
        self.offset += GROUP_LEN;
        Ok(())
    }

    /// Handles the end of the stream and returns the observer.
    ///
    /// `tail` holds whatever followed the last full group:
    ///
    /// * nothing: the stream carried an even number of codes.
    /// * a window starting with `0x00`: terminal marker, nothing more is emitted.
    /// * a single non-zero byte: positions 1 and 2 of the window are empty, which no
    ///   encoder produces, so this is [`DecompressionError::MalformedTail`].
    /// * two bytes: the window is shifted right by one and only the second code of
    ///   the re-aligned group is decoded.
    pub fn finish(mut self, tail: &[u8], output: &mut Vec<u8>) -> Result<O> {
        match *tail {
            [] | [0, ..] => {}
            [lead, low] => {
                let (_, code) = codes::unpack(codes::realign([lead, low, 0]));
                self.decode_code(code, output)?;
                self.offset += tail.len();
            }
            _ => {
                return Err(DecompressionError::MalformedTail {
                    offset: self.offset,
                });
            }
        }
        Ok(self.observer)
    }

    /// Applies the LZW reconstruction rule for a single code.
    fn decode_code(&mut self, code: u16, output: &mut Vec<u8>) -> Result<()> {
        // A code past the filled slots decodes as the previous output followed by its
        // own first byte.
        if usize::from(code) >= self.table.len() {
            let Some(&first) = self.last.first() else {
                return Err(DecompressionError::UndefinedFirstCode {
                    code,
                    offset: self.offset,
                });
            };
            self.last.push(first);
            let slot = self.table.add(&self.last);
            self.observer.entry_added(slot, &self.last);
            output.extend_from_slice(&self.last);
            self.observer.emitted(&self.last);
            return Ok(());
        }

        let entry = self
            .table
            .get(code)
            .map_err(|source| DecompressionError::InvalidCode {
                offset: self.offset,
                source,
            })?;
        output.extend_from_slice(entry);
        self.observer.emitted(entry);

        // The entry slot may be overwritten by the add below when the table wraps.
        self.scratch.clear();
        self.scratch.extend_from_slice(entry);

        if !self.last.is_empty() {
            self.last.push(self.scratch[0]);
            let slot = self.table.add(&self.last);
            self.observer.entry_added(slot, &self.last);
        }

        core::mem::swap(&mut self.last, &mut self.scratch);
        Ok(())
    }
}
