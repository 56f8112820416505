/// Receives decode events as they happen.
///
/// Both methods default to doing nothing, so implementors only override what they
/// need. `()` is the silent observer used by [`decompress`](crate::decompress).
pub trait DecodeObserver {
    /// A new entry was written to the code table at `code`.
    fn entry_added(&mut self, _code: u16, _entry: &[u8]) {}

    /// `bytes` were appended to the output.
    fn emitted(&mut self, _bytes: &[u8]) {}
}

impl DecodeObserver for () {}

impl<O: DecodeObserver + ?Sized> DecodeObserver for &mut O {
    #[inline]
    fn entry_added(&mut self, code: u16, entry: &[u8]) {
        (**self).entry_added(code, entry);
    }

    #[inline]
    fn emitted(&mut self, bytes: &[u8]) {
        (**self).emitted(bytes);
    }
}

/// Reports every table addition and emission through `tracing` at `trace` level.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceObserver;

#[cfg(feature = "std")]
impl DecodeObserver for TraceObserver {
    fn entry_added(&mut self, code: u16, entry: &[u8]) {
        tracing::trace!(code, len = entry.len(), "table entry added");
    }

    fn emitted(&mut self, bytes: &[u8]) {
        tracing::trace!(len = bytes.len(), "bytes emitted");
    }
}
