use thiserror::Error;

/// A lookup named a slot at or beyond the current table length.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("code {code} is outside the code table (length {length})")]
pub struct DictionaryIndexError {
    pub code: u16,
    pub length: u16,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompressionError {
    /// A table lookup failed for a code the decoder expected to be defined.
    #[error("invalid code in group at byte offset {offset}")]
    InvalidCode {
        offset: usize,
        #[source]
        source: DictionaryIndexError,
    },

    /// The first code of the stream asked to extend a previous output that does not exist.
    #[error("code {code} at byte offset {offset} is undefined and there is no previous output")]
    UndefinedFirstCode { code: u16, offset: usize },

    #[error("malformed trailing group at byte offset {offset}")]
    MalformedTail { offset: usize },
}

#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum FileError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decompression(#[from] DecompressionError),

    #[error("cannot derive an output path from {0:?}")]
    InvalidPath(std::path::PathBuf),
}
