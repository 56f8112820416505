//! # 12-bit packed LZW
//!
//! `lzw12` decodes streams produced by a Lempel-Ziv-Welch variant that packs two
//! 12-bit dictionary codes into every 3-byte group. The dictionary starts with the 256
//! single-byte sequences, grows by one entry per decoded code, and wraps back to slot
//! 256 once all 4096 slots are in use.
//!
//! A stream with an odd number of codes ends with a two-byte trailing window holding
//! the last code. A trailing window whose first byte is `0x00` marks the end of the
//! stream.
//!
//! ## Example
//!
//! ```rust
//! extern crate alloc;
//! use lzw12::decompress;
//! use alloc::vec::Vec;
//!
//! // Codes 65 ('A'), 256 (the not-yet-defined "AA") and 65 again.
//! // Group:  0x041 | 0x100  -> [0x04, 0x11, 0x00]
//! // Tail:   0x041 with the reserved high nibble set -> [0xF0, 0x41]
//! let compressed_data = [0x04, 0x11, 0x00, 0xF0, 0x41];
//!
//! let mut buffer = Vec::new();
//! decompress(&compressed_data, &mut buffer).expect("Decompression failed");
//! assert_eq!(buffer, b"AAAA");
//! ```
//!
//! ## Features
//!
//! * `std` (default): file helpers in [`file`], [`TraceObserver`] and `tracing`
//!   instrumentation. Without it the crate is `no_std` and only needs `alloc`.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod codes;
pub mod compress;
pub mod decompress;
pub mod error;
#[cfg(feature = "std")]
pub mod file;
pub mod observer;
pub mod table;

pub use codes::{pack, unpack};
pub use compress::{compress, encode_codes};
pub use decompress::{Decoder, decompress, decompress_observed};
#[cfg(feature = "std")]
pub use error::FileError;
pub use error::{DecompressionError, DictionaryIndexError};
#[cfg(feature = "std")]
pub use file::{decompress_file, decompress_stream, output_path};
#[cfg(feature = "std")]
pub use observer::TraceObserver;
pub use observer::DecodeObserver;
pub use table::CodeTable;
