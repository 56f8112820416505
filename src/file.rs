//! Filesystem glue around the in-memory decoder.

use crate::codes::GROUP_LEN;
use crate::decompress::Decoder;
use crate::error::FileError;
use crate::observer::{DecodeObserver, TraceObserver};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::vec::Vec;

type Result<T> = core::result::Result<T, FileError>;

/// Number of trailing characters stripped from an encoded file name.
pub const ENCODED_SUFFIX_LEN: usize = 2;

/// Derives the decoded file path by dropping the encoded suffix from the file name.
pub fn output_path(input: &Path) -> Result<PathBuf> {
    let invalid = || FileError::InvalidPath(input.to_path_buf());

    let name = input.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let cut = name
        .char_indices()
        .rev()
        .nth(ENCODED_SUFFIX_LEN - 1)
        .map(|(idx, _)| idx)
        .filter(|&idx| idx > 0)
        .ok_or_else(invalid)?;

    Ok(input.with_file_name(&name[..cut]))
}

/// Decodes everything `reader` yields into `writer`, one group at a time.
///
/// Returns the number of decoded bytes written. The writer is not flushed.
pub fn decompress_stream<R, W, O>(mut reader: R, mut writer: W, observer: O) -> Result<u64>
where
    R: Read,
    W: Write,
    O: DecodeObserver,
{
    let mut decoder = Decoder::with_observer(observer);
    let mut window = [0u8; GROUP_LEN];
    let mut out = Vec::new();
    let mut written = 0u64;

    loop {
        let filled = read_window(&mut reader, &mut window)?;
        if filled < GROUP_LEN {
            decoder.finish(&window[..filled], &mut out)?;
            writer.write_all(&out)?;
            written += out.len() as u64;
            return Ok(written);
        }

        decoder.decode_group(window, &mut out)?;
        writer.write_all(&out)?;
        written += out.len() as u64;
        out.clear();
    }
}

/// Decodes the file at `input` next to it and returns the path written.
#[tracing::instrument(level = "debug", skip_all, fields(input = %input.as_ref().display()))]
pub fn decompress_file(input: impl AsRef<Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    let output = output_path(input)?;
    tracing::debug!(output = %output.display(), "derived output path");

    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(&output)?);
    let written = decompress_stream(reader, &mut writer, TraceObserver)?;
    writer.flush()?;

    tracing::debug!(written, "decoded");
    Ok(output)
}

/// Fills `window` from `reader`, returning fewer than [`GROUP_LEN`] bytes only at
/// end of input.
fn read_window<R: Read>(reader: &mut R, window: &mut [u8; GROUP_LEN]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < GROUP_LEN {
        match reader.read(&mut window[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress;
    use crate::error::DecompressionError;
    use std::format;
    use std::io::Cursor;
    use test_log::test;

    /// Reader that hands out one byte per call and fails with `Interrupted` in between.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        interrupt: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(ErrorKind::Interrupted.into());
            }
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lzw12-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_output_path_strips_suffix() {
        assert_eq!(
            output_path(Path::new("dir/notes.txt.z")).unwrap(),
            PathBuf::from("dir/notes.txt")
        );
        assert_eq!(
            output_path(Path::new("notes.éz")).unwrap(),
            PathBuf::from("notes.")
        );
    }

    #[test]
    fn test_output_path_rejects_short_names() {
        assert!(matches!(
            output_path(Path::new("dir/.z")),
            Err(FileError::InvalidPath(_))
        ));
        assert!(matches!(
            output_path(Path::new("z")),
            Err(FileError::InvalidPath(_))
        ));
        assert!(matches!(
            output_path(Path::new("/")),
            Err(FileError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_stream_matches_slice_decoder() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT#".repeat(20);
        let mut packed = Vec::new();
        compress(&original, &mut packed);

        let mut out = Vec::new();
        let written = decompress_stream(Cursor::new(&packed), &mut out, ()).unwrap();
        assert_eq!(out, original);
        assert_eq!(written, original.len() as u64);
    }

    #[test]
    fn test_stream_survives_short_and_interrupted_reads() {
        let original = b"abcabcabcabcabcabcx".to_vec();
        let mut packed = Vec::new();
        compress(&original, &mut packed);

        let reader = Trickle {
            data: packed,
            pos: 0,
            interrupt: false,
        };
        let mut out = Vec::new();
        decompress_stream(reader, &mut out, ()).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_stream_surfaces_format_error() {
        let mut out = Vec::new();
        let err = decompress_stream(Cursor::new([0x04u8, 0x11, 0x00, 0x7F]), &mut out, ())
            .unwrap_err();
        assert!(matches!(
            err,
            FileError::Decompression(DecompressionError::MalformedTail { offset: 3 })
        ));
        // The complete group before the bad tail was already written.
        assert_eq!(out, b"AAA");
    }

    #[test]
    fn test_decompress_file_round_trip() {
        let dir = scratch_dir("round-trip");
        let original = b"It was the best of times, it was the worst of times.".repeat(50);
        let mut packed = Vec::new();
        compress(&original, &mut packed);

        let encoded = dir.join("story.txt.z");
        std::fs::write(&encoded, &packed).unwrap();

        let decoded = decompress_file(&encoded);
        let contents = std::fs::read(dir.join("story.txt"));
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(decoded.unwrap(), dir.join("story.txt"));
        assert_eq!(contents.unwrap(), original);
    }

    #[test]
    fn test_stream_through_trace_observer() {
        let original = b"abababababababab".to_vec();
        let mut packed = Vec::new();
        compress(&original, &mut packed);

        let mut out = Vec::new();
        let written = decompress_stream(Cursor::new(&packed), &mut out, TraceObserver).unwrap();
        assert_eq!(out, original);
        assert_eq!(written, 16);
    }

    #[test]
    fn test_decompress_file_missing_input() {
        let dir = scratch_dir("missing");
        let err = decompress_file(dir.join("absent.lz")).unwrap_err();
        assert!(matches!(err, FileError::Io(ref e) if e.kind() == ErrorKind::NotFound));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
