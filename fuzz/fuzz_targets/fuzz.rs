#![no_main]

use libfuzzer_sys::fuzz_target;
use lzw12::{Decoder, compress, decompress, encode_codes};

/// Arbitrary bytes decode to `Ok` or `Err` without panicking, and feeding the same
/// bytes group by group through [`Decoder`] gives the same bytes and the same verdict.
fn check_arbitrary_stream(data: &[u8]) {
    let mut whole = Vec::new();
    let whole_result = decompress(data, &mut whole);

    let mut decoder = Decoder::new();
    let mut stepped = Vec::new();
    let mut groups = data.chunks_exact(3);
    let stepped_result = groups
        .by_ref()
        .try_for_each(|g| decoder.decode_group([g[0], g[1], g[2]], &mut stepped))
        .and_then(|()| decoder.finish(groups.remainder(), &mut stepped).map(drop));

    assert_eq!(whole_result, stepped_result);
    assert_eq!(whole, stepped);
}

/// Encoded streams decode back to the input, and the packed length follows from the
/// code count: two codes per 3-byte group, two bytes for an odd last code.
fn check_round_trip(data: &[u8]) {
    let mut packed = Vec::new();
    compress(data, &mut packed);

    let codes = encode_codes(data).len();
    assert_eq!(packed.len(), codes / 2 * 3 + codes % 2 * 2);

    let mut unpacked = Vec::new();
    if let Err(e) = decompress(&packed, &mut unpacked) {
        panic!("encoder output rejected: {e:?} (input len {})", data.len());
    }
    assert!(unpacked == data, "round trip changed {} input bytes", data.len());
}

fuzz_target!(|data: &[u8]| {
    check_arbitrary_stream(data);
    check_round_trip(data);
});
