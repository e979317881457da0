//! End-to-end pass over a real zstd frame: the way the blob is cut into
//! slices must never change the decoded bytes.

use chute_driver::StreamDriver;
use chute_engine::ZstdEngine;

fn fixture() -> (Vec<u8>, Vec<u8>) {
    let payload: Vec<u8> = (0u32..20_000)
        .flat_map(|i| (i % 251).to_le_bytes())
        .collect();
    let blob = zstd::encode_all(std::io::Cursor::new(&payload), 3).unwrap();
    (payload, blob)
}

fn decode_with_slices(blob: &[u8], slices: Vec<usize>, chunk_size: usize) -> Vec<u8> {
    let mut engine = ZstdEngine::new().unwrap();
    let driver =
        StreamDriver::with_chunk_size(&mut engine, blob, Vec::new(), chunk_size).unwrap();
    let (summary, sink) = driver.run(slices).unwrap();
    assert_eq!(summary.bytes_in, blob.len() as u64);
    assert_eq!(summary.bytes_out, sink.len() as u64);
    sink
}

/// Cut `total` into `n` pseudo-arbitrary positive parts.
fn uneven_partition(total: usize, n: usize) -> Vec<usize> {
    let mut parts = Vec::with_capacity(n);
    let mut remaining = total;
    for i in (1..n).rev() {
        // Leave at least one byte per remaining part.
        let take = 1 + (remaining - i - 1) * 7 % 13 % (remaining - i);
        parts.push(take);
        remaining -= take;
    }
    parts.push(remaining);
    parts
}

#[test]
fn whole_blob_as_one_slice_roundtrips() {
    let (payload, blob) = fixture();
    let decoded = decode_with_slices(&blob, vec![blob.len()], 4096);
    assert_eq!(decoded, payload);
}

#[test]
fn slice_boundaries_do_not_affect_output() {
    let (payload, blob) = fixture();

    let whole = decode_with_slices(&blob, vec![blob.len()], 4096);
    let halves = decode_with_slices(
        &blob,
        vec![blob.len() / 2, blob.len() - blob.len() / 2],
        4096,
    );
    let shredded = decode_with_slices(&blob, uneven_partition(blob.len(), 40), 4096);

    assert_eq!(whole, payload);
    assert_eq!(halves, whole);
    assert_eq!(shredded, whole);
}

#[test]
fn tiny_chunk_buffer_still_produces_identical_output() {
    let (payload, blob) = fixture();
    let decoded = decode_with_slices(&blob, vec![blob.len()], 16);
    assert_eq!(decoded, payload);
}

#[test]
fn trailing_zero_sentinel_is_accepted() {
    let (payload, blob) = fixture();
    let mut slices = vec![blob.len() / 3, blob.len() / 3];
    slices.push(blob.len() - slices.iter().sum::<usize>());
    slices.push(0);
    let decoded = decode_with_slices(&blob, slices, 4096);
    assert_eq!(decoded, payload);
}
