//! Property-based tests for the stream pipeline

use fmshell::pipeline::{HashSink, Stage, StreamPipeline};
use proptest::prelude::*;

fn run(pipeline: &StreamPipeline, input: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    tokio_test::block_on(pipeline.run(input, &mut out)).unwrap();
    out
}

fn digest(input: &[u8], chunk_size: usize) -> String {
    let mut sink = HashSink::new();
    tokio_test::block_on(StreamPipeline::new().chunk_size(chunk_size).run(input, &mut sink))
        .unwrap();
    sink.hex_digest()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_compress_round_trip(
        data in prop::collection::vec(any::<u8>(), 0..20_000),
        chunk_size in 64usize..4096,
    ) {
        let compress = StreamPipeline::new().stage(Stage::Compress).chunk_size(chunk_size);
        let decompress = StreamPipeline::new().stage(Stage::Decompress).chunk_size(chunk_size);

        let compressed = run(&compress, &data);
        let restored = run(&decompress, &compressed);
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn test_identity_copies_bytes(
        data in prop::collection::vec(any::<u8>(), 0..20_000),
        chunk_size in 64usize..4096,
    ) {
        let identity = StreamPipeline::new().chunk_size(chunk_size);
        prop_assert_eq!(run(&identity, &data), data);
    }

    #[test]
    fn test_hash_ignores_chunking(
        data in prop::collection::vec(any::<u8>(), 0..20_000),
        a in 64usize..4096,
        b in 64usize..4096,
    ) {
        prop_assert_eq!(digest(&data, a), digest(&data, b));
    }

    #[test]
    fn test_hash_tracks_content(
        data in prop::collection::vec(any::<u8>(), 1..2_000),
        index in any::<prop::sample::Index>(),
    ) {
        let mut changed = data.clone();
        let i = index.index(changed.len());
        changed[i] ^= 0xff;
        prop_assert_ne!(digest(&data, 512), digest(&changed, 512));
    }
}
