//! Format lock: the binding byte contracts.
//!
//! The feature buffer and the refinement word serialization are stable
//! output contracts; color values are reproducible debugging output.
//! These tests pin the exact bytes that feed the digest.

use lock_tests::build_world;
use veil_harness::worlds::mirrored_pairs::MirroredPairs;
use veil_kernel::digest::{fast_hash64, hash_u64_words};
use veil_kernel::feature::{FeatureRecordV1, NodeTypeV1, RelationDegreesV1};
use veil_kernel::lexicon::LexiconV1;
use veil_wl::coloring::initial_coloring;
use veil_wl::refine::refine_node;

fn le_words(words: &[u64]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(words.len() * 8);
    for w in words {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    buf
}

#[test]
fn feature_buffer_is_the_documented_le_layout() {
    let record = FeatureRecordV1::new(
        NodeTypeV1::Constant,
        vec![2, 5, 6],
        vec![
            RelationDegreesV1 {
                rank: 1,
                outgoing: 4,
                incoming: 0,
            },
            RelationDegreesV1 {
                rank: 3,
                outgoing: 0,
                incoming: 9,
            },
        ],
    )
    .unwrap();
    // [t][|c|][|r|][c…][rank,out,in…]
    let expected = le_words(&[1, 3, 2, 2, 5, 6, 1, 4, 0, 3, 0, 9]);
    assert_eq!(record.buffer(), expected.as_slice());
}

#[test]
fn initial_colors_are_digests_of_the_buffers() {
    let built = build_world(&MirroredPairs);
    let lexicon = LexiconV1::build(&built.raw).unwrap();
    let features = lexicon.materialize(&built.raw).unwrap();
    let coloring = initial_coloring(&features);
    for (record, color) in features.iter().zip(&coloring) {
        assert_eq!(*color, fast_hash64(record.buffer()));
    }
}

#[test]
fn refined_colors_hash_the_sorted_triple_words() {
    let built = build_world(&MirroredPairs);
    let lexicon = LexiconV1::build(&built.raw).unwrap();
    let features = lexicon.materialize(&built.raw).unwrap();
    let coloring = initial_coloring(&features);

    for v in 0..built.graph.node_count() {
        let mut triples: Vec<(u64, u64, u64)> = built
            .graph
            .neighbors(v)
            .iter()
            .map(|e| {
                (
                    e.dir.to_code(),
                    u64::from(e.relation),
                    coloring[e.neighbor as usize],
                )
            })
            .collect();
        triples.sort_unstable();
        let mut words = vec![coloring[v as usize]];
        for (d, r, c) in triples {
            words.extend([d, r, c]);
        }
        assert_eq!(
            refine_node(v, &built.graph, &coloring),
            hash_u64_words(&words),
            "node {v} serialization drifted"
        );
    }
}

#[test]
fn isolated_nodes_hash_their_own_color_word() {
    let record = FeatureRecordV1::new(NodeTypeV1::Blank, vec![], vec![]).unwrap();
    let color = fast_hash64(record.buffer());
    // An empty adjacency degenerates to the single own-color word.
    assert_eq!(
        hash_u64_words(&[color]),
        fast_hash64(&le_words(&[color]))
    );
}

#[test]
fn buffer_equality_tracks_field_equality() {
    let a = FeatureRecordV1::new(NodeTypeV1::Blank, vec![1], vec![]).unwrap();
    let b = FeatureRecordV1::new(NodeTypeV1::Blank, vec![1], vec![]).unwrap();
    assert_eq!(a.buffer(), b.buffer());
    assert_eq!(fast_hash64(a.buffer()), fast_hash64(b.buffer()));

    let c = a.with_node_type(NodeTypeV1::Constant);
    assert_ne!(fast_hash64(a.buffer()), fast_hash64(c.buffer()));
}
