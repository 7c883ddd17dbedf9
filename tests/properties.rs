//! Invariants that must hold for every vertex after any successful run.

use priocut::{vertex_label, Aig, Child, CutParams, Cuts, Literal, VertexKind};

const ASCII: &[u8] = b"aag 8 4 0 1 4\n2\n4\n6\n8\n16\n10 4 2\n12 8 6\n14 12 10\n16 14 9\n";

/// The same circuit in the binary encoding: output 16, then the delta
/// pairs (6,2) (4,2) (2,2) (2,5).
fn binary() -> Vec<u8> {
    let mut src = b"aig 8 4 0 1 4\n16\n".to_vec();
    src.extend([6, 2, 4, 2, 2, 2, 2, 5]);
    src
}

fn bounds() -> [(usize, usize); 4] {
    [(2, 2), (3, 2), (4, 3), (2, 4)]
}

fn compute(src: &[u8], k: usize, p: usize) -> (Aig, Cuts) {
    let aig = Aig::from_reader(src).unwrap();
    let cuts = Cuts::compute(
        &aig,
        CutParams {
            max_inputs: k,
            max_cuts: p,
        },
    )
    .unwrap();
    (aig, cuts)
}

fn sorted_inputs(cut: &priocut::Cut<'_>) -> Vec<Literal> {
    let mut inputs: Vec<Literal> = cut.inputs().collect();
    inputs.sort_unstable();
    inputs
}

/// Between 1 and P cuts everywhere, each 1 to K leaves wide.
#[test]
fn bounded_count_and_width() {
    for (k, p) in bounds() {
        let (_, cuts) = compute(ASCII, k, p);
        for vertex in 0..cuts.num_vertices() {
            let count = cuts.cuts_of(vertex).count();
            assert!(count >= 1 && count <= p);
            for (_, cut) in cuts.cuts_of(vertex) {
                assert!(cut.len() >= 1 && cut.len() <= k);
            }
        }
    }
}

/// The leaf sets of one vertex are pairwise distinct.
#[test]
fn leaf_sets_are_unique() {
    for (k, p) in bounds() {
        let (_, cuts) = compute(ASCII, k, p);
        for vertex in 0..cuts.num_vertices() {
            let stored: Vec<Vec<Literal>> = cuts
                .cuts_of(vertex)
                .map(|(_, cut)| sorted_inputs(&cut))
                .collect();
            for (i, a) in stored.iter().enumerate() {
                for b in &stored[i + 1..] {
                    assert_ne!(a, b, "vertex {vertex} stores a leaf set twice");
                }
            }
        }
    }
}

/// Every AND vertex keeps its autocut.
#[test]
fn autocut_is_always_present() {
    for (k, p) in bounds() {
        let (aig, cuts) = compute(ASCII, k, p);
        for vertex in aig.num_inputs()..aig.num_vertices() {
            let label = vertex_label(vertex);
            assert!(
                cuts.cuts_of(vertex)
                    .any(|(_, cut)| cut.len() == 1 && cut.contains(label)),
                "vertex {vertex} lost its autocut"
            );
        }
    }
}

/// Every stored cost obeys the recurrence. A merged cut costs some
/// pair of child cut costs summed over the fanout; the autocut costs one
/// fanout share more than the winner.
#[test]
fn costs_follow_the_recurrence() {
    for (k, p) in bounds() {
        let (aig, cuts) = compute(ASCII, k, p);
        for vertex in aig.num_inputs()..aig.num_vertices() {
            let VertexKind::And { left, right } = aig.vertex(vertex).kind() else {
                unreachable!();
            };
            let fanout = aig.vertex(vertex).fanout() as f32;
            let child_costs = |child: Child| -> Vec<f32> {
                match child {
                    Child::Constant(_) => vec![0.0],
                    Child::Vertex(index) => {
                        cuts.cuts_of(index).map(|(_, cut)| cut.cost()).collect()
                    }
                }
            };
            let left_costs = child_costs(left);
            let right_costs = child_costs(right);

            let label = vertex_label(vertex);
            let (_, winner) = cuts.winner(vertex).unwrap();
            let winner_cost = winner.cost();

            for (_, cut) in cuts.cuts_of(vertex) {
                if cut.len() == 1 && cut.contains(label) {
                    assert_eq!(cut.cost(), winner_cost + 1.0 / fanout);
                } else {
                    assert!(
                        left_costs.iter().any(|c1| {
                            right_costs.iter().any(|c2| (c1 + c2) / fanout == cut.cost())
                        }),
                        "vertex {vertex} stores a cost no child pair explains"
                    );
                }
            }
        }
    }
}

/// The winner never costs more than the autocut, and costs strictly
/// less when a merged cut survived.
#[test]
fn winner_bounds_the_autocut() {
    for (k, p) in bounds() {
        let (aig, cuts) = compute(ASCII, k, p);
        for vertex in aig.num_inputs()..aig.num_vertices() {
            let label = vertex_label(vertex);
            let (_, winner) = cuts.winner(vertex).unwrap();
            let autocut_cost = cuts
                .cuts_of(vertex)
                .find(|(_, cut)| cut.len() == 1 && cut.contains(label))
                .map(|(_, cut)| cut.cost())
                .unwrap();

            assert!(winner.cost() <= autocut_cost);
            let merged_survived = cuts
                .cuts_of(vertex)
                .any(|(_, cut)| !(cut.len() == 1 && cut.contains(label)));
            assert_eq!(winner.cost() < autocut_cost, merged_survived);
        }
    }
}

/// Layers are consistent, so every fanin is sealed before its consumer
/// runs.
#[test]
fn layers_respect_dependencies() {
    let (aig, _) = compute(ASCII, 4, 2);
    for vertex in aig.num_inputs()..aig.num_vertices() {
        let VertexKind::And { left, right } = aig.vertex(vertex).kind() else {
            unreachable!();
        };
        for child in [left, right] {
            if let Child::Vertex(index) = child {
                assert!(aig.vertex(index).layer() < aig.vertex(vertex).layer());
            }
        }
    }
}

/// The ASCII and binary renditions of the same circuit yield the same
/// cut tables, slot by slot.
#[test]
fn format_round_trip() {
    for (k, p) in bounds() {
        let (_, from_ascii) = compute(ASCII, k, p);
        let (_, from_binary) = compute(&binary(), k, p);

        assert_eq!(from_ascii.num_vertices(), from_binary.num_vertices());
        for vertex in 0..from_ascii.num_vertices() {
            let a: Vec<(usize, f32, Vec<Literal>)> = from_ascii
                .cuts_of(vertex)
                .map(|(slot, cut)| (slot, cut.cost(), cut.inputs().collect()))
                .collect();
            let b: Vec<(usize, f32, Vec<Literal>)> = from_binary
                .cuts_of(vertex)
                .map(|(slot, cut)| (slot, cut.cost(), cut.inputs().collect()))
                .collect();
            assert_eq!(a, b, "vertex {vertex} differs between formats");
        }
    }
}
