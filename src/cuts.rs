//! Priority K-cut enumeration.
//!
//! Build an [`Aig`](crate::aig::Aig), pick the two bounds (K, the widest
//! cut kept, and P, how many cuts each vertex retains) and call
//! [`Cuts::compute`]. The result holds, for every vertex, between 1 and P
//! cuts of at most K leaves each, with pairwise distinct leaf sets, every
//! gate's autocut among them, and the per-vertex winner tracked.
//!
//! ```rust
//! use priocut::{Aig, CutParams, Cuts};
//!
//! let src = "aag 3 2 0 1 1\n2\n4\n6\n6 4 2\n";
//! let aig = Aig::from_reader(src.as_bytes()).unwrap();
//! let cuts = Cuts::compute(&aig, CutParams::default()).unwrap();
//!
//! let (_, winner) = cuts.winner(2).unwrap();
//! assert_eq!(winner.cost(), 0.0);
//! ```

pub mod error;
mod engine;
mod print;
mod table;

use tracing::debug;

use crate::aig::{vertex_label, Aig};
pub use error::{CutError, Result};
pub use table::Cut;
use table::CutTable;

/// Bounds of the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutParams {
    /// The maximum number of inputs for each cut (K). Minimum 2.
    pub max_inputs: usize,
    /// The number of priority cuts stored for each vertex (P). Minimum 2.
    pub max_cuts: usize,
}

impl Default for CutParams {
    /// The tool defaults: K = 4, P = 2.
    fn default() -> Self {
        CutParams {
            max_inputs: 4,
            max_cuts: 2,
        }
    }
}

/// The sealed priority cuts of every vertex of one run.
#[derive(Debug, Clone)]
pub struct Cuts {
    params: CutParams,
    table: CutTable,
    winners: Vec<usize>,
}

impl Cuts {
    /// Enumerates the priority cuts of the whole graph.
    ///
    /// Every input first receives its trivial cut (itself, for free), then
    /// the gates are processed in ascending layer order, so each fanin's
    /// cut list is sealed before any consumer reads it. Within a layer no
    /// vertex depends on another, and the per-vertex computation is a pure
    /// function of the fanins' lists, so the in-layer order is irrelevant.
    ///
    /// Panics if a bound of `params` is below 2.
    pub fn compute(aig: &Aig, params: CutParams) -> Result<Cuts> {
        assert!(
            params.max_inputs >= 2 && params.max_cuts >= 2,
            "minimal value for max_inputs and max_cuts is 2"
        );

        let mut table = CutTable::new(aig.num_vertices(), params.max_cuts, params.max_inputs);
        let mut winners = vec![0; aig.num_vertices()];

        for index in 0..aig.num_inputs() {
            table.write(index, 0, 0.0, &[vertex_label(index)]);
        }

        for layer in aig.and_layers() {
            for &vertex in layer {
                winners[vertex] = engine::compute_vertex(aig, &mut table, vertex)?;
            }
        }

        debug!(
            vertices = aig.num_vertices(),
            gate_layers = aig.and_layers().len(),
            "priority cuts sealed"
        );

        Ok(Cuts {
            params,
            table,
            winners,
        })
    }

    pub fn params(&self) -> CutParams {
        self.params
    }

    /// How many vertices the run covered.
    pub fn num_vertices(&self) -> usize {
        self.winners.len()
    }

    /// The stored cuts of a vertex, in slot order.
    pub fn cuts_of(&self, vertex: usize) -> impl Iterator<Item = (usize, Cut<'_>)> {
        self.table.cuts(vertex)
    }

    /// The winner of a vertex: its cheapest cut, lowest slot on ties.
    pub fn winner(&self, vertex: usize) -> Option<(usize, Cut<'_>)> {
        let slot = self.winners[vertex];
        Some((slot, self.table.cut(vertex, slot)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::aig::Literal;

    fn cut_sets(cuts: &Cuts, vertex: usize) -> Vec<(Vec<Literal>, f32)> {
        cuts.cuts_of(vertex)
            .map(|(_, cut)| {
                let mut inputs: Vec<Literal> = cut.inputs().collect();
                inputs.sort_unstable();
                (inputs, cut.cost())
            })
            .collect()
    }

    #[test]
    fn inputs_only() {
        let aig = Aig::from_reader("aag 2 2 0 1 0\n2\n4\n2\n".as_bytes()).unwrap();
        let cuts = Cuts::compute(&aig, CutParams::default()).unwrap();

        assert_eq!(cut_sets(&cuts, 0), vec![(vec![2], 0.0)]);
        assert_eq!(cut_sets(&cuts, 1), vec![(vec![4], 0.0)]);
    }

    #[test]
    fn single_gate() {
        let aig = Aig::from_reader("aag 3 2 0 1 1\n2\n4\n6\n6 4 2\n".as_bytes()).unwrap();
        let cuts = Cuts::compute(
            &aig,
            CutParams {
                max_inputs: 2,
                max_cuts: 2,
            },
        )
        .unwrap();

        assert_eq!(
            cut_sets(&cuts, 2),
            vec![(vec![2, 4], 0.0), (vec![6], 1.0)]
        );
        let (slot, winner) = cuts.winner(2).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(winner.cost(), 0.0);
    }

    #[test]
    fn shared_fanin_two_levels() {
        // 6 and 8 both compute 4 & 2; 10 merges them, so both fanins'
        // best cuts collapse to the same {2, 4} leaf set at zero cost.
        let src = "aag 5 2 0 1 3\n2\n4\n10\n6 4 2\n8 4 2\n10 8 6\n";
        let aig = Aig::from_reader(src.as_bytes()).unwrap();
        let cuts = Cuts::compute(
            &aig,
            CutParams {
                max_inputs: 3,
                max_cuts: 2,
            },
        )
        .unwrap();

        let (_, winner) = cuts.winner(4).unwrap();
        assert_eq!(winner.cost(), 0.0);
        let mut winner_inputs: Vec<Literal> = winner.inputs().collect();
        winner_inputs.sort_unstable();
        assert_eq!(winner_inputs, vec![2, 4]);

        // The autocut displaced the costlier merged cut.
        assert_eq!(
            cut_sets(&cuts, 4),
            vec![(vec![2, 4], 0.0), (vec![10], 1.0)]
        );
    }

    #[test]
    #[should_panic(expected = "minimal value")]
    fn bounds_below_two_are_rejected() {
        let aig = Aig::from_reader("aag 2 2 0 1 0\n2\n4\n2\n".as_bytes()).unwrap();
        let _ = Cuts::compute(
            &aig,
            CutParams {
                max_inputs: 1,
                max_cuts: 2,
            },
        );
    }
}
