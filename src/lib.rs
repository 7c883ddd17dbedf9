//! Priority K-cut enumeration for And-Inverter Graphs.
//!
//! An AIG is read from an AIGER file (ASCII `aag` or binary `aig`), and
//! every AND vertex receives a bounded list of K-feasible cuts: sets of at
//! most K fanin signals that, with the sub-circuit rooted at the vertex,
//! form a legal mapping candidate. Each cut carries a cost amortized over
//! the vertex's fanout, so a later mapping phase can pick reusable cuts
//! without enumerating them all; the cheapest one per vertex is tracked as
//! its winner.
//!
//! ```rust
//! use priocut::{Aig, CutParams, Cuts};
//!
//! let src = "aag 3 2 0 1 1\n2\n4\n6\n6 4 2\n";
//! let aig = Aig::from_reader(src.as_bytes()).unwrap();
//! let cuts = Cuts::compute(&aig, CutParams { max_inputs: 2, max_cuts: 2 }).unwrap();
//!
//! let (_, winner) = cuts.winner(2).unwrap();
//! assert_eq!(winner.cost(), 0.0);
//! assert_eq!(winner.inputs().collect::<Vec<_>>(), vec![4, 2]);
//! ```
//!
//! Cut leaves are plain AIGER literals treated as opaque names: the
//! algorithm is structural, so edge polarities play no role and a signal
//! and its complement name the same leaf.

pub mod aig;
pub mod cuts;

pub use aig::{
    literal_index, vertex_label, Aig, AigError, Child, Literal, ParserError, Result, Vertex,
    VertexKind,
};
pub use cuts::{Cut, CutError, CutParams, Cuts};
