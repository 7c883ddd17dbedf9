use thiserror::Error;

use crate::aig::Literal;

/// The result of a cut computation.
pub type Result<T> = std::result::Result<T, CutError>;

/// Error returned when the cut engine failed.
///
/// Both variants are unreachable on a graph that passed construction:
/// the builder rejects fanout-free gates, and the layer order guarantees
/// every child is computed first. They stay explicit errors rather than
/// panics so a misuse of the library surfaces cleanly.
#[derive(Debug, Error)]
pub enum CutError {
    /// A gate with no consumers reached the engine.
    #[error("found a vertex ({0}) with fanout = 0")]
    FanoutZero(Literal),

    /// A fanin had no cut to merge from.
    #[error("vertex {0} has no cut to merge from")]
    MissingChildCut(Literal),
}
