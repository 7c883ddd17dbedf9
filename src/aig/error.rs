use thiserror::Error;

use crate::aig::Literal;
use crate::cuts::error::CutError;

/// The result of an AIG operation.
pub type Result<T> = std::result::Result<T, AigError>;

/// Error returned when an AIG operation failed.
#[derive(Debug, Error)]
pub enum AigError {
    /// A gate that no other gate and no output consumes.
    /// Every gate of a well-formed graph must drive something.
    #[error("there is a vertex ({0}) in the graph that has no outgoing edge (fanout = 0)")]
    DanglingVertex(Literal),

    /// Just forwarding a [`ParserError`].
    #[error("{0}")]
    Parser(#[from] ParserError),

    /// Just forwarding a [`CutError`].
    ///
    /// [`CutError`]: crate::cuts::error::CutError
    #[error("{0}")]
    Cut(#[from] CutError),
}

/// Error returned when reading an AIGER file failed.
///
/// It is defined here because the `parser` module is private.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The file could not be opened or read.
    #[error("failed to read the input file: {0}")]
    Io(String),

    /// The first line is not a valid `aag`/`aig` header.
    #[error("wrong, invalid or unknown format: {0}")]
    HeaderMalformed(String),

    /// The header declares latches, which this implementation does not support.
    #[error("the graph contains latches, which are not supported")]
    LatchesUnsupported,

    /// The header counts do not satisfy M = I + L + A.
    #[error("invalid graph: M != I + L + A (M={m}, I={i}, L={l}, A={a})")]
    CountsInconsistent { m: u64, i: u64, l: u64, a: u64 },

    /// The file ended before every declared record was read.
    #[error("the input file reached the end before expected")]
    UnexpectedEof,

    /// A body record violates the AIGER structural rules.
    #[error("{0}")]
    Body(#[from] BodyError),
}

/// A structural violation in the body of an AIGER file.
#[derive(Debug, Error)]
pub enum BodyError {
    /// A token that should have been a non-negative integer.
    #[error("invalid (negative or non-numeric) literal: {0}")]
    NegativeIndex(String),

    /// An input line carrying anything else than twice the input's variable index.
    #[error(
        "the label of an input must be twice its index, \
         but the input with index {index} has the label {label}"
    )]
    WrongInputLabel { index: u64, label: Literal },

    /// A gate line carrying anything else than twice the gate's variable index.
    #[error(
        "the label of a gate must be twice its index, \
         but the gate with index {index} has the label {label}"
    )]
    WrongGateLabel { index: u64, label: Literal },

    /// A gate listing its smaller fanin first.
    #[error("gate {label} must list its greater fanin first (found {left} and {right})")]
    InputOrderViolation {
        label: Literal,
        left: Literal,
        right: Literal,
    },

    /// A literal that cannot reference anything at the position it appears in.
    #[error("literal {literal} referenced by {by} is out of range")]
    LiteralRange { literal: Literal, by: String },

    /// The same literal appearing twice in the output list.
    #[error("the graph contains an output declared twice: {0}")]
    DuplicateOutput(Literal),
}
