//! Module defining the [`Aig`] struct, as well as [`Vertex`], [`Child`] and the parsing errors.
//!
//! An [`Aig`] is built once, from an AIGER file or reader, and is immutable afterwards.
//! To enumerate priority cuts on it, check the [`crate::cuts`] docs.

pub mod error;
mod parser;

use tracing::debug;

pub use error::{AigError, ParserError, Result};

/// A signal in the AIGER convention.
///
/// Bit 0 carries the polarity (negated if set), the remaining bits the variable index.
/// Literal 0 is the constant false, literal 1 the constant true.
/// Variable index `v` maps to vertex index `v - 1`.
pub type Literal = u64;

/// The (even) literal labelling the vertex at `index`.
pub fn vertex_label(index: usize) -> Literal {
    2 * (index as Literal + 1)
}

/// The vertex index a literal refers to, or `None` for the constants 0 and 1.
pub fn literal_index(lit: Literal) -> Option<usize> {
    if lit >= 2 {
        Some((lit >> 1) as usize - 1)
    } else {
        None
    }
}

/// A resolved fanin of an AND vertex.
///
/// Polarity is dropped at resolution: cuts treat leaves as opaque names,
/// so an edge and its complement reference the same child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    /// Another vertex of the graph, by index.
    Vertex(usize),
    /// The constant false (literal 0) or true (literal 1).
    Constant(Literal),
}

impl Child {
    fn from_literal(lit: Literal) -> Self {
        match literal_index(lit) {
            Some(index) => Child::Vertex(index),
            None => Child::Constant(lit),
        }
    }
}

/// What a vertex is: a primary input or a two-fanin AND gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// A primary input. No predecessors.
    Input,
    /// An AND gate. `left` comes from the greater file literal (`lit1 >= lit2`).
    And { left: Child, right: Child },
}

/// A vertex of the graph, together with the bookkeeping the cut
/// algorithm needs: its consumer count and its layer number.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    kind: VertexKind,
    fanout: u32,
    layer: u32,
}

impl Vertex {
    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, VertexKind::Input)
    }

    pub fn is_and(&self) -> bool {
        matches!(self.kind, VertexKind::And { .. })
    }

    /// How many AND gates plus primary outputs reference this vertex
    /// (polarity ignored).
    pub fn fanout(&self) -> u32 {
        self.fanout
    }

    /// Longest distance from the inputs: 1 for inputs and constants,
    /// `1 + max(layer of fanins)` for gates.
    pub fn layer(&self) -> u32 {
        self.layer
    }
}

/// A whole AIG.
///
/// Vertices live in one flat table indexed `0..M`: inputs first (`0..I`),
/// then AND gates (`I..M`) in file order. Outputs are plain literals, not
/// vertices. The struct is immutable once built.
#[derive(Debug, Clone)]
pub struct Aig {
    vertices: Vec<Vertex>,
    outputs: Vec<Literal>,
    /// AND vertex indices binned by layer number, ascending, starting at
    /// layer 2 (the inputs implicitly form layer 1).
    layers: Vec<Vec<usize>>,
    num_inputs: usize,
}

impl Aig {
    /// Materializes the graph from validated header counts, output literals
    /// and gate triples `(label, lit1, lit2)`.
    ///
    /// Resolves fanins to [`Child`] values, accumulates fanouts, assigns
    /// layer numbers and bins the gates per layer. A gate nothing consumes
    /// makes the whole graph invalid ([`AigError::DanglingVertex`]); an
    /// unused primary input is accepted.
    pub(crate) fn build(
        num_inputs: usize,
        num_vertices: usize,
        outputs: Vec<Literal>,
        gates: Vec<(Literal, Literal, Literal)>,
    ) -> Result<Self> {
        let mut vertices = vec![
            Vertex {
                kind: VertexKind::Input,
                fanout: 0,
                layer: 1,
            };
            num_inputs
        ];
        vertices.reserve(num_vertices - num_inputs);

        // Gates reference only smaller labels, so one pass in file order
        // sees every child fully formed.
        let mut layers: Vec<Vec<usize>> = Vec::new();
        for &(_, lit1, lit2) in &gates {
            let index = vertices.len();
            let left = Child::from_literal(lit1);
            let right = Child::from_literal(lit2);

            // Constant fanins sit on layer 1 like the inputs, so a gate
            // never goes below layer 2.
            let mut layer = 2;
            for child in [left, right] {
                if let Child::Vertex(c) = child {
                    vertices[c].fanout += 1;
                    layer = layer.max(vertices[c].layer + 1);
                }
            }

            vertices.push(Vertex {
                kind: VertexKind::And { left, right },
                fanout: 0,
                layer,
            });

            // Inputs occupy layer 1, so gate bins start at layer 2.
            let bin = (layer - 2) as usize;
            if layers.len() <= bin {
                layers.resize_with(bin + 1, Vec::new);
            }
            layers[bin].push(index);
        }

        for &output in &outputs {
            if let Some(index) = literal_index(output) {
                vertices[index].fanout += 1;
            }
        }

        for (index, vertex) in vertices.iter().enumerate() {
            if vertex.is_and() && vertex.fanout == 0 {
                return Err(AigError::DanglingVertex(vertex_label(index)));
            }
        }

        debug!(
            inputs = num_inputs,
            gates = gates.len(),
            outputs = outputs.len(),
            layers = layers.len() + 1,
            "graph built"
        );

        Ok(Aig {
            vertices,
            outputs,
            layers,
            num_inputs,
        })
    }

    /// Total number of vertices (M = I + A).
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of primary inputs (vertices `0..I`).
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of AND gates (vertices `I..M`).
    pub fn num_ands(&self) -> usize {
        self.vertices.len() - self.num_inputs
    }

    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    /// The output literals, in file order.
    pub fn outputs(&self) -> &[Literal] {
        &self.outputs
    }

    /// AND vertex indices binned by layer, ascending from layer 2.
    ///
    /// Within a bin no vertex depends on another, so any in-bin order is a
    /// valid processing order.
    pub fn and_layers(&self) -> &[Vec<usize>] {
        &self.layers
    }
}
