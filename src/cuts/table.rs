//! Dense per-vertex cut storage.
//!
//! All cuts of the run live in two flat arrays indexed by
//! `(vertex, slot, input position)`: one row of `max_cuts` costs per vertex
//! and one row of `max_cuts * max_inputs` input literals. Absence is
//! sentinel-encoded (-1) inside this module and never leaks through the
//! accessors.

use crate::aig::Literal;

/// A free cost slot.
const EMPTY_COST: f32 = -1.0;
/// An unused input position. Inputs are packed to the left of their row.
const NO_INPUT: i64 = -1;

/// One stored cut: its cost and its (at most `max_inputs`) leaf literals.
#[derive(Debug, Clone, Copy)]
pub struct Cut<'a> {
    cost: f32,
    row: &'a [i64],
}

impl Cut<'_> {
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// The leaf literals of the cut, in insertion order.
    pub fn inputs(&self) -> impl Iterator<Item = Literal> + '_ {
        self.row
            .iter()
            .take_while(|&&lit| lit != NO_INPUT)
            .map(|&lit| lit as Literal)
    }

    pub fn len(&self) -> usize {
        self.row.iter().take_while(|&&lit| lit != NO_INPUT).count()
    }

    pub fn is_empty(&self) -> bool {
        self.row.first() == Some(&NO_INPUT)
    }

    pub fn contains(&self, lit: Literal) -> bool {
        self.inputs().any(|l| l == lit)
    }

    /// Set equality on the input literals; insertion order is irrelevant.
    pub fn same_inputs(&self, inputs: &[Literal]) -> bool {
        self.len() == inputs.len() && inputs.iter().all(|&l| self.contains(l))
    }
}

/// The cut storage for every vertex of one run.
#[derive(Debug, Clone)]
pub struct CutTable {
    max_cuts: usize,
    max_inputs: usize,
    costs: Vec<f32>,
    inputs: Vec<i64>,
}

impl CutTable {
    /// Allocates storage for `num_vertices` vertices, every slot free.
    pub fn new(num_vertices: usize, max_cuts: usize, max_inputs: usize) -> Self {
        CutTable {
            max_cuts,
            max_inputs,
            costs: vec![EMPTY_COST; num_vertices * max_cuts],
            inputs: vec![NO_INPUT; num_vertices * max_cuts * max_inputs],
        }
    }

    pub fn max_cuts(&self) -> usize {
        self.max_cuts
    }

    pub fn max_inputs(&self) -> usize {
        self.max_inputs
    }

    fn input_row(&self, vertex: usize, slot: usize) -> &[i64] {
        let start = (vertex * self.max_cuts + slot) * self.max_inputs;
        &self.inputs[start..start + self.max_inputs]
    }

    /// Frees every slot of `vertex`.
    pub fn clear_vertex(&mut self, vertex: usize) {
        self.costs[vertex * self.max_cuts..(vertex + 1) * self.max_cuts].fill(EMPTY_COST);
        let start = vertex * self.max_cuts * self.max_inputs;
        self.inputs[start..start + self.max_cuts * self.max_inputs].fill(NO_INPUT);
    }

    /// The cost stored in a slot, or `None` if the slot is free.
    pub fn cost(&self, vertex: usize, slot: usize) -> Option<f32> {
        let cost = self.costs[vertex * self.max_cuts + slot];
        (cost >= 0.0).then_some(cost)
    }

    /// The cut stored in a slot, or `None` if the slot is free.
    pub fn cut(&self, vertex: usize, slot: usize) -> Option<Cut<'_>> {
        self.cost(vertex, slot).map(|cost| Cut {
            cost,
            row: self.input_row(vertex, slot),
        })
    }

    /// Overwrites a slot with a full (cost, inputs) row, padding the unused
    /// input positions.
    pub fn write(&mut self, vertex: usize, slot: usize, cost: f32, inputs: &[Literal]) {
        debug_assert!(!inputs.is_empty() && inputs.len() <= self.max_inputs);
        self.costs[vertex * self.max_cuts + slot] = cost;
        let start = (vertex * self.max_cuts + slot) * self.max_inputs;
        let row = &mut self.inputs[start..start + self.max_inputs];
        row.fill(NO_INPUT);
        for (cell, &lit) in row.iter_mut().zip(inputs) {
            *cell = lit as i64;
        }
    }

    /// The occupied slots of `vertex`, in slot order.
    pub fn cuts(&self, vertex: usize) -> impl Iterator<Item = (usize, Cut<'_>)> {
        (0..self.max_cuts).filter_map(move |slot| Some((slot, self.cut(vertex, slot)?)))
    }
}
