//! The per-vertex cut computation.
//!
//! A gate's cuts come from the cartesian product of its two fanins' cut
//! lists: every pair of child cuts merges into one candidate whose leaves
//! are the union of the children's leaves and whose cost is the children's
//! costs summed and divided by the gate's fanout. Candidates wider than
//! `max_inputs` or equal (as a set) to an already stored cut are dropped;
//! the rest compete for the `max_cuts` slots under a first-fit,
//! cost-ordered replacement rule. The gate's own autocut is placed last
//! and is always part of the final list.

use tracing::trace;

use crate::aig::{vertex_label, Aig, Child, Literal, VertexKind};
use crate::cuts::error::{CutError, Result};
use crate::cuts::table::CutTable;

fn child_label(child: Child) -> Literal {
    match child {
        Child::Vertex(index) => vertex_label(index),
        Child::Constant(lit) => lit,
    }
}

/// The cuts a fanin offers to the cartesian product.
///
/// A constant fanin offers exactly one zero-cost cut whose single leaf is
/// the constant's own literal.
fn child_cuts(table: &CutTable, child: Child) -> Vec<(f32, Vec<Literal>)> {
    match child {
        Child::Constant(lit) => vec![(0.0, vec![lit])],
        Child::Vertex(index) => table
            .cuts(index)
            .map(|(_, cut)| (cut.cost(), cut.inputs().collect()))
            .collect(),
    }
}

/// The occupied slot with the lowest cost; ties go to the lowest index.
///
/// The running minimum lives in a local, so a tie never re-reads a cost
/// through a stale slot index.
fn winner_slot(table: &CutTable, vertex: usize) -> Option<(usize, f32)> {
    let mut winner: Option<(usize, f32)> = None;
    for slot in 0..table.max_cuts() {
        if let Some(cost) = table.cost(vertex, slot) {
            if winner.map_or(true, |(_, best)| cost < best) {
                winner = Some((slot, cost));
            }
        }
    }
    winner
}

/// The occupied slot with the highest cost; ties go to the highest index.
fn loser_slot(table: &CutTable, vertex: usize) -> usize {
    let mut loser = (0, f32::NEG_INFINITY);
    for slot in 0..table.max_cuts() {
        if let Some(cost) = table.cost(vertex, slot) {
            if cost >= loser.1 {
                loser = (slot, cost);
            }
        }
    }
    loser.0
}

/// First-fit, cost-ordered replacement: the first slot that is free or
/// strictly costlier than the candidate takes it (the previous content is
/// lost). Returns false if no slot qualifies.
fn insert(table: &mut CutTable, vertex: usize, cost: f32, inputs: &[Literal]) -> bool {
    for slot in 0..table.max_cuts() {
        match table.cost(vertex, slot) {
            Some(stored) if stored <= cost => continue,
            _ => {
                table.write(vertex, slot, cost, inputs);
                return true;
            }
        }
    }
    false
}

/// Computes the cut list of one AND vertex from its fanins' sealed cut
/// lists, and returns the winner slot.
///
/// Must only run after both fanins' lists are sealed; the driver's layer
/// order guarantees it.
pub(super) fn compute_vertex(aig: &Aig, table: &mut CutTable, vertex: usize) -> Result<usize> {
    let v = aig.vertex(vertex);
    let VertexKind::And { left, right } = v.kind() else {
        unreachable!("cut engine invoked on a non-AND vertex");
    };
    if v.fanout() == 0 {
        return Err(CutError::FanoutZero(vertex_label(vertex)));
    }
    let fanout = v.fanout() as f32;

    let left_cuts = child_cuts(table, left);
    let right_cuts = child_cuts(table, right);
    if left_cuts.is_empty() {
        return Err(CutError::MissingChildCut(child_label(left)));
    }
    if right_cuts.is_empty() {
        return Err(CutError::MissingChildCut(child_label(right)));
    }

    table.clear_vertex(vertex);

    let max_inputs = table.max_inputs();
    let mut product = Vec::with_capacity(2 * max_inputs);
    for (left_cost, left_inputs) in &left_cuts {
        for (right_cost, right_inputs) in &right_cuts {
            let cost = (left_cost + right_cost) / fanout;

            // Union of the leaves, left fanin's first.
            product.clear();
            product.extend_from_slice(left_inputs);
            for &lit in right_inputs {
                if !product.contains(&lit) {
                    product.push(lit);
                }
            }

            if product.len() > max_inputs {
                continue;
            }
            if table
                .cuts(vertex)
                .any(|(_, cut)| cut.same_inputs(&product))
            {
                continue;
            }
            insert(table, vertex, cost, &product);
        }
    }

    // The product of the fanins' own best cuts always fits (max_inputs is
    // at least 2), so the list cannot be empty here.
    let (winner, winner_cost) = match winner_slot(table, vertex) {
        Some(found) => found,
        None => return Err(CutError::MissingChildCut(vertex_label(vertex))),
    };

    // The autocut terminates the mapping at this signal: its single leaf
    // is the gate itself and it costs one fanout share more than the
    // winner. It goes in a free or costlier slot if one exists, and evicts
    // the loser otherwise.
    let autocut_cost = winner_cost + 1.0 / fanout;
    let autocut = [vertex_label(vertex)];
    if !insert(table, vertex, autocut_cost, &autocut) {
        let loser = loser_slot(table, vertex);
        table.write(vertex, loser, autocut_cost, &autocut);
    }

    trace!(
        vertex = vertex_label(vertex),
        winner,
        winner_cost,
        "cut list sealed"
    );
    Ok(winner)
}
