//! Human-readable cut listing, the output behind the tool's `-d` switch.

use crate::aig::vertex_label;
use crate::cuts::Cuts;

impl Cuts {
    /// Renders one block per vertex, in vertex order:
    ///
    /// ```text
    /// v[6] cuts:
    ///   {'cut':{4,2},'cost':0}
    ///   {'cut':{6},'cost':1}
    /// ```
    ///
    /// Leaves appear in their insertion order (left fanin's first); the
    /// listing names sets, so the order carries no meaning.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for vertex in 0..self.num_vertices() {
            out += &format!("v[{}] cuts:\n", vertex_label(vertex));
            for (_, cut) in self.cuts_of(vertex) {
                let inputs = cut
                    .inputs()
                    .map(|lit| lit.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                out += &format!("  {{'cut':{{{}}},'cost':{}}}\n", inputs, cut.cost());
            }
        }
        out
    }
}
