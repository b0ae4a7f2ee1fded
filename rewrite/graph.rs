//! Variable co-occurrence in a rule body.

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;

use crate::context::RuleContext;

/// Undirected graph over a rule's variables (by index), with an edge
/// between two variables that occur in the same body atom or
/// comparison. Every variable of a body literal has a self-loop.
pub struct DependencyGraph(UnGraphMap<usize, ()>);

impl DependencyGraph {
    pub fn new(context: &RuleContext) -> Self {
        let mut graph = UnGraphMap::new();
        for v in 0..context.variables().len() {
            graph.add_node(v);
        }

        let groups = context
            .body_atoms()
            .map(|o| o.variables())
            .chain(context.comparisons().iter().map(|c| c.variables()));
        for vars in groups {
            for &u in &vars {
                for &v in &vars {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Self(graph)
    }

    /// The head variables reachable from `from`, in head order.
    pub fn reached(&self, from: usize, head: &[usize]) -> Vec<usize> {
        let mut seen = Vec::new();
        if self.0.contains_node(from) {
            let mut dfs = Dfs::new(&self.0, from);
            while let Some(v) = dfs.next(&self.0) {
                seen.push(v);
            }
        }
        head.iter().copied().filter(|h| seen.contains(h)).collect()
    }
}
