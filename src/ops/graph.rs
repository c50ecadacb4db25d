//! Component graph export.

use std::collections::HashMap;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::Graph;
use crate::resolver::closure::Closure;

/// Directed component graph restricted to a closure.
///
/// Edges point from a component to its dependencies. Edges to components
/// outside the closure are left out.
pub fn component_graph<'g>(graph: &'g Graph, closure: &Closure) -> DiGraph<&'g str, &'static str> {
    let mut dag = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

    // Declaration order keeps the output stable.
    for component in graph.components() {
        if closure.contains(component) && !nodes.contains_key(component.as_str()) {
            nodes.insert(component.as_str(), dag.add_node(component.as_str()));
        }
    }

    for component in graph.components() {
        let Some(&from) = nodes.get(component.as_str()) else {
            continue;
        };
        for dep in graph.dependencies(component) {
            if let Some(&to) = nodes.get(dep.as_str()) {
                dag.update_edge(from, to, "");
            }
        }
    }

    dag
}

/// Render the closure as Graphviz DOT.
pub fn to_dot(graph: &Graph, closure: &Closure) -> String {
    let dag = component_graph(graph, closure);
    format!("{}", Dot::with_config(&dag, &[Config::EdgeNoLabel]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RequestedSet;
    use crate::resolver::closure;
    use crate::test_support::fixtures::GraphFixture;

    #[test]
    fn test_closure_subgraph() {
        let graph = GraphFixture::new()
            .component("core", &["xncbi"], &[])
            .component("seq", &["seq"], &["core", "Ghost"])
            .component("web", &["xcgi"], &["core"])
            .build();

        let closure = closure::resolve(&RequestedSet::components(["seq"]), &graph);
        let dag = component_graph(&graph, &closure);

        assert_eq!(dag.node_count(), 2);
        assert_eq!(dag.edge_count(), 1);
    }

    #[test]
    fn test_cycle_rendered() {
        let graph = GraphFixture::new()
            .component("A", &["a"], &["B"])
            .component("B", &["b"], &["A"])
            .build();

        let closure = closure::resolve(&RequestedSet::default(), &graph);
        let dot = to_dot(&graph, &closure);

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"A\""));
        assert!(dot.contains("0 -> 1"));
        assert!(dot.contains("1 -> 0"));
    }
}
