//! Parent-first ordering of the class hierarchy.
//!
//! Resolving a class binding requires its parent's binding to exist, so the
//! registry validates up front that the full class set can be ordered with
//! every parent strictly before its children. The engine is expected to
//! report a forest; a cycle or a parent name outside the class set means the
//! class database is lying to us, and that surfaces as
//! [`BindError::BrokenHierarchy`] instead of a pass that never terminates.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use gdbind_core::{BindError, BindResult};

/// Order `classes` so that every class's parent appears strictly before it.
///
/// `parent_of` reports the immediate parent name, `None` for roots. The
/// relative order of unrelated classes is unspecified.
pub fn hierarchy_order<F>(classes: &[String], mut parent_of: F) -> BindResult<Vec<String>>
where
    F: FnMut(&str) -> BindResult<Option<String>>,
{
    let mut graph: DiGraph<&str, ()> = DiGraph::with_capacity(classes.len(), classes.len());
    let mut nodes: FxHashMap<&str, NodeIndex> = FxHashMap::default();

    for class in classes {
        nodes.insert(class.as_str(), graph.add_node(class.as_str()));
    }

    for class in classes {
        let Some(parent) = parent_of(class)? else {
            continue;
        };
        let Some(&parent_node) = nodes.get(parent.as_str()) else {
            return Err(BindError::BrokenHierarchy(format!(
                "class `{class}` reports unknown parent `{parent}`"
            )));
        };
        graph.add_edge(parent_node, nodes[class.as_str()], ());
    }

    match toposort(&graph, None) {
        Ok(sorted) => Ok(sorted.iter().map(|&n| graph[n].to_string()).collect()),
        Err(cycle) => Err(BindError::BrokenHierarchy(format!(
            "parent cycle through class `{}`",
            graph[cycle.node_id()]
        ))),
    }
}
