//! Traversals over any [`GraphProtocol`] container.

use super::{GraphError, GraphProtocol};
use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// Vertices reachable from `start` in breadth-first order, `start` first.
pub fn bfs<V, G>(graph: &G, start: &V) -> Result<Vec<V>, GraphError>
where
    V: Clone + Eq + Hash + Debug,
    G: GraphProtocol<V> + ?Sized,
{
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);
    let mut order = Vec::new();

    while let Some(v) = queue.pop_front() {
        for s in graph.succ(&v)? {
            if seen.insert(s.clone()) {
                queue.push_back(s);
            }
        }
        order.push(v);
    }
    Ok(order)
}

/// Vertices reachable from `start` in depth-first preorder, successors
/// visited in the order the container reports them.
pub fn dfs<V, G>(graph: &G, start: &V) -> Result<Vec<V>, GraphError>
where
    V: Clone + Eq + Hash + Debug,
    G: GraphProtocol<V> + ?Sized,
{
    let mut seen = HashSet::new();
    let mut stack = vec![start.clone()];
    let mut order = Vec::new();

    while let Some(v) = stack.pop() {
        if !seen.insert(v.clone()) {
            continue;
        }
        let succ = graph.succ(&v)?;
        stack.extend(succ.into_iter().rev().filter(|s| !seen.contains(s)));
        order.push(v);
    }
    Ok(order)
}

/// Root of the graph if it is a tree, `None` otherwise.
///
/// A tree has exactly one vertex without predecessors, every other vertex
/// has exactly one, and every vertex is reachable from the root.
pub fn is_tree<V, G>(graph: &G) -> Option<V>
where
    V: Clone + Eq + Hash + Debug,
    G: GraphProtocol<V> + ?Sized,
{
    let mut root = None;
    for v in graph.vertices() {
        match graph.in_degree(&v).ok()? {
            0 if root.is_none() => root = Some(v),
            1 => {}
            _ => return None,
        }
    }
    let root = root?;
    let reachable = bfs(graph, &root).ok()?;
    (reachable.len() == graph.num_vertices()).then_some(root)
}
