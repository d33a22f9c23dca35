//! Minimal directed-graph protocol and an insertion-ordered implementation.
//!
//! Containers implement the six required methods of [`GraphProtocol`]; the
//! rest have brute-force defaults that a container may override when it
//! can answer faster. Traversals in [`traversal`] only use the protocol.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

pub mod traversal;

pub use traversal::{bfs, dfs, is_tree};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex {vertex} is not in the graph")]
    UnknownVertex { vertex: String },
}

impl GraphError {
    pub(crate) fn unknown<V: Debug>(vertex: &V) -> Self {
        Self::UnknownVertex {
            vertex: format!("{vertex:?}"),
        }
    }
}

/// Operations a directed-graph container must support.
pub trait GraphProtocol<V: Clone + Eq + Hash + Debug> {
    fn vertices(&self) -> Vec<V>;

    /// Successors of `v`, failing for an unknown vertex.
    fn succ(&self, v: &V) -> Result<Vec<V>, GraphError>;

    /// Add a vertex. Adding an existing vertex keeps its edges.
    fn add(&mut self, v: V);

    /// Remove a vertex together with every edge touching it.
    fn remove(&mut self, v: &V) -> Result<(), GraphError>;

    /// Create the edge `pred -> succ`.
    fn connect(&mut self, pred: &V, succ: &V) -> Result<(), GraphError>;

    fn disconnect(&mut self, pred: &V, succ: &V) -> Result<(), GraphError>;

    /// Predecessors of `v`, found by scanning every vertex's successors.
    fn pred(&self, v: &V) -> Result<Vec<V>, GraphError> {
        self.succ(v)?;
        let mut preds = Vec::new();
        for vertex in self.vertices() {
            if self.succ(&vertex)?.contains(v) {
                preds.push(vertex);
            }
        }
        Ok(preds)
    }

    fn clear(&mut self) {
        for v in self.vertices() {
            // Vertices came from the graph itself.
            let _ = self.remove(&v);
        }
    }

    fn in_degree(&self, v: &V) -> Result<usize, GraphError> {
        Ok(self.pred(v)?.len())
    }

    fn out_degree(&self, v: &V) -> Result<usize, GraphError> {
        Ok(self.succ(v)?.len())
    }

    fn num_vertices(&self) -> usize {
        self.vertices().len()
    }
}

/// Adjacency-list graph remembering insertion order of vertices and edges.
///
/// # Example
///
/// ```rust
/// use cogwork::graph::{Graph, GraphProtocol};
///
/// let mut graph = Graph::new();
/// graph.add("+");
/// graph.add("1");
/// graph.add("2");
/// graph.connect(&"+", &"1").unwrap();
/// graph.connect(&"+", &"2").unwrap();
///
/// assert_eq!(graph.succ(&"+").unwrap(), vec!["1", "2"]);
/// assert_eq!(graph.in_degree(&"2").unwrap(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Graph<V> {
    order: Vec<V>,
    succ: HashMap<V, Vec<V>>,
    pred: HashMap<V, Vec<V>>,
}

impl<V: Clone + Eq + Hash + Debug> Graph<V> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            succ: HashMap::new(),
            pred: HashMap::new(),
        }
    }

    pub fn contains(&self, v: &V) -> bool {
        self.succ.contains_key(v)
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.succ.values().map(Vec::len).sum()
    }

    fn require(&self, v: &V) -> Result<(), GraphError> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(GraphError::unknown(v))
        }
    }
}

impl<V: Clone + Eq + Hash + Debug> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash + Debug> GraphProtocol<V> for Graph<V> {
    fn vertices(&self) -> Vec<V> {
        self.order.clone()
    }

    fn succ(&self, v: &V) -> Result<Vec<V>, GraphError> {
        self.succ.get(v).cloned().ok_or_else(|| GraphError::unknown(v))
    }

    fn add(&mut self, v: V) {
        if self.contains(&v) {
            return;
        }
        self.order.push(v.clone());
        self.succ.insert(v.clone(), Vec::new());
        self.pred.insert(v, Vec::new());
    }

    fn remove(&mut self, v: &V) -> Result<(), GraphError> {
        self.require(v)?;
        for p in self.pred(v)? {
            self.disconnect(&p, v)?;
        }
        for s in self.succ(v)? {
            self.disconnect(v, &s)?;
        }
        self.order.retain(|x| x != v);
        self.succ.remove(v);
        self.pred.remove(v);
        Ok(())
    }

    fn connect(&mut self, pred: &V, succ: &V) -> Result<(), GraphError> {
        self.require(pred)?;
        self.require(succ)?;
        let out = self.succ.entry(pred.clone()).or_default();
        if out.contains(succ) {
            return Ok(());
        }
        out.push(succ.clone());
        self.pred.entry(succ.clone()).or_default().push(pred.clone());
        Ok(())
    }

    fn disconnect(&mut self, pred: &V, succ: &V) -> Result<(), GraphError> {
        self.require(pred)?;
        self.require(succ)?;
        if let Some(out) = self.succ.get_mut(pred) {
            out.retain(|x| x != succ);
        }
        if let Some(inc) = self.pred.get_mut(succ) {
            inc.retain(|x| x != pred);
        }
        Ok(())
    }

    fn pred(&self, v: &V) -> Result<Vec<V>, GraphError> {
        self.pred.get(v).cloned().ok_or_else(|| GraphError::unknown(v))
    }

    fn clear(&mut self) {
        self.order.clear();
        self.succ.clear();
        self.pred.clear();
    }

    fn num_vertices(&self) -> usize {
        self.order.len()
    }
}
