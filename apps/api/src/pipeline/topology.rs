//! Static shape of a two-phase run: prepare → branches → join.
//!
//! Validated before any remote call is made.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use crate::models::scoring::SectionName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    Prepare,
    Branch(SectionName),
    Join,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Prepare => f.write_str("prepare"),
            Node::Branch(section) => write!(f, "branch:{section}"),
            Node::Join => f.write_str("join"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("topology has no branches")]
    NoBranches,

    #[error("edge references unknown node {0}")]
    UnknownNode(Node),

    #[error("expected a single entry node 'prepare', found {0:?}")]
    Entry(Vec<Node>),

    #[error("expected a single exit node 'join', found {0:?}")]
    Exit(Vec<Node>),

    #[error("topology contains a cycle")]
    Cycle,

    #[error("join does not wait on {0}")]
    JoinMissing(Node),
}

#[derive(Debug, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    edges: Vec<(Node, Node)>,
}

impl Topology {
    /// prepare → each branch → join.
    pub fn fan_out(branches: &[SectionName]) -> Self {
        let mut nodes = vec![Node::Prepare];
        let mut edges = Vec::with_capacity(branches.len() * 2);
        for &section in branches {
            let branch = Node::Branch(section);
            nodes.push(branch);
            edges.push((Node::Prepare, branch));
            edges.push((branch, Node::Join));
        }
        nodes.push(Node::Join);
        Self { nodes, edges }
    }

    pub fn branches(&self) -> Vec<SectionName> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Branch(section) => Some(*section),
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    fn with_edge(mut self, from: Node, to: Node) -> Self {
        self.edges.push((from, to));
        self
    }

    #[cfg(test)]
    fn without_edge(mut self, from: Node, to: Node) -> Self {
        self.edges.retain(|e| *e != (from, to));
        self
    }

    pub fn validate(&self) -> Result<(), TopologyError> {
        let branches = self.branches();
        if branches.is_empty() {
            return Err(TopologyError::NoBranches);
        }

        let known: BTreeSet<Node> = self.nodes.iter().copied().collect();
        for (from, to) in &self.edges {
            for node in [from, to] {
                if !known.contains(node) {
                    return Err(TopologyError::UnknownNode(*node));
                }
            }
        }

        let mut indegree: BTreeMap<Node, usize> = known.iter().map(|n| (*n, 0)).collect();
        let mut outdegree = indegree.clone();
        for (from, to) in &self.edges {
            *outdegree.entry(*from).or_default() += 1;
            *indegree.entry(*to).or_default() += 1;
        }

        let entries: Vec<Node> = indegree.iter().filter(|(_, d)| **d == 0).map(|(n, _)| *n).collect();
        if entries != [Node::Prepare] {
            return Err(TopologyError::Entry(entries));
        }
        let exits: Vec<Node> = outdegree.iter().filter(|(_, d)| **d == 0).map(|(n, _)| *n).collect();
        if exits != [Node::Join] {
            return Err(TopologyError::Exit(exits));
        }

        // Kahn's algorithm: every node must be released.
        let mut remaining = indegree;
        let mut ready: Vec<Node> = vec![Node::Prepare];
        let mut released = 0;
        while let Some(node) = ready.pop() {
            released += 1;
            for (_, to) in self.edges.iter().filter(|(from, _)| *from == node) {
                if let Some(d) = remaining.get_mut(to) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(*to);
                    }
                }
            }
        }
        if released != known.len() {
            return Err(TopologyError::Cycle);
        }

        for section in branches {
            let branch = Node::Branch(section);
            if !self.edges.contains(&(branch, Node::Join)) {
                return Err(TopologyError::JoinMissing(branch));
            }
        }

        Ok(())
    }
}
