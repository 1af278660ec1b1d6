// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;

use super::edge::Edge;
use super::element::ElementRef;
use super::ids::{EdgeId, NodeId, TextId};
use super::node::Node;
use super::text::TextLabel;
use crate::decision;

/// The aggregate owning every node, edge and text of one diagram.
///
/// Collections keep insertion order, which doubles as paint and hit-test order. Mutation goes
/// through [`crate::ops::apply_ops`]; the crate-private mutators below do not re-check the graph
/// invariants on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    timestamp: u64,
    is_private: bool,
    password_hash: Option<String>,
    node_counter: u64,
    rev: u64,
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    texts: IndexMap<TextId, TextLabel>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: 0,
            is_private: false,
            password_hash: None,
            node_counter: 1,
            rev: 0,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            texts: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Milliseconds since the Unix epoch of the last save.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    /// The next id candidate. Shared by every element kind.
    pub fn node_counter(&self) -> u64 {
        self.node_counter
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn texts(&self) -> impl ExactSizeIterator<Item = &TextLabel> + '_ {
        self.texts.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn text(&self, id: TextId) -> Option<&TextLabel> {
        self.texts.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Node(id) => self.nodes.contains_key(&id),
            ElementRef::Edge(id) => self.edges.contains_key(&id),
            ElementRef::Text(id) => self.texts.contains_key(&id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.texts.is_empty()
    }

    /// The edge for the ordered pair `(from, to)`, if one exists.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edges
            .values()
            .find(|edge| edge.from() == from && edge.to() == to)
    }

    pub fn edges_touching(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().filter(move |edge| edge.touches(node_id))
    }

    pub fn outgoing(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges
            .values()
            .filter(move |edge| edge.from() == node_id)
    }

    /// Resolves both endpoints of `edge` to the project's canonical nodes.
    pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
        Some((self.nodes.get(&edge.from())?, self.nodes.get(&edge.to())?))
    }

    /// Every way the graph currently breaks its structural invariants. Empty for any state
    /// reachable through the op surface.
    pub fn integrity_violations(&self) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();

        let mut pairs = std::collections::HashSet::new();
        for edge in self.edges.values() {
            for node_id in [edge.from(), edge.to()] {
                if !self.nodes.contains_key(&node_id) {
                    violations.push(IntegrityViolation::DanglingEndpoint {
                        edge_id: edge.id(),
                        node_id,
                    });
                }
            }
            if !pairs.insert((edge.from(), edge.to())) {
                violations.push(IntegrityViolation::DuplicatePair {
                    edge_id: edge.id(),
                    from: edge.from(),
                    to: edge.to(),
                });
            }
            if edge.is_robot_arm() && !edge.break_points().is_empty() {
                violations.push(IntegrityViolation::RobotArmBreakPoints { edge_id: edge.id() });
            }
        }

        for node in self.nodes.values() {
            let Some(rotation) = node.rotation() else {
                continue;
            };
            let arms = decision::branch_edges(self, node.id());
            let well_formed = arms.len() == 2
                && arms.iter().all(|(branch, edge)| {
                    edge.from_corner() == Some(decision::corner_for(rotation, *branch))
                })
                && arms[0].0 != arms[1].0;
            if !well_formed {
                violations.push(IntegrityViolation::MalformedDecision { node_id: node.id() });
            }
        }

        violations
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub(crate) fn set_privacy(&mut self, is_private: bool, password_hash: Option<String>) {
        self.is_private = is_private;
        self.password_hash = password_hash;
    }

    pub(crate) fn set_node_counter(&mut self, node_counter: u64) {
        self.node_counter = node_counter;
    }

    pub(crate) fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub(crate) fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// Hands out the next free id, skipping values a loaded document already uses.
    pub(crate) fn allocate_id(&mut self) -> u64 {
        loop {
            let candidate = self.node_counter;
            self.node_counter = self.node_counter.saturating_add(1);
            if !self.raw_id_in_use(candidate) {
                return candidate;
            }
        }
    }

    fn raw_id_in_use(&self, raw: u64) -> bool {
        self.nodes.contains_key(&NodeId::new(raw))
            || self.edges.contains_key(&EdgeId::new(raw))
            || self.texts.contains_key(&TextId::new(raw))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    pub(crate) fn text_mut(&mut self, id: TextId) -> Option<&mut TextLabel> {
        self.texts.get_mut(&id)
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> + '_ {
        self.edges.values_mut()
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id(), node);
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.id(), edge);
    }

    pub(crate) fn insert_text(&mut self, text: TextLabel) {
        self.texts.insert(text.id(), text);
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.shift_remove(&id)
    }

    pub(crate) fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.edges.shift_remove(&id)
    }

    pub(crate) fn remove_text(&mut self, id: TextId) -> Option<TextLabel> {
        self.texts.shift_remove(&id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityViolation {
    DanglingEndpoint { edge_id: EdgeId, node_id: NodeId },
    DuplicatePair { edge_id: EdgeId, from: NodeId, to: NodeId },
    RobotArmBreakPoints { edge_id: EdgeId },
    MalformedDecision { node_id: NodeId },
}
