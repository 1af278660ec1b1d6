// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Mutation operations for projects.
//!
//! Operations are applied with optimistic concurrency (revision checks) against a staged copy of
//! the project and produce a minimal delta that collaborators use to refresh derived state.

use std::collections::HashSet;

use crate::decision;
use crate::geometry::Point;
use crate::model::{
    DataField, Edge, EdgeId, ElementKind, ElementRef, Node, NodeId, Project, RoutingStyle,
    ShapeKind, TextId, TextLabel,
};
use crate::routing::break_points::{self, NodeDisplacements};
use crate::routing::compute_path;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Creates a node. Decision nodes also get their two branch nodes and robot-arm edges.
    CreateNode {
        kind: ShapeKind,
        at: Point,
    },
    CreateEdge {
        from: NodeId,
        to: NodeId,
        style: RoutingStyle,
    },
    CreateText {
        at: Point,
        content: String,
    },
    DeleteElement {
        element: ElementRef,
    },
    MoveNode {
        node_id: NodeId,
        dx: f64,
        dy: f64,
    },
    /// Moves every selected node and text. Edges follow their endpoints.
    GroupTranslate {
        elements: Vec<ElementRef>,
        dx: f64,
        dy: f64,
    },
    RenameElement {
        element: ElementRef,
        text: String,
    },
    Recolor {
        element: ElementRef,
        color: String,
    },
    SetDataFields {
        node_id: NodeId,
        fields: Vec<DataField>,
    },
    RotateDecision {
        node_id: NodeId,
    },
    ToggleEdgeStyle {
        edge_id: EdgeId,
    },
    /// Inserts a break point where it splits the nearest path segment.
    AddBreakPoint {
        edge_id: EdgeId,
        point: Point,
    },
    RemoveBreakPoint {
        edge_id: EdgeId,
        index: usize,
    },
    ClearBreakPoints {
        edge_id: EdgeId,
    },
    RenameProject {
        name: String,
    },
    SetPrivacy {
        is_private: bool,
        password_hash: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which elements changed as the result of applying ops.
///
/// Moves of branch nodes caused by a decision re-snap are reported as updates of those nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ElementRef>,
    pub removed: Vec<ElementRef>,
    pub updated: Vec<ElementRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// First node created by the batch, e.g. the decision node of a compound create.
    pub fn first_added_node(&self) -> Option<NodeId> {
        self.added.iter().find_map(|element| match element {
            ElementRef::Node(id) => Some(*id),
            _ => None,
        })
    }

    pub fn first_added_edge(&self) -> Option<EdgeId> {
        self.added.iter().find_map(|element| match element {
            ElementRef::Edge(id) => Some(*id),
            _ => None,
        })
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<ElementRef>,
    removed: HashSet<ElementRef>,
    updated: HashSet<ElementRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, element: ElementRef) {
        self.removed.remove(&element);
        self.updated.remove(&element);
        self.added.insert(element);
    }

    fn record_removed(&mut self, element: ElementRef) {
        // Created and deleted inside one batch: nothing to report.
        if self.added.remove(&element) {
            self.updated.remove(&element);
            return;
        }
        self.updated.remove(&element);
        self.removed.insert(element);
    }

    fn record_updated(&mut self, element: ElementRef) {
        if self.added.contains(&element) || self.removed.contains(&element) {
            return;
        }
        self.updated.insert(element);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

pub fn apply_ops(project: &mut Project, base_rev: u64, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
    let current_rev = project.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: Delta::default() });
    }

    let mut staged = project.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        if let Err(err) = apply_op(&mut staged, op, &mut delta) {
            match &err {
                ApplyError::RobotArmMutationRejected { .. } => {
                    tracing::warn!(error = %err, "rejected op batch");
                }
                _ => tracing::debug!(error = %err, "rejected op batch"),
            }
            return Err(err);
        }
    }

    staged.bump_rev();
    *project = staged;
    let new_rev = project.rev();
    let delta = delta.finish();
    tracing::debug!(
        new_rev,
        applied = ops.len(),
        added = delta.added.len(),
        removed = delta.removed.len(),
        updated = delta.updated.len(),
        "applied ops"
    );

    Ok(ApplyResult { new_rev, applied: ops.len(), delta })
}

/// What was attempted on a robot-arm edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotArmAction {
    Delete,
    DeleteBranchNode,
    Restyle,
    Rename,
    EditBreakPoints,
}

impl std::fmt::Display for RobotArmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Delete => "delete",
            Self::DeleteBranchNode => "delete branch node of",
            Self::Restyle => "restyle",
            Self::Rename => "rename",
            Self::EditBreakPoints => "edit break points of",
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplyError {
    #[error("stale base_rev (base_rev={base_rev}, current_rev={current_rev})")]
    Conflict { base_rev: u64, current_rev: u64 },
    #[error("edge from {from} to {to} already exists")]
    DuplicateEdge { from: NodeId, to: NodeId },
    #[error("cannot {action} decision branch edge {edge_id}")]
    RobotArmMutationRejected { edge_id: EdgeId, action: RobotArmAction },
    #[error("{kind} {id} not found")]
    NotFound { kind: ElementKind, id: u64 },
    #[error("node {node_id} not found")]
    MissingNode { node_id: NodeId },
    #[error("decision node {node_id} only connects through its TRUE/FALSE branches")]
    DecisionOutgoingRejected { node_id: NodeId },
    #[error("{element} cannot be recolored")]
    NotRecolorable { element: ElementRef },
    #[error("break point {index} out of range for edge {edge_id} (len={len})")]
    BreakPointIndexOutOfRange { edge_id: EdgeId, index: usize, len: usize },
    #[error("node {node_id} is not a decision node")]
    NotDecisionNode { node_id: NodeId },
    #[error("node {node_id} is not a data-model node")]
    NotDataModelNode { node_id: NodeId },
    #[error("coordinates must be finite (x={x}, y={y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
}

impl ApplyError {
    fn not_found(element: ElementRef) -> Self {
        Self::NotFound { kind: element.kind(), id: element.raw_id() }
    }
}

// Per-op application, kept apart from the batch plumbing above.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
