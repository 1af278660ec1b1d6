// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Decision-node orientation and the rigid placement of its two branches.
//!
//! A decision node owns two robot-arm edges (labelled `TRUE`/`FALSE`) and the branch nodes they
//! point at. Branch placement is a fixed offset from the decision center that depends only on
//! the node's rotation:
//!
//! | rotation   | TRUE offset  | FALSE offset | corners        |
//! |------------|--------------|--------------|----------------|
//! | horizontal | (-120, -60)  | (+120, +60)  | left / right   |
//! | vertical   | (0, -120)    | (0, +120)    | top / bottom   |

use crate::geometry::Point;
use crate::model::{
    Branch, Corner, Edge, EdgeId, ElementRef, Node, NodeId, NodeShape, Project, Rotation,
    ShapeKind, DEFAULT_NODE_RADIUS,
};

pub const HORIZONTAL_BRANCH_DX: f64 = 120.0;
pub const HORIZONTAL_BRANCH_DY: f64 = 60.0;
pub const VERTICAL_BRANCH_DY: f64 = 120.0;

pub fn branch_offset(rotation: Rotation, branch: Branch) -> (f64, f64) {
    match (rotation, branch) {
        (Rotation::Horizontal, Branch::True) => (-HORIZONTAL_BRANCH_DX, -HORIZONTAL_BRANCH_DY),
        (Rotation::Horizontal, Branch::False) => (HORIZONTAL_BRANCH_DX, HORIZONTAL_BRANCH_DY),
        (Rotation::Vertical, Branch::True) => (0.0, -VERTICAL_BRANCH_DY),
        (Rotation::Vertical, Branch::False) => (0.0, VERTICAL_BRANCH_DY),
    }
}

pub fn corner_for(rotation: Rotation, branch: Branch) -> Corner {
    match (rotation, branch) {
        (Rotation::Horizontal, Branch::True) => Corner::Left,
        (Rotation::Horizontal, Branch::False) => Corner::Right,
        (Rotation::Vertical, Branch::True) => Corner::Top,
        (Rotation::Vertical, Branch::False) => Corner::Bottom,
    }
}

pub fn branch_position(center: Point, rotation: Rotation, branch: Branch) -> Point {
    let (dx, dy) = branch_offset(rotation, branch);
    center.offset(dx, dy)
}

/// The decision's branch edges: its first two outgoing robot-arm edges that name an outcome.
pub fn branch_edges(project: &Project, decision_id: NodeId) -> Vec<(Branch, &Edge)> {
    project
        .outgoing(decision_id)
        .filter_map(|edge| edge.branch().map(|branch| (branch, edge)))
        .take(2)
        .collect()
}

/// The decision node owning `node_id` as a branch, if any.
pub fn owning_decision(project: &Project, node_id: NodeId) -> Option<NodeId> {
    project
        .edges()
        .filter(|edge| edge.to() == node_id && edge.is_robot_arm())
        .map(Edge::from)
        .find(|from| {
            project.node(*from).is_some_and(|node| node.is_decision())
                && branch_edges(project, *from)
                    .iter()
                    .any(|(_, edge)| edge.to() == node_id)
        })
}

/// Creates the TRUE and FALSE branch nodes of a freshly inserted decision node together with
/// their robot-arm edges. Returns the created elements in allocation order.
pub(crate) fn attach_branches(project: &mut Project, decision_id: NodeId) -> Vec<ElementRef> {
    let Some((center, rotation)) = project
        .node(decision_id)
        .and_then(|node| node.rotation().map(|rotation| (node.center(), rotation)))
    else {
        return Vec::new();
    };

    let mut created = Vec::with_capacity(4);
    for branch in Branch::ALL {
        let node_id = NodeId::new(project.allocate_id());
        let kind = ShapeKind::Process;
        project.insert_node(Node::new_with(
            node_id,
            NodeShape::for_kind(kind),
            branch_position(center, rotation, branch),
            DEFAULT_NODE_RADIUS,
            branch.label(),
            kind.default_color(),
        ));
        let edge_id = EdgeId::new(project.allocate_id());
        project.insert_edge(Edge::new_branch(
            edge_id,
            decision_id,
            node_id,
            branch,
            corner_for(rotation, branch),
        ));
        created.push(ElementRef::Node(node_id));
        created.push(ElementRef::Edge(edge_id));
    }
    created
}

/// A branch node that moved while re-snapping, with its center before and after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchMove {
    pub node_id: NodeId,
    pub before: Point,
    pub after: Point,
}

/// Toggles the decision's orientation, re-snaps both branch nodes and re-assigns both branch
/// corners. Returns the new rotation, or `None` when `decision_id` is not a decision node.
pub(crate) fn rotate(project: &mut Project, decision_id: NodeId) -> Option<(Rotation, Vec<BranchMove>)> {
    let rotation = project.node(decision_id)?.rotation()?.toggled();
    project.node_mut(decision_id)?.set_rotation(rotation);

    let arms = branch_edges(project, decision_id)
        .into_iter()
        .map(|(branch, edge)| (branch, edge.id()))
        .collect::<Vec<_>>();
    for (branch, edge_id) in arms {
        if let Some(edge) = project.edge_mut(edge_id) {
            edge.set_from_corner(Some(corner_for(rotation, branch)));
        }
    }

    Some((rotation, sync_on_move(project, decision_id)))
}

/// Re-applies the fixed branch offsets around the decision's current center.
///
/// Returns the branch nodes whose center actually changed.
pub(crate) fn sync_on_move(project: &mut Project, decision_id: NodeId) -> Vec<BranchMove> {
    let Some((center, rotation)) = project
        .node(decision_id)
        .and_then(|node| node.rotation().map(|rotation| (node.center(), rotation)))
    else {
        return Vec::new();
    };

    let targets = branch_edges(project, decision_id)
        .into_iter()
        .map(|(branch, edge)| (edge.to(), branch_position(center, rotation, branch)))
        .collect::<Vec<_>>();

    let mut moves = Vec::new();
    for (node_id, after) in targets {
        let Some(node) = project.node_mut(node_id) else {
            continue;
        };
        let before = node.center();
        if before != after {
            node.set_center(after);
            moves.push(BranchMove {
                node_id,
                before,
                after,
            });
        }
    }
    moves
}
