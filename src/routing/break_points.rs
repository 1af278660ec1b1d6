// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Break-point bookkeeping for generic edges.

use indexmap::IndexMap;

use super::EdgePath;
use crate::geometry::{distance_to_segment, Point};
use crate::model::{EdgeId, NodeId, Project};

/// Node displacements collected while applying one op.
pub type NodeDisplacements = IndexMap<NodeId, (f64, f64)>;

/// Index in the edge's break-point list at which `point` should be inserted so that it splits
/// the path segment closest to it.
pub fn insertion_index(path: &EdgePath, point: Point) -> usize {
    path.segments()
        .enumerate()
        .map(|(index, (a, b))| (index, distance_to_segment(point, a, b)))
        .min_by(|(_, left), (_, right)| left.total_cmp(right))
        .map_or(0, |(index, _)| index)
}

/// Shifts break points of every generic edge touching a displaced node by that node's delta.
///
/// Each edge moves at most once; the `from` node's delta wins when both endpoints moved.
pub(crate) fn follow_node_moves(project: &mut Project, moved: &NodeDisplacements) -> Vec<EdgeId> {
    let mut touched = Vec::new();
    if moved.is_empty() {
        return touched;
    }

    for edge in project.edges_mut() {
        if edge.is_robot_arm() || edge.break_points().is_empty() {
            continue;
        }
        let Some(&(dx, dy)) = moved.get(&edge.from()).or_else(|| moved.get(&edge.to())) else {
            continue;
        };
        if dx == 0.0 && dy == 0.0 {
            continue;
        }
        for point in edge.break_points_mut() {
            *point = point.offset(dx, dy);
        }
        touched.push(edge.id());
    }
    touched
}
