// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Connector geometry for every edge kind.
//!
//! Generic edges run center-to-boundary (or boundary-to-boundary for dual arrows), optionally
//! through user break points. Decision branch edges ("robot arms") leave from a fixed corner of
//! the decision node and follow an orthogonal path with a fixed arm length.

pub mod break_points;

use std::f64::consts::PI;

use smallvec::{smallvec, SmallVec};

use crate::geometry::{boundary_point, shape::boundary_point_toward, Point};
use crate::model::{Branch, Corner, Edge, EdgeId, Node, NodeId, Project, RoutingStyle};

pub const ROBOT_ARM_LENGTH: f64 = 60.0;
pub const ARROW_LENGTH: f64 = 18.0;
pub const ARROW_HALF_ANGLE: f64 = PI / 6.0;

const POINT_EPSILON: f64 = 1e-9;

/// Path vertices; robot arms need four, most generic edges two.
pub type PathPoints = SmallVec<[Point; 4]>;

/// A filled triangle whose tip touches a node boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

impl ArrowHead {
    /// Arrowhead for travel along `angle` ending at `tip`.
    pub fn pointing(tip: Point, angle: f64) -> Self {
        Self {
            tip,
            left: tip.project(angle - ARROW_HALF_ANGLE, -ARROW_LENGTH),
            right: tip.project(angle + ARROW_HALF_ANGLE, -ARROW_LENGTH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowSpec {
    None,
    End(ArrowHead),
    Both { start: ArrowHead, end: ArrowHead },
}

impl ArrowSpec {
    pub fn heads(&self) -> SmallVec<[ArrowHead; 2]> {
        match *self {
            Self::None => SmallVec::new(),
            Self::End(end) => smallvec![end],
            Self::Both { start, end } => smallvec![start, end],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Straight,
    Polyline,
    RobotArm,
}

/// Everything a renderer needs to paint one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub edge_id: EdgeId,
    pub kind: PathKind,
    pub points: PathPoints,
    pub arrows: ArrowSpec,
    /// Robot arms carry their outcome in the branch node, not on the path.
    pub show_label: bool,
}

impl EdgePath {
    pub fn start(&self) -> Point {
        self.points.first().copied().unwrap_or_default()
    }

    pub fn end(&self) -> Point {
        self.points.last().copied().unwrap_or_default()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance_to(b)).sum()
    }

    /// The point halfway along the path, where edge labels are anchored.
    pub fn label_anchor(&self) -> Point {
        let mut remaining = self.length() / 2.0;
        for (a, b) in self.segments() {
            let len = a.distance_to(b);
            if len >= remaining && len > POINT_EPSILON {
                let t = remaining / len;
                return Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
            }
            remaining -= len;
        }
        self.start()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("edge {edge_id} not found")]
    UnknownEdge { edge_id: EdgeId },
    #[error("edge {edge_id} references missing node {node_id}")]
    MissingEndpoint { edge_id: EdgeId, node_id: NodeId },
}

/// Computes the path of one edge of `project`.
pub fn compute_path(project: &Project, edge_id: EdgeId) -> Result<EdgePath, RouteError> {
    let edge = project
        .edge(edge_id)
        .ok_or(RouteError::UnknownEdge { edge_id })?;
    let from = project.node(edge.from()).ok_or(RouteError::MissingEndpoint {
        edge_id,
        node_id: edge.from(),
    })?;
    let to = project.node(edge.to()).ok_or(RouteError::MissingEndpoint {
        edge_id,
        node_id: edge.to(),
    })?;
    Ok(route_edge(edge, from, to))
}

/// Paths for every edge in paint order.
pub fn compute_all_paths(project: &Project) -> Vec<EdgePath> {
    project
        .edges()
        .filter_map(|edge| {
            let (from, to) = project.endpoints(edge)?;
            Some(route_edge(edge, from, to))
        })
        .collect()
}

pub fn route_edge(edge: &Edge, from: &Node, to: &Node) -> EdgePath {
    match edge.from_corner() {
        Some(corner) => route_robot_arm(edge, from, to, corner),
        None => route_generic(edge, from, to),
    }
}

fn route_generic(edge: &Edge, from: &Node, to: &Node) -> EdgePath {
    let style = edge.style();
    let break_points = edge.break_points();

    // Both ends sit on the center-to-center line even when break points bend the path.
    let center_angle = from.center().angle_to(to.center());
    let start = match style {
        RoutingStyle::DualArrow => boundary_point(from, center_angle),
        RoutingStyle::SingleArrow | RoutingStyle::Line => from.center(),
    };
    let end = boundary_point(to, center_angle + PI);

    let mut points = PathPoints::with_capacity(break_points.len() + 2);
    points.push(start);
    points.extend(break_points.iter().copied());
    points.push(end);

    let arrows = match style {
        RoutingStyle::Line => ArrowSpec::None,
        RoutingStyle::SingleArrow => ArrowSpec::End(ArrowHead::pointing(end, center_angle)),
        RoutingStyle::DualArrow => ArrowSpec::Both {
            start: ArrowHead::pointing(start, center_angle + PI),
            end: ArrowHead::pointing(end, center_angle),
        },
    };

    EdgePath {
        edge_id: edge.id(),
        kind: if break_points.is_empty() {
            PathKind::Straight
        } else {
            PathKind::Polyline
        },
        points,
        arrows,
        show_label: true,
    }
}

fn corner_anchor(node: &Node, corner: Corner) -> Option<Point> {
    let c = node.center();
    let r = node.radius();
    match corner {
        Corner::Top => Some(c.offset(0.0, -r)),
        Corner::Bottom => Some(c.offset(0.0, r)),
        Corner::Left => Some(c.offset(-r, 0.0)),
        Corner::Right => Some(c.offset(r, 0.0)),
        Corner::Unrecognized => None,
    }
}

/// Where a path ending at `bend` meets the target. A bend sitting on the target center falls
/// back to the side facing `from_direction`.
fn arrival_point(to: &Node, bend: Point, fallback_angle: f64) -> Point {
    if bend.distance_to(to.center()) <= POINT_EPSILON {
        boundary_point(to, fallback_angle)
    } else {
        boundary_point_toward(to, bend)
    }
}

fn route_robot_arm(edge: &Edge, from: &Node, to: &Node, corner: Corner) -> EdgePath {
    let Some(start) = corner_anchor(from, corner) else {
        let start = from.center();
        return EdgePath {
            edge_id: edge.id(),
            kind: PathKind::RobotArm,
            points: smallvec![start, boundary_point_toward(to, start)],
            arrows: ArrowSpec::None,
            show_label: false,
        };
    };

    let horizontal = matches!(corner, Corner::Left | Corner::Right);
    let sign = if matches!(corner, Corner::Left | Corner::Top) {
        -1.0
    } else {
        1.0
    };

    let paired = matches!(
        (edge.branch(), corner),
        (Some(Branch::True), Corner::Left | Corner::Top)
            | (Some(Branch::False), Corner::Right | Corner::Bottom)
    );

    let mut points: PathPoints = smallvec![start];
    if paired {
        // With the default branch offsets the bend lands inside the branch node, so the last
        // leg runs from inside the node out to its rim.
        let (arm, bend) = if horizontal {
            let arm = start.offset(sign * ROBOT_ARM_LENGTH, 0.0);
            (arm, Point::new(arm.x, to.y()))
        } else {
            let arm = start.offset(0.0, sign * ROBOT_ARM_LENGTH);
            (arm, Point::new(to.x(), arm.y))
        };
        let fallback = if horizontal { PI / 2.0 } else { 0.0 };
        push_distinct(&mut points, arm);
        push_distinct(&mut points, bend);
        push_distinct(&mut points, arrival_point(to, bend, fallback));
    } else {
        let bend = if horizontal {
            Point::new(to.x(), start.y)
        } else {
            Point::new(start.x, to.y())
        };
        let fallback = if horizontal { 0.0 } else { PI / 2.0 };
        push_distinct(&mut points, bend);
        push_distinct(&mut points, arrival_point(to, bend, fallback));
    }

    EdgePath {
        edge_id: edge.id(),
        kind: PathKind::RobotArm,
        points,
        arrows: ArrowSpec::None,
        show_label: false,
    }
}

fn push_distinct(points: &mut PathPoints, point: Point) {
    if points
        .last()
        .map_or(true, |last| last.distance_to(point) > POINT_EPSILON)
    {
        points.push(point);
    }
}
