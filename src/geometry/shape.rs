// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shape-aware containment and boundary math, dispatched on [`NodeShape`].
//!
//! - process and data-model nodes are circles of radius `r`
//! - start and stop nodes are ellipses with semi-axes `1.5r` and `0.8r`
//! - decision nodes are diamonds (the L1 ball of radius `r`)

use super::{Point, Rect};
use crate::model::{Node, NodeShape};

pub const ELLIPSE_X_FACTOR: f64 = 1.5;
pub const ELLIPSE_Y_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outline {
    Circle,
    Ellipse,
    Diamond,
}

fn outline(shape: &NodeShape) -> Outline {
    match shape {
        NodeShape::Process | NodeShape::DataModel { .. } => Outline::Circle,
        NodeShape::Start | NodeShape::Stop => Outline::Ellipse,
        NodeShape::Decision { .. } => Outline::Diamond,
    }
}

/// Whether `point` lies inside the node's outline.
///
/// Circles exclude their boundary; ellipses and diamonds include it.
pub fn contains(node: &Node, point: Point) -> bool {
    let r = node.radius();
    if r <= 0.0 {
        return false;
    }
    let dx = point.x - node.x();
    let dy = point.y - node.y();

    match outline(node.shape()) {
        Outline::Circle => dx.hypot(dy) < r,
        Outline::Ellipse => {
            let nx = dx / (ELLIPSE_X_FACTOR * r);
            let ny = dy / (ELLIPSE_Y_FACTOR * r);
            nx * nx + ny * ny <= 1.0
        }
        Outline::Diamond => dx.abs() / r + dy.abs() / r <= 1.0,
    }
}

/// The point where a ray leaving the node center at `angle` (radians) crosses the outline.
///
/// Diamonds reuse the circle formula, which lands on the circumscribed circle rather than on
/// the rhombus edge away from the four tips.
pub fn boundary_point(node: &Node, angle: f64) -> Point {
    let center = node.center();
    let r = node.radius();
    if r <= 0.0 {
        return center;
    }

    match outline(node.shape()) {
        Outline::Circle | Outline::Diamond => center.project(angle, r),
        Outline::Ellipse => {
            let a = ELLIPSE_X_FACTOR * r;
            let b = ELLIPSE_Y_FACTOR * r;
            let distance = (a * b) / ((b * angle.cos()).powi(2) + (a * angle.sin()).powi(2)).sqrt();
            center.project(angle, distance)
        }
    }
}

/// Boundary point on the ray from the node center toward `target`.
pub fn boundary_point_toward(node: &Node, target: Point) -> Point {
    boundary_point(node, node.center().angle_to(target))
}

/// Axis-aligned box enclosing the node's outline.
pub fn bounding_rect(node: &Node) -> Rect {
    let r = node.radius().max(0.0);
    match outline(node.shape()) {
        Outline::Circle | Outline::Diamond => Rect::from_center(node.center(), r, r),
        Outline::Ellipse => Rect::from_center(
            node.center(),
            ELLIPSE_X_FACTOR * r,
            ELLIPSE_Y_FACTOR * r,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use rstest::rstest;

    use super::{boundary_point, boundary_point_toward, bounding_rect, contains};
    use crate::geometry::Point;
    use crate::model::{Node, NodeId, NodeShape, ShapeKind};

    fn node_at_origin(kind: ShapeKind, radius: f64) -> Node {
        Node::new_with(
            NodeId::new(1),
            NodeShape::for_kind(kind),
            Point::default(),
            radius,
            "n",
            "#fff",
        )
    }

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn circle_boundary_is_exclusive() {
        let node = node_at_origin(ShapeKind::Process, 40.0);
        assert!(!contains(&node, Point::new(40.0, 0.0)));
        assert!(contains(&node, Point::new(40.0 - 0.001, 0.0)));
    }

    #[test]
    fn diamond_uses_l1_distance() {
        let node = node_at_origin(ShapeKind::Decision, 40.0);
        assert!(!contains(&node, Point::new(41.0, 0.0)));
        assert!(contains(&node, Point::new(39.0, 0.0)));
        assert!(contains(&node, Point::new(20.0, 20.0)));
        assert!(!contains(&node, Point::new(25.0, 25.0)));
    }

    #[rstest]
    #[case::inside_wide(Point::new(59.0, 0.0), true)]
    #[case::edge_of_major_axis(Point::new(60.0, 0.0), true)]
    #[case::past_major_axis(Point::new(61.0, 0.0), false)]
    #[case::inside_short(Point::new(0.0, 31.0), true)]
    #[case::past_minor_axis(Point::new(0.0, 33.0), false)]
    fn ellipse_containment(#[case] point: Point, #[case] expected: bool) {
        for kind in [ShapeKind::Start, ShapeKind::Stop] {
            assert_eq!(contains(&node_at_origin(kind, 40.0), point), expected);
        }
    }

    #[rstest]
    #[case::right(0.0, Point::new(60.0, 0.0))]
    #[case::down(FRAC_PI_2, Point::new(0.0, 32.0))]
    #[case::left(PI, Point::new(-60.0, 0.0))]
    fn ellipse_boundary_hits_semi_axes(#[case] angle: f64, #[case] expected: Point) {
        assert_close(boundary_point(&node_at_origin(ShapeKind::Start, 40.0), angle), expected);
    }

    #[test]
    fn ellipse_boundary_point_satisfies_ellipse_equation() {
        let node = node_at_origin(ShapeKind::Stop, 40.0);
        let p = boundary_point(&node, FRAC_PI_4);
        let value = (p.x / 60.0).powi(2) + (p.y / 32.0).powi(2);
        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn diamond_boundary_keeps_circular_approximation() {
        let node = node_at_origin(ShapeKind::Decision, 40.0);
        let p = boundary_point(&node, FRAC_PI_4);
        assert!((p.distance_to(Point::default()) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn boundary_toward_target_faces_the_target() {
        let node = node_at_origin(ShapeKind::Process, 10.0);
        assert_close(
            boundary_point_toward(&node, Point::new(0.0, -100.0)),
            Point::new(0.0, -10.0),
        );
    }

    #[test]
    fn bounding_rect_matches_outline_extent() {
        let ellipse = bounding_rect(&node_at_origin(ShapeKind::Start, 40.0));
        assert_eq!((ellipse.width(), ellipse.height()), (120.0, 64.0));
        let circle = bounding_rect(&node_at_origin(ShapeKind::DataModel, 40.0));
        assert_eq!((circle.width(), circle.height()), (80.0, 80.0));
    }
}
