// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Planar geometry shared by shape math, routing and selection.

pub mod shape;

use serde::{Deserialize, Serialize};

pub use shape::{boundary_point, bounding_rect, contains};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the ray from `self` toward `other`, in radians.
    ///
    /// Coincident points yield `0.0`, which keeps degenerate edges routable.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// The point `distance` units away along `angle`.
    pub fn project(self, angle: f64, distance: f64) -> Self {
        Self {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
    }
}

/// Axis-aligned rectangle; constructors normalise corner order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn from_center(center: Point, half_width: f64, half_height: f64) -> Self {
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}

/// Shortest distance from `point` to the closed segment `a`–`b`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f64::EPSILON {
        return point.distance_to(a);
    }

    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Shortest distance from `point` to any segment of the polyline.
///
/// A single-point polyline degenerates to point distance; an empty one is infinitely far.
pub fn distance_to_polyline(point: Point, polyline: &[Point]) -> f64 {
    match polyline {
        [] => f64::INFINITY,
        [only] => point.distance_to(*only),
        _ => polyline
            .windows(2)
            .map(|segment| distance_to_segment(point, segment[0], segment[1]))
            .fold(f64::INFINITY, f64::min),
    }
}
