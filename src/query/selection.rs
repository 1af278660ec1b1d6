// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Point and rectangle hit-testing across every element kind.

use crate::geometry::{self, distance_to_polyline, Point, Rect};
use crate::model::{ElementRef, Project, TextLabel};
use crate::routing;

/// Maximum distance from an edge path that still counts as a click on the edge.
pub const EDGE_HIT_TOLERANCE: f64 = 10.0;
pub const TEXT_HIT_PAD_X: f64 = 8.0;
pub const TEXT_HIT_PAD_Y: f64 = 16.0;

/// Measures rendered text width. Hosts plug in their font metrics.
pub trait TextMeasure {
    fn text_width(&self, content: &str) -> f64;
}

/// Fixed advance per character; good enough when no font metrics are available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { char_width: 7.0 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, content: &str) -> f64 {
        content.chars().count() as f64 * self.char_width
    }
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn text_width(&self, content: &str) -> f64 {
        self(content)
    }
}

/// Padded hit box of a text label. The label's position is its left baseline-center anchor.
pub fn text_bounds(text: &TextLabel, measure: &dyn TextMeasure) -> Rect {
    let origin = text.position();
    let width = measure.text_width(text.content()).max(0.0);
    Rect {
        min_x: origin.x - TEXT_HIT_PAD_X,
        min_y: origin.y - TEXT_HIT_PAD_Y,
        max_x: origin.x + width + TEXT_HIT_PAD_X,
        max_y: origin.y + TEXT_HIT_PAD_Y,
    }
}

/// The single element under `point`.
///
/// Nodes win over texts, texts over edges. Within nodes and texts the first match in insertion
/// order wins; among edges within [`EDGE_HIT_TOLERANCE`] the closest one does.
pub fn hit_test(project: &Project, point: Point, measure: &dyn TextMeasure) -> Option<ElementRef> {
    if let Some(node) = project
        .nodes()
        .find(|node| geometry::contains(node, point))
    {
        return Some(ElementRef::Node(node.id()));
    }

    if let Some(text) = project
        .texts()
        .find(|text| text_bounds(text, measure).contains_point(point))
    {
        return Some(ElementRef::Text(text.id()));
    }

    routing::compute_all_paths(project)
        .iter()
        .map(|path| (path.edge_id, distance_to_polyline(point, &path.points)))
        .filter(|(_, distance)| *distance < EDGE_HIT_TOLERANCE)
        .min_by(|(_, left), (_, right)| left.total_cmp(right))
        .map(|(edge_id, _)| ElementRef::Edge(edge_id))
}

/// Every element fully enclosed by `rect`, nodes first, then texts, then edges.
///
/// An edge is enclosed when both of its endpoint node centers are.
pub fn hit_test_rect(project: &Project, rect: Rect, measure: &dyn TextMeasure) -> Vec<ElementRef> {
    let mut selected = project
        .nodes()
        .filter(|node| rect.contains_rect(&geometry::bounding_rect(node)))
        .map(|node| ElementRef::Node(node.id()))
        .collect::<Vec<_>>();

    selected.extend(
        project
            .texts()
            .filter(|text| rect.contains_rect(&text_bounds(text, measure)))
            .map(|text| ElementRef::Text(text.id())),
    );

    selected.extend(project.edges().filter_map(|edge| {
        let (from, to) = project.endpoints(edge)?;
        (rect.contains_point(from.center()) && rect.contains_point(to.center()))
            .then_some(ElementRef::Edge(edge.id()))
    }));

    selected
}
