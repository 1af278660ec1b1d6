// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, NodeId};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoutingStyle {
    #[default]
    SingleArrow,
    DualArrow,
    Line,
}

impl RoutingStyle {
    /// Next style in the toggle cycle `singleArrow -> dualArrow -> line -> singleArrow`.
    pub fn cycled(self) -> Self {
        match self {
            Self::SingleArrow => Self::DualArrow,
            Self::DualArrow => Self::Line,
            Self::Line => Self::SingleArrow,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleArrow => "singleArrow",
            Self::DualArrow => "dualArrow",
            Self::Line => "line",
        }
    }
}

/// The side of a decision node a branch edge leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Top,
    Bottom,
    Left,
    Right,
    /// A corner name this version does not know; routed as a straight line.
    #[serde(other)]
    Unrecognized,
}

/// Which outcome of a decision a branch edge carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    True,
    False,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::True, Branch::False];

    pub fn label(self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            l if l.eq_ignore_ascii_case("true") => Some(Self::True),
            l if l.eq_ignore_ascii_case("false") => Some(Self::False),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    label: String,
    style: RoutingStyle,
    break_points: Vec<Point>,
    from_corner: Option<Corner>,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, style: RoutingStyle) -> Self {
        Self {
            id,
            from,
            to,
            label: String::new(),
            style,
            break_points: Vec::new(),
            from_corner: None,
        }
    }

    /// A decision branch ("robot arm") edge. Its style and break points are fixed.
    pub fn new_branch(id: EdgeId, from: NodeId, to: NodeId, branch: Branch, corner: Corner) -> Self {
        Self {
            id,
            from,
            to,
            label: branch.label().to_owned(),
            style: RoutingStyle::Line,
            break_points: Vec::new(),
            from_corner: Some(corner),
        }
    }

    pub fn new_with(
        id: EdgeId,
        from: NodeId,
        to: NodeId,
        label: impl Into<String>,
        style: RoutingStyle,
        break_points: Vec<Point>,
        from_corner: Option<Corner>,
    ) -> Self {
        Self {
            id,
            from,
            to,
            label: label.into(),
            style,
            break_points,
            from_corner,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> RoutingStyle {
        self.style
    }

    pub fn break_points(&self) -> &[Point] {
        &self.break_points
    }

    pub fn from_corner(&self) -> Option<Corner> {
        self.from_corner
    }

    pub fn is_robot_arm(&self) -> bool {
        self.from_corner.is_some()
    }

    /// The branch outcome, for robot-arm edges whose label names one.
    pub fn branch(&self) -> Option<Branch> {
        if !self.is_robot_arm() {
            return None;
        }
        Branch::from_label(&self.label)
    }

    pub fn touches(&self, node_id: NodeId) -> bool {
        self.from == node_id || self.to == node_id
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub(crate) fn set_style(&mut self, style: RoutingStyle) {
        self.style = style;
    }

    pub(crate) fn set_from_corner(&mut self, corner: Option<Corner>) {
        self.from_corner = corner;
    }

    pub(crate) fn break_points_mut(&mut self) -> &mut Vec<Point> {
        &mut self.break_points
    }
}

#[cfg(test)]
mod tests {
    use super::{Branch, Corner, Edge, RoutingStyle};
    use crate::model::{EdgeId, NodeId};

    #[test]
    fn style_cycle_visits_every_style() {
        let mut style = RoutingStyle::SingleArrow;
        let mut seen = Vec::new();
        for _ in 0..3 {
            style = style.cycled();
            seen.push(style);
        }
        assert_eq!(
            seen,
            vec![RoutingStyle::DualArrow, RoutingStyle::Line, RoutingStyle::SingleArrow]
        );
    }

    #[test]
    fn branch_edges_report_their_outcome() {
        let edge = Edge::new_branch(
            EdgeId::new(3),
            NodeId::new(1),
            NodeId::new(2),
            Branch::False,
            Corner::Right,
        );
        assert!(edge.is_robot_arm());
        assert_eq!(edge.label(), "FALSE");
        assert_eq!(edge.branch(), Some(Branch::False));

        let mut plain = Edge::new(EdgeId::new(4), NodeId::new(1), NodeId::new(2), RoutingStyle::Line);
        plain.set_label("TRUE");
        assert_eq!(plain.branch(), None);
    }

    #[test]
    fn unknown_corner_names_deserialize_as_unrecognized() {
        let corner: Corner = serde_json::from_str("\"diagonal\"").expect("corner");
        assert_eq!(corner, Corner::Unrecognized);
        let corner: Corner = serde_json::from_str("\"left\"").expect("corner");
        assert_eq!(corner, Corner::Left);
    }
}
