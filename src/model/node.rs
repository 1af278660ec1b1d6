// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::NodeId;
use crate::geometry::Point;

pub const DEFAULT_NODE_RADIUS: f64 = 40.0;

/// Shape discriminant used when creating nodes and in persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Process,
    Start,
    Stop,
    Decision,
    DataModel,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Decision => "decision",
            Self::DataModel => "dataModel",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            Self::Process => "Process",
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Decision => "Decision",
            Self::DataModel => "Data",
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            Self::Process => "#fde68a",
            Self::Start => "#c6f6d5",
            Self::Stop => "#fed7d7",
            Self::Decision => "#fbcfe8",
            Self::DataModel => "#e9d8fd",
        }
    }
}

/// Orientation of a decision node's branches. Persisted as degrees (`0` or `90`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Horizontal,
    Vertical,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 90,
        }
    }

    /// Any angle other than a quarter turn reads as horizontal.
    pub fn from_degrees(degrees: f64) -> Self {
        if (degrees.rem_euclid(180.0) - 90.0).abs() < 1e-6 {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: String,
}

impl DataField {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Per-kind node payload. Only decision nodes carry a rotation and only data-model nodes carry
/// fields, so geometry and serialization dispatch on the variant rather than on optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeShape {
    Process,
    Start,
    Stop,
    Decision { rotation: Rotation },
    DataModel { fields: Vec<DataField> },
}

impl NodeShape {
    pub fn for_kind(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Process => Self::Process,
            ShapeKind::Start => Self::Start,
            ShapeKind::Stop => Self::Stop,
            ShapeKind::Decision => Self::Decision {
                rotation: Rotation::default(),
            },
            ShapeKind::DataModel => Self::DataModel { fields: Vec::new() },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Process => ShapeKind::Process,
            Self::Start => ShapeKind::Start,
            Self::Stop => ShapeKind::Stop,
            Self::Decision { .. } => ShapeKind::Decision,
            Self::DataModel { .. } => ShapeKind::DataModel,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    center: Point,
    radius: f64,
    shape: NodeShape,
    label: String,
    color: String,
}

impl Node {
    pub fn new(id: NodeId, kind: ShapeKind, center: Point) -> Self {
        Self {
            id,
            center,
            radius: DEFAULT_NODE_RADIUS,
            shape: NodeShape::for_kind(kind),
            label: kind.default_label().to_owned(),
            color: kind.default_color().to_owned(),
        }
    }

    pub fn new_with(
        id: NodeId,
        shape: NodeShape,
        center: Point,
        radius: f64,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            center,
            radius,
            shape,
            label: label.into(),
            color: color.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn x(&self) -> f64 {
        self.center.x
    }

    pub fn y(&self) -> f64 {
        self.center.y
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn shape(&self) -> &NodeShape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn is_decision(&self) -> bool {
        matches!(self.shape, NodeShape::Decision { .. })
    }

    pub fn rotation(&self) -> Option<Rotation> {
        match self.shape {
            NodeShape::Decision { rotation } => Some(rotation),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&[DataField]> {
        match &self.shape {
            NodeShape::DataModel { fields } => Some(fields),
            _ => None,
        }
    }

    pub(crate) fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.offset(dx, dy);
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub(crate) fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Returns `false` (and changes nothing) when the node is not a decision node.
    pub(crate) fn set_rotation(&mut self, rotation: Rotation) -> bool {
        match &mut self.shape {
            NodeShape::Decision { rotation: current } => {
                *current = rotation;
                true
            }
            _ => false,
        }
    }

    /// Returns `false` (and changes nothing) when the node is not a data-model node.
    pub(crate) fn set_fields(&mut self, fields: Vec<DataField>) -> bool {
        match &mut self.shape {
            NodeShape::DataModel { fields: current } => {
                *current = fields;
                true
            }
            _ => false,
        }
    }
}
