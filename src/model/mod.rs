// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A project owns nodes, edges and free texts. Edges refer to nodes by id only; endpoint nodes
//! are always resolved through the owning project.

pub mod edge;
pub mod element;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node;
pub mod project;
pub mod text;

pub use edge::{Branch, Corner, Edge, RoutingStyle};
pub use element::{ElementKind, ElementRef, ParseElementRefError};
pub use ids::{EdgeId, Id, IdError, NodeId, TextId};
pub use node::{DataField, Node, NodeShape, Rotation, ShapeKind, DEFAULT_NODE_RADIUS};
pub use project::{IntegrityViolation, Project};
pub use text::TextLabel;
