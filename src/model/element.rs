// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::{EdgeId, IdError, NodeId, TextId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Node,
    Edge,
    Text,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed reference to one element of a project.
///
/// Canonical text form is `<kind>:<id>`, e.g. `node:12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRef {
    Node(NodeId),
    Edge(EdgeId),
    Text(TextId),
}

impl ElementRef {
    pub fn kind(self) -> ElementKind {
        match self {
            Self::Node(_) => ElementKind::Node,
            Self::Edge(_) => ElementKind::Edge,
            Self::Text(_) => ElementKind::Text,
        }
    }

    pub fn raw_id(self) -> u64 {
        match self {
            Self::Node(id) => id.get(),
            Self::Edge(id) => id.get(),
            Self::Text(id) => id.get(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseElementRefError> {
        let (kind, id) = input
            .split_once(':')
            .ok_or(ParseElementRefError::MissingSeparator)?;
        match kind.trim() {
            "node" => Ok(Self::Node(id.parse()?)),
            "edge" => Ok(Self::Edge(id.parse()?)),
            "text" => Ok(Self::Text(id.parse()?)),
            other => Err(ParseElementRefError::UnknownKind {
                kind: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.raw_id())
    }
}

impl FromStr for ElementRef {
    type Err = ParseElementRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NodeId> for ElementRef {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<EdgeId> for ElementRef {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

impl From<TextId> for ElementRef {
    fn from(id: TextId) -> Self {
        Self::Text(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseElementRefError {
    #[error("element ref must look like <kind>:<id>")]
    MissingSeparator,
    #[error("unknown element kind {kind:?}")]
    UnknownKind { kind: String },
    #[error(transparent)]
    InvalidId(#[from] IdError),
}
