// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A stable numeric identifier for one kind of diagram element.
///
/// All element kinds draw from the same project-wide counter, so a raw value is unique across
/// nodes, edges and texts of one project. The tag parameter only keeps the kinds apart at
/// compile time.
pub struct Id<T> {
    value: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(self) -> u64 {
        self.value
    }
}

// Manual impls: derives would put bounds on `T`, which is only ever an uninhabited tag.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        trimmed
            .parse::<u64>()
            .map(Self::new)
            .map_err(|_| IdError::NotNumeric {
                value: trimmed.to_owned(),
            })
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must be a non-negative integer, got {value:?}")]
    NotNumeric { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextIdTag {}
pub type TextId = Id<TextIdTag>;

#[cfg(test)]
mod tests {
    use super::{IdError, NodeId};

    #[test]
    fn id_parses_trimmed_integers() {
        let id: NodeId = " 42 ".parse().expect("node id");
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn id_rejects_empty_and_non_numeric() {
        assert_eq!("".parse::<NodeId>(), Err(IdError::Empty));
        assert_eq!(
            "n:1".parse::<NodeId>(),
            Err(IdError::NotNumeric {
                value: "n:1".to_owned()
            })
        );
    }

    #[test]
    fn id_serializes_as_bare_number() {
        let id = NodeId::new(7);
        assert_eq!(serde_json::to_string(&id).expect("json"), "7");
        let back: NodeId = serde_json::from_str("7").expect("parse");
        assert_eq!(back, id);
    }
}
