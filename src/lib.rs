// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Logichart: flowchart graph and geometry engine.
//!
//! The crate owns the diagram model (nodes, decision branches, connectors, free text), the
//! shape-aware geometry used for hit-testing and routing, and the `.lcp` document format.
//! Drawing and input handling live in host applications, which drive an [`editor::Editor`].

pub mod decision;
pub mod editor;
pub mod format;
pub mod geometry;
pub mod model;
pub mod ops;
pub mod query;
pub mod routing;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
