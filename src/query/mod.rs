// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Read-only queries over projects.
//!
//! Queries provide derived views (hit-testing, selection) that power pointer interaction.

pub mod selection;

pub use selection::{
    hit_test, hit_test_rect, text_bounds, MonospaceMeasure, TextMeasure, EDGE_HIT_TOLERANCE,
    TEXT_HIT_PAD_X, TEXT_HIT_PAD_Y,
};
