// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::TextId;
use crate::geometry::Point;

/// Free-standing text placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    id: TextId,
    position: Point,
    content: String,
}

impl TextLabel {
    pub fn new(id: TextId, position: Point, content: impl Into<String>) -> Self {
        Self {
            id,
            position,
            content: content.into(),
        }
    }

    pub fn id(&self) -> TextId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }

    pub(crate) fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}
