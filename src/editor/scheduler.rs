// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


/// Coalesces redraw requests: any number of `mark_dirty` calls between two flushes produce one
/// frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    dirty: bool,
    frames: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of frames flushed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs `frame` once if anything was marked dirty since the last flush.
    pub fn flush_if_dirty<T>(&mut self, frame: impl FnOnce() -> T) -> Option<T> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.frames += 1;
        Some(frame())
    }
}
