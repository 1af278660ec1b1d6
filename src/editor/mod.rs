// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! The operation surface UI collaborators drive.
//!
//! An [`Editor`] owns one [`Project`] and serializes every mutation through [`apply_ops`]. Pointer
//! handlers call the editor synchronously; redraws are coalesced by a [`RedrawScheduler`] and
//! each flushed frame is handed to a [`Renderer`] and then auto-saved.

pub mod scheduler;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::format::{self, Document, ImportFormatError, LoadReport};
use crate::geometry::{Point, Rect};
use crate::model::{EdgeId, ElementRef, NodeId, Project, RoutingStyle, ShapeKind, TextId};
use crate::ops::{apply_ops, ApplyError, ApplyResult, Op};
use crate::query::{self, MonospaceMeasure, TextMeasure};
use crate::routing::{self, EdgePath};
use crate::store::{StorageService, StoreError};

pub use scheduler::RedrawScheduler;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Storage key written after every flushed frame. `None` disables auto-save.
    pub autosave_key: Option<String>,
}

/// Everything a renderer needs for one frame. The core supplies geometry only.
#[derive(Debug)]
pub struct Frame<'a> {
    pub project: &'a Project,
    pub paths: &'a [EdgePath],
    pub selection: &'a [ElementRef],
    pub draft: Option<ConnectorDraft>,
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// First click of a two-click connector gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorDraft {
    pub from: NodeId,
    pub style: RoutingStyle,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] ImportFormatError),
    #[error("no connector is being drawn")]
    NoConnectorDraft,
    #[error("operation reported no created element")]
    NothingCreated,
    #[error("nothing stored under key {key:?}")]
    MissingProject { key: String },
}

pub struct Editor<S> {
    project: Project,
    storage: S,
    config: EditorConfig,
    scheduler: RedrawScheduler,
    selection: Vec<ElementRef>,
    draft: Option<ConnectorDraft>,
    measure: Box<dyn TextMeasure>,
}

impl<S: StorageService> Editor<S> {
    pub fn new(project: Project, storage: S, config: EditorConfig) -> Self {
        let mut scheduler = RedrawScheduler::new();
        scheduler.mark_dirty();
        Self {
            project,
            storage,
            config,
            scheduler,
            selection: Vec::new(),
            draft: None,
            measure: Box::new(MonospaceMeasure::default()),
        }
    }

    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    pub fn selection(&self) -> &[ElementRef] {
        &self.selection
    }

    pub fn draft(&self) -> Option<ConnectorDraft> {
        self.draft
    }

    /// Applies `ops` as one atomic batch against the current revision.
    ///
    /// Any operation cancels a pending connector draft.
    pub fn apply(&mut self, ops: &[Op]) -> Result<ApplyResult, EditorError> {
        self.cancel_connector();
        let rev = self.project.rev();
        let result = apply_ops(&mut self.project, rev, ops)?;
        if !result.delta.removed.is_empty() {
            let project = &self.project;
            self.selection.retain(|element| project.contains(*element));
        }
        self.scheduler.mark_dirty();
        Ok(result)
    }

    /// Creates a node and returns its id. Decision nodes come with both branches.
    pub fn create_node(&mut self, kind: ShapeKind, at: Point) -> Result<NodeId, EditorError> {
        let result = self.apply(&[Op::CreateNode { kind, at }])?;
        result.delta.first_added_node().ok_or(EditorError::NothingCreated)
    }

    pub fn create_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        style: RoutingStyle,
    ) -> Result<EdgeId, EditorError> {
        let result = self.apply(&[Op::CreateEdge { from, to, style }])?;
        result.delta.first_added_edge().ok_or(EditorError::NothingCreated)
    }

    pub fn create_text(&mut self, at: Point, content: &str) -> Result<TextId, EditorError> {
        let result = self.apply(&[Op::CreateText {
            at,
            content: content.to_owned(),
        }])?;
        result
            .delta
            .added
            .iter()
            .find_map(|element| match element {
                ElementRef::Text(id) => Some(*id),
                _ => None,
            })
            .ok_or(EditorError::NothingCreated)
    }

    pub fn move_node(&mut self, node_id: NodeId, dx: f64, dy: f64) -> Result<(), EditorError> {
        self.apply(&[Op::MoveNode { node_id, dx, dy }]).map(drop)
    }

    pub fn group_translate(
        &mut self,
        elements: &[ElementRef],
        dx: f64,
        dy: f64,
    ) -> Result<(), EditorError> {
        self.apply(&[Op::GroupTranslate {
            elements: elements.to_vec(),
            dx,
            dy,
        }])
        .map(drop)
    }

    /// Drags the current selection.
    pub fn translate_selection(&mut self, dx: f64, dy: f64) -> Result<(), EditorError> {
        let elements = self.selection.clone();
        self.group_translate(&elements, dx, dy)
    }

    pub fn delete_element(&mut self, element: ElementRef) -> Result<(), EditorError> {
        self.apply(&[Op::DeleteElement { element }]).map(drop)
    }

    /// Deletes every selected element in one batch. Edges removed by an earlier cascade in the
    /// same selection are skipped.
    pub fn delete_selection(&mut self) -> Result<(), EditorError> {
        let mut staged = self.project.clone();
        let mut ops = Vec::new();
        for element in self.selection.clone() {
            if !staged.contains(element) {
                continue;
            }
            let op = Op::DeleteElement { element };
            let rev = staged.rev();
            apply_ops(&mut staged, rev, std::slice::from_ref(&op))?;
            ops.push(op);
        }
        self.apply(&ops).map(drop)
    }

    pub fn rename_element(&mut self, element: ElementRef, text: &str) -> Result<(), EditorError> {
        self.apply(&[Op::RenameElement {
            element,
            text: text.to_owned(),
        }])
        .map(drop)
    }

    pub fn recolor(&mut self, element: ElementRef, color: &str) -> Result<(), EditorError> {
        self.apply(&[Op::Recolor {
            element,
            color: color.to_owned(),
        }])
        .map(drop)
    }

    pub fn rotate_decision_node(&mut self, node_id: NodeId) -> Result<(), EditorError> {
        self.apply(&[Op::RotateDecision { node_id }]).map(drop)
    }

    pub fn toggle_edge_style(&mut self, edge_id: EdgeId) -> Result<(), EditorError> {
        self.apply(&[Op::ToggleEdgeStyle { edge_id }]).map(drop)
    }

    pub fn add_break_point(&mut self, edge_id: EdgeId, point: Point) -> Result<(), EditorError> {
        self.apply(&[Op::AddBreakPoint { edge_id, point }]).map(drop)
    }

    pub fn remove_break_point(&mut self, edge_id: EdgeId, index: usize) -> Result<(), EditorError> {
        self.apply(&[Op::RemoveBreakPoint { edge_id, index }]).map(drop)
    }

    pub fn clear_break_points(&mut self, edge_id: EdgeId) -> Result<(), EditorError> {
        self.apply(&[Op::ClearBreakPoints { edge_id }]).map(drop)
    }

    pub fn hit_test(&self, point: Point) -> Option<ElementRef> {
        query::hit_test(&self.project, point, self.measure.as_ref())
    }

    pub fn hit_test_rect(&self, rect: Rect) -> Vec<ElementRef> {
        query::hit_test_rect(&self.project, rect, self.measure.as_ref())
    }

    /// Click selection. Clicking empty space clears the selection and cancels a connector draft.
    pub fn select_at(&mut self, point: Point) -> Option<ElementRef> {
        let hit = self.hit_test(point);
        if hit.is_none() {
            self.cancel_connector();
        }
        self.selection = hit.into_iter().collect();
        self.scheduler.mark_dirty();
        hit
    }

    pub fn select_rect(&mut self, rect: Rect) -> &[ElementRef] {
        self.selection = self.hit_test_rect(rect);
        self.scheduler.mark_dirty();
        &self.selection
    }

    /// First click of the connector gesture.
    pub fn begin_connector(&mut self, from: NodeId, style: RoutingStyle) -> Result<(), EditorError> {
        if !self.project.contains_node(from) {
            return Err(ApplyError::MissingNode { node_id: from }.into());
        }
        self.draft = Some(ConnectorDraft { from, style });
        self.scheduler.mark_dirty();
        Ok(())
    }

    /// Second click of the connector gesture. The draft is consumed even when the edge is
    /// rejected.
    pub fn complete_connector(&mut self, to: NodeId) -> Result<EdgeId, EditorError> {
        let ConnectorDraft { from, style } = self.draft.take().ok_or(EditorError::NoConnectorDraft)?;
        self.create_edge(from, to, style)
    }

    pub fn cancel_connector(&mut self) -> Option<ConnectorDraft> {
        let draft = self.draft.take();
        if draft.is_some() {
            self.scheduler.mark_dirty();
        }
        draft
    }

    pub fn serialize(&self) -> Document {
        format::to_document(&self.project)
    }

    /// Replaces the current project. Selection and drafts are dropped.
    pub fn deserialize(&mut self, document: Document) -> LoadReport {
        let (project, report) = format::from_document(document);
        self.replace_project(project);
        report
    }

    pub fn save(&mut self, key: &str) -> Result<(), EditorError> {
        self.persist(key)?;
        Ok(())
    }

    /// Stamps the save time on the project, then stores it under `key`.
    fn persist(&mut self, key: &str) -> Result<(), StoreError> {
        self.project.set_timestamp(now_millis());
        self.storage.save(key, &format::to_document(&self.project))
    }

    /// Loads `key` into the editor. On error the current project stays untouched.
    pub fn load(&mut self, key: &str) -> Result<LoadReport, EditorError> {
        let document = self
            .storage
            .load(key)?
            .ok_or_else(|| EditorError::MissingProject {
                key: key.to_owned(),
            })?;
        Ok(self.deserialize(document))
    }

    /// Imports a `.lcp`/`.json` file. On error the current project stays untouched.
    pub fn import_file(&mut self, path: &Path) -> Result<LoadReport, EditorError> {
        let (project, report) = format::import_file(path)?;
        self.replace_project(project);
        Ok(report)
    }

    fn replace_project(&mut self, project: Project) {
        self.project = project;
        self.selection.clear();
        self.draft = None;
        self.scheduler.mark_dirty();
    }

    /// Paints a frame if anything changed since the last one, then auto-saves.
    ///
    /// Returns whether a frame was produced. A failed auto-save is reported after the frame has
    /// been painted; the scheduler is not re-armed.
    pub fn flush_frame(&mut self, renderer: &mut dyn Renderer) -> Result<bool, EditorError> {
        let project = &self.project;
        let selection = &self.selection;
        let draft = self.draft;
        let painted = self
            .scheduler
            .flush_if_dirty(|| {
                let paths = routing::compute_all_paths(project);
                renderer.render(&Frame {
                    project,
                    paths: &paths,
                    selection,
                    draft,
                });
            })
            .is_some();
        if !painted {
            return Ok(false);
        }

        tracing::debug!(frame = self.scheduler.frames(), rev = self.project.rev(), "flushed frame");
        if let Some(key) = self.config.autosave_key.clone() {
            self.persist(&key)?;
            tracing::debug!(key = %key, "auto-saved project");
        }
        Ok(true)
    }
}

/// Milliseconds since the Unix epoch; zero if the clock reads before it.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
