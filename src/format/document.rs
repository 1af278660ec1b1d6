// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::model::{
    Corner, DataField, Edge, EdgeId, ElementKind, IntegrityViolation, Node, NodeId, NodeShape,
    Project, Rotation, RoutingStyle, ShapeKind, TextId, TextLabel, DEFAULT_NODE_RADIUS,
};

pub const DOCUMENT_VERSION: &str = "1.0";
pub const PROJECT_FILE_EXTENSION: &str = "lcp";

const REQUIRED_ARRAYS: [&str; 2] = ["nodes", "edges"];

fn default_project_name() -> String {
    Project::default().name().to_owned()
}

fn default_node_counter() -> u64 {
    1
}

fn default_radius() -> f64 {
    DEFAULT_NODE_RADIUS
}

/// The persisted project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "default_project_name")]
    pub name: String,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default = "default_node_counter")]
    pub node_counter: u64,
    pub nodes: Vec<NodeJson>,
    pub edges: Vec<EdgeJson>,
    #[serde(default)]
    pub texts: Vec<TextJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeJson {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    pub shape_kind: ShapeKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Degrees; decision nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<DataField>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeJson {
    pub id: u64,
    /// Snapshot of the source node at save time. Only its `id` is trusted on load.
    pub from: NodeJson,
    pub to: NodeJson,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub routing_style: RoutingStyle,
    #[serde(default)]
    pub break_points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_corner: Option<Corner>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextJson {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportFormatError {
    #[error("invalid document json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document is missing the `{field}` array")]
    MissingArray { field: &'static str },
    #[error("document root must be a JSON object")]
    InvalidDocument,
    #[error("unsupported project file {path:?} (expected .lcp or .json)")]
    UnsupportedExtension { path: PathBuf },
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot encode document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    From,
    To,
}

/// An edge whose embedded endpoint snapshot names a node that is not in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingReferenceWarning {
    pub edge_id: EdgeId,
    pub end: EdgeEnd,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadWarning {
    /// The edge was left out of the loaded project.
    DanglingReference(DanglingReferenceWarning),
    /// A later element reused an id already taken by an element of the same kind.
    DuplicateId { kind: ElementKind, id: u64 },
    /// A second edge for an ordered node pair that already has one.
    DuplicateEdge { edge_id: EdgeId, from: NodeId, to: NodeId },
    /// A decision node that does not own exactly one TRUE and one FALSE branch edge at the
    /// corners its rotation expects. It is kept as loaded.
    MalformedDecision { node_id: NodeId },
}

/// Everything a load had to repair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn dangling_references(&self) -> impl Iterator<Item = &DanglingReferenceWarning> + '_ {
        self.warnings.iter().filter_map(|warning| match warning {
            LoadWarning::DanglingReference(dangling) => Some(dangling),
            _ => None,
        })
    }
}

fn node_to_json(node: &Node) -> NodeJson {
    let (rotation, fields) = match node.shape() {
        NodeShape::Decision { rotation } => (Some(serde_json::Number::from(rotation.degrees())), None),
        NodeShape::DataModel { fields } => (None, Some(fields.clone())),
        NodeShape::Process | NodeShape::Start | NodeShape::Stop => (None, None),
    };
    NodeJson {
        id: node.id().get(),
        x: node.x(),
        y: node.y(),
        radius: node.radius(),
        shape_kind: node.kind(),
        label: Some(node.label().to_owned()),
        color: Some(node.color().to_owned()),
        rotation,
        fields,
    }
}

fn node_from_json(json: NodeJson) -> Node {
    let kind = json.shape_kind;
    let shape = match kind {
        ShapeKind::Decision => NodeShape::Decision {
            rotation: json
                .rotation
                .as_ref()
                .and_then(serde_json::Number::as_f64)
                .map(Rotation::from_degrees)
                .unwrap_or_default(),
        },
        ShapeKind::DataModel => NodeShape::DataModel {
            fields: json.fields.unwrap_or_default(),
        },
        ShapeKind::Process | ShapeKind::Start | ShapeKind::Stop => NodeShape::for_kind(kind),
    };
    Node::new_with(
        NodeId::new(json.id),
        shape,
        Point::new(json.x, json.y),
        json.radius,
        json.label.unwrap_or_else(|| kind.default_label().to_owned()),
        json.color.unwrap_or_else(|| kind.default_color().to_owned()),
    )
}

/// Builds the persisted record. Every edge embeds a snapshot of both endpoint nodes.
pub fn to_document(project: &Project) -> Document {
    let edges = project
        .edges()
        .filter_map(|edge| {
            let (from, to) = project.endpoints(edge)?;
            Some(EdgeJson {
                id: edge.id().get(),
                from: node_to_json(from),
                to: node_to_json(to),
                label: edge.label().to_owned(),
                routing_style: edge.style(),
                break_points: edge.break_points().to_vec(),
                from_corner: edge.from_corner(),
            })
        })
        .collect();

    Document {
        name: project.name().to_owned(),
        timestamp: project.timestamp(),
        version: Some(DOCUMENT_VERSION.to_owned()),
        is_private: project.is_private(),
        password_hash: project.password_hash().map(str::to_owned),
        node_counter: project.node_counter(),
        nodes: project.nodes().map(node_to_json).collect(),
        edges,
        texts: project
            .texts()
            .map(|text| TextJson {
                id: text.id().get(),
                x: text.position().x,
                y: text.position().y,
                content: text.content().to_owned(),
            })
            .collect(),
    }
}

/// Rebuilds a project from a document, resolving edge snapshots to the loaded nodes.
///
/// Edges whose endpoints cannot be resolved are dropped and reported, so the returned project
/// never holds a dangling edge.
pub fn from_document(document: Document) -> (Project, LoadReport) {
    let mut report = LoadReport::default();
    let mut project = Project::new(document.name);
    project.set_timestamp(document.timestamp);
    project.set_privacy(document.is_private, document.password_hash);
    project.set_node_counter(document.node_counter.max(1));

    for json in document.nodes {
        let id = NodeId::new(json.id);
        if project.contains_node(id) {
            report.warnings.push(LoadWarning::DuplicateId {
                kind: ElementKind::Node,
                id: json.id,
            });
            continue;
        }
        project.insert_node(node_from_json(json));
    }

    let mut seen_edges = HashSet::new();
    for json in document.edges {
        let edge_id = EdgeId::new(json.id);
        if !seen_edges.insert(edge_id) {
            report.warnings.push(LoadWarning::DuplicateId {
                kind: ElementKind::Edge,
                id: json.id,
            });
            continue;
        }

        let from = NodeId::new(json.from.id);
        let to = NodeId::new(json.to.id);
        let dangling = [(EdgeEnd::From, from), (EdgeEnd::To, to)]
            .into_iter()
            .filter(|(_, node_id)| !project.contains_node(*node_id))
            .collect::<Vec<_>>();
        if !dangling.is_empty() {
            for (end, node_id) in dangling {
                tracing::warn!(edge_id = %edge_id, node_id = %node_id, ?end, "dropping edge with dangling endpoint");
                report
                    .warnings
                    .push(LoadWarning::DanglingReference(DanglingReferenceWarning {
                        edge_id,
                        end,
                        node_id,
                    }));
            }
            continue;
        }

        if project.edge_between(from, to).is_some() {
            tracing::warn!(edge_id = %edge_id, from = %from, to = %to, "dropping duplicate edge");
            report
                .warnings
                .push(LoadWarning::DuplicateEdge { edge_id, from, to });
            continue;
        }

        let break_points = if json.from_corner.is_some() {
            Vec::new()
        } else {
            json.break_points
        };
        project.insert_edge(Edge::new_with(
            edge_id,
            from,
            to,
            json.label,
            json.routing_style,
            break_points,
            json.from_corner,
        ));
    }

    for violation in project.integrity_violations() {
        if let IntegrityViolation::MalformedDecision { node_id } = violation {
            tracing::warn!(node_id = %node_id, "decision node is missing its branches");
            report.warnings.push(LoadWarning::MalformedDecision { node_id });
        }
    }

    for json in document.texts {
        let id = TextId::new(json.id);
        if project.text(id).is_some() {
            report.warnings.push(LoadWarning::DuplicateId {
                kind: ElementKind::Text,
                id: json.id,
            });
            continue;
        }
        project.insert_text(TextLabel::new(id, Point::new(json.x, json.y), json.content));
    }

    (project, report)
}

/// Parses a document, checking for the arrays every document must carry before decoding it.
pub fn parse_document_str(input: &str) -> Result<Document, ImportFormatError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let Some(object) = value.as_object() else {
        return Err(ImportFormatError::InvalidDocument);
    };
    for field in REQUIRED_ARRAYS {
        if !object.get(field).is_some_and(serde_json::Value::is_array) {
            return Err(ImportFormatError::MissingArray { field });
        }
    }
    Ok(serde_json::from_value(value)?)
}

pub fn to_json_string(project: &Project) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_document(project))
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ext.eq_ignore_ascii_case(PROJECT_FILE_EXTENSION) || ext.eq_ignore_ascii_case("json")
        })
}

/// Loads a `.lcp` or `.json` project file.
pub fn import_file(path: &Path) -> Result<(Project, LoadReport), ImportFormatError> {
    if !has_supported_extension(path) {
        return Err(ImportFormatError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|source| ImportFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document_str(&contents)?;
    let (project, report) = from_document(document);
    tracing::debug!(
        path = %path.display(),
        nodes = project.nodes().len(),
        edges = project.edges().len(),
        warnings = report.warnings.len(),
        "imported project"
    );
    Ok((project, report))
}

/// Writes the project as a `.lcp` file. The extension is forced; the written path is returned.
pub fn export_file(project: &Project, path: &Path) -> Result<PathBuf, ExportError> {
    let path = path.with_extension(PROJECT_FILE_EXTENSION);
    let json = to_json_string(project)?;
    fs::write(&path, json).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
