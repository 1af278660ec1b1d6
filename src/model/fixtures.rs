// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


use crate::decision;
use crate::geometry::Point;
use crate::model::{
    Edge, EdgeId, ElementRef, Node, NodeId, Project, RoutingStyle, ShapeKind, TextId, TextLabel,
};

fn add_node(project: &mut Project, kind: ShapeKind, x: f64, y: f64) -> NodeId {
    let id = NodeId::new(project.allocate_id());
    project.insert_node(Node::new(id, kind, Point::new(x, y)));
    id
}

fn add_edge(project: &mut Project, from: NodeId, to: NodeId, style: RoutingStyle) -> EdgeId {
    let id = EdgeId::new(project.allocate_id());
    project.insert_edge(Edge::new(id, from, to, style));
    id
}

pub(crate) struct DecisionTriple {
    pub(crate) project: Project,
    pub(crate) decision: NodeId,
    pub(crate) true_node: NodeId,
    pub(crate) false_node: NodeId,
    pub(crate) true_edge: EdgeId,
    pub(crate) false_edge: EdgeId,
}

/// A horizontal decision node at `center` with its two branches in place.
pub(crate) fn decision_triple(center: Point) -> DecisionTriple {
    let mut project = Project::new("decision");
    let decision = add_node(&mut project, ShapeKind::Decision, center.x, center.y);
    let created = decision::attach_branches(&mut project, decision);

    let node_at = |index: usize| match created.get(index) {
        Some(ElementRef::Node(id)) => *id,
        other => panic!("expected branch node at {index}, got {other:?}"),
    };
    let edge_at = |index: usize| match created.get(index) {
        Some(ElementRef::Edge(id)) => *id,
        other => panic!("expected branch edge at {index}, got {other:?}"),
    };

    DecisionTriple {
        true_node: node_at(0),
        true_edge: edge_at(1),
        false_node: node_at(2),
        false_edge: edge_at(3),
        project,
        decision,
    }
}

/// `start -> process -> stop` laid out left to right, 200 units apart.
pub(crate) fn linear_chain() -> (Project, [NodeId; 3], [EdgeId; 2]) {
    let mut project = Project::new("chain");
    let start = add_node(&mut project, ShapeKind::Start, 0.0, 0.0);
    let process = add_node(&mut project, ShapeKind::Process, 200.0, 0.0);
    let stop = add_node(&mut project, ShapeKind::Stop, 400.0, 0.0);
    let first = add_edge(&mut project, start, process, RoutingStyle::SingleArrow);
    let second = add_edge(&mut project, process, stop, RoutingStyle::SingleArrow);
    (project, [start, process, stop], [first, second])
}

/// A chain feeding a decision, plus a free text. Exercises every element kind.
pub(crate) fn mixed_project() -> Project {
    let (mut project, [_, process, _], _) = linear_chain();
    project.set_name("mixed");
    let decision = add_node(&mut project, ShapeKind::Decision, 200.0, 300.0);
    decision::attach_branches(&mut project, decision);
    add_edge(&mut project, process, decision, RoutingStyle::DualArrow);
    let text = TextId::new(project.allocate_id());
    project.insert_text(TextLabel::new(text, Point::new(10.0, 500.0), "note"));
    project
}
