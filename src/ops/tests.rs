// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


use crate::geometry::Point;
use crate::model::fixtures::{decision_triple, linear_chain, DecisionTriple};
use crate::model::{
    Corner, DataField, EdgeId, ElementKind, ElementRef, NodeId, Project, RoutingStyle, ShapeKind,
};

use super::{apply_ops, ApplyError, Delta, Op, RobotArmAction};

fn apply(project: &mut Project, ops: &[Op]) -> Result<Delta, ApplyError> {
    let rev = project.rev();
    apply_ops(project, rev, ops).map(|result| result.delta)
}

fn center(project: &Project, id: NodeId) -> Point {
    project.node(id).expect("node").center()
}

#[test]
fn create_node_bumps_rev_and_reports_added() {
    let mut project = Project::default();
    let result = apply_ops(
        &mut project,
        0,
        &[Op::CreateNode { kind: ShapeKind::Process, at: Point::new(10.0, 20.0) }],
    )
    .expect("apply");

    assert_eq!(result.new_rev, 1);
    assert_eq!(result.applied, 1);
    assert_eq!(project.rev(), 1);
    let node_id = result.delta.first_added_node().expect("node");
    assert_eq!(result.delta.added, vec![ElementRef::Node(node_id)]);
    let node = project.node(node_id).expect("node");
    assert_eq!(node.label(), "Process");
    assert_eq!(node.radius(), 40.0);
    assert_eq!(node.center(), Point::new(10.0, 20.0));
}

#[test]
fn stale_base_rev_is_a_conflict() {
    let mut project = Project::default();
    let err = apply_ops(&mut project, 3, &[Op::RenameProject { name: "x".to_owned() }])
        .expect_err("conflict");
    assert_eq!(err, ApplyError::Conflict { base_rev: 3, current_rev: 0 });
    assert_eq!(project.name(), "Untitled");
}

#[test]
fn empty_batches_keep_the_revision() {
    let mut project = Project::default();
    let result = apply_ops(&mut project, 0, &[]).expect("apply");
    assert_eq!(result.new_rev, 0);
    assert!(result.delta.is_empty());
}

#[test]
fn decision_create_builds_the_branch_triple() {
    let mut project = Project::default();
    let delta = apply(
        &mut project,
        &[Op::CreateNode { kind: ShapeKind::Decision, at: Point::new(100.0, 100.0) }],
    )
    .expect("apply");

    assert_eq!(project.nodes().len(), 3);
    assert_eq!(project.edges().len(), 2);
    assert_eq!(delta.added.len(), 5);
    let decision_id = delta.first_added_node().expect("decision");
    assert!(project.node(decision_id).expect("decision").is_decision());

    let branches = crate::decision::branch_edges(&project, decision_id);
    assert_eq!(branches.len(), 2);
    let (_, true_edge) = branches[0];
    let (_, false_edge) = branches[1];
    assert_eq!(true_edge.label(), "TRUE");
    assert_eq!(true_edge.from_corner(), Some(Corner::Left));
    assert_eq!(false_edge.label(), "FALSE");
    assert_eq!(false_edge.from_corner(), Some(Corner::Right));
    assert_eq!(center(&project, true_edge.to()), Point::new(-20.0, 40.0));
    assert_eq!(center(&project, false_edge.to()), Point::new(220.0, 160.0));
    assert_eq!(project.node(true_edge.to()).expect("node").label(), "TRUE");
    assert_eq!(project.node(false_edge.to()).expect("node").kind(), ShapeKind::Process);
    assert!(project.integrity_violations().is_empty());
}

#[test]
fn duplicate_edge_is_rejected_without_side_effects() {
    let (mut project, [start, process, _], _) = linear_chain();
    let before = project.clone();

    let err = apply(
        &mut project,
        &[Op::CreateEdge { from: start, to: process, style: RoutingStyle::Line }],
    )
    .expect_err("duplicate");
    assert_eq!(err, ApplyError::DuplicateEdge { from: start, to: process });
    assert_eq!(project, before);

    // The reverse direction is a distinct ordered pair.
    apply(
        &mut project,
        &[Op::CreateEdge { from: process, to: start, style: RoutingStyle::Line }],
    )
    .expect("reverse edge");
    assert_eq!(project.edges().len(), 3);
}

#[test]
fn failed_batches_roll_back_earlier_ops() {
    let (mut project, [start, _, stop], _) = linear_chain();
    let before = project.clone();

    let err = apply(
        &mut project,
        &[
            Op::CreateNode { kind: ShapeKind::Stop, at: Point::new(0.0, 0.0) },
            Op::MoveNode { node_id: start, dx: 5.0, dy: 5.0 },
            Op::CreateEdge { from: stop, to: NodeId::new(404), style: RoutingStyle::Line },
        ],
    )
    .expect_err("missing node");
    assert_eq!(err, ApplyError::MissingNode { node_id: NodeId::new(404) });
    assert_eq!(project, before);
}

#[test]
fn edges_may_not_leave_a_decision_node() {
    let DecisionTriple { mut project, decision, false_node, .. } =
        decision_triple(Point::default());
    let err = apply(
        &mut project,
        &[Op::CreateEdge { from: decision, to: false_node, style: RoutingStyle::SingleArrow }],
    )
    .expect_err("decision outgoing");
    assert_eq!(err, ApplyError::DecisionOutgoingRejected { node_id: decision });

    apply(
        &mut project,
        &[Op::CreateEdge { from: false_node, to: decision, style: RoutingStyle::SingleArrow }],
    )
    .expect("incoming edges are fine");
}

#[test]
fn deleting_a_node_cascades_to_exactly_its_edges() {
    let (mut project, [_, process, _], [first, second]) = linear_chain();
    let delta = apply(&mut project, &[Op::DeleteElement { element: process.into() }])
        .expect("delete");

    assert_eq!(project.nodes().len(), 2);
    assert_eq!(project.edges().len(), 0);
    assert_eq!(
        delta.removed,
        vec![ElementRef::Node(process), ElementRef::Edge(first), ElementRef::Edge(second)]
    );
}

#[test]
fn deleting_an_unrelated_node_keeps_other_edges() {
    let (mut project, [start, _, _], [_, second]) = linear_chain();
    apply(&mut project, &[Op::DeleteElement { element: start.into() }]).expect("delete");
    assert!(project.edge(second).is_some());
    assert_eq!(project.edges().len(), 1);
}

#[test]
fn robot_arm_edges_cannot_be_deleted_or_edited() {
    let DecisionTriple { mut project, true_edge, true_node, .. } =
        decision_triple(Point::default());
    let edge_count = project.edges().len();

    let cases = [
        (Op::DeleteElement { element: true_edge.into() }, RobotArmAction::Delete),
        (Op::ToggleEdgeStyle { edge_id: true_edge }, RobotArmAction::Restyle),
        (
            Op::AddBreakPoint { edge_id: true_edge, point: Point::new(1.0, 1.0) },
            RobotArmAction::EditBreakPoints,
        ),
        (Op::RemoveBreakPoint { edge_id: true_edge, index: 0 }, RobotArmAction::EditBreakPoints),
        (Op::ClearBreakPoints { edge_id: true_edge }, RobotArmAction::EditBreakPoints),
        (
            Op::RenameElement { element: true_edge.into(), text: "maybe".to_owned() },
            RobotArmAction::Rename,
        ),
        (Op::DeleteElement { element: true_node.into() }, RobotArmAction::DeleteBranchNode),
    ];
    for (op, action) in cases {
        let err = apply(&mut project, &[op]).expect_err("robot arm");
        assert_eq!(err, ApplyError::RobotArmMutationRejected { edge_id: true_edge, action });
    }
    assert_eq!(project.edges().len(), edge_count);
    assert_eq!(project.rev(), 0);
}

#[test]
fn deleting_a_decision_removes_the_whole_triple() {
    let DecisionTriple { mut project, decision, true_node, .. } =
        decision_triple(Point::default());
    let outsider = NodeId::new(project.allocate_id());
    project.insert_node(crate::model::Node::new(
        outsider,
        ShapeKind::Start,
        Point::new(0.0, -300.0),
    ));
    apply(
        &mut project,
        &[Op::CreateEdge { from: outsider, to: true_node, style: RoutingStyle::SingleArrow }],
    )
    .expect("edge into branch");

    let delta =
        apply(&mut project, &[Op::DeleteElement { element: decision.into() }]).expect("delete");
    assert_eq!(project.nodes().len(), 1);
    assert!(project.contains_node(outsider));
    assert_eq!(project.edges().len(), 0);
    assert_eq!(delta.removed.len(), 6);
    assert!(project.integrity_violations().is_empty());
}

#[test]
fn moving_a_decision_drags_its_branches() {
    let DecisionTriple { mut project, decision, true_node, false_node, .. } =
        decision_triple(Point::new(100.0, 100.0));
    let delta = apply(&mut project, &[Op::MoveNode { node_id: decision, dx: 10.0, dy: -10.0 }])
        .expect("move");

    assert_eq!(center(&project, decision), Point::new(110.0, 90.0));
    assert_eq!(center(&project, true_node), Point::new(-10.0, 30.0));
    assert_eq!(center(&project, false_node), Point::new(230.0, 150.0));
    assert_eq!(
        delta.updated,
        vec![
            ElementRef::Node(decision),
            ElementRef::Node(true_node),
            ElementRef::Node(false_node)
        ]
    );
}

#[test]
fn moving_a_branch_node_leaves_the_decision_alone() {
    let DecisionTriple { mut project, decision, true_node, .. } =
        decision_triple(Point::new(100.0, 100.0));
    apply(&mut project, &[Op::MoveNode { node_id: true_node, dx: 5.0, dy: 5.0 }])
        .expect("move");
    assert_eq!(center(&project, true_node), Point::new(-15.0, 45.0));
    assert_eq!(center(&project, decision), Point::new(100.0, 100.0));

    // The next decision move re-snaps the branch.
    apply(&mut project, &[Op::MoveNode { node_id: decision, dx: 0.0, dy: 0.0 }])
        .expect("move");
    assert_eq!(center(&project, true_node), Point::new(-20.0, 40.0));
}

#[test]
fn moving_an_endpoint_shifts_break_points() {
    let (mut project, [start, _, _], [first, second]) = linear_chain();
    apply(
        &mut project,
        &[
            Op::AddBreakPoint { edge_id: first, point: Point::new(100.0, 80.0) },
            Op::AddBreakPoint { edge_id: second, point: Point::new(300.0, 80.0) },
        ],
    )
    .expect("break points");

    let delta = apply(&mut project, &[Op::MoveNode { node_id: start, dx: 0.0, dy: 20.0 }])
        .expect("move");
    assert_eq!(project.edge(first).expect("edge").break_points(), &[Point::new(100.0, 100.0)]);
    assert_eq!(project.edge(second).expect("edge").break_points(), &[Point::new(300.0, 80.0)]);
    assert_eq!(delta.updated, vec![ElementRef::Node(start), ElementRef::Edge(first)]);
}

#[test]
fn break_points_are_inserted_along_the_path() {
    let (mut project, _, [first, _]) = linear_chain();
    apply(
        &mut project,
        &[
            Op::AddBreakPoint { edge_id: first, point: Point::new(150.0, 100.0) },
            Op::AddBreakPoint { edge_id: first, point: Point::new(50.0, 60.0) },
        ],
    )
    .expect("break points");
    assert_eq!(
        project.edge(first).expect("edge").break_points(),
        &[Point::new(50.0, 60.0), Point::new(150.0, 100.0)]
    );

    apply(&mut project, &[Op::RemoveBreakPoint { edge_id: first, index: 0 }]).expect("remove");
    assert_eq!(project.edge(first).expect("edge").break_points(), &[Point::new(150.0, 100.0)]);

    let err = apply(&mut project, &[Op::RemoveBreakPoint { edge_id: first, index: 4 }])
        .expect_err("out of range");
    assert_eq!(err, ApplyError::BreakPointIndexOutOfRange { edge_id: first, index: 4, len: 1 });

    apply(&mut project, &[Op::ClearBreakPoints { edge_id: first }]).expect("clear");
    assert!(project.edge(first).expect("edge").break_points().is_empty());
}

#[test]
fn toggle_cycles_through_all_styles() {
    let (mut project, _, [first, _]) = linear_chain();
    let mut seen = Vec::new();
    for _ in 0..3 {
        apply(&mut project, &[Op::ToggleEdgeStyle { edge_id: first }]).expect("toggle");
        seen.push(project.edge(first).expect("edge").style());
    }
    assert_eq!(
        seen,
        vec![RoutingStyle::DualArrow, RoutingStyle::Line, RoutingStyle::SingleArrow]
    );
}

#[test]
fn rotating_twice_restores_everything() {
    let DecisionTriple { mut project, decision, .. } = decision_triple(Point::new(40.0, 40.0));
    let before = project.clone();

    apply(&mut project, &[Op::RotateDecision { node_id: decision }]).expect("rotate");
    assert_ne!(project.nodes().collect::<Vec<_>>(), before.nodes().collect::<Vec<_>>());
    assert!(project.integrity_violations().is_empty());
    apply(&mut project, &[Op::RotateDecision { node_id: decision }]).expect("rotate");

    assert_eq!(project.nodes().collect::<Vec<_>>(), before.nodes().collect::<Vec<_>>());
    assert_eq!(project.edges().collect::<Vec<_>>(), before.edges().collect::<Vec<_>>());
}

#[test]
fn rotate_rejects_plain_nodes() {
    let (mut project, [start, _, _], _) = linear_chain();
    let err = apply(&mut project, &[Op::RotateDecision { node_id: start }]).expect_err("plain");
    assert_eq!(err, ApplyError::NotDecisionNode { node_id: start });
}

#[test]
fn group_translate_moves_nodes_texts_and_shared_break_points() {
    let mut project = crate::model::fixtures::mixed_project();
    let (first_edge, text_id) = {
        let edge = project.edges().next().expect("edge").id();
        let text = project.texts().next().expect("text").id();
        (edge, text)
    };
    apply(
        &mut project,
        &[Op::AddBreakPoint { edge_id: first_edge, point: Point::new(100.0, 50.0) }],
    )
    .expect("break point");

    let elements = project
        .nodes()
        .map(|node| ElementRef::Node(node.id()))
        .chain([ElementRef::Text(text_id), ElementRef::Edge(first_edge)])
        .collect::<Vec<_>>();
    let before = project.clone();
    apply(&mut project, &[Op::GroupTranslate { elements, dx: 30.0, dy: -15.0 }])
        .expect("translate");

    for node in before.nodes() {
        assert_eq!(center(&project, node.id()), node.center().offset(30.0, -15.0));
    }
    assert_eq!(
        project.text(text_id).expect("text").position(),
        Point::new(40.0, 485.0)
    );
    assert_eq!(
        project.edge(first_edge).expect("edge").break_points(),
        &[Point::new(130.0, 35.0)]
    );
    assert!(project.integrity_violations().is_empty());
}

#[test]
fn rename_and_recolor_follow_element_kinds() {
    let mut project = crate::model::fixtures::mixed_project();
    let node_id = project.nodes().next().expect("node").id();
    let edge_id = project.edges().next().expect("edge").id();
    let text_id = project.texts().next().expect("text").id();

    apply(
        &mut project,
        &[
            Op::RenameElement { element: node_id.into(), text: "Begin".to_owned() },
            Op::RenameElement { element: edge_id.into(), text: "go".to_owned() },
            Op::RenameElement { element: text_id.into(), text: "memo".to_owned() },
            Op::Recolor { element: node_id.into(), color: "#000000".to_owned() },
        ],
    )
    .expect("edit");
    assert_eq!(project.node(node_id).expect("node").label(), "Begin");
    assert_eq!(project.node(node_id).expect("node").color(), "#000000");
    assert_eq!(project.edge(edge_id).expect("edge").label(), "go");
    assert_eq!(project.text(text_id).expect("text").content(), "memo");

    let err = apply(
        &mut project,
        &[Op::Recolor { element: text_id.into(), color: "#fff".to_owned() }],
    )
    .expect_err("texts have no color");
    assert_eq!(err, ApplyError::NotRecolorable { element: text_id.into() });
}

#[test]
fn data_fields_only_apply_to_data_model_nodes() {
    let mut project = Project::default();
    let delta = apply(
        &mut project,
        &[Op::CreateNode { kind: ShapeKind::DataModel, at: Point::default() }],
    )
    .expect("create");
    let node_id = delta.first_added_node().expect("node");
    let fields = vec![DataField::new("id", "int"), DataField::new("name", "string")];

    apply(&mut project, &[Op::SetDataFields { node_id, fields: fields.clone() }])
        .expect("fields");
    assert_eq!(project.node(node_id).and_then(|n| n.fields()), Some(fields.as_slice()));

    let (mut chain, [start, _, _], _) = linear_chain();
    let err = apply(&mut chain, &[Op::SetDataFields { node_id: start, fields }])
        .expect_err("not a data model");
    assert_eq!(err, ApplyError::NotDataModelNode { node_id: start });
}

#[test]
fn missing_elements_report_their_kind() {
    let mut project = Project::default();
    let err = apply(&mut project, &[Op::DeleteElement { element: EdgeId::new(7).into() }])
        .expect_err("missing");
    assert_eq!(err, ApplyError::NotFound { kind: ElementKind::Edge, id: 7 });
    assert_eq!(err.to_string(), "edge 7 not found");
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let mut project = Project::default();
    let err = apply(
        &mut project,
        &[Op::CreateText { at: Point::new(f64::NAN, 0.0), content: "x".to_owned() }],
    )
    .expect_err("nan");
    assert!(matches!(err, ApplyError::NonFiniteCoordinate { .. }));
    assert!(project.is_empty());
}

#[test]
fn project_metadata_ops() {
    let mut project = Project::default();
    apply(
        &mut project,
        &[
            Op::RenameProject { name: "Checkout".to_owned() },
            Op::SetPrivacy { is_private: true, password_hash: Some("abc".to_owned()) },
        ],
    )
    .expect("metadata");
    assert_eq!(project.name(), "Checkout");
    assert!(project.is_private());
    assert_eq!(project.password_hash(), Some("abc"));

    apply(&mut project, &[Op::SetPrivacy { is_private: false, password_hash: Some("x".into()) }])
        .expect("public");
    assert_eq!(project.password_hash(), None);
}

#[test]
fn ids_are_shared_across_element_kinds() {
    let mut project = Project::default();
    let delta = apply(
        &mut project,
        &[
            Op::CreateNode { kind: ShapeKind::Start, at: Point::default() },
            Op::CreateText { at: Point::default(), content: "t".to_owned() },
            Op::CreateNode { kind: ShapeKind::Stop, at: Point::new(200.0, 0.0) },
        ],
    )
    .expect("create");
    let raw = delta.added.iter().map(|element| element.raw_id()).collect::<Vec<_>>();
    assert_eq!(raw, vec![1, 3, 2]);
    assert_eq!(project.node_counter(), 4);
}
