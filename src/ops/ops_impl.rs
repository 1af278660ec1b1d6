// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Applies one op to the staged project. Any error aborts the whole batch, so partial writes to
/// `project` are never observed.
fn apply_op(project: &mut Project, op: &Op, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
    match op {
        Op::CreateNode { kind, at } => {
            ensure_finite(at.x, at.y)?;
            let node_id = NodeId::new(project.allocate_id());
            project.insert_node(Node::new(node_id, *kind, *at));
            delta.record_added(ElementRef::Node(node_id));
            if *kind == ShapeKind::Decision {
                for element in decision::attach_branches(project, node_id) {
                    delta.record_added(element);
                }
            }
            Ok(())
        }
        Op::CreateEdge { from, to, style } => {
            for node_id in [*from, *to] {
                if !project.contains_node(node_id) {
                    return Err(ApplyError::MissingNode { node_id });
                }
            }
            if project.node(*from).is_some_and(|node| node.is_decision()) {
                return Err(ApplyError::DecisionOutgoingRejected { node_id: *from });
            }
            if project.edge_between(*from, *to).is_some() {
                return Err(ApplyError::DuplicateEdge { from: *from, to: *to });
            }
            let edge_id = EdgeId::new(project.allocate_id());
            project.insert_edge(Edge::new(edge_id, *from, *to, *style));
            delta.record_added(ElementRef::Edge(edge_id));
            Ok(())
        }
        Op::CreateText { at, content } => {
            ensure_finite(at.x, at.y)?;
            let text_id = TextId::new(project.allocate_id());
            project.insert_text(TextLabel::new(text_id, *at, content.clone()));
            delta.record_added(ElementRef::Text(text_id));
            Ok(())
        }
        Op::DeleteElement { element } => delete_element(project, *element, delta),
        Op::MoveNode { node_id, dx, dy } => {
            ensure_finite(*dx, *dy)?;
            if !project.contains_node(*node_id) {
                return Err(ApplyError::not_found(ElementRef::Node(*node_id)));
            }
            translate_nodes(project, &[*node_id], *dx, *dy, delta);
            Ok(())
        }
        Op::GroupTranslate { elements, dx, dy } => {
            ensure_finite(*dx, *dy)?;
            let mut seen = HashSet::new();
            let mut node_ids = Vec::new();
            for element in elements {
                if !project.contains(*element) {
                    return Err(ApplyError::not_found(*element));
                }
                if !seen.insert(*element) {
                    continue;
                }
                match element {
                    ElementRef::Node(node_id) => node_ids.push(*node_id),
                    ElementRef::Text(text_id) => {
                        if let Some(text) = project.text_mut(*text_id) {
                            text.translate(*dx, *dy);
                            delta.record_updated(*element);
                        }
                    }
                    ElementRef::Edge(_) => {}
                }
            }
            translate_nodes(project, &node_ids, *dx, *dy, delta);
            Ok(())
        }
        Op::RenameElement { element, text } => match element {
            ElementRef::Node(node_id) => {
                let node = project
                    .node_mut(*node_id)
                    .ok_or_else(|| ApplyError::not_found(*element))?;
                node.set_label(text.clone());
                delta.record_updated(*element);
                Ok(())
            }
            ElementRef::Edge(edge_id) => {
                let edge = project
                    .edge_mut(*edge_id)
                    .ok_or_else(|| ApplyError::not_found(*element))?;
                if edge.is_robot_arm() {
                    return Err(ApplyError::RobotArmMutationRejected {
                        edge_id: *edge_id,
                        action: RobotArmAction::Rename,
                    });
                }
                edge.set_label(text.clone());
                delta.record_updated(*element);
                Ok(())
            }
            ElementRef::Text(text_id) => {
                let label = project
                    .text_mut(*text_id)
                    .ok_or_else(|| ApplyError::not_found(*element))?;
                label.set_content(text.clone());
                delta.record_updated(*element);
                Ok(())
            }
        },
        Op::Recolor { element, color } => {
            let ElementRef::Node(node_id) = element else {
                if !project.contains(*element) {
                    return Err(ApplyError::not_found(*element));
                }
                return Err(ApplyError::NotRecolorable { element: *element });
            };
            let node = project
                .node_mut(*node_id)
                .ok_or_else(|| ApplyError::not_found(*element))?;
            node.set_color(color.clone());
            delta.record_updated(*element);
            Ok(())
        }
        Op::SetDataFields { node_id, fields } => {
            let node = project
                .node_mut(*node_id)
                .ok_or_else(|| ApplyError::not_found(ElementRef::Node(*node_id)))?;
            if !node.set_fields(fields.clone()) {
                return Err(ApplyError::NotDataModelNode { node_id: *node_id });
            }
            delta.record_updated(ElementRef::Node(*node_id));
            Ok(())
        }
        Op::RotateDecision { node_id } => {
            if !project.contains_node(*node_id) {
                return Err(ApplyError::not_found(ElementRef::Node(*node_id)));
            }
            let Some((_, moves)) = decision::rotate(project, *node_id) else {
                return Err(ApplyError::NotDecisionNode { node_id: *node_id });
            };
            delta.record_updated(ElementRef::Node(*node_id));
            for (_, edge) in decision::branch_edges(project, *node_id) {
                delta.record_updated(ElementRef::Edge(edge.id()));
            }
            let mut displaced = NodeDisplacements::new();
            for m in moves {
                displaced.insert(m.node_id, (m.after.x - m.before.x, m.after.y - m.before.y));
                delta.record_updated(ElementRef::Node(m.node_id));
            }
            for edge_id in break_points::follow_node_moves(project, &displaced) {
                delta.record_updated(ElementRef::Edge(edge_id));
            }
            Ok(())
        }
        Op::ToggleEdgeStyle { edge_id } => {
            let edge = generic_edge_mut(project, *edge_id, RobotArmAction::Restyle)?;
            edge.set_style(edge.style().cycled());
            delta.record_updated(ElementRef::Edge(*edge_id));
            Ok(())
        }
        Op::AddBreakPoint { edge_id, point } => {
            ensure_finite(point.x, point.y)?;
            generic_edge_mut(project, *edge_id, RobotArmAction::EditBreakPoints)?;
            let path = compute_path(project, *edge_id)
                .map_err(|_| ApplyError::not_found(ElementRef::Edge(*edge_id)))?;
            let index = break_points::insertion_index(&path, *point);
            let edge = generic_edge_mut(project, *edge_id, RobotArmAction::EditBreakPoints)?;
            let points = edge.break_points_mut();
            points.insert(index.min(points.len()), *point);
            delta.record_updated(ElementRef::Edge(*edge_id));
            Ok(())
        }
        Op::RemoveBreakPoint { edge_id, index } => {
            let edge = generic_edge_mut(project, *edge_id, RobotArmAction::EditBreakPoints)?;
            let len = edge.break_points().len();
            if *index >= len {
                return Err(ApplyError::BreakPointIndexOutOfRange {
                    edge_id: *edge_id,
                    index: *index,
                    len,
                });
            }
            edge.break_points_mut().remove(*index);
            delta.record_updated(ElementRef::Edge(*edge_id));
            Ok(())
        }
        Op::ClearBreakPoints { edge_id } => {
            let edge = generic_edge_mut(project, *edge_id, RobotArmAction::EditBreakPoints)?;
            if !edge.break_points().is_empty() {
                edge.break_points_mut().clear();
                delta.record_updated(ElementRef::Edge(*edge_id));
            }
            Ok(())
        }
        Op::RenameProject { name } => {
            project.set_name(name.clone());
            Ok(())
        }
        Op::SetPrivacy { is_private, password_hash } => {
            let password_hash = if *is_private { password_hash.clone() } else { None };
            project.set_privacy(*is_private, password_hash);
            Ok(())
        }
    }
}

fn ensure_finite(x: f64, y: f64) -> Result<(), ApplyError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(ApplyError::NonFiniteCoordinate { x, y })
    }
}

fn generic_edge_mut(
    project: &mut Project,
    edge_id: EdgeId,
    action: RobotArmAction,
) -> Result<&mut Edge, ApplyError> {
    let edge = project
        .edge_mut(edge_id)
        .ok_or_else(|| ApplyError::not_found(ElementRef::Edge(edge_id)))?;
    if edge.is_robot_arm() {
        return Err(ApplyError::RobotArmMutationRejected { edge_id, action });
    }
    Ok(edge)
}

/// Translates `node_ids`, re-snaps the branches of every moved decision node and shifts break
/// points of edges attached to anything that moved.
fn translate_nodes(
    project: &mut Project,
    node_ids: &[NodeId],
    dx: f64,
    dy: f64,
    delta: &mut DeltaBuilder,
) {
    let mut displaced = NodeDisplacements::new();
    let mut decisions = Vec::new();
    for node_id in node_ids {
        let Some(node) = project.node_mut(*node_id) else {
            continue;
        };
        node.translate(dx, dy);
        if node.is_decision() {
            decisions.push(*node_id);
        }
        displaced.insert(*node_id, (dx, dy));
        delta.record_updated(ElementRef::Node(*node_id));
    }

    for decision_id in decisions {
        for m in decision::sync_on_move(project, decision_id) {
            let entry = displaced.entry(m.node_id).or_insert((0.0, 0.0));
            entry.0 += m.after.x - m.before.x;
            entry.1 += m.after.y - m.before.y;
            delta.record_updated(ElementRef::Node(m.node_id));
        }
    }

    for edge_id in break_points::follow_node_moves(project, &displaced) {
        delta.record_updated(ElementRef::Edge(edge_id));
    }
}

fn delete_element(
    project: &mut Project,
    element: ElementRef,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match element {
        ElementRef::Node(node_id) => {
            let Some(node) = project.node(node_id) else {
                return Err(ApplyError::not_found(element));
            };
            if let Some(owner) = decision::owning_decision(project, node_id) {
                let edge_id = project
                    .edge_between(owner, node_id)
                    .map(|edge| edge.id())
                    .ok_or_else(|| ApplyError::not_found(element))?;
                return Err(ApplyError::RobotArmMutationRejected {
                    edge_id,
                    action: RobotArmAction::DeleteBranchNode,
                });
            }

            let mut doomed = vec![node_id];
            if node.is_decision() {
                doomed.extend(
                    decision::branch_edges(project, node_id)
                        .into_iter()
                        .map(|(_, edge)| edge.to()),
                );
            }

            let doomed_edges = project
                .edges()
                .filter(|edge| doomed.iter().any(|id| edge.touches(*id)))
                .map(|edge| edge.id())
                .collect::<Vec<_>>();
            for edge_id in doomed_edges {
                project.remove_edge(edge_id);
                delta.record_removed(ElementRef::Edge(edge_id));
            }
            for id in doomed {
                if project.remove_node(id).is_some() {
                    delta.record_removed(ElementRef::Node(id));
                }
            }
            Ok(())
        }
        ElementRef::Edge(edge_id) => {
            let Some(edge) = project.edge(edge_id) else {
                return Err(ApplyError::not_found(element));
            };
            if edge.is_robot_arm() {
                return Err(ApplyError::RobotArmMutationRejected {
                    edge_id,
                    action: RobotArmAction::Delete,
                });
            }
            project.remove_edge(edge_id);
            delta.record_removed(element);
            Ok(())
        }
        ElementRef::Text(text_id) => {
            if project.remove_text(text_id).is_none() {
                return Err(ApplyError::not_found(element));
            }
            delta.record_removed(element);
            Ok(())
        }
    }
}
