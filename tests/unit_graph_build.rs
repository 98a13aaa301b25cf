// tests/unit_graph_build.rs
//! Tests for event replay into the registry graph.

use chrono::NaiveDate;
use registry_centrality::error::{CentralityError, Result};
use registry_centrality::events::{Action, Event, RelationKind};
use registry_centrality::graph::{
    queries, BuilderConfig, EdgeFlags, EventEffect, GraphBuilder, NodeKey, NodeKind,
    ReplayOutcome,
};
use std::collections::BTreeSet;

fn ev(date: &str, action: Action, relation: RelationKind, subject: &str, object: &str) -> Event {
    Event::new(subject, "1.0.0", date, action, relation, object).unwrap()
}

fn source(events: Vec<Event>) -> impl Iterator<Item = Result<Event>> {
    events.into_iter().map(Ok)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn history() -> Vec<Event> {
    use Action::{Add, Delete};
    use RelationKind::{Dependency, DevDependency};
    vec![
        ev("2020-01-03T08:00:00Z", Add, Dependency, "app", "lodash"),
        ev("2020-01-10T08:00:00Z", Add, DevDependency, "app", "mocha"),
        ev("2020-01-20T08:00:00Z", Add, Dependency, "lib", "lodash"),
        ev("2020-02-02T08:00:00Z", Add, DevDependency, "app", "lodash"),
        ev("2020-02-15T08:00:00Z", Delete, Dependency, "app", "lodash"),
        ev("2020-02-20T08:00:00Z", Add, Dependency, "lib", "chalk"),
        ev("2020-03-01T08:00:00Z", Delete, Dependency, "lib", "lodash"),
        ev("2020-03-05T08:00:00Z", Add, Dependency, "app", "chalk"),
        ev("2020-03-09T08:00:00Z", Delete, DevDependency, "app", "mocha"),
        ev("2020-04-02T08:00:00Z", Add, Dependency, "tool", "app"),
        ev("2020-05-01T08:00:00Z", Add, Dependency, "tool", "lib"),
    ]
}

fn flags(prod: bool, dev: bool) -> EdgeFlags {
    EdgeFlags { prod, dev }
}

fn empty_builder() -> GraphBuilder<std::vec::IntoIter<Result<Event>>> {
    GraphBuilder::new(Vec::new().into_iter(), &BuilderConfig::default())
}

#[test]
fn test_replay_in_steps_matches_single_replay() {
    let t2 = day(2020, 5, 1);
    let mut direct = GraphBuilder::new(source(history()), &BuilderConfig::default());
    assert_eq!(direct.replay_until(t2).unwrap(), ReplayOutcome::BoundaryReached);
    let expected = direct.graph().edge_list();

    for t1 in [day(2020, 2, 1), day(2020, 3, 1), day(2020, 4, 1)] {
        let mut stepped = GraphBuilder::new(source(history()), &BuilderConfig::default());
        stepped.replay_until(t1).unwrap();
        stepped.replay_until(t2).unwrap();
        assert_eq!(stepped.graph().edge_list(), expected, "split at {t1}");
    }

    let g = direct.graph();
    assert_eq!(g.edge_count(), 4);
    assert_eq!(
        g.edge_between(&NodeKey::package("app"), &NodeKey::package("lodash")),
        Some(flags(false, true))
    );
    assert_eq!(
        g.edge_between(&NodeKey::package("tool"), &NodeKey::package("app")),
        Some(flags(true, false))
    );
    assert_eq!(
        g.edge_between(&NodeKey::package("lib"), &NodeKey::package("lodash")),
        None
    );
}

#[test]
fn test_boundary_is_normalized_to_month_start() {
    let mut builder = GraphBuilder::new(source(history()), &BuilderConfig::default());
    builder.replay_until(day(2020, 2, 27)).unwrap();
    // Only January is applied; the Feb 2 event is pending.
    assert_eq!(builder.graph().edge_count(), 3);
    assert_eq!(builder.pending().map(|e| e.day), Some(day(2020, 2, 2)));
}

#[test]
fn test_prod_and_dev_share_one_edge() {
    let mut builder = empty_builder();
    let app = NodeKey::package("app");
    let lodash = NodeKey::package("lodash");

    builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "app", "lodash"));
    builder.apply_event(&ev("2020-01-02", Action::Add, RelationKind::DevDependency, "app", "lodash"));
    assert_eq!(builder.graph().edge_between(&app, &lodash), Some(flags(true, true)));
    assert_eq!(builder.graph().edge_count(), 1);

    builder.apply_event(&ev("2020-01-03", Action::Delete, RelationKind::Dependency, "app", "lodash"));
    assert_eq!(builder.graph().edge_between(&app, &lodash), Some(flags(false, true)));

    builder.apply_event(&ev("2020-01-04", Action::Delete, RelationKind::DevDependency, "app", "lodash"));
    assert_eq!(builder.graph().edge_between(&app, &lodash), None);
    assert_eq!(builder.graph().edge_count(), 0);
    // Nodes are never removed.
    assert_eq!(builder.graph().node_count(), 2);
}

#[test]
fn test_delete_without_add_is_logged_and_ignored() {
    let mut builder = empty_builder();
    let effect =
        builder.apply_event(&ev("2020-01-01", Action::Delete, RelationKind::Dependency, "a", "b"));

    assert_eq!(effect, EventEffect::MissingEdge);
    assert_eq!(builder.graph().node_count(), 0);
    assert_eq!(builder.graph().edge_count(), 0);
    assert_eq!(builder.stats().missing_deletes, 1);

    // Existing nodes, missing edge.
    builder.apply_event(&ev("2020-01-02", Action::Add, RelationKind::Dependency, "a", "b"));
    let effect =
        builder.apply_event(&ev("2020-01-03", Action::Delete, RelationKind::Dependency, "b", "a"));
    assert_eq!(effect, EventEffect::MissingEdge);
    assert_eq!(builder.graph().edge_count(), 1);
    assert_eq!(builder.stats().missing_deletes, 2);
}

#[test]
fn test_invalid_identifiers_are_dropped() {
    let mut builder = empty_builder();
    for object in ["", ".hidden", "_under", "node_modules", "has space", "a/b"] {
        let effect =
            builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "app", object));
        assert_eq!(effect, EventEffect::Dropped, "object {object:?}");
    }
    let effect = builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "", "x"));
    assert_eq!(effect, EventEffect::Dropped);

    assert_eq!(builder.graph().node_count(), 0);
    assert_eq!(builder.stats().dropped, 7);
    assert_eq!(builder.stats().missing_deletes, 0);
}

#[test]
fn test_invalid_subjects_are_dropped() {
    let mut builder = empty_builder();
    for subject in ["../escaped", "a/../b", ".git", "@scope/.hidden", "with space"] {
        let effect = builder.apply_event(&ev(
            "2020-01-01",
            Action::Add,
            RelationKind::Dependency,
            subject,
            "lodash",
        ));
        assert_eq!(effect, EventEffect::Dropped, "subject {subject:?}");
    }

    assert_eq!(builder.graph().node_count(), 0);
    assert_eq!(builder.stats().dropped, 5);
}

#[test]
fn test_scoped_dependency_is_accepted() {
    let mut builder = empty_builder();
    let effect = builder
        .apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "app", "@babel/core"));
    assert_eq!(effect, EventEffect::Applied);
    assert!(builder
        .graph()
        .node_id(&NodeKey::package("@babel/core"))
        .is_some());
}

#[test]
fn test_untracked_node_kinds_are_ignored() {
    let mut builder = empty_builder();
    let effect =
        builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Maintainer, "app", "alice"));
    assert_eq!(effect, EventEffect::Dropped);
    assert_eq!(builder.graph().node_count(), 0);
}

#[test]
fn test_tracked_non_package_kinds_are_sanitized() {
    let config = BuilderConfig {
        directed: true,
        targets: BTreeSet::from([NodeKind::Package, NodeKind::License, NodeKind::Developer]),
    };
    let mut builder = GraphBuilder::new(source(Vec::new()), &config);

    builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::License, "app", "MIT\u{7}"));
    builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Maintainer, "app", "Alice Smith"));

    let app = NodeKey::package("app");
    let mit = NodeKey::new(NodeKind::License, "MIT");
    assert_eq!(builder.graph().edge_between(&app, &mit), Some(EdgeFlags::default()));
    assert!(builder
        .graph()
        .node_id(&NodeKey::new(NodeKind::Developer, "Alice Smith"))
        .is_some());

    // A plain edge goes away on delete.
    builder.apply_event(&ev("2020-01-02", Action::Delete, RelationKind::License, "app", "MIT"));
    assert_eq!(builder.graph().edge_between(&app, &mit), None);
}

#[test]
fn test_pending_event_at_boundary_is_an_error() {
    let events = vec![
        ev("2020-01-05", Action::Add, RelationKind::Dependency, "a", "b"),
        ev("2020-03-03", Action::Add, RelationKind::Dependency, "c", "b"),
    ];
    let mut builder = GraphBuilder::new(source(events), &BuilderConfig::default());

    assert_eq!(
        builder.replay_until(day(2020, 2, 1)).unwrap(),
        ReplayOutcome::BoundaryReached
    );
    let err = builder.replay_until(day(2020, 3, 1)).unwrap_err();
    assert!(matches!(
        err,
        CentralityError::BoundaryNotAdvanced { pending, .. } if pending == day(2020, 3, 3)
    ));

    // The pending event is kept, not lost.
    assert_eq!(
        builder.replay_until(day(2020, 4, 1)).unwrap(),
        ReplayOutcome::Exhausted
    );
    assert_eq!(builder.graph().edge_count(), 2);
    assert!(builder.pending().is_none());
}

#[test]
fn test_source_errors_propagate() {
    let events: Vec<Result<Event>> = vec![
        Ok(ev("2020-01-05", Action::Add, RelationKind::Dependency, "a", "b")),
        Err(CentralityError::Config("boom".to_string())),
    ];
    let mut builder = GraphBuilder::new(events.into_iter(), &BuilderConfig::default());
    assert!(builder.replay_until(day(2021, 1, 1)).is_err());
}

#[test]
fn test_undirected_graph_shares_edges() {
    let config = BuilderConfig {
        directed: false,
        ..BuilderConfig::default()
    };
    let mut builder = GraphBuilder::new(source(Vec::new()), &config);
    builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "a", "b"));
    builder.apply_event(&ev("2020-01-02", Action::Add, RelationKind::DevDependency, "b", "a"));

    let g = builder.graph();
    assert_eq!(g.edge_count(), 1);
    assert_eq!(
        g.edge_between(&NodeKey::package("a"), &NodeKey::package("b")),
        Some(flags(true, true))
    );

    builder.apply_event(&ev("2020-01-03", Action::Delete, RelationKind::DevDependency, "a", "b"));
    builder.apply_event(&ev("2020-01-03", Action::Delete, RelationKind::Dependency, "b", "a"));
    assert_eq!(builder.graph().edge_count(), 0);
}

#[test]
fn test_isolated_nodes_and_main_component() {
    let mut builder = empty_builder();
    builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "a", "b"));
    builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "c", "b"));
    builder.apply_event(&ev("2020-01-01", Action::Add, RelationKind::Dependency, "x", "y"));
    builder.apply_event(&ev("2020-01-02", Action::Delete, RelationKind::Dependency, "x", "y"));

    let g = builder.graph();
    let isolated: Vec<_> = queries::isolated_nodes(g)
        .into_iter()
        .map(|id| g.key(id).name.clone())
        .collect();
    assert_eq!(isolated, vec!["x", "y"]);

    let main: Vec<_> = queries::main_component(g)
        .into_iter()
        .map(|id| g.key(id).name.clone())
        .collect();
    assert_eq!(main, vec!["a", "b", "c"]);

    let b = g.node_id(&NodeKey::package("b")).unwrap();
    assert_eq!(queries::dependents(g, b).len(), 2);
}
