// src/graph/builder.rs
//! Event replay into the registry graph.
//!
//! The builder owns the event source and at most one pending event: the first
//! event found at or after the last requested boundary. That event is applied
//! at the start of the next replay, so windows neither drop nor repeat events.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::kinds::{self, EdgeSemantics, NodeKey, NodeKind};
use super::model::{EdgeFlags, PackageGraph};
use super::names;
use crate::dates;
use crate::error::{CentralityError, Result};
use crate::events::{Action, Event};

/// Graph shape and the node kinds that take part in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    pub directed: bool,
    pub targets: BTreeSet<NodeKind>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            directed: true,
            targets: BTreeSet::from([NodeKind::Package]),
        }
    }
}

/// How a `replay_until` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// An event at or after the boundary was found and is held as pending.
    BoundaryReached,
    /// The source ran out before any event reached the boundary.
    Exhausted,
}

/// What `apply_event` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEffect {
    Applied,
    /// Filtered out: untracked node kind, empty or invalid identifier.
    Dropped,
    /// Delete of an edge that does not exist.
    MissingEdge,
}

/// Running counters over every event the builder has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub applied: usize,
    pub dropped: usize,
    pub missing_deletes: usize,
}

pub struct GraphBuilder<S> {
    graph: PackageGraph,
    source: S,
    pending: Option<Event>,
    targets: BTreeSet<NodeKind>,
    stats: ReplayStats,
}

impl<S> GraphBuilder<S> {
    #[must_use]
    pub fn new(source: S, config: &BuilderConfig) -> Self {
        Self {
            graph: PackageGraph::new(config.directed),
            source,
            pending: None,
            targets: config.targets.clone(),
            stats: ReplayStats::default(),
        }
    }

    #[must_use]
    pub fn graph(&self) -> &PackageGraph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> PackageGraph {
        self.graph
    }

    #[must_use]
    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// The event carried over to the next window, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&Event> {
        self.pending.as_ref()
    }

    /// Applies one event to the graph.
    pub fn apply_event(&mut self, event: &Event) -> EventEffect {
        let effect = self.apply_inner(event);
        match effect {
            EventEffect::Applied => self.stats.applied += 1,
            EventEffect::Dropped => self.stats.dropped += 1,
            EventEffect::MissingEdge => {
                self.stats.missing_deletes += 1;
                tracing::warn!(
                    "Cannot delete {} edge {} -> {} ({}): edge does not exist",
                    event.relation,
                    event.subject,
                    event.object,
                    event.date
                );
            }
        }
        effect
    }

    fn apply_inner(&mut self, event: &Event) -> EventEffect {
        let (kind, semantics) = kinds::resolve(event.relation);
        if !self.targets.contains(&kind) {
            return EventEffect::Dropped;
        }
        let Some((subject, object)) = resolve_keys(event, kind) else {
            return EventEffect::Dropped;
        };

        match event.action {
            Action::Add => {
                self.add_edge(subject, object, semantics);
                EventEffect::Applied
            }
            Action::Delete => self.delete_edge(&subject, &object, semantics),
        }
    }

    fn add_edge(&mut self, subject: NodeKey, object: NodeKey, semantics: EdgeSemantics) {
        let u = self.graph.ensure_node(subject);
        let v = self.graph.ensure_node(object);
        let mut flags = self.graph.edge(u, v).unwrap_or_default();
        match semantics {
            EdgeSemantics::Prod => flags.prod = true,
            EdgeSemantics::Dev => flags.dev = true,
            EdgeSemantics::Plain => {}
        }
        self.graph.set_edge(u, v, flags);
    }

    fn delete_edge(
        &mut self,
        subject: &NodeKey,
        object: &NodeKey,
        semantics: EdgeSemantics,
    ) -> EventEffect {
        let (Some(u), Some(v)) = (self.graph.node_id(subject), self.graph.node_id(object)) else {
            return EventEffect::MissingEdge;
        };
        let Some(flags) = self.graph.edge(u, v) else {
            return EventEffect::MissingEdge;
        };

        match semantics {
            EdgeSemantics::Prod if flags.dev => {
                self.graph.set_edge(u, v, EdgeFlags { prod: false, ..flags });
            }
            EdgeSemantics::Dev if flags.prod => {
                self.graph.set_edge(u, v, EdgeFlags { dev: false, ..flags });
            }
            _ => {
                self.graph.remove_edge(u, v);
            }
        }
        EventEffect::Applied
    }
}

impl<S> GraphBuilder<S>
where
    S: Iterator<Item = Result<Event>>,
{
    /// Replays events dated before the first of `boundary`'s month.
    ///
    /// # Errors
    /// Returns `BoundaryNotAdvanced` if the pending event already lies at or
    /// past the boundary, and propagates source errors.
    pub fn replay_until(&mut self, boundary: NaiveDate) -> Result<ReplayOutcome> {
        let boundary = dates::month_start(boundary);
        tracing::info!("Building graph until: {boundary}");

        if let Some(pending) = self.pending.take() {
            if pending.day >= boundary {
                let day = pending.day;
                self.pending = Some(pending);
                return Err(CentralityError::BoundaryNotAdvanced {
                    boundary,
                    pending: day,
                });
            }
            self.apply_event(&pending);
        }

        while let Some(event) = self.source.next() {
            let event = event?;
            if event.day >= boundary {
                self.pending = Some(event);
                return Ok(ReplayOutcome::BoundaryReached);
            }
            self.apply_event(&event);
        }

        Ok(ReplayOutcome::Exhausted)
    }
}

/// Builds the subject and object keys, or `None` if either is unusable.
///
/// The subject is always a package and must be a valid package name.
fn resolve_keys(event: &Event, kind: NodeKind) -> Option<(NodeKey, NodeKey)> {
    if event.object.is_empty() || !names::is_valid_package_name(&event.subject) {
        return None;
    }

    let object = if kind == NodeKind::Package {
        if !names::is_valid_package_name(&event.object) {
            return None;
        }
        event.object.clone()
    } else {
        let clean = names::sanitize(&event.object);
        if clean.is_empty() {
            return None;
        }
        clean
    };

    Some((NodeKey::package(&event.subject), NodeKey::new(kind, object)))
}
