//! Recursive diff dispatch over node shapes.
//!
//! Two values at the same path are compared as mappings (key by key), as
//! identity lists (element by element identity), as positional lists (index
//! by index) or, for anything else, replaced as a whole.

use std::collections::{BTreeMap, BTreeSet};

use kdiff_types::{Mapping, Node};
use tracing::debug;

use crate::equality::deep_equal;
use crate::error::DiffResult;
use crate::event::{DiffEvent, DiffSink};
use crate::identity::IdentityRule;
use crate::path::Path;

/// How a pair of unequal values is compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Both are mappings: key union, recurse on shared keys.
    Mapping,
    /// Both are lists and at least one is not an identity list.
    PositionalList,
    /// Both are identity lists.
    IdentityList,
    /// Shapes differ or the values are scalars: whole-value replacement.
    Replacement,
}

/// The recursive diff engine.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    rule: IdentityRule,
}

impl Differ {
    pub fn new(rule: IdentityRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &IdentityRule {
        &self.rule
    }

    /// Returns `true` when diffing `a` against `b` reports nothing.
    ///
    /// This is [`deep_equal`] except that identity lists are compared by
    /// element identity, so reordering named elements is not a difference.
    /// Lists whose elements cannot all be matched by identity are compared
    /// by position, as [`Differ::diff`] does.
    pub fn equivalent(&self, a: &Node, b: &Node) -> bool {
        if deep_equal(a, b) {
            return true;
        }
        match (a, b) {
            (Node::Mapping(x), Node::Mapping(y)) => {
                x.len() == y.len()
                    && x.iter()
                        .all(|(key, v)| y.get(key).is_some_and(|w| self.equivalent(v, w)))
            }
            (Node::List(x), Node::List(y)) => {
                if x.len() != y.len() {
                    return false;
                }
                if self.rule.is_identity_list(x) && self.rule.is_identity_list(y) {
                    if let (Some(old), Some(new)) = (self.rule.index(x), self.rule.index(y)) {
                        return old
                            .iter()
                            .all(|(id, v)| new.get(id).is_some_and(|w| self.equivalent(v, w)));
                    }
                }
                x.iter().zip(y).all(|(v, w)| self.equivalent(v, w))
            }
            _ => false,
        }
    }

    /// Pick the comparison for `a` and `b`, or `None` when they are
    /// [equivalent](Differ::equivalent).
    ///
    /// The choice depends only on the shapes of the two values. An
    /// [`Strategy::IdentityList`] pair whose elements cannot all be matched by
    /// identity is still compared positionally by [`Differ::diff`].
    pub fn strategy(&self, a: &Node, b: &Node) -> Option<Strategy> {
        if self.equivalent(a, b) {
            return None;
        }
        Some(match (a, b) {
            (Node::Mapping(_), Node::Mapping(_)) => Strategy::Mapping,
            (Node::List(x), Node::List(y)) => {
                if self.rule.is_identity_list(x) && self.rule.is_identity_list(y) {
                    Strategy::IdentityList
                } else {
                    Strategy::PositionalList
                }
            }
            _ => Strategy::Replacement,
        })
    }

    /// Compare `a` (old) with `b` (new) at `path`, emitting events into `sink`.
    ///
    /// Equivalent values emit nothing.
    pub fn diff<'a, S>(&self, path: &Path, a: &'a Node, b: &'a Node, sink: &mut S) -> DiffResult<()>
    where
        S: DiffSink<'a> + ?Sized,
    {
        let Some(strategy) = self.strategy(a, b) else {
            return Ok(());
        };
        match (strategy, a, b) {
            (Strategy::Mapping, Node::Mapping(x), Node::Mapping(y)) => {
                self.diff_mappings(path, x, y, sink)
            }
            (Strategy::IdentityList, Node::List(x), Node::List(y)) => {
                match (self.rule.index(x), self.rule.index(y)) {
                    (Some(old), Some(new)) => {
                        let tainted = x.len() != y.len();
                        self.diff_identities(path, &old, &new, tainted, sink)
                    }
                    _ => {
                        debug!(%path, "identity list has unmatched elements, comparing by position");
                        self.diff_positions(path, a, b, sink)
                    }
                }
            }
            (Strategy::PositionalList, Node::List(_), Node::List(_)) => {
                self.diff_positions(path, a, b, sink)
            }
            _ => sink.emit(DiffEvent::Modified {
                path: path.clone(),
                key: None,
                old: a,
                new: b,
            }),
        }
    }

    fn diff_mappings<'a, S>(
        &self,
        path: &Path,
        old: &'a Mapping,
        new: &'a Mapping,
        sink: &mut S,
    ) -> DiffResult<()>
    where
        S: DiffSink<'a> + ?Sized,
    {
        let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
        for key in keys {
            let child = path.key(key);
            match (old.get(key), new.get(key)) {
                (None, Some(value)) => sink.emit(DiffEvent::Added { path: child, value })?,
                (Some(value), None) => sink.emit(DiffEvent::Removed { path: child, value })?,
                (Some(a), Some(b)) if !self.equivalent(a, b) => {
                    sink.emit(DiffEvent::Nested { path: child.clone() })?;
                    self.diff(&child, a, b, sink)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Lists of different lengths are replaced as a whole; there is no
    /// attempt to align elements.
    fn diff_positions<'a, S>(&self, path: &Path, a: &'a Node, b: &'a Node, sink: &mut S) -> DiffResult<()>
    where
        S: DiffSink<'a> + ?Sized,
    {
        let (Some(old), Some(new)) = (a.as_list(), b.as_list()) else {
            return Ok(());
        };
        if old.len() != new.len() {
            return sink.emit(DiffEvent::Modified {
                path: path.clone(),
                key: None,
                old: a,
                new: b,
            });
        }
        for (i, (x, y)) in old.iter().zip(new).enumerate() {
            if !self.equivalent(x, y) {
                let child = path.index(i);
                sink.emit(DiffEvent::Nested { path: child.clone() })?;
                self.diff(&child, x, y, sink)?;
            }
        }
        Ok(())
    }

    /// Presence changes carry `tainted`; modifications of an element present
    /// on both sides never do.
    fn diff_identities<'a, S>(
        &self,
        path: &Path,
        old: &BTreeMap<&'a str, &'a Node>,
        new: &BTreeMap<&'a str, &'a Node>,
        tainted: bool,
        sink: &mut S,
    ) -> DiffResult<()>
    where
        S: DiffSink<'a> + ?Sized,
    {
        let ids: BTreeSet<&'a str> = old.keys().chain(new.keys()).copied().collect();
        for id in ids {
            let child = path.identity(&self.rule.label, id);
            match (old.get(id).copied(), new.get(id).copied()) {
                (None, Some(value)) => sink.emit(DiffEvent::StructuralAddition {
                    path: child,
                    identity: id,
                    value,
                    tainted,
                })?,
                (Some(value), None) => sink.emit(DiffEvent::StructuralRemoval {
                    path: child,
                    identity: id,
                    value,
                    tainted,
                })?,
                (Some(a), Some(b)) if !self.equivalent(a, b) => {
                    sink.emit(DiffEvent::Nested { path: child.clone() })?;
                    self.diff(&child, a, b, sink)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
