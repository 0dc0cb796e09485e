//! Object-set comparison of two manifests.
//!
//! Objects are matched by [`ObjectKey`]. Objects on one side only are
//! reported as added or removed; objects on both sides that differ get a
//! header followed by a section-by-section diff.

use std::collections::BTreeMap;

use kdiff_manifest::{KubeObject, ObjectKey};
use kdiff_types::{Node, EMPTY_MAPPING};
use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::Differ;
use crate::equality::deep_equal;
use crate::error::DiffResult;
use crate::event::{DiffEvent, DiffSink};
use crate::path::Path;

/// Counts of objects by outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
}

impl ReportStats {
    /// Returns `true` if any object was added, removed or changed.
    pub fn has_differences(&self) -> bool {
        self.added + self.removed + self.changed > 0
    }
}

/// Compare two object collections and stream the report into `sink`.
///
/// Removed objects come first, then added ones, then the per-object diffs,
/// each group in key order.
pub fn render_report<'a, S>(
    differ: &Differ,
    old: &'a [KubeObject],
    new: &'a [KubeObject],
    sink: &mut S,
) -> DiffResult<ReportStats>
where
    S: DiffSink<'a> + ?Sized,
{
    let old = index_objects(old);
    let new = index_objects(new);
    debug!(old = old.len(), new = new.len(), "comparing object sets");

    let mut stats = ReportStats::default();

    for &object in old.keys().filter(|key| !new.contains_key(*key)) {
        sink.emit(DiffEvent::ObjectRemoved { object })?;
        stats.removed += 1;
    }
    for &object in new.keys().filter(|key| !old.contains_key(*key)) {
        sink.emit(DiffEvent::ObjectAdded { object })?;
        stats.added += 1;
    }

    for (&key, &a) in &old {
        let Some(&b) = new.get(key) else {
            continue;
        };
        if objects_equivalent(differ, a, b) {
            stats.unchanged += 1;
            continue;
        }
        stats.changed += 1;
        sink.emit(DiffEvent::ObjectHeader { object: key })?;
        diff_object(differ, a, b, sink)?;
    }

    Ok(stats)
}

/// Later objects replace earlier ones with the same key.
fn index_objects(objects: &[KubeObject]) -> BTreeMap<&ObjectKey, &KubeObject> {
    let mut index = BTreeMap::new();
    for object in objects {
        if index.insert(object.key(), object).is_some() {
            warn!(key = %object.key(), "duplicate object key, keeping the last definition");
        }
    }
    index
}

/// Compares exactly the sections [`diff_object`] walks.
fn objects_equivalent(differ: &Differ, a: &KubeObject, b: &KubeObject) -> bool {
    deep_equal(&a.api_version, &b.api_version)
        && deep_equal(&a.kind, &b.kind)
        && differ.equivalent(&a.metadata, &b.metadata)
        && sections_equivalent(differ, a.data.as_ref(), b.data.as_ref())
        && sections_equivalent(differ, a.spec.as_ref(), b.spec.as_ref())
}

fn sections_equivalent(differ: &Differ, a: Option<&Node>, b: Option<&Node>) -> bool {
    differ.equivalent(a.unwrap_or(&EMPTY_MAPPING), b.unwrap_or(&EMPTY_MAPPING))
}

fn diff_object<'a, S>(differ: &Differ, a: &'a KubeObject, b: &'a KubeObject, sink: &mut S) -> DiffResult<()>
where
    S: DiffSink<'a> + ?Sized,
{
    scalar_field("apiVersion", &a.api_version, &b.api_version, sink)?;
    scalar_field("kind", &a.kind, &b.kind, sink)?;
    section(differ, "metadata", Some(&a.metadata), Some(&b.metadata), sink)?;
    section(differ, "data", a.data.as_ref(), b.data.as_ref(), sink)?;
    section(differ, "spec", a.spec.as_ref(), b.spec.as_ref(), sink)
}

fn scalar_field<'a, S>(name: &'static str, a: &'a Node, b: &'a Node, sink: &mut S) -> DiffResult<()>
where
    S: DiffSink<'a> + ?Sized,
{
    let path = Path::root().key(name);
    if deep_equal(a, b) {
        sink.emit(DiffEvent::Unchanged { path, value: a })
    } else {
        sink.emit(DiffEvent::Modified {
            path,
            key: Some(name),
            old: a,
            new: b,
        })
    }
}

/// An absent side is compared as an empty mapping, so the other side's
/// content shows up as additions or removals.
fn section<'a, S>(
    differ: &Differ,
    name: &str,
    a: Option<&'a Node>,
    b: Option<&'a Node>,
    sink: &mut S,
) -> DiffResult<()>
where
    S: DiffSink<'a> + ?Sized,
{
    let path = Path::root().key(name);
    let Some(present) = a.or(b) else {
        return Ok(());
    };
    if sections_equivalent(differ, a, b) {
        return sink.emit(DiffEvent::Unchanged { path, value: present });
    }
    sink.emit(DiffEvent::Section { path: path.clone() })?;
    differ.diff(
        &path,
        a.unwrap_or(&EMPTY_MAPPING),
        b.unwrap_or(&EMPTY_MAPPING),
        sink,
    )
}
