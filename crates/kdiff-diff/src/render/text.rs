//! Human-readable report lines.

use std::io::Write;

use kdiff_manifest::ObjectKey;
use kdiff_types::Node;

use super::palette::{Palette, Tone};
use super::pretty::write_node;
use super::INDENT;
use crate::error::DiffResult;
use crate::event::{DiffEvent, DiffSink};
use crate::format::format_value;
use crate::path::{Path, Segment};

/// Writes events as indented, annotated text.
///
/// Markers: `+` added, `-` removed, `~` changed child follows, `~~`/`~>` old
/// and new value, `!` taint on structural changes of an identity list.
pub struct TextRenderer<W, P> {
    out: W,
    palette: P,
}

impl<W: Write, P: Palette> TextRenderer<W, P> {
    pub fn new(out: W, palette: P) -> Self {
        Self { out, palette }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, depth: usize, text: &str) -> DiffResult<()> {
        writeln!(self.out, "{}{}", INDENT.repeat(depth), text)?;
        Ok(())
    }

    fn painted(&mut self, depth: usize, tone: Tone, text: &str) -> DiffResult<()> {
        let text = self.palette.paint(tone, text);
        self.line(depth, &text)
    }

    fn unchanged(&mut self, path: &Path, value: &Node) -> DiffResult<()> {
        let depth = label_depth(path);
        let label = label(path);
        match value {
            Node::Scalar(scalar) => self.line(depth, &format!("{label}: {scalar}")),
            _ => {
                self.line(depth, &format!("{label}:"))?;
                write_node(&mut self.out, depth + 1, value)?;
                Ok(())
            }
        }
    }

    fn structural(
        &mut self,
        path: &Path,
        tone: Tone,
        marker: &str,
        value: &Node,
        tainted: bool,
    ) -> DiffResult<()> {
        let mut text = self.palette.paint(tone, &format!("{marker} "));
        if tainted {
            text.push_str(&self.palette.paint(Tone::Taint, "! "));
        }
        text.push_str(&self.palette.paint(tone, &format!("{}: {}", label(path), format_value(value))));
        self.line(label_depth(path), &text)
    }
}

impl<'a, W: Write, P: Palette> DiffSink<'a> for TextRenderer<W, P> {
    fn emit(&mut self, event: DiffEvent<'a>) -> DiffResult<()> {
        match event {
            DiffEvent::ObjectRemoved { object } => {
                self.painted(0, Tone::Removal, &format!("- {} (removed)", object_title(object)))
            }
            DiffEvent::ObjectAdded { object } => {
                self.painted(0, Tone::Addition, &format!("+ {} (added)", object_title(object)))
            }
            DiffEvent::ObjectHeader { .. } => {
                writeln!(self.out)?;
                self.line(0, "---")
            }
            DiffEvent::Section { path } => {
                self.painted(label_depth(&path), Tone::Modification, &format!("{}:", label(&path)))
            }
            DiffEvent::Unchanged { path, value } => self.unchanged(&path, value),
            DiffEvent::Added { path, value } => self.painted(
                label_depth(&path),
                Tone::Addition,
                &format!("+ {}: {}", label(&path), format_value(value)),
            ),
            DiffEvent::Removed { path, value } => self.painted(
                label_depth(&path),
                Tone::Removal,
                &format!("- {}: {}", label(&path), format_value(value)),
            ),
            DiffEvent::Nested { path } => {
                let text = match path.last() {
                    Some(Segment::Index(i)) => format!("[{i}]:"),
                    _ => format!("~ {}:", label(&path)),
                };
                self.painted(label_depth(&path), Tone::Modification, &text)
            }
            DiffEvent::Modified { path, key: Some(key), old, new } => {
                let depth = label_depth(&path);
                self.painted(depth, Tone::Modification, &format!("~~ {key}: {}", format_value(old)))?;
                self.painted(depth, Tone::Modification, &format!("~> {key}: {}", format_value(new)))
            }
            DiffEvent::Modified { path, key: None, old, new } => {
                let depth = path.depth();
                self.painted(depth, Tone::Modification, &format!("~~ {}", format_value(old)))?;
                self.painted(depth, Tone::Modification, &format!("~> {}", format_value(new)))
            }
            DiffEvent::StructuralAddition { path, value, tainted, .. } => {
                self.structural(&path, Tone::Addition, "+", value, tainted)
            }
            DiffEvent::StructuralRemoval { path, value, tainted, .. } => {
                self.structural(&path, Tone::Removal, "-", value, tainted)
            }
        }
    }
}

/// Labeled lines sit at their parent's depth.
fn label_depth(path: &Path) -> usize {
    path.depth().saturating_sub(1)
}

fn label(path: &Path) -> String {
    match path.last() {
        Some(Segment::Key(key)) => key.clone(),
        Some(Segment::Index(i)) => format!("[{i}]"),
        Some(Segment::Identity { label, id }) => format!("{label} '{id}'"),
        None => String::new(),
    }
}

fn object_title(key: &ObjectKey) -> String {
    match key.namespace() {
        Some(ns) => format!("{} {}/{}", key.kind(), ns, key.name()),
        None => format!("{} {}", key.kind(), key.name()),
    }
}
