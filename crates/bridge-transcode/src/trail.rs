//! Location tracking for recursive conversions.
//!
//! A `Trail` is a stack-allocated linked list from the current value back
//! to the root. It costs nothing until an error needs the rendered path.

use std::fmt;

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Trail<'a> {
    parent: Option<&'a Trail<'a>>,
    segment: Segment<'a>,
    /// Number of containers between the root and this location.
    depth: usize,
}

impl<'a> Trail<'a> {
    pub(crate) fn root() -> Trail<'static> {
        Trail {
            parent: None,
            segment: Segment::Root,
            depth: 0,
        }
    }

    pub(crate) fn key(&'a self, key: &'a str) -> Trail<'a> {
        Trail {
            parent: Some(self),
            segment: Segment::Key(key),
            depth: self.depth + 1,
        }
    }

    pub(crate) fn index(&'a self, index: usize) -> Trail<'a> {
        Trail {
            parent: Some(self),
            segment: Segment::Index(index),
            depth: self.depth + 1,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    fn segments(&self) -> Vec<Segment<'a>> {
        let mut out = Vec::with_capacity(self.depth);
        let mut cursor = Some(self);
        while let Some(trail) = cursor {
            if !matches!(trail.segment, Segment::Root) {
                out.push(trail.segment);
            }
            cursor = trail.parent;
        }
        out.reverse();
        out
    }
}

/// Renders as `a.b[2].c`, or `$` for the root itself.
impl fmt::Display for Trail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.segments();
        if segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Root => {}
            }
        }
        Ok(())
    }
}
