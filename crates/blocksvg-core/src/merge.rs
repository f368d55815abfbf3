//! Color grouping and horizontal run merging.
//!
//! Blocks are bucketed by exact color, keeping the order in which each color
//! is first seen during the row-major scan. Inside a bucket, rectangles are
//! sorted by `(y, x)` and a single pass joins each rectangle onto the
//! previous one when they share a row band and touch horizontally.
//!
//! Only horizontal merging is done. Rectangles in different rows are never
//! joined, even when their union would be a rectangle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::blocks::Rect;
use crate::quantize::Rgb;

/// All rectangles that share one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorGroup {
    pub color: Rgb,
    pub rects: Vec<Rect>,
}

impl ColorGroup {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            rects: Vec::new(),
        }
    }

    /// Return this group with its rectangles merged into runs.
    pub fn merged(self) -> Self {
        Self {
            color: self.color,
            rects: merge_runs(&self.rects),
        }
    }

    /// Total pixel area covered by the group.
    pub fn area(&self) -> u64 {
        self.rects.iter().map(Rect::area).sum()
    }
}

/// Bucket `(color, rect)` pairs by exact color.
///
/// Groups are returned in first-encountered order and rectangles keep their
/// input order within each group.
pub fn group_by_color<I>(items: I) -> Vec<ColorGroup>
where
    I: IntoIterator<Item = (Rgb, Rect)>,
{
    let mut index: HashMap<Rgb, usize> = HashMap::new();
    let mut groups: Vec<ColorGroup> = Vec::new();

    for (color, rect) in items {
        let slot = *index.entry(color).or_insert_with(|| {
            groups.push(ColorGroup::new(color));
            groups.len() - 1
        });
        groups[slot].rects.push(rect);
    }

    groups
}

/// Merge horizontally adjacent rectangles of one color.
///
/// The input is sorted by `(y, x)` first. A rectangle extends the previous
/// run iff it has the same `y`, the same height, and starts exactly where the
/// run ends. The output never has more rectangles than the input.
pub fn merge_runs(rects: &[Rect]) -> Vec<Rect> {
    let mut sorted = rects.to_vec();
    sorted.sort_by_key(|r| (r.y, r.x));

    let mut merged: Vec<Rect> = Vec::with_capacity(sorted.len());
    for rect in sorted {
        match merged.last_mut() {
            Some(last)
                if last.y == rect.y && last.height == rect.height && last.right() == rect.x =>
            {
                last.width += rect.width;
            }
            _ => merged.push(rect),
        }
    }

    merged
}
