//! # Layered Rendering
//!
//! Diagnostic text output shared by all tree representations. Every tree is drawn one
//! generation per line. A node owns a horizontal interval `[start, start + span)` of the unit
//! line: the root owns `[0, 1)` and each of the `n` child slots of a node owns an equal share of
//! its parent's interval. A value is printed centered at the middle of its interval, scaled to the
//! requested character width.
//!
//! Intervals are tracked as `f64` so that deep but sparse trees (e.g. a BST built from sorted keys)
//! do not require `n^depth` placeholder positions.

use itertools::Itertools;

/// Horizontal interval of a node on the unit line
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Span {
    pub start: f64,
    pub width: f64,
}

impl Span {
    /// The interval of a root
    pub const ROOT: Span = Span {
        start: 0.0,
        width: 1.0,
    };

    /// Returns the interval of the `slot`-th of `slots` children
    pub fn child(&self, slot: usize, slots: usize) -> Span {
        let width = self.width / slots as f64;
        Span {
            start: self.start + slot as f64 * width,
            width,
        }
    }

    /// Middle of the interval
    pub fn center(&self) -> f64 {
        self.start + self.width / 2.0
    }
}

/// Renders generations of `(span, label)`-pairs into `width` columns.
///
/// Labels within a generation are expected in left-to-right order. If two labels would overlap,
/// the later one is shifted to the right such that at least one blank separates them.
/// Trailing whitespace is never emitted.
pub(crate) fn render_levels(levels: &[Vec<(Span, String)>], width: usize) -> String {
    levels
        .iter()
        .map(|level| {
            let mut line = String::new();
            let mut used = 0usize;
            let mut min_col = 0usize;

            for (span, label) in level {
                let len = label.chars().count();
                let center = (span.center() * width as f64).floor() as usize;
                let col = center.saturating_sub(len / 2).max(min_col);

                line.extend(std::iter::repeat_n(' ', col - used));
                line.push_str(label);
                used = col + len;
                min_col = used + 1;
            }

            line
        })
        .join("\n")
}
