use std::fmt::{self, Debug, Display};

use super::VertexId;

/// Edges are numbered in insertion order.
/// We limit the number of edges to `2^32 - 1`.
pub type EdgeId = u32;

/// A pair of vertex ids as stored by the graph engine.
/// It is up to the graph kind whether a link is read as directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link(pub VertexId, pub VertexId);

impl Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Link {
    /// Normalizes the link such that the endpoint with smaller id comes first
    pub fn normalized(&self) -> Self {
        Link(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the link by switching the endpoints
    pub fn reverse(&self) -> Self {
        Link(self.1, self.0)
    }

    /// Returns the endpoint opposite to `u`.
    /// For loops this is `u` itself.
    pub fn other(&self, u: VertexId) -> VertexId {
        if self.0 == u { self.1 } else { self.0 }
    }
}

impl From<(VertexId, VertexId)> for Link {
    fn from(value: (VertexId, VertexId)) -> Self {
        Link(value.0, value.1)
    }
}

/// An edge `src -> dest` carrying a value and optional free-form metadata.
/// The graph owns all edges; endpoints are stored by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<V, E> {
    src: V,
    dest: V,
    value: E,
    meta: Option<String>,
}

impl<V, E> Edge<V, E> {
    pub(crate) fn new(src: V, dest: V, value: E, meta: Option<String>) -> Self {
        Self {
            src,
            dest,
            value,
            meta,
        }
    }

    /// Source vertex
    pub fn src(&self) -> &V {
        &self.src
    }

    /// Destination vertex
    pub fn dest(&self) -> &V {
        &self.dest
    }

    /// Associated value, e.g. a label or weight
    pub fn value(&self) -> &E {
        &self.value
    }

    /// Metadata attached at insertion
    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    /// Returns *true* if the edge matches every given filter; `None` matches everything
    pub fn matches(&self, src: Option<&V>, dest: Option<&V>, value: Option<&E>) -> bool
    where
        V: PartialEq,
        E: PartialEq,
    {
        src.is_none_or(|s| *s == self.src)
            && dest.is_none_or(|d| *d == self.dest)
            && value.is_none_or(|v| *v == self.value)
    }
}

impl<V: Display, E: Display> Display for Edge<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.src, self.value, self.dest)?;
        if let Some(meta) = &self.meta {
            write!(f, " ({meta})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_helpers() {
        let link = Link::from((4, 2));
        assert_eq!(link.normalized(), Link(2, 4));
        assert_eq!(link.reverse(), Link(2, 4));
        assert_eq!(link.other(4), 2);
        assert_eq!(link.other(2), 4);
        assert!(!link.is_loop());
        assert!(Link(3, 3).is_loop());
        assert_eq!(format!("{link:?}"), "(4,2)");
    }

    #[test]
    fn edge_filters() {
        let edge = Edge::new(0, 1, 'a', None);
        assert!(edge.matches(None, None, None));
        assert!(edge.matches(Some(&0), None, Some(&'a')));
        assert!(!edge.matches(Some(&1), None, None));
        assert!(!edge.matches(None, Some(&1), Some(&'b')));
    }

    #[test]
    fn edge_display() {
        assert_eq!(Edge::new("x", "y", 3, None).to_string(), "x -[3]-> y");
        assert_eq!(
            Edge::new("x", "y", 3, Some("heavy".to_string())).to_string(),
            "x -[3]-> y (heavy)"
        );
    }
}
