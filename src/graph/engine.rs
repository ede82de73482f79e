use std::{fmt::Debug, hash::Hash};

use fxhash::FxHashSet;
use itertools::{Either, Itertools};
use tracing::{debug, trace};

use super::{
    Acyclicity, Edge, EdgeId, FirstMatch, GraphKind, Link, TieBreak, VertexId, VertexMap,
    cycle::{Adjacency, Cycle, CycleSearch},
};
use crate::error::{Error, Result, raise_error_unless};

/// Edge-labelled graph over hashable vertex values.
///
/// Vertices and edges are only ever added. Every rejected insertion leaves the graph untouched.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    kind: GraphKind,
    check_add: bool,
    vertices: VertexMap<V>,
    edges: Vec<Edge<V, E>>,
    adjacency: Adjacency,
    /// Occupied pairs of kinds without parallel edges; normalized if undirected
    pairs: FxHashSet<Link>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new(GraphKind::default())
    }
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph of the given kind that does not validate insertions
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            check_add: false,
            vertices: VertexMap::default(),
            edges: Vec::new(),
            adjacency: Adjacency::default(),
            pairs: FxHashSet::default(),
        }
    }

    /// Creates an empty [`GraphKind::Simple`] graph
    pub fn simple() -> Self {
        Self::new(GraphKind::Simple)
    }

    /// Creates an empty [`GraphKind::Multi`] graph
    pub fn multi() -> Self {
        Self::new(GraphKind::Multi)
    }

    /// Creates an empty [`GraphKind::AcyclicUndirected`] graph
    pub fn acyclic() -> Self {
        Self::new(GraphKind::AcyclicUndirected)
    }

    /// Creates an empty [`GraphKind::AcyclicDirected`] graph
    pub fn dag() -> Self {
        Self::new(GraphKind::AcyclicDirected)
    }

    /// Creates an empty [`GraphKind::MultiDag`] graph
    pub fn multi_dag() -> Self {
        Self::new(GraphKind::MultiDag)
    }

    /// If enabled, every insertion into an acyclic kind reruns the cycle check from the new
    /// edge's source in `O(V + E)` and rejects the edge if a cycle is found.
    /// Has no effect on kinds without an acyclicity invariant.
    pub fn set_check_add(&mut self, check_add: bool) {
        self.check_add = check_add;
    }

    /// Builder variant of [`Graph::set_check_add`]
    pub fn check_add(mut self, check_add: bool) -> Self {
        self.set_check_add(check_add);
        self
    }

    /// Returns *true* if insertions are validated
    pub fn checks_on_add(&self) -> bool {
        self.check_add
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns *true* if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.values()
    }

    /// All edges in insertion order
    pub fn all_edges(&self) -> std::slice::Iter<'_, Edge<V, E>> {
        self.edges.iter()
    }

    fn edge_at(&self, e: EdgeId) -> &Edge<V, E> {
        &self.edges[e as usize]
    }

    /// Key under which `link` occupies its pair, or `None` if parallel edges are allowed
    fn pair_of(&self, link: Link) -> Option<Link> {
        if self.kind.allows_parallel_edges() {
            None
        } else if self.kind.is_directed() {
            Some(link)
        } else {
            Some(link.normalized())
        }
    }

    /// Ids of all vertices that are no edge's destination
    fn root_ids(&self) -> impl Iterator<Item = VertexId> {
        self.vertices
            .ids()
            .filter(|&u| self.adjacency.in_degree(u) == 0)
    }
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone + Debug,
{
    /// Adds an isolated vertex if it is not present yet and returns its id
    pub fn add_vertex(&mut self, vertex: V) -> VertexId {
        let before = self.vertices.len();
        let id = self.vertices.intern(vertex);
        if self.vertices.len() > before {
            self.adjacency.add_vertex();
        }
        id
    }

    /// Returns *true* if `vertex` is an endpoint of some edge or was added explicitly
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.id_of(vertex).is_some()
    }

    /// Inserts the edge `src -> dest` carrying `value` and returns a reference to it.
    /// Endpoints are added as vertices if necessary.
    ///
    /// # Errors
    /// - [`Error::CycleDetected`] for self-loops in acyclic kinds or, with
    ///   [`Graph::check_add`] enabled, if the edge would close a cycle.
    /// - [`Error::StructuralConflict`] if the kind forbids parallel edges and `src` and `dest`
    ///   are already connected (in either orientation for [`GraphKind::AcyclicUndirected`]).
    ///
    /// In both cases the graph is left unchanged.
    pub fn edge(&mut self, src: V, dest: V, value: E) -> Result<&Edge<V, E>> {
        self.insert(src, dest, value, None)
    }

    /// Same as [`Graph::edge`] but attaches free-form metadata to the edge
    pub fn edge_with_meta(
        &mut self,
        src: V,
        dest: V,
        value: E,
        meta: impl Into<String>,
    ) -> Result<&Edge<V, E>> {
        self.insert(src, dest, value, Some(meta.into()))
    }

    fn insert(&mut self, src: V, dest: V, value: E, meta: Option<String>) -> Result<&Edge<V, E>> {
        let acyclicity = self.kind.acyclicity();

        if acyclicity.is_some() && src == dest {
            debug!(kind = ?self.kind, vertex = ?src, "rejected self-loop");
            return Err(Error::CycleDetected(format!(
                "self-loop at {src:?} in a {:?} graph",
                self.kind
            )));
        }

        let occupied = match (self.vertices.id_of(&src), self.vertices.id_of(&dest)) {
            (Some(u), Some(v)) => self
                .pair_of(Link(u, v))
                .is_some_and(|pair| self.pairs.contains(&pair)),
            _ => false,
        };

        if occupied {
            debug!(kind = ?self.kind, src = ?src, dest = ?dest, "rejected parallel edge");
            return Err(Error::StructuralConflict(format!(
                "{src:?} and {dest:?} are already connected; use a multi-graph for parallel edges"
            )));
        }

        let vertices_before = self.vertices.len();
        let u = self.add_vertex(src.clone());
        let v = self.add_vertex(dest.clone());
        let link = Link(u, v);

        self.adjacency.add_link(link);
        self.edges.push(Edge::new(src, dest, value, meta));

        let pair = self.pair_of(link);
        if let Some(pair) = pair {
            self.pairs.insert(pair);
        }

        if let (true, Some(acyclicity)) = (self.check_add, acyclicity) {
            trace!(kind = ?self.kind, src = u, "checking insertion for cycles");
            let result = CycleSearch::new(&self.adjacency, acyclicity).run_from(u);

            if let Err(cycle) = result {
                let err = self.cycle_error(cycle);

                self.adjacency.pop_link();
                self.edges.pop();
                if let Some(pair) = pair {
                    self.pairs.remove(&pair);
                }
                self.vertices.truncate(vertices_before);
                self.adjacency.truncate_vertices(vertices_before);

                debug!(kind = ?self.kind, "rolled back edge closing a cycle");
                return Err(err);
            }
        }

        Ok(&self.edges[self.edges.len() - 1])
    }

    /// All edges leaving `src` in insertion order
    pub fn out_edges<'a>(
        &'a self,
        src: &V,
    ) -> impl Iterator<Item = &'a Edge<V, E>> + use<'a, V, E> {
        self.out_edge_ids(src)
            .iter()
            .map(move |&e| self.edge_at(e))
    }

    fn out_edge_ids(&self, src: &V) -> &[EdgeId] {
        self.vertices
            .id_of(src)
            .map_or(&[], |u| self.adjacency.out_edges(u))
    }

    /// Number of edges leaving `vertex`; `0` for unknown vertices
    pub fn out_degree(&self, vertex: &V) -> usize {
        self.out_edge_ids(vertex).len()
    }

    /// Number of edges entering `vertex`; `0` for unknown vertices
    pub fn in_degree(&self, vertex: &V) -> usize {
        self.vertices
            .id_of(vertex)
            .map_or(0, |u| self.adjacency.in_degree(u))
    }

    /// Vertices that are no edge's destination, in insertion order.
    /// Mostly meaningful for directed kinds.
    pub fn roots(&self) -> Vec<&V> {
        self.root_ids()
            .map(|u| self.vertices.value_of(u))
            .collect()
    }

    /// Validates the acyclicity invariant of the graph.
    ///
    /// Undirected kinds are searched from every vertex, directed kinds from every root.
    /// Each call starts from a fresh search state.
    ///
    /// # Errors
    /// - [`Error::InvalidConfiguration`] if the kind carries no acyclicity invariant.
    /// - [`Error::CycleDetected`] if a cycle exists. For directed kinds this includes a non-empty
    ///   graph without any root and vertices that are unreachable from every root.
    pub fn check_cycle(&self) -> Result<()> {
        let Some(acyclicity) = self.kind.acyclicity() else {
            return Err(Error::InvalidConfiguration(format!(
                "a {:?} graph has no acyclicity invariant to check",
                self.kind
            )));
        };

        trace!(
            kind = ?self.kind,
            vertices = self.number_of_vertices(),
            edges = self.number_of_edges(),
            "checking for cycles"
        );

        let mut search = CycleSearch::new(&self.adjacency, acyclicity);
        match acyclicity {
            Acyclicity::Undirected => {
                for u in self.vertices.ids() {
                    search.run_from(u).map_err(|c| self.cycle_error(c))?;
                }
            }
            Acyclicity::Directed => {
                let roots = self.root_ids().collect_vec();
                if roots.is_empty() && !self.is_empty() {
                    debug!(kind = ?self.kind, "no roots");
                    return Err(Error::CycleDetected(format!(
                        "none of the {} vertices is a root, so every vertex lies on or behind a cycle",
                        self.number_of_vertices()
                    )));
                }

                for root in roots {
                    search.run_from(root).map_err(|c| self.cycle_error(c))?;
                }

                if let Some(u) = search.first_unvisited() {
                    let vertex = self.vertices.value_of(u);
                    debug!(kind = ?self.kind, vertex = ?vertex, "vertex unreachable from roots");
                    return Err(Error::CycleDetected(format!(
                        "{vertex:?} is unreachable from every root, so it lies on or behind a cycle"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns all vertices in topological order using Kahn's algorithm.
    ///
    /// # Errors
    /// - [`Error::InvalidConfiguration`] for undirected kinds.
    /// - [`Error::CycleDetected`] if not every vertex could be ordered.
    pub fn topo_order(&self) -> Result<Vec<&V>> {
        raise_error_unless!(
            self.kind.is_directed(),
            InvalidConfiguration,
            "topological order of an undirected {:?} graph",
            self.kind
        );

        let mut in_degs = self
            .vertices
            .ids()
            .map(|u| self.adjacency.in_degree(u))
            .collect_vec();
        let mut stack = self.root_ids().collect_vec();
        stack.reverse();

        let mut order = Vec::with_capacity(self.number_of_vertices());
        while let Some(u) = stack.pop() {
            order.push(self.vertices.value_of(u));
            for &e in self.adjacency.out_edges(u) {
                let v = self.adjacency.link(e).1;
                in_degs[v as usize] -= 1;
                if in_degs[v as usize] == 0 {
                    stack.push(v);
                }
            }
        }

        if order.len() < self.number_of_vertices() {
            debug!(
                kind = ?self.kind,
                ordered = order.len(),
                vertices = self.number_of_vertices(),
                "topological order incomplete"
            );
            return Err(Error::CycleDetected(format!(
                "only {} of {} vertices can be ordered topologically",
                order.len(),
                self.number_of_vertices()
            )));
        }

        Ok(order)
    }

    fn cycle_error(&self, cycle: Cycle) -> Error {
        let edge = self.edge_at(cycle.edge);
        let vertex = self.vertices.value_of(cycle.vertex);
        debug!(kind = ?self.kind, vertex = ?vertex, "cycle detected");
        Error::CycleDetected(format!(
            "edge {:?} -> {:?} closes a cycle through {vertex:?}",
            edge.src(),
            edge.dest()
        ))
    }
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone + Debug,
    E: PartialEq,
{
    /// Iterates over all edges matching the given filters in insertion order.
    /// An omitted filter matches everything.
    pub fn edges_where<'a, 'f>(
        &'a self,
        src: Option<&'f V>,
        dest: Option<&'f V>,
        value: Option<&'f E>,
    ) -> impl Iterator<Item = &'a Edge<V, E>> {
        let candidates = match src {
            Some(src) => Either::Left(self.out_edges(src)),
            None => Either::Right(self.edges.iter()),
        };
        candidates.filter(move |edge| edge.matches(src, dest, value))
    }

    /// Collects all edges matching the given filters, see [`Graph::edges_where`]
    ///
    /// # Example
    /// ```
    /// use arbores::graph::Graph;
    ///
    /// let mut g = Graph::multi();
    /// g.edge(0, 1, 'a').unwrap();
    /// g.edge(0, 1, 'b').unwrap();
    /// g.edge(1, 2, 'a').unwrap();
    ///
    /// assert_eq!(g.edges(Some(&0), None, None).len(), 2);
    /// assert_eq!(g.edges(None, None, Some(&'a')).len(), 2);
    /// assert_eq!(g.edges(None, Some(&2), Some(&'b')).len(), 0);
    /// ```
    pub fn edges(
        &self,
        src: Option<&V>,
        dest: Option<&V>,
        value: Option<&E>,
    ) -> Vec<&Edge<V, E>> {
        self.edges_where(src, dest, value).collect()
    }

    /// Calls `visitor` on every edge matching the given filters
    pub fn each_edge<'a, F>(
        &'a self,
        src: Option<&V>,
        dest: Option<&V>,
        value: Option<&E>,
        visitor: F,
    ) where
        F: FnMut(&'a Edge<V, E>),
    {
        self.edges_where(src, dest, value).for_each(visitor);
    }

    /// Returns the destination of the first edge (in insertion order) leaving `src` with `value`
    pub fn follow(&self, src: &V, value: &E) -> Option<&V> {
        self.follow_with(src, value, &mut FirstMatch)
    }

    /// Returns the destination of an edge leaving `src` with `value`.
    /// If there are several, `tie_break` decides.
    pub fn follow_with<T: TieBreak>(&self, src: &V, value: &E, tie_break: &mut T) -> Option<&V> {
        tie_break.pick(
            self.out_edges(src)
                .filter(|edge| edge.value() == value)
                .map(|edge| edge.dest()),
        )
    }
}
