/*!
# Cycle Search

Adjacency storage of the graph engine and an iterative three-color DFS on top of it.

Every vertex is `Unvisited`, `Visiting` (on the current DFS stack) or `Finished`. Reaching a
`Visiting` vertex closes a cycle. When edges are read undirected, the edge the DFS arrived
through is skipped so that walking back along it is not mistaken for a cycle.
*/

use smallvec::SmallVec;

use super::{Acyclicity, EdgeId, Link, VertexId};

type EdgeList = SmallVec<[EdgeId; 4]>;

/// Links of a graph indexed by [`EdgeId`] together with per-vertex incidence lists
#[derive(Debug, Clone, Default)]
pub(super) struct Adjacency {
    links: Vec<Link>,
    out_edges: Vec<EdgeList>,
    in_edges: Vec<EdgeList>,
}

impl Adjacency {
    /// Appends an isolated vertex
    pub fn add_vertex(&mut self) {
        self.out_edges.push(EdgeList::new());
        self.in_edges.push(EdgeList::new());
    }

    /// Drops all vertices with id `>= n`.
    ///
    /// ** Must only be called on vertices without incident links **
    pub fn truncate_vertices(&mut self, n: usize) {
        debug_assert!(
            self.out_edges[n.min(self.out_edges.len())..]
                .iter()
                .chain(&self.in_edges[n.min(self.in_edges.len())..])
                .all(|list| list.is_empty())
        );
        self.out_edges.truncate(n);
        self.in_edges.truncate(n);
    }

    /// Appends a link and returns its id
    ///
    /// ** Panics if an endpoint was not added before **
    pub fn add_link(&mut self, link: Link) -> EdgeId {
        let id = self.links.len() as EdgeId;
        self.out_edges[link.0 as usize].push(id);
        self.in_edges[link.1 as usize].push(id);
        self.links.push(link);
        id
    }

    /// Removes the most recently added link
    pub fn pop_link(&mut self) -> Option<Link> {
        let link = self.links.pop()?;
        self.out_edges[link.0 as usize].pop();
        self.in_edges[link.1 as usize].pop();
        Some(link)
    }

    pub fn link(&self, e: EdgeId) -> Link {
        self.links[e as usize]
    }

    pub fn number_of_vertices(&self) -> usize {
        self.out_edges.len()
    }

    /// Ids of all links leaving `u` in insertion order
    pub fn out_edges(&self, u: VertexId) -> &[EdgeId] {
        &self.out_edges[u as usize]
    }

    pub fn in_degree(&self, u: VertexId) -> usize {
        self.in_edges[u as usize].len()
    }

    /// The `k`-th link incident to `u` and the vertex it leads to.
    /// Outgoing links come first; incoming links are only considered in undirected mode.
    fn nth_incident(&self, u: VertexId, k: usize, undirected: bool) -> Option<(EdgeId, VertexId)> {
        let out = self.out_edges(u);
        let e = if k < out.len() {
            out[k]
        } else if undirected {
            *self.in_edges[u as usize].get(k - out.len())?
        } else {
            return None;
        };

        Some((e, self.link(e).other(u)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    via: Option<EdgeId>,
    cursor: usize,
}

/// A cycle closed by following `edge` into the `Visiting` vertex `vertex`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Cycle {
    pub vertex: VertexId,
    pub edge: EdgeId,
}

/// DFS state of a single cycle check.
/// A fresh search starts with every vertex `Unvisited`; state carries over between start vertices.
pub(super) struct CycleSearch<'a> {
    adjacency: &'a Adjacency,
    undirected: bool,
    marks: Vec<Mark>,
    stack: Vec<Frame>,
}

impl<'a> CycleSearch<'a> {
    pub fn new(adjacency: &'a Adjacency, acyclicity: Acyclicity) -> Self {
        Self {
            adjacency,
            undirected: acyclicity == Acyclicity::Undirected,
            marks: vec![Mark::Unvisited; adjacency.number_of_vertices()],
            stack: Vec::new(),
        }
    }

    /// Explores everything reachable from `start` that was not finished before
    pub fn run_from(&mut self, start: VertexId) -> Result<(), Cycle> {
        if self.marks[start as usize] != Mark::Unvisited {
            return Ok(());
        }

        self.marks[start as usize] = Mark::Visiting;
        self.stack.push(Frame {
            vertex: start,
            via: None,
            cursor: 0,
        });

        while let Some(frame) = self.stack.last_mut() {
            let u = frame.vertex;
            let Some((e, v)) = self
                .adjacency
                .nth_incident(u, frame.cursor, self.undirected)
            else {
                self.marks[u as usize] = Mark::Finished;
                self.stack.pop();
                continue;
            };

            frame.cursor += 1;
            if frame.via == Some(e) {
                continue;
            }

            match self.marks[v as usize] {
                Mark::Unvisited => {
                    self.marks[v as usize] = Mark::Visiting;
                    self.stack.push(Frame {
                        vertex: v,
                        via: Some(e),
                        cursor: 0,
                    });
                }
                Mark::Visiting => {
                    self.stack.clear();
                    return Err(Cycle { vertex: v, edge: e });
                }
                Mark::Finished => {}
            }
        }

        Ok(())
    }

    /// The smallest vertex no search has reached yet
    pub fn first_unvisited(&self) -> Option<VertexId> {
        self.marks
            .iter()
            .position(|&m| m == Mark::Unvisited)
            .map(|u| u as VertexId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(n: usize, links: &[(VertexId, VertexId)]) -> Adjacency {
        let mut adj = Adjacency::default();
        for _ in 0..n {
            adj.add_vertex();
        }
        for &link in links {
            adj.add_link(link.into());
        }
        adj
    }

    #[test]
    fn directed_cycle() {
        let adj = adjacency(3, &[(0, 1), (1, 2), (2, 0)]);
        let mut search = CycleSearch::new(&adj, Acyclicity::Directed);
        assert_eq!(search.run_from(0), Err(Cycle { vertex: 0, edge: 2 }));
    }

    #[test]
    fn diamond_depends_on_direction() {
        let adj = adjacency(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);

        let mut directed = CycleSearch::new(&adj, Acyclicity::Directed);
        assert!(directed.run_from(0).is_ok());
        assert_eq!(directed.first_unvisited(), None);

        let mut undirected = CycleSearch::new(&adj, Acyclicity::Undirected);
        assert!(undirected.run_from(0).is_err());
    }

    #[test]
    fn undirected_path_is_acyclic() {
        let adj = adjacency(5, &[(1, 0), (1, 2), (3, 2), (3, 4)]);
        let mut search = CycleSearch::new(&adj, Acyclicity::Undirected);
        for u in 0..5 {
            assert!(search.run_from(u).is_ok());
        }
    }

    #[test]
    fn finished_vertices_are_skipped() {
        let adj = adjacency(4, &[(0, 2), (1, 2), (2, 3)]);
        let mut search = CycleSearch::new(&adj, Acyclicity::Directed);
        assert!(search.run_from(0).is_ok());
        assert_eq!(search.first_unvisited(), Some(1));
        assert!(search.run_from(1).is_ok());
        assert_eq!(search.first_unvisited(), None);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let adj = adjacency(2, &[(0, 1), (1, 1)]);
        assert!(
            CycleSearch::new(&adj, Acyclicity::Directed)
                .run_from(0)
                .is_err()
        );
        assert!(
            CycleSearch::new(&adj, Acyclicity::Undirected)
                .run_from(0)
                .is_err()
        );
    }

    #[test]
    fn pop_link_restores_lists() {
        let mut adj = adjacency(3, &[(0, 1), (1, 2)]);
        adj.add_link(Link(2, 0));
        assert_eq!(adj.in_degree(0), 1);

        assert_eq!(adj.pop_link(), Some(Link(2, 0)));
        assert_eq!(adj.in_degree(0), 0);
        assert_eq!(adj.out_edges(2), &[] as &[EdgeId]);
        assert!(
            CycleSearch::new(&adj, Acyclicity::Directed)
                .run_from(0)
                .is_ok()
        );
    }
}
