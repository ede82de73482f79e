use std::collections::BTreeSet;

use arbores::prelude::*;
use itertools::Itertools;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum HeapOp {
    Push(i32),
    Pop,
}

fn heap_op() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        3 => any::<i32>().prop_map(HeapOp::Push),
        2 => Just(HeapOp::Pop),
    ]
}

fn polarity() -> impl Strategy<Value = Polarity> {
    prop_oneof![Just(Polarity::Max), Just(Polarity::Min)]
}

proptest! {
    #[test]
    fn heap_keeps_invariant(
        polarity in polarity(),
        slots in 2usize..6,
        ops in prop::collection::vec(heap_op(), 0..300),
    ) {
        let mut heap = Heap::new(polarity, slots).unwrap();
        let mut pushes = 0usize;
        let mut pops = 0usize;

        for op in ops {
            match op {
                HeapOp::Push(x) => {
                    heap.push(x);
                    pushes += 1;
                }
                HeapOp::Pop => {
                    if heap.pop().is_some() {
                        pops += 1;
                    }
                }
            }
            prop_assert!(heap.is_heap());
            prop_assert_eq!(heap.len(), pushes - pops);
        }
    }

    #[test]
    fn heap_sorts(polarity in polarity(), slots in 2usize..8, values in prop::collection::vec(any::<u16>(), 0..200)) {
        let mut expected = values.clone();
        expected.sort_unstable();
        if polarity == Polarity::Max {
            expected.reverse();
        }

        let heap = Heap::from_vec(values, polarity, slots).unwrap();
        prop_assert!(heap.is_heap());
        prop_assert_eq!(heap.into_sorted_vec(), expected);
    }

    #[test]
    fn index_round_trip(i in 0isize..100_000, n in 2isize..16) {
        for c in children_idx(i, n) {
            prop_assert_eq!(parent_idx(c, n), i);
        }
        prop_assert_eq!(children_idx(i, n).len() as isize, n);
    }

    #[test]
    fn bst_finds_every_key(keys in Just((1..=30).collect_vec()).prop_shuffle()) {
        let mut bst = KeyTree::binary(keys[0], keys[0] * 10, false);
        for &k in &keys[1..] {
            bst.insert(k, k * 10).unwrap();
        }

        prop_assert_eq!(bst.len(), 30);
        prop_assert_eq!(bst.keys().copied().collect_vec(), (1..=30).collect_vec());
        for k in 1..=30 {
            let id = bst.search(&k).unwrap();
            prop_assert!(id.is_some());
            prop_assert_eq!(*bst[id.unwrap()].value(), k * 10);
        }
        prop_assert_eq!(bst.search(&0).unwrap(), None);
        prop_assert_eq!(bst.search(&31).unwrap(), None);
    }

    #[test]
    fn checked_dag_never_holds_a_cycle(edges in prop::collection::vec((0u8..12, 0u8..12), 0..80)) {
        let mut dag = Graph::dag().check_add(true);
        for (u, v) in edges {
            let _ = dag.edge(u, v, ());
        }

        prop_assert!(dag.check_cycle().is_ok());
        let order = dag.topo_order().unwrap();
        prop_assert_eq!(order.len(), dag.number_of_vertices());
        for edge in dag.all_edges() {
            let src = order.iter().position(|&&x| x == *edge.src()).unwrap();
            let dest = order.iter().position(|&&x| x == *edge.dest()).unwrap();
            prop_assert!(src < dest);
        }
    }

    #[test]
    fn multigraph_keeps_all_edges(edges in prop::collection::vec((0u8..5, 0u8..5, 0u8..3), 0..60)) {
        let mut multi = Graph::multi();
        let mut simple = Graph::simple();
        let mut pairs = BTreeSet::new();

        for &(u, v, c) in &edges {
            multi.edge(u, v, c).unwrap();
            let fresh = pairs.insert((u, v));
            prop_assert_eq!(simple.edge(u, v, c).is_ok(), fresh);
        }

        prop_assert_eq!(multi.number_of_edges(), edges.len());
        prop_assert_eq!(simple.number_of_edges(), pairs.len());
        for &(u, v, c) in &edges {
            prop_assert!(!multi.edges(Some(&u), Some(&v), Some(&c)).is_empty());
        }
    }

    #[test]
    fn dafsa_recognizes_exactly_its_words(
        words in prop::collection::btree_set(prop::collection::vec(0u8..4, 0..7), 0..40),
        probes in prop::collection::vec(prop::collection::vec(0u8..4, 0..7), 0..40),
    ) {
        let dafsa = Dafsa::from_words(words.iter().cloned()).unwrap();

        prop_assert_eq!(dafsa.len(), words.len());
        prop_assert_eq!(dafsa.words(), words.iter().cloned().collect_vec());
        for probe in probes {
            prop_assert_eq!(dafsa.contains(probe.iter().copied()), words.contains(&probe));
        }
    }
}

#[test]
fn heap_end_to_end() {
    let mut heap = Heap::default();
    for x in [5, 3, 8, 1] {
        heap.push(x);
    }
    assert_eq!(heap.pop(), Some(8));
    assert_eq!(heap.pop(), Some(5));

    let max: Heap<_> = (1..=10).collect();
    assert_eq!(max.into_sorted_vec(), (1..=10).rev().collect_vec());

    let mut min = Heap::min();
    min.extend(1..=10);
    assert_eq!(min.into_sorted_vec(), (1..=10).collect_vec());
}

#[test]
fn dag_end_to_end() {
    let mut dag = Graph::dag();
    dag.edge(0, 1, 'a').unwrap();
    dag.edge(1, 2, 'b').unwrap();
    dag.edge(2, 0, 'c').unwrap();
    assert!(matches!(dag.check_cycle(), Err(Error::CycleDetected(_))));

    let mut diamond = Graph::dag();
    let mut undirected = Graph::acyclic();
    for (u, v) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
        diamond.edge(u, v, ()).unwrap();
        undirected.edge(u, v, ()).unwrap();
    }
    assert!(diamond.check_cycle().is_ok());
    assert!(matches!(undirected.check_cycle(), Err(Error::CycleDetected(_))));
}

#[test]
fn multi_edge_end_to_end() {
    let mut simple = Graph::simple();
    simple.edge(0, 1, 'a').unwrap();
    assert!(matches!(simple.edge(0, 1, 'b'), Err(Error::StructuralConflict(_))));

    let mut multi = Graph::multi();
    multi.edge(0, 1, 'a').unwrap();
    multi.edge(0, 1, 'b').unwrap();
    assert_eq!(multi.edges(None, None, None).len(), 2);
}

#[test]
fn automata_end_to_end() {
    let dafsa = Dafsa::from_strs(["mop", "mops", "top", "tops"]).unwrap();
    assert_eq!(dafsa.number_of_states(), 5);
    assert_eq!(
        dafsa
            .search("to".chars())
            .into_iter()
            .map(String::from_iter)
            .collect_vec(),
        vec!["top", "tops"]
    );

    let mut fsm = Fsm::new();
    let done = fsm.add_state(true);
    fsm.transition(START, done, 'x').unwrap();
    assert!(fsm.transition(START, START, 'x').unwrap_err().is_conflict());
    assert_eq!(fsm.feed("x".chars()), Some(done));
    assert!(fsm.is_accepting());
}
