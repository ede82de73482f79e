/// Every heap configuration must keep the heap property and behave like a priority queue
macro_rules! test_heap_ops {
    ($env:ident, $polarity:expr, $slots:literal) => {
        #[cfg(test)]
        mod $env {
            use crate::tree::*;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            fn new_heap() -> Heap<u32> {
                Heap::new($polarity, $slots).unwrap()
            }

            /// Values in the order in which a correct heap has to return them
            fn expected_order(mut values: Vec<u32>) -> Vec<u32> {
                values.sort_unstable();
                if $polarity == Polarity::Max {
                    values.reverse();
                }
                values
            }

            #[test]
            fn heap_property_after_each_operation() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [0usize, 1, 2, 5, 17, 64, 200] {
                    let mut heap = new_heap();
                    for _ in 0..n {
                        heap.push(rng.random_range(0..(n as u32 + 1)));
                        assert!(heap.is_heap());
                    }

                    while heap.pop().is_some() {
                        assert!(heap.is_heap());
                    }
                }
            }

            #[test]
            fn size_tracks_operations() {
                let rng = &mut Pcg64Mcg::seed_from_u64(4);

                let mut heap = new_heap();
                let mut pushes = 0usize;
                let mut pops = 0usize;

                for _ in 0..1000 {
                    if rng.random_bool(0.6) {
                        heap.push(rng.random());
                        pushes += 1;
                    } else if heap.pop().is_some() {
                        pops += 1;
                    } else {
                        assert_eq!(pushes, pops);
                    }

                    assert_eq!(heap.len(), pushes - pops);
                    assert!(heap.is_heap());
                }
            }

            #[test]
            fn pops_in_polarity_order() {
                let rng = &mut Pcg64Mcg::seed_from_u64(5);

                for _ in 0..20 {
                    let n = rng.random_range(1..100);
                    let values = (0..n).map(|_| rng.random_range(0..50)).collect_vec();

                    let mut heap = new_heap();
                    heap.extend(values.iter().copied());
                    assert_eq!(heap.peek(), expected_order(values.clone()).first());
                    assert_eq!(heap.into_sorted_vec(), expected_order(values));
                }
            }

            #[test]
            fn heapify_agrees_with_pushes() {
                let rng = &mut Pcg64Mcg::seed_from_u64(6);

                for n in [0usize, 1, 3, 10, 99] {
                    let values = (0..n).map(|_| rng.random_range(0..1000)).collect_vec();

                    let heap = Heap::from_vec(values.clone(), $polarity, $slots).unwrap();
                    assert!(heap.is_heap());
                    assert_eq!(heap.child_slots(), $slots);
                    assert_eq!(heap.into_sorted_vec(), expected_order(values));
                }
            }
        }
    };
}

pub(crate) use test_heap_ops;
