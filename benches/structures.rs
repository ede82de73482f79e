use arbores::prelude::*;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::hint::black_box;

fn random_values(n: usize, seed: u64) -> Vec<u32> {
    let rng = &mut Pcg64Mcg::seed_from_u64(seed);
    (0..n).map(|_| rng.random()).collect()
}

fn heaps(c: &mut Criterion) {
    let values = random_values(10_000, 1);

    for slots in [2, 4, 8] {
        c.bench_function(&format!("heap{slots}_push_pop"), |b| {
            b.iter(|| {
                let mut heap = Heap::new(Polarity::Max, slots).unwrap();
                heap.extend(values.iter().copied());
                while let Some(x) = heap.pop() {
                    black_box(x);
                }
            });
        });

        c.bench_function(&format!("heap{slots}_heapify"), |b| {
            b.iter_batched(
                || values.clone(),
                |values| Heap::from_vec(values, Polarity::Min, slots).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

fn key_trees(c: &mut Criterion) {
    let keys = random_values(5_000, 2);

    c.bench_function("bst_insert_search", |b| {
        b.iter(|| {
            let mut bst = KeyTree::binary(keys[0], (), true);
            for &k in &keys[1..] {
                bst.insert(k, ()).unwrap();
            }
            for k in &keys {
                black_box(bst.search(k).unwrap());
            }
        });
    });
}

fn graphs(c: &mut Criterion) {
    let rng = &mut Pcg64Mcg::seed_from_u64(3);
    let edges: Vec<(u32, u32)> = (0..2_000)
        .map(|_| {
            let u = rng.random_range(0..500);
            let v = rng.random_range(0..500);
            (u.min(v), u.max(v))
        })
        .filter(|(u, v)| u != v)
        .collect();

    c.bench_function("dag_deferred_check", |b| {
        b.iter(|| {
            let mut dag = Graph::multi_dag();
            for &(u, v) in &edges {
                dag.edge(u, v, ()).unwrap();
            }
            dag.check_cycle().unwrap();
        });
    });

    c.bench_function("dag_check_add", |b| {
        b.iter(|| {
            let mut dag = Graph::multi_dag().check_add(true);
            for &(u, v) in &edges[..500] {
                dag.edge(u, v, ()).unwrap();
            }
        });
    });
}

fn dafsas(c: &mut Criterion) {
    let rng = &mut Pcg64Mcg::seed_from_u64(4);
    let mut words: Vec<String> = (0..5_000)
        .map(|_| {
            (0..rng.random_range(3..10))
                .map(|_| rng.random_range(b'a'..=b'f') as char)
                .collect()
        })
        .collect();
    words.sort_unstable();
    words.dedup();

    c.bench_function("dafsa_build", |b| {
        b.iter(|| Dafsa::from_strs(words.iter().map(String::as_str)).unwrap());
    });
}

criterion_group!(benches, heaps, key_trees, graphs, dafsas);
criterion_main!(benches);
