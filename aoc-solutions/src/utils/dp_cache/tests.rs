//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

struct Collatz;

impl DpProblem<u64, u64> for Collatz {
    fn deps(&self, n: &u64) -> Vec<u64> {
        if *n <= 1 {
            vec![]
        } else if n % 2 == 0 {
            vec![n / 2]
        } else {
            vec![3 * n + 1]
        }
    }

    fn compute(&self, _n: &u64, deps: Vec<u64>) -> u64 {
        deps.first().map_or(0, |steps| steps + 1)
    }
}

#[test]
fn test_no_dependencies() {
    let cache = DpCache::new(
        VecBackend::new(),
        |_: &usize| vec![],
        |n: &usize, _: Vec<i32>| (*n as i32) * 2,
    );

    assert_eq!(cache.get(&5), 10);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&100), 200);
    assert_eq!(cache.cached_len(), 3);
}

#[test]
fn test_fibonacci_linear_dependency_chain() {
    let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&2), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&20), 6765);
    assert_eq!(cache.get(&90), 2_880_067_194_370_816_120);
    assert_eq!(cache.cached_len(), 91);
}

#[test]
fn test_diamond_dependency_memoization() {
    // 0 depends on 1 and 2, both depend on 3
    struct Diamond {
        count: Rc<Cell<i32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let count = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::new(),
        Diamond {
            count: Rc::clone(&count),
        },
    );

    assert_eq!(cache.get(&0), 50);
    assert_eq!(count.get(), 4);

    // Everything is cached now
    assert_eq!(cache.get(&0), 50);
    assert_eq!(cache.get(&3), 10);
    assert_eq!(count.get(), 4);
}

#[test]
fn test_collatz_sparse_keys() {
    let cache = DpCache::with_problem(HashMapBackend::new(), Collatz);

    assert_eq!(cache.get(&1), 0);
    assert_eq!(cache.get(&16), 4);
    assert_eq!(cache.get(&27), 111);
    assert_eq!(cache.get(&97), 118);
}

#[test]
fn test_string_keys() {
    // Length of the longest chain of one-letter-shorter prefixes
    let cache = DpCache::new(
        HashMapBackend::new(),
        |s: &String| {
            if s.is_empty() {
                vec![]
            } else {
                vec![s[..s.len() - 1].to_string()]
            }
        },
        |_: &String, deps: Vec<usize>| deps.first().map_or(0, |d| d + 1),
    );

    assert_eq!(cache.get(&"hello".to_string()), 5);
    assert_eq!(cache.get(&"help".to_string()), 4);
    // "", h, he, hel, hell, hello, help
    assert_eq!(cache.cached_len(), 7);
}

#[test]
fn test_vec_backend_grows_and_counts() {
    let mut backend: VecBackend<i32> = VecBackend::with_capacity(2);
    assert!(backend.is_empty());
    assert_eq!(backend.get(&1), None);
    assert_eq!(backend.get(&10), None);

    backend.insert(10, 7);
    backend.insert(1, 3);
    backend.insert(1, 4);

    assert_eq!(backend.get(&10), Some(&7));
    assert_eq!(backend.get(&1), Some(&4));
    assert_eq!(backend.get(&5), None);
    assert_eq!(backend.len(), 2);
}

#[test]
fn test_hashmap_backend_tuple_keys() {
    let mut backend: HashMapBackend<(u8, u8), u64> = HashMapBackend::new();
    backend.insert((1, 2), 12);
    assert_eq!(backend.get(&(1, 2)), Some(&12));
    assert_eq!(backend.get(&(2, 1)), None);
    assert_eq!(backend.len(), 1);
}
