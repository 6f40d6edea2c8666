//! Lazy lexicographic permutation generator.
//!
//! # Algorithm
//!
//! Knuth's Algorithm L: find the rightmost ascent `a[i] < a[i+1]`, swap
//! `a[i]` with the rightmost element greater than it, then reverse the suffix
//! after `i`. Starting from the identity this visits every ordering of
//! `0..n` in lexicographic order, the same order as Python's
//! `itertools.permutations` over positions.
//!
//! Only the current ordering is held in memory.
//!
//! # Reference
//!
//! Knuth, D.E. (2011). *The Art of Computer Programming*, Vol. 4A,
//! §7.2.1.2, Algorithm L.

/// Restartable iterator over all orderings of `0..n`.
///
/// # Examples
///
/// ```
/// use courier_routing::sequencing::Permutations;
///
/// let all: Vec<Vec<usize>> = Permutations::new(3).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1, 2]);
/// assert_eq!(all[1], vec![0, 2, 1]);
/// assert_eq!(all[5], vec![2, 1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    started: bool,
    done: bool,
}

impl Permutations {
    /// Orderings of `0..n`. `n == 0` yields a single empty ordering.
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            started: false,
            done: false,
        }
    }

    /// Rewinds to the first ordering.
    pub fn restart(&mut self) {
        let n = self.current.len();
        self.current.clear();
        self.current.extend(0..n);
        self.started = false;
        self.done = false;
    }

    /// Number of elements being permuted.
    pub fn width(&self) -> usize {
        self.current.len()
    }

    /// Total number of orderings, `n!`, or `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        (1..=self.current.len() as u64).try_fold(1u64, |acc, i| acc.checked_mul(i))
    }

    /// Advances and borrows the next ordering without allocating.
    pub fn next_ordering(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.current);
        }
        if self.advance() {
            Some(&self.current)
        } else {
            self.done = true;
            None
        }
    }

    /// Skips every remaining ordering that shares the current first `len`
    /// elements. The next call to [`next_ordering`](Self::next_ordering)
    /// returns the first ordering with a different prefix.
    pub fn skip_prefix(&mut self, len: usize) {
        if len < self.current.len() {
            // the last ordering with this prefix has a descending suffix
            self.current[len..].sort_unstable_by(|a, b| b.cmp(a));
        }
    }

    fn advance(&mut self) -> bool {
        let a = &mut self.current;
        let n = a.len();
        if n < 2 {
            return false;
        }
        let Some(i) = (0..n - 1).rev().find(|&i| a[i] < a[i + 1]) else {
            return false;
        };
        let Some(j) = (i + 1..n).rev().find(|&j| a[j] > a[i]) else {
            return false;
        };
        a.swap(i, j);
        a[i + 1..].reverse();
        true
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        self.next_ordering().map(<[usize]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        let all: Vec<Vec<usize>> = Permutations::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_counts() {
        for n in 0..7 {
            let p = Permutations::new(n);
            assert_eq!(p.width(), n);
            let expected = p.total().expect("small");
            assert_eq!(p.count() as u64, expected);
        }
    }

    #[test]
    fn test_empty_yields_one_ordering() {
        let all: Vec<Vec<usize>> = Permutations::new(0).collect();
        assert_eq!(all, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_restart() {
        let mut p = Permutations::new(3);
        let first: Vec<Vec<usize>> = p.by_ref().take(4).collect();
        p.restart();
        let again: Vec<Vec<usize>> = p.by_ref().take(4).collect();
        assert_eq!(first, again);

        for _ in p.by_ref() {}
        assert!(p.next().is_none());
        p.restart();
        assert_eq!(p.next(), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_skip_prefix() {
        let mut p = Permutations::new(4);
        assert_eq!(p.next_ordering(), Some(&[0, 1, 2, 3][..]));
        p.skip_prefix(1);
        assert_eq!(p.next_ordering(), Some(&[1, 0, 2, 3][..]));
        p.skip_prefix(2);
        assert_eq!(p.next_ordering(), Some(&[1, 2, 0, 3][..]));
    }

    #[test]
    fn test_skip_whole_space() {
        let mut p = Permutations::new(3);
        p.next_ordering();
        p.skip_prefix(0);
        assert!(p.next_ordering().is_none());
    }

    #[test]
    fn test_total_overflow() {
        assert!(Permutations::new(21).total().is_none());
        assert_eq!(Permutations::new(20).total(), Some(2_432_902_008_176_640_000));
    }
}
