use std::collections::HashSet;

use gridsearch_core::Coord;

/// The set of expanded coordinates, kept in expansion order.
///
/// Grows monotonically and never holds the same coordinate twice.
#[derive(Clone, Debug, Default)]
pub struct Explored {
    order: Vec<Coord>,
    seen: HashSet<Coord>,
}

impl Explored {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `c` as expanded. Returns `false` if it already was.
    pub fn insert(&mut self, c: Coord) -> bool {
        if !self.seen.insert(c) {
            return false;
        }
        self.order.push(c);
        true
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.seen.contains(&c)
    }

    /// Expanded coordinates, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[Coord] {
        &self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.order.iter()
    }

    pub fn into_vec(self) -> Vec<Coord> {
        self.order
    }
}

impl<'a> IntoIterator for &'a Explored {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Coord> for Explored {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut e = Self::new();
        for c in iter {
            e.insert(c);
        }
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut e = Explored::new();
        assert!(e.insert(Coord::new(2, 2)));
        assert!(e.insert(Coord::new(0, 1)));
        assert!(e.insert(Coord::new(1, 0)));
        assert_eq!(
            e.as_slice(),
            &[Coord::new(2, 2), Coord::new(0, 1), Coord::new(1, 0)]
        );
    }

    #[test]
    fn rejects_duplicates() {
        let mut e = Explored::new();
        assert!(e.insert(Coord::new(1, 1)));
        assert!(!e.insert(Coord::new(1, 1)));
        assert_eq!(e.len(), 1);
        assert!(e.contains(Coord::new(1, 1)));
        assert!(!e.contains(Coord::new(0, 0)));
    }

    #[test]
    fn collect_dedups() {
        let e: Explored = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 0)]
            .into_iter()
            .collect();
        assert_eq!(e.into_vec(), vec![Coord::new(0, 0), Coord::new(0, 1)]);
    }
}
