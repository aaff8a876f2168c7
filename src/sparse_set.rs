use rand::seq::SliceRandom;
use rand::Rng;

/// Sparse set over the keys `0..capacity` with one value per key. Removal swaps
/// the last member into the hole.
#[derive(Clone, Debug)]
pub struct SparseSet<T> {
    sparse: Vec<usize>,
    dense: Vec<usize>,
    values: Vec<T>,
}

impl<T> SparseSet<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        SparseSet {
            sparse: vec![0; capacity],
            dense: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn contains(&self, key: usize) -> bool {
        match self.sparse.get(key) {
            Some(&slot) => slot < self.dense.len() && self.dense[slot] == key,
            None => false,
        }
    }

    /// Inserts `key` with `value`. Returns `false` without touching the set when the
    /// key is already a member or lies outside the universe.
    pub fn insert(&mut self, key: usize, value: T) -> bool {
        if key >= self.sparse.len() || self.contains(key) {
            return false;
        }

        self.sparse[key] = self.dense.len();
        self.dense.push(key);
        self.values.push(value);
        true
    }

    pub fn remove(&mut self, key: usize) -> Option<T> {
        if !self.contains(key) {
            return None;
        }

        let slot = self.sparse[key];
        self.dense.swap_remove(slot);
        let value = self.values.swap_remove(slot);

        // The former last member now sits in `slot`
        if let Some(&moved) = self.dense.get(slot) {
            self.sparse[moved] = slot;
        }

        Some(value)
    }

    pub fn get(&self, key: usize) -> Option<&T> {
        if self.contains(key) {
            Some(&self.values[self.sparse[key]])
        } else {
            None
        }
    }

    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.values.choose(rng)
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}
