//! A union-find structure over arbitrary hashable keys, with support for folding one forest into
//! another and for taking the quotient of a forest under a function on its keys.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::mem::swap;

/// A partition of every key ever inserted into disjoint components.
///
/// Keys are interned into a dense table, and the forest proper is a pair of parallel vectors
/// indexed by that table. Which key represents a component is arbitrary and may change whenever a
/// lookup compresses a path; only the partition itself is meaningful.
#[derive(Clone)]
pub struct DisjointForest<K> {
    index: HashMap<K, usize>,
    keys: Vec<K>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl<K> Default for DisjointForest<K> {
    fn default() -> Self {
        DisjointForest {
            index: HashMap::new(),
            keys: Vec::new(),
            parent: Vec::new(),
            rank: Vec::new(),
        }
    }
}

impl<K> DisjointForest<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates an empty forest.
    pub fn new() -> Self {
        DisjointForest::default()
    }

    /// Creates an empty forest with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        DisjointForest {
            index: HashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
        }
    }

    /// The number of keys in the forest.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if `key` has been inserted.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Every key in the forest, in the order they were first inserted.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.keys.iter()
    }

    /// Adds `key` as a component of its own, unless it's already present.
    pub fn insert(&mut self, key: K) {
        self.intern(key);
    }

    fn intern(&mut self, key: K) -> usize {
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        let i = self.keys.len();
        self.index.insert(key.clone(), i);
        self.keys.push(key);
        self.parent.push(i);
        self.rank.push(0);
        i
    }

    fn lookup(&self, key: &K) -> Result<usize> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| Error::KeyNotFound(format!("{:?}", key)))
    }

    // Walks to the root without touching the forest, so shared readers never conflict.
    fn root(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    // Every node on the path from `x` ends up pointing straight at the root.
    fn find(&mut self, mut x: usize) -> usize {
        let root = self.root(x);
        while self.parent[x] != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    fn link(&mut self, a: usize, b: usize) {
        let mut a = self.find(a);
        let mut b = self.find(b);
        if a == b {
            return;
        }
        if self.rank[a] < self.rank[b] {
            swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        if self.rank[a] == self.rank[b] {
            self.rank[a] += 1;
        }
    }

    /// Returns the key currently representing the component containing `key`, compressing the
    /// path it took to get there.
    ///
    /// ```
    /// use commutators::DisjointForest;
    ///
    /// let mut forest = DisjointForest::new();
    /// forest.union("a", "b");
    /// let rep = *forest.representative(&"a").unwrap();
    /// assert_eq!(forest.representative(&rep).unwrap(), &rep);
    /// assert!(forest.representative(&"z").is_err());
    /// ```
    pub fn representative(&mut self, key: &K) -> Result<&K> {
        let i = self.lookup(key)?;
        let root = self.find(i);
        Ok(&self.keys[root])
    }

    /// Returns `true` if `a` and `b` are in the same component. Both must be present.
    ///
    /// This never compresses paths, so any number of threads may ask at once.
    pub fn are_related(&self, a: &K, b: &K) -> Result<bool> {
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        Ok(self.root(a) == self.root(b))
    }

    /// Puts `key` and `rep` in the same component, inserting either of them if necessary.
    pub fn union(&mut self, key: K, rep: K) {
        let a = self.intern(key);
        let b = self.intern(rep);
        self.link(a, b);
    }

    /// Puts every key in `keys` into the component of the first one, keeping any relations they
    /// already had.
    ///
    /// ```
    /// use commutators::DisjointForest;
    ///
    /// let mut forest = DisjointForest::new();
    /// forest.union_all(vec!["x", "y", "z"]).unwrap();
    /// assert!(forest.are_related(&"x", &"z").unwrap());
    /// assert!(forest.union_all(Vec::<&str>::new()).is_err());
    /// ```
    pub fn union_all<I>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
    {
        let mut keys = keys.into_iter();
        let first = keys.next().ok_or(Error::EmptyInput("union_all"))?;
        let anchor = self.intern(first);
        for key in keys {
            let i = self.intern(key);
            self.link(i, anchor);
        }
        Ok(())
    }

    /// Folds every relation in `other` into this forest. Components of the two forests which share
    /// a key become a single component.
    ///
    /// Only `other`'s partition matters, not which keys happen to represent its components.
    pub fn merge_from(&mut self, other: &DisjointForest<K>) {
        for (i, key) in other.keys.iter().enumerate() {
            let rep = &other.keys[other.root(i)];
            self.union(key.clone(), rep.clone());
        }
    }

    /// Builds the quotient of this forest under `transform`: a new forest over the images of every
    /// key, where two images are related if any of their preimages were. Keys which `transform`
    /// sends to the same image end up in the same component.
    ///
    /// Every key's image is reconciled against the image of that key's own representative in this
    /// forest, so the resulting partition doesn't depend on the order keys are visited in.
    ///
    /// ```
    /// use commutators::DisjointForest;
    ///
    /// let mut forest = DisjointForest::new();
    /// forest.union(1, 2);
    /// forest.union(3, 4);
    /// let halves = forest.map_keys(|&k| k % 2);
    /// assert!(halves.are_related(&0, &1).unwrap());
    /// ```
    pub fn map_keys<K2, F>(&self, mut transform: F) -> DisjointForest<K2>
    where
        K2: Clone + Eq + Hash + fmt::Debug,
        F: FnMut(&K) -> K2,
    {
        let images: Vec<K2> = self.keys.iter().map(&mut transform).collect();
        let mut quotient = DisjointForest::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            quotient.union(image.clone(), images[self.root(i)].clone());
        }
        quotient
    }

    /// The current partition, as groups of keys. Each group is in insertion order, and groups are
    /// ordered by their earliest-inserted key.
    pub fn components(&self) -> Vec<Vec<&K>> {
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<&K>> = Vec::new();
        for (i, key) in self.keys.iter().enumerate() {
            let slot = *slot_of_root.entry(self.root(i)).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(key);
        }
        groups
    }

    /// The number of components.
    pub fn component_count(&self) -> usize {
        (0..self.keys.len()).filter(|&i| self.parent[i] == i).count()
    }
}

impl<K> fmt::Debug for DisjointForest<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.components()).finish()
    }
}
