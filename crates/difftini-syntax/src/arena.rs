use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Typed index into an [`Arena`].
pub struct Key<T>(u32, PhantomData<fn() -> T>);

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl<T> std::hash::Hash for Key<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Key<T> {}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> Key<T> {
    pub fn new(index: u32) -> Self {
        Self(index, PhantomData)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Append-only storage handing out [`Key`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Default::default() }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn alloc(&mut self, value: T) -> Key<T> {
        let idx = self.items.len() as u32;
        self.items.push(value);
        Key::new(idx)
    }

    pub fn get(&self, key: Key<T>) -> Option<&T> {
        self.items.get(key.index() as usize)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Index<Key<T>> for Arena<T> {
    type Output = T;
    fn index(&self, index: Key<T>) -> &Self::Output {
        &self.items[index.index() as usize]
    }
}

impl<T> IndexMut<Key<T>> for Arena<T> {
    fn index_mut(&mut self, index: Key<T>) -> &mut Self::Output {
        &mut self.items[index.index() as usize]
    }
}

/// Side table holding one `V` for every key of an `Arena<T>`.
#[derive(Debug, Clone)]
pub struct ArenaMap<T, V> {
    values: Vec<V>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, V: Default + Clone> ArenaMap<T, V> {
    /// Creates a table covering every key of `arena`, filled with `V::default()`.
    pub fn for_arena(arena: &Arena<T>) -> Self {
        Self { values: vec![V::default(); arena.len()], _marker: PhantomData }
    }
}

impl<T, V> Index<Key<T>> for ArenaMap<T, V> {
    type Output = V;
    fn index(&self, index: Key<T>) -> &Self::Output {
        &self.values[index.index() as usize]
    }
}

impl<T, V> IndexMut<Key<T>> for ArenaMap<T, V> {
    fn index_mut(&mut self, index: Key<T>) -> &mut Self::Output {
        &mut self.values[index.index() as usize]
    }
}
