use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, Index};

/// A vector indexed by a typed key instead of a bare `usize`.
pub struct KeyVec<K, V> {
    inner: Vec<V>,
    _phantom: PhantomData<*const K>,
}

impl<K: Key, V> KeyVec<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn insert(&mut self, value: V) -> K {
        let key = K::from_usize(self.inner.len());
        self.inner.push(value);
        key
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.inner.get(key.as_usize())
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.inner
            .iter()
            .enumerate()
            .map(|(i, v)| (K::from_usize(i), v))
    }
}

impl<K, V> Default for KeyVec<K, V> {
    fn default() -> Self {
        Self {
            inner: vec![],
            _phantom: PhantomData,
        }
    }
}

impl<K, V> Deref for KeyVec<K, V> {
    type Target = [V];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<K: Key, V> Index<K> for KeyVec<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &Self::Output {
        self.get(key).expect("key not found")
    }
}

impl<K: Key + fmt::Debug, V: fmt::Debug> fmt::Debug for KeyVec<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V: Clone> Clone for KeyVec<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _phantom: PhantomData,
        }
    }
}

pub trait Key: Copy {
    fn from_usize(n: usize) -> Self;
    fn as_usize(&self) -> usize;
}

#[macro_export]
macro_rules! declare_key_type {
    (
        $(#[$meta:meta])*
        $v:vis struct $i:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $v struct $i(pub usize);

        impl $crate::keyvec::Key for $i {
            fn from_usize(n: usize) -> Self {
                Self(n)
            }

            fn as_usize(&self) -> usize {
                self.0
            }
        }
    };
}
pub use crate::declare_key_type;

#[cfg(test)]
mod tests {
    use super::KeyVec;

    declare_key_type! {
        struct NameId;
    }

    #[test]
    fn keys_are_insertion_indices() {
        let mut names = KeyVec::<NameId, &str>::new();

        let a = names.insert("a");
        let b = names.insert("b");

        assert_eq!(a, NameId(0));
        assert_eq!(b, NameId(1));
        assert_eq!(names[b], "b");
        assert_eq!(names.get(NameId(2)), None);
        assert_eq!(names.len(), 2);
    }
}
