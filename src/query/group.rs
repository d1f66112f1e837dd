//! Grouping engine
//!
//! Partitions a sequence by a key into `(key, members)` groups.
//!
//! # Ordering
//!
//! - Groups appear in the order their key is first encountered
//! - Members keep their relative order from the source
//!
//! Nested grouping is just `group_by` applied again to a group's members.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

use super::errors::QueryResult;
use super::key::{CompositeKey, KeyShape};
use super::sorter::SortSpec;

/// A key and the source elements that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grouping<K, T> {
    key: K,
    items: Vec<T>,
}

impl<K, T> Grouping<K, T> {
    pub fn new(key: K, items: Vec<T>) -> Self {
        Self { key, items }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Members in source order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn into_parts(self) -> (K, Vec<T>) {
        (self.key, self.items)
    }

    /// Reorders the members with a stable multi-key sort
    pub fn sorted_by(mut self, spec: &SortSpec<'_, T>) -> Self {
        spec.sort(&mut self.items);
        self
    }
}

impl<K, T> IntoIterator for Grouping<K, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'g, K, T> IntoIterator for &'g Grouping<K, T> {
    type Item = &'g T;
    type IntoIter = std::slice::Iter<'g, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Groups `source` by `key_fn`
///
/// An empty source yields no groups.
pub fn group_by<T, K, I, F>(source: I, key_fn: F) -> Vec<Grouping<K, T>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();

    for item in source {
        groups.entry(key_fn(&item)).or_default().push(item);
    }

    tracing::trace!(groups = groups.len(), "group_by evaluated");

    groups
        .into_iter()
        .map(|(key, items)| Grouping::new(key, items))
        .collect()
}

/// Groups `source` by a dynamic composite key
///
/// Fails at the first element whose key does not match the shape of the
/// keys before it.
pub fn try_group_by<T, I, F>(
    stage: &str,
    source: I,
    key_fn: F,
) -> QueryResult<Vec<Grouping<CompositeKey, T>>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> CompositeKey,
{
    let mut shape = KeyShape::new();
    let mut groups: IndexMap<CompositeKey, Vec<T>> = IndexMap::new();

    for item in source {
        let key = key_fn(&item);
        if let Err(e) = shape.check(stage, &key) {
            tracing::debug!(stage, key = %key, "malformed grouping key");
            return Err(e);
        }
        groups.entry(key).or_default().push(item);
    }

    Ok(groups
        .into_iter()
        .map(|(key, items)| Grouping::new(key, items))
        .collect())
}
