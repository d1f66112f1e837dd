//! Equi-join engine
//!
//! Two shapes of join on an exact-equality key:
//!
//! - Correlated join: each left element carries a lazy query of the right
//!   elements whose key equals its own. The matches are recomputed against
//!   the right source every time they are enumerated.
//! - Group join: the right side is partitioned by key once, then each left
//!   element is paired with its group, or an empty group when there is none.
//!
//! Neither shape ever drops a left element.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::errors::QueryResult;
use super::group::group_by;
use super::key::{CompositeKey, KeyShape};
use super::pipeline::Query;

/// A left element and its lazily evaluated matches
#[derive(Clone, Serialize)]
pub struct Correlated<'a, L, R: 'a> {
    pub left: L,
    pub matches: Query<'a, R>,
}

/// A left element and its materialized, possibly empty, matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupJoined<L, R> {
    pub left: L,
    pub matches: Vec<R>,
}

impl<L, R> GroupJoined<L, R> {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Partitions the right side of a join by key
pub fn partition<R, K, I, F>(right: I, key_fn: F) -> HashMap<K, Vec<R>>
where
    I: IntoIterator<Item = R>,
    K: Eq + Hash,
    F: Fn(&R) -> K,
{
    group_by(right, key_fn)
        .into_iter()
        .map(|g| g.into_parts())
        .collect()
}

/// Pairs one left element with its partition
pub fn pair_with<L, R, K, F>(left: L, partitions: &HashMap<K, Vec<R>>, key_fn: F) -> GroupJoined<L, R>
where
    R: Clone,
    K: Eq + Hash,
    F: Fn(&L) -> K,
{
    let matches = partitions.get(&key_fn(&left)).cloned().unwrap_or_default();
    GroupJoined { left, matches }
}

/// Eager group join
pub fn group_join<L, R, K, LI, RI, LK, RK>(
    left: LI,
    right: RI,
    left_key: LK,
    right_key: RK,
) -> Vec<GroupJoined<L, R>>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    R: Clone,
    K: Eq + Hash,
    LK: Fn(&L) -> K,
    RK: Fn(&R) -> K,
{
    let partitions = partition(right, right_key);
    left.into_iter()
        .map(|l| pair_with(l, &partitions, &left_key))
        .collect()
}

/// Group join on dynamic composite keys
///
/// Left and right keys share one shape. The first inconsistent key on
/// either side fails the join.
pub fn try_group_join<L, R, LI, RI, LK, RK>(
    stage: &str,
    left: LI,
    right: RI,
    left_key: LK,
    right_key: RK,
) -> QueryResult<Vec<GroupJoined<L, R>>>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    R: Clone,
    LK: Fn(&L) -> CompositeKey,
    RK: Fn(&R) -> CompositeKey,
{
    let mut shape = KeyShape::new();

    let mut partitions: HashMap<CompositeKey, Vec<R>> = HashMap::new();
    for item in right {
        let key = right_key(&item);
        shape.check(stage, &key)?;
        partitions.entry(key).or_default().push(item);
    }

    let mut joined = Vec::new();
    for l in left {
        let key = left_key(&l);
        shape.check(stage, &key)?;
        let matches = partitions.get(&key).cloned().unwrap_or_default();
        joined.push(GroupJoined { left: l, matches });
    }

    tracing::trace!(stage, rows = joined.len(), "group join evaluated");
    Ok(joined)
}
