//! Lazy, re-runnable query pipelines
//!
//! A `Query` is a description of how to produce a sequence, not the sequence
//! itself. Chaining stages performs no work. Every call to `iter()` runs the
//! whole chain again from the original sources, so a built query can be
//! enumerated any number of times and always reflects the current sources.
//!
//! # Stages
//!
//! - Streaming: `filter`, `map`, `correlate`, `group_join` (left side)
//! - Barrier: `group_by`, `try_group_by`, `sorted`, `sorted_ok`, and the
//!   right side of `group_join`, which collect their input when enumerated

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use serde::{Serialize, Serializer};

use super::errors::QueryResult;
use super::group::{self, Grouping};
use super::join::{self, Correlated, GroupJoined};
use super::key::CompositeKey;
use super::sorter::{self, SortSpec};

type Source<'a, T> = Rc<dyn Fn() -> Box<dyn Iterator<Item = T> + 'a> + 'a>;

/// A lazily evaluated sequence of `T`
pub struct Query<'a, T> {
    source: Source<'a, T>,
}

impl<'a, T> Clone for Query<'a, T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<'a, T> fmt::Debug for Query<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").finish_non_exhaustive()
    }
}

impl<'a, T: 'a> Query<'a, &'a T> {
    /// Query over a borrowed collection
    pub fn from_slice(items: &'a [T]) -> Self {
        Query::from_fn(move || items.iter())
    }
}

impl<'a, T: 'a> Query<'a, T> {
    /// Query whose source is produced by `f` on every enumeration
    pub fn from_fn<F, I>(f: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            source: Rc::new(move || Box::new(f().into_iter()) as Box<dyn Iterator<Item = T> + 'a>),
        }
    }

    /// Query that never yields anything
    pub fn empty() -> Self {
        Query::from_fn(std::iter::empty)
    }

    /// Runs the pipeline
    pub fn iter(&self) -> Box<dyn Iterator<Item = T> + 'a> {
        (self.source)()
    }

    /// Runs the pipeline and materializes the output
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Runs the pipeline and counts the output
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Keeps elements satisfying `predicate`
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        let upstream = self.source;
        let predicate = Rc::new(predicate);
        Query::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            upstream().filter(move |item| predicate(item))
        })
    }

    /// Projects every element
    pub fn map<U, F>(self, projection: F) -> Query<'a, U>
    where
        U: 'a,
        F: Fn(T) -> U + 'a,
    {
        let upstream = self.source;
        let projection = Rc::new(projection);
        Query::from_fn(move || {
            let projection = Rc::clone(&projection);
            upstream().map(move |item| projection(item))
        })
    }

    /// Groups by key in first-occurrence order
    pub fn group_by<K, F>(self, key_fn: F) -> Query<'a, Grouping<K, T>>
    where
        K: Eq + Hash + 'a,
        F: Fn(&T) -> K + 'a,
    {
        let upstream = self.source;
        Query::from_fn(move || group::group_by(upstream(), &key_fn))
    }

    /// Groups by a dynamic composite key
    ///
    /// A malformed key ends the enumeration with a single error.
    pub fn try_group_by<F>(
        self,
        stage: &'static str,
        key_fn: F,
    ) -> Query<'a, QueryResult<Grouping<CompositeKey, T>>>
    where
        F: Fn(&T) -> CompositeKey + 'a,
    {
        let upstream = self.source;
        Query::from_fn(move || match group::try_group_by(stage, upstream(), &key_fn) {
            Ok(groups) => groups.into_iter().map(Ok).collect::<Vec<_>>(),
            Err(e) => vec![Err(e)],
        })
    }

    /// Stable multi-key sort
    pub fn sorted(self, spec: SortSpec<'a, T>) -> Self {
        let upstream = self.source;
        Query::from_fn(move || sorter::order_by(upstream(), &spec))
    }

    /// Pairs each element with a lazy query of matching right elements
    pub fn correlate<R, K, LK, RK>(
        self,
        right: Query<'a, R>,
        left_key: LK,
        right_key: RK,
    ) -> Query<'a, Correlated<'a, T, R>>
    where
        R: 'a,
        K: PartialEq + 'a,
        LK: Fn(&T) -> K + 'a,
        RK: Fn(&R) -> K + 'a,
    {
        let upstream = self.source;
        let left_key = Rc::new(left_key);
        let right_key = Rc::new(right_key);
        Query::from_fn(move || {
            let left_key = Rc::clone(&left_key);
            let right_key = Rc::clone(&right_key);
            let right = right.clone();
            upstream().map(move |left| {
                let key = left_key(&left);
                let right_key = Rc::clone(&right_key);
                let matches = right.clone().filter(move |r| right_key(r) == key);
                Correlated { left, matches }
            })
        })
    }

    /// Pairs each element with its, possibly empty, group of right elements
    pub fn group_join<R, K, LK, RK>(
        self,
        right: Query<'a, R>,
        left_key: LK,
        right_key: RK,
    ) -> Query<'a, GroupJoined<T, R>>
    where
        R: Clone + 'a,
        K: Eq + Hash + 'a,
        LK: Fn(&T) -> K + 'a,
        RK: Fn(&R) -> K + 'a,
    {
        let upstream = self.source;
        let left_key = Rc::new(left_key);
        Query::from_fn(move || {
            let partitions = join::partition(right.iter(), &right_key);
            let left_key = Rc::clone(&left_key);
            upstream().map(move |left| join::pair_with(left, &partitions, &*left_key))
        })
    }

    /// Group join on dynamic composite keys
    ///
    /// A malformed key on either side ends the enumeration with a single error.
    pub fn try_group_join<R, LK, RK>(
        self,
        stage: &'static str,
        right: Query<'a, R>,
        left_key: LK,
        right_key: RK,
    ) -> Query<'a, QueryResult<GroupJoined<T, R>>>
    where
        R: Clone + 'a,
        LK: Fn(&T) -> CompositeKey + 'a,
        RK: Fn(&R) -> CompositeKey + 'a,
    {
        let upstream = self.source;
        Query::from_fn(move || {
            match join::try_group_join(stage, upstream(), right.iter(), &left_key, &right_key) {
                Ok(joined) => joined.into_iter().map(Ok).collect::<Vec<_>>(),
                Err(e) => vec![Err(e)],
            }
        })
    }
}

impl<'a, T: 'a> Query<'a, QueryResult<T>> {
    /// Materializes the output, stopping at the first failed element
    pub fn try_to_vec(&self) -> QueryResult<Vec<T>> {
        self.iter().collect()
    }

    /// Stable multi-key sort over successful elements
    ///
    /// Failed elements have no sort key. They are yielded first, in source
    /// order, followed by the sorted successes.
    pub fn sorted_ok(self, spec: SortSpec<'a, T>) -> Self {
        let upstream = self.source;
        Query::from_fn(move || {
            let mut failures = Vec::new();
            let mut items = Vec::new();
            for element in upstream() {
                match element {
                    Ok(item) => items.push(item),
                    Err(e) => failures.push(Err(e)),
                }
            }
            if !failures.is_empty() {
                tracing::debug!(failed = failures.len(), "sorted_ok skipped failed elements");
            }
            failures.extend(sorter::order_by(items, &spec).into_iter().map(Ok));
            failures
        })
    }
}

impl<'a, T: Serialize + 'a> Serialize for Query<'a, T> {
    /// Serializes as a sequence, enumerating the query
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
