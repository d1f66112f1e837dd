//! Multi-key stable sorting
//!
//! A `SortSpec` is a primary key followed by tie-break keys. Each key has its
//! own direction. Later keys only break ties left by earlier ones, and
//! elements equal on every key keep their source order.

use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

struct SortKey<'a, T> {
    compare: Box<dyn Fn(&T, &T) -> Ordering + 'a>,
    direction: SortDirection,
}

/// Ordered list of sort keys
pub struct SortSpec<'a, T> {
    keys: Vec<SortKey<'a, T>>,
}

impl<'a, T> SortSpec<'a, T> {
    /// Primary key, ascending
    pub fn asc<K, F>(key_fn: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        Self { keys: Vec::new() }.then_by(key_fn, SortDirection::Asc)
    }

    /// Primary key, descending
    pub fn desc<K, F>(key_fn: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        Self { keys: Vec::new() }.then_by(key_fn, SortDirection::Desc)
    }

    /// Adds an ascending tie-break key
    pub fn then_asc<K, F>(self, key_fn: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.then_by(key_fn, SortDirection::Asc)
    }

    /// Adds a descending tie-break key
    pub fn then_desc<K, F>(self, key_fn: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.then_by(key_fn, SortDirection::Desc)
    }

    /// Adds a tie-break key with an explicit direction
    pub fn then_by<K, F>(mut self, key_fn: F, direction: SortDirection) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.keys.push(SortKey {
            compare: Box::new(move |a, b| key_fn(a).cmp(&key_fn(b))),
            direction,
        });
        self
    }

    /// Number of keys, primary included
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Directions in key order
    pub fn directions(&self) -> Vec<SortDirection> {
        self.keys.iter().map(|k| k.direction).collect()
    }

    /// Compares two elements key by key
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for key in &self.keys {
            let ordering = key.direction.apply((key.compare)(a, b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sorts in place. Stable.
    pub fn sort(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Collects `source` and returns it ordered by `spec`
pub fn order_by<T, I>(source: I, spec: &SortSpec<'_, T>) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    let mut items: Vec<T> = source.into_iter().collect();
    spec.sort(&mut items);
    tracing::trace!(rows = items.len(), keys = spec.len(), "order_by evaluated");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        year: i32,
        month: u32,
        total: i64,
        name: &'static str,
    }

    fn row(id: &'static str, year: i32, month: u32, total: i64, name: &'static str) -> Row {
        Row {
            id,
            year,
            month,
            total,
            name,
        }
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let rows = vec![row("c", 1998, 1, 0, ""), row("a", 1996, 1, 0, ""), row("b", 1997, 1, 0, "")];
        let sorted = order_by(rows, &SortSpec::asc(|r: &Row| r.year));
        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_descending() {
        let rows = vec![row("c", 1998, 1, 0, ""), row("a", 1996, 1, 0, ""), row("b", 1997, 1, 0, "")];
        let sorted = order_by(rows, &SortSpec::desc(|r: &Row| r.year));
        assert_eq!(ids(&sorted), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_stable() {
        let rows = vec![row("a", 1997, 1, 0, ""), row("b", 1997, 1, 0, ""), row("c", 1997, 1, 0, "")];
        let sorted = order_by(rows, &SortSpec::asc(|r: &Row| r.year));
        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mixed_directions_break_ties_in_order() {
        let rows = vec![
            row("1", 1997, 2, 100, "Zeta"),
            row("2", 1996, 5, 10, "Alpha"),
            row("3", 1997, 2, 300, "Beta"),
            row("4", 1997, 1, 50, "Gamma"),
            row("5", 1997, 2, 100, "Alpha"),
        ];

        let spec = SortSpec::asc(|r: &Row| r.year)
            .then_asc(|r: &Row| r.month)
            .then_desc(|r: &Row| r.total)
            .then_asc(|r: &Row| r.name);

        let sorted = order_by(rows, &spec);
        assert_eq!(ids(&sorted), vec!["2", "4", "3", "5", "1"]);
        assert_eq!(
            spec.directions(),
            vec![SortDirection::Asc, SortDirection::Asc, SortDirection::Desc, SortDirection::Asc]
        );
    }

    #[test]
    fn test_sorting_twice_is_identical() {
        let rows = vec![
            row("a", 1997, 3, 1, "x"),
            row("b", 1996, 3, 1, "x"),
            row("c", 1997, 3, 1, "x"),
        ];
        let spec = SortSpec::desc(|r: &Row| r.year);

        let once = order_by(rows, &spec);
        let twice = order_by(once.clone(), &spec);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_string_keys_are_lexicographic() {
        let rows = vec![row("1", 0, 0, 0, "charlie"), row("2", 0, 0, 0, "alice"), row("3", 0, 0, 0, "Bob")];
        let sorted = order_by(rows, &SortSpec::asc(|r: &Row| r.name));
        assert_eq!(ids(&sorted), vec!["3", "2", "1"]);
    }
}
