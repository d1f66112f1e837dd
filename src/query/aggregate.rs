//! Aggregate functions
//!
//! `sum` and `count` return zero on empty input.
//! `average`, `min` and `max` are undefined on empty input and fail with
//! `InvalidAggregateDomain` instead of returning a default.
//!
//! Sums never wrap or panic: integers accumulate in `i128`, decimals use
//! checked addition, and a total that does not fit fails with
//! `NumericOverflow`.

use rust_decimal::Decimal;

use super::errors::{AggregateFunction, QueryError, QueryResult};

/// Numeric element types the aggregates operate over
pub trait Numeric: Copy {
    /// Running total type
    type Acc: Copy;

    /// Type produced by `average`
    type Mean;

    /// Empty running total
    fn zero() -> Self::Acc;

    /// Adds one value; `None` on overflow
    fn accumulate(acc: Self::Acc, value: Self) -> Option<Self::Acc>;

    /// Converts a finished total back to the element type; `None` if it does not fit
    fn narrow(acc: Self::Acc) -> Option<Self>;

    /// Divides a non-empty total by its element count
    fn mean(acc: Self::Acc, count: usize) -> Self::Mean;
}

impl Numeric for Decimal {
    type Acc = Decimal;
    type Mean = Decimal;

    fn zero() -> Decimal {
        Decimal::ZERO
    }

    fn accumulate(acc: Decimal, value: Decimal) -> Option<Decimal> {
        acc.checked_add(value)
    }

    fn narrow(acc: Decimal) -> Option<Decimal> {
        Some(acc)
    }

    fn mean(acc: Decimal, count: usize) -> Decimal {
        acc / Decimal::from(count)
    }
}

impl Numeric for f64 {
    type Acc = f64;
    type Mean = f64;

    fn zero() -> f64 {
        0.0
    }

    fn accumulate(acc: f64, value: f64) -> Option<f64> {
        Some(acc + value)
    }

    fn narrow(acc: f64) -> Option<f64> {
        Some(acc)
    }

    fn mean(acc: f64, count: usize) -> f64 {
        acc / count as f64
    }
}

macro_rules! integer_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                type Acc = i128;
                type Mean = f64;

                fn zero() -> i128 {
                    0
                }

                fn accumulate(acc: i128, value: Self) -> Option<i128> {
                    acc.checked_add(i128::try_from(value).ok()?)
                }

                fn narrow(acc: i128) -> Option<Self> {
                    <$t>::try_from(acc).ok()
                }

                fn mean(acc: i128, count: usize) -> f64 {
                    acc as f64 / count as f64
                }
            }
        )*
    };
}

integer_numeric!(i32, i64, u32, u64, usize);

/// Sums the values; zero on empty input
///
/// Fails with `NumericOverflow` if the total does not fit the element type.
pub fn sum<N, I>(values: I) -> QueryResult<N>
where
    N: Numeric,
    I: IntoIterator<Item = N>,
{
    let (total, _) = fold_total(values, AggregateFunction::Sum)?;
    N::narrow(total).ok_or_else(|| overflow(AggregateFunction::Sum))
}

/// Counts the elements; zero on empty input
pub fn count<I: IntoIterator>(values: I) -> usize {
    values.into_iter().count()
}

/// Arithmetic mean of the values
///
/// Fails on empty input: an undefined mean is never reported as zero.
pub fn average<N, I>(values: I) -> QueryResult<N::Mean>
where
    N: Numeric,
    I: IntoIterator<Item = N>,
{
    let (total, n) = fold_total(values, AggregateFunction::Average)?;

    if n == 0 {
        tracing::debug!(function = "average", "aggregate over empty sequence");
        return Err(QueryError::empty_aggregate(AggregateFunction::Average));
    }

    Ok(N::mean(total, n))
}

fn fold_total<N, I>(values: I, function: AggregateFunction) -> QueryResult<(N::Acc, usize)>
where
    N: Numeric,
    I: IntoIterator<Item = N>,
{
    let mut total = N::zero();
    let mut n = 0usize;
    for value in values {
        total = N::accumulate(total, value).ok_or_else(|| overflow(function))?;
        n += 1;
    }
    Ok((total, n))
}

fn overflow(function: AggregateFunction) -> QueryError {
    tracing::debug!(function = function.as_str(), "aggregate overflowed");
    QueryError::overflow(function)
}

/// Smallest value; the first one wins among equals
pub fn min<T, I>(values: I) -> QueryResult<T>
where
    T: PartialOrd,
    I: IntoIterator<Item = T>,
{
    extreme(values, AggregateFunction::Min, |candidate, best| candidate < best)
}

/// Largest value; the first one wins among equals
pub fn max<T, I>(values: I) -> QueryResult<T>
where
    T: PartialOrd,
    I: IntoIterator<Item = T>,
{
    extreme(values, AggregateFunction::Max, |candidate, best| candidate > best)
}

fn extreme<T, I, F>(values: I, function: AggregateFunction, replaces: F) -> QueryResult<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T, &T) -> bool,
{
    let mut iter = values.into_iter();
    let first = match iter.next() {
        Some(v) => v,
        None => {
            tracing::debug!(function = function.as_str(), "aggregate over empty sequence");
            return Err(QueryError::empty_aggregate(function));
        }
    };

    Ok(iter.fold(first, |best, candidate| {
        if replaces(&candidate, &best) {
            candidate
        } else {
            best
        }
    }))
}
