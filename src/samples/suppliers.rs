//! Customers matched to suppliers in the same city and country

use crate::model::{Customer, DataSource, Supplier};
use crate::query::{Correlated, GroupJoined, Query};

/// Each customer with a lazy query of the suppliers sharing its location
///
/// The supplier matches are recomputed whenever they are enumerated.
pub fn suppliers_by_location<'a, D>(
    data: &'a D,
) -> Query<'a, Correlated<'a, &'a Customer, &'a Supplier>>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers()).correlate(
        Query::from_slice(data.suppliers()),
        |c| c.location_key(),
        |s| s.location_key(),
    )
}

/// Each customer with the suppliers sharing its location, via group join
pub fn suppliers_by_location_grouped<'a, D>(
    data: &'a D,
) -> Query<'a, GroupJoined<&'a Customer, &'a Supplier>>
where
    D: DataSource + ?Sized,
{
    Query::from_slice(data.customers()).group_join(
        Query::from_slice(data.suppliers()),
        |c| c.location_key(),
        |s| s.location_key(),
    )
}
