//! One-hop relationship resolution over hydrated entities.
//!
//! Order is whatever the store returned: "first" means first in edge order,
//! and mapped sequences follow edge order without re-sorting.

use crate::model::{Entity, Record};
use crate::schema::rel;
use crate::Result;

/// Far end of the first `alias` edge whose far node satisfies `pred`.
pub fn find_first<'e, P>(entity: &'e Entity, alias: &str, mut pred: P) -> Option<&'e Entity>
where
    P: FnMut(&Entity) -> bool,
{
    entity
        .edges(alias)
        .iter()
        .map(|edge| edge.other_node())
        .find(|other| pred(other))
}

/// Map every far end of `alias` through `f`, in edge order.
///
/// Stops at the first error.
pub fn map_far<T, F>(entity: &Entity, alias: &str, f: F) -> Result<Vec<T>>
where
    F: FnMut(&Entity) -> Result<T>,
{
    entity
        .edges(alias)
        .iter()
        .map(|edge| edge.other_node())
        .map(f)
        .collect()
}

/// The ambassador's primary account: first owned account flagged `is_primary`.
pub fn primary_account(ambassador: &Entity) -> Option<&Entity> {
    find_first(ambassador, rel::OWNS_ACCOUNT, |account| account.flag("is_primary"))
}
