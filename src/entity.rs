//! The `Entity` trait shared by every persisted record.

use std::fmt;
use std::hash::Hash;

/// A persisted record with a stable identifier.
///
/// `New` is the insert payload: everything except the identifier, which the
/// store assigns.
pub trait Entity: Clone + fmt::Debug {
    type Id: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Into<i64>;
    type New;

    /// Singular name used in error messages and logs
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// Attach a store-assigned identifier to an insert payload
    fn from_new(id: Self::Id, new: Self::New) -> Self;
}
