//! Repository interface
//!
//! `Repository<E>` is the per-entity CRUD capability set. `ReviewIndex` adds
//! the derived lookups that follow a review's back-references. `Store` bundles
//! both and is what the entity operations are written against, so they run
//! unchanged over `SqliteStore` and `ReviewGraph`.

use crate::customer::{Customer, NewCustomer};
use crate::entity::Entity;
use crate::id::{CustomerId, RestaurantId, ReviewId};
use crate::restaurant::{NewRestaurant, Restaurant};
use crate::review::{NewReview, Review};
use crate::{Error, Result};

/// CRUD operations for one entity type.
pub trait Repository<E: Entity> {
    /// Look up a record by identifier
    fn get(&self, id: E::Id) -> Result<Option<E>>;

    /// All records in ascending identifier order
    fn all(&self) -> Result<Vec<E>>;

    /// Number of stored records
    fn count(&self) -> Result<usize>;

    /// Insert a record and return it with its assigned identifier
    fn insert(&mut self, new: E::New) -> Result<E>;

    /// Overwrite an existing record; `NotFound` if the identifier is unknown
    fn update(&mut self, entity: &E) -> Result<()>;

    /// Remove a record; `NotFound` if the identifier is unknown
    fn delete(&mut self, id: E::Id) -> Result<()>;
}

/// Derived review collections, computed from the review set on demand.
pub trait ReviewIndex {
    /// Reviews written by a customer, ascending review id
    fn reviews_by_customer(&self, customer: CustomerId) -> Result<Vec<Review>>;

    /// Reviews of a restaurant, ascending review id
    fn reviews_by_restaurant(&self, restaurant: RestaurantId) -> Result<Vec<Review>>;

    /// Remove every review linking `customer` to `restaurant`, returning how many went
    fn delete_reviews_between(
        &mut self,
        customer: CustomerId,
        restaurant: RestaurantId,
    ) -> Result<usize>;
}

/// Row counts per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub restaurants: usize,
    pub customers: usize,
    pub reviews: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Restaurants: {}", self.restaurants)?;
        writeln!(f, "  Customers: {}", self.customers)?;
        writeln!(f, "  Reviews: {}", self.reviews)
    }
}

/// Everything the entity operations need from a backing store.
///
/// The typed helpers exist because `Repository<E>` cannot infer `E` from
/// `E::Id` or `E::New` at the call site.
pub trait Store:
    Repository<Restaurant> + Repository<Customer> + Repository<Review> + ReviewIndex
{
    fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        <Self as Repository<Restaurant>>::get(self, id)
    }

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        <Self as Repository<Customer>>::get(self, id)
    }

    fn review(&self, id: ReviewId) -> Result<Option<Review>> {
        <Self as Repository<Review>>::get(self, id)
    }

    fn restaurants(&self) -> Result<Vec<Restaurant>> {
        <Self as Repository<Restaurant>>::all(self)
    }

    fn customers(&self) -> Result<Vec<Customer>> {
        <Self as Repository<Customer>>::all(self)
    }

    fn reviews(&self) -> Result<Vec<Review>> {
        <Self as Repository<Review>>::all(self)
    }

    fn insert_restaurant(&mut self, new: NewRestaurant) -> Result<Restaurant> {
        <Self as Repository<Restaurant>>::insert(self, new)
    }

    fn insert_customer(&mut self, new: NewCustomer) -> Result<Customer> {
        <Self as Repository<Customer>>::insert(self, new)
    }

    fn insert_review(&mut self, new: NewReview) -> Result<Review> {
        <Self as Repository<Review>>::insert(self, new)
    }

    /// Follow a back-reference that must exist
    fn resolve_restaurant(&self, id: RestaurantId) -> Result<Restaurant> {
        self.restaurant(id)?.ok_or(Error::DanglingReference {
            entity: Restaurant::NAME,
            id: id.get(),
        })
    }

    /// Follow a back-reference that must exist
    fn resolve_customer(&self, id: CustomerId) -> Result<Customer> {
        self.customer(id)?.ok_or(Error::DanglingReference {
            entity: Customer::NAME,
            id: id.get(),
        })
    }

    fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            restaurants: <Self as Repository<Restaurant>>::count(self)?,
            customers: <Self as Repository<Customer>>::count(self)?,
            reviews: <Self as Repository<Review>>::count(self)?,
        })
    }
}

impl<T> Store for T where
    T: Repository<Restaurant> + Repository<Customer> + Repository<Review> + ReviewIndex
{
}
