//! Review Graph - In-memory arena of restaurants, customers and reviews
//!
//! Entities live in per-type arenas keyed by identifier. Reviews point at
//! their customer and restaurant by id, and the reverse direction is kept in
//! two indexes instead of back-pointers, so there is no cyclic ownership.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use crate::customer::{Customer, NewCustomer};
use crate::entity::Entity;
use crate::id::{CustomerId, RestaurantId, ReviewId};
use crate::restaurant::{NewRestaurant, Restaurant};
use crate::review::{NewReview, Review};
use crate::storage::{Repository, ReviewIndex, Store};
use crate::{Error, Result};

/// In-memory store implementing the same repository interface as `SqliteStore`.
///
/// Useful for tests and for running derived queries over a snapshot
/// loaded from disk.
#[derive(Debug, Default, Clone)]
pub struct ReviewGraph {
    restaurants: BTreeMap<RestaurantId, Restaurant>,
    customers: BTreeMap<CustomerId, Customer>,
    reviews: BTreeMap<ReviewId, Review>,
    /// Review ids per customer (derived)
    reviews_by_customer: HashMap<CustomerId, BTreeSet<ReviewId>>,
    /// Review ids per restaurant (derived)
    reviews_by_restaurant: HashMap<RestaurantId, BTreeSet<ReviewId>>,
    // Highest id handed out so far; ids are never reused.
    last_restaurant_id: i64,
    last_customer_id: i64,
    last_review_id: i64,
}

impl ReviewGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every entity of another store, keeping identifiers.
    pub fn load<S: Store>(source: &S) -> Result<Self> {
        let mut graph = Self::new();
        for restaurant in source.restaurants()? {
            graph.last_restaurant_id = graph.last_restaurant_id.max(restaurant.id.get());
            graph.restaurants.insert(restaurant.id, restaurant);
        }
        for customer in source.customers()? {
            graph.last_customer_id = graph.last_customer_id.max(customer.id.get());
            graph.customers.insert(customer.id, customer);
        }
        for review in source.reviews()? {
            graph.last_review_id = graph.last_review_id.max(review.id.get());
            graph.index_review(&review);
            graph.reviews.insert(review.id, review);
        }
        tracing::debug!(
            "Loaded graph: {} restaurants, {} customers, {} reviews",
            graph.restaurants.len(),
            graph.customers.len(),
            graph.reviews.len()
        );
        Ok(graph)
    }

    fn index_review(&mut self, review: &Review) {
        self.reviews_by_customer
            .entry(review.customer_id)
            .or_default()
            .insert(review.id);
        self.reviews_by_restaurant
            .entry(review.restaurant_id)
            .or_default()
            .insert(review.id);
    }

    fn unindex_review(&mut self, review: &Review) {
        if let Some(ids) = self.reviews_by_customer.get_mut(&review.customer_id) {
            ids.remove(&review.id);
            if ids.is_empty() {
                self.reviews_by_customer.remove(&review.customer_id);
            }
        }
        if let Some(ids) = self.reviews_by_restaurant.get_mut(&review.restaurant_id) {
            ids.remove(&review.id);
            if ids.is_empty() {
                self.reviews_by_restaurant.remove(&review.restaurant_id);
            }
        }
    }

    fn check_references(&self, customer: CustomerId, restaurant: RestaurantId) -> Result<()> {
        if !self.customers.contains_key(&customer) {
            return Err(Error::DanglingReference {
                entity: Customer::NAME,
                id: customer.get(),
            });
        }
        if !self.restaurants.contains_key(&restaurant) {
            return Err(Error::DanglingReference {
                entity: Restaurant::NAME,
                id: restaurant.get(),
            });
        }
        Ok(())
    }

    fn collect_reviews(&self, ids: Option<&BTreeSet<ReviewId>>) -> Vec<Review> {
        ids.map(|ids| ids.iter().filter_map(|id| self.reviews.get(id)).cloned().collect())
            .unwrap_or_default()
    }
}

fn not_found<E: Entity>(id: E::Id) -> Error {
    Error::NotFound {
        entity: E::NAME,
        id: id.into(),
    }
}

impl Repository<Restaurant> for ReviewGraph {
    fn get(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        Ok(self.restaurants.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<Restaurant>> {
        Ok(self.restaurants.values().cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.restaurants.len())
    }

    fn insert(&mut self, new: NewRestaurant) -> Result<Restaurant> {
        self.last_restaurant_id += 1;
        let restaurant = Restaurant::from_new(RestaurantId(self.last_restaurant_id), new);
        self.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    fn update(&mut self, restaurant: &Restaurant) -> Result<()> {
        let slot = self
            .restaurants
            .get_mut(&restaurant.id)
            .ok_or_else(|| not_found::<Restaurant>(restaurant.id))?;
        *slot = restaurant.clone();
        Ok(())
    }

    fn delete(&mut self, id: RestaurantId) -> Result<()> {
        if let Some(ids) = self.reviews_by_restaurant.get(&id) {
            return Err(Error::StillReferenced {
                entity: Restaurant::NAME,
                id: id.get(),
                reviews: ids.len(),
            });
        }
        self.restaurants
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found::<Restaurant>(id))
    }
}

impl Repository<Customer> for ReviewGraph {
    fn get(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<Customer>> {
        Ok(self.customers.values().cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.customers.len())
    }

    fn insert(&mut self, new: NewCustomer) -> Result<Customer> {
        self.last_customer_id += 1;
        let customer = Customer::from_new(CustomerId(self.last_customer_id), new);
        self.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    fn update(&mut self, customer: &Customer) -> Result<()> {
        let slot = self
            .customers
            .get_mut(&customer.id)
            .ok_or_else(|| not_found::<Customer>(customer.id))?;
        *slot = customer.clone();
        Ok(())
    }

    fn delete(&mut self, id: CustomerId) -> Result<()> {
        if let Some(ids) = self.reviews_by_customer.get(&id) {
            return Err(Error::StillReferenced {
                entity: Customer::NAME,
                id: id.get(),
                reviews: ids.len(),
            });
        }
        self.customers
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found::<Customer>(id))
    }
}

impl Repository<Review> for ReviewGraph {
    fn get(&self, id: ReviewId) -> Result<Option<Review>> {
        Ok(self.reviews.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<Review>> {
        Ok(self.reviews.values().cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.reviews.len())
    }

    fn insert(&mut self, new: NewReview) -> Result<Review> {
        self.check_references(new.customer_id, new.restaurant_id)?;
        self.last_review_id += 1;
        let review = Review::from_new(ReviewId(self.last_review_id), new);
        self.index_review(&review);
        self.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    fn update(&mut self, review: &Review) -> Result<()> {
        let previous = self
            .reviews
            .get(&review.id)
            .cloned()
            .ok_or_else(|| not_found::<Review>(review.id))?;
        self.check_references(review.customer_id, review.restaurant_id)?;
        self.unindex_review(&previous);
        self.index_review(review);
        self.reviews.insert(review.id, review.clone());
        Ok(())
    }

    fn delete(&mut self, id: ReviewId) -> Result<()> {
        let review = self.reviews.remove(&id).ok_or_else(|| not_found::<Review>(id))?;
        self.unindex_review(&review);
        Ok(())
    }
}

impl ReviewIndex for ReviewGraph {
    fn reviews_by_customer(&self, customer: CustomerId) -> Result<Vec<Review>> {
        Ok(self.collect_reviews(self.reviews_by_customer.get(&customer)))
    }

    fn reviews_by_restaurant(&self, restaurant: RestaurantId) -> Result<Vec<Review>> {
        Ok(self.collect_reviews(self.reviews_by_restaurant.get(&restaurant)))
    }

    fn delete_reviews_between(
        &mut self,
        customer: CustomerId,
        restaurant: RestaurantId,
    ) -> Result<usize> {
        let doomed: Vec<Review> = self
            .reviews_by_customer(customer)?
            .into_iter()
            .filter(|review| review.restaurant_id == restaurant)
            .collect();
        for review in &doomed {
            self.reviews.remove(&review.id);
            self.unindex_review(review);
        }
        Ok(doomed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (ReviewGraph, Restaurant, Customer) {
        let mut graph = ReviewGraph::new();
        let fish = graph.insert_restaurant(NewRestaurant::new("Fish", 200)).unwrap();
        let gideon = graph.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();
        (graph, fish, gideon)
    }

    #[test]
    fn test_ids_are_sequential_per_table() {
        let (mut graph, fish, gideon) = seeded();
        let bbq = graph.insert_restaurant(NewRestaurant::new("BBQ", 300)).unwrap();
        assert_eq!(fish.id, RestaurantId(1));
        assert_eq!(bbq.id, RestaurantId(2));
        assert_eq!(gideon.id, CustomerId(1));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (mut graph, fish, gideon) = seeded();
        let first = graph.insert_review(NewReview::new(gideon.id, fish.id, 4)).unwrap();
        Repository::<Review>::delete(&mut graph, first.id).unwrap();
        let second = graph.insert_review(NewReview::new(gideon.id, fish.id, 4)).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_review_insert_requires_existing_references() {
        let (mut graph, fish, gideon) = seeded();

        let err = graph
            .insert_review(NewReview::new(CustomerId(77), fish.id, 4))
            .unwrap_err();
        assert!(matches!(err, Error::DanglingReference { entity: "customer", id: 77 }));

        let err = graph
            .insert_review(NewReview::new(gideon.id, RestaurantId(88), 4))
            .unwrap_err();
        assert!(matches!(err, Error::DanglingReference { entity: "restaurant", id: 88 }));

        assert_eq!(graph.stats().unwrap().reviews, 0);
    }

    #[test]
    fn test_delete_referenced_restaurant_is_refused() {
        let (mut graph, fish, gideon) = seeded();
        graph.insert_review(NewReview::new(gideon.id, fish.id, 4)).unwrap();

        let err = Repository::<Restaurant>::delete(&mut graph, fish.id).unwrap_err();
        assert!(matches!(err, Error::StillReferenced { reviews: 1, .. }));
        let err = Repository::<Customer>::delete(&mut graph, gideon.id).unwrap_err();
        assert!(matches!(err, Error::StillReferenced { entity: "customer", .. }));

        gideon.delete_reviews(&mut graph, &fish).unwrap();
        Repository::<Restaurant>::delete(&mut graph, fish.id).unwrap();
        assert!(graph.restaurant(fish.id).unwrap().is_none());
    }

    #[test]
    fn test_update_moves_review_between_indexes() {
        let (mut graph, fish, gideon) = seeded();
        let bbq = graph.insert_restaurant(NewRestaurant::new("BBQ", 300)).unwrap();
        let mut review = graph.insert_review(NewReview::new(gideon.id, fish.id, 4)).unwrap();

        review.restaurant_id = bbq.id;
        review.star_rating = 2;
        Repository::<Review>::update(&mut graph, &review).unwrap();

        assert!(graph.reviews_by_restaurant(fish.id).unwrap().is_empty());
        assert_eq!(graph.reviews_by_restaurant(bbq.id).unwrap(), vec![review]);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let (mut graph, mut fish, _) = seeded();
        fish.id = RestaurantId(999);
        assert!(matches!(
            Repository::<Restaurant>::update(&mut graph, &fish),
            Err(Error::NotFound { entity: "restaurant", id: 999 })
        ));
        assert!(matches!(
            Repository::<Review>::delete(&mut graph, ReviewId(5)),
            Err(Error::NotFound { entity: "review", .. })
        ));
    }

    #[test]
    fn test_update_renames_customer() {
        let (mut graph, _, mut gideon) = seeded();
        gideon.last_name = "Omondi".to_string();
        Repository::<Customer>::update(&mut graph, &gideon).unwrap();
        assert_eq!(
            graph.customer(gideon.id).unwrap().unwrap().full_name(),
            "Gideon Omondi"
        );
    }
}
