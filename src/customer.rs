//! Customers, their reviews, and review management.

use crate::entity::Entity;
use crate::id::CustomerId;
use crate::restaurant::Restaurant;
use crate::review::{NewReview, Review};
use crate::storage::Store;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A row of the `customers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
}

/// Insert payload for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
}

impl NewCustomer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;
    type New = NewCustomer;

    const NAME: &'static str = "customer";

    fn id(&self) -> CustomerId {
        self.id
    }

    fn from_new(id: CustomerId, new: NewCustomer) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
        }
    }
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Reviews written by this customer, oldest first
    pub fn reviews<S: Store>(&self, store: &S) -> Result<Vec<Review>> {
        store.reviews_by_customer(self.id)
    }

    /// Distinct restaurants this customer reviewed, in order of first review.
    pub fn restaurants<S: Store>(&self, store: &S) -> Result<Vec<Restaurant>> {
        let mut seen = HashSet::new();
        let mut restaurants = Vec::new();
        for review in self.reviews(store)? {
            if seen.insert(review.restaurant_id) {
                restaurants.push(store.resolve_restaurant(review.restaurant_id)?);
            }
        }
        Ok(restaurants)
    }

    /// The restaurant behind this customer's highest-rated review.
    ///
    /// Fails with `EmptyCollection` when the customer has not reviewed anything.
    pub fn favorite_restaurant<S: Store>(&self, store: &S) -> Result<Restaurant> {
        let reviews = self.reviews(store)?;
        let top = Review::highest_rated(&reviews)?;
        store.resolve_restaurant(top.restaurant_id)
    }

    /// Record a new review of `restaurant`. The rating is not range-checked.
    pub fn add_review<S: Store>(
        &self,
        store: &mut S,
        restaurant: &Restaurant,
        rating: i64,
    ) -> Result<Review> {
        store.insert_review(NewReview::new(self.id, restaurant.id, rating))
    }

    /// Remove every review this customer wrote for `restaurant`.
    pub fn delete_reviews<S: Store>(&self, store: &mut S, restaurant: &Restaurant) -> Result<usize> {
        store.delete_reviews_between(self.id, restaurant.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ReviewGraph;
    use crate::restaurant::NewRestaurant;
    use crate::storage::SqliteStore;
    use crate::Error;
    use proptest::prelude::*;

    #[test]
    fn test_full_name() {
        let customer = Customer::from_new(CustomerId(1), NewCustomer::new("Gideon", "Mugere"));
        assert_eq!(customer.full_name(), "Gideon Mugere");
    }

    #[test]
    fn test_favorite_restaurant_highest_rating() {
        let mut graph = ReviewGraph::new();
        let a = graph.insert_restaurant(NewRestaurant::new("Restaurant A", 100)).unwrap();
        let b = graph.insert_restaurant(NewRestaurant::new("Restaurant B", 100)).unwrap();
        let gideon = graph.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();

        gideon.add_review(&mut graph, &a, 4).unwrap();
        gideon.add_review(&mut graph, &b, 5).unwrap();

        assert_eq!(gideon.favorite_restaurant(&graph).unwrap(), b);
    }

    #[test]
    fn test_favorite_restaurant_tie_goes_to_first_review() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert_restaurant(NewRestaurant::new("A", 1)).unwrap();
        let b = store.insert_restaurant(NewRestaurant::new("B", 1)).unwrap();
        let cynthia = store.insert_customer(NewCustomer::new("Cynthia", "Smith")).unwrap();

        cynthia.add_review(&mut store, &b, 5).unwrap();
        cynthia.add_review(&mut store, &a, 5).unwrap();

        assert_eq!(cynthia.favorite_restaurant(&store).unwrap().id, b.id);
    }

    #[test]
    fn test_favorite_restaurant_without_reviews() {
        let mut graph = ReviewGraph::new();
        let shy = graph.insert_customer(NewCustomer::new("Shy", "Diner")).unwrap();
        assert!(matches!(
            shy.favorite_restaurant(&graph),
            Err(Error::EmptyCollection("reviews"))
        ));
    }

    #[test]
    fn test_add_then_delete_reviews_roundtrip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let fish = store.insert_restaurant(NewRestaurant::new("Fish", 200)).unwrap();
        let bbq = store.insert_restaurant(NewRestaurant::new("BBQ", 300)).unwrap();
        let gideon = store.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();

        gideon.add_review(&mut store, &fish, 4).unwrap();
        gideon.add_review(&mut store, &fish, 2).unwrap();
        gideon.add_review(&mut store, &bbq, 5).unwrap();

        assert_eq!(gideon.delete_reviews(&mut store, &fish).unwrap(), 2);

        let remaining = gideon.reviews(&store).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].restaurant_id, bbq.id);
    }

    #[test]
    fn test_delete_reviews_without_any_is_noop() {
        let mut graph = ReviewGraph::new();
        let fish = graph.insert_restaurant(NewRestaurant::new("Fish", 200)).unwrap();
        let gideon = graph.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();
        assert_eq!(gideon.delete_reviews(&mut graph, &fish).unwrap(), 0);
    }

    #[test]
    fn test_restaurants_are_distinct() {
        let mut graph = ReviewGraph::new();
        let fish = graph.insert_restaurant(NewRestaurant::new("Fish", 200)).unwrap();
        let bbq = graph.insert_restaurant(NewRestaurant::new("BBQ", 300)).unwrap();
        let gideon = graph.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();
        gideon.add_review(&mut graph, &bbq, 3).unwrap();
        gideon.add_review(&mut graph, &fish, 4).unwrap();
        gideon.add_review(&mut graph, &bbq, 1).unwrap();

        assert_eq!(gideon.restaurants(&graph).unwrap(), vec![bbq, fish]);
    }

    #[test]
    fn test_ratings_are_not_range_checked() {
        // No bound on star_rating is enforced; pin the gap until one is agreed on.
        let mut graph = ReviewGraph::new();
        let fish = graph.insert_restaurant(NewRestaurant::new("Fish", 200)).unwrap();
        let gideon = graph.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();
        for rating in [0, 11, -3] {
            let review = gideon.add_review(&mut graph, &fish, rating).unwrap();
            assert_eq!(review.star_rating, rating);
        }
    }

    proptest! {
        #[test]
        fn prop_favorite_has_maximum_rating(ratings in prop::collection::vec(-10i64..10, 1..20)) {
            let mut graph = ReviewGraph::new();
            let customer = graph.insert_customer(NewCustomer::new("Prop", "Tester")).unwrap();
            for (i, &rating) in ratings.iter().enumerate() {
                let restaurant = graph
                    .insert_restaurant(NewRestaurant::new(format!("R{}", i), 0))
                    .unwrap();
                customer.add_review(&mut graph, &restaurant, rating).unwrap();
            }

            let favorite = customer.favorite_restaurant(&graph).unwrap();
            let max = *ratings.iter().max().unwrap();
            let reviews = customer.reviews(&graph).unwrap();
            prop_assert!(reviews
                .iter()
                .any(|r| r.restaurant_id == favorite.id && r.star_rating == max));
        }

        #[test]
        fn prop_add_then_delete_leaves_no_reviews(count in 1usize..8) {
            let mut graph = ReviewGraph::new();
            let restaurant = graph.insert_restaurant(NewRestaurant::new("R", 0)).unwrap();
            let customer = graph.insert_customer(NewCustomer::new("Prop", "Tester")).unwrap();
            for rating in 0..count {
                customer.add_review(&mut graph, &restaurant, rating as i64).unwrap();
            }

            prop_assert_eq!(customer.delete_reviews(&mut graph, &restaurant).unwrap(), count);
            prop_assert!(customer.reviews(&graph).unwrap().is_empty());
        }
    }
}
