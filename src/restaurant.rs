//! Restaurants and the queries derived from their reviews.

use crate::customer::Customer;
use crate::entity::Entity;
use crate::id::RestaurantId;
use crate::review::Review;
use crate::storage::Store;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A row of the `restaurants` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    /// Price level; higher is fancier
    pub price: i64,
}

/// Insert payload for a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub price: i64,
}

impl NewRestaurant {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl Entity for Restaurant {
    type Id = RestaurantId;
    type New = NewRestaurant;

    const NAME: &'static str = "restaurant";

    fn id(&self) -> RestaurantId {
        self.id
    }

    fn from_new(id: RestaurantId, new: NewRestaurant) -> Self {
        Self {
            id,
            name: new.name,
            price: new.price,
        }
    }
}

impl Restaurant {
    /// The restaurant with the highest price.
    ///
    /// Ties go to whichever comes first in `restaurants`.
    pub fn fanciest(restaurants: &[Restaurant]) -> Result<&Restaurant> {
        let mut iter = restaurants.iter();
        let first = iter.next().ok_or(Error::EmptyCollection("restaurants"))?;
        Ok(iter.fold(first, |best, r| if r.price > best.price { r } else { best }))
    }

    /// `fanciest` over every restaurant in the store (ascending id order).
    pub fn fanciest_in<S: Store>(store: &S) -> Result<Restaurant> {
        let restaurants = store.restaurants()?;
        Self::fanciest(&restaurants).cloned()
    }

    /// Reviews of this restaurant, oldest first
    pub fn reviews<S: Store>(&self, store: &S) -> Result<Vec<Review>> {
        store.reviews_by_restaurant(self.id)
    }

    /// One display line per review, in review order.
    pub fn all_reviews<S: Store>(&self, store: &S) -> Result<Vec<String>> {
        self.reviews(store)?
            .iter()
            .map(|review| review.full_review(store))
            .collect()
    }

    /// Distinct customers who reviewed this restaurant, in order of their first review.
    pub fn customers<S: Store>(&self, store: &S) -> Result<Vec<Customer>> {
        let mut seen = HashSet::new();
        let mut customers = Vec::new();
        for review in self.reviews(store)? {
            if seen.insert(review.customer_id) {
                customers.push(store.resolve_customer(review.customer_id)?);
            }
        }
        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::NewCustomer;
    use crate::graph::ReviewGraph;
    use crate::review::NewReview;
    use proptest::prelude::*;

    fn restaurant(id: i64, name: &str, price: i64) -> Restaurant {
        Restaurant {
            id: RestaurantId(id),
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn test_fanciest_picks_highest_price() {
        let restaurants = vec![
            restaurant(1, "Fish Friendly Restaurant", 200),
            restaurant(2, "Berbecue Friendly", 300),
        ];
        let fanciest = Restaurant::fanciest(&restaurants).unwrap();
        assert_eq!(fanciest.name, "Berbecue Friendly");
    }

    #[test]
    fn test_fanciest_tie_goes_to_first() {
        let restaurants = vec![
            restaurant(1, "Cheap", 10),
            restaurant(2, "First Posh", 500),
            restaurant(3, "Second Posh", 500),
        ];
        assert_eq!(Restaurant::fanciest(&restaurants).unwrap().id, RestaurantId(2));
    }

    #[test]
    fn test_fanciest_of_nothing_is_an_error() {
        let err = Restaurant::fanciest(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptyCollection("restaurants")));

        let graph = ReviewGraph::new();
        assert!(matches!(
            Restaurant::fanciest_in(&graph),
            Err(Error::EmptyCollection(_))
        ));
    }

    #[test]
    fn test_all_reviews_in_review_order() {
        let mut graph = ReviewGraph::new();
        let fish = graph
            .insert_restaurant(NewRestaurant::new("Fish Friendly Restaurant", 200))
            .unwrap();
        let gideon = graph.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();
        let cynthia = graph.insert_customer(NewCustomer::new("Cynthia", "Smith")).unwrap();
        graph.insert_review(NewReview::new(gideon.id, fish.id, 4)).unwrap();
        graph.insert_review(NewReview::new(cynthia.id, fish.id, 5)).unwrap();

        assert_eq!(
            fish.all_reviews(&graph).unwrap(),
            vec![
                "Review for Fish Friendly Restaurant by Gideon Mugere: 4 stars.".to_string(),
                "Review for Fish Friendly Restaurant by Cynthia Smith: 5 stars.".to_string(),
            ]
        );
    }

    #[test]
    fn test_all_reviews_empty_without_reviews() {
        let mut graph = ReviewGraph::new();
        let lonely = graph.insert_restaurant(NewRestaurant::new("Lonely", 1)).unwrap();
        assert!(lonely.all_reviews(&graph).unwrap().is_empty());
    }

    #[test]
    fn test_customers_are_distinct() {
        let mut graph = ReviewGraph::new();
        let fish = graph.insert_restaurant(NewRestaurant::new("Fish", 200)).unwrap();
        let gideon = graph.insert_customer(NewCustomer::new("Gideon", "Mugere")).unwrap();
        let cynthia = graph.insert_customer(NewCustomer::new("Cynthia", "Smith")).unwrap();
        graph.insert_review(NewReview::new(gideon.id, fish.id, 4)).unwrap();
        graph.insert_review(NewReview::new(cynthia.id, fish.id, 5)).unwrap();
        graph.insert_review(NewReview::new(gideon.id, fish.id, 2)).unwrap();

        let names: Vec<String> = fish
            .customers(&graph)
            .unwrap()
            .iter()
            .map(Customer::full_name)
            .collect();
        assert_eq!(names, vec!["Gideon Mugere", "Cynthia Smith"]);
    }

    proptest! {
        #[test]
        fn prop_fanciest_is_at_least_every_price(prices in prop::collection::vec(any::<i64>(), 1..50)) {
            let restaurants: Vec<Restaurant> = prices
                .iter()
                .enumerate()
                .map(|(i, &price)| restaurant(i as i64 + 1, "r", price))
                .collect();

            let fanciest = Restaurant::fanciest(&restaurants).unwrap();
            for r in &restaurants {
                prop_assert!(fanciest.price >= r.price);
            }

            // First occurrence of the maximum wins
            let first_max = restaurants.iter().position(|r| r.price == fanciest.price).unwrap();
            prop_assert_eq!(fanciest.id, restaurants[first_max].id);
        }
    }
}
