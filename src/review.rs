//! Reviews - the join entity linking one customer to one restaurant.

use crate::customer::Customer;
use crate::entity::Entity;
use crate::id::{CustomerId, RestaurantId, ReviewId};
use crate::restaurant::Restaurant;
use crate::storage::Store;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A row of the `reviews` table.
///
/// Holds identifiers rather than the related records; follow them through a
/// `Store` to get the customer or restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub star_rating: i64,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
}

/// Insert payload for a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub star_rating: i64,
}

impl NewReview {
    pub fn new(customer_id: CustomerId, restaurant_id: RestaurantId, star_rating: i64) -> Self {
        Self {
            customer_id,
            restaurant_id,
            star_rating,
        }
    }
}

impl Entity for Review {
    type Id = ReviewId;
    type New = NewReview;

    const NAME: &'static str = "review";

    fn id(&self) -> ReviewId {
        self.id
    }

    fn from_new(id: ReviewId, new: NewReview) -> Self {
        Self {
            id,
            star_rating: new.star_rating,
            customer_id: new.customer_id,
            restaurant_id: new.restaurant_id,
        }
    }
}

impl Review {
    /// Display line for this review given its already-resolved references.
    pub fn describe(&self, customer: &Customer, restaurant: &Restaurant) -> String {
        format!(
            "Review for {} by {}: {} stars.",
            restaurant.name,
            customer.full_name(),
            self.star_rating
        )
    }

    /// Resolve both references and format the review.
    pub fn full_review<S: Store>(&self, store: &S) -> Result<String> {
        let restaurant = store.resolve_restaurant(self.restaurant_id)?;
        let customer = store.resolve_customer(self.customer_id)?;
        Ok(self.describe(&customer, &restaurant))
    }

    /// The review with the highest star rating; the first one wins a tie.
    pub fn highest_rated(reviews: &[Review]) -> Result<&Review> {
        let mut iter = reviews.iter();
        let first = iter.next().ok_or(Error::EmptyCollection("reviews"))?;
        Ok(iter.fold(first, |best, r| {
            if r.star_rating > best.star_rating { r } else { best }
        }))
    }
}
