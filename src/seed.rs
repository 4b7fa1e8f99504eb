//! Demo data: two customers, two restaurants, two reviews.

use crate::customer::{Customer, NewCustomer};
use crate::restaurant::{NewRestaurant, Restaurant};
use crate::review::{NewReview, Review};
use crate::storage::Store;
use crate::Result;
use serde::Serialize;

/// Everything `seed_demo` created, with assigned identifiers.
#[derive(Debug, Clone, Serialize)]
pub struct DemoData {
    pub customers: Vec<Customer>,
    pub restaurants: Vec<Restaurant>,
    pub reviews: Vec<Review>,
}

/// Insert the sample rows into `store`.
///
/// Seeding twice inserts a second copy; identifiers keep increasing.
pub fn seed_demo<S: Store>(store: &mut S) -> Result<DemoData> {
    let gideon = store.insert_customer(NewCustomer::new("Gideon", "Mugere"))?;
    let cynthia = store.insert_customer(NewCustomer::new("Cynthia", "Smith"))?;

    let fish = store.insert_restaurant(NewRestaurant::new("Fish Friendly Restaurant", 200))?;
    let bbq = store.insert_restaurant(NewRestaurant::new("Berbecue Friendly", 300))?;

    let first = store.insert_review(NewReview::new(gideon.id, fish.id, 4))?;
    let second = store.insert_review(NewReview::new(cynthia.id, fish.id, 5))?;

    tracing::info!("Seeded 2 customers, 2 restaurants and 2 reviews");

    Ok(DemoData {
        customers: vec![gideon, cynthia],
        restaurants: vec![fish, bbq],
        reviews: vec![first, second],
    })
}
