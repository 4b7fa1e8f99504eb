use restaurant_reviews::config::{self, AppConfig};
use restaurant_reviews::output::{emit_success, OutputMode};
use restaurant_reviews::seed::seed_demo;
use restaurant_reviews::storage::{SqliteStore, Store};
use restaurant_reviews::ui::{self, Icons};
use restaurant_reviews::{
    Customer, CustomerId, Entity, Error, NewCustomer, NewRestaurant, Restaurant, RestaurantId,
};
use std::path::Path;

fn find_restaurant(store: &SqliteStore, id: i64) -> anyhow::Result<Restaurant> {
    store.restaurant(RestaurantId(id))?.ok_or_else(|| {
        Error::NotFound {
            entity: Restaurant::NAME,
            id,
        }
        .into()
    })
}

fn find_customer(store: &SqliteStore, id: i64) -> anyhow::Result<Customer> {
    store.customer(CustomerId(id))?.ok_or_else(|| {
        Error::NotFound {
            entity: Customer::NAME,
            id,
        }
        .into()
    })
}

pub fn run_init(
    output_mode: OutputMode,
    config_path: &Path,
    database: &Path,
    force: bool,
) -> anyhow::Result<()> {
    let config = AppConfig {
        database: Some(database.to_string_lossy().to_string()),
    };
    config::write_config(config_path, &config, force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", config_path.display()));
        ui::info("Database", &database.display().to_string());
    } else {
        emit_success(output_mode, "init", &config)?;
    }
    Ok(())
}

pub fn run_seed(output_mode: OutputMode, store: &mut SqliteStore) -> anyhow::Result<()> {
    let demo = seed_demo(store)?;

    if output_mode.is_human() {
        ui::header("Seeded demo data");
        for customer in &demo.customers {
            println!("  {} {} (#{})", Icons::PERSON, customer.full_name(), customer.id);
        }
        for restaurant in &demo.restaurants {
            println!("  {} {} (#{}, price {})", Icons::PLATE, restaurant.name, restaurant.id, restaurant.price);
        }
        for review in &demo.reviews {
            println!("  {} {}", Icons::STAR, review.full_review(&*store)?);
        }
    } else {
        emit_success(output_mode, "seed", &demo)?;
    }
    Ok(())
}

pub fn run_restaurants(output_mode: OutputMode, store: &SqliteStore) -> anyhow::Result<()> {
    let restaurants = store.restaurants()?;

    if output_mode.is_human() {
        if restaurants.is_empty() {
            println!("∅ No restaurants yet.");
        } else {
            println!("{}", ui::restaurant_table(&restaurants));
        }
    } else {
        emit_success(output_mode, "restaurants", &restaurants)?;
    }
    Ok(())
}

pub fn run_customers(output_mode: OutputMode, store: &SqliteStore) -> anyhow::Result<()> {
    let customers = store.customers()?;

    if output_mode.is_human() {
        if customers.is_empty() {
            println!("∅ No customers yet.");
        } else {
            println!("{}", ui::customer_table(&customers));
        }
    } else {
        emit_success(output_mode, "customers", &customers)?;
    }
    Ok(())
}

pub fn run_fanciest(output_mode: OutputMode, store: &SqliteStore) -> anyhow::Result<()> {
    let fanciest = Restaurant::fanciest_in(store)?;

    if output_mode.is_human() {
        println!(
            "{} Fanciest restaurant: {} (#{}, price {})",
            Icons::MONEY,
            fanciest.name,
            fanciest.id,
            fanciest.price
        );
    } else {
        emit_success(output_mode, "fanciest", &fanciest)?;
    }
    Ok(())
}

pub fn run_reviews(output_mode: OutputMode, store: &SqliteStore, restaurant: i64) -> anyhow::Result<()> {
    let restaurant = find_restaurant(store, restaurant)?;
    let lines = restaurant.all_reviews(store)?;

    if output_mode.is_human() {
        ui::header(&format!("Reviews for {}", restaurant.name));
        if lines.is_empty() {
            println!("∅ No reviews yet.");
        } else {
            println!("{}", ui::review_table(&lines));
        }
    } else {
        let data = serde_json::json!({
            "restaurant": restaurant,
            "reviews": lines,
        });
        emit_success(output_mode, "reviews", data)?;
    }
    Ok(())
}

pub fn run_favorite(output_mode: OutputMode, store: &SqliteStore, customer: i64) -> anyhow::Result<()> {
    let customer = find_customer(store, customer)?;
    let favorite = customer.favorite_restaurant(store)?;

    if output_mode.is_human() {
        println!(
            "{} {}'s favorite restaurant: {} (#{})",
            Icons::HEART,
            customer.full_name(),
            favorite.name,
            favorite.id
        );
    } else {
        let data = serde_json::json!({
            "customer": customer,
            "favorite": favorite,
        });
        emit_success(output_mode, "favorite", data)?;
    }
    Ok(())
}

pub fn run_add_restaurant(
    output_mode: OutputMode,
    store: &mut SqliteStore,
    name: String,
    price: i64,
) -> anyhow::Result<()> {
    let restaurant = store.insert_restaurant(NewRestaurant::new(name, price))?;

    if output_mode.is_human() {
        ui::success(&format!("Added restaurant {} (#{})", restaurant.name, restaurant.id));
    } else {
        emit_success(output_mode, "add-restaurant", &restaurant)?;
    }
    Ok(())
}

pub fn run_add_customer(
    output_mode: OutputMode,
    store: &mut SqliteStore,
    first_name: String,
    last_name: String,
) -> anyhow::Result<()> {
    let customer = store.insert_customer(NewCustomer::new(first_name, last_name))?;

    if output_mode.is_human() {
        ui::success(&format!("Added customer {} (#{})", customer.full_name(), customer.id));
    } else {
        emit_success(output_mode, "add-customer", &customer)?;
    }
    Ok(())
}

pub fn run_add_review(
    output_mode: OutputMode,
    store: &mut SqliteStore,
    customer: i64,
    restaurant: i64,
    rating: i64,
) -> anyhow::Result<()> {
    let customer = find_customer(store, customer)?;
    let restaurant = find_restaurant(store, restaurant)?;
    let review = customer.add_review(store, &restaurant, rating)?;

    if output_mode.is_human() {
        ui::success(&format!("Added review #{}", review.id));
        println!("  {} {}", ui::stars(review.star_rating), review.describe(&customer, &restaurant));
    } else {
        emit_success(output_mode, "add-review", &review)?;
    }
    Ok(())
}

pub fn run_delete_reviews(
    output_mode: OutputMode,
    store: &mut SqliteStore,
    customer: i64,
    restaurant: i64,
) -> anyhow::Result<()> {
    let customer = find_customer(store, customer)?;
    let restaurant = find_restaurant(store, restaurant)?;
    let deleted = customer.delete_reviews(store, &restaurant)?;

    if output_mode.is_human() {
        if deleted == 0 {
            ui::warn(&format!(
                "{} has no reviews of {}",
                customer.full_name(),
                restaurant.name
            ));
        } else {
            println!(
                "{} Deleted {} review(s) by {} for {}",
                Icons::DEL,
                deleted,
                customer.full_name(),
                restaurant.name
            );
        }
    } else {
        let data = serde_json::json!({ "deleted": deleted });
        emit_success(output_mode, "delete-reviews", data)?;
    }
    Ok(())
}

pub fn run_stats(output_mode: OutputMode, store: &SqliteStore, database: &Path) -> anyhow::Result<()> {
    let stats = store.stats()?;

    if output_mode.is_human() {
        println!("{} Restaurant Reviews Statistics", Icons::STATS);
        ui::summary_row(&format!("{} Database", Icons::DATABASE), &database.display().to_string());
        println!("{}", ui::stats_table(&stats));
    } else {
        emit_success(output_mode, "stats", stats)?;
    }
    Ok(())
}
