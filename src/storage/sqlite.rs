//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params};
use crate::customer::{Customer, NewCustomer};
use crate::entity::Entity;
use crate::id::{CustomerId, RestaurantId, ReviewId};
use crate::restaurant::{NewRestaurant, Restaurant};
use crate::review::{NewReview, Review};
use crate::{Error, Result};
use super::repository::{Repository, ReviewIndex};
use super::schema;

const RESTAURANT_COLUMNS: &str = "id, name, price";
const CUSTOMER_COLUMNS: &str = "id, first_name, last_name";
const REVIEW_COLUMNS: &str = "id, star_rating, customer_id, restaurant_id";

/// SQLite-backed storage for restaurants, customers and reviews.
///
/// Open it once at process start and keep it for the process lifetime;
/// `close` releases the file explicitly.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates it and its parent directory if needed)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        tracing::debug!("Opening store at {}", path.display());
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Close the underlying connection, surfacing any error
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))
    }

    fn exists(&self, table: &str, id: i64) -> Result<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE id = ?1", table);
        let found: Option<i64> = self.conn.query_row(&sql, [id], |row| row.get(0)).optional()?;
        Ok(found.is_some())
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn count_reviews_where(&self, column: &str, id: i64) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM reviews WHERE {} = ?1", column);
        let count: i64 = self.conn.query_row(&sql, [id], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn check_references(&self, customer: CustomerId, restaurant: RestaurantId) -> Result<()> {
        if !self.exists("customers", customer.get())? {
            return Err(Error::DanglingReference {
                entity: Customer::NAME,
                id: customer.get(),
            });
        }
        if !self.exists("restaurants", restaurant.get())? {
            return Err(Error::DanglingReference {
                entity: Restaurant::NAME,
                id: restaurant.get(),
            });
        }
        Ok(())
    }

    /// Delete one row, refusing while reviews still point at it
    fn delete_referenced<E: Entity>(&self, table: &str, column: &str, id: E::Id) -> Result<()> {
        let id: i64 = id.into();
        let reviews = self.count_reviews_where(column, id)?;
        if reviews > 0 {
            return Err(Error::StillReferenced {
                entity: E::NAME,
                id,
                reviews,
            });
        }
        let sql = format!("DELETE FROM {} WHERE id = ?1", table);
        let affected = self.conn.execute(&sql, [id])?;
        if affected == 0 {
            return Err(Error::NotFound { entity: E::NAME, id });
        }
        tracing::debug!("Deleted {} {}", E::NAME, id);
        Ok(())
    }

    fn query_reviews(&self, filter: &str, id: i64) -> Result<Vec<Review>> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE {} = ?1 ORDER BY id",
            REVIEW_COLUMNS, filter
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let reviews = stmt
            .query_map([id], |row| self.row_to_review(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reviews)
    }

    /// Helper to convert a row to a Restaurant
    fn row_to_restaurant(&self, row: &rusqlite::Row) -> rusqlite::Result<Restaurant> {
        Ok(Restaurant {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }

    /// Helper to convert a row to a Customer
    fn row_to_customer(&self, row: &rusqlite::Row) -> rusqlite::Result<Customer> {
        Ok(Customer {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        })
    }

    /// Helper to convert a row to a Review
    fn row_to_review(&self, row: &rusqlite::Row) -> rusqlite::Result<Review> {
        Ok(Review {
            id: row.get(0)?,
            star_rating: row.get(1)?,
            customer_id: row.get(2)?,
            restaurant_id: row.get(3)?,
        })
    }
}

// ========== Restaurant Operations ==========

impl Repository<Restaurant> for SqliteStore {
    fn get(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        let sql = format!("SELECT {} FROM restaurants WHERE id = ?1", RESTAURANT_COLUMNS);
        self.conn
            .query_row(&sql, [id], |row| self.row_to_restaurant(row))
            .optional()
            .map_err(Into::into)
    }

    fn all(&self) -> Result<Vec<Restaurant>> {
        let sql = format!("SELECT {} FROM restaurants ORDER BY id", RESTAURANT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let restaurants = stmt
            .query_map([], |row| self.row_to_restaurant(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(restaurants)
    }

    fn count(&self) -> Result<usize> {
        self.count_rows("restaurants")
    }

    fn insert(&mut self, new: NewRestaurant) -> Result<Restaurant> {
        self.conn.execute(
            "INSERT INTO restaurants (name, price) VALUES (?1, ?2)",
            params![new.name, new.price],
        )?;
        let restaurant = Restaurant::from_new(RestaurantId(self.conn.last_insert_rowid()), new);
        tracing::debug!("Inserted restaurant {} ({})", restaurant.id, restaurant.name);
        Ok(restaurant)
    }

    fn update(&mut self, restaurant: &Restaurant) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE restaurants SET name = ?1, price = ?2 WHERE id = ?3",
            params![restaurant.name, restaurant.price, restaurant.id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound {
                entity: Restaurant::NAME,
                id: restaurant.id.get(),
            });
        }
        Ok(())
    }

    fn delete(&mut self, id: RestaurantId) -> Result<()> {
        self.delete_referenced::<Restaurant>("restaurants", "restaurant_id", id)
    }
}

// ========== Customer Operations ==========

impl Repository<Customer> for SqliteStore {
    fn get(&self, id: CustomerId) -> Result<Option<Customer>> {
        let sql = format!("SELECT {} FROM customers WHERE id = ?1", CUSTOMER_COLUMNS);
        self.conn
            .query_row(&sql, [id], |row| self.row_to_customer(row))
            .optional()
            .map_err(Into::into)
    }

    fn all(&self) -> Result<Vec<Customer>> {
        let sql = format!("SELECT {} FROM customers ORDER BY id", CUSTOMER_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let customers = stmt
            .query_map([], |row| self.row_to_customer(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(customers)
    }

    fn count(&self) -> Result<usize> {
        self.count_rows("customers")
    }

    fn insert(&mut self, new: NewCustomer) -> Result<Customer> {
        self.conn.execute(
            "INSERT INTO customers (first_name, last_name) VALUES (?1, ?2)",
            params![new.first_name, new.last_name],
        )?;
        let customer = Customer::from_new(CustomerId(self.conn.last_insert_rowid()), new);
        tracing::debug!("Inserted customer {} ({})", customer.id, customer.full_name());
        Ok(customer)
    }

    fn update(&mut self, customer: &Customer) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE customers SET first_name = ?1, last_name = ?2 WHERE id = ?3",
            params![customer.first_name, customer.last_name, customer.id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound {
                entity: Customer::NAME,
                id: customer.id.get(),
            });
        }
        Ok(())
    }

    fn delete(&mut self, id: CustomerId) -> Result<()> {
        self.delete_referenced::<Customer>("customers", "customer_id", id)
    }
}

// ========== Review Operations ==========

impl Repository<Review> for SqliteStore {
    fn get(&self, id: ReviewId) -> Result<Option<Review>> {
        let sql = format!("SELECT {} FROM reviews WHERE id = ?1", REVIEW_COLUMNS);
        self.conn
            .query_row(&sql, [id], |row| self.row_to_review(row))
            .optional()
            .map_err(Into::into)
    }

    fn all(&self) -> Result<Vec<Review>> {
        let sql = format!("SELECT {} FROM reviews ORDER BY id", REVIEW_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let reviews = stmt
            .query_map([], |row| self.row_to_review(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reviews)
    }

    fn count(&self) -> Result<usize> {
        self.count_rows("reviews")
    }

    fn insert(&mut self, new: NewReview) -> Result<Review> {
        self.check_references(new.customer_id, new.restaurant_id)?;
        self.conn.execute(
            "INSERT INTO reviews (star_rating, customer_id, restaurant_id) VALUES (?1, ?2, ?3)",
            params![new.star_rating, new.customer_id, new.restaurant_id],
        )?;
        let review = Review::from_new(ReviewId(self.conn.last_insert_rowid()), new);
        tracing::debug!(
            "Inserted review {} (customer {} -> restaurant {}, {} stars)",
            review.id,
            review.customer_id,
            review.restaurant_id,
            review.star_rating
        );
        Ok(review)
    }

    fn update(&mut self, review: &Review) -> Result<()> {
        self.check_references(review.customer_id, review.restaurant_id)?;
        let affected = self.conn.execute(
            "UPDATE reviews SET star_rating = ?1, customer_id = ?2, restaurant_id = ?3 WHERE id = ?4",
            params![review.star_rating, review.customer_id, review.restaurant_id, review.id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound {
                entity: Review::NAME,
                id: review.id.get(),
            });
        }
        Ok(())
    }

    fn delete(&mut self, id: ReviewId) -> Result<()> {
        let affected = self.conn.execute("DELETE FROM reviews WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(Error::NotFound {
                entity: Review::NAME,
                id: id.get(),
            });
        }
        Ok(())
    }
}

impl ReviewIndex for SqliteStore {
    fn reviews_by_customer(&self, customer: CustomerId) -> Result<Vec<Review>> {
        self.query_reviews("customer_id", customer.get())
    }

    fn reviews_by_restaurant(&self, restaurant: RestaurantId) -> Result<Vec<Review>> {
        self.query_reviews("restaurant_id", restaurant.get())
    }

    fn delete_reviews_between(
        &mut self,
        customer: CustomerId,
        restaurant: RestaurantId,
    ) -> Result<usize> {
        let affected = self.conn.execute(
            "DELETE FROM reviews WHERE customer_id = ?1 AND restaurant_id = ?2",
            params![customer, restaurant],
        )?;
        tracing::debug!(
            "Deleted {} review(s) by customer {} for restaurant {}",
            affected,
            customer,
            restaurant
        );
        Ok(affected)
    }
}
