use crate::customer::Customer;
use crate::restaurant::Restaurant;
use crate::storage::StoreStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &StoreStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Restaurants", &stats.restaurants.to_string());
    builder.add_row("Customers", &stats.customers.to_string());
    builder.add_row("Reviews", &stats.reviews.to_string());
    builder.build()
}

#[derive(Tabled)]
struct RestaurantRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: i64,
}

pub fn restaurant_table(restaurants: &[Restaurant]) -> String {
    let rows: Vec<RestaurantRow> = restaurants
        .iter()
        .map(|r| RestaurantRow {
            id: r.id.get(),
            name: r.name.clone(),
            price: r.price,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

pub fn customer_table(customers: &[Customer]) -> String {
    let rows: Vec<CustomerRow> = customers
        .iter()
        .map(|c| CustomerRow {
            id: c.id.get(),
            name: c.full_name(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct ReviewRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Review")]
    text: String,
}

/// Numbered table of already formatted review lines
pub fn review_table(lines: &[String]) -> String {
    let rows: Vec<ReviewRow> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| ReviewRow {
            position: i + 1,
            text: line.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RestaurantId;

    #[test]
    fn test_empty_builder_renders_nothing() {
        assert!(TableBuilder::new().build().is_empty());
    }

    #[test]
    fn test_restaurant_table_contains_rows() {
        let table = restaurant_table(&[Restaurant {
            id: RestaurantId(2),
            name: "Berbecue Friendly".to_string(),
            price: 300,
        }]);
        assert!(table.contains("Berbecue Friendly"));
        assert!(table.contains("300"));
        assert!(table.contains("Price"));
    }

    #[test]
    fn test_stats_table_lists_every_table() {
        let table = stats_table(&StoreStats {
            restaurants: 2,
            customers: 3,
            reviews: 4,
        });
        for label in ["Restaurants", "Customers", "Reviews"] {
            assert!(table.contains(label));
        }
    }
}
