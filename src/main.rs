//! restaurant-reviews CLI - manage restaurants, customers and their reviews

mod commands;

use clap::{Parser, Subcommand};
use restaurant_reviews::config;
use restaurant_reviews::output::{error_envelope, OutputMode};
use restaurant_reviews::storage::SqliteStore;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "restaurant-reviews")]
#[command(version)]
#[command(about = "Restaurants, customers and their reviews, stored in SQLite")]
#[command(long_about = r#"
Keeps restaurants, customers and the reviews linking them in a single
SQLite file, and answers a few questions about them:
  • Which restaurant is the fanciest?
  • What is a customer's favorite restaurant?
  • What did everyone say about a restaurant?

Example usage:
  restaurant-reviews seed
  restaurant-reviews fanciest
  restaurant-reviews favorite --customer 1
  restaurant-reviews add-review --customer 1 --restaurant 2 --rating 5
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file pointing at the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Insert the demo customers, restaurants and reviews
    Seed,

    /// List all restaurants
    Restaurants,

    /// List all customers
    Customers,

    /// Show the restaurant with the highest price
    Fanciest,

    /// Show every review of a restaurant
    Reviews {
        /// Restaurant id
        #[arg(short, long)]
        restaurant: i64,
    },

    /// Show a customer's favorite restaurant (their highest-rated review)
    Favorite {
        /// Customer id
        #[arg(short, long)]
        customer: i64,
    },

    /// Add a restaurant
    AddRestaurant {
        /// Restaurant name
        #[arg(short, long)]
        name: String,

        /// Price level
        #[arg(short, long)]
        price: i64,
    },

    /// Add a customer
    AddCustomer {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,
    },

    /// Add a review of a restaurant by a customer
    AddReview {
        /// Customer id
        #[arg(short, long)]
        customer: i64,

        /// Restaurant id
        #[arg(short, long)]
        restaurant: i64,

        /// Star rating (not range-checked)
        #[arg(long, allow_hyphen_values = true)]
        rating: i64,
    },

    /// Delete every review a customer wrote for a restaurant
    DeleteReviews {
        /// Customer id
        #[arg(short, long)]
        customer: i64,

        /// Restaurant id
        #[arg(short, long)]
        restaurant: i64,
    },

    /// Show row counts per table
    Stats,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Seed => "seed",
            Commands::Restaurants => "restaurants",
            Commands::Customers => "customers",
            Commands::Fanciest => "fanciest",
            Commands::Reviews { .. } => "reviews",
            Commands::Favorite { .. } => "favorite",
            Commands::AddRestaurant { .. } => "add-restaurant",
            Commands::AddCustomer { .. } => "add-customer",
            Commands::AddReview { .. } => "add-review",
            Commands::DeleteReviews { .. } => "delete-reviews",
            Commands::Stats => "stats",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = OutputMode::from_flag(cli.json);
    let command_name = cli.command.name();

    if let Err(err) = run(cli, output_mode) {
        if output_mode.is_human() {
            restaurant_reviews::ui::error(&format!("{:#}", err));
        } else {
            println!("{}", error_envelope(command_name, &format!("{:#}", err)));
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let loaded = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref());

    if let Commands::Init { force } = cli.command {
        let config_path = cli.config.unwrap_or_else(config::default_config_path);
        return commands::run_init(output_mode, &config_path, &database, force);
    }

    tracing::debug!("Using database {:?}", database);
    let mut store = SqliteStore::open(&database)?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled before the store is opened"),
        Commands::Seed => commands::run_seed(output_mode, &mut store)?,
        Commands::Restaurants => commands::run_restaurants(output_mode, &store)?,
        Commands::Customers => commands::run_customers(output_mode, &store)?,
        Commands::Fanciest => commands::run_fanciest(output_mode, &store)?,
        Commands::Reviews { restaurant } => {
            commands::run_reviews(output_mode, &store, restaurant)?
        }
        Commands::Favorite { customer } => commands::run_favorite(output_mode, &store, customer)?,
        Commands::AddRestaurant { name, price } => {
            commands::run_add_restaurant(output_mode, &mut store, name, price)?
        }
        Commands::AddCustomer { first_name, last_name } => {
            commands::run_add_customer(output_mode, &mut store, first_name, last_name)?
        }
        Commands::AddReview { customer, restaurant, rating } => {
            commands::run_add_review(output_mode, &mut store, customer, restaurant, rating)?
        }
        Commands::DeleteReviews { customer, restaurant } => {
            commands::run_delete_reviews(output_mode, &mut store, customer, restaurant)?
        }
        Commands::Stats => commands::run_stats(output_mode, &store, &database)?,
    }

    store.close()?;
    Ok(())
}
