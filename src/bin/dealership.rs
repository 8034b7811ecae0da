//! Dealership command line client
//!
//! ```bash
//! # Summary of the deployment
//! DEALERSHIP_URL=https://cars.example.com dealership status
//!
//! # Sale inventory filtered like the sales page
//! dealership inventory --make toyota --max-price 20000
//!
//! # Tokens for the current theme, as CSS
//! dealership theme --css
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use dealership_rust::error::Error;
use dealership_rust::models::{Theme, ThemeColors};
use dealership_rust::store::{HydrateOutcome, SearchFilters, Store};
use dealership_rust::Dealership;

/// Browse and manage a dealership deployment
#[derive(Parser)]
#[command(name = "dealership")]
#[command(version)]
struct Cli {
    /// Base URL of the deployment
    #[arg(long, env = "DEALERSHIP_URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Listing {
    Sale,
    Rental,
    HotDeals,
    InStock,
    Featured,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the deployment is set up and what it holds
    Status,
    /// List vehicles
    Inventory {
        #[arg(long, value_enum, default_value = "sale")]
        listing: Listing,
        /// Make substring (sale listings only)
        #[arg(long)]
        make: Option<String>,
        /// Model substring (sale listings only)
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
    },
    /// List the visible FAQs in display order
    Faqs,
    /// Show or change the site theme
    Theme {
        /// New theme; changing it needs admin credentials
        #[arg(long)]
        set: Option<Theme>,
        /// Custom palette as five comma separated hex colours:
        /// primary,secondary,accent,background,text
        #[arg(long)]
        palette: Option<String>,
        /// Flip the saved dark mode preference
        #[arg(long)]
        toggle_dark: bool,
        /// Print a CSS rule instead of a table
        #[arg(long)]
        css: bool,
        #[arg(long, env = "DEALERSHIP_ADMIN_USER")]
        username: Option<String>,
        #[arg(long, env = "DEALERSHIP_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dealership_rust=warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let dealership = match &cli.url {
        Some(url) => Dealership::new(url)?,
        None => Dealership::from_env()?,
    };

    let store = dealership.create_store();
    let outcome = store.hydrate().await;

    match cli.command {
        Commands::Status => cmd_status(&dealership, &store, outcome).await,
        Commands::Inventory {
            listing,
            make,
            model,
            year,
            min_price,
            max_price,
        } => {
            let filters = SearchFilters {
                make,
                model,
                year,
                min_price,
                max_price,
            };
            cmd_inventory(&store, listing, &filters).await;
            Ok(())
        }
        Commands::Faqs => {
            for faq in store.visible_faqs().await {
                println!("Q: {}\nA: {}\n", faq.details.question, faq.details.answer);
            }
            Ok(())
        }
        Commands::Theme {
            set,
            palette,
            toggle_dark,
            css,
            username,
            password,
        } => {
            let palette = palette.as_deref().map(parse_palette).transpose()?;
            if set.is_some() {
                let (Some(username), Some(password)) = (username, password) else {
                    return Err(Error::validation("Changing the theme needs --username and --password"));
                };
                dealership.auth().login(&username, &password).await?;
            }
            cmd_theme(&dealership, &store, set, palette, toggle_dark, css).await
        }
    }
}

async fn cmd_status(dealership: &Dealership, store: &Store, outcome: HydrateOutcome) -> Result<(), Error> {
    match outcome {
        HydrateOutcome::Loaded => {}
        HydrateOutcome::NotInitialized => {
            let setup = dealership.auth().setup_status().await?;
            println!("Deployment at {} is not initialized", dealership.url);
            println!("Admin account: {}", if setup.has_admin { "present" } else { "missing" });
            return Ok(());
        }
        HydrateOutcome::Failed(message) => return Err(Error::general(message)),
    }

    let state = store.snapshot().await;
    println!("{}", state.settings.dealership_name);
    println!("  {}", state.settings.address);
    println!("  {} / {}", state.settings.contact_phone, state.settings.contact_email);
    println!("  {}", state.settings.business_hours);
    println!();
    println!("Vehicles:  {} ({} for sale, {} hot deals)", state.vehicles.len(), state.sale_vehicles().len(), state.hot_deals().len());
    println!("Rentals:   {}", if state.settings.rental_enabled { state.rental_vehicles().len().to_string() } else { "disabled".to_string() });
    println!("Bookings:  {}", state.bookings.len());
    println!("FAQs:      {} visible of {}", state.visible_faqs().len(), state.faqs.len());
    println!("Theme:     {}", state.settings.theme);
    Ok(())
}

async fn cmd_inventory(store: &Store, listing: Listing, filters: &SearchFilters) {
    let rows: Vec<String> = store
        .read(|state| {
            let vehicles = match listing {
                Listing::Sale => state.search(filters),
                Listing::Rental => state.rental_vehicles(),
                Listing::HotDeals => state.hot_deals(),
                Listing::InStock => state.in_stock(),
                Listing::Featured => state.featured_vehicles(),
            };
            vehicles
                .into_iter()
                .map(|vehicle| {
                    let details = &vehicle.details;
                    let rate = details
                        .daily_rate
                        .map(|rate| format!("  ${}/day", rate))
                        .unwrap_or_default();
                    format!(
                        "{:>6}  {:<32} ${:>10}{}{}",
                        vehicle.id,
                        vehicle.title(),
                        details.price,
                        rate,
                        if details.in_stock { "" } else { "  (sold)" }
                    )
                })
                .collect()
        })
        .await;

    if rows.is_empty() {
        println!("No vehicles found");
    }
    for row in rows {
        println!("{}", row);
    }
}

async fn cmd_theme(
    dealership: &Dealership,
    store: &Store,
    set: Option<Theme>,
    palette: Option<ThemeColors>,
    toggle_dark: bool,
    css: bool,
) -> Result<(), Error> {
    let resolver = dealership.theme_resolver(store).await;

    if let Some(theme) = set {
        resolver.set_theme(theme, palette).await?;
    }
    if toggle_dark {
        resolver.toggle_dark_mode().await?;
    }

    let tokens = resolver.tokens().await;
    if css {
        print!("{}", tokens.to_css());
        return Ok(());
    }

    println!("theme: {} ({})", tokens.data_theme(), if tokens.dark_mode { "dark" } else { "light" });
    for (name, value) in tokens.css_variables() {
        println!("  {:<13} {}", name, value);
    }
    Ok(())
}

fn parse_palette(raw: &str) -> Result<ThemeColors, Error> {
    let colors: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [primary, secondary, accent, background, text] = colors.as_slice() else {
        return Err(Error::validation("A palette needs exactly five colours"));
    };
    let palette = ThemeColors::new(primary, secondary, accent, background, text);
    palette.validate()?;
    Ok(palette)
}
