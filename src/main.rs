use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use scent::app::App;
use scent::error::ShopError;
use scent::logging::init_logger;
use scent::models::{
    Catalog, Category, ContactField, ContactForm, LineItem, ProductQuery, QuickView, Size,
    SortMode,
};
use scent::shop::Shop;
use scent::storage::{Config, ConfigStorage, FileStore, TomlConfigStorage, ensure_directories};

#[derive(Parser)]
#[command(name = "scent")]
#[command(
    about = "Perfume storefront: browse the catalog, keep a wishlist and fill a bag",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Case-insensitive substring of the product name
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to include (men, women, unisex); repeatable
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Sort order: none, price-asc, price-desc
        #[arg(long, default_value = "none")]
        sort: String,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show or change the wishlist
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistAction>,
    },

    /// Show or change the shopping bag
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },

    /// Open a product page from its link query (name=..&price=..&img=..)
    View { query: String },

    /// Show recently viewed products
    Recent {
        /// Leave this product out of the list
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List wishlisted products
    List,
    /// Add or remove a product by name
    Toggle { name: String },
    /// Remove every product
    Clear,
}

#[derive(Subcommand)]
enum CartAction {
    /// List line items and the total
    List,
    /// Add a product by name, optionally in a specific size
    Add {
        name: String,
        /// Bottle size: 50ml or 100ml
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove the line item at a position shown by `cart list` (1-based)
    Remove { index: usize },
    /// Place the order and empty the bag
    Checkout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return run_tui();
    };

    env_logger::init();

    match command {
        Commands::Catalog {
            search,
            categories,
            sort,
            page,
        } => cmd_catalog(&search, &categories, &sort, page),
        Commands::Wishlist { action } => cmd_wishlist(action.unwrap_or(WishlistAction::List)),
        Commands::Cart { action } => cmd_cart(action.unwrap_or(CartAction::List)),
        Commands::View { query } => cmd_view(&query),
        Commands::Recent { exclude } => cmd_recent(exclude.as_deref()),
        Commands::Contact {
            name,
            email,
            message,
        } => cmd_contact(&name, &email, &message),
    }
}

/// Load configuration, creating the default file on first run
fn load_config() -> Result<(Config, std::path::PathBuf)> {
    let (data_dir, config_dir) = ensure_directories()?;
    let config_storage = TomlConfigStorage::new(config_dir.join("scent.toml"));
    let config = config_storage.load()?;
    Ok((config, data_dir))
}

/// Open the shop over the file store in the data directory
fn open_shop() -> Result<(Shop, Config)> {
    let (config, data_dir) = load_config()?;
    let shop = Shop::open(
        Catalog::reference(),
        Box::new(FileStore::new(data_dir)),
        &config.general,
    );
    Ok((shop, config))
}

fn run_tui() -> Result<()> {
    let (data_dir, config_dir) = ensure_directories()?;

    // A broken config file should not keep the storefront from opening
    let config_storage = TomlConfigStorage::new(config_dir.join("scent.toml"));
    let (config, startup_error) = match config_storage.load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(format!("{:#}", e))),
    };

    let log_path = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir.join("scent.log"));
    let (flash_tx, flash_rx) = mpsc::channel();
    init_logger(
        &log_path,
        Some(flash_tx),
        &config.general.log_level,
        &config.general.flash_level,
    )?;
    log::info!("Welcome to Scent");

    let shop = Shop::open(
        Catalog::reference(),
        Box::new(FileStore::new(data_dir)),
        &config.general,
    );
    let mut app = App::new(shop, config, Some(flash_rx));
    app.startup_error = startup_error;

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut app);
    ratatui::restore();

    if app.shop.pending_checkout().is_some() {
        log::warn!("Exited before checkout finished; the bag was kept");
    }
    result
}

fn run_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.tick(Instant::now());
        terminal
            .draw(|frame| app.draw(frame))
            .context("Failed to draw frame")?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn cmd_catalog(search: &str, categories: &[String], sort: &str, page: usize) -> Result<()> {
    let (mut shop, _) = open_shop()?;

    let categories = categories
        .iter()
        .map(|c| c.parse::<Category>())
        .collect::<Result<Vec<_>, ShopError>>()?;
    let sort: SortMode = sort.parse()?;

    let view = shop.view_mut();
    view.set_search_query(search);
    view.set_categories(categories);
    view.set_sort_mode(sort);
    view.set_page(page);

    let result = shop.visible_products();

    if result.is_empty() {
        println!("No products match your search.");
        return Ok(());
    }

    println!(
        "{} products (page {} of {})",
        result.matched, result.page, result.total_pages
    );
    println!("{}", "=".repeat(60));
    for product in &result.products {
        let heart = if shop.is_wishlisted(&product.name) { "♥" } else { " " };
        println!(
            "{} {:<24} {:<8} {:>10}",
            heart, product.name, product.category, product.price
        );
    }

    let pages = result.page_numbers();
    if !pages.is_empty() {
        let labels: Vec<String> = pages
            .iter()
            .map(|n| {
                if *n == result.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        println!("\nPages: {}", labels.join(" "));
    }

    Ok(())
}

fn cmd_wishlist(action: WishlistAction) -> Result<()> {
    let (mut shop, _) = open_shop()?;

    match action {
        WishlistAction::List => {
            println!("Wishlist ({} items):", shop.wishlist().len());
            for product in shop.wishlist().items() {
                println!("  ♥ {:<24} {:>10}", product.name, product.price);
            }
            if shop.wishlist().is_empty() {
                println!("  (empty)");
            }
        }
        WishlistAction::Toggle { name } => {
            let product = shop
                .catalog()
                .find_ignore_case(&name)
                .map(|p| p.snapshot())
                .ok_or(ShopError::UnknownProduct(name))?;
            if shop.toggle_wishlist(&product) {
                println!("Added {} to your wishlist.", product.name);
            } else {
                println!("Removed {} from your wishlist.", product.name);
            }
        }
        WishlistAction::Clear => {
            shop.clear_wishlist();
            println!("Wishlist cleared.");
        }
    }

    Ok(())
}

fn print_cart(shop: &Shop) {
    let cart = shop.cart();
    println!("Shopping bag ({} items):", cart.len());
    for (i, item) in cart.items().iter().enumerate() {
        println!("{:3}. {:<32} {:>10}", i + 1, item.title, item.price);
    }
    if cart.is_empty() {
        println!("  Your bag is currently empty.");
    }
    println!("Total: {}", cart.total());
}

fn cmd_cart(action: CartAction) -> Result<()> {
    let (mut shop, _) = open_shop()?;

    match action {
        CartAction::List => print_cart(&shop),
        CartAction::Add { name, size } => {
            let product = shop
                .catalog()
                .find_ignore_case(&name)
                .ok_or(ShopError::UnknownProduct(name))?;
            let item = match size {
                Some(size) => {
                    let mut quick_view = QuickView::open(product.snapshot());
                    quick_view.select_size(size.parse::<Size>()?);
                    quick_view.line_item()
                }
                None => LineItem::new(product.name.clone(), product.price, product.image.clone()),
            };
            let title = item.title.clone();
            shop.add_to_cart(item);
            println!("Added {} to your bag.", title);
            print_cart(&shop);
        }
        CartAction::Remove { index } => {
            // Positions outside the bag leave it unchanged
            match index.checked_sub(1).and_then(|i| shop.remove_cart_item(i)) {
                Some(removed) => println!("Removed {}.", removed.title),
                None => println!("No item at position {}.", index),
            }
            print_cart(&shop);
        }
        CartAction::Checkout => {
            let pending = shop.checkout(Instant::now())?;
            println!(
                "Processing order of {} items ({})...",
                pending.items, pending.total
            );
            thread::sleep(pending.remaining(Instant::now()));
            shop.complete_checkout();
            println!("Thank you for your order!");
        }
    }

    Ok(())
}

fn cmd_view(query: &str) -> Result<()> {
    let (mut shop, _) = open_shop()?;

    let query = ProductQuery::parse(query);
    let shown = shop.open_product(&query);
    if shown.is_none() {
        println!("(Incomplete product link: not added to recently viewed)");
    }

    let name = query.name.as_deref().unwrap_or("Unknown Product");
    println!("{}", name);
    println!("{}", "=".repeat(60));
    println!("Price: {}", query.price());
    if let Some(image) = &query.image {
        println!("Image: {}", image);
    }

    println!("\nRelated products:");
    for product in shop.catalog().featured() {
        println!("  {:<24} {:>10}", product.name, product.price);
    }

    let recent = shop.recently_viewed(query.name.as_deref());
    if !recent.is_empty() {
        println!("\nRecently viewed:");
        for product in recent {
            println!("  {:<24} {:>10}", product.name, product.price);
        }
    }

    Ok(())
}

fn cmd_recent(exclude: Option<&str>) -> Result<()> {
    let (shop, _) = open_shop()?;

    let recent = shop.recently_viewed(exclude);
    println!("Recently viewed ({}):", recent.len());
    for product in &recent {
        println!("  {:<24} {:>10}", product.name, product.price);
    }
    if recent.is_empty() {
        println!("  (nothing viewed yet)");
    }

    Ok(())
}

fn cmd_contact(name: &str, email: &str, message: &str) -> Result<()> {
    let (config, _) = load_config()?;

    let mut form = ContactForm::new();
    form.set_field(ContactField::Name, name);
    form.set_field(ContactField::Email, email);
    form.set_field(ContactField::Message, message);

    let now = Instant::now();
    let due = form.submit(now, config.general.contact_delay())?;
    println!("Sending...");
    thread::sleep(due.saturating_duration_since(now));
    println!("{}", form.complete());

    Ok(())
}
