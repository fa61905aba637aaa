//! Shopfront CLI - browse, manage and check out against the product API.
//!
//! # Usage
//!
//! ```bash
//! # Log in (admin/admin is the built-in demo account)
//! shopfront login -u admin -p admin
//!
//! # List one page of products
//! shopfront products list --page 2 --per-page 10
//!
//! # Create, edit and delete products
//! shopfront products create --title "Lamp" --description "Desk lamp" --price 24.99 --image lamp.png
//! shopfront products edit 42 --title "Lamp" --description "LED desk lamp"
//! shopfront products delete 42
//!
//! # Browse the catalog by category (browsing and checkout need a login)
//! shopfront catalog -u admin -p admin --category beauty --page 1
//!
//! # Preview checkout for products 1, 1 and 5
//! shopfront checkout -u admin -p admin 1 1 5
//! ```
//!
//! Configuration comes from the environment (see `shopfront_client::config`).
//! Pass `--json` for machine-readable output.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_client::ClientConfig;
use shopfront_core::{Price, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use output::Format;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront CLI")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and show the authenticated user
    Login {
        /// Username or email
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Also print the session token
        #[arg(long)]
        show_token: bool,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Browse the catalog
    Catalog {
        #[command(flatten)]
        credentials: Credentials,

        /// Category to filter by (`all` for every category)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Catalog page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Add products to a cart and show the checkout summary
    Checkout {
        #[command(flatten)]
        credentials: Credentials,

        /// Product IDs; repeat an ID to add more than one unit
        #[arg(required = true)]
        ids: Vec<ProductId>,

        /// Place the order after showing the summary
        #[arg(long)]
        place: bool,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List one page of products
    List {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Products per page (default: `SHOPFRONT_PER_PAGE`)
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Create a product
    Create(DraftArgs),
    /// Edit a product
    Edit {
        /// Product ID
        id: ProductId,

        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,
    },
}

/// Login used for the session a command runs in.
#[derive(clap::Args)]
struct Credentials {
    /// Username or email
    #[arg(short, long)]
    username: String,

    /// Password
    #[arg(short, long)]
    password: String,
}

#[derive(clap::Args)]
struct DraftArgs {
    /// Product title
    #[arg(short, long)]
    title: String,

    /// Product description
    #[arg(short, long)]
    description: String,

    /// Product price (e.g. 19.99)
    #[arg(long)]
    price: Option<Price>,

    /// Image file to upload (repeatable)
    #[arg(long = "image")]
    images: Vec<std::path::PathBuf>,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Errors and warnings become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration is needed before tracing for Sentry init
    let config = ClientConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_client=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let format = if cli.json { Format::Json } else { Format::Text };

    match cli.command {
        Commands::Login {
            username,
            password,
            show_token,
        } => commands::auth::login(config, &username, &password, show_token, format).await?,
        Commands::Products { action } => match action {
            ProductAction::List { page, per_page } => {
                commands::products::list(config, page, per_page, format).await?;
            }
            ProductAction::Create(draft) => {
                commands::products::create(config, draft.into(), format).await?;
            }
            ProductAction::Edit { id, draft } => {
                commands::products::edit(config, id, draft.into(), format).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(config, id, format).await?,
        },
        Commands::Catalog {
            credentials,
            category,
            page,
        } => {
            let store =
                commands::session(config, &credentials.username, &credentials.password).await?;
            commands::catalog::browse(store, &category, page, format).await?;
        }
        Commands::Checkout {
            credentials,
            ids,
            place,
        } => {
            let store =
                commands::session(config, &credentials.username, &credentials.password).await?;
            commands::checkout::checkout(store, &ids, place, format).await?;
        }
    }
    Ok(())
}

impl From<DraftArgs> for commands::products::DraftInput {
    fn from(args: DraftArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            price: args.price,
            images: args.images,
        }
    }
}
