mod commands;

use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use catalog_client::{ClientError, SortOrder};
use catalog_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Product catalog service and admin client")]
struct Cli {
    /// API root to talk to; overrides `client.base_url` from configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the catalog HTTP service
    Serve,
    /// Browse and edit products
    #[command(subcommand)]
    Products(ProductCommand),
    /// Browse and create categories
    #[command(subcommand)]
    Categories(CategoryCommand),
}

#[derive(Debug, Subcommand)]
enum ProductCommand {
    /// List products, filtered and sorted
    List {
        /// Case-insensitive substring of the product name
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category name
        #[arg(long, default_value = "")]
        category: String,
        /// name-asc, name-desc, price-asc or price-desc
        #[arg(long, default_value_t = SortOrder::NameAsc)]
        sort: SortOrder,
    },
    /// Show every field of one product
    Show { id: String },
    /// Create a product
    Add(NewProductArgs),
    /// Change fields of an existing product
    Update {
        id: String,
        #[command(flatten)]
        changes: ProductChangeArgs,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List category names
    List,
    /// Create a category
    Add { name: String },
}

#[derive(Debug, Args)]
pub struct NewProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub category: String,
    /// Mark the product as in stock
    #[arg(long)]
    pub available: bool,
    #[arg(long, default_value_t = 0.0)]
    pub height: f64,
    #[arg(long, default_value_t = 0.0)]
    pub width: f64,
    #[arg(long, default_value_t = 0.0)]
    pub depth: f64,
    /// Repeat for each material, in order
    #[arg(long = "material")]
    pub materials: Vec<String>,
    /// Repeat for each color, in order
    #[arg(long = "color")]
    pub colors: Vec<String>,
    #[arg(long, default_value = "")]
    pub image: String,
}

#[derive(Debug, Args)]
pub struct ProductChangeArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub available: Option<bool>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long)]
    pub width: Option<f64>,
    #[arg(long)]
    pub depth: Option<f64>,
    /// Replaces the material list when given
    #[arg(long = "material")]
    pub materials: Vec<String>,
    /// Replaces the color list when given
    #[arg(long = "color")]
    pub colors: Vec<String>,
    #[arg(long)]
    pub image: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // A client error already carries its cause in its own message
            match err.downcast_ref::<ClientError>() {
                Some(client_err) => eprintln!("error: {client_err}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    match cli.command {
        Command::Serve => {
            catalog_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                address = %settings.server.bind_address(),
                "catalog service starting from CLI"
            );
            catalog_app::serve(settings).await
        }
        Command::Products(command) => {
            catalog_telemetry::init_with_writer(&settings.telemetry, std::io::stderr)?;
            let base_url = cli.base_url.unwrap_or(settings.client.base_url);
            commands::products(&base_url, command).await
        }
        Command::Categories(command) => {
            catalog_telemetry::init_with_writer(&settings.telemetry, std::io::stderr)?;
            let base_url = cli.base_url.unwrap_or(settings.client.base_url);
            commands::categories(&base_url, command).await
        }
    }
}
