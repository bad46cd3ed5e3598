use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storefront::application::checkout::CheckoutEngine;
use storefront::application::notification::NotificationDispatcher;
use storefront::config::Config;
use storefront::domain::payment::SignatureVerifier;
use storefront::domain::ports::{OrderStoreRef, ProductStoreRef};
use storefront::domain::product::ProductDraft;
use storefront::infrastructure::in_memory::{InMemoryOrderStore, InMemoryProductStore};
use storefront::infrastructure::razorpay::RazorpayGateway;
use storefront::infrastructure::smtp::SmtpMailer;
use storefront::interfaces::csv::order_writer::OrderCsvWriter;
use storefront::interfaces::http::{self, AppState};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the storefront API server
    Serve,
    /// Load catalog entries from a JSON file into the product store
    Seed {
        /// JSON array of product drafts
        file: PathBuf,
    },
    /// Write all orders to stdout as CSV, newest-first
    Export,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let (orders, products) = open_stores(cli.db_path)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(orders).await,
        Command::Seed { file } => seed(products, &file).await,
        Command::Export => export(orders).await,
    }
}

async fn serve(orders: OrderStoreRef) -> Result<()> {
    let config = Config::load().into_diagnostic()?;

    let gateway = Arc::new(RazorpayGateway::new(
        config.razorpay_key_id.clone(),
        config.razorpay_key_secret.clone(),
    ));
    let mailer = Arc::new(
        SmtpMailer::new(
            &config.smtp_host,
            config.smtp_username.clone(),
            config.smtp_password.clone(),
            &config.mail_from,
        )
        .into_diagnostic()?,
    );

    let engine = Arc::new(CheckoutEngine::new(
        gateway,
        SignatureVerifier::new(config.razorpay_key_secret.clone()),
        orders,
        NotificationDispatcher::new(mailer, config.operator_email.clone()),
    ));

    let state = AppState::new(engine, &config);
    http::serve(state, config.port).await.into_diagnostic()
}

async fn seed(products: ProductStoreRef, file: &Path) -> Result<()> {
    let file = File::open(file).into_diagnostic()?;
    let drafts: Vec<ProductDraft> = serde_json::from_reader(file).into_diagnostic()?;

    let mut count = 0usize;
    for draft in drafts {
        let product = products.insert(draft).await.into_diagnostic()?;
        println!("Added product: {} ({})", product.name, product.id);
        count += 1;
    }
    println!("Seeding completed: {count} products");
    Ok(())
}

async fn export(orders: OrderStoreRef) -> Result<()> {
    let listed = orders.list_by_recency().await.into_diagnostic()?;

    let stdout = std::io::stdout();
    let mut writer = OrderCsvWriter::new(stdout.lock());
    writer.write_orders(&listed).into_diagnostic()?;
    Ok(())
}

fn open_stores(db_path: Option<PathBuf>) -> Result<(OrderStoreRef, ProductStoreRef)> {
    match db_path {
        Some(path) => open_persistent(path),
        None => Ok((
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(InMemoryProductStore::new()),
        )),
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent(path: PathBuf) -> Result<(OrderStoreRef, ProductStoreRef)> {
    use storefront::infrastructure::rocksdb::RocksDbStore;

    let store = RocksDbStore::open(path).into_diagnostic()?;
    Ok((Arc::new(store.clone()), Arc::new(store)))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent(_path: PathBuf) -> Result<(OrderStoreRef, ProductStoreRef)> {
    Err(miette::miette!(
        "this build has no persistent storage; rebuild with --features storage-rocksdb"
    ))
}
