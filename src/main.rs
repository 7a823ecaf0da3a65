use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use pagador_stub::application::gateway::PaymentGateway;
use pagador_stub::application::scenario;
use pagador_stub::domain::ports::KeyValueStoreBox;
use pagador_stub::infrastructure::in_memory::InMemoryKeyValueStore;
use pagador_stub::interfaces::csv::outcome_writer::OutcomeWriter;
use pagador_stub::interfaces::csv::scenario_reader::ScenarioReader;
use pagador_stub::interfaces::xml;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One CSV row per step
    Csv,
    /// The processor's XML response body per authorize/capture step
    Xml,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario CSV file (operation, order, card, amount)
    input: PathBuf,

    /// Path to persistent order database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

fn order_store(db_path: Option<PathBuf>) -> Result<KeyValueStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            use pagador_stub::infrastructure::rocksdb::RocksDBKeyValueStore;
            let store = RocksDBKeyValueStore::open(db_path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(db_path) => {
            warn!(
                db_path = %db_path.display(),
                "'storage-rocksdb' feature is not enabled, falling back to in-memory storage"
            );
            Ok(Box::new(InMemoryKeyValueStore::new()))
        }
        None => Ok(Box::new(InMemoryKeyValueStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let gateway = PaymentGateway::new(order_store(cli.db_path)?);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = ScenarioReader::new(file);

    let mut out = io::stdout();
    let mut writer = match cli.format {
        OutputFormat::Csv => Some(OutcomeWriter::new(io::stdout())),
        OutputFormat::Xml => None,
    };

    for step in reader.steps() {
        let step = match step {
            Ok(step) => step,
            Err(e) => {
                warn!("Error reading step: {}", e);
                continue;
            }
        };
        let outcome = match scenario::execute(&gateway, &step).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Error executing step: {}", e);
                continue;
            }
        };

        match writer.as_mut() {
            Some(writer) => writer.write_outcome(&outcome).into_diagnostic()?,
            None => {
                if let Some(body) = xml::render(&outcome) {
                    out.write_all(body.as_bytes()).into_diagnostic()?;
                }
            }
        }
    }

    if let Some(writer) = writer.as_mut() {
        writer.flush().into_diagnostic()?;
    }
    out.flush().into_diagnostic()?;

    let captured: BTreeSet<String> = gateway.captured().await.into_iter().collect();
    let mut captured_total = Decimal::ZERO;
    for order_id in &captured {
        if let Some(amount) = gateway
            .orders()
            .find_optional(order_id)
            .await
            .into_diagnostic()?
            .and_then(|order| order.amount_value())
        {
            captured_total += amount;
        }
    }
    info!(
        captured_orders = captured.len(),
        %captured_total,
        stored_orders = gateway.orders().count().await.into_diagnostic()?,
        "scenario finished"
    );

    Ok(())
}
