//! Factura command line.
//!
//! Operates on the JSON collections in `storage.data_dir`.
//!
//! Usage: factura <COMMAND>

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use factura_core::document::DocumentKind;
use factura_core::payment::PaymentMethod;
use factura_shared::AppConfig;
use factura_store::{DocumentManager, FileStore, Repository, SystemClock};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "factura", version, about = "Quotes, invoices and payments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the next number for a document kind
    NextNumber {
        /// Document kind
        kind: KindArg,
    },
    /// List quotes, newest first
    Quotes {
        /// Include archived quotes
        #[arg(long)]
        archived: bool,
    },
    /// List invoices, newest first
    Invoices,
    /// Show the totals of a quote or invoice
    Totals {
        /// Quote or invoice number
        number: String,
    },
    /// Record a payment against an invoice
    Pay {
        /// Invoice number
        invoice: String,
        /// Amount received
        amount: Decimal,
        /// Payment method
        #[arg(long, default_value = "bank_transfer", value_parser = parse_method)]
        method: PaymentMethod,
        /// Payment date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Convert a quote into a new invoice
    Convert {
        /// Quote number
        quote: String,
    },
    /// Archive an accepted or rejected quote
    Archive {
        /// Quote number
        quote: String,
    },
    /// Delete an invoice and its payments
    DeleteInvoice {
        /// Invoice number
        invoice: String,
    },
    /// Show the dashboard summary
    Dashboard,
    /// Show a client's account
    Client {
        /// Client name or id
        client: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Quote,
    Invoice,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Quote => Self::Quote,
            KindArg::Invoice => Self::Invoice,
        }
    }
}

fn parse_method(s: &str) -> Result<PaymentMethod, String> {
    PaymentMethod::parse(s).ok_or_else(|| format!("unknown payment method '{s}'"))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "factura=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let store = FileStore::open(&config.storage.data_dir)?;
    info!(data_dir = %store.root().display(), "Opened data directory");
    let mut manager = DocumentManager::new(Repository::new(store), SystemClock, &config);

    commands::run(&mut manager, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pay_arguments() {
        let cli = Cli::try_parse_from([
            "factura",
            "pay",
            "FAC-2024-001",
            "1500.50",
            "--method",
            "cheque",
            "--date",
            "2024-02-01",
        ])
        .unwrap();
        let Command::Pay {
            invoice,
            amount,
            method,
            date,
        } = cli.command
        else {
            panic!("expected pay");
        };
        assert_eq!(invoice, "FAC-2024-001");
        assert_eq!(amount, Decimal::new(150_050, 2));
        assert_eq!(method, PaymentMethod::Cheque);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let result = Cli::try_parse_from([
            "factura",
            "pay",
            "FAC-2024-001",
            "10",
            "--method",
            "bitcoin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_next_number_kind() {
        let cli = Cli::try_parse_from(["factura", "next-number", "invoice"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::NextNumber {
                kind: KindArg::Invoice
            }
        ));
    }
}
