//! Demo data seeder for Factura development and testing.
//!
//! Seeds two clients, three catalog products, one accepted quote, one sent
//! invoice and placeholder company settings into `storage.data_dir`.
//! Collections that already hold data are left alone.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use factura_core::catalog::{Client, CompanyInfo, Product, UserRole};
use factura_core::document::{Invoice, InvoiceStatus, LineItem, Quote, QuoteStatus};
use factura_shared::AppConfig;
use factura_shared::types::{ClientId, InvoiceId, ProductId, QuoteId};
use factura_store::{FileStore, KeyValueStore, Repository};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// The demo data set.
struct DemoData {
    clients: Vec<Client>,
    products: Vec<Product>,
    quotes: Vec<Quote>,
    invoices: Vec<Invoice>,
    company: CompanyInfo,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,factura=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let store = FileStore::open(&config.storage.data_dir)
        .with_context(|| format!("cannot open {}", config.storage.data_dir.display()))?;
    info!(data_dir = %store.root().display(), "Seeding demo data");

    let mut repository = Repository::new(store);
    seed(&mut repository, demo_data()?)?;

    info!("Seeding complete");
    Ok(())
}

fn seed<S: KeyValueStore>(repository: &mut Repository<S>, data: DemoData) -> anyhow::Result<()> {
    if repository.load_clients()?.is_empty() {
        repository.save_clients(&data.clients)?;
        info!(count = data.clients.len(), "Seeded clients");
    } else {
        info!("Clients already exist, skipping");
    }

    if repository.load_products()?.is_empty() {
        repository.save_products(&data.products)?;
        info!(count = data.products.len(), "Seeded products");
    } else {
        info!("Products already exist, skipping");
    }

    if repository.load_quotes()?.is_empty() {
        repository.save_quotes(&data.quotes)?;
        info!(count = data.quotes.len(), "Seeded quotes");
    } else {
        info!("Quotes already exist, skipping");
    }

    if repository.load_invoices()?.is_empty() {
        repository.save_invoices(&data.invoices)?;
        info!(count = data.invoices.len(), "Seeded invoices");
    } else {
        info!("Invoices already exist, skipping");
    }

    if repository.load_company_info()? == CompanyInfo::default() {
        repository.save_company_info(&data.company)?;
        info!("Seeded company info");
    } else {
        info!("Company info already set, skipping");
    }

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

fn product(name: &str, description: &str, unit_price: i64, unit: &str) -> Product {
    Product {
        id: ProductId::new(),
        name: name.to_string(),
        description: description.to_string(),
        unit_price: Decimal::from(unit_price),
        unit: unit.to_string(),
        tax_rate: Decimal::from(20),
    }
}

fn item(description: &str, quantity: i64, unit_price: i64, unit: &str) -> LineItem {
    LineItem::new(
        description,
        Decimal::from(quantity),
        Decimal::from(unit_price),
        Decimal::from(20),
        unit,
    )
}

fn demo_data() -> anyhow::Result<DemoData> {
    let tech = Client {
        id: ClientId::new(),
        name: "Tech Solutions Inc.".to_string(),
        email: "contact@techsolutions.com".to_string(),
        phone: "0522000001".to_string(),
        address: "123 Main St, Casablanca".to_string(),
        tax_id: "001234567000089".to_string(),
    };
    let innovate = Client {
        id: ClientId::new(),
        name: "Innovate SARL".to_string(),
        email: "contact@innovate.ma".to_string(),
        phone: "0522000002".to_string(),
        address: "456 Tech Park, Rabat".to_string(),
        tax_id: "001234567000090".to_string(),
    };

    let products = vec![
        product(
            "Développement Site Web",
            "Création d'un site web vitrine responsive.",
            15_000,
            "Forfait",
        ),
        product(
            "Maintenance Mensuelle",
            "Support technique et mises à jour.",
            2_000,
            "Mois",
        ),
        product(
            "Consulting SEO",
            "Optimisation pour les moteurs de recherche (par heure).",
            800,
            "Heure",
        ),
    ];

    let quote = Quote {
        id: QuoteId::new(),
        quote_number: "DEV-2023-001".to_string(),
        client_id: tech.id,
        issue_date: date(2023, 10, 15)?,
        expiry_date: date(2023, 11, 15)?,
        items: vec![
            item("Développement Site Web E-commerce", 1, 25_000, "Forfait"),
            item("Hébergement Annuel", 1, 1_500, "An"),
        ],
        status: QuoteStatus::Accepted,
        notes: Some("Paiement 50% à la commande, 50% à la livraison.".to_string()),
    };

    let invoice = Invoice {
        id: InvoiceId::new(),
        invoice_number: "FAC-2023-001".to_string(),
        quote_id: None,
        client_id: innovate.id,
        issue_date: date(2023, 10, 20)?,
        due_date: date(2023, 11, 20)?,
        items: vec![item("Consulting SEO - 10 heures", 10, 800, "Heure")],
        status: InvoiceStatus::Sent,
        notes: Some("Merci pour votre confiance.".to_string()),
    };

    let company = CompanyInfo {
        name: "Votre Nom d'Entreprise".to_string(),
        address: "Votre Adresse\nVotre Ville".to_string(),
        phone: "0500000000".to_string(),
        email: "contact@entreprise.com".to_string(),
        website: "www.entreprise.com".to_string(),
        logo_url: String::new(),
        ice: "000000000000000".to_string(),
        rc: "12345".to_string(),
        idf: "12345678".to_string(),
        patente: "12345678".to_string(),
        bank_name: "Votre Banque".to_string(),
        rib: "123456789012345678901234".to_string(),
        role: UserRole::Entrepreneur,
    };

    Ok(DemoData {
        clients: vec![tech, innovate],
        products,
        quotes: vec![quote],
        invoices: vec![invoice],
        company,
    })
}
