//! Typed access to the persisted collections.

use std::fmt;

use factura_core::catalog::{Client, CompanyInfo, Product};
use factura_core::document::{Invoice, Quote};
use factura_core::payment::Payment;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::backend::KeyValueStore;
use crate::error::StoreResult;

/// The fixed set of persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Client records.
    Clients,
    /// Quotes.
    Quotes,
    /// Invoices.
    Invoices,
    /// Catalog products.
    Products,
    /// Payments.
    Payments,
    /// Company settings (a single object, not a list).
    CompanyInfo,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Self; 6] = [
        Self::Clients,
        Self::Quotes,
        Self::Invoices,
        Self::Products,
        Self::Payments,
        Self::CompanyInfo,
    ];

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Quotes => "quotes",
            Self::Invoices => "invoices",
            Self::Products => "products",
            Self::Payments => "payments",
            Self::CompanyInfo => "companyInfo",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Loads and saves whole collections through a `KeyValueStore`.
///
/// A collection that was never written loads as its default (empty list,
/// blank company info).
#[derive(Debug, Clone)]
pub struct Repository<S> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store for direct mutation.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the repository and returns the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Loads a collection, or its default if it was never saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the stored value is not valid
    /// for `T`, or a backend error if it cannot be read.
    pub fn load<T>(&self, collection: Collection) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.store.get(collection.key())? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)?;
                debug!(collection = %collection, bytes = raw.len(), "loaded collection");
                Ok(value)
            }
            None => {
                debug!(collection = %collection, "collection not yet saved, using default");
                Ok(T::default())
            }
        }
    }

    /// Serializes and stores a collection wholesale.
    pub fn save<T>(&mut self, collection: Collection, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string_pretty(value)?;
        self.store.set(collection.key(), raw)
    }

    /// Loads all clients.
    pub fn load_clients(&self) -> StoreResult<Vec<Client>> {
        self.load(Collection::Clients)
    }

    /// Saves all clients.
    pub fn save_clients(&mut self, clients: &[Client]) -> StoreResult<()> {
        self.save(Collection::Clients, clients)
    }

    /// Loads all quotes.
    pub fn load_quotes(&self) -> StoreResult<Vec<Quote>> {
        self.load(Collection::Quotes)
    }

    /// Saves all quotes.
    pub fn save_quotes(&mut self, quotes: &[Quote]) -> StoreResult<()> {
        self.save(Collection::Quotes, quotes)
    }

    /// Loads all invoices.
    pub fn load_invoices(&self) -> StoreResult<Vec<Invoice>> {
        self.load(Collection::Invoices)
    }

    /// Saves all invoices.
    pub fn save_invoices(&mut self, invoices: &[Invoice]) -> StoreResult<()> {
        self.save(Collection::Invoices, invoices)
    }

    /// Loads all products.
    pub fn load_products(&self) -> StoreResult<Vec<Product>> {
        self.load(Collection::Products)
    }

    /// Saves all products.
    pub fn save_products(&mut self, products: &[Product]) -> StoreResult<()> {
        self.save(Collection::Products, products)
    }

    /// Loads all payments.
    pub fn load_payments(&self) -> StoreResult<Vec<Payment>> {
        self.load(Collection::Payments)
    }

    /// Saves all payments.
    pub fn save_payments(&mut self, payments: &[Payment]) -> StoreResult<()> {
        self.save(Collection::Payments, payments)
    }

    /// Loads the company settings.
    pub fn load_company_info(&self) -> StoreResult<CompanyInfo> {
        self.load(Collection::CompanyInfo)
    }

    /// Saves the company settings.
    pub fn save_company_info(&mut self, info: &CompanyInfo) -> StoreResult<()> {
        self.save(Collection::CompanyInfo, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use crate::error::StoreError;
    use factura_shared::types::ClientId;
    use rstest::rstest;

    #[rstest]
    #[case(Collection::Clients, "clients")]
    #[case(Collection::Payments, "payments")]
    #[case(Collection::CompanyInfo, "companyInfo")]
    fn test_collection_keys(#[case] collection: Collection, #[case] key: &str) {
        assert_eq!(collection.key(), key);
    }

    #[test]
    fn test_missing_collections_load_as_default() {
        let repo = Repository::new(MemoryStore::new());
        assert!(repo.load_quotes().unwrap().is_empty());
        assert_eq!(repo.load_company_info().unwrap(), CompanyInfo::default());
    }

    #[test]
    fn test_saved_clients_use_persisted_field_names() {
        let mut repo = Repository::new(MemoryStore::new());
        let client = Client {
            id: ClientId::new(),
            name: "Innovate SARL".to_string(),
            email: "contact@innovate.ma".to_string(),
            phone: String::new(),
            address: String::new(),
            tax_id: "001234567000089".to_string(),
        };
        repo.save_clients(std::slice::from_ref(&client)).unwrap();

        let raw = repo.store().get("clients").unwrap().unwrap();
        assert!(raw.contains("\"ice\""));
        assert_eq!(repo.load_clients().unwrap(), vec![client]);
    }

    #[test]
    fn test_corrupted_collection_is_reported() {
        let mut store = MemoryStore::new();
        store.set("invoices", "{not json".to_string()).unwrap();
        let repo = Repository::new(store);
        assert!(matches!(
            repo.load_invoices(),
            Err(StoreError::Serialization(_))
        ));
    }
}
