//! Client records.

use std::collections::HashSet;

use factura_shared::types::ClientId;
use serde::{Deserialize, Serialize};

use crate::document::DocumentError;

/// A client that quotes and invoices are addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier.
    pub id: ClientId,
    /// Company or person name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Tax identifier (ICE).
    #[serde(default, rename = "ice", alias = "taxId")]
    pub tax_id: String,
}

impl Client {
    /// Returns an editable draft of this client.
    #[must_use]
    pub fn to_draft(&self) -> ClientDraft {
        ClientDraft {
            id: Some(self.id),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            tax_id: self.tax_id.clone(),
        }
    }
}

/// A client being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    /// Existing id, or `None` for a new client.
    #[serde(default)]
    pub id: Option<ClientId>,
    /// Company or person name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Tax identifier (ICE).
    #[serde(default, rename = "ice", alias = "taxId")]
    pub tax_id: String,
}

impl ClientDraft {
    /// Validates the draft and turns it into a client with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Validation` if the name is blank.
    pub fn into_client(self, id: ClientId) -> Result<Client, DocumentError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DocumentError::Validation(
                "client name is required".to_string(),
            ));
        }
        Ok(Client {
            id,
            name,
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            tax_id: self.tax_id.trim().to_string(),
        })
    }
}

/// Outcome of merging an imported batch of clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Clients to append, with fresh ids.
    pub imported: Vec<Client>,
    /// Rows skipped because the email already exists.
    pub duplicates: usize,
    /// Rows skipped because they failed validation.
    pub invalid: usize,
}

/// Merges imported rows into an existing client list.
///
/// Rows whose email (case-insensitive) already exists, in the list or
/// earlier in the batch, are skipped. Rows without an email are always kept.
#[must_use]
pub fn merge_imported_clients(existing: &[Client], incoming: Vec<ClientDraft>) -> ImportSummary {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|client| client.email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect();

    let mut summary = ImportSummary::default();
    for draft in incoming {
        let email = draft.email.trim().to_lowercase();
        if !email.is_empty() && !seen.insert(email) {
            summary.duplicates += 1;
            continue;
        }
        match draft.into_client(ClientId::new()) {
            Ok(client) => summary.imported.push(client),
            Err(_) => summary.invalid += 1,
        }
    }
    summary
}
