//! Company settings printed on documents.

use serde::{Deserialize, Serialize};

/// The role of the person using the application.
///
/// Only toggles UI affordances; it is not an access-control boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full administrator.
    #[serde(alias = "Administrateur")]
    Administrator,
    /// Sales.
    #[serde(alias = "Commercial")]
    Sales,
    /// Accountant, shown read-only screens.
    #[serde(alias = "Comptable")]
    Accountant,
    /// Sole proprietor.
    #[default]
    #[serde(alias = "Entrepreneur")]
    Entrepreneur,
}

impl UserRole {
    /// Returns true if editing affordances should be hidden.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Accountant)
    }
}

/// Issuing company details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    /// Company name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Phone.
    pub phone: String,
    /// Email.
    pub email: String,
    /// Website.
    pub website: String,
    /// Logo URL or data URI.
    pub logo_url: String,
    /// Common company identifier (ICE).
    pub ice: String,
    /// Trade register number (RC).
    pub rc: String,
    /// Tax identifier (IF).
    pub idf: String,
    /// Business licence (patente).
    pub patente: String,
    /// Bank name.
    pub bank_name: String,
    /// Bank account (RIB).
    pub rib: String,
    /// Current user role.
    pub role: UserRole,
}
