// web_app/model/mod.rs - Shared data models for client and server
//
// These structs are used throughout the application for type-safe
// communication between frontend, server functions, and the REST backend.

mod error;
mod page;
mod product;
mod user;

pub use error::{server_error_message, ApiError};
pub use page::{
    Page, ProductQuery, SortField, SortOption, SortOrder, UserQuery, DEFAULT_PER_PAGE, PER_PAGE_CHOICES,
};
pub use product::{strip_html, Product, Variation};
pub use user::{
    ContactMethod, LoginResponse, PasswordReset, RegisterData, User, UserId, UserPayload, UserRole,
};

use serde::{Deserialize, Serialize};

/// Optional proposal header fields entered before exporting
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    pub seller: Option<String>,
    pub company: Option<String>,
    pub contact: Option<String>,
}

impl ProposalMetadata {
    /// Build from raw form input; blank fields become `None`
    pub fn from_form(seller: &str, company: &str, contact: &str) -> Self {
        fn field(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        Self {
            seller: field(seller),
            company: field(company),
            contact: field(contact),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seller.is_none() && self.company.is_none() && self.contact.is_none()
    }
}

/// Server-provided knobs the browser needs to assemble a proposal
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Providers whose second gallery image is a better cover than the primary image
    pub gallery_first_providers: Vec<String>,
    /// Name printed in the document letterhead
    pub company_name: String,
}
