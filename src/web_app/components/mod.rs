// web_app/components/mod.rs - UI components module
//
// Structure:
// - common.rs: Reusable atomic components (Button, Modal, Loading, Pagination, etc.)
// - search.rs: Catalog search controls (SearchBar, SortSelect, PerPageSelect)
// - product.rs: Product display components (ProductCard, ProductDetail, ResultsGrid)
// - navbar.rs: Top bar with the selection counter
// - selection.rs: Selected-products drawer
// - export.rs: Export proposal modal and status toast
// - users.rs: Admin users table and dialogs
// - auth.rs: Route guard and auth form pieces

pub mod auth;
pub mod common;
pub mod export;
pub mod navbar;
pub mod product;
pub mod search;
pub mod selection;
pub mod users;

// Re-export commonly used components for convenience
pub use auth::*;
pub use common::*;
pub use export::*;
pub use navbar::*;
pub use product::*;
pub use search::*;
pub use selection::*;
pub use users::*;
