// web_app/mod.rs - Root module for the Leptos web application
//
// Architecture:
// - model/: Shared data types and backend response adapters
// - pricing, selection, session, validation, storage: plain logic, no framework
// - export/: proposal assembly and .docx rendering
// - config, api/: environment settings, backend REST client and image proxy (SSR only)
// - server_fns: server function declarations (both client and server)
// - context: reactive app state provided at the root
// - components/, pages/, app.rs: the UI (both SSR and hydrate)

pub mod export;
pub mod model;
pub mod pricing;
pub mod selection;
pub mod session;
pub mod storage;
pub mod validation;

#[cfg(feature = "ssr")]
pub mod config;

// Backend client and image proxy (SSR only)
#[cfg(feature = "ssr")]
pub mod api;

// Server function declarations - must be available to both client and server
// The #[server] macro generates client stubs that call the server via HTTP
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod server_fns;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod context;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod components;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod pages;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub use app::App;
