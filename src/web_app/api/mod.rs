// web_app/api/mod.rs - Server-side integrations
//
// - client: REST backend client shared by all server functions
// - image_proxy: actix handler that fetches external images for the export

pub mod client;
pub mod image_proxy;

pub use client::BackendClient;
pub use image_proxy::ImageProxy;
