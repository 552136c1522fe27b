//! Admin tooling for Ofitsoft site content: one [`store::ContentStore`] per
//! content domain, a local file cache, and a client for the Content API.

pub mod api;
pub mod commands;
pub mod config;
pub mod store;
