//! Safilo stock sync - storefront availability scraper with WooCommerce push
//!
//! This crate scrapes per-EAN stock availability from the You&Safilo B2B
//! storefront for a CSV catalog of style codes, checkpoints the results to a
//! JSON file, and pushes stock updates to a WooCommerce store.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
