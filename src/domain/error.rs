//! Scrape-side error classification.
//!
//! Every variant here is recoverable at the pipeline level: the affected
//! product is recorded as out of stock and the run continues. Only a failed
//! login aborts the scrape phase.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The storefront rejected the credentials or never presented a logged-in
    /// session.
    #[error("storefront login failed: {0}")]
    LoginFailed(String),

    /// The product page bounced back to the storefront root or the login
    /// form, meaning the session does not cover this product.
    #[error("session not authorized for style code {style_code}")]
    NotAuthorized { style_code: String },

    /// Transport-level failure while talking to the storefront.
    #[error(transparent)]
    Http(#[from] anyhow::Error),
}
