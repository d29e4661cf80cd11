//! Storefront session: login and product page fetching
//!
//! The storefront is session-gated; product pages requested without a valid
//! session bounce back to the root or the login form. That bounce is detected
//! from the final URL after redirects, mirroring how the site behaves in a
//! browser.

use anyhow::Context;
use tracing::{info, warn};

use crate::domain::ScrapeError;
use crate::infrastructure::config::Credentials;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::storefront;

/// Authenticated storefront session over a cookie-holding HTTP client
pub struct StorefrontSession {
    http: HttpClient,
}

impl StorefrontSession {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Log into the storefront and verify the session.
    ///
    /// The login page is loaded first so the session cookie jar is primed
    /// before the credential POST, then the landing page is checked for the
    /// logged-in marker.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ScrapeError> {
        self.http
            .get_text(storefront::LOGIN_URL)
            .await
            .context("Failed to load login page")?;

        let response = self
            .http
            .post_form(
                storefront::LOGIN_URL,
                &[
                    ("username", credentials.username.as_str()),
                    ("password", credentials.password.as_str()),
                ],
            )
            .await?;

        if response.status().is_client_error() {
            return Err(ScrapeError::LoginFailed(format!(
                "credential POST rejected with status {}",
                response.status()
            )));
        }

        let landing = self
            .http
            .get(storefront::HOME_URL)
            .await
            .context("Failed to load landing page after login")?;

        if landing.url().as_str().contains("login") {
            return Err(ScrapeError::LoginFailed(
                "redirected back to the login form".to_string(),
            ));
        }

        let body = landing
            .text()
            .await
            .context("Failed to read landing page")?;
        if !body.contains(storefront::LOGGED_IN_MARKER) {
            return Err(ScrapeError::LoginFailed(
                "landing page is missing the logged-in marker".to_string(),
            ));
        }

        info!("Storefront login successful");
        Ok(())
    }

    /// Fetch a product page by style code and return its HTML.
    ///
    /// A redirect to the storefront root or the login form means the session
    /// does not cover this product (expired, or the style is not in the
    /// account's assortment).
    pub async fn fetch_product_page(&self, style_code: &str) -> Result<String, ScrapeError> {
        let url = storefront::product_url(style_code);
        let response = self.http.get(&url).await?;

        let final_url = response.url().as_str();
        if final_url == storefront::HOME_URL || final_url.contains("login") {
            warn!(style_code, final_url, "product page bounced, session not authorized");
            return Err(ScrapeError::NotAuthorized {
                style_code: style_code.to_string(),
            });
        }

        let html = response
            .text()
            .await
            .with_context(|| format!("Failed to read product page: {url}"))?;
        Ok(html)
    }
}
