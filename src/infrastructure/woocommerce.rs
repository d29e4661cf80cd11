//! WooCommerce REST API client
//!
//! Minimal wc/v3 surface: variation lookup by SKU and variation stock update.
//! Authentication uses HTTP basic auth with the consumer key/secret, which
//! WooCommerce accepts over HTTPS.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::StockStatus;
use crate::infrastructure::config::{WooConfig, WooCredentials};

/// Product hit as returned by `GET /products?sku=`.
///
/// SKU lookups resolve to the variation itself, so `id` is the variation and
/// `parent_id` the owning product.
#[derive(Debug, Clone, Deserialize)]
struct ProductHit {
    id: u64,
    #[serde(default)]
    parent_id: u64,
}

/// Location of a variation inside the WooCommerce catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariationRef {
    pub product_id: u64,
    pub variation_id: u64,
}

/// Body of a variation stock update
#[derive(Debug, Serialize)]
struct StockUpdate {
    stock_quantity: u32,
    stock_status: &'static str,
}

impl StockUpdate {
    fn for_status(status: StockStatus) -> Self {
        Self {
            stock_quantity: status.wc_stock_quantity(),
            stock_status: status.wc_stock_status(),
        }
    }
}

/// WooCommerce REST client
pub struct WooClient {
    client: Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl WooClient {
    pub fn new(credentials: &WooCredentials, config: &WooConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create WooCommerce HTTP client")?;

        Ok(Self {
            client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
            consumer_key: credentials.consumer_key.clone(),
            consumer_secret: credentials.consumer_secret.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/wp-json/wc/v3/{path}", self.base_url)
    }

    /// Look up a variation by SKU. `None` when the store has no match.
    pub async fn find_variation(&self, sku: &str) -> Result<Option<VariationRef>> {
        let response = self
            .client
            .get(self.endpoint("products"))
            .query(&[("sku", sku)])
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .send()
            .await
            .with_context(|| format!("Variation lookup failed for SKU {sku}"))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Variation lookup for SKU {sku} returned status {}",
                response.status()
            );
        }

        let hits: Vec<ProductHit> = response
            .json()
            .await
            .with_context(|| format!("Invalid lookup response for SKU {sku}"))?;

        Ok(hits.first().map(|hit| VariationRef {
            product_id: hit.parent_id,
            variation_id: hit.id,
        }))
    }

    /// Set a variation's stock quantity and status.
    pub async fn update_stock(&self, variation: VariationRef, status: StockStatus) -> Result<()> {
        let url = self.endpoint(&format!(
            "products/{}/variations/{}",
            variation.product_id, variation.variation_id
        ));
        let body = StockUpdate::for_status(status);

        debug!(
            product_id = variation.product_id,
            variation_id = variation.variation_id,
            stock_status = body.stock_status,
            "updating variation stock"
        );

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Stock update request failed: {url}"))?;

        let status_code = response.status();
        if !(status_code == reqwest::StatusCode::OK
            || status_code == reqwest::StatusCode::CREATED)
        {
            anyhow::bail!("Stock update returned status {status_code}: {url}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_update_body_for_available() {
        let body = StockUpdate::for_status(StockStatus::Available);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stock_quantity"], 999);
        assert_eq!(json["stock_status"], "instock");
    }

    #[test]
    fn stock_update_body_for_unavailable() {
        let body = StockUpdate::for_status(StockStatus::Unavailable);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stock_quantity"], 0);
        assert_eq!(json["stock_status"], "outofstock");
    }

    #[test]
    fn lookup_response_maps_variation_and_parent() {
        let hits: Vec<ProductHit> = serde_json::from_str(
            r#"[{"id": 4311, "parent_id": 1020, "sku": "827886014576", "price": "99.00"}]"#,
        )
        .unwrap();
        let variation = hits.first().map(|hit| VariationRef {
            product_id: hit.parent_id,
            variation_id: hit.id,
        });
        assert_eq!(
            variation,
            Some(VariationRef {
                product_id: 1020,
                variation_id: 4311
            })
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let credentials = WooCredentials {
            url: "https://shop.example.com/".to_string(),
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
        };
        let client = WooClient::new(&credentials, &WooConfig::default()).unwrap();
        assert_eq!(
            client.endpoint("products"),
            "https://shop.example.com/wp-json/wc/v3/products"
        );
    }
}
