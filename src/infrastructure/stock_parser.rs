//! Stock availability extraction from product pages
//!
//! The storefront renders every variant's EAN into the page, each followed by
//! a `c-lex-product-availability` component. A variant counts as in stock only
//! when that component advertises fast shipping ("Envío rápido"); everything
//! else, including an EAN that never appears, maps to out of stock.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::domain::{StockRecord, StockStatus};

/// Markers used to locate availability on a product page.
///
/// Kept in one place so a storefront markup change is a single edit.
#[derive(Debug, Clone)]
pub struct StockExtractorConfig {
    /// Element name of the availability component following each EAN
    pub availability_element: String,
    /// Text marking a variant as shippable
    pub fast_shipping_marker: String,
}

impl Default for StockExtractorConfig {
    fn default() -> Self {
        Self {
            availability_element: "c-lex-product-availability".to_string(),
            fast_shipping_marker: "Envío rápido".to_string(),
        }
    }
}

/// Availability extractor for storefront product pages
#[derive(Debug, Clone, Default)]
pub struct StockExtractor {
    config: StockExtractorConfig,
}

impl StockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StockExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract the stock record for `ean` from a rendered product page.
    ///
    /// Never fails: any page where the EAN or its availability component
    /// cannot be resolved yields an out-of-stock record.
    pub fn extract(&self, html: &str, ean: &str) -> StockRecord {
        if ean.is_empty() {
            return StockRecord::unavailable(ean);
        }

        let document = Html::parse_document(html);
        match self.availability_for_ean(&document, ean) {
            Some(true) => StockRecord::new(ean, StockStatus::Available),
            Some(false) => {
                debug!(%ean, "availability component found without fast-shipping marker");
                StockRecord::unavailable(ean)
            }
            None => {
                debug!(%ean, "EAN or availability component not present on page");
                StockRecord::unavailable(ean)
            }
        }
    }

    /// Walk the document in order: once the text node carrying the EAN has
    /// been passed, the next availability component belongs to that variant.
    fn availability_for_ean(&self, document: &Html, ean: &str) -> Option<bool> {
        let mut seen_ean = false;
        for node in document.root_element().descendants() {
            if !seen_ean {
                if let Some(text) = node.value().as_text() {
                    if text.contains(ean) {
                        seen_ean = true;
                    }
                }
            } else if let Some(element) = node.value().as_element() {
                if element.name() == self.config.availability_element {
                    let text: String = ElementRef::wrap(node)?.text().collect();
                    return Some(text.contains(&self.config.fast_shipping_marker));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EAN: &str = "827886014576";

    fn product_page(availability: &str) -> String {
        format!(
            r#"
            <html><body>
              <div class="variant-list">
                <div class="variant">
                  <div class="ean-label">EAN: 827886014576</div>
                  <c-lex-product-availability>{availability}</c-lex-product-availability>
                </div>
              </div>
            </body></html>
            "#
        )
    }

    #[test]
    fn fast_shipping_marker_means_available() {
        let extractor = StockExtractor::new();
        let record = extractor.extract(&product_page("Envío rápido 24/48h"), EAN);
        assert_eq!(record.stock_status, StockStatus::Available);
        assert_eq!(record.ean, EAN);
        assert!(!record.updated);
    }

    #[test]
    fn availability_without_marker_means_unavailable() {
        let extractor = StockExtractor::new();
        let record = extractor.extract(&product_page("Disponible próximamente"), EAN);
        assert_eq!(record.stock_status, StockStatus::Unavailable);
    }

    #[test]
    fn missing_ean_means_unavailable() {
        let extractor = StockExtractor::new();
        let record = extractor.extract(&product_page("Envío rápido"), "999999999999");
        assert_eq!(record.stock_status, StockStatus::Unavailable);
    }

    #[test]
    fn availability_before_the_ean_is_ignored() {
        let html = r#"
            <html><body>
              <div class="variant">
                <div class="ean-label">EAN: 111111111111</div>
                <c-lex-product-availability>Envío rápido</c-lex-product-availability>
              </div>
              <div class="variant">
                <div class="ean-label">EAN: 827886014576</div>
                <c-lex-product-availability>Agotado</c-lex-product-availability>
              </div>
            </body></html>
        "#;
        let extractor = StockExtractor::new();
        assert_eq!(
            extractor.extract(html, EAN).stock_status,
            StockStatus::Unavailable
        );
        assert_eq!(
            extractor.extract(html, "111111111111").stock_status,
            StockStatus::Available
        );
    }

    #[test]
    fn empty_ean_never_matches() {
        let extractor = StockExtractor::new();
        let record = extractor.extract(&product_page("Envío rápido"), "");
        assert_eq!(record.stock_status, StockStatus::Unavailable);
    }

    #[test]
    fn unparseable_page_is_unavailable() {
        let extractor = StockExtractor::new();
        let record = extractor.extract("not html at all", EAN);
        assert_eq!(record.stock_status, StockStatus::Unavailable);
    }
}
