use serde::{Deserialize, Serialize};

/// One row of the input catalog CSV.
///
/// Column headers follow the vendor export format ("Style Code", "EAN Code").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleEntry {
    #[serde(rename = "Style Code")]
    pub style_code: String,
    #[serde(rename = "EAN Code")]
    pub ean: String,
}

/// Stock availability as reported by the storefront.
///
/// Serialized with the storefront's Spanish labels so checkpoint files written
/// by earlier runs keep loading unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Disponible")]
    Available,
    #[serde(rename = "No disponible")]
    Unavailable,
}

impl StockStatus {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    /// WooCommerce `stock_status` value for this availability.
    pub fn wc_stock_status(self) -> &'static str {
        match self {
            Self::Available => "instock",
            Self::Unavailable => "outofstock",
        }
    }

    /// WooCommerce `stock_quantity` value for this availability.
    ///
    /// 999 is the storefront-sync sentinel for "in stock"; real quantities are
    /// not exposed by the vendor site.
    pub fn wc_stock_quantity(self) -> u32 {
        match self {
            Self::Available => 999,
            Self::Unavailable => 0,
        }
    }
}

/// One checkpoint entry: scraped availability plus the push flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub ean: String,
    pub stock_status: StockStatus,
    /// Whether this record has already been pushed to WooCommerce.
    #[serde(rename = "actualizado", default)]
    pub updated: bool,
}

impl StockRecord {
    pub fn new(ean: impl Into<String>, stock_status: StockStatus) -> Self {
        Self {
            ean: ean.into(),
            stock_status,
            updated: false,
        }
    }

    /// Fallback record for products the scraper could not resolve.
    pub fn unavailable(ean: impl Into<String>) -> Self {
        Self::new(ean, StockStatus::Unavailable)
    }
}

/// Normalize an EAN for comparison, checkpoint storage, and SKU lookup.
///
/// The WooCommerce catalog stores SKUs without the leading zeros the vendor
/// export carries, so they are stripped on the way in.
pub fn normalize_ean(raw: &str) -> String {
    raw.trim().trim_start_matches('0').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ean_strips_leading_zeros_and_whitespace() {
        assert_eq!(normalize_ean(" 00827886014576 "), "827886014576");
        assert_eq!(normalize_ean("827886014576"), "827886014576");
    }

    #[test]
    fn normalize_ean_of_all_zeros_is_empty() {
        assert_eq!(normalize_ean("0000"), "");
    }

    #[test]
    fn stock_status_maps_to_woocommerce_fields() {
        assert_eq!(StockStatus::Available.wc_stock_status(), "instock");
        assert_eq!(StockStatus::Available.wc_stock_quantity(), 999);
        assert_eq!(StockStatus::Unavailable.wc_stock_status(), "outofstock");
        assert_eq!(StockStatus::Unavailable.wc_stock_quantity(), 0);
    }

    #[test]
    fn stock_record_serializes_with_legacy_field_names() {
        let record = StockRecord::new("827886014576", StockStatus::Available);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ean"], "827886014576");
        assert_eq!(json["stock_status"], "Disponible");
        assert_eq!(json["actualizado"], false);
    }

    #[test]
    fn stock_record_deserializes_legacy_checkpoint_entry() {
        let record: StockRecord = serde_json::from_str(
            r#"{"ean": "8056597123456", "stock_status": "No disponible", "actualizado": true}"#,
        )
        .unwrap();
        assert_eq!(record.ean, "8056597123456");
        assert_eq!(record.stock_status, StockStatus::Unavailable);
        assert!(record.updated);
    }

    #[test]
    fn missing_updated_flag_defaults_to_false() {
        let record: StockRecord =
            serde_json::from_str(r#"{"ean": "1", "stock_status": "Disponible"}"#).unwrap();
        assert!(!record.updated);
    }
}
