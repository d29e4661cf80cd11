//! You&Safilo storefront endpoints.
//!
//! The Spanish-locale site is the one carrying the availability markup the
//! stock parser looks for, so all URLs are pinned to `/es/`.

/// Storefront base URL
pub const BASE_URL: &str = "https://www.youandsafilo.com";

/// Logged-in landing page (also where unauthorized product requests bounce to)
pub const HOME_URL: &str = "https://www.youandsafilo.com/es/";

/// Login form, with the post-login redirect back to the storefront root
pub const LOGIN_URL: &str = "https://www.youandsafilo.com/es/login?ec=302&startURL=%2F";

/// Marker present on the logged-in landing page (product carousel) and absent
/// from the login form; used to verify a session after login.
pub const LOGGED_IN_MARKER: &str = "swiper-slide";

/// Product detail page for a style code.
pub fn product_url(style_code: &str) -> String {
    format!("{HOME_URL}product/{style_code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_url_for_style_code() {
        assert_eq!(
            product_url("CARRERA-1058-S"),
            "https://www.youandsafilo.com/es/product/CARRERA-1058-S"
        );
    }
}
