//! Build-time configuration of the web front end.
//!
//! Values are baked in when the bundle is built (`KODU_API_URL=... trunk build`)
//! because a static bundle has no process environment at runtime.

use kodu_core::endpoints::DEFAULT_API_BASE;

/// Publishable test key of the payment gateway, used when none is configured.
pub const DEFAULT_RAZORPAY_KEY: &str = "rzp_test_16AlwZgy97TEw2";

/// Backend base URL, without a trailing slash.
#[must_use]
pub fn api_base_url() -> String {
    resolve(option_env!("KODU_API_URL"), DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Publishable key handed to the checkout overlay.
#[must_use]
pub fn razorpay_key() -> String {
    resolve(option_env!("KODU_RAZORPAY_KEY"), DEFAULT_RAZORPAY_KEY).to_string()
}

fn resolve<'a>(configured: Option<&'a str>, fallback: &'a str) -> &'a str {
    configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back() {
        assert_eq!(resolve(None, "a"), "a");
        assert_eq!(resolve(Some("  "), "a"), "a");
        assert_eq!(resolve(Some(" b "), "a"), "b");
    }

    #[test]
    fn base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
        assert!(!razorpay_key().is_empty());
    }
}
