//! BannerConfig - the form fields describing one festival promotion.

/// Accent colour used when none is configured (amber).
pub const DEFAULT_ACCENT_COLOR: &str = "#fbbf24";

const DEFAULT_FESTIVAL: &str = "Chhath Puja";

const DEFAULT_OFFERS: &str = "1. Flat 25% off on Gold Jewellery Making Charges.
2. Upto 50% off on Diamond Jewellery.
3. Special collection of Silver Ornaments.
4. 100% BIS Hallmarked Jewellery.";

const DEFAULT_SHOP_NAME: &str = "Raj Nandani Jewellers";
const DEFAULT_ADDRESS: &str = "Johri Complex, Opp. Axis Bank ATM, Bakerganj, Patna";
const DEFAULT_MOBILE: &str = "+91 82107 75023";

/// All user-editable banner fields.
///
/// Fields are independent strings with no cross-field invariants. Updates go
/// through [`BannerConfig::apply`] so every mutation is an explicit value.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerConfig {
    pub festival_name: String,
    /// Newline-delimited offer lines.
    pub offers: String,
    pub accent_color: String,
    pub shop_name: String,
    /// Logo as a `data:` URI.
    pub logo: Option<String>,
    pub address: String,
    pub email: String,
    pub website: String,
    pub mobile_number: String,
    pub alt_mobile_number: String,
    pub instagram_handle: String,
    pub facebook_handle: String,
}

/// A single field update.
#[derive(Debug, Clone, PartialEq)]
pub enum BannerField {
    FestivalName(String),
    Offers(String),
    AccentColor(String),
    ShopName(String),
    Logo(Option<String>),
    Address(String),
    Email(String),
    Website(String),
    MobileNumber(String),
    AltMobileNumber(String),
    InstagramHandle(String),
    FacebookHandle(String),
}

/// Errors raised while editing banner fields.
#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    #[error("Invalid accent color '{0}': expected #rgb or #rrggbb")]
    InvalidAccentColor(String),

    #[error("Failed to read logo '{path}': {source}")]
    LogoRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            festival_name: DEFAULT_FESTIVAL.to_string(),
            offers: DEFAULT_OFFERS.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            logo: None,
            address: DEFAULT_ADDRESS.to_string(),
            email: String::new(),
            website: String::new(),
            mobile_number: DEFAULT_MOBILE.to_string(),
            alt_mobile_number: String::new(),
            instagram_handle: String::new(),
            facebook_handle: String::new(),
        }
    }
}

impl BannerConfig {
    /// Apply one field update.
    ///
    /// Accent colours are validated; an invalid colour leaves the current
    /// value in place and returns an error.
    pub fn apply(&mut self, field: BannerField) -> Result<(), BannerError> {
        match field {
            BannerField::FestivalName(v) => self.festival_name = v,
            BannerField::Offers(v) => self.offers = v,
            BannerField::AccentColor(v) => {
                if !is_hex_color(&v) {
                    return Err(BannerError::InvalidAccentColor(v));
                }
                self.accent_color = v;
            }
            BannerField::ShopName(v) => self.shop_name = v,
            BannerField::Logo(v) => self.logo = v,
            BannerField::Address(v) => self.address = v,
            BannerField::Email(v) => self.email = v,
            BannerField::Website(v) => self.website = v,
            BannerField::MobileNumber(v) => self.mobile_number = v,
            BannerField::AltMobileNumber(v) => self.alt_mobile_number = v,
            BannerField::InstagramHandle(v) => self.instagram_handle = v,
            BannerField::FacebookHandle(v) => self.facebook_handle = v,
        }
        Ok(())
    }

    pub fn with_festival_name(mut self, name: impl Into<String>) -> Self {
        self.festival_name = name.into();
        self
    }

    pub fn with_offers(mut self, offers: impl Into<String>) -> Self {
        self.offers = offers.into();
        self
    }

    pub fn with_shop_name(mut self, name: impl Into<String>) -> Self {
        self.shop_name = name.into();
        self
    }

    pub fn with_logo(mut self, logo: Option<String>) -> Self {
        self.logo = logo;
        self
    }

    /// Offer lines in display order. Blank lines are kept.
    pub fn offer_lines(&self) -> Vec<&str> {
        self.offers.split('\n').collect()
    }

    /// Both phone numbers joined as the footer shows them.
    pub fn phone_line(&self) -> Option<String> {
        if self.mobile_number.is_empty() {
            return None;
        }
        if self.alt_mobile_number.is_empty() {
            Some(self.mobile_number.clone())
        } else {
            Some(format!("{}, {}", self.mobile_number, self.alt_mobile_number))
        }
    }
}

/// Check for `#rgb` or `#rrggbb`.
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_storefront() {
        let config = BannerConfig::default();
        assert_eq!(config.festival_name, "Chhath Puja");
        assert_eq!(config.accent_color, "#fbbf24");
        assert_eq!(config.shop_name, "Raj Nandani Jewellers");
        assert_eq!(config.mobile_number, "+91 82107 75023");
        assert!(config.logo.is_none());
        assert!(config.email.is_empty());
        assert_eq!(config.offer_lines().len(), 4);
    }

    #[test]
    fn test_apply_updates_single_field() {
        let mut config = BannerConfig::default();
        config
            .apply(BannerField::FestivalName("Diwali".to_string()))
            .unwrap();
        assert_eq!(config.festival_name, "Diwali");
        assert_eq!(config.shop_name, "Raj Nandani Jewellers");
    }

    #[test]
    fn test_apply_rejects_bad_accent_and_keeps_old() {
        let mut config = BannerConfig::default();
        let result = config.apply(BannerField::AccentColor("amber".to_string()));
        assert!(matches!(result, Err(BannerError::InvalidAccentColor(_))));
        assert_eq!(config.accent_color, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_apply_accepts_short_and_long_hex() {
        let mut config = BannerConfig::default();
        config.apply(BannerField::AccentColor("#fff".to_string())).unwrap();
        assert_eq!(config.accent_color, "#fff");
        config
            .apply(BannerField::AccentColor("#A1B2C3".to_string()))
            .unwrap();
        assert_eq!(config.accent_color, "#A1B2C3");
    }

    #[test]
    fn test_offer_lines_keeps_blank_lines() {
        let config = BannerConfig::default().with_offers("a\n\nb");
        assert_eq!(config.offer_lines(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_phone_line() {
        let mut config = BannerConfig::default();
        assert_eq!(config.phone_line().as_deref(), Some("+91 82107 75023"));

        config.alt_mobile_number = "+91 90000 00000".to_string();
        assert_eq!(
            config.phone_line().as_deref(),
            Some("+91 82107 75023, +91 90000 00000")
        );

        config.mobile_number.clear();
        assert_eq!(config.phone_line(), None);
    }
}
