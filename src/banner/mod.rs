//! Banner form state.
//!
//! Holds every user-editable field of a festival banner: the promotion text,
//! the accent colour, shop branding and contact details, plus the free-form
//! custom text annotations placed on top of the artwork.

mod config;
mod custom_text;
mod festival;
mod logo;

pub use config::{BannerConfig, BannerError, BannerField, DEFAULT_ACCENT_COLOR};
pub use custom_text::{CustomTextItem, CustomTextList};
pub use festival::festival_display_name;
pub use logo::{load_logo, mime_type_for_path};
