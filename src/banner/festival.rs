//! Hindi display names for well-known festivals.

const FESTIVAL_TRANSLATIONS: &[(&str, &str)] = &[
    ("Chhath Puja", "छठ पूजा"),
    ("Diwali", "दिवाली"),
    ("Holi", "होली"),
    ("Akshaya Tritiya", "अक्षय तृतीया"),
];

/// Name shown in the banner title. Unknown festivals are shown as typed.
pub fn festival_display_name(name: &str) -> &str {
    FESTIVAL_TRANSLATIONS
        .iter()
        .find(|(english, _)| *english == name)
        .map(|(_, hindi)| *hindi)
        .unwrap_or(name)
}
