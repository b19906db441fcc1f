//! Named color schemes assigned cyclically to series entries.

pub const DEFAULT_SCHEME: &str = "Modern Blue";

static PALETTES: &[(&str, &[&str])] = &[
    ("Modern Blue", &["#0066FF", "#00B4D8", "#90E0EF", "#CAF0F8", "#ADE8F4"]),
    ("Sunset", &["#FF6B35", "#F7931E", "#FDC830", "#F37335", "#C44536"]),
    ("Forest", &["#2D6A4F", "#40916C", "#52B788", "#74C69D", "#95D5B2"]),
    ("Purple Haze", &["#7209B7", "#9D4EDD", "#C77DFF", "#E0AAFF", "#F0D9FF"]),
    ("Ocean", &["#03045E", "#023E8A", "#0077B6", "#0096C7", "#00B4D8"]),
    ("Neon", &["#FF006E", "#FB5607", "#FFBE0B", "#3A86FF", "#8338EC"]),
    ("Pastel", &["#FFADAD", "#FFD6A5", "#FDFFB6", "#CAFFBF", "#9BF6FF"]),
    ("Earth", &["#D4A373", "#BC6C25", "#606C38", "#283618", "#FEFAE0"]),
    ("Ruby", &["#590D22", "#800F2F", "#A4133C", "#C9184A", "#FF4D6D"]),
    ("Ice", &["#012A4A", "#013A63", "#01497C", "#014F86", "#2A6F97"]),
];

/// Colors of the named scheme. Unknown names fall back to the default scheme.
#[must_use]
pub fn palette(name: &str) -> &'static [&'static str] {
    PALETTES
        .iter()
        .find(|(n, _)| *n == name)
        .or_else(|| PALETTES.iter().find(|(n, _)| *n == DEFAULT_SCHEME))
        .map_or(&[], |(_, colors)| *colors)
}

#[must_use]
pub fn is_known(name: &str) -> bool {
    PALETTES.iter().any(|(n, _)| *n == name)
}

/// Scheme names in display order.
pub fn palette_names() -> impl Iterator<Item = &'static str> {
    PALETTES.iter().map(|(n, _)| *n)
}

/// Color for the `index`-th series entry, cycling through the scheme.
#[must_use]
pub fn color_at(name: &str, index: usize) -> &'static str {
    let colors = palette(name);
    colors[index % colors.len()]
}
