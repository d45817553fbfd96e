use crate::core::StatKey;
use crate::render::Color;

/// Fallback for categories outside the table.
pub const UNKNOWN_CATEGORY_COLOR: Color = Color::from_rgb_u32(0x68A090);

const CATEGORY_COLORS: [(&str, u32); 18] = [
    ("Normal", 0xA8A77A),
    ("Fire", 0xEE8130),
    ("Water", 0x6390F0),
    ("Electric", 0xF7D02C),
    ("Grass", 0x7AC74C),
    ("Ice", 0x96D9D6),
    ("Fighting", 0xC22E28),
    ("Poison", 0xA33EA1),
    ("Ground", 0xE2BF65),
    ("Flying", 0xA98FF3),
    ("Psychic", 0xF95587),
    ("Bug", 0xA6B91A),
    ("Rock", 0xB6A136),
    ("Ghost", 0x735797),
    ("Dragon", 0x6F35FC),
    ("Dark", 0x705746),
    ("Steel", 0xB7B7CE),
    ("Fairy", 0xD685AD),
];

const TABLEAU10: [u32; 10] = [
    0x4E79A7, 0xF28E2C, 0xE15759, 0x76B7B2, 0x59A14F, 0xEDC949, 0xAF7AA1, 0xFF9DA7, 0x9C755F,
    0xBAB0AB,
];

#[must_use]
pub fn category_color(category: &str) -> Color {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(UNKNOWN_CATEGORY_COLOR, |(_, packed)| {
            Color::from_rgb_u32(*packed)
        })
}

/// Color for the `position`-th generation in ascending order, cycling.
#[must_use]
pub fn generation_color(position: usize) -> Color {
    Color::from_rgb_u32(TABLEAU10[position % TABLEAU10.len()])
}

#[must_use]
pub fn stat_color(key: StatKey) -> Color {
    let packed = match key {
        StatKey::Hp => 0x77DD77,
        StatKey::Attack => 0xFF6961,
        StatKey::Defense => 0x77B5FE,
        StatKey::SpAtk => 0xC377E0,
        StatKey::SpDef => 0xA7D7A7,
        StatKey::Speed => 0xFDFD96,
        StatKey::Total => 0xB0B0B0,
    };
    Color::from_rgb_u32(packed)
}

pub(crate) const INK: Color = Color::rgb(0.0, 0.0, 0.0);
pub(crate) const TEXT: Color = Color::from_rgb_u32(0x333333);
pub(crate) const GRID: Color = Color::from_rgb_u32(0x808080);
pub(crate) const BUTTON_FILL: Color = Color::from_rgb_u32(0xF0F0F0);
pub(crate) const BUTTON_BORDER: Color = Color::from_rgb_u32(0xADADAD);
pub(crate) const BRUSH_FILL: Color = Color::rgba(0.47, 0.47, 0.47, 0.3);
