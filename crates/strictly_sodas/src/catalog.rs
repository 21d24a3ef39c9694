//! The fixed catalog of soda brands.
//!
//! The catalog order matters: a game of difficulty `n` always plays with the
//! first `n` brands, so adding a brand at the front would silently change
//! every level.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Initial difficulty and the lowest level a player may select.
pub const DEFAULT_GAME_SIZE: usize = 5;

/// A soda brand - the playable item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Brand {
    /// Classic cola.
    Cola,
    /// Lemon-lime.
    Lime,
    /// Grape soda.
    Grape,
    /// Sparkling water.
    Water,
    /// Energy drink.
    Energy,
    /// Orange soda.
    Orange,
    /// Cherry cola.
    Cherry,
    /// Root beer.
    RootBeer,
    /// Ginger ale.
    Ginger,
    /// Cream soda.
    Cream,
}

impl Brand {
    /// Every brand, in catalog order.
    pub const ALL: [Brand; 10] = [
        Brand::Cola,
        Brand::Lime,
        Brand::Grape,
        Brand::Water,
        Brand::Energy,
        Brand::Orange,
        Brand::Cherry,
        Brand::RootBeer,
        Brand::Ginger,
        Brand::Cream,
    ];

    /// Display name shown on the can.
    pub fn name(self) -> &'static str {
        match self {
            Brand::Cola => "Cola",
            Brand::Lime => "Lemon Lime",
            Brand::Grape => "Grape",
            Brand::Water => "Sparkling Water",
            Brand::Energy => "Energy",
            Brand::Orange => "Orange",
            Brand::Cherry => "Cherry",
            Brand::RootBeer => "Root Beer",
            Brand::Ginger => "Ginger Ale",
            Brand::Cream => "Cream Soda",
        }
    }

    /// Can colors as `(body, label)` hex strings. Display only.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Brand::Cola => ("#b91c1c", "#ffffff"),
            Brand::Lime => ("#65a30d", "#fef08a"),
            Brand::Grape => ("#7e22ce", "#e9d5ff"),
            Brand::Water => ("#38bdf8", "#f0f9ff"),
            Brand::Energy => ("#171717", "#a3e635"),
            Brand::Orange => ("#f97316", "#fff7ed"),
            Brand::Cherry => ("#9f1239", "#fda4af"),
            Brand::RootBeer => ("#78350f", "#fde68a"),
            Brand::Ginger => ("#ca8a04", "#ecfccb"),
            Brand::Cream => ("#fde68a", "#92400e"),
        }
    }

    /// Single-character tag used where there is no room for the name.
    pub fn glyph(self) -> char {
        match self {
            Brand::Cola => 'C',
            Brand::Lime => 'L',
            Brand::Grape => 'G',
            Brand::Water => 'W',
            Brand::Energy => 'E',
            Brand::Orange => 'O',
            Brand::Cherry => 'H',
            Brand::RootBeer => 'R',
            Brand::Ginger => 'A',
            Brand::Cream => 'M',
        }
    }
}

/// Ordered, read-only list of the brands available to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    brands: &'static [Brand],
}

impl Catalog {
    /// The full ten-brand catalog.
    pub const STANDARD: Catalog = Catalog { brands: &Brand::ALL };

    /// Creates a catalog from a fixed brand list.
    ///
    /// Returns `None` if the list is empty or names a brand twice.
    #[instrument]
    pub fn new(brands: &'static [Brand]) -> Option<Self> {
        if brands.is_empty() {
            return None;
        }
        let distinct = brands
            .iter()
            .enumerate()
            .all(|(i, brand)| !brands[..i].contains(brand));
        distinct.then_some(Self { brands })
    }

    /// Returns the standard catalog.
    pub fn standard() -> Self {
        Self::STANDARD
    }

    /// Number of brands in the catalog.
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    /// A catalog is never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// All brands in catalog order.
    pub fn brands(&self) -> &'static [Brand] {
        self.brands
    }

    /// Clamps a requested difficulty into `1..=len`.
    pub fn clamp_size(&self, size: usize) -> usize {
        size.clamp(1, self.len())
    }

    /// The active subset for a difficulty: the first `size` brands.
    pub fn active(&self, size: usize) -> &'static [Brand] {
        &self.brands[..self.clamp_size(size)]
    }

    /// Lowest selectable level for this catalog.
    pub fn min_level(&self) -> usize {
        DEFAULT_GAME_SIZE.min(self.len())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_matches_enum_order() {
        let iterated: Vec<Brand> = Brand::iter().collect();
        assert_eq!(iterated, Brand::ALL.to_vec());
    }

    #[test]
    fn test_active_subset_is_prefix() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.active(5),
            &[Brand::Cola, Brand::Lime, Brand::Grape, Brand::Water, Brand::Energy]
        );
    }

    #[test]
    fn test_active_clamps_size() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.active(0).len(), 1);
        assert_eq!(catalog.active(99).len(), 10);
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(Catalog::new(&[]).is_none());
        assert!(Catalog::new(&[Brand::Cola, Brand::Cola]).is_none());
        assert!(Catalog::new(&[Brand::Cola, Brand::Lime]).is_some());
    }

    #[test]
    fn test_min_level_for_small_catalog() {
        let catalog = Catalog::new(&[Brand::Cola, Brand::Lime, Brand::Grape]).unwrap();
        assert_eq!(catalog.min_level(), 3);
        assert_eq!(Catalog::standard().min_level(), DEFAULT_GAME_SIZE);
    }

    #[test]
    fn test_ids_round_trip_through_strings() {
        assert_eq!(Brand::RootBeer.to_string(), "rootbeer");
        assert_eq!(Brand::from_str("rootbeer").unwrap(), Brand::RootBeer);
        let json = serde_json::to_string(&Brand::Cola).unwrap();
        assert_eq!(json, "\"cola\"");
    }
}
