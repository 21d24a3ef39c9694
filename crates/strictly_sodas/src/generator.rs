//! Hidden target sequence generation.

use crate::catalog::{Brand, Catalog};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The hidden permutation the player is trying to reconstruct.
///
/// Always a permutation of the active brands: same length, no repeats,
/// nothing missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetSequence(Vec<Brand>);

impl TargetSequence {
    /// Brands in target order.
    pub fn brands(&self) -> &[Brand] {
        &self.0
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the sequence has no positions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Brand expected at `index`.
    pub fn get(&self, index: usize) -> Option<Brand> {
        self.0.get(index).copied()
    }

    /// Builds a target from an explicit order.
    ///
    /// Returns `None` unless `brands` is a permutation of `catalog.active(brands.len())`.
    #[instrument(skip(catalog))]
    pub fn from_order(catalog: &Catalog, brands: Vec<Brand>) -> Option<Self> {
        if brands.is_empty() || brands.len() > catalog.len() {
            return None;
        }
        let mut sorted = brands.clone();
        sorted.sort();
        let mut active = catalog.active(brands.len()).to_vec();
        active.sort();
        (sorted == active).then_some(Self(brands))
    }
}

/// Shuffles the first `size` catalog brands into a fresh target.
///
/// `size` is clamped to the catalog. The subset is fixed; only the order is
/// random.
#[instrument(skip(catalog, rng))]
pub fn generate_sequence<R>(catalog: &Catalog, size: usize, rng: &mut R) -> TargetSequence
where
    R: Rng + ?Sized,
{
    let mut brands = catalog.active(size).to_vec();
    brands.shuffle(rng);
    debug!(size = brands.len(), "Generated target sequence");
    TargetSequence(brands)
}
