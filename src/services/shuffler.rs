// src/services/shuffler.rs

use rand::{Rng, seq::SliceRandom};

/// Returns a uniform random permutation of `items`.
///
/// Only presentation order changes; answers are matched by question text,
/// never by position. The random source is supplied by the caller so each
/// request gets an independent order and tests can seed it.
pub fn shuffle<T, R>(mut items: Vec<T>, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
    items
}
