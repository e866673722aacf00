//! Bounded random sampling without replacement.

use alloc::vec::Vec;

use rand::Rng;

/// Returns a uniform random integer in `min..=max`.
///
/// `min` is returned when the range is empty or a single point.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Draws up to `k` distinct elements from `collection` in random order.
///
/// Every draw picks a uniform index among the elements not yet taken, so
/// the result holds `min(k, collection.len())` elements taken from distinct
/// positions. The source slice is left untouched.
///
/// ```
/// use pairs::select::sample;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let picked = sample(&[1, 2, 3, 4, 5], 3, &mut rng);
/// assert_eq!(picked.len(), 3);
/// ```
pub fn sample<T: Clone, R: Rng + ?Sized>(collection: &[T], k: usize, rng: &mut R) -> Vec<T> {
    let take = k.min(collection.len());
    let mut pool: Vec<T> = collection.to_vec();
    let mut picked = Vec::with_capacity(take);

    while picked.len() < take {
        let index = rng.random_range(0..pool.len());
        picked.push(pool.swap_remove(index));
    }

    picked
}

/// Returns a random permutation of `collection`.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(collection: &[T], rng: &mut R) -> Vec<T> {
    sample(collection, collection.len(), rng)
}
