use rand::rngs::StdRng;
use rand::SeedableRng;

/// Pick `min(n, len)` distinct indices out of `0..len`, returned in ascending order.
///
/// With a seed the selection is reproducible; without one it draws from OS entropy.
/// Only the display layer uses this, so the selection never feeds back into statistics.
pub fn sample_indices(len: usize, n: usize, seed: Option<u64>) -> Vec<usize> {
    if n >= len {
        return (0..len).collect();
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut picked = rand::seq::index::sample(&mut rng, len, n).into_vec();
    picked.sort_unstable();
    picked
}
