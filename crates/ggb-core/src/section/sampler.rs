// crates/ggb-core/src/section/sampler.rs

use std::collections::BTreeSet;

use rand::Rng;

use crate::error::{GgError, Result};

/// Pick `count` distinct section indices from `[0, max_index]`, uniformly
/// without replacement.
pub fn sample_sections<R>(rng: &mut R, count: usize, max_index: usize) -> Result<BTreeSet<usize>>
where
    R: Rng + ?Sized,
{
    let population = max_index.saturating_add(1);
    if count > population {
        return Err(GgError::Oversample {
            requested: count,
            available: population,
        });
    }
    let picked = rand::seq::index::sample(rng, population, count);
    Ok(picked.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draws_are_unique_and_in_range() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..1000 {
            let s = sample_sections(&mut rng, 8, 50).unwrap();
            assert_eq!(s.len(), 8);
            assert!(s.iter().all(|&i| i <= 50));
        }
    }

    #[test]
    fn oversample_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_sections(&mut rng, 60, 50).unwrap_err();
        assert!(matches!(
            err,
            GgError::Oversample {
                requested: 60,
                available: 51
            }
        ));
    }

    #[test]
    fn full_population_and_empty_draw() {
        let mut rng = StdRng::seed_from_u64(2);
        let all = sample_sections(&mut rng, 51, 50).unwrap();
        assert_eq!(all, (0..=50).collect());
        assert!(sample_sections(&mut rng, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn same_seed_same_set() {
        let a = sample_sections(&mut StdRng::seed_from_u64(9), 5, 40).unwrap();
        let b = sample_sections(&mut StdRng::seed_from_u64(9), 5, 40).unwrap();
        assert_eq!(a, b);
    }
}
