use crate::params::SessionParameters;
use dataset::WaterAbsorption;
use std::collections::VecDeque;
use tissue::{wavelength_grid, TissueError, TissueProfile};

pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Bit-exact identity of the parameters a profile depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey([u64; 10]);

impl CacheKey {
    fn of(parameters: &SessionParameters) -> Self {
        let (lambda_a, lambda_b) = parameters.two_photon_pair().unwrap_or((f64::NAN, f64::NAN));
        Self([
            parameters.wavelength_range.0.to_bits(),
            parameters.wavelength_range.1.to_bits(),
            parameters.normalization_wavelength.to_bits(),
            parameters.depth.to_bits(),
            parameters.water_content.to_bits(),
            parameters.anisotropy.to_bits(),
            parameters.scattering_scale.to_bits(),
            parameters.scattering_power.to_bits(),
            lambda_a.to_bits(),
            lambda_b.to_bits(),
        ])
    }
}

/// Most-recently-used tissue profiles, keyed by parameter set.
pub struct TissueCache {
    capacity: usize,
    entries: VecDeque<(CacheKey, TissueProfile)>,
    hits: u64,
    misses: u64,
}

impl Default for TissueCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl TissueCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the profile for `parameters`, computing it on a miss. The
    /// least recently used entry is evicted once the cache is full.
    pub fn profile(
        &mut self,
        parameters: &SessionParameters,
        water: &WaterAbsorption,
    ) -> Result<&TissueProfile, TissueError> {
        let key = CacheKey::of(parameters);
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.hits += 1;
            if let Some(entry) = self.entries.remove(pos) {
                self.entries.push_back(entry);
            }
        } else {
            self.misses += 1;
            let (lo, hi) = parameters.wavelength_range;
            let profile = TissueProfile::compute(
                &wavelength_grid(lo, hi),
                &parameters.tissue_params(),
                water,
                parameters.two_photon_pair(),
            )?;
            if self.entries.len() >= self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back((key, profile));
        }
        self.entries
            .back()
            .map(|(_, profile)| profile)
            .ok_or(TissueError::EmptyGrid)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_parameters_hit_the_cache() {
        let mut cache = TissueCache::new(2);
        let water = WaterAbsorption::fallback();
        let parameters = SessionParameters::default();
        cache.profile(&parameters, &water).unwrap();
        cache.profile(&parameters, &water).unwrap();
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let mut cache = TissueCache::new(2);
        let water = WaterAbsorption::fallback();
        let mut parameters = SessionParameters::default();
        for depth in [1.0, 2.0, 3.0] {
            parameters.depth = depth;
            cache.profile(&parameters, &water).unwrap();
        }
        assert_eq!(cache.len(), 2);
        parameters.depth = 1.0;
        cache.profile(&parameters, &water).unwrap();
        assert_eq!(cache.stats(), (0, 4));
    }

    #[test]
    fn disabled_two_photon_ignores_pair() {
        let mut cache = TissueCache::new(4);
        let water = WaterAbsorption::fallback();
        let mut parameters = SessionParameters::default();
        cache.profile(&parameters, &water).unwrap();
        parameters.lambda_a = 900.0;
        cache.profile(&parameters, &water).unwrap();
        assert_eq!(cache.stats(), (1, 1));
    }
}
