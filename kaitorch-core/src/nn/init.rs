//! Weight initializers.
//!
//! Every [`Initializer`] draws one number per call from a distribution scaled
//! by the layer's fan-in (`nin`) and, for the Glorot family, fan-out (`nout`).
//! Randomness always comes from a caller-supplied RNG, so seeding it makes
//! model construction reproducible.

use crate::error::KaiTorchError;
use crate::registry::Registered;
use rand::RngCore;
use rand_distr::{Distribution, Normal, Uniform};
use std::fmt;

/// Bound of `RandomUniform` and standard deviation of `RandomNormal`.
const RANDOM_SCALE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Initializer {
    /// U(±√(6 / (nin + nout)))
    GlorotUniform,
    /// N(0, √(2 / (nin + nout)))
    GlorotNormal,
    /// U(±√(6 / nin))
    HeUniform,
    /// N(0, √(2 / nin))
    HeNormal,
    /// U(±√(3 / nin))
    LecunUniform,
    /// N(0, √(1 / nin))
    LecunNormal,
    /// U(±0.05)
    RandomUniform,
    /// N(0, 0.05)
    RandomNormal,
}

impl Default for Initializer {
    fn default() -> Self {
        Initializer::GlorotUniform
    }
}

enum Sampler {
    Uniform(f64),
    Normal(f64),
}

impl Initializer {
    pub fn name(&self) -> &'static str {
        match self {
            Initializer::GlorotUniform => "glorot_uniform",
            Initializer::GlorotNormal => "glorot_normal",
            Initializer::HeUniform => "he_uniform",
            Initializer::HeNormal => "he_normal",
            Initializer::LecunUniform => "lecun_uniform",
            Initializer::LecunNormal => "lecun_normal",
            Initializer::RandomUniform => "random_uniform",
            Initializer::RandomNormal => "random_normal",
        }
    }

    /// Draws one weight for a unit with `nin` inputs in a layer of `nout` units.
    ///
    /// # Errors
    /// [`KaiTorchError::InvalidArgument`] when the scale depends on a fan that
    /// is zero.
    pub fn sample(&self, nin: usize, nout: usize, rng: &mut dyn RngCore) -> Result<f64, KaiTorchError> {
        match self.sampler(nin, nout)? {
            Sampler::Uniform(limit) if limit == 0.0 => Ok(0.0),
            Sampler::Uniform(limit) => Ok(Uniform::new_inclusive(-limit, limit).sample(rng)),
            Sampler::Normal(std_dev) => {
                let normal = Normal::new(0.0, std_dev)
                    .map_err(|e| KaiTorchError::InvalidArgument(format!("{}: {}", self, e)))?;
                Ok(normal.sample(rng))
            }
        }
    }

    fn sampler(&self, nin: usize, nout: usize) -> Result<Sampler, KaiTorchError> {
        let fan_in = || {
            if nin == 0 {
                Err(KaiTorchError::InvalidArgument(format!(
                    "{} needs at least one input, got nin = 0",
                    self
                )))
            } else {
                Ok(nin as f64)
            }
        };
        let fan_sum = || {
            if nin + nout == 0 {
                Err(KaiTorchError::InvalidArgument(format!(
                    "{} needs nin + nout > 0",
                    self
                )))
            } else {
                Ok((nin + nout) as f64)
            }
        };

        Ok(match self {
            Initializer::GlorotUniform => Sampler::Uniform((6.0 / fan_sum()?).sqrt()),
            Initializer::GlorotNormal => Sampler::Normal((2.0 / fan_sum()?).sqrt()),
            Initializer::HeUniform => Sampler::Uniform((6.0 / fan_in()?).sqrt()),
            Initializer::HeNormal => Sampler::Normal((2.0 / fan_in()?).sqrt()),
            Initializer::LecunUniform => Sampler::Uniform((3.0 / fan_in()?).sqrt()),
            Initializer::LecunNormal => Sampler::Normal((1.0 / fan_in()?).sqrt()),
            Initializer::RandomUniform => Sampler::Uniform(RANDOM_SCALE),
            Initializer::RandomNormal => Sampler::Normal(RANDOM_SCALE),
        })
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Registered for Initializer {
    fn defaults() -> Vec<(&'static str, fn() -> Self)> {
        vec![
            ("glorot_uniform", || Initializer::GlorotUniform),
            ("glorot_normal", || Initializer::GlorotNormal),
            ("he_uniform", || Initializer::HeUniform),
            ("he_normal", || Initializer::HeNormal),
            ("lecun_uniform", || Initializer::LecunUniform),
            ("lecun_normal", || Initializer::LecunNormal),
            ("random_uniform", || Initializer::RandomUniform),
            ("random_normal", || Initializer::RandomNormal),
        ]
    }

    fn unknown(name: &str, available: Vec<String>) -> KaiTorchError {
        KaiTorchError::UnknownInitializer {
            name: name.to_string(),
            available,
        }
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
