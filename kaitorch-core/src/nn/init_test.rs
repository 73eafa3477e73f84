use super::*;
use crate::registry::Registry;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn draw(initializer: Initializer, nin: usize, nout: usize, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| initializer.sample(nin, nout, &mut rng).unwrap())
        .collect()
}

fn mean_and_std(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[test]
fn test_uniform_initializers_respect_bounds() {
    let cases = [
        (Initializer::GlorotUniform, (6.0_f64 / 12.0).sqrt()),
        (Initializer::HeUniform, (6.0_f64 / 4.0).sqrt()),
        (Initializer::LecunUniform, (3.0_f64 / 4.0).sqrt()),
        (Initializer::RandomUniform, 0.05),
    ];
    for (initializer, limit) in cases {
        let samples = draw(initializer, 4, 8, 2000);
        assert!(
            samples.iter().all(|s| s.abs() <= limit),
            "{} exceeded ±{}",
            initializer,
            limit
        );
        // spread should reach most of the interval
        let max = samples.iter().cloned().fold(f64::MIN, f64::max);
        assert!(max > 0.8 * limit, "{} max {} too small", initializer, max);
    }
}

#[test]
fn test_normal_initializers_have_expected_spread() {
    let cases = [
        (Initializer::GlorotNormal, (2.0_f64 / 12.0).sqrt()),
        (Initializer::HeNormal, (2.0_f64 / 4.0).sqrt()),
        (Initializer::LecunNormal, (1.0_f64 / 4.0).sqrt()),
        (Initializer::RandomNormal, 0.05),
    ];
    for (initializer, expected_std) in cases {
        let (mean, std) = mean_and_std(&draw(initializer, 4, 8, 20_000));
        assert!(mean.abs() < 0.05 * expected_std.max(0.1), "{} mean {}", initializer, mean);
        assert!(
            (std - expected_std).abs() < 0.05 * expected_std,
            "{} std {} vs {}",
            initializer,
            std,
            expected_std
        );
    }
}

#[test]
fn test_same_seed_same_weights() {
    assert_eq!(
        draw(Initializer::HeNormal, 3, 2, 10),
        draw(Initializer::HeNormal, 3, 2, 10)
    );
}

#[test]
fn test_zero_fan_in_is_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    for initializer in [Initializer::HeUniform, Initializer::HeNormal, Initializer::LecunNormal] {
        assert!(matches!(
            initializer.sample(0, 3, &mut rng),
            Err(KaiTorchError::InvalidArgument(_))
        ));
    }
    // Glorot only needs nin + nout > 0, the random kinds ignore fans
    assert!(Initializer::GlorotUniform.sample(0, 3, &mut rng).is_ok());
    assert!(Initializer::RandomNormal.sample(0, 0, &mut rng).is_ok());
}

#[test]
fn test_registry_names() {
    let registry: Registry<Initializer> = Registry::with_defaults();
    assert_eq!(registry.names().len(), 8);
    for name in registry.names() {
        assert_eq!(registry.resolve(&name).unwrap().name(), name);
    }
    assert!(matches!(
        registry.resolve("orthogonal"),
        Err(KaiTorchError::UnknownInitializer { .. })
    ));
}
