use bon::Builder;

use crate::math::log_floor;

pub const DEFAULT_ACCESSION_PREFIX: &str = "GSM";
pub const DEFAULT_ACCESSION_BASE: u64 = 591265;
pub const DEFAULT_ACCESSION_STRIDE: u64 = 2;

pub const DEFAULT_FLOOR: f64 = 0.1;
pub const DEFAULT_PSEUDOCOUNT: f64 = 1.0;

/// Numbering rule used to synthesize sample identifiers from title positions
///
/// The identifier for the title at position `i` is `prefix` followed by
/// `base + i * stride`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessionScheme {
    pub prefix: String,
    pub base: u64,
    pub stride: u64,
}
impl AccessionScheme {
    pub fn new(prefix: impl Into<String>, base: u64, stride: u64) -> Self {
        Self {
            prefix: prefix.into(),
            base,
            stride,
        }
    }

    /// Identifier for the title at `position`, or `None` if the number overflows `u64`
    pub fn sample_id(&self, position: usize) -> Option<String> {
        let number = u64::try_from(position)
            .ok()?
            .checked_mul(self.stride)?
            .checked_add(self.base)?;
        Some(format!("{}{}", self.prefix, number))
    }
}
impl Default for AccessionScheme {
    fn default() -> Self {
        Self::new(
            DEFAULT_ACCESSION_PREFIX,
            DEFAULT_ACCESSION_BASE,
            DEFAULT_ACCESSION_STRIDE,
        )
    }
}

/// Transformation applied to every expression value after filtering
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransformConfig {
    /// Values are returned as parsed.
    #[default]
    Identity,
    /// `log2(max(x, floor) + pseudocount)`
    LogFloor { floor: f64, pseudocount: f64 },
}
impl TransformConfig {
    /// The log-floor transform with a floor of 0.1 and a pseudocount of 1
    pub fn log_floor() -> Self {
        Self::LogFloor {
            floor: DEFAULT_FLOOR,
            pseudocount: DEFAULT_PSEUDOCOUNT,
        }
    }

    pub fn transform(&self, x: f64) -> f64 {
        match self {
            TransformConfig::Identity => x,
            TransformConfig::LogFloor { floor, pseudocount } => {
                log_floor(x, *floor, *pseudocount)
            }
        }
    }

    pub fn transform_slice(&self, values: &mut [f64]) {
        if let TransformConfig::Identity = self {
            return;
        }
        values.iter_mut().for_each(|x| *x = self.transform(*x));
    }
}

/// Settings shared by both loading entry points
#[derive(Debug, Clone, Default, Builder)]
pub struct LoaderConfig {
    #[builder(default)]
    pub scheme: AccessionScheme,
    #[builder(default)]
    pub transform: TransformConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_scheme_sample_ids() {
        let scheme = AccessionScheme::default();
        assert_eq!(scheme.sample_id(0).as_deref(), Some("GSM591265"));
        assert_eq!(scheme.sample_id(1).as_deref(), Some("GSM591267"));
        assert_eq!(scheme.sample_id(2).as_deref(), Some("GSM591269"));
    }

    #[test]
    fn test_custom_scheme_sample_ids() {
        let scheme = AccessionScheme::new("GSM", 100, 1);
        assert_eq!(scheme.sample_id(0).as_deref(), Some("GSM100"));
        assert_eq!(scheme.sample_id(5).as_deref(), Some("GSM105"));
    }

    #[test]
    fn test_scheme_overflow() {
        let scheme = AccessionScheme::new("GSM", u64::MAX - 1, 2);
        assert_eq!(scheme.sample_id(0).as_deref(), Some("GSM18446744073709551614"));
        assert_eq!(scheme.sample_id(1), None);

        let scheme = AccessionScheme::new("GSM", 0, u64::MAX);
        assert_eq!(scheme.sample_id(1).as_deref(), Some("GSM18446744073709551615"));
        assert_eq!(scheme.sample_id(2), None);
    }

    #[test]
    fn test_transform_identity() {
        let mut values = vec![-3.0, 0.0, 7.5];
        TransformConfig::Identity.transform_slice(&mut values);
        assert_eq!(values, vec![-3.0, 0.0, 7.5]);
    }

    #[test]
    fn test_transform_log_floor() {
        let mut values = vec![-3.0, 0.0, 3.0];
        TransformConfig::log_floor().transform_slice(&mut values);
        assert_relative_eq!(values[0], 1.1_f64.log2());
        assert_relative_eq!(values[1], 1.1_f64.log2());
        assert_relative_eq!(values[2], 2.0);
    }

    #[test]
    fn test_loader_config_builder_defaults() {
        let config = LoaderConfig::builder().build();
        assert_eq!(config.scheme, AccessionScheme::default());
        assert_eq!(config.transform, TransformConfig::Identity);

        let config = LoaderConfig::builder()
            .transform(TransformConfig::log_floor())
            .scheme(AccessionScheme::new("GSM", 1, 1))
            .build();
        assert_eq!(config.transform, TransformConfig::log_floor());
        assert_eq!(config.scheme.sample_id(1).as_deref(), Some("GSM2"));
    }
}
