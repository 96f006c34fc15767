use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Numerical cut-offs below which geometry is treated as degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Tolerances {
    /// Cells whose normal length falls below this are skipped.
    pub degenerate_normal: f64,
    /// Triangles whose squared normal length falls below this get the neutral weight.
    pub degenerate_triangle: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            degenerate_normal: 1e-10,
            degenerate_triangle: 1e-6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Units {
    /// Divisor turning input lengths (Angstrom) into reported lengths (nm).
    pub length_scale: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self { length_scale: 10.0 }
    }
}

/// Layout of the probability-density histogram built by the statistics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HistogramConfig {
    pub bins: usize,
    /// Empty bins kept on each side of the data range.
    pub offset: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bins: 1000,
            offset: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct OrderConfig {
    pub cartesian_angle_bins: usize,
    pub spherical_angle_bins: usize,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            cartesian_angle_bins: 100,
            spherical_angle_bins: 1000,
        }
    }
}

/// Layout of the radial density histogram.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DensityConfig {
    pub slots: usize,
    /// Slot that holds bin zero.
    pub center: usize,
    /// Numerator of each contribution, `scale / shell_volume`.
    pub scale: f64,
    /// Default number of divisions of the normalised radius range `[0, 2)`.
    pub divisions: usize,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            slots: 1000,
            center: 500,
            scale: 1000.0,
            divisions: 100,
        }
    }
}

/// Every numeric convention the engines depend on, passed explicitly into each call.
///
/// The defaults reproduce the reference outputs; a TOML file only needs to list
/// the values it changes:
///
/// ```toml
/// [histogram]
/// bins = 2000
/// offset = 200
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AnalysisConfig {
    pub tolerances: Tolerances,
    pub units: Units,
    pub histogram: HistogramConfig,
    pub order: OrderConfig,
    pub density: DensityConfig,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("tolerances.degenerate-normal", self.tolerances.degenerate_normal)?;
        ensure_positive(
            "tolerances.degenerate-triangle",
            self.tolerances.degenerate_triangle,
        )?;
        ensure_positive("units.length-scale", self.units.length_scale)?;

        if self.histogram.bins <= 2 * self.histogram.offset {
            return Err(ConfigError::Invalid {
                field: "histogram.bins",
                reason: format!(
                    "{} bins leave no room for the data range with an offset of {}",
                    self.histogram.bins, self.histogram.offset
                ),
            });
        }

        ensure_nonzero("order.cartesian-angle-bins", self.order.cartesian_angle_bins)?;
        ensure_nonzero("order.spherical-angle-bins", self.order.spherical_angle_bins)?;

        ensure_nonzero("density.slots", self.density.slots)?;
        ensure_nonzero("density.divisions", self.density.divisions)?;
        ensure_positive("density.scale", self.density.scale)?;
        if self.density.center >= self.density.slots {
            return Err(ConfigError::Invalid {
                field: "density.center",
                reason: format!(
                    "center slot {} lies outside {} slots",
                    self.density.center, self.density.slots
                ),
            });
        }
        Ok(())
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        });
    }
    Ok(())
}

fn ensure_nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    degenerate_normal: Option<f64>,
    degenerate_triangle: Option<f64>,
    length_scale: Option<f64>,
    histogram_bins: Option<usize>,
    histogram_offset: Option<usize>,
    cartesian_angle_bins: Option<usize>,
    spherical_angle_bins: Option<usize>,
    density_slots: Option<usize>,
    density_center: Option<usize>,
    density_scale: Option<f64>,
    density_divisions: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn degenerate_normal(mut self, tolerance: f64) -> Self {
        self.degenerate_normal = Some(tolerance);
        self
    }
    pub fn degenerate_triangle(mut self, tolerance: f64) -> Self {
        self.degenerate_triangle = Some(tolerance);
        self
    }
    pub fn length_scale(mut self, scale: f64) -> Self {
        self.length_scale = Some(scale);
        self
    }
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }
    pub fn histogram_offset(mut self, offset: usize) -> Self {
        self.histogram_offset = Some(offset);
        self
    }
    pub fn cartesian_angle_bins(mut self, bins: usize) -> Self {
        self.cartesian_angle_bins = Some(bins);
        self
    }
    pub fn spherical_angle_bins(mut self, bins: usize) -> Self {
        self.spherical_angle_bins = Some(bins);
        self
    }
    pub fn density_slots(mut self, slots: usize) -> Self {
        self.density_slots = Some(slots);
        self
    }
    pub fn density_center(mut self, center: usize) -> Self {
        self.density_center = Some(center);
        self
    }
    pub fn density_scale(mut self, scale: f64) -> Self {
        self.density_scale = Some(scale);
        self
    }
    pub fn density_divisions(mut self, divisions: usize) -> Self {
        self.density_divisions = Some(divisions);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            tolerances: Tolerances {
                degenerate_normal: self
                    .degenerate_normal
                    .unwrap_or(defaults.tolerances.degenerate_normal),
                degenerate_triangle: self
                    .degenerate_triangle
                    .unwrap_or(defaults.tolerances.degenerate_triangle),
            },
            units: Units {
                length_scale: self.length_scale.unwrap_or(defaults.units.length_scale),
            },
            histogram: HistogramConfig {
                bins: self.histogram_bins.unwrap_or(defaults.histogram.bins),
                offset: self.histogram_offset.unwrap_or(defaults.histogram.offset),
            },
            order: OrderConfig {
                cartesian_angle_bins: self
                    .cartesian_angle_bins
                    .unwrap_or(defaults.order.cartesian_angle_bins),
                spherical_angle_bins: self
                    .spherical_angle_bins
                    .unwrap_or(defaults.order.spherical_angle_bins),
            },
            density: DensityConfig {
                slots: self.density_slots.unwrap_or(defaults.density.slots),
                center: self.density_center.unwrap_or(defaults.density.center),
                scale: self.density_scale.unwrap_or(defaults.density.scale),
                divisions: self.density_divisions.unwrap_or(defaults.density.divisions),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_config_uses_reference_conventions() {
        let config = AnalysisConfig::default();
        assert_eq!(config.tolerances.degenerate_normal, 1e-10);
        assert_eq!(config.tolerances.degenerate_triangle, 1e-6);
        assert_eq!(config.units.length_scale, 10.0);
        assert_eq!(config.histogram.bins, 1000);
        assert_eq!(config.histogram.offset, 100);
        assert_eq!(config.order.cartesian_angle_bins, 100);
        assert_eq!(config.order.spherical_angle_bins, 1000);
        assert_eq!(config.density.slots, 1000);
        assert_eq!(config.density.center, 500);
        assert_eq!(config.density.scale, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_toml_str_overrides_only_listed_values() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [histogram]
            bins = 2000

            [units]
            length-scale = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.histogram.bins, 2000);
        assert_eq!(config.histogram.offset, 100);
        assert_eq!(config.units.length_scale, 1.0);
        assert_eq!(config.density, DensityConfig::default());
    }

    #[test]
    fn from_toml_str_of_empty_document_is_default() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn from_toml_str_rejects_unknown_fields() {
        let result = AnalysisConfig::from_toml_str("[histogram]\nbuckets = 10\n");
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn from_toml_str_rejects_offset_that_consumes_all_bins() {
        let result = AnalysisConfig::from_toml_str("[histogram]\nbins = 200\noffset = 100\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "histogram.bins",
                ..
            })
        ));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        fs::write(
            &path,
            r#"
            [tolerances]
            degenerate-normal = 1e-8

            [density]
            slots = 400
            center = 200
            "#,
        )
        .unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.tolerances.degenerate_normal, 1e-8);
        assert_eq!(config.density.slots, 400);
        assert_eq!(config.density.center, 200);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = AnalysisConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        assert!(matches!(
            AnalysisConfig::load(&path),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn builder_without_overrides_matches_default() {
        let config = AnalysisConfigBuilder::new().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn builder_applies_overrides_and_validates() {
        let config = AnalysisConfigBuilder::new()
            .histogram_bins(500)
            .histogram_offset(50)
            .density_divisions(40)
            .build()
            .unwrap();
        assert_eq!(config.histogram.bins, 500);
        assert_eq!(config.histogram.offset, 50);
        assert_eq!(config.density.divisions, 40);

        let result = AnalysisConfigBuilder::new().density_center(1000).build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "density.center",
                ..
            })
        ));

        let result = AnalysisConfigBuilder::new().length_scale(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "units.length-scale",
                ..
            })
        ));
    }
}
