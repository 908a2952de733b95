use std::str::FromStr;

use thiserror::Error;

use crate::color::Color;
use crate::color::ColorRule;
use crate::quadtree::Point;

/// Hard ceiling on `max_depth`. A fully split tree of this depth would hold `4^32` leaves, the
/// adaptive split only ever builds a thin band of it around the focus.
pub const MAX_DEPTH: u32 = 32;

/// Depths above this are accepted but can allocate heavily with a large split factor.
pub const RECOMMENDED_MAX_DEPTH: u32 = 20;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max depth must not be negative, got {0}")]
    NegativeDepth(i64),

    #[error("max depth {depth} exceeds the limit of {max}")]
    DepthTooLarge { depth: i64, max: u32 },

    #[error("size must be positive, got {0}")]
    NonPositiveSize(f64),

    #[error("split factor must be positive, got {0}")]
    NonPositiveSplitFactor(f64),

    #[error("{what} must be finite")]
    NonFinite { what: &'static str },

    #[error("Unknown config key \"{0}\"")]
    UnknownKey(String),

    #[error("Expected \"{key}=<value>\"")]
    MissingValue { key: String },

    #[error("Failed to convert \"{value}\" for \"{key}\"")]
    InvalidNumber { key: String, value: String },
}

/// Checks a requested depth against `0..=MAX_DEPTH`.
pub fn check_depth(depth: i64) -> Result<u32, ConfigError> {
    if depth < 0 {
        return Err(ConfigError::NegativeDepth(depth));
    }

    match u32::try_from(depth) {
        Ok(d) if d <= MAX_DEPTH => Ok(d),
        _ => Err(ConfigError::DepthTooLarge {
            depth,
            max: MAX_DEPTH,
        }),
    }
}

pub fn check_size(size: f64) -> Result<f64, ConfigError> {
    if size.is_nan() || size <= 0f64 {
        return Err(ConfigError::NonPositiveSize(size));
    }

    if !size.is_finite() {
        return Err(ConfigError::NonFinite { what: "size" });
    }

    Ok(size)
}

pub fn check_split_factor(k: f64) -> Result<f64, ConfigError> {
    if k.is_nan() || k <= 0f64 {
        return Err(ConfigError::NonPositiveSplitFactor(k));
    }

    if !k.is_finite() {
        return Err(ConfigError::NonFinite {
            what: "split factor",
        });
    }

    Ok(k)
}

pub fn check_color(color: Color, what: &'static str) -> Result<Color, ConfigError> {
    if !color.is_finite() {
        return Err(ConfigError::NonFinite { what });
    }

    Ok(color)
}

/// A fade needs a finite target and a finite step.
pub fn check_color_rule(rule: ColorRule) -> Result<ColorRule, ConfigError> {
    if let ColorRule::DepthFade { to, step } = rule {
        check_color(to, "fade color")?;

        if !step.is_finite() {
            return Err(ConfigError::NonFinite { what: "fade step" });
        }
    }

    Ok(rule)
}

/// Everything needed to build and split one face tree.
///
/// # Format
///
/// `key=value` pairs separated by commas, vectors separated by colons:
///
/// ```notrust
/// depth=6,size=2,k=1.5,origin=0:0,color=1:1:0,fade=0:0:0:0.2
/// ```
///
/// Missing keys keep their default.
#[derive(Debug, Clone, PartialEq)]
pub struct LodConfig {
    pub max_depth: u32,

    /// Full side length of the root.
    pub size: f64,

    /// Center of the root.
    pub origin: Point,

    pub color: Color,
    pub color_rule: ColorRule,
    pub split_factor: f64,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            size: 2f64,
            origin: Point::new(0f64, 0f64),
            color: Color::YELLOW,
            color_rule: ColorRule::Inherit,
            split_factor: 1.5,
        }
    }
}

impl LodConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_depth(self.max_depth as i64)?;
        check_size(self.size)?;
        check_split_factor(self.split_factor)?;

        if !self.origin.is_finite() {
            return Err(ConfigError::NonFinite { what: "origin" });
        }

        check_color(self.color, "color")?;
        check_color_rule(self.color_rule)?;

        Ok(())
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Parse exactly `N` colon separated numbers.
fn parse_vec<const N: usize>(key: &str, value: &str) -> Result<[f64; N], ConfigError> {
    let invalid = || ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    };

    let mut out = [0f64; N];
    let mut parts = value.split(':');

    for slot in out.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        *slot = parse_f64(key, part)?;
    }

    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(out)
}

impl FromStr for LodConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = LodConfig::default();

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(ConfigError::MissingValue {
                    key: pair.to_string(),
                });
            };

            let (key, value) = (key.trim(), value.trim());

            match key {
                "depth" | "max_depth" => {
                    let depth = value
                        .parse::<i64>()
                        .map_err(|_| ConfigError::InvalidNumber {
                            key: key.to_string(),
                            value: value.to_string(),
                        })?;

                    config.max_depth = check_depth(depth)?;
                }
                "size" | "radius" => {
                    config.size = check_size(parse_f64(key, value)?)?;
                }
                "k" | "split" | "split_factor" => {
                    config.split_factor = check_split_factor(parse_f64(key, value)?)?;
                }
                "origin" => {
                    let [x, y] = parse_vec::<2>(key, value)?;
                    config.origin = Point::new(x, y);
                }
                "color" => {
                    let [r, g, b] = parse_vec::<3>(key, value)?;
                    let color = Color::rgb(r as f32, g as f32, b as f32);
                    config.color = check_color(color, "color")?;
                }
                "fade" => {
                    let [r, g, b, step] = parse_vec::<4>(key, value)?;
                    config.color_rule = check_color_rule(ColorRule::DepthFade {
                        to: Color::rgb(r as f32, g as f32, b as f32),
                        step: step as f32,
                    })?;
                }
                _ => return Err(ConfigError::UnknownKey(key.to_string())),
            }
        }

        config.validate()?;

        Ok(config)
    }
}
