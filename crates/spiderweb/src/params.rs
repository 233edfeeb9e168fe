//! Operator parameters and their accepted ranges.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::WebError;

/// Accepted range for [`WebParams::amount`].
pub const AMOUNT_RANGE: RangeInclusive<u32> = 2..=999_999;
/// Accepted range for [`WebParams::main_iterations`].
pub const MAIN_ITERATIONS_RANGE: RangeInclusive<u32> = 1..=100;
/// Accepted range for [`WebParams::sub_iterations`].
pub const SUB_ITERATIONS_RANGE: RangeInclusive<u32> = 0..=999_999;
/// Accepted range for [`WebParams::resolution_u`].
pub const RESOLUTION_U_RANGE: RangeInclusive<u32> = 1..=1024;

/// Where strand end points are sampled from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleMethod {
    /// Object origin only; one point per object regardless of the requested count.
    Pivot,
    /// Inside the closed volume.
    Volume,
    /// On the surface, area weighted.
    #[default]
    Surface,
    /// Along randomly chosen edges.
    Edges,
    /// Randomly chosen existing vertices.
    Verts,
}

impl SampleMethod {
    pub const ALL: [SampleMethod; 5] = [
        SampleMethod::Pivot,
        SampleMethod::Volume,
        SampleMethod::Surface,
        SampleMethod::Edges,
        SampleMethod::Verts,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SampleMethod::Pivot => "Pivot",
            SampleMethod::Volume => "Volume",
            SampleMethod::Surface => "Surface",
            SampleMethod::Edges => "Edges",
            SampleMethod::Verts => "Vertices",
        }
    }
}

/// Parameters of one web invocation.
///
/// Unknown fields in serialized form fall back to the defaults, so a params
/// file only needs to list what it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebParams {
    /// Total number of anchor points spread over the selected meshes.
    pub amount: u32,
    /// How many times every anchor starts a main strand.
    pub main_iterations: u32,
    /// Sub-strands may anchor on sub-strands from earlier rounds.
    pub include_sub: bool,
    /// Number of sub-strand rounds; 0 disables sub-strands.
    pub sub_iterations: u32,
    pub method: SampleMethod,
    pub seed: i64,
    /// Lower drape bound. Not required to be below `drape_max`.
    pub drape_min: f64,
    pub drape_max: f64,
    /// Scale drape by strand length / 5.
    pub length_solver: bool,
    /// Curve evaluation steps per control-point span.
    pub resolution_u: u32,
}

impl Default for WebParams {
    fn default() -> Self {
        Self {
            amount: 20,
            main_iterations: 1,
            include_sub: true,
            sub_iterations: 3,
            method: SampleMethod::Surface,
            seed: 0,
            drape_min: -1.0,
            drape_max: 0.0,
            length_solver: true,
            resolution_u: 12,
        }
    }
}

impl WebParams {
    /// Check ranges. Reversed drape bounds are accepted.
    pub fn validate(&self) -> Result<(), WebError> {
        check_range("amount", self.amount, &AMOUNT_RANGE)?;
        check_range("main_iterations", self.main_iterations, &MAIN_ITERATIONS_RANGE)?;
        check_range("sub_iterations", self.sub_iterations, &SUB_ITERATIONS_RANGE)?;
        check_range("resolution_u", self.resolution_u, &RESOLUTION_U_RANGE)?;
        if !(self.drape_min.is_finite() && self.drape_max.is_finite()) {
            return Err(WebError::invalid("drape bounds must be finite"));
        }
        Ok(())
    }
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<(), WebError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(WebError::invalid(format!(
            "{name} = {value} outside [{}, {}]",
            range.start(),
            range.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = WebParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.amount, 20);
        assert_eq!(p.method, SampleMethod::Surface);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let p = WebParams {
            amount: 1,
            ..WebParams::default()
        };
        assert!(matches!(p.validate(), Err(WebError::InvalidParams { .. })));
        let p = WebParams {
            main_iterations: 0,
            ..WebParams::default()
        };
        assert!(p.validate().is_err());
        let p = WebParams {
            drape_max: f64::NAN,
            ..WebParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn reversed_drape_bounds_are_accepted() {
        let p = WebParams {
            drape_min: 2.0,
            drape_max: -2.0,
            ..WebParams::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn params_file_overrides_only_listed_fields() {
        let p: WebParams =
            serde_json::from_str(r#"{"amount": 40, "method": "VERTS"}"#).unwrap();
        assert_eq!(p.amount, 40);
        assert_eq!(p.method, SampleMethod::Verts);
        assert_eq!(p.sub_iterations, 3);
        let text = serde_json::to_string(&SampleMethod::Pivot).unwrap();
        assert_eq!(text, "\"PIVOT\"");
    }
}
