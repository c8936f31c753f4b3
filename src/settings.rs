//! Precision settings for the derived-data calculations.

/// The precision with which to approximate the length of curved segments.
///
/// Higher precision is naturally more expensive to compute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthPrecision {
    /// 50 integration steps per segment.
    Low,
    /// 100 integration steps per segment.
    #[default]
    Normal,
    /// 150 integration steps per segment.
    High,
}

impl LengthPrecision {
    /// The number of linear integration steps used per curved segment.
    pub const fn steps(self) -> usize {
        match self {
            LengthPrecision::Low => 50,
            LengthPrecision::Normal => 100,
            LengthPrecision::High => 150,
        }
    }
}

/// The precision with which to sample the path for nearest-point queries.
///
/// The value is the maximum linear distance between consecutive samples of
/// the point lookup table, so *lower* spacing means higher precision, and
/// higher precision is naturally more expensive to compute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PerpendicularPrecision {
    /// One sample roughly every 15 units of length.
    Low,
    /// One sample roughly every 5 units of length.
    #[default]
    Normal,
    /// One sample roughly every 2 units of length.
    High,
}

impl PerpendicularPrecision {
    /// The linear distance between consecutive lookup table samples.
    pub const fn spacing(self) -> f64 {
        match self {
            PerpendicularPrecision::Low => 15.0,
            PerpendicularPrecision::Normal => 5.0,
            PerpendicularPrecision::High => 2.0,
        }
    }
}

/// Precision knobs for the cached path calculations.
///
/// Settings are an explicit value passed to cache construction rather than
/// process-wide state. Changing the settings of an already-measured path does
/// not retroactively invalidate its cache; invalidate explicitly to apply new
/// settings to previously derived data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculationSettings {
    /// Precision of segment length integration.
    pub length_precision: LengthPrecision,
    /// Sample spacing of the nearest-point lookup table.
    pub perpendicular_precision: PerpendicularPrecision,
}

impl CalculationSettings {
    /// Cheapest calculations: coarse length integration and sparse
    /// nearest-point sampling.
    pub const BEST_PERFORMANCE: CalculationSettings = CalculationSettings {
        length_precision: LengthPrecision::Low,
        perpendicular_precision: PerpendicularPrecision::Low,
    };

    /// The default trade-off between cost and accuracy.
    pub const BALANCED: CalculationSettings = CalculationSettings {
        length_precision: LengthPrecision::Normal,
        perpendicular_precision: PerpendicularPrecision::Normal,
    };

    /// Most accurate calculations: fine length integration and dense
    /// nearest-point sampling.
    pub const BEST_QUALITY: CalculationSettings = CalculationSettings {
        length_precision: LengthPrecision::High,
        perpendicular_precision: PerpendicularPrecision::High,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(CalculationSettings::default(), CalculationSettings::BALANCED);
        assert_eq!(LengthPrecision::default().steps(), 100);
        assert_eq!(PerpendicularPrecision::default().spacing(), 5.0);
    }
}
