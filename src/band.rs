use std::fmt::{self, Display};

/// Upper bound (exclusive) of the `Good` band, in ppb.
pub const GOOD_BELOW: f32 = 50.0;
/// Upper bound (exclusive) of the `Moderate` band, in ppb.
pub const MODERATE_BELOW: f32 = 100.0;

/// Qualitative air quality derived from a predicted ozone level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirQualityBand {
    Good,
    Moderate,
    Poor,
}

/// How loudly a band should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl AirQualityBand {
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Good => "low ozone",
            Self::Moderate => "elevated ozone",
            Self::Poor => "high ozone",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::Good => Severity::Info,
            Self::Moderate => Severity::Warning,
            Self::Poor => Severity::Error,
        }
    }
}

impl Display for AirQualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Air quality: {} ({})",
            self.label(),
            self.description()
        )
    }
}

/// Maps a predicted ozone level onto its band using half-open intervals:
/// `[-inf, 50)` is `Good`, `[50, 100)` is `Moderate` and everything else is `Poor`.
pub fn classify(ppb: f32) -> AirQualityBand {
    if ppb < GOOD_BELOW {
        AirQualityBand::Good
    } else if ppb < MODERATE_BELOW {
        AirQualityBand::Moderate
    } else {
        AirQualityBand::Poor
    }
}
