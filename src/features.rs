use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The column names the model was trained on, in input order.
pub const FEATURE_NAMES: [&str; 4] = ["Solar.R", "Wind", "Temp", "Month"];

/// The months covered by the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Month {
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
}

impl Month {
    pub const ALL: [Month; 5] = [
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
    ];

    /// The month number as fed to the model.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Returns the following month, wrapping around to May.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Returns the preceding month, wrapping around to September.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl TryFrom<u8> for Month {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|m| m.number() == value)
            .ok_or(ValidationError::Month { got: value })
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One row of model input. Values are checked once on construction and never change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    solar_radiation: f32,
    wind_speed: f32,
    temperature: f32,
    month: Month,
}

impl FeatureRecord {
    /// Creates a new `FeatureRecord`.
    ///
    /// # Arguments
    /// * `solar_radiation` - Solar radiation (Langleys).
    /// * `wind_speed` - Average wind speed (mph).
    /// * `temperature` - Maximum daily temperature (F).
    /// * `month` - Month number, one of 5 through 9.
    ///
    /// # Errors
    /// Returns a `ValidationError` if a continuous value is negative or not finite, or if the
    /// month is outside the training range.
    pub fn new(
        solar_radiation: f32,
        wind_speed: f32,
        temperature: f32,
        month: u8,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            solar_radiation: non_negative("solar_radiation", solar_radiation)?,
            wind_speed: non_negative("wind_speed", wind_speed)?,
            temperature: non_negative("temperature", temperature)?,
            month: Month::try_from(month)?,
        })
    }

    pub fn solar_radiation(&self) -> f32 {
        self.solar_radiation
    }

    pub fn wind_speed(&self) -> f32 {
        self.wind_speed
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Returns the record as a dense row, ordered like `FEATURE_NAMES`.
    pub fn to_row(&self) -> [f32; 4] {
        [
            self.solar_radiation,
            self.wind_speed,
            self.temperature,
            f32::from(self.month.number()),
        ]
    }

    /// Pairs every column name with its value.
    pub fn columns(&self) -> [(&'static str, f32); 4] {
        let row = self.to_row();
        std::array::from_fn(|i| (FEATURE_NAMES[i], row[i]))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<f32, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }

    Ok(value)
}
