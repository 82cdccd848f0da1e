use log::warn;
use ozone_predictor::{
    FeatureRecord, FormDefaults, Month, PredictionResult, PredictorService, ValidationError,
};

/// The control that currently has focus, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SolarRadiation,
    WindSpeed,
    Temperature,
    Month,
    Predict,
}

impl Field {
    const ORDER: [Field; 5] = [
        Field::SolarRadiation,
        Field::WindSpeed,
        Field::Temperature,
        Field::Month,
        Field::Predict,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// A numeric input with a lower bound of zero and a fixed step.
#[derive(Debug, Clone)]
pub struct Spinner {
    pub label: &'static str,
    value: f32,
    step: f32,
    decimals: usize,
    edit: Option<String>,
}

impl Spinner {
    pub fn new(label: &'static str, value: f32, step: f32, decimals: usize) -> Self {
        Self {
            label,
            value: value.max(0.0),
            step,
            decimals,
            edit: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// What the control shows: the pending edit if there is one, else the value.
    pub fn display(&self) -> String {
        match &self.edit {
            Some(buf) => buf.clone(),
            None => format!("{:.*}", self.decimals, self.value),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn increment(&mut self) {
        self.edit = None;
        self.value = self.snap(self.value + self.step);
    }

    pub fn decrement(&mut self) {
        self.edit = None;
        self.value = self.snap(self.value - self.step).max(0.0);
    }

    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '.' && !self.edit.as_deref().unwrap_or("").contains('.')) {
            self.edit.get_or_insert_with(String::new).push(c);
        }
    }

    pub fn backspace(&mut self) {
        let mut buf = self.edit.take().unwrap_or_else(|| self.display());
        buf.pop();
        self.edit = Some(buf);
    }

    /// Applies the pending edit, if any.
    ///
    /// # Errors
    /// Returns a message and keeps the previous value if the edit isn't a non-negative number.
    pub fn commit(&mut self) -> Result<(), String> {
        let Some(buf) = self.edit.take() else {
            return Ok(());
        };

        match buf.parse::<f32>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {
                self.value = v;
                Ok(())
            }
            _ => Err(format!("{}: '{buf}' is not a non-negative number", self.label)),
        }
    }

    fn snap(&self, v: f32) -> f32 {
        let scale = 10f32.powi(self.decimals as i32);
        (v * scale).round() / scale
    }
}

/// What the last press of the trigger produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Predicted(PredictionResult),
    Failed(String),
}

/// The input form: three spinners, a month selector and the predict trigger.
#[derive(Debug, Clone)]
pub struct FormState {
    pub solar_radiation: Spinner,
    pub wind_speed: Spinner,
    pub temperature: Spinner,
    pub month: Month,
    pub focus: Field,
    pub outcome: Option<Outcome>,
    pub notice: Option<String>,
}

impl FormState {
    pub fn new(defaults: &FormDefaults) -> Self {
        Self {
            solar_radiation: Spinner::new("Solar.R (solar radiation)", defaults.solar_radiation, 1.0, 2),
            wind_speed: Spinner::new("Wind (mph)", defaults.wind_speed, 0.1, 2),
            temperature: Spinner::new("Temperature (F)", defaults.temperature, 0.1, 2),
            month: defaults.month,
            focus: Field::SolarRadiation,
            outcome: None,
            notice: None,
        }
    }

    pub fn spinner_mut(&mut self, field: Field) -> Option<&mut Spinner> {
        match field {
            Field::SolarRadiation => Some(&mut self.solar_radiation),
            Field::WindSpeed => Some(&mut self.wind_speed),
            Field::Temperature => Some(&mut self.temperature),
            Field::Month | Field::Predict => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.commit_focused();
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.commit_focused();
        self.focus = self.focus.prev();
    }

    pub fn increment(&mut self) {
        match self.focus {
            Field::Month => self.month = self.month.next(),
            field => {
                if let Some(s) = self.spinner_mut(field) {
                    s.increment();
                }
            }
        }
    }

    pub fn decrement(&mut self) {
        match self.focus {
            Field::Month => self.month = self.month.prev(),
            field => {
                if let Some(s) = self.spinner_mut(field) {
                    s.decrement();
                }
            }
        }
    }

    pub fn type_char(&mut self, c: char) {
        let focus = self.focus;
        if let Some(s) = self.spinner_mut(focus) {
            s.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        if let Some(s) = self.spinner_mut(focus) {
            s.backspace();
        }
    }

    /// Builds the record currently described by the form.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the values fall outside the model's input range.
    pub fn record(&self) -> Result<FeatureRecord, ValidationError> {
        FeatureRecord::new(
            self.solar_radiation.value(),
            self.wind_speed.value(),
            self.temperature.value(),
            self.month.number(),
        )
    }

    /// Runs a prediction for the current values and stores the outcome. Failures are kept as a
    /// message and leave the form usable.
    pub fn submit(&mut self, service: &PredictorService) {
        for s in [
            &mut self.solar_radiation,
            &mut self.wind_speed,
            &mut self.temperature,
        ] {
            if let Err(msg) = s.commit() {
                warn!("{msg}");
                self.outcome = Some(Outcome::Failed(msg));
                return;
            }
        }

        let outcome = match self.record() {
            Ok(record) => match service.evaluate(&record) {
                Ok(result) => Outcome::Predicted(result),
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Err(e) => {
                warn!("{e}");
                Outcome::Failed(e.to_string())
            }
        };

        self.outcome = Some(outcome);
    }

    fn commit_focused(&mut self) {
        let focus = self.focus;
        let Some(s) = self.spinner_mut(focus) else {
            return;
        };

        if let Err(msg) = s.commit() {
            warn!("{msg}");
            self.outcome = Some(Outcome::Failed(msg));
        }
    }
}
