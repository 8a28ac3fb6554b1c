use std::fmt;

use thiserror::Error;

/// Rate of Perceived Exertion, a self-reported intensity score.
///
/// Only the range is enforced. Synced records may carry arbitrary decimals,
/// so no resolution is imposed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RPE(f32);

impl RPE {
    pub const ONE: RPE = RPE(1.0);
    pub const TWO: RPE = RPE(2.0);
    pub const THREE: RPE = RPE(3.0);
    pub const FOUR: RPE = RPE(4.0);
    pub const FIVE: RPE = RPE(5.0);
    pub const SIX: RPE = RPE(6.0);
    pub const SEVEN: RPE = RPE(7.0);
    pub const EIGHT: RPE = RPE(8.0);
    pub const NINE: RPE = RPE(9.0);
    pub const TEN: RPE = RPE(10.0);

    pub fn new(value: f32) -> Result<Self, RPEError> {
        if !(1.0..=10.0).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<RPE> for f32 {
    fn from(value: RPE) -> Self {
        value.0
    }
}

impl From<RPE> for f64 {
    fn from(value: RPE) -> Self {
        f64::from(value.0)
    }
}

impl TryFrom<&str> for RPE {
    type Error = RPEError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => RPE::new(parsed_value),
            Err(_) => Err(RPEError::ParseError),
        }
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 1.0 to 10.0")]
    OutOfRange,
    #[error("RPE must be a decimal")]
    ParseError,
}
