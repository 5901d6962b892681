//! Transit stop numbers.

use std::fmt;

/// Error returned when user input is not a valid stop number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop number: {reason}")]
pub struct InvalidStopNumber {
    reason: &'static str,
}

/// A positive stop identifier, as printed on TransLink bus stop signs.
///
/// # Examples
///
/// ```
/// use transit_alarm::domain::StopNumber;
///
/// let stop = StopNumber::parse("50095").unwrap();
/// assert_eq!(stop.get(), 50095);
///
/// // Surrounding whitespace from the text field is tolerated
/// assert_eq!(StopNumber::parse(" 50095 ").unwrap(), stop);
///
/// assert!(StopNumber::parse("0").is_err());
/// assert!(StopNumber::parse("-1").is_err());
/// assert!(StopNumber::parse("5009a").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopNumber(u32);

impl StopNumber {
    /// Parse a stop number from text input.
    ///
    /// The trimmed input must consist solely of ASCII digits and denote a
    /// value greater than zero that fits in a `u32`.
    pub fn parse(s: &str) -> Result<Self, InvalidStopNumber> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStopNumber {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStopNumber {
                reason: "must contain only digits",
            });
        }

        let value: u32 = s.parse().map_err(|_| InvalidStopNumber {
            reason: "is too large",
        })?;

        Self::new(value)
    }

    /// Wrap an already-numeric stop identifier.
    pub fn new(value: u32) -> Result<Self, InvalidStopNumber> {
        if value == 0 {
            return Err(InvalidStopNumber {
                reason: "must be a positive integer",
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StopNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
