use std::fmt;
use std::str::FromStr;

/// Non-negative currency value held as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount {
    cents: u64,
}

impl Amount {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    pub fn is_positive(self) -> bool {
        self.cents > 0
    }

    /// True when the amount is a whole number of currency units.
    pub fn is_round(self) -> bool {
        self.cents % 100 == 0
    }

    /// True when the amount divides evenly into `step_cents`.
    pub fn is_multiple_of(self, step_cents: u64) -> bool {
        step_cents != 0 && self.cents % step_cents == 0
    }

    /// `ceil(self * numerator / denominator)` in whole currency units.
    pub fn scaled_units_ceil(self, numerator: u64, denominator: u64) -> u64 {
        let scaled = u128::from(self.cents) * u128::from(numerator);
        let divisor = u128::from(denominator) * 100;
        scaled.div_ceil(divisor) as u64
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountParseError;

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a decimal amount with at most two fraction digits")
    }
}

impl std::error::Error for AmountParseError {}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Accepts `123`, `123.4`, and `123.45`. Signs, exponents, and whitespace are rejected.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (raw, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountParseError);
        }

        let fraction_cents = match fraction {
            None => 0,
            Some(digits)
                if (1..=2).contains(&digits.len())
                    && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                let value: u64 = digits.parse().map_err(|_| AmountParseError)?;
                if digits.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
            Some(_) => return Err(AmountParseError),
        };

        let units: u64 = whole.parse().map_err(|_| AmountParseError)?;
        let cents = units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .ok_or(AmountParseError)?;

        Ok(Self { cents })
    }
}
