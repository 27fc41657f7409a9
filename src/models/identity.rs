//! RUT identity value object
//!
//! A validated Chilean RUT: numeric part plus checksum character. Instances
//! can only be built through [`Rut::parse`], so any `Rut` in the domain is
//! known to be valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const RUT_MIN: u32 = 1_000_000;
const RUT_MAX: u32 = 99_999_999;

/// Validated national identity (RUT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rut {
    number: u32,
    check: char,
}

impl Rut {
    /// Parse and validate a RUT given in any common format
    /// (with or without dots and hyphen, check digit in either case).
    pub fn parse(raw: &str) -> AppResult<Self> {
        let cleaned: Vec<char> = raw
            .chars()
            .filter(|c| *c != '.' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        if cleaned.len() < 8 || cleaned.len() > 9 {
            return Err(AppError::InvalidIdentity(format!(
                "'{}' has unexpected length, expected format 12.345.678-9",
                raw.trim()
            )));
        }

        let check = cleaned[cleaned.len() - 1];
        let digits: String = cleaned[..cleaned.len() - 1].iter().collect();

        let number: u32 = digits.parse().map_err(|_| {
            AppError::InvalidIdentity(format!("'{}' has a non-numeric number part", raw.trim()))
        })?;

        if !(RUT_MIN..=RUT_MAX).contains(&number) {
            return Err(AppError::InvalidIdentity(format!(
                "'{}' is outside the range 1.000.000 - 99.999.999",
                raw.trim()
            )));
        }

        if check_char(number) != check {
            return Err(AppError::InvalidIdentity(format!(
                "'{}' has a wrong check character",
                raw.trim()
            )));
        }

        Ok(Self { number, check })
    }

    /// Numeric part without the check character
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Check character ('0'-'9' or 'K')
    pub fn check(&self) -> char {
        self.check
    }

    /// Digits and check character with no separators (e.g. "20274916K")
    pub fn compact(&self) -> String {
        format!("{}{}", self.number, self.check)
    }

    /// Dotted format with hyphen (e.g. "20.274.916-K")
    pub fn formatted(&self) -> String {
        let digits = self.number.to_string();
        let mut grouped = String::with_capacity(digits.len() + 4);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        format!("{}-{}", grouped, self.check)
    }
}

/// Compute the expected check character (modulo 11 scheme):
/// digits weighted 2,3,4,5,6,7,2,... from the least significant.
fn check_char(number: u32) -> char {
    let mut sum: u32 = 0;
    let mut weight: u32 = 2;
    let mut n = number;

    while n > 0 {
        sum += (n % 10) * weight;
        n /= 10;
        weight = if weight == 7 { 2 } else { weight + 1 };
    }

    match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        d => char::from_digit(d, 10).unwrap_or('?'),
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl FromStr for Rut {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rut::parse(s)
    }
}
