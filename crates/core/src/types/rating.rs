//! Star ratings and their average.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The input is not an integer.
    #[error("rating must be a whole number, got {0:?}")]
    NotANumber(String),
    /// The value is outside 1..=5.
    #[error("rating must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// The rejected value.
        value: i64,
        /// Lowest accepted rating.
        min: u8,
        /// Highest accepted rating.
        max: u8,
    },
}

/// A 1-5 star rating attached to a comment.
///
/// Serialized as a bare integer (`"estrellas": 4`).
///
/// ## Examples
///
/// ```
/// use salones_core::Rating;
///
/// assert_eq!(Rating::parse("4").map(Rating::stars), Ok(4));
/// assert!(Rating::parse("0").is_err());
/// assert!(Rating::parse("six").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Parse a rating from form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not an integer in 1..=5.
    pub fn parse(s: &str) -> Result<Self, RatingError> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| RatingError::NotANumber(trimmed.to_owned()))?;
        Self::try_from(value)
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(stars) if (Self::MIN..=Self::MAX).contains(&stars) => Ok(Self(stars)),
            _ => Err(RatingError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            }),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arithmetic mean of a venue's ratings.
///
/// The mean is kept as a [`Decimal`] rounded half away from zero to one
/// decimal place, so `[5, 3, 4]` displays as `4.0` and never as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingSummary {
    count: usize,
    average: Option<Decimal>,
}

impl RatingSummary {
    /// Placeholder shown when a venue has no ratings yet.
    pub const NO_RATINGS: &'static str = "Sin calificaciones";

    /// Summarise a set of ratings.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let (count, sum) = ratings
            .into_iter()
            .fold((0_usize, 0_u64), |(count, sum), rating| {
                (count + 1, sum + u64::from(rating.stars()))
            });

        let average = (count > 0).then(|| {
            let mut mean = (Decimal::from(sum) / Decimal::from(count))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            mean.rescale(1);
            mean
        });

        Self { count, average }
    }

    /// Number of ratings summarised.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// The rounded mean, or `None` when there are no ratings.
    #[must_use]
    pub const fn average(&self) -> Option<Decimal> {
        self.average
    }

    /// Text for the venue's average badge.
    #[must_use]
    pub fn display(&self) -> String {
        self.average
            .map_or_else(|| Self::NO_RATINGS.to_owned(), |avg| avg.to_string())
    }
}
