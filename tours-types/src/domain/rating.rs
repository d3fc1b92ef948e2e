//! Rating domain model.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::tour::TourId;

/// Store-assigned identifier for a Rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RatingId(pub i64);

impl RatingId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RatingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RatingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of the customer who left a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerId(pub i64);

impl CustomerId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// One customer's rating of one tour.
///
/// At most one rating exists per (tour, customer) pair. `tour_id` and
/// `customer_id` never change after creation; only `score` and `comment`
/// are mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub tour_id: TourId,
    pub customer_id: CustomerId,
    /// Star score, 0-5 by convention
    pub score: i32,
    pub comment: Option<String>,
}

impl Rating {
    /// Reconstructs a rating from stored fields.
    pub fn from_parts(
        id: RatingId,
        tour_id: TourId,
        customer_id: CustomerId,
        score: i32,
        comment: Option<String>,
    ) -> Self {
        Self {
            id,
            tour_id,
            customer_id,
            score,
            comment,
        }
    }

    /// Overwrites the mutable fields.
    pub fn revise(&mut self, score: i32, comment: Option<String>) {
        self.score = score;
        self.comment = comment;
    }
}

/// A rating that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub tour_id: TourId,
    pub customer_id: CustomerId,
    pub score: i32,
    pub comment: Option<String>,
}

impl NewRating {
    pub fn new(
        tour_id: TourId,
        customer_id: CustomerId,
        score: i32,
        comment: Option<String>,
    ) -> Self {
        Self {
            tour_id,
            customer_id,
            score,
            comment,
        }
    }

    /// Attaches the id the store assigned.
    pub fn into_rating(self, id: RatingId) -> Rating {
        Rating::from_parts(id, self.tour_id, self.customer_id, self.score, self.comment)
    }
}

/// Arithmetic mean of the given scores, or `None` for an empty set.
pub fn average_score<'a, I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0u64), |(sum, count), r| (sum + i64::from(r.score), count + 1));

    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(id: i64, score: i32) -> Rating {
        Rating::from_parts(RatingId(id), TourId(1), CustomerId(id), score, None)
    }

    #[test]
    fn test_average_of_empty_is_none() {
        let ratings: Vec<Rating> = Vec::new();
        assert_eq!(average_score(&ratings), None);
    }

    #[test]
    fn test_average_score() {
        let ratings = vec![rating(1, 5), rating(2, 4), rating(3, 2)];
        let avg = average_score(&ratings).unwrap();
        assert!((avg - 11.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_revise_keeps_identity() {
        let mut r = rating(7, 3);
        r.revise(1, Some("one".into()));
        assert_eq!(r.id, RatingId(7));
        assert_eq!(r.tour_id, TourId(1));
        assert_eq!(r.customer_id, CustomerId(7));
        assert_eq!(r.score, 1);
        assert_eq!(r.comment.as_deref(), Some("one"));
    }

    #[test]
    fn test_new_rating_into_rating() {
        let r = NewRating::new(TourId(2), CustomerId(9), 4, None).into_rating(RatingId(11));
        assert_eq!(r.id, RatingId(11));
        assert_eq!(r.tour_id, TourId(2));
        assert_eq!(r.score, 4);
    }
}
