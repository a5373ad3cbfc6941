use serde::{Deserialize, Serialize};
use std::fmt;

/// A personal rating on the 1-10 integer scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct UserRating(u8);

impl UserRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for UserRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "rating {} is out of range ({}-{})",
                value,
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<UserRating> for u8 {
    fn from(rating: UserRating) -> Self {
        rating.0
    }
}

impl fmt::Display for UserRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(UserRating::new(0).is_none());
        assert!(UserRating::new(11).is_none());
        assert_eq!(UserRating::new(1).map(UserRating::value), Some(1));
        assert_eq!(UserRating::new(10).map(UserRating::value), Some(10));
    }

    #[test]
    fn test_rating_rejects_out_of_range_json() {
        let parsed: Result<UserRating, _> = serde_json::from_str("12");
        assert!(parsed.is_err());
        let parsed: UserRating = serde_json::from_str("8").unwrap();
        assert_eq!(parsed.value(), 8);
    }
}
