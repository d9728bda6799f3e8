//! Result ranking.

use std::fmt;

/// Sort direction for a rank field. Ascending when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A rank specification: one field plus a direction.
///
/// The wire form is the bare field name for ascending order and `-field`
/// for descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    pub field: String,
    pub direction: SortDirection,
}

impl Rank {
    pub fn ascending(field: impl Into<String>) -> Self {
        Rank {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Rank {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl From<&str> for Rank {
    fn from(field: &str) -> Self {
        Rank::ascending(field)
    }
}

impl<S: Into<String>> From<(S, SortDirection)> for Rank {
    fn from((field, direction): (S, SortDirection)) -> Self {
        Rank {
            field: field.into(),
            direction,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_field_defaults_to_ascending() {
        let rank = Rank::from("created_at");
        assert_eq!(rank.direction, SortDirection::Asc);
        assert_eq!(rank.to_string(), "created_at");
    }

    #[test]
    fn test_descending_prefixes_with_dash() {
        assert_eq!(Rank::descending("created_at").to_string(), "-created_at");
    }

    #[test]
    fn test_field_direction_pair() {
        let rank = Rank::from(("created_at", SortDirection::Desc));
        assert_eq!(rank.to_string(), "-created_at");
    }
}
