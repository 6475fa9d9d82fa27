use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// The direction of a call, fixed for its whole traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Object graph to wire data.
    Serialization,
    /// Wire data to object graph.
    Deserialization,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serialization => "serialization",
            Self::Deserialization => "deserialization",
        }
    }
}

impl fmt::Display for Direction {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Parses `serialization` or `deserialization`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Self::Serialization.as_str()) {
            Ok(Self::Serialization)
        } else if s.eq_ignore_ascii_case(Self::Deserialization.as_str()) {
            Ok(Self::Deserialization)
        } else {
            Err(Error::UnknownDirection(String::from(s)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;
    use crate::error::Error;

    #[test]
    fn parse_direction() {
        assert_eq!("serialization".parse::<Direction>().unwrap(), Direction::Serialization);
        assert_eq!("DESERIALIZATION".parse::<Direction>().unwrap(), Direction::Deserialization);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(Error::UnknownDirection(s)) if s == "sideways"
        ));
    }
}
