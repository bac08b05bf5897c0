use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;

/// A dotted numeric version such as `2.0` or `3.0.1`.
///
/// Equality is component-wise: `2` and `2.0` are different versions, since a
/// missing component is absent rather than zero. For the same reason the two
/// are unordered; `2` < `2.1` still holds because the tail is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    pub fn major(&self) -> u64 {
        self.components[0]
    }

    pub fn minor(&self) -> Option<u64> {
        self.components.get(1).copied()
    }

    pub fn patch(&self) -> Option<u64> {
        self.components.get(2).copied()
    }

    /// Accept exactly `2.0`, the only Swagger 2 version.
    pub fn expect_swagger2(self) -> Result<Self, VersionError> {
        if self.components == [2, 0] {
            Ok(self)
        } else {
            Err(VersionError::Unexpected {
                expected: "2.0",
                found: self.to_string(),
            })
        }
    }

    /// Accept any `3.0.x`.
    pub fn expect_openapi3(self) -> Result<Self, VersionError> {
        if self.major() == 3 && self.minor() == Some(0) {
            Ok(self)
        } else {
            Err(VersionError::Unexpected {
                expected: "3.0.x",
                found: self.to_string(),
            })
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionError::Empty);
        }
        let components = s
            .split('.')
            .map(|component| {
                let digits = !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit());
                digits
                    .then(|| component.parse::<u64>().ok())
                    .flatten()
                    .ok_or_else(|| VersionError::InvalidComponent {
                        version: s.to_string(),
                        component: component.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, component) in self.components.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        for (left, right) in self.components.iter().zip(&other.components) {
            if left != right {
                return Some(left.cmp(right));
            }
        }
        let common = self.components.len().min(other.components.len());
        let self_tail = &self.components[common..];
        let other_tail = &other.components[common..];
        if self_tail.iter().any(|c| *c > 0) {
            Some(Ordering::Greater)
        } else if other_tail.iter().any(|c| *c > 0) {
            Some(Ordering::Less)
        } else if self_tail.is_empty() && other_tail.is_empty() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `swagger: 2.0` is occasionally written as a bare number.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn round_trips_through_display() {
        assert_eq!(v("1.0.2.3").to_string(), "1.0.2.3");
        assert_eq!(v("1.0.2.3").components(), &[1, 0, 2, 3]);
    }

    #[test]
    fn exposes_major_minor_patch() {
        let version = v("3.0.1");
        assert_eq!(version.major(), 3);
        assert_eq!(version.minor(), Some(0));
        assert_eq!(version.patch(), Some(1));
        assert_eq!(v("2").minor(), None);
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert!(matches!(
            "2.x".parse::<Version>(),
            Err(VersionError::InvalidComponent { .. })
        ));
        assert!("2..0".parse::<Version>().is_err());
        assert!("-1.0".parse::<Version>().is_err());
        assert!("+1.0".parse::<Version>().is_err());
        assert_eq!("".parse::<Version>(), Err(VersionError::Empty));
    }

    #[test]
    fn missing_component_is_not_zero() {
        assert_ne!(v("2"), v("2.0"));
        assert_eq!(v("2").partial_cmp(&v("2.0")), None);
        assert!(v("2") < v("2.1"));
        assert!(v("2.0.1") > v("2"));
        assert!(v("3.0.0") > v("2.9.9"));
        assert!(v("1.10") > v("1.9"));
    }

    #[test]
    fn swagger2_check_is_exact() {
        assert!(v("2.0").expect_swagger2().is_ok());
        assert!(v("2.1").expect_swagger2().is_err());
        assert!(v("2.0.0").expect_swagger2().is_err());
        assert!(v("2").expect_swagger2().is_err());
    }

    #[test]
    fn openapi3_check_accepts_any_patch() {
        assert!(v("3.0.0").expect_openapi3().is_ok());
        assert!(v("3.0.3").expect_openapi3().is_ok());
        assert!(v("3.0").expect_openapi3().is_ok());
        assert!(v("3.1.0").expect_openapi3().is_err());
    }

    #[test]
    fn deserializes_from_string_or_number() {
        let text: Version = serde_json::from_str("\"2.0\"").unwrap();
        let number: Version = serde_json::from_str("2.0").unwrap();
        assert_eq!(text, number);
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"2.0\"");
    }
}
