use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix of synthetic singleton classes.
pub const UNIQUE_PREFIX: &str = "u_";

/// A single cognate class identifier.
///
/// Serialized the way downstream tools expect it: shared classes as JSON
/// integers, singleton and unchecked codes as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CognateId {
    /// A shared cognate class.
    Class(u32),
    /// A synthetic singleton class, rendered `u_<n>`.
    Unique(usize),
    /// A code passed through without numeric checking.
    Code(String),
}

impl CognateId {
    /// Returns true for synthetic singleton classes.
    pub fn is_unique(&self) -> bool {
        matches!(self, CognateId::Unique(_))
    }

    /// Returns the numeric class, if this is one.
    pub fn as_class(&self) -> Option<u32> {
        match self {
            CognateId::Class(n) => Some(*n),
            _ => None,
        }
    }

    /// Interprets a textual identifier, recognising `u_<n>` and integers.
    pub fn from_token(token: &str) -> Self {
        if let Some(n) = token
            .strip_prefix(UNIQUE_PREFIX)
            .and_then(|rest| rest.parse::<usize>().ok())
        {
            return CognateId::Unique(n);
        }
        match token.parse::<u32>() {
            Ok(n) => CognateId::Class(n),
            Err(_) => CognateId::Code(token.to_string()),
        }
    }
}

impl fmt::Display for CognateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CognateId::Class(n) => write!(f, "{}", n),
            CognateId::Unique(n) => write!(f, "{}{}", UNIQUE_PREFIX, n),
            CognateId::Code(code) => f.write_str(code),
        }
    }
}

impl From<u32> for CognateId {
    fn from(n: u32) -> Self {
        CognateId::Class(n)
    }
}

impl Serialize for CognateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CognateId::Class(n) => serializer.serialize_u32(*n),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for CognateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = CognateId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer cognate class or a string token")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<CognateId, E> {
                u32::try_from(v)
                    .map(CognateId::Class)
                    .map_err(|_| E::custom(format!("cognate class out of range: {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<CognateId, E> {
                u32::try_from(v)
                    .map(CognateId::Class)
                    .map_err(|_| E::custom(format!("cognate class out of range: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<CognateId, E> {
                Ok(CognateId::from_token(v))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CognateId::Class(42).to_string(), "42");
        assert_eq!(CognateId::Unique(3).to_string(), "u_3");
        assert_eq!(CognateId::Code("1a".into()).to_string(), "1a");
    }

    #[test]
    fn test_json_shape() {
        let ids = vec![CognateId::Class(5), CognateId::Unique(1)];
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"[5,"u_1"]"#);

        let back: Vec<CognateId> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ids);
    }

    #[test]
    fn test_from_token() {
        assert_eq!(CognateId::from_token("u_12"), CognateId::Unique(12));
        assert_eq!(CognateId::from_token("7"), CognateId::Class(7));
        assert_eq!(CognateId::from_token("u_x"), CognateId::Code("u_x".into()));
        assert_eq!(CognateId::from_token("7").as_class(), Some(7));
        assert_eq!(CognateId::from_token("u_12").as_class(), None);
    }
}
