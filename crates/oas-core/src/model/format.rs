use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// String `format` keyword. Formats outside the well-known set are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringFormat {
    Byte,
    Binary,
    Date,
    DateTime,
    Email,
    Hostname,
    Ipv4,
    Ipv6,
    Password,
    Uri,
    Uuid,
    Other(String),
}

impl StringFormat {
    pub fn as_str(&self) -> &str {
        match self {
            StringFormat::Byte => "byte",
            StringFormat::Binary => "binary",
            StringFormat::Date => "date",
            StringFormat::DateTime => "date-time",
            StringFormat::Email => "email",
            StringFormat::Hostname => "hostname",
            StringFormat::Ipv4 => "ipv4",
            StringFormat::Ipv6 => "ipv6",
            StringFormat::Password => "password",
            StringFormat::Uri => "uri",
            StringFormat::Uuid => "uuid",
            StringFormat::Other(other) => other,
        }
    }
}

impl From<&str> for StringFormat {
    fn from(raw: &str) -> Self {
        match raw {
            "byte" => StringFormat::Byte,
            "binary" => StringFormat::Binary,
            "date" => StringFormat::Date,
            "date-time" => StringFormat::DateTime,
            "email" => StringFormat::Email,
            "hostname" => StringFormat::Hostname,
            "ipv4" => StringFormat::Ipv4,
            "ipv6" => StringFormat::Ipv6,
            "password" => StringFormat::Password,
            "uri" => StringFormat::Uri,
            "uuid" => StringFormat::Uuid,
            other => StringFormat::Other(other.to_string()),
        }
    }
}

impl Serialize for StringFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StringFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(StringFormat::from(raw.as_str()))
    }
}

/// Floating point precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    Float,
    Double,
}

/// Integer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerFormat {
    Int32,
    Int64,
}
