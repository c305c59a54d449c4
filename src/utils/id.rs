use serde::{Deserialize, Deserializer};

// the backend issues numeric ids while the catalog treats every id as an opaque string
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(other: WireId) -> Self {
        match other {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    WireId::deserialize(deserializer).map(String::from)
}

pub fn deserialize_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<WireId>::deserialize(deserializer).map(|id| id.map(String::from))
}
