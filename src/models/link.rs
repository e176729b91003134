use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// The destination of a [`Link`], keyed by JSON field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    /// No destination. Serialized as an empty object.
    #[default]
    None,
    /// An external web page.
    Url(String),
    /// A page of this presentation, by object id.
    PageObjectId(String),
    /// A slide of this presentation, by zero-based index.
    SlideIndex(i32),
}

/// A hypertext link.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(flatten)]
    pub destination: LinkKind,
}

impl Link {
    pub fn url(address: impl Into<String>) -> Self {
        Self {
            destination: LinkKind::Url(address.into()),
        }
    }
}

impl Serialize for Link {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.destination {
            LinkKind::None => serializer.serialize_map(Some(0))?.end(),
            other => other.serialize(serializer),
        }
    }
}
