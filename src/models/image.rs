use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::placeholder::Placeholder;

/// Raster bytes stored inside the document. Each image owns its buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedImage {
    /// e.g. `image/png`.
    pub mime_type: String,
    /// Serialized as standard base64.
    #[serde(serialize_with = "encode_bytes", deserialize_with = "decode_bytes")]
    pub data: Vec<u8>,
}

fn encode_bytes<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

fn decode_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

/// A PageElement kind representing an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// URL of a remotely hosted rendition. Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedImage>,
    /// Set when the image fills a picture placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
}

impl Image {
    /// True for a free-standing raster picture, as opposed to a filled placeholder.
    pub fn is_embedded_picture(&self) -> bool {
        self.embedded.is_some() && self.placeholder.is_none()
    }
}
