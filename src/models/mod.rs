//! Serde model of the host presentation, shaped after the Google Slides REST resources.

pub mod colors;
pub mod common;
pub mod elements;
pub mod image;
pub mod link;
pub mod page;
pub mod placeholder;
pub mod presentation;
pub mod properties;
pub mod shape;
pub mod table;
pub mod text;
