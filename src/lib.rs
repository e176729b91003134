pub mod assembly;
pub mod config;
pub mod converters;
pub mod document;
pub mod errors;
pub mod models;
pub mod wasm;

pub use assembly::{
    assemble, AssembledDeck, BlockKind, ChartSlide, ContentBlock, ContentRewriter, DeckAssembler,
    DeckRequest, EncodedChart, PreTagged, Reference, RewriteMode, TemplateCatalog,
};
pub use config::{AssemblyConfig, MalformedBlockPolicy};
pub use converters::markdown;
pub use document::{HostDocument, SlideHandle};
pub use errors::{AssemblyError, Result};
pub use models::presentation::Presentation;
pub use wasm::assemble_deck_from_json;
