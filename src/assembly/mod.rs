//! Template-driven page assembly: catalog lookup, paging, cloning, filling and trimming.

pub mod assembler;
pub mod blocks;
pub mod catalog;
pub mod cloner;
pub mod materializer;
pub mod pagination;
pub mod selector;
pub mod tags;
pub mod text;
pub mod trimmer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use assembler::{
    assemble, AssembledDeck, ChartSlide, DeckAssembler, DeckRequest, EncodedChart, Reference,
};
pub use blocks::{BlockKind, ContentBlock, ContentRewriter, PreTagged, RewriteMode};
pub use catalog::{RegionAddress, TemplateCatalog, TemplateEntry, TemplateFamily};
pub use materializer::{PageContent, SlideMaterializer};
pub use pagination::{CapacityTable, PageSpec, PaginationPlan, PaginationScheme};
pub use selector::VariantSelector;
