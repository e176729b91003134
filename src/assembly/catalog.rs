//! Static description of every template page and the regions content is written into.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{AssemblyError, Result};

/// The four lookup tables a catalog is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateFamily {
    Title,
    Chart,
    Reference,
    Normal,
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateFamily::Title => "title",
            TemplateFamily::Chart => "chart",
            TemplateFamily::Reference => "reference",
            TemplateFamily::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Where on a template page a named region lives.
///
/// Shape indices are positions in the page's element list; placeholder
/// numbers are the `index` of the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionAddress {
    Placeholder(i32),
    /// One placeholder per capacity slot.
    Placeholders(Vec<i32>),
    Shape(usize),
    /// One shape per capacity slot.
    Shapes(Vec<usize>),
    /// Element index of a table.
    Table(usize),
    /// Groups of shapes removed together when their slot is empty.
    ShapeGroups(Vec<Vec<usize>>),
}

impl RegionAddress {
    /// Number of slots of a list-addressed region.
    pub fn slot_count(&self) -> Option<usize> {
        match self {
            RegionAddress::Placeholders(list) => Some(list.len()),
            RegionAddress::Shapes(list) => Some(list.len()),
            RegionAddress::ShapeGroups(groups) => Some(groups.len()),
            _ => None,
        }
    }
}

/// One template variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TemplateEntry {
    /// Filled from the catalog key when loading.
    #[serde(default)]
    pub template_id: String,
    /// Filled from the catalog key when loading.
    #[serde(default)]
    pub variant_key: String,
    pub source_page_index: usize,
    #[serde(default)]
    pub capacity: usize,
    /// Region whose slot count must equal `capacity`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_region: Option<String>,
    #[serde(default)]
    pub regions: IndexMap<String, RegionAddress>,
    /// Tag names grouped per output slot, for blocks that read their tags from the template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_groups: Vec<Vec<String>>,
}

impl TemplateEntry {
    pub fn region(&self, name: &str) -> Result<&RegionAddress> {
        self.regions.get(name).ok_or_else(|| self.missing_region(name))
    }

    pub(crate) fn missing_region(&self, name: &str) -> AssemblyError {
        AssemblyError::MissingRegion {
            template_id: self.template_id.clone(),
            variant_key: self.variant_key.clone(),
            region: name.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        let Some(primary) = self.primary_region.as_deref() else {
            return Ok(());
        };
        let address = self.region(primary)?;
        match address.slot_count() {
            Some(slots) if slots != self.capacity => Err(AssemblyError::InvalidCatalog(format!(
                "template '{}' variant '{}': capacity {} but region '{}' has {} slot(s)",
                self.template_id, self.variant_key, self.capacity, primary, slots
            ))),
            _ => Ok(()),
        }
    }
}

/// Variants of one template, in file order.
pub type VariantMap = IndexMap<String, TemplateEntry>;

/// Read-only lookup of template entries by family, template id and variant key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TemplateCatalog {
    #[serde(default)]
    pub title: IndexMap<String, VariantMap>,
    #[serde(default)]
    pub chart: IndexMap<String, VariantMap>,
    #[serde(default)]
    pub reference: IndexMap<String, VariantMap>,
    #[serde(default)]
    pub normal: IndexMap<String, VariantMap>,
}

impl TemplateCatalog {
    /// Parses and validates a catalog.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut catalog: TemplateCatalog = serde_json::from_str(json)?;
        catalog.fill_keys();
        catalog.validate()?;
        Ok(catalog)
    }

    /// Copies map keys into each entry's `template_id` and `variant_key`.
    pub fn fill_keys(&mut self) {
        for table in [
            &mut self.title,
            &mut self.chart,
            &mut self.reference,
            &mut self.normal,
        ] {
            for (template_id, variants) in table.iter_mut() {
                for (variant_key, entry) in variants.iter_mut() {
                    entry.template_id = template_id.clone();
                    entry.variant_key = variant_key.clone();
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for family in [
            TemplateFamily::Title,
            TemplateFamily::Chart,
            TemplateFamily::Reference,
            TemplateFamily::Normal,
        ] {
            for variants in self.table(family).values() {
                for entry in variants.values() {
                    entry.validate()?;
                }
            }
        }
        Ok(())
    }

    fn table(&self, family: TemplateFamily) -> &IndexMap<String, VariantMap> {
        match family {
            TemplateFamily::Title => &self.title,
            TemplateFamily::Chart => &self.chart,
            TemplateFamily::Reference => &self.reference,
            TemplateFamily::Normal => &self.normal,
        }
    }

    pub fn resolve(
        &self,
        family: TemplateFamily,
        template_id: &str,
        variant_key: &str,
    ) -> Result<&TemplateEntry> {
        self.table(family)
            .get(template_id)
            .and_then(|variants| variants.get(variant_key))
            .ok_or_else(|| AssemblyError::TemplateNotFound {
                family,
                template_id: template_id.to_string(),
                variant_key: variant_key.to_string(),
            })
    }

    /// Variant keys of a template in catalog order. Empty for unknown templates.
    pub fn variant_keys(&self, family: TemplateFamily, template_id: &str) -> Vec<&str> {
        self.table(family)
            .get(template_id)
            .map(|variants| variants.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
