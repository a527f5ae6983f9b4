// Licensed under the Apache-2.0 license

//! Decoded IANA registry documents.
//!
//! IANA publishes each registry as an XML document with a top-level
//! `<registry>` element holding a title, an update date and one or more
//! nested `<registry>` blocks of `<record>` entries. Only the elements needed
//! for constant generation are modelled; everything else is ignored.

use anyhow::{Context, Result};
use serde::Deserialize;

/// A complete registry document as published by IANA.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub title: String,
    /// Free-form date string, copied into the generated header comment.
    #[serde(default)]
    pub updated: String,
    #[serde(rename = "registry", default)]
    pub registries: Vec<SubRegistry>,
}

/// A nested registry block, e.g. "Capability Codes".
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubRegistry {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "record", default)]
    pub records: Vec<RawRecord>,
}

/// One assignment as it appears in the registry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawRecord {
    /// Decimal code point, or a range such as `6-7` for block assignments.
    #[serde(default)]
    pub value: String,
    /// Free text; may span several lines in the source XML.
    #[serde(default)]
    pub description: String,
}

impl RegistryDocument {
    /// Decode a registry document from its XML text.
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml).context("failed to decode registry XML")
    }

    /// Select the nested registry titled `title`.
    ///
    /// With `sole_fallback`, a document that carries a single nested registry
    /// returns it even when its title differs.
    pub fn sub_registry(&self, title: &str, sole_fallback: bool) -> Option<&SubRegistry> {
        self.registries
            .iter()
            .find(|r| r.title.trim() == title)
            .or(match self.registries.as_slice() {
                [only] if sole_fallback => Some(only),
                _ => None,
            })
    }
}
