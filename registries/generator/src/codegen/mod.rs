// Licensed under the Apache-2.0 license

//! Main code generation logic for converting IANA registries to Rust constants.
//!
//! The pipeline per family is: select the nested registry, skip excluded
//! records, parse the value against the family width, compute the name, and
//! collect the survivors in registry order. [`generate_all`] runs it over every
//! family in a fixed order and hands the result to a [`SourceFormatter`].

#[cfg(test)]
mod tests;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;

use crate::config::{FamilyConfig, NameNormalizer};
use crate::output::{ConstantRecord, GeneratedBlock, HEADER};
use crate::types::RegistryDocument;
use crate::util::collapse_whitespace;
use crate::value::parse_bounded;

/// Retrieves registry documents by URL.
pub trait RegistrySource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Turns the assembled source text into its final form.
///
/// Implementations must reject text that is not valid Rust.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String>;
}

/// Checks that the source parses as a Rust file and returns it unchanged.
pub struct SyntaxOnly;

impl SourceFormatter for SyntaxOnly {
    fn format(&self, source: &str) -> Result<String> {
        syn::parse_file(source).map_err(|e| anyhow!("generated source is not valid Rust: {e}"))?;
        Ok(source.to_string())
    }
}

/// Per-family record counts, for the progress log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EscapeStats {
    pub kept: usize,
    /// Dropped by an excluded marker.
    pub filtered: usize,
    /// Dropped because the value did not parse within the family width.
    pub invalid: usize,
    /// Dropped because no identifier could be derived.
    pub unnamed: usize,
}

/// Converts the records of `doc` into constants for `config.family`.
///
/// Fails if the document has no matching nested registry or if two records
/// end up with the same identifier.
pub fn escape(
    doc: &RegistryDocument,
    config: &FamilyConfig,
) -> Result<(Vec<ConstantRecord>, EscapeStats)> {
    let Some(registry) = doc.sub_registry(config.sub_registry, config.sole_registry_fallback)
    else {
        bail!(
            "no \"{}\" registry in \"{}\" ({} nested registries)",
            config.sub_registry,
            doc.title,
            doc.registries.len()
        );
    };

    let normalizer = NameNormalizer::new(config)?;
    let bits = config.family.bits();
    let mut stats = EscapeStats::default();
    let mut constants: Vec<ConstantRecord> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for record in &registry.records {
        let description = collapse_whitespace(&record.description);
        if let Some(marker) = config.excluded_by(&description) {
            debug!("skipping {} {:?}: contains {marker:?}", record.value, description);
            stats.filtered += 1;
            continue;
        }
        let Some(value) = parse_bounded(&record.value, bits) else {
            debug!(
                "skipping {:?} ({description}): not a {bits}-bit value",
                record.value
            );
            stats.invalid += 1;
            continue;
        };
        let Some(name) = normalizer.normalize(&description) else {
            warn!("skipping {value} {description:?}: no usable identifier");
            stats.unnamed += 1;
            continue;
        };

        if let Some(&idx) = seen.get(&name) {
            let first = &constants[idx];
            bail!(
                "duplicate {} identifier {}: {:?} ({}) and {:?} ({value})",
                config.family,
                first.ident(),
                first.original_name,
                first.value,
                description
            );
        }
        seen.insert(name.clone(), constants.len());
        constants.push(ConstantRecord {
            original_name: description,
            name,
            value,
            family: config.family,
        });
        stats.kept += 1;
    }

    Ok((constants, stats))
}

/// Generates the constant block for an already decoded document.
pub fn generate_block(doc: &RegistryDocument, config: &FamilyConfig) -> Result<GeneratedBlock> {
    let (constants, stats) = escape(doc, config)?;
    info!(
        "{}: {} constants ({} filtered, {} invalid values, {} unnamed)",
        config.family, stats.kept, stats.filtered, stats.invalid, stats.unnamed
    );
    Ok(GeneratedBlock {
        family: config.family,
        title: doc.title.clone(),
        updated: doc.updated.clone(),
        constants,
    })
}

/// Decodes `xml` and generates its constant block.
pub fn generate_from_xml(xml: &str, config: &FamilyConfig) -> Result<GeneratedBlock> {
    let doc = RegistryDocument::from_xml(xml)?;
    generate_block(&doc, config)
}

/// Generates the complete constants file for `families`, in order.
///
/// Any fetch, decode or formatting failure aborts the whole run; nothing is
/// returned for the families already processed.
pub fn generate_all(
    families: &[FamilyConfig],
    source: &dyn RegistrySource,
    formatter: &dyn SourceFormatter,
) -> Result<String> {
    let mut code = String::from(HEADER);
    for config in families {
        info!("Generating {} constants from {}", config.family, config.url);
        let xml = source
            .fetch(config.url)
            .with_context(|| format!("error retrieving {}", config.url))?;
        let block = generate_from_xml(&xml, config)
            .with_context(|| format!("error parsing response from {}", config.url))?;
        code.push_str(&block.generate_code());
        code.push('\n');
    }
    formatter
        .format(&code)
        .context("error formatting generated source")
}
