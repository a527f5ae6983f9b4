// Licensed under the Apache-2.0 license

//! Output types and code generation for registry constants.
//!
//! ## Generated Code Structure
//!
//! For the capability registry, the generated block looks like:
//!
//! ```text
//! // Capability Codes, Updated: 2024-01-10
//! pub const CAP_MP_EXTENSIONS: u8 = 1; // Multiprotocol Extensions for BGP-4
//! pub const CAP_ROUTE_REFRESH: u8 = 2; // Route Refresh Capability for BGP-4
//! ```
//!
//! Alignment and spacing are left to the formatter.

use std::fmt;

use crate::config::Family;
use crate::util::collapse_whitespace;

/// Written once at the top of the generated file.
pub const HEADER: &str = "\
// Licensed under the Apache-2.0 license
//
// Generated by `cargo xtask iana-gen` from the IANA BGP registries.
// DO NOT EDIT.

";

/// A registry record that survived filtering, validation and naming.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantRecord {
    /// Description as published, whitespace-collapsed; used for the comment.
    pub original_name: String,
    /// Identifier suffix, `[A-Z0-9_]+`.
    pub name: String,
    /// Code point; fits in `family.bits()`.
    pub value: u64,
    pub family: Family,
}

impl ConstantRecord {
    /// Full constant identifier, e.g. `CAP_FOUR_OCTET_AS`.
    pub fn ident(&self) -> String {
        format!("{}_{}", self.family.prefix(), self.name)
    }
}

/// The constants generated for one registry document.
#[derive(Clone, Debug)]
pub struct GeneratedBlock {
    pub family: Family,
    /// Document title, for the block comment.
    pub title: String,
    /// Document update date, for the block comment.
    pub updated: String,
    /// Constants in registry order.
    pub constants: Vec<ConstantRecord>,
}

impl GeneratedBlock {
    /// Generate the Rust code for this block.
    pub fn generate_code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GeneratedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "// {}, Updated: {}",
            collapse_whitespace(&self.title),
            collapse_whitespace(&self.updated)
        )?;
        let ty = self.family.rust_type();
        for c in &self.constants {
            writeln!(
                f,
                "pub const {}: {ty} = {}; // {}",
                c.ident(),
                c.value,
                c.original_name
            )?;
        }
        Ok(())
    }
}
