// Licensed under the Apache-2.0 license

//! IANA registry to Rust constants generator.
//!
//! This crate converts the IANA XML registries relevant to BGP (capability
//! codes, address family numbers and SAFI values) into `pub const`
//! declarations that a protocol implementation can include verbatim.
//!
//! ## Usage
//!
//! ```no_run
//! use iana_registries_generator::{generate_all, SyntaxOnly, FAMILIES};
//!
//! struct Offline;
//!
//! impl iana_registries_generator::RegistrySource for Offline {
//!     fn fetch(&self, url: &str) -> anyhow::Result<String> {
//!         let file = url.rsplit('/').next().unwrap_or(url);
//!         Ok(std::fs::read_to_string(file)?)
//!     }
//! }
//!
//! let code = generate_all(FAMILIES, &Offline, &SyntaxOnly).unwrap();
//! println!("{code}");
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Decoded registry documents ([`RegistryDocument`])
//! - [`config`]: Per-family configuration and name normalization ([`FamilyConfig`])
//! - [`util`]: Whitespace and identifier helpers
//! - [`value`]: Bounded value parsing
//! - [`output`]: Constant records and the emitted code block
//! - `codegen`: Pipeline and public entry points

pub mod config;
pub mod output;
pub mod types;
pub mod util;
pub mod value;

mod codegen;

// Re-export main public API
pub use codegen::{
    escape, generate_all, generate_block, generate_from_xml, EscapeStats, RegistrySource,
    SourceFormatter, SyntaxOnly,
};
pub use config::{Family, FamilyConfig, NameNormalizer, FAMILIES};
pub use output::{ConstantRecord, GeneratedBlock, HEADER};
pub use types::{RawRecord, RegistryDocument, SubRegistry};
