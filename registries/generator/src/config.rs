// Licensed under the Apache-2.0 license

//! Per-family configuration for filtering and naming registry records.
//!
//! Each registry family (capability codes, AFI, SAFI) differs only in data:
//! which descriptions are skipped, which descriptions get hand-picked names,
//! which literal replacements the generic name pipeline applies, and how wide
//! the emitted integer type is. [`FamilyConfig`] captures that data and
//! [`NameNormalizer`] runs the shared pipeline over it.
//!
//! # Example
//!
//! ```
//! use iana_registries_generator::config::{NameNormalizer, AFI};
//!
//! let normalizer = NameNormalizer::new(&AFI).unwrap();
//! assert_eq!(normalizer.normalize("IP6 (IP version 6)").unwrap(), "IPV6");
//! assert_eq!(normalizer.normalize("Gateway Identifier").unwrap(), "GATEWAY_ID");
//! ```

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::{Context, Result};
use std::fmt;

use crate::util::{collapse_whitespace, sanitize_identifier, truncate_before};

/// The registry families constants are generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Capability,
    Afi,
    Safi,
}

impl Family {
    /// Prefix of every constant emitted for this family.
    pub fn prefix(self) -> &'static str {
        match self {
            Family::Capability => "CAP",
            Family::Afi => "AFI",
            Family::Safi => "SAFI",
        }
    }

    /// Width in bits of the family's code points.
    pub fn bits(self) -> u32 {
        match self {
            Family::Capability | Family::Safi => 8,
            Family::Afi => 16,
        }
    }

    /// Rust integer type of the emitted constants.
    pub fn rust_type(self) -> &'static str {
        match self {
            Family::Capability | Family::Safi => "u8",
            Family::Afi => "u16",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Capability => "capability",
            Family::Afi => "AFI",
            Family::Safi => "SAFI",
        })
    }
}

/// Everything that distinguishes one registry family from another.
#[derive(Clone, Copy, Debug)]
pub struct FamilyConfig {
    pub family: Family,
    /// Location of the registry document.
    pub url: &'static str,
    /// Title of the nested registry holding the records.
    pub sub_registry: &'static str,
    /// Accept a document's only nested registry when its title differs.
    pub sole_registry_fallback: bool,
    /// Records whose description contains any of these (case-sensitive) are skipped.
    pub excluded_markers: &'static [&'static str],
    /// Exact description to identifier mappings, checked before the generic pipeline.
    pub overrides: &'static [(&'static str, &'static str)],
    /// Drop parenthetical qualifiers and colon suffixes before replacing.
    pub truncate_qualifiers: bool,
    /// Literal replacements; at each position the first listed match wins.
    pub replacements: &'static [(&'static str, &'static str)],
}

impl FamilyConfig {
    /// Returns the marker that excludes `description`, if any.
    pub fn excluded_by(&self, description: &str) -> Option<&'static str> {
        self.excluded_markers
            .iter()
            .copied()
            .find(|marker| description.contains(marker))
    }

    /// Returns true if a record with this description may produce a constant.
    pub fn is_eligible(&self, description: &str) -> bool {
        self.excluded_by(description).is_none()
    }

    /// Looks up the hand-picked identifier for `description`.
    pub fn override_for(&self, description: &str) -> Option<&'static str> {
        self.overrides
            .iter()
            .find(|(key, _)| *key == description)
            .map(|(_, name)| *name)
    }
}

pub const CAPABILITY: FamilyConfig = FamilyConfig {
    family: Family::Capability,
    url: "https://www.iana.org/assignments/capability-codes/capability-codes.xml",
    sub_registry: "Capability Codes",
    sole_registry_fallback: false,
    excluded_markers: &["Reserved", "deprecated", "Deprecated"],
    overrides: &[
        ("Multiprotocol Extensions for BGP-4", "MP_EXTENSIONS"),
        ("BGP Extended Message", "EXT_MESSSAGE"),
        ("BGP Role", "ROLE"),
        ("Support for 4-octet AS number capability", "FOUR_OCTET_AS"),
        (
            "Support for Dynamic Capability (capability specific)",
            "DYNAMIC",
        ),
        ("Multisession BGP Capability", "MULTISESSION"),
        ("Long-Lived Graceful Restart (LLGR) Capability", "LLGR"),
        ("Routing Policy Distribution", "ROUTING_POLICY_DIST"),
    ],
    truncate_qualifiers: false,
    replacements: &[
        (" for BGP-4", ""),
        (" Capability", ""),
        (" ", "_"),
        ("-", "_"),
    ],
};

pub const AFI: FamilyConfig = FamilyConfig {
    family: Family::Afi,
    url: "https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xml",
    sub_registry: "Address Family Numbers",
    sole_registry_fallback: true,
    excluded_markers: &["Reserved", "Unassigned"],
    overrides: &[
        ("IP (IP version 4)", "IPV4"),
        ("IP6 (IP version 6)", "IPV6"),
        ("E.164 with NSAP format subaddress", "E164_WITH_NSAP_SUBADDR"),
        ("XTP over IP version 4", "XTP_OVER_IPV4"),
        ("XTP over IP version 6", "XTP_OVER_IPV6"),
        ("XTP native mode XTP", "XTP_NATIVE"),
        ("Fibre Channel World-Wide Port Name", "FIBRE_CHANNEL_WWPN"),
        ("Fibre Channel World-Wide Node Name", "FIBRE_CHANNEL_WWNN"),
        ("AFI for L2VPN information", "L2VPN_INFO"),
        ("MT IP: Multi-Topology IP version 4", "MT_IPV4"),
        ("MT IPv6: Multi-Topology IP version 6", "MT_IPV6"),
        ("LISP Canonical Address Format (LCAF)", "LCAF"),
        ("MAC/24", "MAC_FINAL_24_BITS"),
        ("MAC/40", "MAC_FINAL_40_BITS"),
        ("IPv6/64", "IPV6_INITIAL_64_BITS"),
        ("Routing Policy AFI", "ROUTING_POLICY"),
        ("Universally Unique Identifier (UUID)", "UUID"),
    ],
    truncate_qualifiers: true,
    replacements: &[("Identifier", "ID"), (" ", "_"), (".", ""), ("-", "_")],
};

// SAFI override keys are the whitespace-collapsed form of entries the registry
// wraps across several lines.
pub const SAFI: FamilyConfig = FamilyConfig {
    family: Family::Safi,
    url: "https://www.iana.org/assignments/safi-namespace/safi-namespace.xml",
    sub_registry: "SAFI Values",
    sole_registry_fallback: true,
    excluded_markers: &["Reserved", "Unassigned", "OBSOLETE"],
    overrides: &[
        (
            "Network Layer Reachability Information used for unicast forwarding",
            "UNICAST",
        ),
        (
            "Network Layer Reachability Information used for multicast forwarding",
            "MULTICAST",
        ),
        (
            "Network Layer Reachability Information (NLRI) with MPLS Labels",
            "MPLS",
        ),
        (
            "Network Layer Reachability Information used for Dynamic Placement of Multi-Segment Pseudowires",
            "DYN_PLACEMENT_MULTI_SEGMENT_PW",
        ),
        ("Virtual Private LAN Service (VPLS)", "VPLS"),
        (
            "Layer-1 VPN auto-discovery information",
            "LAYER_1_VPN_AUTO_DISCOVERY_INFO",
        ),
        ("MPLS-labeled VPN address", "MPLS_LABELED_VPN_ADDR"),
        (
            "Multicast for BGP/MPLS IP Virtual Private Networks (VPNs)",
            "MULTICAST_BGP_MPLS_IP_VPNS",
        ),
    ],
    truncate_qualifiers: true,
    replacements: &[
        (" SAFI", ""),
        ("Flow Specification", "FLOWSPEC"),
        (" ", "_"),
        (".", ""),
        ("-", "_"),
        ("/", ""),
    ],
};

/// All families, in the order their blocks appear in the generated file.
pub const FAMILIES: &[FamilyConfig] = &[CAPABILITY, AFI, SAFI];

/// Maps registry descriptions to identifier suffixes for one family.
pub struct NameNormalizer<'a> {
    config: &'a FamilyConfig,
    replacer: AhoCorasick,
    replace_with: Vec<&'static str>,
}

impl<'a> NameNormalizer<'a> {
    pub fn new(config: &'a FamilyConfig) -> Result<Self> {
        let replacer = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(config.replacements.iter().map(|(from, _)| *from))
            .with_context(|| format!("invalid {} replacement table", config.family))?;
        Ok(Self {
            config,
            replacer,
            replace_with: config.replacements.iter().map(|(_, to)| *to).collect(),
        })
    }

    /// Computes the identifier suffix for `description`.
    ///
    /// Whitespace runs are collapsed before the override lookup, so multi-line
    /// registry entries match their single-line override keys. Returns `None`
    /// when the generic pipeline leaves nothing usable.
    pub fn normalize(&self, description: &str) -> Option<String> {
        let description = collapse_whitespace(description);
        if let Some(name) = self.config.override_for(&description) {
            return Some(name.to_string());
        }

        let mut s = description.as_str();
        if self.config.truncate_qualifiers {
            s = truncate_before(s, '(');
            s = truncate_before(s, ':');
        }
        let replaced = self.replacer.replace_all(s.trim(), self.replace_with.as_slice());
        let name = sanitize_identifier(&replaced.to_uppercase());
        (!name.is_empty()).then_some(name)
    }
}
