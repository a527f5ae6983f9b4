// Licensed under the Apache-2.0 license

use super::*;
use crate::config::{Family, AFI, CAPABILITY, FAMILIES, SAFI};
use crate::types::{RawRecord, SubRegistry};
use crate::util::is_identifier_suffix;
use std::cell::RefCell;

const CAPABILITY_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<registry xmlns="http://www.iana.org/assignments" id="capability-codes">
  <title>Capability Codes</title>
  <category>Border Gateway Protocol (BGP) Parameters</category>
  <updated>2024-01-10</updated>
  <registry id="capability-codes-2">
    <title>Capability Codes</title>
    <xref type="rfc" data="rfc5492"/>
    <range>
      <value>1-63</value>
      <registration_rule>IETF Review</registration_rule>
    </range>
    <record>
      <value>0</value>
      <description>Reserved</description>
    </record>
    <record>
      <value>1</value>
      <description>Multiprotocol Extensions for BGP-4</description>
    </record>
    <record>
      <value>2</value>
      <description>Route Refresh Capability for BGP-4</description>
    </record>
    <record>
      <value>4</value>
      <description>Multiple routes to a destination capability (deprecated)</description>
    </record>
    <record>
      <value>64</value>
      <description>Graceful Restart Capability</description>
    </record>
    <record>
      <value>65</value>
      <description>Support for 4-octet AS number capability</description>
    </record>
    <record>
      <value>128</value>
      <description>Prestandard Route Refresh (deprecated)</description>
    </record>
    <record>
      <value>239-254</value>
      <description>Reserved for Experimental Use</description>
    </record>
    <record>
      <value>300</value>
      <description>Out Of Range Capability</description>
    </record>
  </registry>
  <registry id="capability-codes-3">
    <title>BGP Role Values</title>
    <record>
      <value>0</value>
      <description>Provider</description>
    </record>
  </registry>
</registry>
"#;

const AFI_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<registry xmlns="http://www.iana.org/assignments" id="address-family-numbers">
  <title>Address Family Numbers</title>
  <updated>2023-08-29</updated>
  <registry id="address-family-numbers-2">
    <title>Address Family Numbers</title>
    <record>
      <value>0</value>
      <description>Reserved</description>
    </record>
    <record>
      <value>1</value>
      <description>IP (IP version 4)</description>
    </record>
    <record>
      <value>2</value>
      <description>IP6 (IP version 6)</description>
    </record>
    <record>
      <value>29</value>
      <description>MT IP: Multi-Topology IP version 4</description>
    </record>
    <record>
      <value>26</value>
      <description>Gateway Identifier</description>
    </record>
    <record>
      <value>32</value>
      <description>Unassigned</description>
    </record>
    <record>
      <value>16388</value>
      <description>BGP-LS</description>
    </record>
    <record>
      <value>16399-32767</value>
      <description>Unassigned</description>
    </record>
    <record>
      <value>70000</value>
      <description>Too Wide</description>
    </record>
  </registry>
</registry>
"#;

const SAFI_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<registry xmlns="http://www.iana.org/assignments" id="safi-namespace">
  <title>Subsequent Address Family Identifiers (SAFI) Parameters</title>
  <updated>2024-02-20</updated>
  <registry id="safi-namespace-2">
    <title>SAFI Values</title>
    <record>
      <value>0</value>
      <description>Reserved</description>
    </record>
    <record>
      <value>1</value>
      <description>Network Layer Reachability Information used
for unicast forwarding</description>
    </record>
    <record>
      <value>3</value>
      <description>OBSOLETE</description>
    </record>
    <record>
      <value>5</value>
      <description>Multicast for BGP/MPLS IP Virtual Private
Networks (VPNs)</description>
    </record>
    <record>
      <value>133</value>
      <description>Dissemination of Flow Specification rules</description>
    </record>
    <record>
      <value>300</value>
      <description>Too Wide SAFI</description>
    </record>
  </registry>
</registry>
"#;

/// Serves canned documents and records which URLs were requested.
#[derive(Default)]
struct FakeSource {
    documents: Vec<(&'static str, &'static str)>,
    requested: RefCell<Vec<String>>,
}

impl FakeSource {
    fn standard() -> Self {
        Self {
            documents: vec![
                (CAPABILITY.url, CAPABILITY_XML),
                (AFI.url, AFI_XML),
                (SAFI.url, SAFI_XML),
            ],
            ..Default::default()
        }
    }
}

impl RegistrySource for FakeSource {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requested.borrow_mut().push(url.to_string());
        self.documents
            .iter()
            .find(|(u, _)| *u == url)
            .map(|(_, xml)| xml.to_string())
            .ok_or_else(|| anyhow!("got non-200 status (404)"))
    }
}

fn constants(xml: &str, config: &FamilyConfig) -> Vec<ConstantRecord> {
    generate_from_xml(xml, config).unwrap().constants
}

fn names(constants: &[ConstantRecord]) -> Vec<String> {
    constants.iter().map(|c| c.ident()).collect()
}

#[test]
fn test_capability_constants() {
    let constants = constants(CAPABILITY_XML, &CAPABILITY);
    assert_eq!(
        names(&constants),
        [
            "CAP_MP_EXTENSIONS",
            "CAP_ROUTE_REFRESH",
            "CAP_GRACEFUL_RESTART",
            "CAP_FOUR_OCTET_AS",
        ]
    );
    let four_octet = &constants[3];
    assert_eq!(four_octet.value, 65);
    assert_eq!(
        four_octet.original_name,
        "Support for 4-octet AS number capability"
    );
}

#[test]
fn test_capability_ignores_other_sub_registries() {
    let constants = constants(CAPABILITY_XML, &CAPABILITY);
    assert!(constants.iter().all(|c| c.original_name != "Provider"));
}

#[test]
fn test_afi_constants() {
    let constants = constants(AFI_XML, &AFI);
    assert_eq!(
        names(&constants),
        [
            "AFI_IPV4",
            "AFI_IPV6",
            "AFI_MT_IPV4",
            "AFI_GATEWAY_ID",
            "AFI_BGP_LS",
        ]
    );
    assert_eq!(constants[4].value, 16388);
    assert!(constants.iter().all(|c| c.family == Family::Afi));
}

#[test]
fn test_afi_unassigned_dropped_regardless_of_value() {
    let (_, stats) = escape(&RegistryDocument::from_xml(AFI_XML).unwrap(), &AFI).unwrap();
    assert_eq!(
        stats,
        EscapeStats {
            kept: 5,
            filtered: 3,
            invalid: 1,
            unnamed: 0,
        }
    );
}

#[test]
fn test_safi_constants() {
    let constants = constants(SAFI_XML, &SAFI);
    assert_eq!(
        names(&constants),
        [
            "SAFI_UNICAST",
            "SAFI_MULTICAST_BGP_MPLS_IP_VPNS",
            "SAFI_DISSEMINATION_OF_FLOWSPEC_RULES",
        ]
    );
    assert_eq!(
        constants[0].original_name,
        "Network Layer Reachability Information used for unicast forwarding"
    );
    assert_eq!(
        constants[1].original_name,
        "Multicast for BGP/MPLS IP Virtual Private Networks (VPNs)"
    );
}

#[test]
fn test_out_of_width_values_dropped() {
    for (xml, config) in [(CAPABILITY_XML, &CAPABILITY), (SAFI_XML, &SAFI)] {
        let constants = constants(xml, config);
        assert!(constants.iter().all(|c| c.value < 256));
        assert!(constants.iter().all(|c| !c.original_name.contains("Wide")
            && !c.original_name.contains("Out Of Range")));
    }
}

#[test]
fn test_filtered_records_never_emitted() {
    for (xml, config) in [
        (CAPABILITY_XML, &CAPABILITY),
        (AFI_XML, &AFI),
        (SAFI_XML, &SAFI),
    ] {
        for c in constants(xml, config) {
            assert!(config.is_eligible(&c.original_name), "{}", c.original_name);
            assert!(is_identifier_suffix(&c.name), "{}", c.name);
        }
    }
}

#[test]
fn test_registry_order_preserved() {
    // MT IP (29) precedes Gateway Identifier (26) in the document.
    let values: Vec<u64> = constants(AFI_XML, &AFI).iter().map(|c| c.value).collect();
    assert_eq!(values, [1, 2, 29, 26, 16388]);
}

#[test]
fn test_missing_sub_registry() {
    let doc = RegistryDocument {
        title: "Capability Codes".into(),
        updated: "2024-01-10".into(),
        registries: vec![
            SubRegistry {
                title: "First".into(),
                records: vec![],
            },
            SubRegistry {
                title: "Second".into(),
                records: vec![],
            },
        ],
    };
    let err = escape(&doc, &CAPABILITY).unwrap_err();
    assert!(err.to_string().contains("Capability Codes"));
}

#[test]
fn test_capability_ignores_lone_unrelated_registry() {
    let doc = RegistryDocument {
        title: "Capability Codes".into(),
        updated: "2024-01-10".into(),
        registries: vec![SubRegistry {
            title: "BGP Role Values".into(),
            records: vec![
                RawRecord {
                    value: "0".into(),
                    description: "Provider".into(),
                },
                RawRecord {
                    value: "1".into(),
                    description: "RS".into(),
                },
            ],
        }],
    };
    let err = escape(&doc, &CAPABILITY).unwrap_err();
    assert!(err.to_string().contains("Capability Codes"), "{err}");
}

#[test]
fn test_lone_registry_used_for_afi() {
    let doc = RegistryDocument {
        title: "Address Family Numbers".into(),
        updated: "2023-08-29".into(),
        registries: vec![SubRegistry {
            title: String::new(),
            records: vec![RawRecord {
                value: "1".into(),
                description: "IP (IP version 4)".into(),
            }],
        }],
    };
    let (constants, _) = escape(&doc, &AFI).unwrap();
    assert_eq!(names(&constants), ["AFI_IPV4"]);
}

#[test]
fn test_duplicate_identifier_is_an_error() {
    let doc = RegistryDocument {
        title: "Address Family Numbers".into(),
        updated: "2023-08-29".into(),
        registries: vec![SubRegistry {
            title: "Address Family Numbers".into(),
            records: vec![
                RawRecord {
                    value: "29".into(),
                    description: "MT IP: Multi-Topology IP version 4".into(),
                },
                RawRecord {
                    value: "40".into(),
                    description: "MT IPV4 (again)".into(),
                },
            ],
        }],
    };
    let err = escape(&doc, &AFI).unwrap_err().to_string();
    assert!(err.contains("AFI_MT_IPV4"), "{err}");
}

#[test]
fn test_generate_all() {
    let source = FakeSource::standard();
    let code = generate_all(FAMILIES, &source, &SyntaxOnly).unwrap();

    assert!(code.starts_with(HEADER));
    assert!(code.contains("// Capability Codes, Updated: 2024-01-10\n"));
    assert!(code.contains(
        "pub const CAP_FOUR_OCTET_AS: u8 = 65; // Support for 4-octet AS number capability\n"
    ));
    assert!(code.contains("pub const AFI_IPV6: u16 = 2; // IP6 (IP version 6)\n"));
    assert!(code.contains("pub const AFI_MT_IPV4: u16 = 29;"));
    assert!(code.contains("pub const SAFI_UNICAST: u8 = 1;"));
    assert!(!code.contains("AFI_MT_IP:"));

    let cap = code.find("CAP_MP_EXTENSIONS").unwrap();
    let afi = code.find("AFI_IPV4").unwrap();
    let safi = code.find("SAFI_UNICAST").unwrap();
    assert!(cap < afi && afi < safi);

    assert_eq!(
        *source.requested.borrow(),
        [CAPABILITY.url, AFI.url, SAFI.url]
    );
}

#[test]
fn test_generate_all_is_idempotent() {
    let first = generate_all(FAMILIES, &FakeSource::standard(), &SyntaxOnly).unwrap();
    let second = generate_all(FAMILIES, &FakeSource::standard(), &SyntaxOnly).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fetch_failure_aborts() {
    let source = FakeSource {
        documents: vec![(CAPABILITY.url, CAPABILITY_XML)],
        ..Default::default()
    };
    let err = generate_all(FAMILIES, &source, &SyntaxOnly).unwrap_err();
    assert!(format!("{err:#}").contains(AFI.url));
    // SAFI is never requested once AFI fails.
    assert_eq!(source.requested.borrow().len(), 2);
}

#[test]
fn test_decode_failure_names_url() {
    let source = FakeSource {
        documents: vec![(CAPABILITY.url, "<registry><title>")],
        ..Default::default()
    };
    let err = generate_all(FAMILIES, &source, &SyntaxOnly).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("error parsing response from"), "{msg}");
    assert!(msg.contains(CAPABILITY.url), "{msg}");
}

#[test]
fn test_formatter_failure_aborts() {
    struct Reject;
    impl SourceFormatter for Reject {
        fn format(&self, _source: &str) -> Result<String> {
            bail!("expected item")
        }
    }
    let err = generate_all(FAMILIES, &FakeSource::standard(), &Reject).unwrap_err();
    assert!(format!("{err:#}").contains("error formatting generated source"));
}

#[test]
fn test_syntax_only_rejects_invalid_rust() {
    assert!(SyntaxOnly.format("pub const X: u8 = ;").is_err());
    assert_eq!(
        SyntaxOnly.format("pub const X: u8 = 1; // x\n").unwrap(),
        "pub const X: u8 = 1; // x\n"
    );
}
