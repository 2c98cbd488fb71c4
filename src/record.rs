use std::net::IpAddr;
use std::time::Duration;

use crate::error::ProviderError;

/// Preference used for MX values that carry no leading integer.
pub const DEFAULT_MX_PREFERENCE: u16 = 10;

/// A or AAAA record, depending on the address family of `ip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub name: String,
    pub ttl: Duration,
    pub ip: IpAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txt {
    pub name: String,
    pub ttl: Duration,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cname {
    pub name: String,
    pub ttl: Duration,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mx {
    pub name: String,
    pub ttl: Duration,
    pub preference: u16,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ns {
    pub name: String,
    pub ttl: Duration,
    pub target: String,
}

/// Generic record in the canonical name/type/data/ttl shape. Every typed
/// variant projects onto this, and records with an unrecognized type tag
/// round-trip through it with `data` kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rr {
    pub name: String,
    pub rtype: String,
    pub data: String,
    pub ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Address(Address),
    Txt(Txt),
    Cname(Cname),
    Mx(Mx),
    Ns(Ns),
    Rr(Rr),
}

impl Record {
    /// Projects the record onto its generic name/type/data/ttl shape.
    pub fn rr(&self) -> Rr {
        match self {
            Record::Address(a) => Rr {
                name: a.name.clone(),
                rtype: if a.ip.is_ipv4() { "A" } else { "AAAA" }.to_string(),
                data: a.ip.to_string(),
                ttl: a.ttl,
            },
            Record::Txt(t) => Rr {
                name: t.name.clone(),
                rtype: "TXT".to_string(),
                data: t.text.clone(),
                ttl: t.ttl,
            },
            Record::Cname(c) => Rr {
                name: c.name.clone(),
                rtype: "CNAME".to_string(),
                data: c.target.clone(),
                ttl: c.ttl,
            },
            Record::Mx(m) => Rr {
                name: m.name.clone(),
                rtype: "MX".to_string(),
                data: format!("{} {}", m.preference, m.target),
                ttl: m.ttl,
            },
            Record::Ns(n) => Rr {
                name: n.name.clone(),
                rtype: "NS".to_string(),
                data: n.target.clone(),
                ttl: n.ttl,
            },
            Record::Rr(rr) => rr.clone(),
        }
    }
}

impl Rr {
    /// Converts to the most specific typed variant. The type tag is matched
    /// case-insensitively; an A/AAAA value that does not parse as an IP
    /// address is an error.
    pub fn try_typed(&self) -> Result<Record, ProviderError> {
        match self.rtype.to_ascii_uppercase().as_str() {
            "A" | "AAAA" => {
                let ip: IpAddr =
                    self.data
                        .parse()
                        .map_err(|source| ProviderError::InvalidValue {
                            name: self.name.clone(),
                            value: self.data.clone(),
                            source,
                        })?;
                Ok(Record::Address(Address {
                    name: self.name.clone(),
                    ttl: self.ttl,
                    ip,
                }))
            }
            "TXT" => Ok(Record::Txt(Txt {
                name: self.name.clone(),
                ttl: self.ttl,
                text: self.data.clone(),
            })),
            "CNAME" => Ok(Record::Cname(Cname {
                name: self.name.clone(),
                ttl: self.ttl,
                target: self.data.clone(),
            })),
            "MX" => {
                let (preference, target) = parse_mx_data(&self.data);
                Ok(Record::Mx(Mx {
                    name: self.name.clone(),
                    ttl: self.ttl,
                    preference,
                    target,
                }))
            }
            "NS" => Ok(Record::Ns(Ns {
                name: self.name.clone(),
                ttl: self.ttl,
                target: self.data.clone(),
            })),
            _ => Ok(Record::Rr(self.clone())),
        }
    }

    /// Best-effort conversion used after writes: an A/AAAA value that does
    /// not parse stays generic instead of failing.
    pub fn typed_lossy(self) -> Record {
        self.try_typed().unwrap_or(Record::Rr(self))
    }
}

/// Splits an MX data string into preference and target. Accepts
/// "10 mail.example.com" as well as a bare "mail.example.com"; if the first
/// token is not a u16 the whole value is the target.
fn parse_mx_data(data: &str) -> (u16, String) {
    let parts: Vec<&str> = data.split_whitespace().collect();
    if parts.len() >= 2 {
        if let Ok(preference) = parts[0].parse::<u16>() {
            return (preference, parts[1..].join(" "));
        }
    }
    (DEFAULT_MX_PREFERENCE, data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn rr(rtype: &str, data: &str) -> Rr {
        Rr {
            name: "test".to_string(),
            rtype: rtype.to_string(),
            data: data.to_string(),
            ttl: Duration::from_secs(300),
        }
    }

    #[test]
    fn test_a_record_typed() {
        let record = rr("A", "192.0.2.1").try_typed().unwrap();
        assert_matches!(record, Record::Address(a) => {
            assert_eq!(a.ip, "192.0.2.1".parse::<IpAddr>().unwrap());
            assert_eq!(a.name, "test");
            assert_eq!(a.ttl, Duration::from_secs(300));
        });
    }

    #[test]
    fn test_aaaa_record_typed() {
        let record = rr("AAAA", "2001:db8::1").try_typed().unwrap();
        assert_matches!(record, Record::Address(a) => {
            assert!(a.ip.is_ipv6());
        });
    }

    #[test]
    fn test_invalid_ip_is_an_error() {
        let err = rr("A", "not-an-ip").try_typed().unwrap_err();
        assert_matches!(err, ProviderError::InvalidValue { value, .. } => {
            assert_eq!(value, "not-an-ip");
        });
    }

    #[test]
    fn test_invalid_ip_stays_generic_in_lossy_mode() {
        let record = rr("A", "not-an-ip").typed_lossy();
        assert_matches!(record, Record::Rr(generic) => {
            assert_eq!(generic.data, "not-an-ip");
            assert_eq!(generic.rtype, "A");
        });
    }

    #[test]
    fn test_type_tag_is_case_insensitive() {
        let record = rr("txt", "hello").try_typed().unwrap();
        assert_matches!(record, Record::Txt(t) => assert_eq!(t.text, "hello"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_generic() {
        let input = rr("SRV", "0 5 5060 sip.example.com");
        let record = input.try_typed().unwrap();
        assert_eq!(record, Record::Rr(input));
    }

    #[test]
    fn test_mx_with_preference() {
        let record = rr("MX", "10 mail.example.com").try_typed().unwrap();
        assert_matches!(record, Record::Mx(mx) => {
            assert_eq!(mx.preference, 10);
            assert_eq!(mx.target, "mail.example.com");
        });
    }

    #[test]
    fn test_mx_without_preference_uses_default() {
        let record = rr("MX", "mail.example.com").try_typed().unwrap();
        assert_matches!(record, Record::Mx(mx) => {
            assert_eq!(mx.preference, DEFAULT_MX_PREFERENCE);
            assert_eq!(mx.target, "mail.example.com");
        });
    }

    #[test]
    fn test_mx_with_non_numeric_first_token() {
        // The whole value becomes the target, spacing preserved.
        let record = rr("MX", "abc mail.example.com").try_typed().unwrap();
        assert_matches!(record, Record::Mx(mx) => {
            assert_eq!(mx.preference, DEFAULT_MX_PREFERENCE);
            assert_eq!(mx.target, "abc mail.example.com");
        });
    }

    #[test]
    fn test_round_trip_preserves_every_variant() {
        let records = vec![
            Record::Address(Address {
                name: "www".to_string(),
                ttl: Duration::from_secs(60),
                ip: "198.51.100.7".parse().unwrap(),
            }),
            Record::Address(Address {
                name: "www6".to_string(),
                ttl: Duration::from_secs(60),
                ip: "2001:db8::7".parse().unwrap(),
            }),
            Record::Txt(Txt {
                name: "_acme-challenge".to_string(),
                ttl: Duration::from_secs(120),
                text: "token-value".to_string(),
            }),
            Record::Cname(Cname {
                name: "alias".to_string(),
                ttl: Duration::from_secs(3600),
                target: "canonical.example.com".to_string(),
            }),
            Record::Mx(Mx {
                name: "@".to_string(),
                ttl: Duration::from_secs(3600),
                preference: 20,
                target: "mx2.example.com".to_string(),
            }),
            Record::Ns(Ns {
                name: "@".to_string(),
                ttl: Duration::from_secs(86400),
                target: "ns1.example.com".to_string(),
            }),
            Record::Rr(Rr {
                name: "_sip._tcp".to_string(),
                rtype: "SRV".to_string(),
                data: "0 5 5060 sip.example.com".to_string(),
                ttl: Duration::from_secs(600),
            }),
        ];

        for record in records {
            let round_tripped = record.rr().try_typed().unwrap();
            assert_eq!(round_tripped, record);
        }
    }

    #[test]
    fn test_address_projection_picks_family_tag() {
        let v4 = Record::Address(Address {
            name: "www".to_string(),
            ttl: Duration::from_secs(60),
            ip: "192.0.2.1".parse().unwrap(),
        });
        assert_eq!(v4.rr().rtype, "A");

        let v6 = Record::Address(Address {
            name: "www".to_string(),
            ttl: Duration::from_secs(60),
            ip: "2001:db8::1".parse().unwrap(),
        });
        assert_eq!(v6.rr().rtype, "AAAA");
    }

    #[test]
    fn test_mx_projection_encodes_preference() {
        let mx = Record::Mx(Mx {
            name: "@".to_string(),
            ttl: Duration::from_secs(300),
            preference: 5,
            target: "mail.example.com".to_string(),
        });
        assert_eq!(mx.rr().data, "5 mail.example.com");
    }
}
