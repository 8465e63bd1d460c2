//! Brand domains served by the assistant.
//!
//! Each domain is a business unit with its own knowledge base and intents:
//! food delivery (al-barakah), education consultancy (malisha-edu),
//! travel/visa services (easylink), and healthcare (brcc).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A brand/business unit the assistant serves.
///
/// Wire format is the kebab-case slug the backend uses (`al-barakah`,
/// `malisha-edu`, `easylink`, `brcc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    /// Food delivery.
    AlBarakah,
    /// Education consultancy.
    MalishaEdu,
    /// Travel and visa services.
    Easylink,
    /// Healthcare.
    Brcc,
}

/// Error returned when parsing an unknown domain slug.
#[derive(Debug, Error)]
#[error("unknown domain: {0} (expected one of al-barakah, malisha-edu, easylink, brcc)")]
pub struct DomainParseError(String);

impl Domain {
    /// All domains, for pickers and overrides.
    pub const ALL: [Self; 4] = [
        Self::AlBarakah,
        Self::MalishaEdu,
        Self::Easylink,
        Self::Brcc,
    ];

    /// The wire slug for this domain.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlBarakah => "al-barakah",
            Self::MalishaEdu => "malisha-edu",
            Self::Easylink => "easylink",
            Self::Brcc => "brcc",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "al-barakah" => Ok(Self::AlBarakah),
            "malisha-edu" => Ok(Self::MalishaEdu),
            "easylink" => Ok(Self::Easylink),
            "brcc" => Ok(Self::Brcc),
            other => Err(DomainParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_slug_roundtrip() {
        for domain in Domain::ALL {
            let parsed: Domain = domain.as_str().parse().expect("parse slug");
            assert_eq!(parsed, domain);
        }
    }

    #[test]
    fn test_domain_serde_uses_slug() {
        let json = serde_json::to_string(&Domain::MalishaEdu).expect("serialize");
        assert_eq!(json, "\"malisha-edu\"");
        let back: Domain = serde_json::from_str("\"al-barakah\"").expect("deserialize");
        assert_eq!(back, Domain::AlBarakah);
    }

    #[test]
    fn test_unknown_domain_is_rejected() {
        let err = "shopify".parse::<Domain>().expect_err("should fail");
        assert!(err.to_string().contains("shopify"));
    }
}
