//! Input records for classification

use serde::{Deserialize, Serialize};

/// The unit of input to classification: a free-text blob plus optional
/// structured hints mapped from the source row.
///
/// Records are read-only within the classifier. Callers are responsible for
/// truncating pathologically long `text` (a few KB is plenty) to bound
/// scan latency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Primary free-text blob to scan (may be empty)
    pub text: String,

    /// ISO-3166 alpha-2 country hint from structured data
    /// (e.g. a contractor_country column)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_country_code: Option<String>,

    /// Address string from structured data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Legal-entity suffix hint (e.g. "GmbH", "Co., Ltd.")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_suffix_hint: Option<String>,

    /// Opaque identifier for traceability; never interpreted by the classifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Record {
    /// Create a new record from free text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Attach a declared country code
    pub fn with_country(mut self, code: impl Into<String>) -> Self {
        self.declared_country_code = Some(code.into());
        self
    }

    /// Attach an address string
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach a legal-entity suffix hint
    pub fn with_legal_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.legal_suffix_hint = Some(suffix.into());
        self
    }

    /// Attach a source identifier for re-association by the caller
    pub fn with_source_id(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }
}
