//! Company entity, its input DTO, and field-level validation.
//!
//! Input JSON uses lower-case field names; the capitalised forms (`Name`,
//! `Employees`, ...) are accepted as aliases. Missing fields decode to their
//! zero value so that [`CompanyInput::validate`] reports the precise problem
//! instead of the body being rejected wholesale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::CompanyId;

// ---------------------------------------------------------------------------
// Company type
// ---------------------------------------------------------------------------

/// The legal form of a company.
///
/// Strings outside the four known forms decode into [`CompanyType::Unknown`]
/// and keep their original spelling, so validation can reject them with
/// [`CompanyValidationError::UnknownType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyType {
    Corporation,
    NonProfit,
    Cooperative,
    SoleProprietorship,
    Unknown(String),
}

/// A missing `type` field decodes as an empty, unknown type.
impl Default for CompanyType {
    fn default() -> Self {
        CompanyType::Unknown(String::new())
    }
}

impl CompanyType {
    pub const CORPORATION: &'static str = "corporation";
    pub const NON_PROFIT: &'static str = "non-profit";
    pub const COOPERATIVE: &'static str = "cooperative";
    pub const SOLE_PROPRIETORSHIP: &'static str = "sole-proprietorship";

    /// Wire / column representation.
    pub fn as_str(&self) -> &str {
        match self {
            CompanyType::Corporation => Self::CORPORATION,
            CompanyType::NonProfit => Self::NON_PROFIT,
            CompanyType::Cooperative => Self::COOPERATIVE,
            CompanyType::SoleProprietorship => Self::SOLE_PROPRIETORSHIP,
            CompanyType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CompanyType::Unknown(_))
    }
}

impl From<String> for CompanyType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            Self::CORPORATION => CompanyType::Corporation,
            Self::NON_PROFIT => CompanyType::NonProfit,
            Self::COOPERATIVE => CompanyType::Cooperative,
            Self::SOLE_PROPRIETORSHIP => CompanyType::SoleProprietorship,
            _ => CompanyType::Unknown(raw),
        }
    }
}

impl From<CompanyType> for String {
    fn from(kind: CompanyType) -> Self {
        match kind {
            CompanyType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity and DTO
// ---------------------------------------------------------------------------

/// A stored company, as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(alias = "ID")]
    pub id: CompanyId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description")]
    pub description: String,
    #[serde(alias = "Employees")]
    pub employees: i32,
    #[serde(alias = "Registered")]
    pub registered: bool,
    #[serde(rename = "type", alias = "Type")]
    pub kind: CompanyType,
}

/// Client-supplied company fields, used for both create and full update.
///
/// The identity is never part of the input: the store assigns it on insert
/// and the path carries it on update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInput {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description")]
    pub description: String,
    #[serde(alias = "Employees")]
    pub employees: i32,
    #[serde(alias = "Registered")]
    pub registered: bool,
    #[serde(rename = "type", alias = "Type")]
    pub kind: CompanyType,
}

impl Company {
    /// Attach an identity to validated input.
    pub fn from_input(id: CompanyId, input: CompanyInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            employees: input.employees,
            registered: input.registered,
            kind: input.kind,
        }
    }
}

impl From<Company> for CompanyInput {
    fn from(company: Company) -> Self {
        Self {
            name: company.name,
            description: company.description,
            employees: company.employees,
            registered: company.registered,
            kind: company.kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompanyValidationError {
    #[error("no name")]
    NoName,
    #[error("no employees")]
    NoEmployees,
    #[error("unknown type")]
    UnknownType,
}

impl CompanyInput {
    /// Check the field-level rules.
    ///
    /// Rules are checked in order (name, employees, type) and the first
    /// violation is returned. Only a zero head count is rejected.
    pub fn validate(&self) -> Result<(), CompanyValidationError> {
        if self.name.is_empty() {
            return Err(CompanyValidationError::NoName);
        }
        if self.employees == 0 {
            return Err(CompanyValidationError::NoEmployees);
        }
        if !self.kind.is_known() {
            return Err(CompanyValidationError::UnknownType);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid(kind: CompanyType) -> CompanyInput {
        CompanyInput {
            name: "Acme".to_string(),
            description: String::new(),
            employees: 5,
            registered: true,
            kind,
        }
    }

    #[test]
    fn all_known_types_pass() {
        for kind in [
            CompanyType::Corporation,
            CompanyType::NonProfit,
            CompanyType::Cooperative,
            CompanyType::SoleProprietorship,
        ] {
            assert!(valid(kind).validate().is_ok());
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let input = CompanyInput {
            name: String::new(),
            ..valid(CompanyType::Corporation)
        };
        assert_matches!(input.validate(), Err(CompanyValidationError::NoName));
    }

    #[test]
    fn zero_employees_is_rejected() {
        let input = CompanyInput {
            employees: 0,
            ..valid(CompanyType::Cooperative)
        };
        assert_matches!(input.validate(), Err(CompanyValidationError::NoEmployees));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let input = valid(CompanyType::from("partnership".to_string()));
        assert_matches!(input.validate(), Err(CompanyValidationError::UnknownType));
    }

    #[test]
    fn name_is_checked_before_employees() {
        let input = CompanyInput::default();
        assert_matches!(input.validate(), Err(CompanyValidationError::NoName));
    }

    #[test]
    fn empty_description_is_allowed() {
        let input = CompanyInput {
            description: String::new(),
            ..valid(CompanyType::NonProfit)
        };
        assert!(input.validate().is_ok());
    }

    // -- JSON ----------------------------------------------------------------

    #[test]
    fn decodes_lowercase_fields_with_defaults() {
        let input: CompanyInput =
            serde_json::from_str(r#"{"name":"Acme","employees":5,"type":"corporation"}"#)
                .unwrap();
        assert_eq!(input.name, "Acme");
        assert_eq!(input.description, "");
        assert_eq!(input.employees, 5);
        assert!(!input.registered);
        assert_eq!(input.kind, CompanyType::Corporation);
    }

    #[test]
    fn decodes_capitalised_aliases() {
        let input: CompanyInput = serde_json::from_str(
            r#"{"Name":"Acme","Employees":3,"Registered":true,"Type":"non-profit"}"#,
        )
        .unwrap();
        assert_eq!(input.name, "Acme");
        assert!(input.registered);
        assert_eq!(input.kind, CompanyType::NonProfit);
    }

    #[test]
    fn unknown_type_survives_decoding() {
        let input: CompanyInput =
            serde_json::from_str(r#"{"name":"Acme","employees":1,"type":"guild"}"#).unwrap();
        assert_eq!(input.kind, CompanyType::Unknown("guild".to_string()));
        assert_eq!(input.kind.as_str(), "guild");
    }

    #[test]
    fn type_serializes_as_kebab_string() {
        let json = serde_json::to_value(valid(CompanyType::SoleProprietorship)).unwrap();
        assert_eq!(json["type"], "sole-proprietorship");
    }

    #[test]
    fn validation_error_converts_to_core_validation() {
        let err: crate::error::CoreError = CompanyValidationError::NoEmployees.into();
        assert_matches!(err, crate::error::CoreError::Validation(msg) if msg == "no employees");
    }
}
