use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

fn two_ascii_letters(raw: &str) -> bool {
    raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_alphabetic())
}

/// ISO-3166-1 alpha-2 country code, stored upper-case (`AU`, `US`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if !two_ascii_letters(trimmed) {
            return Err(ModelError::InvalidRegion(raw.to_string()));
        }
        Ok(RegionCode(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RegionCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionCode::new(s)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RegionCode::new(&value)
    }
}

impl From<RegionCode> for String {
    fn from(value: RegionCode) -> Self {
        value.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO-639-1 language code, stored lower-case (`en`, `ja`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if !two_ascii_letters(trimmed) {
            return Err(ModelError::InvalidLanguage(raw.to_string()));
        }
        Ok(LanguageCode(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LanguageCode::new(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
