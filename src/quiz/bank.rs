use std::collections::BTreeMap;

use super::question::QuestionRecord;

const BUILTIN_BANK: &str = include_str!("../../data/questions.json");

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Questions grouped by tier identifier.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    tiers: BTreeMap<String, Vec<QuestionRecord>>,
}

impl QuestionBank {
    pub fn new(tiers: BTreeMap<String, Vec<QuestionRecord>>) -> Self {
        Self { tiers }
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The bank compiled into the binary.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_BANK)
    }

    /// Questions for `tier`; an unknown tier has none.
    pub fn tier(&self, tier: &str) -> &[QuestionRecord] {
        self.tiers.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tiers(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }
}
