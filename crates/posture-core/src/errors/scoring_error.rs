//! Trust scoring errors.

use super::error_code::{self, PostureErrorCode};
use crate::types::{EntityId, RuleId};

/// Errors that stop a single entity from being scored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("Rule {rule_id} references fact '{fact}' not defined for entity {entity_id}")]
    UndefinedFact {
        entity_id: EntityId,
        rule_id: RuleId,
        fact: String,
    },

    #[error("Duplicate flag rule id: {0}")]
    DuplicateRule(RuleId),
}

impl PostureErrorCode for ScoringError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UndefinedFact { .. } => error_code::UNDEFINED_FACT,
            Self::DuplicateRule(_) => error_code::SCORING_ERROR,
        }
    }
}
