//! Flag rule evaluation: a generic fact → flag table.

use posture_core::config::{RuleConfig, RuleKind};
use posture_core::errors::ScoringError;
use posture_core::types::{BTreeSet, EntityId, FxHashSet, RuleId};

use super::types::StructuralFacts;

/// One compiled flag rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRule {
    pub id: RuleId,
    pub fact: String,
    pub flag: String,
    pub kind: RuleKind,
}

impl From<&RuleConfig> for FlagRule {
    fn from(config: &RuleConfig) -> Self {
        Self {
            id: RuleId::new(config.id.clone()),
            fact: config.fact.clone(),
            flag: config.flag.clone(),
            kind: config.kind,
        }
    }
}

/// Flags raised for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaisedFlags {
    pub risk: BTreeSet<String>,
    pub fail_fast: BTreeSet<String>,
}

/// Ordered rule table, evaluated in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCatalog {
    rules: Vec<FlagRule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<FlagRule>) -> Result<Self, ScoringError> {
        let mut seen = FxHashSet::default();
        for rule in &rules {
            if !seen.insert(rule.id.clone()) {
                return Err(ScoringError::DuplicateRule(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    pub fn from_config(rules: &[RuleConfig]) -> Result<Self, ScoringError> {
        Self::new(rules.iter().map(FlagRule::from).collect())
    }

    pub fn rules(&self) -> &[FlagRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against an entity's facts.
    ///
    /// A rule naming a fact the entity does not define fails the whole
    /// entity rather than silently skipping the rule.
    pub fn evaluate(
        &self,
        entity_id: &EntityId,
        facts: &StructuralFacts,
    ) -> Result<RaisedFlags, ScoringError> {
        let mut raised = RaisedFlags::default();
        for rule in &self.rules {
            let holds = facts
                .get(&rule.fact)
                .copied()
                .ok_or_else(|| ScoringError::UndefinedFact {
                    entity_id: entity_id.clone(),
                    rule_id: rule.id.clone(),
                    fact: rule.fact.clone(),
                })?;
            if !holds {
                continue;
            }
            match rule.kind {
                RuleKind::Risk => raised.risk.insert(rule.flag.clone()),
                RuleKind::FailFast => raised.fail_fast.insert(rule.flag.clone()),
            };
        }
        Ok(raised)
    }
}
