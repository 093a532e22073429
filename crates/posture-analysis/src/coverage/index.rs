//! Capability index: capability → best strength among enabled tools.

use posture_core::errors::input_warning::clamp_unit;
use posture_core::errors::{Checked, InputWarning};
use posture_core::types::{CapabilityId, FxHashMap};

use super::types::Tool;

/// Lookup from capability to the best strength any enabled tool provides.
///
/// Derived from a tool inventory on demand; never persisted on its own.
/// A capability absent from the index is provided by no enabled tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapabilityIndex {
    strengths: FxHashMap<CapabilityId, f64>,
}

impl CapabilityIndex {
    /// Build the index from a tool inventory. Disabled tools are skipped;
    /// out-of-range strengths are clamped to `[0, 1]`.
    pub fn build(tools: &[Tool]) -> Self {
        Self::build_checked(tools).data
    }

    /// Build the index, reporting every clamped strength as a warning.
    pub fn build_checked(tools: &[Tool]) -> Checked<Self> {
        let mut index = Self::default();
        let mut warnings = Vec::new();

        for tool in tools.iter().filter(|t| t.enabled) {
            for cap in &tool.capabilities {
                let (strength, clamped) = clamp_unit(cap.strength);
                if clamped {
                    tracing::warn!(
                        tool_id = %tool.id,
                        capability_id = %cap.capability_id,
                        original = cap.strength,
                        "tool strength out of range; clamped"
                    );
                    warnings.push(InputWarning::StrengthClamped {
                        tool_id: tool.id.clone(),
                        capability_id: cap.capability_id.clone(),
                        original: cap.strength,
                        clamped: strength,
                    });
                }
                index.insert_max(&cap.capability_id, strength);
            }
        }

        Checked::with_warnings(index, warnings)
    }

    fn insert_max(&mut self, capability_id: &CapabilityId, strength: f64) {
        match self.strengths.get_mut(capability_id.as_str()) {
            Some(best) => *best = best.max(strength),
            None => {
                self.strengths.insert(capability_id.clone(), strength);
            }
        }
    }

    /// Best strength for a capability, or `None` when no enabled tool has it.
    pub fn strength(&self, capability_id: &str) -> Option<f64> {
        self.strengths.get(capability_id).copied()
    }

    pub fn contains(&self, capability_id: &str) -> bool {
        self.strengths.contains_key(capability_id)
    }

    pub fn len(&self) -> usize {
        self.strengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
    }

    /// Entries sorted by capability id.
    pub fn entries(&self) -> Vec<(&CapabilityId, f64)> {
        let mut entries: Vec<_> = self.strengths.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl FromIterator<(CapabilityId, f64)> for CapabilityIndex {
    /// Collect raw `(capability, strength)` pairs, keeping the max per capability.
    fn from_iter<I: IntoIterator<Item = (CapabilityId, f64)>>(iter: I) -> Self {
        let mut index = Self::default();
        for (id, strength) in iter {
            index.insert_max(&id, clamp_unit(strength).0);
        }
        index
    }
}
