//! Control gap classifier.
//!
//! coverage = 1 − Σ unmet / Σ weight, clamped to [0, 1]
//!
//! Unmet weight is the full weight for a hard gap and
//! `weight × (1 − observed / min)` for a soft gap. A capability absent from
//! the index is always a hard gap, even when required softly.

use posture_core::errors::input_warning::clamp_unit;
use posture_core::errors::{CatalogError, Checked, InputWarning};
use posture_core::types::{CapabilityId, FxHashSet};

use super::index::CapabilityIndex;
use super::types::*;
use crate::catalog::Catalog;

/// Classifies one control's requirements against a capability index.
pub struct GapClassifier;

impl GapClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a control. Gaps are emitted in declared requirement order,
    /// so identical inputs always produce identical records.
    pub fn classify(&self, control: &Control, index: &CapabilityIndex) -> Checked<GapRecord> {
        let (requirements, warnings) = normalize_requirements(control);

        let mut hard_gaps = Vec::new();
        let mut soft_gaps = Vec::new();
        let mut total_weight = 0.0;
        let mut unmet_weight = 0.0;

        for requirement in &requirements {
            total_weight += requirement.weight();
            match requirement {
                Requirement::Hard {
                    capability_id,
                    weight,
                } => {
                    if !index.contains(capability_id.as_str()) {
                        hard_gaps.push(HardGap {
                            capability_id: capability_id.clone(),
                            weight: *weight,
                        });
                        unmet_weight += weight;
                    }
                }
                Requirement::Soft {
                    capability_id,
                    weight,
                    min_strength,
                } => match index.strength(capability_id.as_str()) {
                    None => {
                        hard_gaps.push(HardGap {
                            capability_id: capability_id.clone(),
                            weight: *weight,
                        });
                        unmet_weight += weight;
                    }
                    Some(observed) if observed < *min_strength => {
                        soft_gaps.push(SoftGap {
                            capability_id: capability_id.clone(),
                            weight: *weight,
                            observed_strength: observed,
                            min_strength: *min_strength,
                        });
                        unmet_weight += weight * (1.0 - observed / min_strength);
                    }
                    Some(_) => {}
                },
            }
        }

        let coverage = if total_weight > 0.0 {
            (1.0 - unmet_weight / total_weight).clamp(0.0, 1.0)
        } else {
            1.0
        };

        tracing::debug!(
            control_id = %control.id,
            coverage,
            hard_gaps = hard_gaps.len(),
            soft_gaps = soft_gaps.len(),
            "control classified"
        );

        Checked::with_warnings(
            GapRecord {
                control_id: control.id.clone(),
                coverage,
                hard_gaps,
                soft_gaps,
            },
            warnings,
        )
    }

    /// Classify a control after checking every requirement against the
    /// capability catalog. A reference to an unknown capability fails this
    /// control only.
    pub fn classify_in_catalog(
        &self,
        catalog: &Catalog,
        control: &Control,
        index: &CapabilityIndex,
    ) -> Result<Checked<GapRecord>, CatalogError> {
        catalog.check_control(control)?;
        Ok(self.classify(control, index))
    }
}

impl Default for GapClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp weights and minimum strengths to [0, 1] and drop requirements that
/// repeat a capability already required earlier in the same control.
fn normalize_requirements(control: &Control) -> (Vec<Requirement>, Vec<InputWarning>) {
    let mut seen: FxHashSet<&CapabilityId> = FxHashSet::default();
    let mut requirements = Vec::with_capacity(control.requirements.len());
    let mut warnings = Vec::new();

    for requirement in &control.requirements {
        let capability_id = requirement.capability_id();
        if !seen.insert(capability_id) {
            tracing::warn!(
                control_id = %control.id,
                capability_id = %capability_id,
                "duplicate capability requirement ignored"
            );
            warnings.push(InputWarning::DuplicateRequirement {
                control_id: control.id.clone(),
                capability_id: capability_id.clone(),
            });
            continue;
        }

        let (weight, weight_clamped) = clamp_unit(requirement.weight());
        if weight_clamped {
            tracing::warn!(
                control_id = %control.id,
                capability_id = %capability_id,
                original = requirement.weight(),
                "requirement weight out of range; clamped"
            );
            warnings.push(InputWarning::WeightClamped {
                control_id: control.id.clone(),
                capability_id: capability_id.clone(),
                original: requirement.weight(),
                clamped: weight,
            });
        }

        let normalized = match requirement {
            Requirement::Hard { capability_id, .. } => Requirement::Hard {
                capability_id: capability_id.clone(),
                weight,
            },
            Requirement::Soft {
                capability_id,
                min_strength,
                ..
            } => {
                let (min, min_clamped) = clamp_unit(*min_strength);
                if min_clamped {
                    tracing::warn!(
                        control_id = %control.id,
                        capability_id = %capability_id,
                        original = *min_strength,
                        "requirement min strength out of range; clamped"
                    );
                    warnings.push(InputWarning::MinStrengthClamped {
                        control_id: control.id.clone(),
                        capability_id: capability_id.clone(),
                        original: *min_strength,
                        clamped: min,
                    });
                }
                Requirement::Soft {
                    capability_id: capability_id.clone(),
                    weight,
                    min_strength: min,
                }
            }
        };
        requirements.push(normalized);
    }

    (requirements, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_requirement_first_declaration_wins() {
        let control = Control::new(
            "C-1",
            "PR.AC",
            "Access control",
            vec![
                Requirement::soft("mfa", 0.5, 0.8),
                Requirement::hard("mfa", 1.0),
            ],
        );
        let (reqs, warnings) = normalize_requirements(&control);
        assert_eq!(reqs, vec![Requirement::soft("mfa", 0.5, 0.8)]);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_weights_and_min_strength_clamped() {
        let control = Control::new(
            "C-1",
            "PR.AC",
            "Access control",
            vec![Requirement::soft("mfa", 1.5, -0.1)],
        );
        let (reqs, warnings) = normalize_requirements(&control);
        assert_eq!(reqs, vec![Requirement::soft("mfa", 1.0, 0.0)]);
        assert_eq!(warnings.len(), 2);
    }
}
