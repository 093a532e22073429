//! Enterprise fit derivation.

use super::types::{EnterpriseFit, Tier};

/// Derive enterprise fit from tier and flags.
///
/// Any fail-fast flag forces `Experimental` regardless of tier. Evidence
/// confidence plays no part.
pub fn enterprise_fit(tier: Tier, has_risk_flags: bool, has_fail_fast_flags: bool) -> EnterpriseFit {
    if has_fail_fast_flags {
        return EnterpriseFit::Experimental;
    }
    match tier {
        Tier::A | Tier::B if !has_risk_flags => EnterpriseFit::Regulated,
        Tier::A | Tier::B | Tier::C => EnterpriseFit::Standard,
        Tier::D => EnterpriseFit::Experimental,
    }
}
