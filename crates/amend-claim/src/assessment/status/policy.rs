use std::collections::BTreeSet;

use super::super::domain::{ClaimAggregate, ClaimKind};

/// Fee codes that allow assessed totals to be entered on Crime claims.
pub const DEFAULT_VALID_FEE_CODES: [&str; 1] = ["INVC"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeCodePolicy {
    valid_codes: BTreeSet<String>,
}

impl FeeCodePolicy {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid_codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_valid_code(&self, fee_code: Option<&str>) -> bool {
        fee_code.is_some_and(|code| self.valid_codes.contains(code.trim()))
    }

    /// Only Crime claims carrying a recognised fixed-fee code get editable
    /// assessed totals; Civil claims never do.
    pub fn assessed_totals_eligible(&self, aggregate: &ClaimAggregate) -> bool {
        match aggregate.kind() {
            ClaimKind::Crime => self.is_valid_code(aggregate.details().fee_code.as_deref()),
            ClaimKind::Civil => false,
        }
    }
}

impl Default for FeeCodePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VALID_FEE_CODES)
    }
}
