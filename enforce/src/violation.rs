//! Collected contract violations.

use crate::error::ContractViolation;
use mandate_core::MemberKind;

/// Every violation found by an audit, in check order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations {
    violations: Vec<ContractViolation>,
}

impl Violations {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: ContractViolation) {
        self.violations.push(violation);
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Get all violations.
    pub fn all(&self) -> &[ContractViolation] {
        &self.violations
    }

    /// Violations on constants.
    pub fn constants(&self) -> impl Iterator<Item = &ContractViolation> {
        self.of_kind(MemberKind::Constant)
    }

    /// Violations on fields.
    pub fn fields(&self) -> impl Iterator<Item = &ContractViolation> {
        self.of_kind(MemberKind::Field)
    }

    fn of_kind(&self, kind: MemberKind) -> impl Iterator<Item = &ContractViolation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// The violation a fail-fast check would have stopped at.
    pub fn first(&self) -> Option<&ContractViolation> {
        self.violations.first()
    }
}

impl IntoIterator for Violations {
    type Item = ContractViolation;
    type IntoIter = std::vec::IntoIter<ContractViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a ContractViolation;
    type IntoIter = std::slice::Iter<'a, ContractViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
