//! Audit trail models.
//!
//! Every derivation records an [`AuditStep`] describing its inputs, outputs
//! and reasoning so a breakdown can be explained line by line.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a derivation.
///
/// # Example
///
/// ```
/// use stipend_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "gsa_totals".to_string(),
///     rule_name: "GSA Ceiling Totals".to_string(),
///     reference: "GSA per diem (lodging + M&IE)".to_string(),
///     input: serde_json::json!({"lodging_daily": "156", "meals_daily": "86"}),
///     output: serde_json::json!({"weekly_max": "1694"}),
///     reasoning: "($156 + $86) × 7 = $1694".to_string(),
/// };
/// assert_eq!(step.rule_id, "gsa_totals");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The rate source or policy the rule is based on.
    pub reference: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during derivation.
///
/// Warnings flag results worth a second look without changing any figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a derivation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of derivation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated along the way.
    pub warnings: Vec<AuditWarning>,
}
