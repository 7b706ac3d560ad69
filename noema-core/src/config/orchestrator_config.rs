use serde::{Deserialize, Serialize};

/// Orchestrator configuration.
///
/// # Examples
///
/// ```
/// use noema_core::config::OrchestratorConfig;
///
/// let config = OrchestratorConfig::default();
/// assert!((config.auto_approve_confidence - 0.95).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Minimum confidence at which a proposal is auto-approved and executed
    /// immediately rather than awaiting review. Default: 0.95.
    pub auto_approve_confidence: f64,
    /// Whether to log every enqueued proposal. Default: true.
    pub log_proposals: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            auto_approve_confidence: 0.95,
            log_proposals: true,
        }
    }
}
