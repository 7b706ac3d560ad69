use serde::{Deserialize, Serialize};

/// Decay-engine configuration.
///
/// Exposes the union of both `DecayConfig` shapes observed in the source
/// material (`reinforcement_boost`/`foundational_bonus` vs
/// `consolidation_threshold`/`forgetting_threshold`) — see DESIGN.md.
///
/// # Examples
///
/// ```
/// use noema_core::config::DecayConfig;
///
/// let config = DecayConfig::default();
/// assert!((config.foundational_bonus - 0.5).abs() < f64::EPSILON);
/// assert!((config.consolidation_threshold - 0.7).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// `base_lambda`, the default decay constant. Default: `ln(2) / 30 days`
    /// (in units of `per second`), giving a 30-day half-life.
    pub base_lambda: f64,
    /// Strength bonus applied to nodes with `level.abstraction < 0.3`.
    /// Default: 0.5.
    pub foundational_bonus: f64,
    /// Strength added to a node on reinforcement. Default: 0.3.
    pub reinforcement_boost: f64,
    /// Similarity threshold (θ) above which vectors are eligible for
    /// consolidation into one synthesized vector. Default: 0.7.
    pub consolidation_threshold: f64,
    /// Target strength (τ) used by the forgetting-time calculation.
    /// Default: 0.1.
    pub forgetting_threshold: f64,
    /// Interval between scheduled decay passes, in seconds. Default: 3600
    /// (1 hour).
    pub interval_secs: u64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            base_lambda: std::f64::consts::LN_2 / (30.0 * 86_400.0),
            foundational_bonus: 0.5,
            reinforcement_boost: 0.3,
            consolidation_threshold: 0.7,
            forgetting_threshold: 0.1,
            interval_secs: 3600,
        }
    }
}
