//! The strength/reinforcement/vector-decay laws, spec.md §4.C7.

use chrono::{DateTime, Utc};

use noema_core::config::DecayConfig;
use noema_core::model::{AbstractionLevel, CognitiveState, Node, Temporal, Unit, VectorPayload};

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// `strength(t) = clamp01(strength0 * exp(-lambda*dt) + foundational_bonus - volatility_penalty)`.
///
/// `lambda` is the node's own `decay_rate` override when set, else
/// `config.base_lambda`. `foundational_bonus` applies only when
/// `level.abstraction < 0.3`. `volatility_penalty = 0.5 * level.volatility`.
pub fn strength_at(node: &Node, now: DateTime<Utc>, config: &DecayConfig) -> f64 {
    let dt_secs = (now - node.temporal.last_reinforced_at).num_seconds().max(0) as f64;
    let lambda = node.cognitive_state.decay_rate.unwrap_or(config.base_lambda);
    let foundational_bonus = if node.level.abstraction.value() < 0.3 {
        config.foundational_bonus
    } else {
        0.0
    };
    let volatility_penalty = 0.5 * node.level.volatility.value();

    let decayed = node.cognitive_state.strength.value() * (-lambda * dt_secs).exp();
    clamp01(decayed + foundational_bonus - volatility_penalty)
}

/// Apply the strength law to a node's cognitive state, returning the
/// updated copy. Pure: callers are responsible for writing it back.
pub fn apply_decay(node: &Node, now: DateTime<Utc>, config: &DecayConfig) -> CognitiveState {
    CognitiveState {
        strength: Unit::new(strength_at(node, now, config)),
        ..node.cognitive_state
    }
}

/// Reinforcement on access: raises strength and activation, resets
/// `last_reinforced_at`, advances `peak_relevance_at`.
pub fn reinforce(node: &Node, now: DateTime<Utc>, config: &DecayConfig) -> (CognitiveState, Temporal) {
    let state = CognitiveState {
        strength: Unit::new(node.cognitive_state.strength.value() + config.reinforcement_boost),
        activation: Unit::new(node.cognitive_state.activation.value() + 0.2),
        ..node.cognitive_state
    };
    let temporal = Temporal {
        last_reinforced_at: now,
        peak_relevance_at: node.temporal.peak_relevance_at.max(now),
        ..node.temporal
    };
    (state, temporal)
}

/// Time until `strength` drops below `target`, in seconds:
/// `t = -ln(target/strength) / lambda` when `strength > target`, else 0.
pub fn forgetting_time_secs(strength: f64, target: f64, lambda: f64) -> f64 {
    if strength <= target || lambda <= 0.0 {
        return 0.0;
    }
    -(target / strength).ln() / lambda
}

/// `decay_score = clamp01(exp(-lambda*dt) + (theory ? 0.2 : 0) + 0.1*confidence)`.
pub fn vector_decay_score(vector: &VectorPayload, now: DateTime<Utc>, lambda: f64) -> f64 {
    let dt_secs = (now - vector.created_at).num_seconds().max(0) as f64;
    let theory_bonus = if vector.abstraction_level == AbstractionLevel::Theory { 0.2 } else { 0.0 };
    clamp01((-lambda * dt_secs).exp() + theory_bonus + 0.1 * vector.confidence.value())
}
