// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Per-rule fire decisions for one tick
//!
//! Time gating is pure and lives on the rule; event rules read their
//! metric fresh from the source, shift rules consult the calendar for
//! boundaries in the tick's minute. A rule that cannot be evaluated is
//! skipped for this tick, never treated as a tick failure.

use chrono::{DateTime, Utc};
use pulso_adapters::metrics::MetricAdapter;
use pulso_adapters::shifts::ShiftCalendar;
use pulso_core::{Rule, RuleTrigger};

/// One rule that fires this tick
pub(crate) struct Firing {
    pub(crate) rule: Rule,
    /// Metric value that met the condition, for event rules
    pub(crate) metric_value: Option<f64>,
}

pub(crate) async fn firing_rules<M, S>(
    rules: Vec<Rule>,
    now: DateTime<Utc>,
    metrics: &M,
    shifts: &S,
) -> Vec<Firing>
where
    M: MetricAdapter,
    S: ShiftCalendar,
{
    let needs_calendar = rules
        .iter()
        .any(|r| matches!(r.trigger, RuleTrigger::ShiftBased { .. }));
    let boundaries = if needs_calendar {
        match shifts.boundaries_at(now).await {
            Ok(boundaries) => boundaries,
            Err(e) => {
                tracing::warn!(error = %e, "shift calendar unavailable, shift rules skipped");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let mut firings = Vec::new();
    for rule in rules {
        if !rule.is_well_formed() {
            tracing::debug!(rule = %rule.id, "rule misconfigured, skipped");
            continue;
        }

        let decision: Option<Option<f64>> = match &rule.trigger {
            RuleTrigger::TimeBased { .. } => rule.fires_at(&now).then_some(None),

            RuleTrigger::EventBased { condition } => {
                match metrics.read(&condition.metric).await {
                    Ok(Some(value)) if condition.is_met(value) => {
                        tracing::debug!(rule = %rule.id, metric = %condition.metric, value, "condition met");
                        Some(Some(value))
                    }
                    Ok(Some(_)) => None,
                    Ok(None) => {
                        tracing::debug!(rule = %rule.id, metric = %condition.metric, "metric not in source, rule skipped");
                        None
                    }
                    Err(e) => {
                        tracing::warn!(rule = %rule.id, metric = %condition.metric, error = %e, "metric read failed, rule skipped");
                        None
                    }
                }
            }

            RuleTrigger::ShiftBased {
                shifts: names,
                moment,
            } => boundaries
                .iter()
                .any(|b| *moment == b.moment && names.contains(&b.shift))
                .then_some(None),
        };

        if let Some(metric_value) = decision {
            firings.push(Firing { rule, metric_value });
        }
    }
    firings
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
