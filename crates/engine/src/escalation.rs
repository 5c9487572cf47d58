// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Escalation sweep over unresolved executions
//!
//! Each unresolved execution past the lowest enabled threshold is
//! classified at the highest tier its age has reached. Tiers a slow
//! tick skipped over are never replayed. The level write is a
//! compare-and-set on the level the sweep read; losing that race means
//! another tick already notified, so this one stays silent.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use pulso_adapters::directory::DirectoryAdapter;
use pulso_adapters::metrics::MetricAdapter;
use pulso_adapters::notify::NotifyAdapter;
use pulso_adapters::rules::RuleStore;
use pulso_adapters::shifts::ShiftCalendar;
use pulso_core::{
    Actor, ActorId, AlertKind, Clock, Effect, EscalationLevel, Execution, ExecutionEvent, IdGen,
    TemplateVars,
};
use pulso_storage::{AlertSink, CasOutcome, ExecutionStore};

use crate::engine::{Engine, Outgoing, TickReport};
use crate::error::TickError;

impl<R, E, D, M, S, N, A, C, I> Engine<R, E, D, M, S, N, A, C, I>
where
    R: RuleStore,
    E: ExecutionStore,
    D: DirectoryAdapter,
    M: MetricAdapter,
    S: ShiftCalendar,
    N: NotifyAdapter,
    A: AlertSink,
    C: Clock,
    I: IdGen,
{
    /// Sweep unresolved executions and raise cascade levels
    ///
    /// A failing sweep scan aborts the tick; a failure on one execution
    /// is isolated to it.
    pub(crate) async fn escalate_unresolved(
        &self,
        now: DateTime<Utc>,
        report: &mut TickReport,
    ) -> Result<(), TickError> {
        let Some(min_threshold) = self.config.policies.min_threshold() else {
            // Every tier disabled; nothing can escalate
            return Ok(());
        };
        let cutoff = now - chrono::Duration::minutes(i64::from(min_threshold));
        let due = self.deps.executions.unresolved_older_than(cutoff).await?;

        for execution in due {
            self.escalate_one(execution, now, report).await;
        }
        Ok(())
    }

    async fn escalate_one(&self, execution: Execution, now: DateTime<Utc>, report: &mut TickReport) {
        let policy = self.config.policies.for_sop(&execution.sop_id);
        let minutes = execution.minutes_elapsed(now);
        let Some(target) = policy.level_for(minutes) else {
            return;
        };
        if target.level <= execution.escalation_level {
            return;
        }

        let (escalated, effects) = execution.transition(
            ExecutionEvent::Escalate {
                level: target.level,
            },
            &self.clock,
        );

        for effect in effects {
            match effect {
                Effect::PersistEscalation { prior_level } => {
                    match self
                        .deps
                        .executions
                        .update_escalation(&escalated, prior_level)
                        .await
                    {
                        Ok(CasOutcome::Updated) => {}
                        Ok(CasOutcome::Conflict) => {
                            tracing::debug!(
                                execution = %escalated.id,
                                "escalation lost compare-and-set, skipping notifications"
                            );
                            return;
                        }
                        Err(e) => {
                            tracing::warn!(execution = %escalated.id, error = %e, "escalation persist failed");
                            return;
                        }
                    }
                }
                Effect::PersistStatus => {
                    if let Err(e) = self.deps.executions.update_status(&escalated).await {
                        tracing::warn!(execution = %escalated.id, error = %e, "status persist failed");
                    }
                }
                Effect::Emit(event) => self.emit(event),
            }
        }

        report.escalations_raised += 1;

        let body = TemplateVars::for_execution(&escalated, minutes).render(&target.message);
        let recipients = self.escalation_recipients(target, &escalated).await;
        if recipients.is_empty() {
            tracing::warn!(
                execution = %escalated.id,
                level = target.level,
                "no reachable recipients for escalation"
            );
        }
        for recipient in &recipients {
            for &channel in &target.channels {
                self.send_and_audit(
                    Outgoing {
                        kind: AlertKind::SopEscalation,
                        level: target.level,
                        notify_roles: &target.notify_roles,
                        recipient,
                        channel,
                        body: &body,
                        execution_id: &escalated.id,
                    },
                    report,
                )
                .await;
            }
        }
    }

    /// Resolve a tier's roles to concrete staff, deduped by actor id
    ///
    /// `empleado_asignado` is a pseudo-role naming the execution's own
    /// assignee; every other role resolves to on-duty staff at the
    /// execution's branch.
    async fn escalation_recipients(
        &self,
        tier: &EscalationLevel,
        execution: &Execution,
    ) -> Vec<Actor> {
        let mut seen: HashSet<ActorId> = HashSet::new();
        let mut recipients = Vec::new();

        for role in &tier.notify_roles {
            if role.is_assignee() {
                match self.deps.directory.get(&execution.actor_id).await {
                    Ok(Some(actor)) => {
                        if seen.insert(actor.id.clone()) {
                            recipients.push(actor);
                        }
                    }
                    Ok(None) => {
                        tracing::warn!(
                            execution = %execution.id,
                            actor = %execution.actor_id,
                            "assignee not in roster"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(execution = %execution.id, error = %e, "assignee lookup failed");
                    }
                }
                continue;
            }

            match self
                .deps
                .directory
                .on_duty(std::slice::from_ref(role), Some(&execution.branch_id))
                .await
            {
                Ok(actors) => {
                    for actor in actors {
                        if seen.insert(actor.id.clone()) {
                            recipients.push(actor);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(execution = %execution.id, role = %role, error = %e, "role lookup failed");
                }
            }
        }
        recipients
    }
}
