// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Spawning executions for fired rules

use chrono::{DateTime, Utc};
use pulso_adapters::directory::DirectoryAdapter;
use pulso_adapters::metrics::MetricAdapter;
use pulso_adapters::notify::NotifyAdapter;
use pulso_adapters::rules::RuleStore;
use pulso_adapters::shifts::ShiftCalendar;
use pulso_core::{AlertKind, Channel, Clock, Event, Execution, IdGen, Rule, TemplateVars};
use pulso_storage::{AlertSink, ExecutionStore, InsertOutcome};

use crate::engine::{Engine, Outgoing, TickReport};

/// Estimated minutes shown in assignment messages when the rule does
/// not set one
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 15;

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
    /// Spawn one pending execution per on-duty assignee of a fired rule
    ///
    /// A directory failure skips the rule; a failed insert skips that
    /// actor. The remaining assignees still get their executions.
    pub(crate) async fn spawn_for(&self, rule: &Rule, now: DateTime<Utc>, report: &mut TickReport) {
        let actors = match self
            .deps
            .directory
            .on_duty(&rule.assign_to_roles, rule.branch_id.as_ref())
            .await
        {
            Ok(actors) => actors,
            Err(e) => {
                tracing::warn!(rule = %rule.id, error = %e, "directory lookup failed, rule skipped");
                return;
            }
        };
        if actors.is_empty() {
            tracing::debug!(rule = %rule.id, "no on-duty assignees");
            return;
        }

        for actor in &actors {
            let execution = Execution::spawn(self.id_gen.next(), rule, actor, now);
            let outcome = self
                .deps
                .executions
                .insert_if_vacant(execution.clone(), self.dedup_window())
                .await;

            match outcome {
                Ok(InsertOutcome::Created) => {
                    report.executions_spawned += 1;
                    self.emit(Event::ExecutionSpawned {
                        id: execution.id.clone(),
                        rule_id: rule.id.0.clone(),
                        actor_id: actor.id.0.clone(),
                    });

                    let body = self.assignment_message(rule, &execution);
                    self.send_and_audit(
                        Outgoing {
                            kind: AlertKind::SopAssigned,
                            level: 0,
                            notify_roles: &[],
                            recipient: actor,
                            channel: Channel::Whatsapp,
                            body: &body,
                            execution_id: &execution.id,
                        },
                        report,
                    )
                    .await;
                }
                Ok(InsertOutcome::Duplicate) => {
                    report.duplicates_suppressed += 1;
                    self.emit(Event::DuplicateSuppressed {
                        rule_id: rule.id.0.clone(),
                        actor_id: actor.id.0.clone(),
                    });
                }
                Err(e) => {
                    tracing::warn!(rule = %rule.id, actor = %actor.id, error = %e, "execution insert failed");
                }
            }
        }
    }

    /// Assignment message with the optional completion link appended
    pub(crate) fn assignment_message(&self, rule: &Rule, execution: &Execution) -> String {
        let minutes = rule.estimated_minutes.unwrap_or(DEFAULT_ESTIMATED_MINUTES);
        let mut body =
            TemplateVars::for_execution(execution, minutes).render(&self.config.assignment_template);
        if let Some(base) = &self.config.completion_base_url {
            body.push_str(&format!(
                "\n🔗 Completar: {}/{}",
                base.trim_end_matches('/'),
                execution.id
            ));
        }
        body
    }
}
