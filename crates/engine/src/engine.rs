// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Engine that drives one scheduler pass at a time
//!
//! `run_tick` is the whole cadence: read the active rules, decide which
//! fire, spawn executions for on-duty assignees, then sweep unresolved
//! executions and raise the escalation cascade. Ticks hold no
//! in-process locks; the store's conditional insert and compare-and-set
//! keep overlapping ticks convergent.

use chrono::{DateTime, Utc};
use pulso_adapters::directory::DirectoryAdapter;
use pulso_adapters::metrics::MetricAdapter;
use pulso_adapters::notify::{NotifyAdapter, OutboundMessage};
use pulso_adapters::rules::RuleStore;
use pulso_adapters::shifts::ShiftCalendar;
use pulso_core::execution::ExecutionId;
use pulso_core::{
    Actor, AlertDelivery, AlertKind, AlertRecord, Channel, Clock, Event, IdGen, RoleName,
};
use pulso_storage::{AlertSink, ExecutionStore};

use crate::config::EngineConfig;
use crate::error::TickError;
use crate::evaluator;

/// Counters for one engine pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub processed_at: DateTime<Utc>,
    pub rules_fired: usize,
    pub executions_spawned: usize,
    pub duplicates_suppressed: usize,
    pub escalations_raised: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

impl TickReport {
    fn new(processed_at: DateTime<Utc>) -> Self {
        Self {
            processed_at,
            rules_fired: 0,
            executions_spawned: 0,
            duplicates_suppressed: 0,
            escalations_raised: 0,
            notifications_sent: 0,
            notifications_failed: 0,
        }
    }
}

/// Engine adapter dependencies
pub struct EngineDeps<R, E, D, M, S, N, A> {
    pub rules: R,
    pub executions: E,
    pub directory: D,
    pub metrics: M,
    pub shifts: S,
    pub notify: N,
    pub alerts: A,
}

/// Engine that coordinates the tick
pub struct Engine<R, E, D, M, S, N, A, C: Clock, I: IdGen> {
    pub(crate) deps: EngineDeps<R, E, D, M, S, N, A>,
    pub(crate) config: EngineConfig,
    pub(crate) clock: C,
    pub(crate) id_gen: I,
}

/// One planned notification with its audit metadata
pub(crate) struct Outgoing<'a> {
    pub(crate) kind: AlertKind,
    pub(crate) level: u32,
    pub(crate) notify_roles: &'a [RoleName],
    pub(crate) recipient: &'a Actor,
    pub(crate) channel: Channel,
    pub(crate) body: &'a str,
    pub(crate) execution_id: &'a ExecutionId,
}

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
    /// Create a new engine
    pub fn new(deps: EngineDeps<R, E, D, M, S, N, A>, config: EngineConfig, clock: C, id_gen: I) -> Self {
        Self {
            deps,
            config,
            clock,
            id_gen,
        }
    }

    /// Run one scheduler pass
    ///
    /// Returns the counters for the pass. Only a rule store read
    /// failure or a sweep scan failure is fatal; everything narrower is
    /// logged and isolated.
    pub async fn run_tick(&self) -> Result<TickReport, TickError> {
        let now = self.clock.now();
        let mut report = TickReport::new(now);

        let rules = self.deps.rules.active_rules().await?;
        let firings =
            evaluator::firing_rules(rules, now, &self.deps.metrics, &self.deps.shifts).await;

        for firing in &firings {
            report.rules_fired += 1;
            self.emit(Event::RuleFired {
                rule_id: firing.rule.id.0.clone(),
                trigger: firing.rule.trigger.kind().to_string(),
            });
            self.spawn_for(&firing.rule, now, &mut report).await;
        }

        self.escalate_unresolved(now, &mut report).await?;

        self.emit(Event::TickCompleted {
            spawned: report.executions_spawned,
            escalated: report.escalations_raised,
        });
        tracing::info!(
            fired = report.rules_fired,
            spawned = report.executions_spawned,
            duplicates = report.duplicates_suppressed,
            escalated = report.escalations_raised,
            notified = report.notifications_sent,
            "tick complete"
        );
        Ok(report)
    }

    /// Log an engine event
    pub(crate) fn emit(&self, event: Event) {
        tracing::info!(event = %event.name(), details = ?event, "event");
    }

    /// Dedup window as a chrono duration for store queries
    pub(crate) fn dedup_window(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.config.dedup_window)
            .unwrap_or_else(|_| chrono::Duration::minutes(30))
    }

    /// Send one message to one recipient and audit the attempt
    ///
    /// Delivery failures are never fatal. A recipient with no address
    /// for the channel, and a gateway refusal, both leave an
    /// `Attempted` record behind.
    pub(crate) async fn send_and_audit(&self, outgoing: Outgoing<'_>, report: &mut TickReport) {
        let delivery = match outgoing.recipient.address_for(outgoing.channel) {
            Some(address) => {
                let message = OutboundMessage::new(outgoing.channel, address, outgoing.body);
                match self.deps.notify.send(&message).await {
                    Ok(()) => {
                        report.notifications_sent += 1;
                        self.emit(Event::NotificationSent {
                            recipient_id: outgoing.recipient.id.0.clone(),
                            channel: outgoing.channel.to_string(),
                        });
                        AlertDelivery::Delivered
                    }
                    Err(e) => {
                        report.notifications_failed += 1;
                        tracing::warn!(
                            recipient = %outgoing.recipient.id,
                            channel = %outgoing.channel,
                            error = %e,
                            "notification failed"
                        );
                        self.emit(Event::NotificationFailed {
                            recipient_id: outgoing.recipient.id.0.clone(),
                            channel: outgoing.channel.to_string(),
                            reason: e.to_string(),
                        });
                        AlertDelivery::Attempted
                    }
                }
            }
            None => {
                report.notifications_failed += 1;
                tracing::debug!(
                    recipient = %outgoing.recipient.id,
                    channel = %outgoing.channel,
                    "recipient has no address for channel"
                );
                AlertDelivery::Attempted
            }
        };

        let record = AlertRecord {
            id: self.id_gen.next(),
            kind: outgoing.kind,
            level: outgoing.level,
            message: outgoing.body.to_string(),
            recipient_id: outgoing.recipient.id.clone(),
            channel: outgoing.channel,
            execution_id: outgoing.execution_id.clone(),
            delivery,
            notify_roles: outgoing.notify_roles.to_vec(),
            recorded_at: self.clock.now(),
        };
        if let Err(e) = self.deps.alerts.append(record).await {
            tracing::warn!(error = %e, "alert log append failed");
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
