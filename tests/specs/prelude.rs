//! Shared harness for the behavior specs
//!
//! `Restaurant` wires an engine over in-memory fakes and exposes every
//! handle, so specs can seed rules, staff the roster, move the clock,
//! and inspect executions and the audit trail after each tick.

use pulso_adapters::{
    FakeDirectory, FakeMetricAdapter, FakeNotifyAdapter, FakeRuleStore, FakeShiftCalendar,
};
use pulso_core::{FakeClock, SequentialIdGen};
use pulso_engine::{Engine, EngineDeps};
use pulso_storage::{MemoryAlertLog, MemoryExecutionStore};

pub use chrono::{DateTime, Duration, TimeZone, Utc};
pub use pulso_adapters::ShiftBoundary;
pub use pulso_core::{
    Actor, AlertDelivery, AlertKind, Channel, CmpOp, EscalationLevel, EscalationPolicies,
    EscalationPolicy, ExecutionEvent, ExecutionStatus, MetricCondition, RoleName, Rule,
    RuleTrigger, ShiftMoment, TriggerTime, Weekday,
};
pub use pulso_engine::{EngineConfig, TickReport};
pub use pulso_storage::ExecutionStore;

/// Engine wired entirely with in-memory fakes.
pub type SpecEngine = Engine<
    FakeRuleStore,
    MemoryExecutionStore,
    FakeDirectory,
    FakeMetricAdapter,
    FakeShiftCalendar,
    FakeNotifyAdapter,
    MemoryAlertLog,
    FakeClock,
    SequentialIdGen,
>;

/// One branch under automation: the engine plus handles to every fake.
pub struct Restaurant {
    pub engine: SpecEngine,
    pub rules: FakeRuleStore,
    pub executions: MemoryExecutionStore,
    pub roster: FakeDirectory,
    pub metrics: FakeMetricAdapter,
    pub shifts: FakeShiftCalendar,
    pub notify: FakeNotifyAdapter,
    pub alerts: MemoryAlertLog,
    pub clock: FakeClock,
}

impl Restaurant {
    /// Open with the default engine configuration.
    pub fn open_at(start: DateTime<Utc>) -> Self {
        Self::with_config(EngineConfig::default(), start)
    }

    pub fn with_config(config: EngineConfig, start: DateTime<Utc>) -> Self {
        let rules = FakeRuleStore::new();
        let executions = MemoryExecutionStore::new();
        let roster = FakeDirectory::new();
        let metrics = FakeMetricAdapter::new();
        let shifts = FakeShiftCalendar::new();
        let notify = FakeNotifyAdapter::new();
        let alerts = MemoryAlertLog::new();
        let clock = FakeClock::at(start);

        let engine = Engine::new(
            EngineDeps {
                rules: rules.clone(),
                executions: executions.clone(),
                directory: roster.clone(),
                metrics: metrics.clone(),
                shifts: shifts.clone(),
                notify: notify.clone(),
                alerts: alerts.clone(),
            },
            config,
            clock.clone(),
            SequentialIdGen::new("exec"),
        );

        Self {
            engine,
            rules,
            executions,
            roster,
            metrics,
            shifts,
            notify,
            alerts,
            clock,
        }
    }

    /// Run one tick, panicking on engine-level failure.
    pub async fn tick(&self) -> TickReport {
        self.engine.run_tick().await.expect("tick failed")
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.clock.advance(Duration::minutes(minutes));
    }
}

/// 2026-03-03 09:00 UTC, a Tuesday.
pub fn tuesday_9am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap()
}

/// 2026-03-02 11:00 UTC, a Monday.
pub fn monday_11am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap()
}

/// Tuesday-morning opening checklist assigned to the kitchen.
pub fn opening_rule() -> Rule {
    Rule::new(
        "r-apertura",
        "Apertura de cocina",
        "sop-apertura",
        RuleTrigger::TimeBased {
            trigger_times: vec![TriggerTime::new(9, 0).unwrap()],
            days: vec![Weekday::Martes],
        },
    )
    .assign_to(vec![RoleName::from("cocinero")])
}

/// Cook at Sucursal Centro, reachable on WhatsApp and email.
pub fn ana() -> Actor {
    Actor::new("emp-ana", "Ana Torres", "cocinero", "suc-centro")
        .with_branch_name("Sucursal Centro")
        .with_phone("+5215598760001")
        .with_email("ana@pulso.mx")
}

/// Second cook at Sucursal Centro, phone only.
pub fn beto() -> Actor {
    Actor::new("emp-beto", "Beto Ruiz", "cocinero", "suc-centro")
        .with_branch_name("Sucursal Centro")
        .with_phone("+5215598760002")
}

/// Shift supervisor at Sucursal Centro.
pub fn luis_supervisor() -> Actor {
    Actor::new("emp-luis", "Luis Vega", "supervisor", "suc-centro")
        .with_branch_name("Sucursal Centro")
        .with_phone("+5215598760003")
        .with_email("luis@pulso.mx")
}

/// Branch manager at Sucursal Centro.
pub fn marta_gerente() -> Actor {
    Actor::new("emp-marta", "Marta Díaz", "gerente_sucursal", "suc-centro")
        .with_branch_name("Sucursal Centro")
        .with_phone("+5215598760004")
        .with_email("marta@pulso.mx")
}

/// General manager, tier three of the built-in cascade.
pub fn diego_director() -> Actor {
    Actor::new("emp-diego", "Diego Peña", "gerente_general", "suc-centro")
        .with_branch_name("Sucursal Centro")
        .with_phone("+5215598760005")
        .with_email("diego@pulso.mx")
}
