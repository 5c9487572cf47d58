//! SOP spawning specs
//!
//! Verify a fired rule turns into one pending execution per on-duty
//! assignee, each with its own assignment message, and that a rule
//! never spawns twice inside the dedup window.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn opening_checklist_lands_on_every_cook() {
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![opening_rule()]);
    r.roster.add(ana());
    r.roster.add(beto());

    let report = r.tick().await;

    assert_eq!(
        report,
        TickReport {
            processed_at: tuesday_9am(),
            rules_fired: 1,
            executions_spawned: 2,
            duplicates_suppressed: 0,
            escalations_raised: 0,
            notifications_sent: 2,
            notifications_failed: 0,
        }
    );
    let executions = r.executions.all();
    assert_eq!(executions.len(), 2);
    assert!(executions
        .iter()
        .all(|e| e.status == ExecutionStatus::Pending));
}

#[tokio::test]
async fn same_morning_rerun_is_idempotent() {
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![opening_rule()]);
    r.roster.add(ana());
    r.roster.add(beto());
    r.tick().await;

    let rerun = r.tick().await;

    assert_eq!(
        rerun,
        TickReport {
            processed_at: tuesday_9am(),
            rules_fired: 1,
            executions_spawned: 0,
            duplicates_suppressed: 2,
            escalations_raised: 0,
            notifications_sent: 0,
            notifications_failed: 0,
        }
    );
    assert_eq!(r.executions.all().len(), 2);
    assert_eq!(r.notify.calls().len(), 2);
}

#[tokio::test]
async fn assignment_links_to_the_completion_page() {
    let config = EngineConfig::default().with_completion_base_url("https://pulso.mx/sop/");
    let r = Restaurant::with_config(config, tuesday_9am());
    r.rules.set_rules(vec![opening_rule().with_estimated_minutes(25)]);
    r.roster.add(ana());

    r.tick().await;

    let calls = r.notify.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        "📋 Nuevo SOP asignado: Apertura de cocina\n\n⏰ Tiempo estimado: 25 min\n🔗 Completar: https://pulso.mx/sop/exec-1"
    );
}

#[tokio::test]
async fn evening_refire_spawns_a_fresh_round() {
    let twice_daily = Rule::new(
        "r-apertura",
        "Apertura de cocina",
        "sop-apertura",
        RuleTrigger::TimeBased {
            trigger_times: vec![
                TriggerTime::new(9, 0).unwrap(),
                TriggerTime::new(17, 0).unwrap(),
            ],
            days: vec![Weekday::Martes],
        },
    )
    .assign_to(vec![RoleName::from("cocinero")]);
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![twice_daily]);
    r.roster.add(ana());
    r.tick().await;

    // The morning round is completed before the evening firing
    for execution in r.executions.all() {
        let (done, _) = execution.transition(ExecutionEvent::Complete, &r.clock);
        r.executions.update_status(&done).await.unwrap();
    }
    r.clock.advance(Duration::hours(8));
    let report = r.tick().await;

    assert_eq!(report.executions_spawned, 1);
    assert_eq!(report.escalations_raised, 0);
    assert_eq!(r.executions.all().len(), 2);
}

#[tokio::test]
async fn branch_scoped_rule_spawns_only_in_its_branch() {
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![opening_rule().for_branch("suc-norte")]);
    r.roster.add(ana());
    r.roster.add(
        Actor::new("emp-chelo", "Chelo Ramos", "cocinero", "suc-norte")
            .with_branch_name("Sucursal Norte")
            .with_phone("+5215598760006"),
    );

    let report = r.tick().await;

    assert_eq!(report.executions_spawned, 1);
    let executions = r.executions.all();
    assert_eq!(executions[0].actor_id.0, "emp-chelo");
    assert_eq!(executions[0].branch_id.0, "suc-norte");
}

#[tokio::test]
async fn empty_roster_spawns_nothing() {
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![opening_rule()]);

    let report = r.tick().await;

    assert_eq!(report.rules_fired, 1);
    assert_eq!(report.executions_spawned, 0);
    assert!(r.notify.calls().is_empty());
}
