//! Trigger gating specs
//!
//! Verify rules fire only inside their own window: the exact minute and
//! weekday for time rules, a live metric breach for event rules, and a
//! boundary crossing for shift rules.

use crate::prelude::*;

/// Walk-in fridge alarm: fires while the temperature reads 8°C or above.
fn fridge_rule() -> Rule {
    Rule::new(
        "r-camara",
        "Revisar cámara de frío",
        "sop-camara",
        RuleTrigger::EventBased {
            condition: MetricCondition::new("temperatura_camara", CmpOp::Ge, 8.0),
        },
    )
    .assign_to(vec![RoleName::from("cocinero")])
}

/// Closing checklist tied to the end of the evening shift.
fn closing_rule() -> Rule {
    Rule::new(
        "r-cierre",
        "Cierre de cocina",
        "sop-cierre",
        RuleTrigger::ShiftBased {
            shifts: vec!["vespertino".to_string()],
            moment: ShiftMoment::ShiftEnd,
        },
    )
    .assign_to(vec![RoleName::from("cocinero")])
}

#[tokio::test]
async fn time_rule_fires_only_in_its_exact_minute() {
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![opening_rule()]);
    r.roster.add(ana());

    assert_eq!(r.tick().await.rules_fired, 1);

    r.advance_minutes(1);
    assert_eq!(r.tick().await.rules_fired, 0);
}

#[tokio::test]
async fn day_gate_keeps_monday_quiet() {
    let monday_9am = tuesday_9am() - Duration::days(1);
    let r = Restaurant::open_at(monday_9am);
    r.rules.set_rules(vec![opening_rule()]);
    r.roster.add(ana());

    let report = r.tick().await;

    assert_eq!(report.rules_fired, 0);
    assert_eq!(report.executions_spawned, 0);
}

#[tokio::test]
async fn metric_breach_fires_the_event_rule() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![fridge_rule()]);
    r.roster.add(ana());
    r.metrics.set("temperatura_camara", 9.5);

    let report = r.tick().await;

    assert_eq!(report.rules_fired, 1);
    assert_eq!(report.executions_spawned, 1);
}

#[tokio::test]
async fn event_rule_refires_but_never_respawns() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![fridge_rule()]);
    r.roster.add(ana());
    r.metrics.set("temperatura_camara", 9.5);
    r.tick().await;

    // The temperature is still out of range one minute later
    r.advance_minutes(1);
    let report = r.tick().await;

    assert_eq!(report.rules_fired, 1);
    assert_eq!(report.executions_spawned, 0);
    assert_eq!(report.duplicates_suppressed, 1);
}

#[tokio::test]
async fn recovered_metric_quiets_the_rule() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![fridge_rule()]);
    r.roster.add(ana());
    r.metrics.set("temperatura_camara", 9.5);
    r.tick().await;

    r.metrics.set("temperatura_camara", 4.0);
    r.advance_minutes(1);

    assert_eq!(r.tick().await.rules_fired, 0);
}

#[tokio::test]
async fn missing_metric_reading_skips_the_rule() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![fridge_rule()]);
    r.roster.add(ana());

    // No reading published yet; the rule stays quiet and the tick succeeds
    let report = r.tick().await;

    assert_eq!(report.rules_fired, 0);
    assert_eq!(report.executions_spawned, 0);

    // A reading that later disappears from the source quiets the rule again
    r.metrics.set("temperatura_camara", 9.0);
    r.advance_minutes(1);
    assert_eq!(r.tick().await.rules_fired, 1);

    r.metrics.remove("temperatura_camara");
    r.advance_minutes(1);
    assert_eq!(r.tick().await.rules_fired, 0);
}

#[tokio::test]
async fn shift_end_fires_the_closing_checklist() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![closing_rule()]);
    r.roster.add(ana());
    r.shifts.set_boundaries(vec![ShiftBoundary {
        shift: "vespertino".to_string(),
        moment: ShiftMoment::ShiftEnd,
    }]);

    assert_eq!(r.tick().await.rules_fired, 1);

    // The boundary minute passes; the next tick is quiet
    r.shifts.clear();
    r.advance_minutes(1);
    assert_eq!(r.tick().await.rules_fired, 0);
}

#[tokio::test]
async fn wrong_shift_moment_stays_quiet() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![closing_rule()]);
    r.roster.add(ana());
    r.shifts.set_boundaries(vec![ShiftBoundary {
        shift: "vespertino".to_string(),
        moment: ShiftMoment::ShiftStart,
    }]);

    assert_eq!(r.tick().await.rules_fired, 0);
}

#[tokio::test]
async fn rules_without_assignees_never_fire() {
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![opening_rule().assign_to(vec![])]);
    r.roster.add(ana());

    assert_eq!(r.tick().await.rules_fired, 0);
}

#[tokio::test]
async fn disabled_rules_never_reach_the_evaluator() {
    let r = Restaurant::open_at(tuesday_9am());
    r.rules.set_rules(vec![opening_rule().disabled()]);
    r.roster.add(ana());

    assert_eq!(r.tick().await.rules_fired, 0);
}
