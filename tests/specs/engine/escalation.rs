//! Escalation cascade specs
//!
//! Verify unresolved executions climb the reminder tiers on schedule,
//! that a late sweep jumps straight to the deepest tier owed, and that
//! tier recipients are scoped to the execution's branch.

use crate::prelude::*;

/// Monday-morning stock count assigned to the kitchen.
fn inventory_rule() -> Rule {
    Rule::new(
        "r-inventario",
        "Inventario de insumos",
        "sop-inventario",
        RuleTrigger::TimeBased {
            trigger_times: vec![TriggerTime::new(11, 0).unwrap()],
            days: vec![Weekday::Lunes],
        },
    )
    .assign_to(vec![RoleName::from("cocinero")])
}

#[tokio::test]
async fn unattended_sop_climbs_the_cascade() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![inventory_rule()]);
    r.roster.add(ana());
    r.roster.add(luis_supervisor());
    r.roster.add(marta_gerente());
    r.roster.add(diego_director());
    r.tick().await;
    assert_eq!(r.notify.calls().len(), 1);

    // Nobody completes the SOP; each sweep raises exactly one tier.
    // Tier one reminds Ana, tier two reaches Luis and Marta on two
    // channels each, tier three reaches Diego on three.
    r.advance_minutes(5);
    assert_eq!(r.tick().await.escalations_raised, 1);
    assert_eq!(r.notify.calls().len(), 2);

    r.advance_minutes(10);
    assert_eq!(r.tick().await.escalations_raised, 1);
    assert_eq!(r.notify.calls().len(), 6);

    r.advance_minutes(15);
    assert_eq!(r.tick().await.escalations_raised, 1);
    assert_eq!(r.notify.calls().len(), 9);

    let execution = r.executions.all().remove(0);
    assert_eq!(execution.escalation_level, 3);
    assert_eq!(execution.status, ExecutionStatus::Overdue);
}

#[tokio::test]
async fn late_sweep_jumps_to_the_owed_tier() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![inventory_rule()]);
    r.roster.add(ana());
    r.roster.add(luis_supervisor());
    r.tick().await;

    // The engine was down for twenty minutes; tier one's moment has passed
    r.advance_minutes(20);
    let report = r.tick().await;

    assert_eq!(report.escalations_raised, 1);
    assert_eq!(r.executions.all()[0].escalation_level, 2);
    let calls = r.notify.calls();
    assert!(!calls.iter().skip(1).any(|c| c.body.contains("Recuerda")));
    assert!(calls
        .iter()
        .skip(1)
        .all(|c| c.body.contains("aún no se ha completado")));
}

#[tokio::test]
async fn completed_sops_drop_out_of_the_cascade() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![inventory_rule()]);
    r.roster.add(ana());
    r.tick().await;
    r.advance_minutes(5);
    r.tick().await;

    // Ana finishes right after the first reminder
    let (done, _) = r.executions.all()[0].transition(ExecutionEvent::Complete, &r.clock);
    r.executions.update_status(&done).await.unwrap();
    r.advance_minutes(30);
    let report = r.tick().await;

    assert_eq!(report.escalations_raised, 0);
    let execution = r.executions.all().remove(0);
    assert_eq!(execution.status, ExecutionStatus::Completed);
    assert_eq!(execution.escalation_level, 1);
}

#[tokio::test]
async fn tier_one_reminds_only_the_assignee() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![inventory_rule()]);
    r.roster.add(ana());
    r.roster.add(beto());
    r.roster.add(luis_supervisor());
    r.tick().await;

    r.advance_minutes(5);
    let report = r.tick().await;

    assert_eq!(report.escalations_raised, 2);
    let calls = r.notify.calls();
    let reminders: Vec<&str> = calls.iter().skip(2).map(|c| c.to.as_str()).collect();
    assert_eq!(reminders.len(), 2);
    assert!(reminders.contains(&"+5215598760001"));
    assert!(reminders.contains(&"+5215598760002"));
}

#[tokio::test]
async fn urgent_tier_names_the_branch_and_the_delay() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![inventory_rule()]);
    r.roster.add(ana());
    r.roster.add(diego_director());
    r.tick().await;

    r.advance_minutes(31);
    r.tick().await;

    let calls = r.notify.calls();
    assert!(calls.iter().any(|c| c.body
        == "🚨 URGENTE: SOP 'Inventario de insumos' pendiente en Sucursal Centro. \
            No se ha completado tras 31 minutos."));
}

#[tokio::test]
async fn managers_from_other_branches_stay_quiet() {
    let r = Restaurant::open_at(monday_11am());
    r.rules.set_rules(vec![inventory_rule()]);
    r.roster.add(ana());
    r.roster.add(marta_gerente());
    r.roster.add(
        Actor::new("emp-raul", "Raúl Soto", "gerente_sucursal", "suc-norte")
            .with_branch_name("Sucursal Norte")
            .with_phone("+5215598760007"),
    );
    r.tick().await;

    r.advance_minutes(16);
    r.tick().await;

    let records = r.alerts.records();
    let recipients: Vec<&str> = records
        .iter()
        .filter(|rec| rec.kind == AlertKind::SopEscalation)
        .map(|rec| rec.recipient_id.0.as_str())
        .collect();
    assert!(recipients.contains(&"emp-marta"));
    assert!(!recipients.contains(&"emp-raul"));
}

#[tokio::test]
async fn stored_policy_overrides_the_builtin_cascade() {
    let mut policies = EscalationPolicies::default();
    policies.per_sop.insert(
        "sop-inventario".to_string(),
        EscalationPolicy::new(vec![EscalationLevel {
            level: 1,
            after_minutes: 2,
            notify_roles: vec![RoleName::from("supervisor")],
            channels: vec![Channel::Whatsapp],
            message: "Pendiente: {nombre_sop}".to_string(),
            enabled: true,
        }]),
    );
    let r = Restaurant::with_config(
        EngineConfig::default().with_policies(policies),
        monday_11am(),
    );
    r.rules.set_rules(vec![inventory_rule()]);
    r.roster.add(ana());
    r.roster.add(luis_supervisor());
    r.tick().await;

    r.advance_minutes(2);
    let report = r.tick().await;

    assert_eq!(report.escalations_raised, 1);
    let calls = r.notify.calls();
    assert_eq!(calls.last().unwrap().body, "Pendiente: Inventario de insumos");
    assert_eq!(calls.last().unwrap().to, "+5215598760003");
}
