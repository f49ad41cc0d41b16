#![forbid(unsafe_code)]
use roulement::{
    enforce_rest_cap, is_forbidden_transition, EmployeeFields, EmployeeId, Roster, RosterConfig,
    RosterMonth, SchedError, Scheduler, ShiftType,
};
use ShiftType::*;

fn september() -> RosterMonth {
    RosterMonth::new(2025, 8).unwrap()
}

fn roster_of(n: usize) -> Roster {
    let mut roster = Roster::new(september());
    for i in 0..n {
        roster.add_employee(EmployeeFields {
            emp_no: format!("E{i:03}"),
            name: format!("Agent {i}"),
            ..Default::default()
        });
    }
    roster
}

fn scheduler(seed: u64) -> Scheduler {
    Scheduler::with_seed(RosterConfig::default(), seed)
}

fn count_on(roster: &Roster, day: usize, shift: ShiftType) -> usize {
    roster.entries.iter().filter(|e| e.schedule[day] == shift).count()
}

fn assert_no_forbidden_pairs(roster: &Roster) {
    for entry in &roster.entries {
        for pair in entry.schedule.windows(2) {
            assert!(
                !is_forbidden_transition(pair[0], pair[1]),
                "{} has {} followed by {}",
                entry.id(),
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn assign_day_fails_atomically_when_quota_exceeds_staff() {
    let roster = roster_of(10);
    let before = roster.clone();

    let err = scheduler(1).assign_day(&roster, 0).unwrap_err();
    assert!(matches!(err, SchedError::QuotaUnsatisfiable { day: 0, .. }));
    assert_eq!(roster, before);
}

fn assert_quota_met(roster: &Roster, day: usize) {
    let quota = &RosterConfig::default().quotas;
    for entry in quota.entries() {
        assert_eq!(
            count_on(roster, day, entry.shift),
            quota.required(entry.shift),
            "{} on day {day}",
            entry.shift
        );
    }
}

#[test]
fn assign_day_fills_every_quota_with_fourteen_employees() {
    let roster = roster_of(14);
    for seed in [7, 0, 1, 42, 1234] {
        let next = scheduler(seed).assign_day(&roster, 0).unwrap();

        assert_quota_met(&next, 0);
        assert_eq!(count_on(&next, 0, Off), 0);
        // les autres jours ne bougent pas
        assert!(next.entries.iter().all(|e| e.schedule[1..].iter().all(|s| *s == Off)));
    }
}

#[test]
fn assign_day_fills_every_quota_on_a_prefilled_roster() {
    let mut roster = roster_of(20);
    for entry in roster.entries.iter_mut().take(4) {
        entry.schedule[9] = Cron;
    }
    for entry in roster.entries.iter_mut().skip(4).take(4) {
        entry.schedule[11] = T2gd;
    }
    roster.entries[8].schedule[10] = Al;
    for day in 4..10 {
        roster.entries[9].schedule[day] = Am18;
    }

    for seed in 0..8 {
        let next = scheduler(seed).assign_day(&roster, 10).unwrap();

        assert_quota_met(&next, 10);
        assert_eq!(next.entries[8].schedule[10], Al);
        assert_eq!(next.entries[9].schedule[10], Off);
        assert_no_forbidden_pairs(&next);
        for (before, after) in roster.entries.iter().zip(&next.entries) {
            assert_eq!(before.schedule[..10], after.schedule[..10]);
            assert_eq!(before.schedule[11..], after.schedule[11..]);
        }
    }
}

#[test]
fn assign_day_skips_employee_at_the_rest_cap() {
    let mut roster = roster_of(15);
    for day in 0..6 {
        roster.entries[0].schedule[day] = Am18;
    }

    for seed in 0..5 {
        let next = scheduler(seed).assign_day(&roster, 6).unwrap();
        assert_quota_met(&next, 6);
        assert_eq!(next.entries[0].schedule[..7], [Am18, Am18, Am18, Am18, Am18, Am18, Off]);
    }
}

#[test]
fn assign_day_fails_when_rest_cap_leaves_too_few_staff() {
    let mut roster = roster_of(14);
    for day in 0..6 {
        roster.entries[0].schedule[day] = Am18;
    }
    let before = roster.clone();

    let err = scheduler(3).assign_day(&roster, 6).unwrap_err();
    assert!(matches!(err, SchedError::QuotaUnsatisfiable { day: 6, .. }));
    assert_eq!(roster, before);
}

#[test]
fn assign_day_leaves_leave_untouched_and_offs_the_rest() {
    let mut roster = roster_of(16);
    roster.entries[3].schedule[4] = Al;
    let next = scheduler(3).assign_day(&roster, 4).unwrap();

    assert_eq!(next.entries[3].schedule[4], Al);
    assert_eq!(count_on(&next, 4, Off), 1);
}

#[test]
fn assign_day_respects_both_neighbours() {
    let mut roster = roster_of(14);
    // la veille en nuit pour 7 personnes : elles ne peuvent prendre qu'une nuit
    for entry in roster.entries.iter_mut().take(7) {
        entry.schedule[9] = Pm17;
    }
    // le lendemain en jour pour les 7 autres : elles ne peuvent pas prendre de nuit
    for entry in roster.entries.iter_mut().skip(7) {
        entry.schedule[11] = Am18;
    }
    for seed in 0..5 {
        let next = scheduler(seed).assign_day(&roster, 10).unwrap();
        assert_no_forbidden_pairs(&next);
    }
}

#[test]
fn assign_day_rejects_out_of_range_day() {
    let roster = roster_of(14);
    let err = scheduler(1).assign_day(&roster, 30).unwrap_err();
    assert_eq!(err, SchedError::DayOutOfRange { day: 30, days: 30 });
}

#[test]
fn restricted_employee_only_gets_allowed_codes() {
    let mut roster = roster_of(14);
    roster.add_employee(EmployeeFields {
        name: "Maria Lopez".into(),
        ..Default::default()
    });
    for seed in 0..10 {
        let next = scheduler(seed).assign_day(&roster, 0).unwrap();
        let maria = next.entries.last().unwrap();
        assert!(matches!(maria.schedule[0], Am18 | Crod | Off), "got {}", maria.schedule[0]);
    }
}

#[test]
fn edit_after_night_shift_is_rejected() {
    let mut roster = roster_of(2);
    let x = roster.entries[0].id();
    roster.entries[0].schedule[5] = Pm17;
    let before = roster.clone();

    let err = scheduler(1).apply_edit(&roster, x, 6, Am18).unwrap_err();
    assert_eq!(
        err,
        SchedError::RejectedEdit { employee: x, day: 6, before: Pm17, after: Am18 }
    );
    assert_eq!(roster, before);
}

#[test]
fn edit_before_day_shift_is_rejected() {
    let mut roster = roster_of(1);
    let x = roster.entries[0].id();
    roster.entries[0].schedule[7] = Crod;

    let err = scheduler(1).apply_edit(&roster, x, 6, Cron).unwrap_err();
    assert!(matches!(err, SchedError::RejectedEdit { before: Cron, after: Crod, .. }));
    assert!(err.to_string().contains("CRON"));
}

#[test]
fn valid_edit_is_applied_then_capped() {
    let mut roster = roster_of(1);
    let x = roster.entries[0].id();
    for day in 0..6 {
        roster.entries[0].schedule[day] = Am18;
    }
    let s = scheduler(1);

    let next = s.apply_edit(&roster, x, 10, T2gn).unwrap();
    assert_eq!(next.entries[0].schedule[10], T2gn);

    // 7e jour consécutif : ramené à OFF par le plafond
    let capped = s.apply_edit(&roster, x, 6, Am18).unwrap();
    assert_eq!(capped.entries[0].schedule[6], Off);
}

#[test]
fn edit_unknown_employee_fails() {
    let roster = roster_of(1);
    let err = scheduler(1)
        .apply_edit(&roster, EmployeeId::new(99), 0, Am18)
        .unwrap_err();
    assert_eq!(err, SchedError::UnknownEmployee(EmployeeId::new(99)));
}

#[test]
fn toggle_leave_flips_between_al_and_off() {
    let roster = roster_of(1);
    let x = roster.entries[0].id();
    let s = scheduler(1);

    let on_leave = s.toggle_leave(&roster, x, 2).unwrap();
    assert_eq!(on_leave.entries[0].schedule[2], Al);
    let back = s.toggle_leave(&on_leave, x, 2).unwrap();
    assert_eq!(back.entries[0].schedule[2], Off);
}

#[test]
fn seventh_consecutive_duty_day_is_forced_off() {
    let mut schedule = vec![Off; 30];
    for shift in schedule.iter_mut().take(7) {
        *shift = Am18;
    }
    let capped = enforce_rest_cap(&schedule, 6);
    assert!(capped[..6].iter().all(|s| *s == Am18));
    assert_eq!(capped[6], Off);
    assert_eq!(enforce_rest_cap(&capped, 6), capped);
}

#[test]
fn leave_resets_the_duty_run() {
    let schedule = [Am18, Am18, Am18, Al, Pm17, Pm17, Pm17, Pm17, Pm17, Pm17, Pm17];
    let capped = enforce_rest_cap(&schedule, 6);
    assert_eq!(capped[3], Al);
    assert_eq!(capped[10], Off);
    assert!(capped[4..10].iter().all(|s| *s == Pm17));
}

#[test]
fn generate_month_is_valid_for_several_seeds() {
    let mut roster = roster_of(20);
    roster.entries[0].schedule[3] = Al;
    roster.entries[5].schedule[17] = Al;

    for seed in 0..5 {
        let next = scheduler(seed).generate_month(&roster, september()).unwrap();
        assert_eq!(next.entries[0].schedule[3], Al);
        assert_eq!(next.entries[5].schedule[17], Al);
        assert!(next.entries.iter().all(|e| e.schedule.len() == 30));
        assert_no_forbidden_pairs(&next);
        for entry in &next.entries {
            assert_eq!(enforce_rest_cap(&entry.schedule, 6), entry.schedule);
        }
    }
}

#[test]
fn generate_month_reconciles_schedule_length() {
    let mut roster = roster_of(14);
    let february = RosterMonth::new(2024, 1).unwrap();

    roster.entries[2].schedule.truncate(12);
    let next = scheduler(4).generate_month(&roster, february).unwrap();
    assert_eq!(next.month, february);
    assert!(next.entries.iter().all(|e| e.schedule.len() == 29));
}

#[test]
fn generate_month_aborts_without_committing() {
    let mut roster = roster_of(14);
    roster.entries[0].schedule[3] = Al;
    let before = roster.clone();

    let err = scheduler(9).generate_month(&roster, september()).unwrap_err();
    assert!(matches!(err, SchedError::QuotaUnsatisfiable { day: 3, .. }), "{err}");
    assert_eq!(roster, before);
}

#[test]
fn auto_roster_keeps_hard_rules() {
    let roster = roster_of(20);
    for seed in 0..3 {
        let outcome = scheduler(seed).auto_roster(&roster, september()).unwrap();
        assert_no_forbidden_pairs(&outcome.roster);
        for entry in &outcome.roster.entries {
            assert_eq!(enforce_rest_cap(&entry.schedule, 6), entry.schedule);
        }
    }
}

#[test]
fn detect_conflicts_reports_hand_made_violations() {
    let mut roster = roster_of(1);
    roster.entries[0].schedule[0] = Pm17;
    roster.entries[0].schedule[1] = Am18;
    let conflicts = scheduler(1).detect_conflicts(&roster, false);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].day, Some(1));

    let with_coverage = scheduler(1).detect_conflicts(&roster, true);
    assert!(with_coverage.len() > conflicts.len());
}
