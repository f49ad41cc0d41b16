#![forbid(unsafe_code)]
use roulement::{EmployeeFields, EmployeeId, Roster, RosterMonth, SchedError, ShiftType};

fn roster(n: usize) -> Roster {
    let mut roster = Roster::new(RosterMonth::new(2025, 8).unwrap());
    for i in 0..n {
        roster.add_employee(EmployeeFields {
            name: format!("Agent {i}"),
            ..Default::default()
        });
    }
    roster
}

#[test]
fn employee_ids_follow_the_highest_one() {
    let mut r = roster(3);
    assert_eq!(r.entries[2].id(), EmployeeId::new(3));
    assert_eq!(r.remove_employees(&[EmployeeId::new(2)]), 1);
    let id = r.add_employee(EmployeeFields::default());
    assert_eq!(id, EmployeeId::new(4));
    assert!(r.entries.iter().all(|e| e.schedule.len() == 30));
}

#[test]
fn set_month_pads_and_truncates() {
    let mut r = roster(1);
    r.entries[0].schedule[29] = ShiftType::Pm17;
    r.toggle_holiday(30).unwrap();

    r.set_month(RosterMonth::new(2025, 1).unwrap());
    assert_eq!(r.entries[0].schedule.len(), 28);
    assert!(r.holidays.is_empty());

    r.set_month(RosterMonth::new(2025, 9).unwrap());
    assert_eq!(r.entries[0].schedule.len(), 31);
    assert_eq!(r.entries[0].schedule[30], ShiftType::Off);
}

#[test]
fn clear_keeps_leave() {
    let mut r = roster(1);
    r.entries[0].schedule[0] = ShiftType::Am18;
    r.entries[0].schedule[1] = ShiftType::Al;
    r.clear_shifts();
    assert_eq!(r.entries[0].schedule[0], ShiftType::Off);
    assert_eq!(r.entries[0].schedule[1], ShiftType::Al);
    assert_eq!(r.off_counts(), vec![(EmployeeId::new(1), 29)]);
}

#[test]
fn holidays_toggle_within_the_month() {
    let mut r = roster(0);
    assert!(r.toggle_holiday(25).unwrap());
    assert!(!r.toggle_holiday(25).unwrap());
    assert_eq!(
        r.toggle_holiday(31).unwrap_err(),
        SchedError::InvalidHoliday { day: 31, days: 30 }
    );
}
