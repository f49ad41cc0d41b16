use crate::model::{RosterEntry, ShiftType};

/// Vrai exactement quand un poste de nuit est suivi, le lendemain, d'un poste de jour.
pub fn is_forbidden_transition(prev: ShiftType, next: ShiftType) -> bool {
    prev.is_night() && next.is_day()
}

/// Force un `OFF` dès qu'une série de service dépasse `max_consecutive` jours.
///
/// Les repos (`OFF`, `AL`) remettent le compteur à zéro. Seul un jour de
/// service peut être réécrit, un congé n'est donc jamais touché. Idempotent.
pub fn enforce_rest_cap(schedule: &[ShiftType], max_consecutive: usize) -> Vec<ShiftType> {
    let mut out = schedule.to_vec();
    let mut run = 0usize;
    for shift in out.iter_mut() {
        if shift.is_rest() {
            run = 0;
            continue;
        }
        run += 1;
        if run > max_consecutive {
            *shift = ShiftType::Off;
            run = 0;
        }
    }
    out
}

pub(super) fn sweep_rest_cap(entries: &mut [RosterEntry], max_consecutive: usize) {
    for entry in entries.iter_mut() {
        entry.schedule = enforce_rest_cap(&entry.schedule, max_consecutive);
    }
}
