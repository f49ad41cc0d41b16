use super::{rest::is_forbidden_transition, LookAhead};
use crate::config::ShiftRestriction;
use crate::model::{Employee, ShiftType};

/// Toutes les restrictions qui visent `employee` doivent autoriser `shift`.
pub fn restriction_allows(
    restrictions: &[ShiftRestriction],
    employee: &Employee,
    shift: ShiftType,
) -> bool {
    restrictions
        .iter()
        .filter(|r| r.matcher.matches(employee))
        .all(|r| r.allowed.contains(&shift))
}

/// Peut-on placer `shift` au jour `day` dans `schedule` pour cet employé ?
///
/// Les bornes sont vérifiées défensivement : un planning plus court que le
/// mois ne fait simplement pas intervenir le voisin absent.
pub fn is_eligible(
    restrictions: &[ShiftRestriction],
    employee: &Employee,
    shift: ShiftType,
    schedule: &[ShiftType],
    day: usize,
    look_ahead: LookAhead,
) -> bool {
    if !restriction_allows(restrictions, employee, shift) {
        return false;
    }

    let prev = day.checked_sub(1).and_then(|d| schedule.get(d));
    if prev.is_some_and(|p| is_forbidden_transition(*p, shift)) {
        return false;
    }

    if look_ahead == LookAhead::BothNeighbours {
        if let Some(next) = schedule.get(day + 1) {
            if is_forbidden_transition(shift, *next) {
                return false;
            }
        }
    }

    true
}
