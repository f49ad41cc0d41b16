use super::{rest, util, SchedError};
use crate::config::Rules;
use crate::model::{EmployeeId, Roster, ShiftType};
use tracing::debug;

/// Valide puis applique une modification manuelle d'un jour.
///
/// Seule la règle nuit -> jour est contrôlée, des deux côtés du jour modifié ;
/// le plafond de service est ensuite réappliqué au planning de l'employé.
pub(super) fn apply_edit(
    roster: &Roster,
    employee: EmployeeId,
    day: usize,
    shift: ShiftType,
    rules: &Rules,
) -> Result<Roster, SchedError> {
    util::check_day(day, roster.days())?;
    let mut next = util::fitted(roster);
    let entry = next
        .find_entry_mut(employee)
        .ok_or(SchedError::UnknownEmployee(employee))?;

    if let Some(&before) = day.checked_sub(1).and_then(|d| entry.schedule.get(d)) {
        if rest::is_forbidden_transition(before, shift) {
            return Err(SchedError::RejectedEdit { employee, day, before, after: shift });
        }
    }
    if let Some(&after) = entry.schedule.get(day + 1) {
        if rest::is_forbidden_transition(shift, after) {
            return Err(SchedError::RejectedEdit { employee, day, before: shift, after });
        }
    }

    entry.schedule[day] = shift;
    entry.schedule = rest::enforce_rest_cap(&entry.schedule, rules.max_consecutive_duty);
    debug!(%employee, day, %shift, "edit applied");
    Ok(next)
}

/// Pose ou retire un congé `AL` (bascule `AL` <-> `OFF`) via la même validation.
pub(super) fn toggle_leave(
    roster: &Roster,
    employee: EmployeeId,
    day: usize,
    rules: &Rules,
) -> Result<Roster, SchedError> {
    util::check_day(day, roster.days())?;
    let current = roster
        .find_entry(employee)
        .ok_or(SchedError::UnknownEmployee(employee))?
        .schedule
        .get(day)
        .copied();
    let target = if current == Some(ShiftType::Al) {
        ShiftType::Off
    } else {
        ShiftType::Al
    };
    apply_edit(roster, employee, day, target, rules)
}
