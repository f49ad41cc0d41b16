use super::SchedError;
use crate::model::{Roster, ShiftType};

pub(super) fn check_day(day: usize, days: usize) -> Result<(), SchedError> {
    if day >= days {
        return Err(SchedError::DayOutOfRange { day, days });
    }
    Ok(())
}

/// Copie de travail dont les plannings ont exactement la longueur du mois.
pub(super) fn fitted(roster: &Roster) -> Roster {
    let mut copy = roster.clone();
    copy.fit_schedules();
    copy
}

/// Séries de service consécutives : (premier jour, longueur).
pub(super) fn duty_runs(schedule: &[ShiftType]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (day, shift) in schedule.iter().enumerate() {
        match (shift.is_duty(), start) {
            (true, None) => start = Some(day),
            (false, Some(s)) => {
                runs.push((s, day - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, schedule.len() - s));
    }
    runs
}
