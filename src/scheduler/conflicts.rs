use super::{rest::is_forbidden_transition, util, Conflict, ConflictKind};
use crate::config::RosterConfig;
use crate::model::Roster;

/// Relève les anomalies d'un roster ; `coverage` ajoute le contrôle des quotas jour par jour.
pub(super) fn detect_conflicts(roster: &Roster, config: &RosterConfig, coverage: bool) -> Vec<Conflict> {
    let mut out = Vec::new();
    let max_run = config.rules.max_consecutive_duty;
    let minimum = config.rules.min_off_days;

    for entry in roster.entries.iter() {
        let employee = Some(entry.id());

        for (day, pair) in entry.schedule.windows(2).enumerate() {
            if is_forbidden_transition(pair[0], pair[1]) {
                out.push(Conflict {
                    employee,
                    day: Some(day + 1),
                    kind: ConflictKind::ForbiddenTransition { from: pair[0], to: pair[1] },
                });
            }
        }

        for (start, run) in util::duty_runs(&entry.schedule) {
            if run > max_run {
                out.push(Conflict {
                    employee,
                    day: Some(start + max_run),
                    kind: ConflictKind::RestCapExceeded { run },
                });
            }
        }

        let off_days = entry.off_days();
        if off_days < minimum {
            out.push(Conflict {
                employee,
                day: None,
                kind: ConflictKind::RestShortfall { off_days, minimum },
            });
        }
    }

    if coverage {
        for day in 0..roster.days() {
            for quota in config.quotas.entries() {
                let actual = roster
                    .entries
                    .iter()
                    .filter(|e| e.schedule.get(day) == Some(&quota.shift))
                    .count();
                if actual != quota.heads {
                    out.push(Conflict {
                        employee: None,
                        day: Some(day),
                        kind: ConflictKind::QuotaMismatch {
                            shift: quota.shift,
                            expected: quota.heads,
                            actual,
                        },
                    });
                }
            }
        }
    }

    out
}
