use super::{eligibility::is_eligible, rest, util, BalanceOutcome, LookAhead};
use crate::config::{Rules, ShiftRestriction};
use crate::model::{Roster, ShiftType};
use tracing::{debug, info, warn};

/// Échange retenu : le jour `day` de `needy` passe à `donor`.
struct Swap {
    needy: usize,
    donor: usize,
    day: usize,
    donor_schedule: Vec<ShiftType>,
}

pub(super) fn balance_rest_days(
    roster: &Roster,
    restrictions: &[ShiftRestriction],
    rules: &Rules,
    minimum_off: usize,
) -> BalanceOutcome {
    let mut next = util::fitted(roster);
    let max_iterations = next.entries.len() * rules.balance_iterations_per_employee;
    let mut swaps = 0usize;

    for _ in 0..max_iterations {
        let counts: Vec<usize> = next.entries.iter().map(|e| e.off_days()).collect();

        // tri stable : à égalité, l'ordre du roster décide
        let mut needy: Vec<usize> = (0..counts.len()).filter(|&i| counts[i] < minimum_off).collect();
        needy.sort_by_key(|&i| counts[i]);
        let mut donors: Vec<usize> = (0..counts.len()).filter(|&i| counts[i] > minimum_off).collect();
        donors.sort_by_key(|&i| std::cmp::Reverse(counts[i]));

        let Some(&neediest) = needy.first() else {
            break;
        };

        let Some(swap) = find_swap(&next, neediest, &donors, restrictions, rules) else {
            warn!(
                employee = %next.entries[neediest].id(),
                off_days = counts[neediest],
                minimum_off,
                "no valid swap found, rest balancing stopped early"
            );
            break;
        };

        debug!(
            from = %next.entries[swap.needy].id(),
            to = %next.entries[swap.donor].id(),
            day = swap.day,
            "rest swap"
        );
        next.entries[swap.needy].schedule[swap.day] = ShiftType::Off;
        next.entries[swap.donor].schedule = swap.donor_schedule;
        swaps += 1;
    }

    rest::sweep_rest_cap(&mut next.entries, rules.max_consecutive_duty);
    let fully_balanced = next.entries.iter().all(|e| e.off_days() >= minimum_off);
    info!(swaps, fully_balanced, "rest balancing done");

    BalanceOutcome {
        roster: next,
        fully_balanced,
        swaps,
    }
}

fn find_swap(
    roster: &Roster,
    needy: usize,
    donors: &[usize],
    restrictions: &[ShiftRestriction],
    rules: &Rules,
) -> Option<Swap> {
    let needy_schedule = &roster.entries[needy].schedule;

    for (day, &shift) in needy_schedule.iter().enumerate() {
        if shift.is_rest() {
            continue;
        }
        for &donor in donors {
            let entry = &roster.entries[donor];
            if entry.schedule[day] != ShiftType::Off {
                continue;
            }
            if !is_eligible(
                restrictions,
                &entry.employee,
                shift,
                &entry.schedule,
                day,
                LookAhead::BothNeighbours,
            ) {
                continue;
            }

            let mut simulated = entry.schedule.clone();
            simulated[day] = shift;
            let simulated = rest::enforce_rest_cap(&simulated, rules.max_consecutive_duty);
            // le poste donné doit tenir après le plafond de service
            if simulated[day] == ShiftType::Off {
                continue;
            }

            return Some(Swap {
                needy,
                donor,
                day,
                donor_schedule: simulated,
            });
        }
    }
    None
}
