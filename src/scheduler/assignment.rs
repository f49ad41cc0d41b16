use super::{eligibility::is_eligible, rest, util, LookAhead, SchedError};
use crate::config::{Quota, Rules, ShiftRestriction};
use crate::model::{Roster, RosterEntry, RosterMonth, ShiftType};
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, warn};

/// Calcule les affectations d'une journée sans rien écrire.
///
/// Renvoie `(index d'entrée, poste)` pour chaque employé hors congé : les
/// jetons de quota d'abord, puis `OFF` pour le reste du vivier.
///
/// Avec `rest_cap`, un candidat dont le poste serait ramené à `OFF` par le
/// plafond de jours consécutifs n'est pas retenu.
fn plan_day<R: Rng + ?Sized>(
    entries: &[RosterEntry],
    day: usize,
    quota: &Quota,
    restrictions: &[ShiftRestriction],
    look_ahead: LookAhead,
    rest_cap: Option<usize>,
    rng: &mut R,
) -> Result<Vec<(usize, ShiftType)>, SchedError> {
    let mut pool: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.schedule.get(day) != Some(&ShiftType::Al))
        .map(|(idx, _)| idx)
        .collect();
    let mut plan = Vec::with_capacity(pool.len());

    for shift in quota.tokens() {
        let mut order: Vec<usize> = (0..pool.len()).collect();
        order.shuffle(rng);

        let picked = order.into_iter().find(|&pos| {
            let entry = &entries[pool[pos]];
            is_eligible(
                restrictions,
                &entry.employee,
                shift,
                &entry.schedule,
                day,
                look_ahead,
            ) && rest_cap.map_or(true, |max| survives_rest_cap(&entry.schedule, day, shift, max))
        });

        let Some(pos) = picked else {
            return Err(SchedError::QuotaUnsatisfiable { shift, day });
        };
        plan.push((pool.remove(pos), shift));
    }

    plan.extend(pool.into_iter().map(|idx| (idx, ShiftType::Off)));
    Ok(plan)
}

fn survives_rest_cap(schedule: &[ShiftType], day: usize, shift: ShiftType, max: usize) -> bool {
    let mut simulated = schedule.to_vec();
    simulated[day] = shift;
    rest::enforce_rest_cap(&simulated, max)[day] == shift
}

fn apply_plan(entries: &mut [RosterEntry], day: usize, plan: Vec<(usize, ShiftType)>) {
    for (idx, shift) in plan {
        entries[idx].schedule[day] = shift;
    }
}

pub(super) fn assign_day<R: Rng + ?Sized>(
    roster: &Roster,
    day: usize,
    quota: &Quota,
    restrictions: &[ShiftRestriction],
    rules: &Rules,
    rng: &mut R,
) -> Result<Roster, SchedError> {
    util::check_day(day, roster.days())?;
    let mut next = util::fitted(roster);

    let plan = plan_day(
        &next.entries,
        day,
        quota,
        restrictions,
        LookAhead::BothNeighbours,
        Some(rules.max_consecutive_duty),
        rng,
    )
    .inspect_err(|err| warn!(%err, "auto-assign aborted"))?;
    debug!(day, assigned = plan.len(), "day planned");

    apply_plan(&mut next.entries, day, plan);
    rest::sweep_rest_cap(&mut next.entries, rules.max_consecutive_duty);
    Ok(next)
}

/// Génère le mois entier, jour après jour.
///
/// Seule la veille est contrôlée : le lendemain sera réécrit par l'itération
/// suivante, qui vérifie à son tour sa propre veille. Le plafond de repos
/// n'est appliqué qu'en fin de mois.
pub(super) fn generate_month<R: Rng + ?Sized>(
    roster: &Roster,
    month: RosterMonth,
    quota: &Quota,
    restrictions: &[ShiftRestriction],
    rules: &Rules,
    rng: &mut R,
) -> Result<Roster, SchedError> {
    month.first_day()?;
    let mut next = roster.clone();
    next.set_month(month);

    for day in 0..next.days() {
        let plan = plan_day(
            &next.entries,
            day,
            quota,
            restrictions,
            LookAhead::PreviousOnly,
            None,
            rng,
        )
        .inspect_err(|err| warn!(%err, %month, "auto-roster aborted"))?;
        apply_plan(&mut next.entries, day, plan);
    }

    rest::sweep_rest_cap(&mut next.entries, rules.max_consecutive_duty);
    info!(%month, employees = next.entries.len(), "month generated");
    Ok(next)
}
