mod assignment;
mod balance;
mod conflicts;
mod eligibility;
mod mutate;
mod rest;
mod types;
mod util;

pub use eligibility::{is_eligible, restriction_allows};
pub use rest::{enforce_rest_cap, is_forbidden_transition};
pub use types::{BalanceOutcome, Conflict, ConflictKind, LookAhead, SchedError};

use crate::config::RosterConfig;
use crate::model::{EmployeeId, Roster, RosterMonth, ShiftType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Scheduler : configuration du moteur + source d'aléa explicite.
///
/// Chaque opération reçoit un roster emprunté et en renvoie un nouveau ;
/// en cas d'erreur le roster de l'appelant reste intact.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: RosterConfig,
    rng: ChaCha8Rng,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(RosterConfig::default())
    }
}

impl Scheduler {
    pub fn new(config: RosterConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Tirages reproductibles (tests, CLI `--seed`).
    pub fn with_seed(config: RosterConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn apply_edit(
        &self,
        roster: &Roster,
        employee: EmployeeId,
        day: usize,
        shift: ShiftType,
    ) -> Result<Roster, SchedError> {
        mutate::apply_edit(roster, employee, day, shift, &self.config.rules)
    }

    pub fn toggle_leave(
        &self,
        roster: &Roster,
        employee: EmployeeId,
        day: usize,
    ) -> Result<Roster, SchedError> {
        mutate::toggle_leave(roster, employee, day, &self.config.rules)
    }

    pub fn assign_day(&mut self, roster: &Roster, day: usize) -> Result<Roster, SchedError> {
        assignment::assign_day(
            roster,
            day,
            &self.config.quotas,
            &self.config.restrictions,
            &self.config.rules,
            &mut self.rng,
        )
    }

    pub fn generate_month(
        &mut self,
        roster: &Roster,
        month: RosterMonth,
    ) -> Result<Roster, SchedError> {
        assignment::generate_month(
            roster,
            month,
            &self.config.quotas,
            &self.config.restrictions,
            &self.config.rules,
            &mut self.rng,
        )
    }

    pub fn balance_rest_days(&self, roster: &Roster, minimum_off: usize) -> BalanceOutcome {
        balance::balance_rest_days(
            roster,
            &self.config.restrictions,
            &self.config.rules,
            minimum_off,
        )
    }

    /// Roster automatique complet : génération, équilibrage des repos, plafond final.
    pub fn auto_roster(
        &mut self,
        roster: &Roster,
        month: RosterMonth,
    ) -> Result<BalanceOutcome, SchedError> {
        let generated = self.generate_month(roster, month)?;
        Ok(self.balance_rest_days(&generated, self.config.rules.min_off_days))
    }

    pub fn detect_conflicts(&self, roster: &Roster, coverage: bool) -> Vec<Conflict> {
        conflicts::detect_conflicts(roster, &self.config, coverage)
    }
}
