#![forbid(unsafe_code)]
//! Roulement — moteur de planning mensuel par codes de poste (sans BD).
//!
//! - Quotas journaliers par poste, remplissage glouton avec tirage aléatoire injecté.
//! - Règles dures : pas de nuit suivie d'un poste de jour, 6 jours de service max.
//! - Équilibrage des repos par échanges locaux bornés.
//! - Stockage fichiers (JSON/CSV) ; chaque opération renvoie un nouveau roster.

pub mod config;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use config::{
    export_config_json, load_config_from_file, EmployeeMatcher, Quota, QuotaEntry, RosterConfig,
    Rules, ShiftRestriction,
};
pub use model::{
    Employee, EmployeeFields, EmployeeId, Roster, RosterEntry, RosterMonth, ShiftCategory,
    ShiftType,
};
pub use scheduler::{
    enforce_rest_cap, is_eligible, is_forbidden_transition, BalanceOutcome, Conflict,
    ConflictKind, LookAhead, SchedError, Scheduler,
};
pub use storage::{JsonStorage, Storage};
