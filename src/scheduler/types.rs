use crate::model::{EmployeeId, Roster, ShiftType};
use std::fmt;
use thiserror::Error;

/// Portée de la vérification d'adjacence lors d'une affectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookAhead {
    /// Veille seulement (génération mensuelle : le lendemain n'est pas encore fixé).
    PreviousOnly,
    /// Veille et lendemain.
    BothNeighbours,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// nuit suivie d'un poste de jour
    ForbiddenTransition { from: ShiftType, to: ShiftType },
    /// série de service au-delà du plafond
    RestCapExceeded { run: usize },
    RestShortfall { off_days: usize, minimum: usize },
    QuotaMismatch { shift: ShiftType, expected: usize, actual: usize },
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::ForbiddenTransition { from, to } => write!(f, "transition {from}->{to}"),
            ConflictKind::RestCapExceeded { run } => write!(f, "{run} consecutive duty days"),
            ConflictKind::RestShortfall { off_days, minimum } => {
                write!(f, "{off_days} off days (minimum {minimum})")
            }
            ConflictKind::QuotaMismatch { shift, expected, actual } => {
                write!(f, "{shift}: {actual}/{expected}")
            }
        }
    }
}

/// Anomalie relevée sur un roster. `day` est indexé à partir de 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub employee: Option<EmployeeId>,
    pub day: Option<usize>,
    pub kind: ConflictKind,
}

/// Résultat de l'équilibrage des repos (n'échoue jamais).
#[derive(Debug, Clone)]
pub struct BalanceOutcome {
    pub roster: Roster,
    pub fully_balanced: bool,
    pub swaps: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error(
        "rejected edit for employee {employee}: night shift {before} cannot be followed by day shift {after} (day {})",
        .day + 1
    )]
    RejectedEdit {
        employee: EmployeeId,
        day: usize,
        before: ShiftType,
        after: ShiftType,
    },
    #[error("quota unsatisfiable: no eligible employee for a {shift} shift on day {}", .day + 1)]
    QuotaUnsatisfiable { shift: ShiftType, day: usize },
    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),
    #[error("day index {day} out of range (month has {days} days)")]
    DayOutOfRange { day: usize, days: usize },
    #[error("invalid month: {year}/{month} (month is zero-based)")]
    InvalidMonth { year: i32, month: u32 },
    #[error("invalid holiday day {day} (month has {days} days)")]
    InvalidHoliday { day: u32, days: usize },
}
