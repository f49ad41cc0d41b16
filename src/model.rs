use crate::scheduler::SchedError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Catégorie d'un code de poste : elle seule pilote les contraintes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftCategory {
    Day,
    Night,
    Rest,
}

/// Code de poste affecté à une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShiftType {
    Off,
    Am18,
    Pm17,
    T2gd,
    T2gn,
    Crod,
    Cron,
    /// Congé approuvé (annual leave)
    Al,
}

impl ShiftType {
    pub const ALL: [ShiftType; 8] = [
        ShiftType::Off,
        ShiftType::Am18,
        ShiftType::Pm17,
        ShiftType::T2gd,
        ShiftType::T2gn,
        ShiftType::Crod,
        ShiftType::Cron,
        ShiftType::Al,
    ];

    pub fn category(self) -> ShiftCategory {
        match self {
            ShiftType::Am18 | ShiftType::T2gd | ShiftType::Crod => ShiftCategory::Day,
            ShiftType::Pm17 | ShiftType::T2gn | ShiftType::Cron => ShiftCategory::Night,
            ShiftType::Off | ShiftType::Al => ShiftCategory::Rest,
        }
    }

    pub fn is_day(self) -> bool {
        self.category() == ShiftCategory::Day
    }

    pub fn is_night(self) -> bool {
        self.category() == ShiftCategory::Night
    }

    pub fn is_rest(self) -> bool {
        self.category() == ShiftCategory::Rest
    }

    /// Toute journée hors repos compte comme journée de service.
    pub fn is_duty(self) -> bool {
        !self.is_rest()
    }

    pub fn code(self) -> &'static str {
        match self {
            ShiftType::Off => "OFF",
            ShiftType::Am18 => "AM18",
            ShiftType::Pm17 => "PM17",
            ShiftType::T2gd => "T2GD",
            ShiftType::T2gn => "T2GN",
            ShiftType::Crod => "CROD",
            ShiftType::Cron => "CRON",
            ShiftType::Al => "AL",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ShiftType::ALL
            .into_iter()
            .find(|shift| shift.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown shift code: {wanted}"))
    }
}

/// Identifiant fort pour Employee (entier stable, jamais réattribué)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u32);

impl EmployeeId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Champs descriptifs libres d'un employé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFields {
    #[serde(default)]
    pub emp_no: String,
    #[serde(default)]
    pub fusion_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub terminal_id: String,
    #[serde(default)]
    pub role: String,
}

/// Employé du roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub fields: EmployeeFields,
}

impl Employee {
    pub fn new(id: EmployeeId, fields: EmployeeFields) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }
}

/// Un employé et son planning du mois actif (une entrée par jour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub employee: Employee,
    #[serde(default)]
    pub schedule: Vec<ShiftType>,
}

impl RosterEntry {
    pub fn id(&self) -> EmployeeId {
        self.employee.id
    }

    /// Nombre de jours `OFF` (le congé `AL` n'est pas compté).
    pub fn off_days(&self) -> usize {
        self.schedule.iter().filter(|s| **s == ShiftType::Off).count()
    }

    /// Ramène le planning à `days` entrées (complété par `OFF` ou tronqué).
    pub fn fit_to(&mut self, days: usize) {
        self.schedule.resize(days, ShiftType::Off);
    }
}

/// Mois actif : année + mois indexé à partir de 0 (janvier = 0).
///
/// Toujours valide : la désérialisation passe par [`RosterMonth::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMonth", into = "RawMonth")]
pub struct RosterMonth {
    year: i32,
    month: u32,
}

#[derive(Serialize, Deserialize)]
struct RawMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonth> for RosterMonth {
    type Error = SchedError;

    fn try_from(raw: RawMonth) -> Result<Self, Self::Error> {
        RosterMonth::new(raw.year, raw.month)
    }
}

impl From<RosterMonth> for RawMonth {
    fn from(m: RosterMonth) -> Self {
        RawMonth { year: m.year, month: m.month }
    }
}

impl RosterMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, SchedError> {
        let candidate = Self { year, month };
        candidate.first_day()?;
        Ok(candidate)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Mois indexé à partir de 0.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> Result<NaiveDate, SchedError> {
        self.month
            .checked_add(1)
            .and_then(|m| NaiveDate::from_ymd_opt(self.year, m, 1))
            .ok_or(SchedError::InvalidMonth { year: self.year, month: self.month })
    }

    /// Nombre de jours du mois (28 à 31).
    pub fn days(&self) -> usize {
        let Ok(first) = self.first_day() else {
            return 0;
        };
        let next = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        next.map_or(0, |n| n.signed_duration_since(first).num_days() as usize)
    }

    /// Libellé anglais du mois, ex. `September`.
    pub fn month_name(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B").to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for RosterMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// Roster complet du mois actif
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub month: RosterMonth,
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
    /// Jours fériés (numéros 1..=N), purement informatifs.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub holidays: BTreeSet<u32>,
}

impl Roster {
    pub fn new(month: RosterMonth) -> Self {
        Self {
            month,
            entries: Vec::new(),
            holidays: BTreeSet::new(),
        }
    }

    pub fn days(&self) -> usize {
        self.month.days()
    }

    pub fn find_entry(&self, id: EmployeeId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }
    pub fn find_entry_mut(&mut self, id: EmployeeId) -> Option<&mut RosterEntry> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    /// Ajoute un employé (id = max + 1) avec un mois entièrement `OFF`.
    pub fn add_employee(&mut self, fields: EmployeeFields) -> EmployeeId {
        let next = self.entries.iter().map(|e| e.id().get()).max().map_or(1, |m| m + 1);
        let id = EmployeeId::new(next);
        self.entries.push(RosterEntry {
            employee: Employee::new(id, fields),
            schedule: vec![ShiftType::Off; self.days()],
        });
        id
    }

    pub fn remove_employees(&mut self, ids: &[EmployeeId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id()));
        before - self.entries.len()
    }

    /// Change de mois et réaligne tous les plannings sur le nouveau nombre de jours.
    pub fn set_month(&mut self, month: RosterMonth) {
        self.month = month;
        let days = self.days();
        self.holidays.retain(|d| (*d as usize) <= days);
        self.fit_schedules();
    }

    pub fn fit_schedules(&mut self) {
        let days = self.days();
        for entry in &mut self.entries {
            entry.fit_to(days);
        }
    }

    pub fn toggle_holiday(&mut self, day: u32) -> Result<bool, SchedError> {
        let days = self.days();
        if day == 0 || day as usize > days {
            return Err(SchedError::InvalidHoliday { day, days });
        }
        if self.holidays.remove(&day) {
            Ok(false)
        } else {
            self.holidays.insert(day);
            Ok(true)
        }
    }

    /// Remet tout à `OFF` sauf les congés `AL`.
    pub fn clear_shifts(&mut self) {
        for entry in &mut self.entries {
            for shift in entry.schedule.iter_mut().filter(|s| **s != ShiftType::Al) {
                *shift = ShiftType::Off;
            }
        }
    }

    pub fn off_counts(&self) -> Vec<(EmployeeId, usize)> {
        self.entries.iter().map(|e| (e.id(), e.off_days())).collect()
    }
}
