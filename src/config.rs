use crate::model::{Employee, EmployeeId, ShiftCategory, ShiftType};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration complète du moteur : quotas, restrictions, règles de repos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub quotas: Quota,
    #[serde(default)]
    pub restrictions: Vec<ShiftRestriction>,
    #[serde(default)]
    pub rules: Rules,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            quotas: Quota::default(),
            restrictions: vec![ShiftRestriction {
                matcher: EmployeeMatcher::NameContains("maria".into()),
                allowed: vec![ShiftType::Am18, ShiftType::Crod],
            }],
            rules: Rules::default(),
        }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<()> {
        self.quotas.validate()?;
        for restriction in &self.restrictions {
            restriction.validate()?;
        }
        self.rules.validate()?;
        Ok(())
    }
}

/// Effectif requis pour un code de poste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaEntry {
    pub shift: ShiftType,
    pub heads: usize,
}

/// Quotas journaliers, dans l'ordre déclaré.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quota {
    entries: Vec<QuotaEntry>,
}

impl Default for Quota {
    fn default() -> Self {
        Self::new([
            (ShiftType::Am18, 4),
            (ShiftType::Pm17, 4),
            (ShiftType::T2gd, 1),
            (ShiftType::T2gn, 1),
            (ShiftType::Crod, 2),
            (ShiftType::Cron, 2),
        ])
    }
}

impl Quota {
    pub fn new<I: IntoIterator<Item = (ShiftType, usize)>>(entries: I) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(shift, heads)| QuotaEntry { shift, heads })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[QuotaEntry] {
        &self.entries
    }

    pub fn required(&self, shift: ShiftType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.shift == shift)
            .map(|e| e.heads)
            .sum()
    }

    pub fn total_heads(&self) -> usize {
        self.entries.iter().map(|e| e.heads).sum()
    }

    /// Jetons à placer pour une journée : postes de jour d'abord, puis de nuit,
    /// chaque groupe dans l'ordre déclaré.
    pub fn tokens(&self) -> Vec<ShiftType> {
        let mut ordered: Vec<&QuotaEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|e| match e.shift.category() {
            ShiftCategory::Day => 0u8,
            ShiftCategory::Night => 1,
            ShiftCategory::Rest => 2,
        });
        ordered
            .into_iter()
            .flat_map(|e| std::iter::repeat(e.shift).take(e.heads))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.shift.is_rest() {
                bail!("quota cannot target rest label {}", entry.shift);
            }
            if self.entries[..idx].iter().any(|e| e.shift == entry.shift) {
                bail!("duplicate quota for {}", entry.shift);
            }
        }
        Ok(())
    }
}

/// Sélection d'employés visée par une restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeMatcher {
    Id(EmployeeId),
    /// Sous-chaîne du nom, insensible à la casse.
    NameContains(String),
}

impl EmployeeMatcher {
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            EmployeeMatcher::Id(id) => employee.id == *id,
            EmployeeMatcher::NameContains(token) => employee
                .name()
                .to_lowercase()
                .contains(&token.to_lowercase()),
        }
    }
}

/// Restreint les employés visés à un ensemble fermé de postes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRestriction {
    pub matcher: EmployeeMatcher,
    pub allowed: Vec<ShiftType>,
}

impl ShiftRestriction {
    fn validate(&self) -> Result<()> {
        if self.allowed.is_empty() {
            bail!("restriction {:?} must allow at least one shift", self.matcher);
        }
        if let EmployeeMatcher::NameContains(token) = &self.matcher {
            if token.trim().is_empty() {
                bail!("restriction name token cannot be empty");
            }
        }
        Ok(())
    }
}

/// Règles de repos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default = "default_max_consecutive_duty")]
    pub max_consecutive_duty: usize,
    #[serde(default = "default_min_off_days")]
    pub min_off_days: usize,
    #[serde(default = "default_balance_iterations")]
    pub balance_iterations_per_employee: usize,
}

fn default_max_consecutive_duty() -> usize {
    6
}
fn default_min_off_days() -> usize {
    7
}
fn default_balance_iterations() -> usize {
    10
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_consecutive_duty: default_max_consecutive_duty(),
            min_off_days: default_min_off_days(),
            balance_iterations_per_employee: default_balance_iterations(),
        }
    }
}

impl Rules {
    fn validate(&self) -> Result<()> {
        if self.max_consecutive_duty == 0 {
            bail!("max_consecutive_duty must be > 0");
        }
        if self.balance_iterations_per_employee == 0 {
            bail!("balance_iterations_per_employee must be > 0");
        }
        Ok(())
    }
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<RosterConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: RosterConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &RosterConfig) -> Result<()> {
    config.validate()?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json)
        .with_context(|| format!("writing config {}", path.as_ref().display()))?;
    Ok(())
}
