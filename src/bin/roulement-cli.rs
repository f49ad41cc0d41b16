#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use roulement::{
    config::{export_config_json, load_config_from_file, RosterConfig},
    io,
    model::{EmployeeId, Roster, RosterMonth, ShiftType},
    scheduler::{BalanceOutcome, Scheduler},
    storage::{JsonStorage, Storage},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning mensuel (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    /// Fichier JSON de configuration (quotas, restrictions, règles)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Graine du tirage aléatoire (résultats reproductibles)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un roster vide pour un mois
    Init {
        #[arg(long)]
        year: i32,
        /// 1 = janvier
        #[arg(long)]
        month: u32,
        /// Écrase un roster existant
        #[arg(long)]
        force: bool,
    },

    /// Écrire la configuration par défaut
    ConfigInit {
        #[arg(long, default_value = "roulement.json")]
        out: String,
    },

    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Modifier un jour à la main (règle nuit -> jour vérifiée)
    SetShift {
        #[arg(long)]
        employee: u32,
        /// 1 = premier jour du mois
        #[arg(long)]
        day: usize,
        #[arg(long)]
        shift: String,
    },

    /// Poser / retirer un congé AL
    ToggleLeave {
        #[arg(long)]
        employee: u32,
        #[arg(long)]
        day: usize,
    },

    /// Marquer / démarquer un jour férié
    ToggleHoliday {
        #[arg(long)]
        day: u32,
    },

    /// Remplir une journée selon les quotas
    AssignDay {
        #[arg(long)]
        day: usize,
    },

    /// Générer le mois complet puis équilibrer les repos
    Generate {
        #[arg(long, requires = "month")]
        year: Option<i32>,
        #[arg(long, requires = "year")]
        month: Option<u32>,
        /// Ne pas lancer l'équilibrage des repos
        #[arg(long)]
        no_balance: bool,
    },

    /// Équilibrer les repos du roster courant
    Balance {
        #[arg(long)]
        min_off: Option<usize>,
    },

    /// Remettre tous les jours à OFF (les congés AL sont conservés)
    Clear,

    /// Vérifier les conflits
    Check {
        /// Contrôle aussi les quotas de chaque jour
        #[arg(long)]
        coverage: bool,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        /// Fichier CSV ; un dossier reçoit `Roster-<Mois>-<Année>.csv`
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = match &cli.config {
        Some(path) => load_config_from_file(path)?,
        None => RosterConfig::default(),
    };
    let mut scheduler = match cli.seed {
        Some(seed) => Scheduler::with_seed(config, seed),
        None => Scheduler::new(config),
    };

    let storage = JsonStorage::open(&cli.roster);
    let load = || -> Result<Roster> {
        storage
            .load()?
            .with_context(|| format!("no roster at {}, run `init` first", cli.roster))
    };

    let code = match cli.cmd {
        Commands::Init { year, month, force } => {
            let month = human_month(year, month)?;
            if !force && storage.load()?.is_some() {
                bail!("{} already exists (use --force)", cli.roster);
            }
            storage.save(&Roster::new(month))?;
            println!("Roster {} initialised ({} days)", month, month.days());
            0
        }
        Commands::ConfigInit { out } => {
            export_config_json(&out, scheduler.config())?;
            println!("Default configuration written to {out}");
            0
        }
        Commands::ImportEmployees { csv } => {
            let mut roster = load()?;
            let employees = io::import_employees_csv(csv)?;
            let count = employees.len();
            for fields in employees {
                roster.add_employee(fields);
            }
            storage.save(&roster)?;
            println!("{count} employee(s) imported");
            0
        }
        Commands::SetShift { employee, day, shift } => {
            let roster = load()?;
            let shift: ShiftType = shift.parse().map_err(anyhow::Error::msg)?;
            let next =
                scheduler.apply_edit(&roster, EmployeeId::new(employee), day_index(day)?, shift)?;
            storage.save(&next)?;
            0
        }
        Commands::ToggleLeave { employee, day } => {
            let roster = load()?;
            let next = scheduler.toggle_leave(&roster, EmployeeId::new(employee), day_index(day)?)?;
            storage.save(&next)?;
            0
        }
        Commands::ToggleHoliday { day } => {
            let mut roster = load()?;
            let marked = roster.toggle_holiday(day)?;
            storage.save(&roster)?;
            println!("Day {day} {}", if marked { "marked as holiday" } else { "unmarked" });
            0
        }
        Commands::AssignDay { day } => {
            let roster = load()?;
            let next = scheduler.assign_day(&roster, day_index(day)?)?;
            storage.save(&next)?;
            println!("Day {day} assigned");
            0
        }
        Commands::Generate { year, month, no_balance } => {
            let roster = load()?;
            let month = match (year, month) {
                (Some(y), Some(m)) => human_month(y, m)?,
                _ => roster.month,
            };
            if no_balance {
                let next = scheduler.generate_month(&roster, month)?;
                storage.save(&next)?;
                println!("Roster {month} generated");
                0
            } else {
                let outcome = scheduler.auto_roster(&roster, month)?;
                storage.save(&outcome.roster)?;
                println!("Roster {month} generated");
                report_balance(&outcome, scheduler.config().rules.min_off_days)
            }
        }
        Commands::Balance { min_off } => {
            let roster = load()?;
            let minimum = min_off.unwrap_or(scheduler.config().rules.min_off_days);
            let outcome = scheduler.balance_rest_days(&roster, minimum);
            storage.save(&outcome.roster)?;
            report_balance(&outcome, minimum)
        }
        Commands::Clear => {
            let mut roster = load()?;
            roster.clear_shifts();
            storage.save(&roster)?;
            println!("All shifts cleared");
            0
        }
        Commands::Check { coverage, report } => {
            let roster = load()?;
            let conflicts = scheduler.detect_conflicts(&roster, coverage);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    let who = c.employee.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
                    let day = c.day.map(|d| (d + 1).to_string()).unwrap_or_else(|| "-".into());
                    eprintln!("  {who} | day {day} | {}", c.kind);
                }
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["employee_id", "day", "conflict"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.employee.map(|id| id.get().to_string()).unwrap_or_default(),
                            c.day.map(|d| (d + 1).to_string()).unwrap_or_default(),
                            c.kind.to_string(),
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::List { out_json, out_csv } => {
            let roster = load()?;
            if let Some(path) = out_json {
                io::export_roster_json(path, &roster)?;
            }
            if let Some(path) = out_csv {
                let mut path = std::path::PathBuf::from(path);
                if path.is_dir() {
                    path.push(io::export_file_name(&roster));
                }
                io::export_roster_csv(&path, &roster)?;
            }
            println!("{} | {} employee(s)", roster.month, roster.entries.len());
            for entry in &roster.entries {
                let codes: Vec<&str> = entry.schedule.iter().map(|s| s.code()).collect();
                println!(
                    "{} | {} | {} | off={}",
                    entry.id(),
                    entry.employee.name(),
                    codes.join(" "),
                    entry.off_days()
                );
            }
            0
        }
    };

    std::process::exit(code);
}

fn human_month(year: i32, month: u32) -> Result<RosterMonth> {
    if !(1..=12).contains(&month) {
        bail!("month must be between 1 and 12");
    }
    Ok(RosterMonth::new(year, month - 1)?)
}

fn day_index(day: usize) -> Result<usize> {
    day.checked_sub(1).context("day numbers start at 1")
}

fn report_balance(outcome: &BalanceOutcome, minimum: usize) -> i32 {
    if outcome.fully_balanced {
        println!("Rest balanced ({} swap(s))", outcome.swaps);
        return 0;
    }
    eprintln!("Rest floor of {minimum} OFF day(s) not reached for:");
    for entry in outcome.roster.entries.iter().filter(|e| e.off_days() < minimum) {
        eprintln!("  {} {} ({} OFF)", entry.id(), entry.employee.name(), entry.off_days());
    }
    2
}
