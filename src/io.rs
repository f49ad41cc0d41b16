use crate::model::{EmployeeFields, Roster};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import d'employés depuis CSV: header `emp_no,fusion_id,name,terminal_id,role`
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<EmployeeFields>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (line, rec) in rdr.deserialize::<EmployeeFields>().enumerate() {
        let fields = rec.with_context(|| format!("invalid employee row {}", line + 2))?;
        if fields.name.is_empty() {
            bail!("invalid employee row {} (empty name)", line + 2);
        }
        out.push(fields);
    }
    Ok(out)
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Nom de fichier d'export, ex. `Roster-September-2025.csv`.
pub fn export_file_name(roster: &Roster) -> String {
    format!("Roster-{}-{}.csv", roster.month.month_name(), roster.month.year())
}

/// Export CSV: `Emp No,Fusion ID,Employee Name,Terminal ID,Role,1..N`, un code par jour.
pub fn write_roster_csv<W: Write>(out: W, roster: &Roster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    let days = roster.days();

    let mut header: Vec<String> = ["Emp No", "Fusion ID", "Employee Name", "Terminal ID", "Role"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut buf = itoa::Buffer::new();
    header.extend((1..=days).map(|d| buf.format(d).to_owned()));
    w.write_record(&header)?;

    for entry in &roster.entries {
        let f = &entry.employee.fields;
        let mut row = vec![
            f.emp_no.as_str(),
            f.fusion_id.as_str(),
            f.name.as_str(),
            f.terminal_id.as_str(),
            f.role.as_str(),
        ];
        row.extend(entry.schedule.iter().take(days).map(|s| s.code()));
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_roster_csv<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_roster_csv(file, roster)
}
