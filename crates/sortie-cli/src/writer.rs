//! CSV flight plan output.

use std::path::Path;

use anyhow::{Context, Result};
use sortie_core::models::SortiePlan;

/// Write the plan as a CSV table.
///
/// The header is `Sorties` followed by one `Drone_k` column per
/// available drone; each row carries a sortie label and its flight
/// ids, padded by [`SortiePlan::rows`] when a sortie runs short. An
/// empty plan produces a header-only file.
pub fn write_flight_plan(plan: &SortiePlan, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut header = vec!["Sorties".to_string()];
    for k in 1..=plan.drone_count {
        header.push(format!("Drone_{k}"));
    }
    writer.write_record(&header)?;

    for row in plan.rows() {
        let mut record = vec![row.sortie];
        record.extend(row.drones);
        writer.write_record(&record)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortie_core::models::{Sortie, NO_FLIGHT};
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample_plan() -> SortiePlan {
        SortiePlan {
            drone_count: 3,
            sorties: vec![
                Sortie {
                    label: "flight 1".to_string(),
                    flights: vec![4, 1, 3],
                },
                Sortie {
                    label: "flight 2".to_string(),
                    flights: vec![5, 2],
                },
            ],
        }
    }

    #[test]
    fn writes_header_rows_and_padding() {
        let file = NamedTempFile::with_suffix(".csv").unwrap();
        write_flight_plan(&sample_plan(), file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Sorties,Drone_1,Drone_2,Drone_3");
        assert_eq!(lines[1], "flight 1,4,1,3");
        assert_eq!(lines[2], format!("flight 2,5,2,{NO_FLIGHT}"));
    }

    #[test]
    fn empty_plan_writes_header_only() {
        let file = NamedTempFile::with_suffix(".csv").unwrap();
        let plan = SortiePlan {
            drone_count: 2,
            sorties: Vec::new(),
        };
        write_flight_plan(&plan, file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Sorties,Drone_1,Drone_2"]);
    }

    #[test]
    fn unwritable_path_reports_context() {
        let plan = sample_plan();
        let err = write_flight_plan(&plan, Path::new("/nonexistent-dir/out.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to create"));
    }
}
