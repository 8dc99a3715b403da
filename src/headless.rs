//! Headless dump mode
//!
//! Fetches every rack once and prints the occupancy grids, placement
//! diagnostics and statistics to stdout, either as plain text or as a single
//! JSON document. No terminal UI is started.

use std::fmt::Write as _;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use fishrack_api::TankService;
use fishrack_core::prelude::*;
use fishrack_core::{row_label, Gender, GridCell, OccupancyGrid, Rack, RackId, RackStats, TankId};

/// One grid cell in the dump
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CellReport {
    Empty,
    Occupied { tank_id: TankId, label: String },
    Blocked { anchor: TankId },
}

impl From<GridCell<'_>> for CellReport {
    fn from(cell: GridCell<'_>) -> Self {
        match cell {
            GridCell::Empty => CellReport::Empty,
            GridCell::Occupied(tank) => CellReport::Occupied {
                tank_id: tank.id,
                label: tank.display_label(),
            },
            GridCell::Blocked { anchor } => CellReport::Blocked { anchor },
        }
    }
}

/// Grid, diagnostics and statistics of one rack
#[derive(Debug, Clone, Serialize)]
pub struct RackReport {
    pub id: RackId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
    pub rows: Vec<Vec<CellReport>>,
    pub diagnostics: Vec<String>,
    pub stats: RackStats,
}

impl RackReport {
    pub fn build(rack: &Rack, today: NaiveDate) -> Self {
        let grid = OccupancyGrid::build(rack);
        Self {
            id: rack.id,
            name: rack.name.clone(),
            lab_id: rack.lab_id.clone(),
            rows: grid
                .rows()
                .iter()
                .map(|row| row.iter().copied().map(CellReport::from).collect())
                .collect(),
            diagnostics: grid.diagnostics().iter().map(ToString::to_string).collect(),
            stats: RackStats::at(rack, today),
        }
    }
}

/// Everything the dump prints
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    pub generated_on: NaiveDate,
    pub racks: Vec<RackReport>,
    pub overall: RackStats,
}

impl DumpReport {
    pub fn build(racks: &[Rack], today: NaiveDate) -> Self {
        Self {
            generated_on: today,
            racks: racks.iter().map(|r| RackReport::build(r, today)).collect(),
            overall: RackStats::overall(racks, today),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for rack in &self.racks {
            write_rack(&mut out, rack);
            out.push('\n');
        }
        let _ = writeln!(out, "All racks");
        write_stats(&mut out, &self.overall);
        out
    }
}

fn cell_text(cell: &CellReport) -> String {
    match cell {
        CellReport::Empty => "·".to_string(),
        CellReport::Occupied { tank_id, .. } => format!("#{}", tank_id),
        CellReport::Blocked { .. } => "<".to_string(),
    }
}

fn write_rack(out: &mut String, rack: &RackReport) {
    let _ = write!(out, "{} (#{})", rack.name, rack.id);
    if let Some(lab) = rack.lab_id.as_deref().filter(|l| !l.is_empty()) {
        let _ = write!(out, " · lab {}", lab);
    }
    out.push('\n');

    for (row, cells) in rack.rows.iter().enumerate() {
        let _ = write!(out, "{:<3}", row_label(row as u32));
        for cell in cells {
            let _ = write!(out, "[{:^5}]", cell_text(cell));
        }
        out.push('\n');
    }

    for diagnostic in &rack.diagnostics {
        let _ = writeln!(out, "  ! {}", diagnostic);
    }
    write_stats(out, &rack.stats);
}

fn write_stats(out: &mut String, stats: &RackStats) {
    let _ = writeln!(
        out,
        "  {} tanks · {} fish",
        stats.total_tanks, stats.total_fish
    );
    for gender in Gender::ALL {
        let _ = writeln!(
            out,
            "    {:<9}{:>5} ({:.1}%)",
            gender.as_str(),
            stats.fish(gender),
            stats.gender_percent(gender)
        );
    }
    for (label, count) in stats.age_distribution.buckets() {
        let _ = writeln!(
            out,
            "    {:<9}{:>5} ({:.1}%)",
            label,
            count,
            stats.age_percent(count)
        );
    }
}

/// Fetch all racks and render the dump, with ages measured against today
pub async fn dump<S: TankService + Sync>(service: &S, json: bool) -> Result<String> {
    dump_at(service, json, Local::now().date_naive()).await
}

/// Fetch all racks and render the dump, with ages measured against `today`
pub async fn dump_at<S: TankService + Sync>(
    service: &S,
    json: bool,
    today: NaiveDate,
) -> Result<String> {
    let racks = service.list_racks().await?;
    info!("Dumping {} rack(s)", racks.len());

    let report = DumpReport::build(&racks, today);
    if json {
        report.to_json()
    } else {
        Ok(report.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishrack_api::testing::FakeTankService;
    use fishrack_core::{Subdivision, Tank, TankSize};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tank(id: u64, position: &str, size: TankSize) -> Tank {
        Tank {
            id: TankId(id),
            position: position.to_string(),
            size,
            line: None,
            dob: None,
            color: None,
            rack_id: Some(RackId(1)),
            subdivisions: Vec::new(),
        }
    }

    fn sample_rack() -> Rack {
        let mut a1 = tank(1, "A1", TankSize::Regular);
        a1.dob = Some(date(2024, 1, 1));
        a1.subdivisions = vec![
            Subdivision::new(Gender::Male, 3),
            Subdivision::new(Gender::Female, 1),
        ];
        Rack::new(RackId(1), "Rack 1", 2, 3)
            .with_override(1, 2)
            .with_tank(a1)
            .with_tank(tank(2, "A2", TankSize::Large))
            .with_tank(tank(3, "C9", TankSize::Regular))
    }

    #[test]
    fn test_rack_report_cells() {
        let report = RackReport::build(&sample_rack(), date(2025, 6, 1));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].len(), 3);
        assert_eq!(report.rows[1].len(), 2);
        assert_eq!(
            report.rows[0][1],
            CellReport::Occupied {
                tank_id: TankId(2),
                label: "A2-A3".into()
            }
        );
        assert_eq!(report.rows[0][2], CellReport::Blocked { anchor: TankId(2) });
        assert_eq!(report.rows[1][0], CellReport::Empty);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("outside grid boundaries"));
    }

    #[test]
    fn test_text_output() {
        let report = DumpReport::build(&[sample_rack()], date(2025, 6, 1));
        let text = report.to_text();
        assert!(text.contains("Rack 1 (#1)"));
        assert!(text.contains("A  [ #1  ][ #2  ][  <  ]"));
        assert!(text.contains("B  [  ·  ][  ·  ]"));
        assert!(text.contains("  ! Tank 3 at position C9 is outside grid boundaries"));
        assert!(text.contains("3 tanks · 4 fish"));
        assert!(text.contains("MALE         3 (75.0%)"));
        assert!(text.contains("1-2 years    1 (33.3%)"));
        assert!(text.contains("All racks"));
    }

    #[test]
    fn test_json_output() {
        let report = DumpReport::build(&[sample_rack()], date(2025, 6, 1));
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["generated_on"], "2025-06-01");
        assert_eq!(value["racks"][0]["rows"][0][2]["state"], "blocked");
        assert_eq!(value["racks"][0]["rows"][0][2]["anchor"], 2);
        assert_eq!(value["racks"][0]["stats"]["fish_by_gender"]["MALE"], 3);
        assert_eq!(value["overall"]["total_tanks"], 3);
    }

    #[tokio::test]
    async fn test_dump_fetches_once() {
        let svc = FakeTankService::new(vec![sample_rack()]);
        let text = dump_at(&svc, false, date(2025, 6, 1)).await.unwrap();
        assert!(text.contains("Rack 1"));
        assert_eq!(svc.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_dump_propagates_failure() {
        let svc = FakeTankService::new(Vec::new());
        svc.fail_next(500, None);
        assert!(dump_at(&svc, true, date(2025, 6, 1)).await.is_err());
    }
}
