use std::path::Path;

use recruit_cli::config::PipelineConfig;
use recruit_cli::pipeline::{run_export, run_pipeline, run_report};
use recruit_cli::summary::{RunSummary, run_statistics, table_summary};
use recruit_report::KpiTable;

const CANDIDATES: &str = "\
First Name;Last Name;Email;Application Date;Country;YOE;Seniority;Technology;Code Challenge Score;Technical Interview Score
Ana;Diaz;ana@mail.com;2021-03-04;Brazil;3;Junior;Go;8;9
Bo;Kim;bo@mail.com;2020-01-15;Colombia;5;Senior;Java;6;9
Cy;Ng;cy@mail.com;2021-03-04;Brazil;1;Junior;Rust;7;7
Di;Lu;;2022-06-30;Peru;2;Mid-Level;Go;9;9
Ana;Diaz;ana@mail.com;2022-06-30;Ecuador;3;Junior;Rust;10;2
";

fn config_in(dir: &Path) -> PipelineConfig {
    let input = dir.join("candidates.csv");
    std::fs::write(&input, CANDIDATES).unwrap();
    let mut config = PipelineConfig::default();
    config.paths.input = input;
    config.paths.database = dir.join("processed/recruitment_dw.db");
    config.paths.export_dir = dir.join("export");
    config.paths.report_dir = dir.join("diagrams");
    config
}

#[test]
fn run_loads_the_star_schema() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let result = run_pipeline(&config, false).unwrap();
    assert!(!result.integrity_flagged());
    assert!(result.exported.is_empty());
    assert!(config.paths.database.is_file());

    let mut summary = RunSummary::from_result(&result);
    summary.input = "candidates.csv".to_string();
    summary.database = "recruitment_dw.db".to_string();
    insta::assert_snapshot!(serde_json::to_string_pretty(&summary).unwrap(), @r#"
    {
      "input": "candidates.csv",
      "database": "recruitment_dw.db",
      "tables": [
        {
          "table": "dim_candidate",
          "rows": 3
        },
        {
          "table": "dim_date",
          "rows": 3
        },
        {
          "table": "dim_country",
          "rows": 3
        },
        {
          "table": "dim_seniority",
          "rows": 2
        },
        {
          "table": "dim_technology",
          "rows": 3
        },
        {
          "table": "fact_applications",
          "rows": 4
        }
      ],
      "extracted_rows": 5,
      "dropped_rows": 1,
      "hired": 2,
      "rejected": 2,
      "integrity_flagged": false,
      "unresolved_keys": 0
    }
    "#);
}

#[test]
fn summary_tables_list_counts() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_pipeline(&config_in(dir.path()), false).unwrap();

    let mut tables = table_summary(&result);
    tables.force_no_tty();
    let text = tables.to_string();
    assert!(text.contains("fact_applications"));
    assert!(text.contains("TOTAL"));
    assert!(text.contains("18"));

    let mut stats = run_statistics(&result);
    stats.force_no_tty();
    let text = stats.to_string();
    assert!(text.contains("Dropped rows"));
    assert!(text.contains("50.00"));
}

#[test]
fn run_with_export_writes_table_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let result = run_pipeline(&config, true).unwrap();
    assert_eq!(result.exported.len(), 6);
    let technologies =
        std::fs::read_to_string(config.paths.export_dir.join("dim_technology.csv")).unwrap();
    assert_eq!(
        technologies,
        "technology_key,technology_name\n1,Go\n2,Java\n3,Rust\n"
    );
}

#[test]
fn report_and_export_read_the_warehouse() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    run_pipeline(&config, false).unwrap();

    let kpis = run_report(&config, true).unwrap();
    assert_eq!(kpis.len(), 6);
    let KpiTable::HiresByTechnology(rows) = &kpis[0] else {
        panic!("first KPI is hires by technology");
    };
    let names: Vec<&str> = rows.iter().map(|r| r.technology_name.as_str()).collect();
    assert_eq!(names, vec!["Go", "Rust"]);
    let written = std::fs::read_dir(&config.paths.report_dir).unwrap().count();
    assert_eq!(written, 12);

    let exported = run_export(&config).unwrap();
    let rows: Vec<usize> = exported.iter().map(|file| file.rows).collect();
    assert_eq!(rows, vec![3, 3, 3, 2, 3, 4]);
}

#[test]
fn missing_input_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.paths.input = dir.path().join("absent.csv");

    let err = run_pipeline(&config, false).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
    assert!(!config.paths.database.exists());
}

#[test]
fn report_requires_an_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    assert!(run_report(&config, false).is_err());
}
