use std::path::Path;

use chrono::NaiveDate;
use recruit_load::{LoadOptions, load_star_schema, open_warehouse};
use recruit_model::{
    CandidateIdentity, Dimension, DimensionSet, FactApplication, StarSchema, SurrogateKey,
    TableName,
};
use recruit_report::kpi::{
    avg_scores_by_seniority, hires_by_country_year, hires_by_seniority, hires_by_technology,
    hires_by_year, hiring_rate_by_technology,
};
use recruit_report::{
    KpiKind, KpiOptions, export_tables, query_dashboard, read_table_frame, star_schema_frames,
    write_dashboard,
};
use rusqlite::Connection;

fn labels(table: TableName, values: &[&str]) -> Dimension<String> {
    Dimension::assign(table, values.iter().map(|v| (*v).to_string()).collect())
}

fn candidate(first: &str, last: &str) -> CandidateIdentity {
    CandidateIdentity {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@mail.com", first.to_lowercase()),
    }
}

/// `(candidate, date, country, seniority, technology, code, interview, hired)`,
/// keys 1-based.
type FactSeed = (usize, usize, usize, usize, usize, f64, f64, bool);

fn fact(application_id: u32, seed: FactSeed) -> FactApplication {
    let (candidate, date, country, seniority, technology, code, interview, hired) = seed;
    let key = |position: usize| SurrogateKey::from_position(position - 1);
    FactApplication {
        application_id,
        candidate_key: key(candidate),
        date_key: key(date),
        country_key: key(country),
        seniority_key: key(seniority),
        technology_key: key(technology),
        code_challenge_score: code,
        technical_interview_score: interview,
        is_hired: hired,
    }
}

fn sample_schema() -> StarSchema {
    let dimensions = DimensionSet {
        candidates: Dimension::assign(
            TableName::DimCandidate,
            vec![
                candidate("Ana", "Diaz"),
                candidate("Bo", "Kim"),
                candidate("Cy", "Ng"),
            ],
        ),
        dates: Dimension::assign(
            TableName::DimDate,
            vec![
                NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
                NaiveDate::from_ymd_opt(2021, 7, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
            ],
        ),
        countries: labels(TableName::DimCountry, &["Brazil", "Colombia", "Peru"]),
        seniorities: labels(TableName::DimSeniority, &["Junior", "Senior"]),
        technologies: labels(TableName::DimTechnology, &["Go", "Java", "Rust"]),
    };
    let seeds: [FactSeed; 7] = [
        (1, 1, 1, 1, 1, 8.0, 9.0, true),
        (2, 2, 1, 2, 1, 7.0, 7.0, true),
        (3, 3, 2, 2, 2, 9.0, 8.0, true),
        (1, 2, 3, 1, 3, 3.0, 10.0, false),
        (2, 1, 2, 1, 2, 6.0, 9.0, false),
        (3, 3, 3, 2, 3, 10.0, 7.0, true),
        (1, 1, 1, 1, 3, 2.0, 2.0, false),
    ];
    let facts = seeds
        .into_iter()
        .enumerate()
        .map(|(idx, seed)| fact(idx as u32 + 1, seed))
        .collect();
    StarSchema { dimensions, facts }
}

fn loaded_warehouse(dir: &Path) -> Connection {
    let options = LoadOptions::new(dir.join("recruitment_dw.db"));
    load_star_schema(&sample_schema(), &options).unwrap();
    open_warehouse(&options.database).unwrap()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn hire_counts_are_ordered_by_total_then_label() {
    let dir = tempfile::tempdir().unwrap();
    let conn = loaded_warehouse(dir.path());

    let by_technology: Vec<(String, i64)> = hires_by_technology(&conn)
        .unwrap()
        .into_iter()
        .map(|row| (row.technology_name, row.total_hires))
        .collect();
    assert_eq!(
        by_technology,
        vec![
            ("Go".to_string(), 2),
            ("Java".to_string(), 1),
            ("Rust".to_string(), 1),
        ]
    );

    let by_year: Vec<(i64, i64)> = hires_by_year(&conn)
        .unwrap()
        .into_iter()
        .map(|row| (row.year, row.total_hires))
        .collect();
    assert_eq!(by_year, vec![(2020, 1), (2021, 3)]);

    let by_seniority: Vec<(String, i64)> = hires_by_seniority(&conn)
        .unwrap()
        .into_iter()
        .map(|row| (row.seniority_level, row.total_hires))
        .collect();
    assert_eq!(
        by_seniority,
        vec![("Senior".to_string(), 3), ("Junior".to_string(), 1)]
    );
}

#[test]
fn country_trend_is_limited_to_tracked_countries() {
    let dir = tempfile::tempdir().unwrap();
    let conn = loaded_warehouse(dir.path());

    let tracked = KpiOptions::default().tracked_countries;
    let rows: Vec<(String, i64, i64)> = hires_by_country_year(&conn, &tracked)
        .unwrap()
        .into_iter()
        .map(|row| (row.country_name, row.year, row.total_hires))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Brazil".to_string(), 2020, 1),
            ("Brazil".to_string(), 2021, 1),
            ("Colombia".to_string(), 2021, 1),
        ]
    );

    let peru = hires_by_country_year(&conn, &["Peru".to_string()]).unwrap();
    assert_eq!(peru.len(), 1);
    assert_eq!(peru[0].year, 2021);
    assert!(hires_by_country_year(&conn, &[]).unwrap().is_empty());
}

#[test]
fn rates_and_averages_are_rounded() {
    let dir = tempfile::tempdir().unwrap();
    let conn = loaded_warehouse(dir.path());

    let rates = hiring_rate_by_technology(&conn).unwrap();
    let names: Vec<&str> = rates.iter().map(|r| r.technology_name.as_str()).collect();
    assert_eq!(names, vec!["Go", "Java", "Rust"]);
    assert!(close(rates[0].hiring_rate_pct, 100.0));
    assert!(close(rates[1].hiring_rate_pct, 50.0));
    assert_eq!(rates[2].total_applications, 3);
    assert_eq!(rates[2].total_hires, 1);
    assert!(close(rates[2].hiring_rate_pct, 33.33));

    let scores = avg_scores_by_seniority(&conn).unwrap();
    assert_eq!(scores[0].seniority_level, "Junior");
    assert!(close(scores[0].avg_code_challenge, 4.75));
    assert!(close(scores[0].avg_technical_interview, 7.5));
    assert_eq!(scores[1].seniority_level, "Senior");
    assert!(close(scores[1].avg_code_challenge, 8.67));
    assert!(close(scores[1].avg_technical_interview, 7.33));
}

#[test]
fn dashboard_writes_chart_and_data_per_kpi() {
    let dir = tempfile::tempdir().unwrap();
    let conn = loaded_warehouse(dir.path());
    let report_dir = dir.path().join("reports");

    let kpis = query_dashboard(&conn, &KpiOptions::default()).unwrap();
    let kinds: Vec<KpiKind> = kpis.iter().map(recruit_report::KpiTable::kind).collect();
    assert_eq!(kinds, KpiKind::ALL.to_vec());

    let artifacts = write_dashboard(&kpis, &report_dir).unwrap();
    assert_eq!(artifacts.len(), 6);
    for artifact in &artifacts {
        assert!(artifact.chart.is_file());
        assert!(artifact.data.is_file());
    }

    let chart = std::fs::read_to_string(report_dir.join("kpi1_hires_by_technology.txt")).unwrap();
    assert!(chart.starts_with("KPI 1: Hires by Technology\n"));
    assert!(!chart.contains('\u{1b}'));

    let data = std::fs::read_to_string(report_dir.join("kpi5_hiring_rate_by_technology.csv"))
        .unwrap();
    insta::assert_snapshot!(data, @r"
    technology_name,total_applications,total_hires,hiring_rate_pct
    Go,2,2,100.0
    Java,2,1,50.0
    Rust,3,1,33.33
    ");
}

#[test]
fn export_writes_one_csv_per_table() {
    let dir = tempfile::tempdir().unwrap();
    let conn = loaded_warehouse(dir.path());
    let export_dir = dir.path().join("exports");

    let exported = export_tables(&conn, &export_dir).unwrap();
    let rows: Vec<(&str, usize)> = exported
        .iter()
        .map(|file| (file.table.as_str(), file.rows))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("dim_candidate", 3),
            ("dim_date", 3),
            ("dim_country", 3),
            ("dim_seniority", 2),
            ("dim_technology", 3),
            ("fact_applications", 7),
        ]
    );

    let countries = std::fs::read_to_string(export_dir.join("dim_country.csv")).unwrap();
    assert_eq!(countries, "country_key,country_name\n1,Brazil\n2,Colombia\n3,Peru\n");

    let facts = std::fs::read_to_string(export_dir.join("fact_applications.csv")).unwrap();
    let header = facts.lines().next().unwrap();
    assert_eq!(
        header,
        "application_id,candidate_key,date_key,country_key,seniority_key,technology_key,\
         code_challenge_score,technical_interview_score,is_hired"
    );
    assert_eq!(facts.lines().count(), 8);
}

#[test]
fn in_memory_frames_match_the_warehouse() {
    let dir = tempfile::tempdir().unwrap();
    let conn = loaded_warehouse(dir.path());

    for (table, frame) in star_schema_frames(&sample_schema()).unwrap() {
        let stored = read_table_frame(&conn, table).unwrap();
        assert!(frame.equals_missing(&stored), "{table} differs");
    }
}
