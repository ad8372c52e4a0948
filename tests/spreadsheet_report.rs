#![cfg(feature = "spreadsheet")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use calamine::{open_workbook_auto, Data, Reader};

use vacancy_analytics::ingestion::{load_vacancies, IngestionOptions};
use vacancy_analytics::report::{render_report, ReportBundle, ReportConfig, ReportKind};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("vacancy-analytics-{name}-{nanos}.xlsx"))
}

fn fixture_bundle() -> ReportBundle {
    let loaded = load_vacancies("tests/fixtures/vacancies.csv", &IngestionOptions::default()).unwrap();
    ReportBundle::from_vacancies(&loaded.vacancies, "Программист", &ReportConfig::default())
}

fn text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected a string cell, got {other:?}"),
    }
}

fn number(cell: Option<&Data>) -> f64 {
    match cell {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected a numeric cell, got {other:?}"),
    }
}

#[test]
fn workbook_has_year_and_city_sheets() {
    let path = tmp_file("report");
    render_report(&fixture_bundle(), ReportKind::Spreadsheet, &path).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec!["Statistics by year".to_string(), "Statistics by city".to_string()]
    );

    let years = workbook.worksheet_range("Statistics by year").unwrap();
    assert_eq!(years.height(), 4);
    assert_eq!(text(years.get((0, 0))), "Year");
    assert_eq!(text(years.get((0, 2))), "Average salary - Программист");
    assert_eq!(number(years.get((1, 0))), 2018.0);
    assert_eq!(number(years.get((1, 1))), 92_500.0);
    assert_eq!(number(years.get((2, 2))), 90_990.0);
    assert_eq!(number(years.get((3, 3))), 2.0);
    assert_eq!(number(years.get((3, 4))), 1.0);

    let cities = workbook.worksheet_range("Statistics by city").unwrap();
    assert_eq!(text(cities.get((0, 1))), "Salary level");
    assert_eq!(text(cities.get((0, 4))), "Vacancy share");
    assert_eq!(text(cities.get((1, 0))), "Москва");
    assert_eq!(number(cities.get((1, 1))), 111_666.0);
    assert_eq!(text(cities.get((2, 3))), "Казань");
    assert_eq!(number(cities.get((2, 4))), 0.1667);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn rendering_twice_overwrites_the_file() {
    let path = tmp_file("overwrite");
    let bundle = fixture_bundle();
    render_report(&bundle, ReportKind::Spreadsheet, &path).unwrap();
    render_report(&bundle, ReportKind::Spreadsheet, &path).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(workbook.sheet_names().len(), 2);

    std::fs::remove_file(&path).unwrap();
}
