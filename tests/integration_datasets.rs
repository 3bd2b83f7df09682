//! Integration tests for the dataset catalog against a local mirror
//!
//! Each test lays out a temporary directory with the same relative paths as
//! the object store and reads it through the configured data source.

use jetstats::Config;
use jetstats::app::adapters::DataSource;
use jetstats::app::models::{Dimension, Period, Quantity, Scale};
use jetstats::app::services::datasets::{
    fetch_aggregates, fetch_aircraft_models, fetch_aircrafts, fetch_dimension_aggregates,
    fetch_positions,
};
use jetstats::app::services::reshape::{latest_year, rank_by_quantity};
use jetstats::constants::{
    MODEL_DB_PATH, aircraft_path, dimension_path, positions_path, timeseries_path,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Mirror holding one file of every dataset kind
fn create_mirror() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        MODEL_DB_PATH,
        "model,gph,source,date\r\n\
         Citation Excel,180,https://a.example,2023-01-01\r\n\
         PC-12,66,https://b.example,2023-02-01\r\n\
         Citation Excel,192,https://c.example,2024-01-01\r\n",
    );
    write(
        root,
        &aircraft_path("2024-07"),
        "icao_number,tail_number,type_designator,model,country\n\
         45d2f1,OY-ABC,C56X,Citation Excel,Denmark\n\
         4ca123,EI-XYZ,PC12,PC-12,Ireland\n",
    );
    write(
        root,
        &timeseries_path("by_year"),
        "date,number_of_aircrafts,number_of_legs,time_flown,co2_emitted,km_flown,km_travelled\n\
         2022-01-01,100,2000,3000.5,40000000,900000,850000\n\
         2023-01-01,120,2500,3500,45000000,1000000,950000\n",
    );
    write(
        root,
        &dimension_path("country", "year"),
        "date,country,number_of_aircrafts,number_of_legs,time_flown,co2_emitted,km_flown,km_travelled\n\
         2022-01-01,France,50,900,1000,9000000,100,100\n\
         2023-01-01,France,52,950,1100,9500000,100,100\n\
         2023-01-01,\"United States\",400,9000,12000,90000000,100,100\n\
         2023-01-01,Malta,3,20,30,150000,100,100\n",
    );
    write(
        root,
        &positions_path("45d2f1", "2024-07"),
        r#"[{"timestamp": "2024-07-01T10:00:00", "latitude": 55.61, "longitude": 12.65, "altitude": 1200}]"#,
    );

    dir
}

fn local_config(dir: &TempDir) -> Config {
    Config::default().with_source_dir(dir.path())
}

#[tokio::test]
async fn test_models_are_averaged_across_sources() {
    let mirror = create_mirror();
    let config = local_config(&mirror);
    let source = config.data_source().unwrap();

    let models = fetch_aircraft_models(&source, &config.deserializer())
        .await
        .expect("Failed to load model database");

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].model, "Citation Excel");
    assert_eq!(models[0].gph, 186.0);
    assert_eq!(models[0].sources[0].url, "https://a.example");
    assert_eq!(models[0].sources[1].url, "https://c.example");
    assert_eq!(models[1].model, "PC-12");
}

#[tokio::test]
async fn test_aircraft_register() {
    let mirror = create_mirror();
    let config = local_config(&mirror);
    let source = config.data_source().unwrap();

    let aircrafts = fetch_aircrafts(&source, &config.deserializer(), "2024-07")
        .await
        .unwrap();

    assert_eq!(aircrafts.len(), 2);
    assert_eq!(aircrafts[1].tail_number, "EI-XYZ");
    assert_eq!(aircrafts[1].country, "Ireland");
}

#[tokio::test]
async fn test_missing_csv_dataset_is_an_error() {
    let mirror = create_mirror();
    let config = local_config(&mirror);
    let source = config.data_source().unwrap();

    let result = fetch_aircrafts(&source, &config.deserializer(), "1999-01").await;
    assert!(matches!(result, Err(jetstats::Error::Io { .. })));
}

#[tokio::test]
async fn test_timeseries_by_year() {
    let mirror = create_mirror();
    let config = local_config(&mirror);
    let source = config.data_source().unwrap();

    let aggregates = fetch_aggregates(&source, &config.deserializer(), Scale::ByYear)
        .await
        .unwrap();

    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].time_flown, 3000.5);
    assert_eq!(latest_year(&aggregates), Some(2023));
}

#[tokio::test]
async fn test_country_ranking_for_latest_year() {
    let mirror = create_mirror();
    let config = local_config(&mirror);
    let source = config.data_source().unwrap();

    let rows = fetch_dimension_aggregates(
        &source,
        &config.deserializer(),
        Dimension::Country,
        Period::Year,
    )
    .await
    .unwrap();
    let year = latest_year(&rows).unwrap();
    let current = jetstats::app::services::reshape::filter_year(&rows, year);
    let ranked = rank_by_quantity(current, Quantity::Co2Emitted, 2);

    let keys: Vec<&str> = ranked.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["United States", "France"]);
}

#[tokio::test]
async fn test_positions_fail_soft_when_missing() {
    let mirror = create_mirror();
    let source = DataSource::local(mirror.path());

    let found = fetch_positions(&source, "45d2f1", "2024-07").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].altitude, Some(1200.0));

    let missing = fetch_positions(&source, "000000", "2024-07").await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_strict_mode_rejects_short_rows() {
    let mirror = create_mirror();
    write(
        mirror.path(),
        &aircraft_path("2024-08"),
        "icao_number,tail_number,type_designator,model,country\n45d2f1,OY-ABC\n",
    );

    let lenient = local_config(&mirror);
    let source = lenient.data_source().unwrap();
    let aircrafts = fetch_aircrafts(&source, &lenient.deserializer(), "2024-08")
        .await
        .unwrap();
    assert_eq!(aircrafts[0].model, "");

    let strict = local_config(&mirror).with_strict_rows();
    let result = fetch_aircrafts(&source, &strict.deserializer(), "2024-08").await;
    assert!(matches!(
        result,
        Err(jetstats::Error::RowLengthMismatch { .. })
    ));
}

#[tokio::test]
async fn test_byte_order_mark_in_mirror_file() {
    let mirror = create_mirror();
    write(
        mirror.path(),
        &aircraft_path("2024-09"),
        "\u{feff}icao_number,tail_number,type_designator,model,country\r\n\
         45d2f1,OY-ABC,C56X,Citation Excel,Denmark\r\n",
    );
    let config = local_config(&mirror);
    let source = config.data_source().unwrap();

    let aircrafts = fetch_aircrafts(&source, &config.deserializer(), "2024-09")
        .await
        .unwrap();

    assert_eq!(aircrafts.len(), 1);
    assert_eq!(aircrafts[0].icao_number, "45d2f1");
}
