//! Tests for the record deserializer

mod deserializer_tests;

/// Time-series snippet as published by the analysis job
pub fn create_timeseries_csv() -> String {
    "date,number_of_aircrafts,number_of_legs,time_flown,co2_emitted,km_flown,km_travelled\n\
     2023-01-01,812,1450,2310.5,9120000.25,1200000,1100000\n\
     2023-01-02,790,1402,2250,8800000,1150000.5,1050000\n"
        .to_string()
}
