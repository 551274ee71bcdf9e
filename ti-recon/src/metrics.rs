//! TI metrics

use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};

lazy_static::lazy_static! {
    pub static ref TI_FETCH_TOTAL: CounterVec = register_counter_vec!(
        "ti_fetch_total",
        "Statement fetches",
        &["kind", "outcome"]
    )
    .unwrap();

    pub static ref TI_TRANSACTIONS_TOTAL: CounterVec = register_counter_vec!(
        "ti_transactions_total",
        "Statement transactions received",
        &["kind", "outcome"]
    )
    .unwrap();

    pub static ref TI_FETCH_DURATION: HistogramVec = register_histogram_vec!(
        "ti_fetch_duration_seconds",
        "Live statement fetch duration",
        &["kind"]
    )
    .unwrap();
}
