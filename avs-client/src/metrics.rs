//! AVS metrics

use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};

lazy_static::lazy_static! {
    pub static ref AVS_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "avs_requests_total",
        "Total account verification batches",
        &["environment", "outcome"]
    )
    .unwrap();

    pub static ref AVS_ACCOUNTS_TOTAL: CounterVec = register_counter_vec!(
        "avs_accounts_total",
        "Accounts verified, by item result code",
        &["environment", "result_code"]
    )
    .unwrap();

    pub static ref AVS_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "avs_request_duration_seconds",
        "Live AVS call duration",
        &["environment"]
    )
    .unwrap();
}
