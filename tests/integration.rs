//! Integration tests
//!
//! Every CLI test runs with `PREPDECK_HOME` pointing at a fresh temporary
//! directory, so config, record and cloud directory are isolated.

#[path = "integration/helpers.rs"]
mod helpers;

#[path = "integration/cli_test.rs"]
mod cli_test;
#[path = "integration/cloud_test.rs"]
mod cloud_test;
#[path = "integration/exchange_test.rs"]
mod exchange_test;
#[path = "integration/playback_test.rs"]
mod playback_test;
