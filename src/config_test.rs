use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes env mutation across the tests in this file.
fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers hold `ENV_LOCK`; no other test in the crate reads `VIEWER_*`.
unsafe fn clear_viewer_env() {
    unsafe {
        std::env::remove_var("VIEWER_DATA_BASE_URL");
        std::env::remove_var("VIEWER_GEOCODER_URL");
        std::env::remove_var("VIEWER_USER_AGENT");
        std::env::remove_var("VIEWER_LABEL_MIN_ZOOM");
        std::env::remove_var("VIEWER_STALE_POLICY");
        std::env::remove_var("VIEWER_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = lock_env();
    unsafe { clear_viewer_env() };

    let cfg = ViewerConfig::from_env().unwrap();
    assert_eq!(cfg, ViewerConfig::default());
    assert_eq!(cfg.data_base_url, DEFAULT_DATA_BASE_URL);
    assert_eq!(cfg.geocoder_url, DEFAULT_GEOCODER_URL);
    assert_eq!(cfg.stale_policy, StalePolicy::LastResolvedWins);
    assert_eq!(cfg.label_min_zoom, 9.0);
    assert_eq!(cfg.result_zoom, 13.0);
    assert_eq!(cfg.preview_limit, 25);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = lock_env();
    unsafe {
        clear_viewer_env();
        std::env::set_var("VIEWER_DATA_BASE_URL", "https://data.example.test/");
        std::env::set_var("VIEWER_GEOCODER_URL", "https://geo.example.test/search/");
        std::env::set_var("VIEWER_USER_AGENT", "test-agent");
        std::env::set_var("VIEWER_LABEL_MIN_ZOOM", "10.5");
        std::env::set_var("VIEWER_STALE_POLICY", "latest_issued_only");
        std::env::set_var("VIEWER_CONNECT_TIMEOUT_SECS", "3");
    }

    let cfg = ViewerConfig::from_env().unwrap();
    assert_eq!(cfg.data_base_url, "https://data.example.test");
    assert_eq!(cfg.geocoder_url, "https://geo.example.test/search");
    assert_eq!(cfg.user_agent, "test-agent");
    assert_eq!(cfg.label_min_zoom, 10.5);
    assert_eq!(cfg.stale_policy, StalePolicy::LatestIssuedOnly);
    assert_eq!(cfg.connect_timeout_secs, 3);

    unsafe { clear_viewer_env() };
}

#[test]
fn from_env_rejects_unknown_stale_policy() {
    let _guard = lock_env();
    unsafe {
        clear_viewer_env();
        std::env::set_var("VIEWER_STALE_POLICY", "first_wins");
    }

    let err = ViewerConfig::from_env().unwrap_err();
    assert!(matches!(err, ViewerError::ConfigParse(msg) if msg.contains("first_wins")));

    unsafe { clear_viewer_env() };
}

#[test]
fn from_env_rejects_non_numeric_zoom() {
    let _guard = lock_env();
    unsafe {
        clear_viewer_env();
        std::env::set_var("VIEWER_LABEL_MIN_ZOOM", "nine");
    }

    assert!(matches!(ViewerConfig::from_env(), Err(ViewerError::ConfigParse(_))));

    unsafe { clear_viewer_env() };
}

#[test]
fn blank_env_values_fall_back_to_defaults() {
    let _guard = lock_env();
    unsafe {
        clear_viewer_env();
        std::env::set_var("VIEWER_GEOCODER_URL", "   ");
    }

    let cfg = ViewerConfig::from_env().unwrap();
    assert_eq!(cfg.geocoder_url, DEFAULT_GEOCODER_URL);

    unsafe { clear_viewer_env() };
}

#[test]
fn viewbox_is_west_north_east_south() {
    let region = Region::default();
    assert_eq!(region.bbox.to_viewbox(), "-84.6,36.7,-75.4,33.8");
}
