use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold `env_guard()` so no other test touches the environment.
unsafe fn clear_client_env() {
    unsafe {
        std::env::remove_var("BETTERBOTS_BASE_URL");
        std::env::remove_var("BETTERBOTS_USER_AGENT");
        std::env::remove_var("BETTERBOTS_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("BETTERBOTS_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_guard();
    unsafe { clear_client_env() };

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.base_url, "https://api.betterbots.gg");
    assert!(cfg.user_agent.starts_with("betterbots-rs/"));
    assert_eq!(
        cfg.timeouts,
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_guard();
    unsafe {
        clear_client_env();
        std::env::set_var("BETTERBOTS_BASE_URL", "http://127.0.0.1:4000/");
        std::env::set_var("BETTERBOTS_USER_AGENT", "probe/1.0");
        std::env::set_var("BETTERBOTS_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("BETTERBOTS_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:4000");
    assert_eq!(cfg.user_agent, "probe/1.0");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_client_env() };
}

#[test]
fn from_env_bad_timeout_falls_back_to_default() {
    let _guard = env_guard();
    unsafe {
        clear_client_env();
        std::env::set_var("BETTERBOTS_REQUEST_TIMEOUT_SECS", "soon");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

    unsafe { clear_client_env() };
}

#[test]
fn from_env_empty_base_url_errors() {
    let _guard = env_guard();
    unsafe {
        clear_client_env();
        std::env::set_var("BETTERBOTS_BASE_URL", "  ");
    }

    let err = ClientConfig::from_env().unwrap_err();
    assert!(matches!(err, HttpError::Config(_)));

    unsafe { clear_client_env() };
}

#[test]
fn with_base_url_trims_trailing_slash() {
    let cfg = ClientConfig::default().with_base_url("http://localhost:3000//");
    assert_eq!(cfg.base_url, "http://localhost:3000");
}
