use mindporium_session::config::{AppConfig, Env};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(payload) => panic::resume_unwind(payload),
    }
}

const CONFIG_VARS: [&str; 3] = ["APP_ENV", "MINDPORIUM_API_URL", "MINDPORIUM_STATE_DIR"];

// --- Tests ---

#[test]
fn test_default_is_safe_for_tests() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_base_url, "http://localhost:8000/api/v1");
    assert!(config.storage_dir.ends_with("mindporium-test"));
}

#[test]
#[serial]
fn test_load_local_falls_back_to_dev_backend() {
    run_with_env(
        || {
            unsafe {
                env::remove_var("APP_ENV");
                env::remove_var("MINDPORIUM_API_URL");
                env::set_var("MINDPORIUM_STATE_DIR", "/tmp/mindporium-config-test");
            }
            let config = AppConfig::load();
            assert_eq!(config.env, Env::Local);
            assert_eq!(config.api_base_url, "http://localhost:8000/api/v1");
            assert!(config.storage_dir.ends_with("mindporium-config-test"));
        },
        CONFIG_VARS.to_vec(),
    );
}

#[test]
#[serial]
fn test_load_respects_explicit_api_url() {
    run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::set_var("MINDPORIUM_API_URL", "https://staging.mindporium.com/api/v1");
                env::set_var("MINDPORIUM_STATE_DIR", "/tmp/mindporium-config-test");
            }
            let config = AppConfig::load();
            assert_eq!(config.api_base_url, "https://staging.mindporium.com/api/v1");
        },
        CONFIG_VARS.to_vec(),
    );
}

#[test]
#[serial]
fn test_load_production_requires_api_url() {
    let panicked = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::remove_var("MINDPORIUM_API_URL");
                env::set_var("MINDPORIUM_STATE_DIR", "/tmp/mindporium-config-test");
            }
            panic::catch_unwind(AppConfig::load).is_err()
        },
        CONFIG_VARS.to_vec(),
    );
    assert!(panicked, "production load must fail fast without an API URL");
}

#[test]
#[serial]
fn test_load_production_with_full_config() {
    run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("MINDPORIUM_API_URL", "https://api.mindporium.com/api/v1");
                env::set_var("MINDPORIUM_STATE_DIR", "/var/lib/mindporium");
            }
            let config = AppConfig::load();
            assert_eq!(config.env, Env::Production);
            assert_eq!(config.api_base_url, "https://api.mindporium.com/api/v1");
        },
        CONFIG_VARS.to_vec(),
    );
}
