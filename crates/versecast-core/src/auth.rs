//! Credential lookup for remote services
//!
//! Config files name the environment variable holding each key; the key
//! itself is only ever read from the process environment.

use std::env;

use crate::{Result, VersecastError};

/// Read an API key from the named environment variable
pub fn api_key(env_var: &str) -> Result<String> {
    match env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => {
            tracing::debug!("Using credential from {}", env_var);
            Ok(key)
        }
        _ => Err(VersecastError::Auth(format!(
            "No API key found. Set {} in the environment.",
            env_var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to prevent concurrent env var modifications
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env_var<F, R>(key: &str, value: Option<&str>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_LOCK.lock().unwrap();

        let original = env::var(key).ok();
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }

        let result = f();

        match original {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }

        result
    }

    #[test]
    fn test_api_key_present() {
        with_env_var("VERSECAST_TEST_KEY", Some("sk-test"), || {
            assert_eq!(api_key("VERSECAST_TEST_KEY").unwrap(), "sk-test");
        });
    }

    #[test]
    fn test_api_key_missing() {
        with_env_var("VERSECAST_TEST_KEY", None, || {
            assert!(api_key("VERSECAST_TEST_KEY").is_err());
        });
    }

    #[test]
    fn test_api_key_blank() {
        with_env_var("VERSECAST_TEST_KEY", Some("  "), || {
            assert!(api_key("VERSECAST_TEST_KEY").is_err());
        });
    }
}
