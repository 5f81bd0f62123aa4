//! Fns to read variables from the environment more conveniently.

use std::env;

use lazy_static::lazy_static;
use tracing::debug;

use crate::address::DEFAULT_PARTNER_PREFIXES;

lazy_static! {
    pub static ref ENV_CONFIG: EnvConfig = get_env_config();
}

/// Get an environment variable, encoding found or missing as Option, and panic otherwise.
pub fn get_env_var(key: &str) -> Option<String> {
    let var = match env::var(key) {
        Err(env::VarError::NotPresent) => None,
        Err(e) => panic!("{e}"),
        Ok(var) => Some(var),
    };

    if let Some(ref existing_var) = var {
        debug!("env var {key}: {existing_var}");
    } else {
        debug!("env var {key} requested but not found")
    };

    var
}

pub fn get_env_bool(key: &str) -> Option<bool> {
    get_env_var(key).map(|var| match var.to_lowercase().as_str() {
        "true" => true,
        "false" => false,
        "t" => true,
        "f" => false,
        "1" => true,
        "0" => false,
        str => panic!("invalid bool value {str} for {key}"),
    })
}

/// Comma separated list, empty entries are dropped.
pub fn get_env_list(key: &str) -> Option<Vec<String>> {
    get_env_var(key).map(|var| {
        var.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}

pub struct EnvConfig {
    /// Prefixes accepted next to the native one.
    pub accepted_prefixes: Vec<String>,
    pub genesis_path: String,
    pub host: String,
    pub log_json: bool,
    pub log_perf: bool,
    pub port: u16,
}

pub fn get_env_config() -> EnvConfig {
    EnvConfig {
        accepted_prefixes: get_env_list("ACCEPTED_PREFIXES").unwrap_or_else(|| {
            DEFAULT_PARTNER_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect()
        }),
        genesis_path: get_env_var("GENESIS_PATH")
            .unwrap_or_else(|| "network/dungeon-1/genesis.json".to_string()),
        host: get_env_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
        log_json: get_env_bool("LOG_JSON").unwrap_or(false),
        log_perf: get_env_bool("LOG_PERF").unwrap_or(false),
        port: get_env_var("PORT")
            .map(|port| {
                port.parse()
                    .unwrap_or_else(|_| panic!("invalid PORT value {port}"))
            })
            .unwrap_or(4001),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_var_safe_some() {
        let test_key = "TEST_KEY_SAFE_SOME";
        let test_value = "my-env-value";
        std::env::set_var(test_key, test_value);
        assert_eq!(get_env_var(test_key), Some(test_value.to_string()));
    }

    #[test]
    fn test_get_env_var_safe_none() {
        let key = get_env_var("DOESNT_EXIST");
        assert!(key.is_none());
    }

    #[test]
    fn test_get_env_bool_not_there() {
        let flag = get_env_bool("DOESNT_EXIST");
        assert_eq!(flag, None);
    }

    #[test]
    fn test_get_env_bool_true_upper() {
        let test_key = "TEST_KEY_BOOL_TRUE";
        std::env::set_var(test_key, "TRUE");
        assert_eq!(get_env_bool(test_key), Some(true));
    }

    #[test]
    fn test_get_env_bool_false() {
        let test_key = "TEST_KEY_BOOL_FALSE";
        std::env::set_var(test_key, "0");
        assert_eq!(get_env_bool(test_key), Some(false));
    }

    #[test]
    #[should_panic]
    fn test_get_env_bool_invalid_panics() {
        let test_key = "TEST_KEY_BOOL_INVALID";
        std::env::set_var(test_key, "yes please");
        get_env_bool(test_key);
    }

    #[test]
    fn test_get_env_list() {
        let test_key = "TEST_KEY_LIST";
        std::env::set_var(test_key, "cosmos, osmo,,juno ");
        assert_eq!(
            get_env_list(test_key),
            Some(vec![
                "cosmos".to_string(),
                "osmo".to_string(),
                "juno".to_string()
            ])
        );
    }
}
