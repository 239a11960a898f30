//! # Configuration
//!
//! Settings are layered with `figment`, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. `user-store.yaml` in the working directory, if present
//! 3. `AWS_REGION`, mapped to `region`
//! 4. `USER_STORE_*` variables, e.g. `USER_STORE_TABLE_NAME=people`

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// File looked up next to the process for configuration overrides.
pub const CONFIG_FILE: &str = "user-store.yaml";

/// Prefix of the environment variables read by [`Config::load`].
pub const ENV_PREFIX: &str = "USER_STORE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Region the store lives in. Informational for the in-process store.
    pub region: String,
    /// Table holding the users.
    pub table_name: String,
    /// Capacity of the store's request channel.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            table_name: "users".to_string(),
            channel_capacity: 32,
        }
    }
}

impl Config {
    /// The full provider stack, exposed so callers can merge extra sources.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Env::raw().only(&["AWS_REGION"]).map(|_| "region".into()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration from every source.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
