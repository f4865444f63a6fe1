//! Config store implementations

mod toml_config;

pub use toml_config::{
    is_scoped_config_name, TomlConfigStore, PROJECT_CONFIG_PATH, SCOPED_CONFIG_NAME,
    SCOPED_CONFIG_SUFFIX,
};
