mod loader;

pub use loader::{
    CONFIG_RELATIVE_PATH, apply_env_overrides, default_config_path, load_config,
    parse_config_content,
};
