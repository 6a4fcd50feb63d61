mod app_config;

pub use app_config::{APP_NAME, AppConfigExt, ConfigError};
pub use fraglog_types::AppConfig;
