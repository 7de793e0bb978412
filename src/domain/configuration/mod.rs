mod app_config;

pub use app_config::{AppConfig, BibleApiConfig, ImageConfig, ObsConfig, TemplateConfig};
