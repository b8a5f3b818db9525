//! Config module.
//! Provides runtime option types, default paths and XML loading for the CLI.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor, CONFIG_ENV};
pub use types::{parse_mode, Config, LogLevel, DIR_MODE_DEFAULT};
pub use xml::{load_config, load_config_from_xml_path, parse_config_xml};
