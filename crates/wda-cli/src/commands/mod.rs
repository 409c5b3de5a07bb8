//! CLI command implementations

mod check;
mod config;
mod status;
mod url;

pub use check::check_command;
pub use config::{config_init, config_path, config_show, load_session_config, ConfigOverrides};
pub use status::status_command;
pub use url::url_command;
