pub mod credentials;
pub mod parser;
pub mod schema;
pub mod settings;
pub mod types;

pub use types::*;
pub use parser::{load_settings, parse_config, parse_config_str};
pub use settings::{ClassifierSettings, LlmSettings, ServerSettings, SessionSettings, Settings};
