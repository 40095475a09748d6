mod defaults;
mod io;
mod schema;
mod validate;

pub use io::load_config_or_default;
pub use schema::{Config, EmissionFactors};
pub use validate::ConfigError;
