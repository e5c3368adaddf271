//! Configuration system — schema, layered resolution, and file loading.
//!
//! # Usage
//! ```no_run
//! use salesmart_core::config::{self, ConfigPolicy, EnvSnapshot};
//!
//! let env = EnvSnapshot::capture();
//! let file = config::load_file_config(None);
//! let cfg = config::resolve_config(&env, &file, ConfigPolicy::Permissive).unwrap();
//! println!("Model: {}", cfg.model);
//! ```

pub mod resolver;
pub mod schema;

// Re-export key types
pub use resolver::{resolve_config, ConfigPolicy, EnvSnapshot};
pub use schema::{get_config_file_path, load_file_config, FileConfig, GatewayConfig};
