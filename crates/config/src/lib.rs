//! Configuration loading for FilaMan.
//!
//! Config files: `filaman.toml`, `filaman.yaml`, or `filaman.json`,
//! searched in `./` then `~/.config/filaman/`.

pub mod loader;
pub mod schema;

pub use {
    loader::{data_dir, discover_and_load, load_config},
    schema::{DatabaseConfig, FilamanConfig, PagesConfig, PluginsConfig},
};
