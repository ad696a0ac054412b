//! data_runtime: configuration schemas and loaders.
//!
//! Files live under `data/config/*.toml`; every field is optional so a
//! missing file or key falls back to built-in defaults, and env vars win last.

pub mod loader;
pub mod configs {
    pub mod model_catalog;
    pub mod viewport;
}
