//! Typed, sectioned settings persisted as a RON delta file.
//!
//! ```ignore
//! let store = SettingsStore::builder().with_settings_file(path).build()?;
//! store.register::<AsideSettings>()?;
//! let aside = store.get::<AsideSettings>()?;
//! store.update::<AsideSettings, _>(|s| s.settle_delay_ms = 450)?;
//! ```

mod delta;
mod error;
mod store;

use serde::{Serialize, de::DeserializeOwned};

pub use error::SettingsError;
pub use store::{SettingsStore, SettingsStoreBuilder};

/// A struct stored under its own top-level key of the settings file.
pub trait Settings: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    const SECTION: &'static str;
}
