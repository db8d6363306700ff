mod store;

pub use store::{SettingsOrigin, SettingsStore};
