pub mod preferences;
pub mod store;

pub use preferences::UserPreferences;
pub use store::ProfileStore;
