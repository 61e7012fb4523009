// Storage module: history persistence interface and the JSON file store.

pub mod json_file;
pub mod traits;

pub use json_file::JsonFileStore;
pub use traits::HistoryStore;
