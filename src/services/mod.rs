pub mod gateway;
pub mod store;

pub use gateway::Gateway;
pub use store::{code_key, FileStore, KeyValueStore, MemoryStore, USER_NAME_KEY};
