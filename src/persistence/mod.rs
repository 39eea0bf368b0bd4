pub mod files;
pub mod kv_store;
pub mod metadata;
pub mod seed;

pub use files::{
    atomic_write, config_file, ensure_data_dir, get_data_dir, init_local_data_dir, log_file,
    meta_file, read_file, report_file,
};
pub use kv_store::{load_state, save_state, FileStore, KeyValueStore, MemoryStore, APP_STATE_KEY};
pub use metadata::{load_metadata, save_metadata, AppMetadata};
