pub mod args;
pub mod error;
pub mod model;
pub mod scoring {
    pub mod engine;
    pub mod order;
    pub mod stats;
}
pub mod storage;
pub mod controller {
    pub mod courses;
    pub mod db_prefill;
    pub mod new_round;
    pub mod players;
    pub mod rounds;
    pub mod settings;
}
pub mod view {
    pub mod courses;
    pub mod home;
    pub mod layout;
    pub mod players;
    pub mod round;
    pub mod settings;
}

const HTMX_PATH: &str = "https://unpkg.com/htmx.org@1.9.12";

pub use error::PartrackError;
pub use storage::{RoundLocks, SqlStorage, Storage, StorageError};
