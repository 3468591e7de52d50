pub mod course;
pub mod database;
pub mod player;
pub mod round;
pub mod settings;
pub mod types;
pub mod utils;

pub use course::*;
pub use database::*;
pub use player::*;
pub use round::*;
pub use settings::*;
pub use types::*;
pub use utils::*;
