pub mod api;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod updater;
pub mod utils;

pub use api::*;
pub use models::*;
pub use store::*;
pub use updater::*;
pub use utils::*;
