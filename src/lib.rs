pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;

pub use config::{Config, Endpoint, RenderMode};
pub use error::FetchFailure;
pub use models::{decode_model_list, ModelId, ModelState, ModelStates, RecordId};
pub use state::AppState;
pub use store::{FetchStatus, ModelListStore};
