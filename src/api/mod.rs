pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use handlers::AppState;
pub use server::{create_router, open_store, serve};
