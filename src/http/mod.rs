pub mod routes;
pub mod server;

pub use self::routes::AppState;
pub use self::server::{build_router, serve};
