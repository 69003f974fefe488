// Browser front end - form page, fetch submission and tool status

pub mod handlers;
pub mod page;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppContext, AppState};
