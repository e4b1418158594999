mod handlers;
mod manifest;
mod routes;
mod stream;

pub use routes::create_router;
