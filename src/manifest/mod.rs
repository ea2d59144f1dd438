//! Project manifest (`build.json`) schema and loading.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
