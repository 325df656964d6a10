pub mod app;
pub mod domain;
pub mod infra;

pub use domain::errors::DecodeError;
pub use domain::model::Selection;

pub fn init() {
    infra::logging::init();
}
