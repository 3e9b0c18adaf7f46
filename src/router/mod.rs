mod compiled;
mod options;
mod service;

pub use compiled::{CompiledRouter, build};
pub use options::{RouterOptions, RouterOptionsBuilder};
pub use service::Router;
