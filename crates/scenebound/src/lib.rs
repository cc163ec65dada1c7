#![doc(html_no_source)]

pub mod load;
mod scenebound;

pub use load::{load_model, load_model_blocking, load_scene, FailurePolicy, LoadError, LoadOptions};
pub use scenebound::Scenebound;

// Reexport all crates
pub use scenebound_fetch;
pub use scenebound_model;
pub use scenebound_profiling;
pub use scenebound_transform;
