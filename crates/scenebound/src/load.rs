use futures::executor::block_on;
use scenebound_fetch::{FetchError, Fetcher};
use scenebound_model::{BoundsOptions, ModelHandle, ParseError, SceneNode, SceneParser};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch scene: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to parse scene: {0}")]
    Parse(#[from] ParseError),
}

/// What a load does when fetching or parsing fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Hand the error to the caller.
    #[default]
    Propagate,
    /// Log the error and return an empty model.
    DegradeToEmpty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub bounds: BoundsOptions,
    pub failure_policy: FailurePolicy,
}

impl LoadOptions {
    pub fn with_bounds(mut self, bounds: BoundsOptions) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

/// Fetches `location` and parses it into a scene hierarchy.
pub async fn load_scene<F, P>(location: &str, fetcher: &F, parser: &P) -> Result<SceneNode, LoadError>
where
    F: Fetcher,
    P: SceneParser + ?Sized,
{
    let data = fetcher.fetch(location).await?;

    scenebound_profiling::profile_scope!("parse", location);
    let root = parser.parse(&data)?;
    log::debug!(
        "Parsed {} nodes ({} with geometry) from {}.",
        root.node_count(),
        root.mesh_count(),
        location
    );
    Ok(root)
}

/// Loads `location` and builds a [`ModelHandle`] with fitted bounds around it.
///
/// Every load is recorded as its own profiler frame.
pub async fn load_model<F, P>(
    location: &str,
    fetcher: &F,
    parser: &P,
    options: &LoadOptions,
) -> Result<ModelHandle, LoadError>
where
    F: Fetcher,
    P: SceneParser + ?Sized,
{
    scenebound_profiling::new_frame();

    let root = match load_scene(location, fetcher, parser).await {
        Ok(root) => Some(root),
        Err(err) => match options.failure_policy {
            FailurePolicy::Propagate => return Err(err),
            FailurePolicy::DegradeToEmpty => {
                log::warn!("Loading {} failed, continuing with an empty model: {}", location, err);
                None
            }
        },
    };

    let handle = ModelHandle::with_options(root, options.bounds);
    if handle.is_empty() {
        log::info!("Loaded {} without any geometry.", location);
    } else {
        log::info!(
            "Loaded {}: {} vertices, {} triangles in {} meshes.",
            location,
            handle.geometry().vertex_count(),
            handle.geometry().triangle_count(),
            handle.mesh_count()
        );
    }
    Ok(handle)
}

/// [`load_model`] driven to completion on the current thread.
pub fn load_model_blocking<F, P>(
    location: &str,
    fetcher: &F,
    parser: &P,
    options: &LoadOptions,
) -> Result<ModelHandle, LoadError>
where
    F: Fetcher,
    P: SceneParser + ?Sized,
{
    block_on(load_model(location, fetcher, parser, options))
}
