use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub mod location;
pub use location::{location_extension, resolve_location};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Location is empty")]
    EmptyLocation,

    #[error("Unsupported location scheme \"{scheme}\"")]
    UnsupportedScheme { scheme: String },

    #[error("Nothing found at \"{location}\"")]
    NotFound { location: String },

    #[error("Failed to read \"{location}\": {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Source of raw scene bytes.
///
/// Fetching is the only suspension point of a load, everything after it runs synchronously.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(location).await
    }
}

/// Reads locations from the filesystem, relative to a base directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base_dir: PathBuf,
}

impl Default for FileFetcher {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Fetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        scenebound_profiling::profile_function!(location);

        let path = resolve_location(location, &self.base_dir)?;
        match std::fs::read(&path) {
            Ok(data) => {
                log::debug!("Fetched {} bytes from {}.", data.len(), path.display());
                Ok(data)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Err(FetchError::NotFound {
                location: location.to_owned(),
            }),
            Err(source) => Err(FetchError::Io {
                location: location.to_owned(),
                source,
            }),
        }
    }
}

/// In-memory location store, mostly used to feed fixtures into a load.
#[derive(Debug, Default, Clone)]
pub struct MemoryFetcher {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: &str, data: impl Into<Vec<u8>>) -> &mut Self {
        self.entries.insert(location.to_owned(), data.into());
        self
    }

    pub fn with(mut self, location: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert(location, data);
        self
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        self.entries
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                location: location.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_fetcher_returns_inserted_bytes() {
        let fetcher = MemoryFetcher::new().with("scene.json", b"{}".to_vec());

        assert_eq!(block_on(fetcher.fetch("scene.json")).unwrap(), b"{}");
        assert!(matches!(
            block_on(fetcher.fetch("missing.json")),
            Err(FetchError::NotFound { .. })
        ));
    }

    #[test]
    fn file_fetcher_reads_relative_to_base_dir() {
        let dir = std::env::temp_dir().join(format!("scenebound-fetch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("triangle.json"), b"payload").unwrap();

        let fetcher = FileFetcher::new(&dir);
        assert_eq!(block_on(fetcher.fetch("triangle.json")).unwrap(), b"payload");
        assert_eq!(
            block_on(fetcher.fetch("file://triangle.json")).unwrap(),
            b"payload"
        );
        assert!(matches!(
            block_on(fetcher.fetch("absent.json")),
            Err(FetchError::NotFound { .. })
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_fetcher_rejects_remote_locations() {
        let fetcher = FileFetcher::default();
        assert!(matches!(
            block_on(fetcher.fetch("http://example.com/scene.glb")),
            Err(FetchError::UnsupportedScheme { .. })
        ));
    }
}
