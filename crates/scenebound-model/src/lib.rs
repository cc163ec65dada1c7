pub mod asset;
pub mod bounds;
pub mod buffer;
pub mod description;
pub mod geometry;
pub mod handle;
pub mod merge;
pub mod node;
pub mod options;
pub mod parser;
pub mod traverse;

pub use asset::GltfParser;
pub use bounds::{BoundingBox, BoundingSphere};
pub use buffer::GeometryBuffer;
pub use description::JsonSceneParser;
pub use geometry::{FaceGeometry, GeometryError, IndexedGeometry, MeshGeometry};
pub use handle::ModelHandle;
pub use merge::GeometryMerger;
pub use node::SceneNode;
pub use options::{BoundsOptions, SphereCenter, TransformSpace};
pub use parser::{AutoParser, ParseError, SceneFormat, SceneParser};
