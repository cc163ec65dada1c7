use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use scenebound::scenebound_fetch::{location_extension, FileFetcher};
use scenebound::scenebound_model::{
    AutoParser, BoundsOptions, GltfParser, JsonSceneParser, ModelHandle, SceneParser, SphereCenter,
    TransformSpace,
};
use scenebound::{load_model_blocking, FailurePolicy, LoadOptions, Scenebound};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Pick by file extension, falling back to sniffing the content
    Auto,
    Gltf,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about = "Prints the bounding box and sphere of a scene", long_about = None)]
pub struct Args {
    /// Scene to load, a path or file:// url
    pub location: String,

    /// Directory relative locations are resolved against
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Auto)]
    pub format: Format,

    /// Center the sphere on the vertex centroid instead of the box midpoint
    #[arg(long, default_value_t = false)]
    pub centroid: bool,

    /// Apply node transforms before fitting
    #[arg(long, default_value_t = false)]
    pub scene_space: bool,

    /// Report an empty model instead of failing when the scene cannot be loaded
    #[arg(long, default_value_t = false)]
    pub degrade_on_error: bool,
}

impl Args {
    pub fn load_options(&self) -> LoadOptions {
        let bounds = BoundsOptions::default()
            .with_sphere_center(if self.centroid {
                SphereCenter::Centroid
            } else {
                SphereCenter::BoxMidpoint
            })
            .with_transform_space(if self.scene_space {
                TransformSpace::Scene
            } else {
                TransformSpace::Local
            });

        LoadOptions::default()
            .with_bounds(bounds)
            .with_failure_policy(if self.degrade_on_error {
                FailurePolicy::DegradeToEmpty
            } else {
                FailurePolicy::Propagate
            })
    }

    pub fn parser(&self) -> Box<dyn SceneParser> {
        let format = match self.format {
            Format::Auto => match location_extension(&self.location).as_deref() {
                Some("gltf" | "glb") => Format::Gltf,
                _ => Format::Auto,
            },
            format => format,
        };

        // External glTF buffers live next to the scene file.
        let scene_dir = self
            .base_dir
            .join(self.location.trim_start_matches("file://"))
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.base_dir.clone());

        match format {
            Format::Auto => Box::new(AutoParser {
                gltf: GltfParser::with_base_dir(scene_dir),
                json: JsonSceneParser,
            }),
            Format::Gltf => Box::new(GltfParser::with_base_dir(scene_dir)),
            Format::Json => Box::new(JsonSceneParser),
        }
    }
}

pub fn report(location: &str, handle: &ModelHandle) -> String {
    let mut report = format!(
        "{}\n  meshes:    {} ({} skipped)\n  geometry:  {} vertices, {} triangles\n",
        location,
        handle.mesh_count(),
        handle.skipped_mesh_count(),
        handle.geometry().vertex_count(),
        handle.geometry().triangle_count()
    );

    if handle.is_empty() {
        report.push_str("  bounds:    none (no geometry)\n");
        return report;
    }

    let bounding_box = handle.bounding_box();
    let sphere = handle.bounding_sphere();
    report.push_str(&format!(
        "  box:       min {} max {} size {}\n  sphere:    center {} radius {}\n",
        bounding_box.min,
        bounding_box.max,
        bounding_box.size(),
        sphere.center,
        sphere.radius
    ));
    report
}

pub fn internal_main() -> Result<()> {
    let _scenebound = Scenebound::new("Bounds Report");
    let args = Args::parse();
    log::debug!("{:?}", args);

    let fetcher = FileFetcher::new(&args.base_dir);
    let handle = load_model_blocking(
        &args.location,
        &fetcher,
        &args.parser(),
        &args.load_options(),
    )
    .with_context(|| format!("Failed to load {}", args.location))?;

    print!("{}", report(&args.location, &handle));
    Ok(())
}
