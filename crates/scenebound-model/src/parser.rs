use thiserror::Error;

use crate::{asset::GltfParser, description::JsonSceneParser, node::SceneNode};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Turns raw scene bytes into a scene hierarchy. Parsers hold no state between calls.
pub trait SceneParser {
    fn parse(&self, data: &[u8]) -> Result<SceneNode, ParseError>;
}

impl<P: SceneParser + ?Sized> SceneParser for &P {
    fn parse(&self, data: &[u8]) -> Result<SceneNode, ParseError> {
        (**self).parse(data)
    }
}

impl<P: SceneParser + ?Sized> SceneParser for Box<P> {
    fn parse(&self, data: &[u8]) -> Result<SceneNode, ParseError> {
        (**self).parse(data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Gltf,
    Json,
}

pub const GLB_MAGIC: &[u8; 4] = b"glTF";

/// Guesses the format of `data`: binary glTF by its magic, JSON glTF by its top level `"asset"` member.
pub fn detect_format(data: &[u8]) -> Result<SceneFormat, ParseError> {
    if data.starts_with(GLB_MAGIC) {
        return Ok(SceneFormat::Gltf);
    }

    #[derive(serde::Deserialize)]
    struct Probe {
        asset: Option<serde::de::IgnoredAny>,
    }

    let probe: Probe = serde_json::from_slice(data)?;
    Ok(if probe.asset.is_some() {
        SceneFormat::Gltf
    } else {
        SceneFormat::Json
    })
}

/// Dispatches to the glTF or JSON parser based on [`detect_format`].
#[derive(Debug, Clone, Default)]
pub struct AutoParser {
    pub gltf: GltfParser,
    pub json: JsonSceneParser,
}

impl SceneParser for AutoParser {
    fn parse(&self, data: &[u8]) -> Result<SceneNode, ParseError> {
        match detect_format(data)? {
            SceneFormat::Gltf => self.gltf.parse(data),
            SceneFormat::Json => self.json.parse(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats() {
        assert_eq!(detect_format(b"glTF\x02\0\0\0").unwrap(), SceneFormat::Gltf);
        assert_eq!(
            detect_format(br#"{"asset":{"version":"2.0"},"nodes":[]}"#).unwrap(),
            SceneFormat::Gltf
        );
        assert_eq!(
            detect_format(br#"{"name":"root","children":[]}"#).unwrap(),
            SceneFormat::Json
        );
        assert!(matches!(detect_format(b"\0\x01garbage"), Err(ParseError::Json(_))));
    }

    #[test]
    fn auto_parser_reads_json_scenes() {
        let root = AutoParser::default()
            .parse(br#"{"name":"root","children":[{"name":"child"}]}"#)
            .unwrap();

        assert_eq!(root.name, "root");
        assert_eq!(root.children[0].name, "child");
    }
}
