use serde::{Deserialize, Serialize};

pub type Vec2 = [f32; 2];
pub type Vec4 = [f32; 4];

/// Top-level keys of a Lottie document that animated values depend on.
/// Everything else in the document (layers, assets, markers) is ignored here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompositionHeader {
    #[serde(default)]
    pub v: Option<String>,
    #[serde(default)]
    pub nm: Option<String>,
    pub ip: f32,
    pub op: f32,
    pub fr: f32,
    pub w: u32,
    pub h: u32,
}

impl CompositionHeader {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Length of the composition in frames (`op - ip`).
    pub fn duration_frames(&self) -> f32 {
        self.op - self.ip
    }

    pub fn duration_ms(&self) -> i64 {
        if self.fr <= 0.0 {
            return 0;
        }
        (self.duration_frames() / self.fr * 1000.0) as i64
    }
}
