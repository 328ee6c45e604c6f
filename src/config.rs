use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::args::Args;
use crate::brush::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, RAINBOW_STEP};
use crate::error::Error;
use crate::gesture::PINCH_THRESHOLD;
use crate::history::HISTORY_CAPACITY;
use crate::session::SessionSettings;
use crate::types::WHITE;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub gesture: GestureConfig,
    pub brush: BrushConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    pub mirror: bool,
    pub target_fps: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub pinch_threshold: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub size: u32,
    pub size_step: u32,
    pub rainbow_step: u16,
    pub eraser_color: [u8; 3], // painted opaque; match the window background
    pub spray_seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, mirror: true, target_fps: 30 }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { pinch_threshold: PINCH_THRESHOLD }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            size_step: 2,
            rainbow_step: RAINBOW_STEP,
            eraser_color: WHITE,
            spray_seed: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: HISTORY_CAPACITY }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file gives defaults; a file that is not
    /// valid config JSON is reported and also gives defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = match Self::parse(&content) {
            Ok(c) => {
                info!("Loaded configuration from {}", path.display());
                c
            }
            Err(e) => {
                warn!("{e}. Using defaults.");
                Self::default()
            }
        };
        Ok(config.sanitized())
    }

    pub fn parse(content: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(content)?)
    }

    /// Pull out-of-range values back into range.
    pub fn sanitized(mut self) -> Self {
        let size = self.brush.size.clamp(MIN_SIZE, MAX_SIZE);
        if size != self.brush.size {
            warn!("brush.size {} out of range, using {size}", self.brush.size);
            self.brush.size = size;
        }
        if !(self.gesture.pinch_threshold > 0.0) {
            warn!("gesture.pinch_threshold must be positive, using {PINCH_THRESHOLD}");
            self.gesture.pinch_threshold = PINCH_THRESHOLD;
        }
        self.brush.size_step = self.brush.size_step.max(1);
        self.brush.rainbow_step %= 360;
        self.history.capacity = self.history.capacity.max(1);
        self.camera.target_fps = self.camera.target_fps.max(1);
        self
    }

    /// Command-line flags win over the file.
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(index) = args.cam_index {
            self.camera.index = index;
        }
        if args.no_mirror {
            self.camera.mirror = false;
        }
        if args.seed.is_some() {
            self.brush.spray_seed = args.seed;
        }
        self
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            pinch_threshold: self.gesture.pinch_threshold,
            brush_size: self.brush.size,
            size_step: self.brush.size_step,
            rainbow_step: self.brush.rainbow_step,
            eraser_color: self.brush.eraser_color,
            history_capacity: self.history.capacity,
            spray_seed: self.brush.spray_seed,
        }
    }
}
