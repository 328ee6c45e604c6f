// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Opening/starting the camera failed
    #[error("Camera init error: {0}")]
    CameraInit(String),

    /// Grabbing/decoding a frame failed. Not fatal: the tick is skipped.
    #[error("Camera frame error: {0}")]
    CameraFrame(String),

    /// The config file exists but could not be read
    #[error("Config read error: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// The config file is not valid JSON for `AppConfig`
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
