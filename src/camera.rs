// Opens the default camera and converts frames into a buffer suitable for the window.
// Every frame comes out at the canvas resolution, mirrored if asked, as
// 0x00RRGGBB pixels ready to blit under the paint layer.

use log::info;

use crate::error::Error;
use crate::types::FrameBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

use image::RgbImage;
use image::imageops::{self, FilterType};

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
    mirror: bool,
}

impl CameraCapture {
    /// Open camera `index` asking for `width`x`height` at 30 FPS. The device
    /// may pick another resolution; frames are rescaled to the requested one.
    pub fn new(index: u32, width: u32, height: u32, mirror: bool) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        info!(
            "Camera {index} streaming at {}x{} (scaled to {width}x{height})",
            actual.width(),
            actual.height()
        );

        Ok(Self { cam, width, height, mirror })
    }

    /// Grab one frame. Blocks until the camera has one ready.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        Ok(to_frame_buffer(rgb_img, self.width, self.height, self.mirror))
    }
}

/// Mirror (selfie view) and rescale an RGB image, then pack it as 0x00RRGGBB.
pub fn to_frame_buffer(mut img: RgbImage, width: u32, height: u32, mirror: bool) -> FrameBuffer {
    if mirror {
        imageops::flip_horizontal_in_place(&mut img);
    }
    if img.dimensions() != (width, height) {
        img = imageops::resize(&img, width, height, FilterType::Triangle);
    }

    let pixels = img
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();

    FrameBuffer { width: width as usize, height: height as usize, pixels }
}
