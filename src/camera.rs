// Opens a camera for the hand preview window and converts frames into a
// buffer the size of the tracking frame.
// Visual expectation: each `next_frame()` is one fresh preview image, already
// scaled to the frame the landmarks are normalized against.

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

// `image` does the RGB decode target and the rescale to tracking size.
use image::{imageops, imageops::FilterType, ImageBuffer, Rgb};

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    out_width: u32,
    out_height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution and start streaming.
    /// Frames come back as `out_width` x `out_height` whatever the device picked.
    pub fn open(index: u32, out_width: u32, out_height: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(out_width, out_height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        tracing::info!(
            index,
            width = actual.width(),
            height = actual.height(),
            "camera streaming"
        );

        Ok(Self { cam, out_width, out_height })
    }

    /// Grab one frame (blocks until the device delivers) as 0x00RRGGBB pixels.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img: ImageBuffer<Rgb<u8>, Vec<u8>> = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        Ok(to_frame_buffer(&rgb_img, self.out_width, self.out_height))
    }

    pub fn stop(mut self) {
        if let Err(e) = self.cam.stop_stream() {
            tracing::warn!("stopping camera: {e}");
        }
    }
}

/// Scale an RGB image to `width` x `height` and pack it for minifb.
pub fn to_frame_buffer(img: &ImageBuffer<Rgb<u8>, Vec<u8>>, width: u32, height: u32) -> FrameBuffer {
    let scaled;
    let img = if img.dimensions() == (width, height) {
        img
    } else {
        scaled = imageops::resize(img, width, height, FilterType::Triangle);
        &scaled
    };

    let pixels = img
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    FrameBuffer { width: width as usize, height: height as usize, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_size_packs_pixels() {
        let img = ImageBuffer::from_fn(2, 1, |x, _| if x == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
        let fb = to_frame_buffer(&img, 2, 1);
        assert_eq!(fb.pixels, vec![0x00FF0000, 0x000000FF]);
    }

    #[test]
    fn test_rescales_to_tracking_size() {
        let img = ImageBuffer::from_pixel(1280, 720, Rgb([10, 20, 30]));
        let fb = to_frame_buffer(&img, 640, 480);
        assert_eq!((fb.width, fb.height), (640, 480));
        assert_eq!(fb.pixels.len(), 640 * 480);
        let c = crate::types::Rgb::from_u32(fb.pixels[320 * 640 / 2]);
        assert!(c.r.abs_diff(10) <= 1 && c.g.abs_diff(20) <= 1 && c.b.abs_diff(30) <= 1, "{c}");
    }
}
