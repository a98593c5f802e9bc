use anyhow::{Context, Result, bail};
use jujutsu_core::ScreenGrabber;
use jujutsu_types::{CaptureRegion, CapturedImage};
use xcap::Monitor;

/// Screen grabber backed by `xcap`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapGrabber;

impl ScreenGrabber for XcapGrabber {
    fn capture_region(&self, region: CaptureRegion) -> Result<CapturedImage> {
        capture_screen_region(region)
    }
}

/// Monitor bounds as `(x, y, width, height)`.
type Bounds = (i32, i32, u32, u32);

fn contains(bounds: Bounds, region: CaptureRegion) -> bool {
    let (x, y, width, height) = bounds;
    let right = i64::from(x) + i64::from(width);
    let bottom = i64::from(y) + i64::from(height);
    region.x >= x && region.y >= y && region.right() <= right && region.bottom() <= bottom
}

/// Capture a region of the screen as raw RGBA.
///
/// The region has to lie inside a single monitor.
pub fn capture_screen_region(region: CaptureRegion) -> Result<CapturedImage> {
    if region.width == 0 || region.height == 0 {
        bail!("Empty capture region {region:?}");
    }

    let monitors = Monitor::all().context("Failed to get monitors")?;
    let monitor = monitors
        .iter()
        .find(|m| contains((m.x(), m.y(), m.width(), m.height()), region))
        .with_context(|| format!("Region {region:?} is not inside a single monitor"))?;

    let image = monitor.capture_image().context("Failed to capture screen")?;

    let left = (region.x - monitor.x()) as u32;
    let top = (region.y - monitor.y()) as u32;
    if left + region.width > image.width() || top + region.height > image.height() {
        bail!(
            "Region {region:?} exceeds captured {}x{} frame",
            image.width(),
            image.height()
        );
    }

    let cropped =
        xcap::image::imageops::crop_imm(&image, left, top, region.width, region.height).to_image();

    Ok(CapturedImage {
        width: cropped.width(),
        height: cropped.height(),
        data: cropped.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: i32, y: i32, width: u32, height: u32) -> CaptureRegion {
        CaptureRegion {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn region_inside_monitor() {
        let monitor = (0, 0, 1920, 1080);
        assert!(contains(monitor, region(100, 100, 300, 200)));
        assert!(contains(monitor, region(0, 0, 1920, 1080)));
    }

    #[test]
    fn region_crossing_edge_is_rejected() {
        let monitor = (0, 0, 1920, 1080);
        assert!(!contains(monitor, region(1800, 100, 300, 200)));
        assert!(!contains(monitor, region(-5, 0, 10, 10)));
    }

    #[test]
    fn secondary_monitor_with_negative_origin() {
        let left_monitor = (-1280, 0, 1280, 1024);
        assert!(contains(left_monitor, region(-1000, 10, 200, 100)));
        assert!(!contains(left_monitor, region(-100, 10, 200, 100)));
    }
}
