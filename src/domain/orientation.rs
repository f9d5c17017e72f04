//! Orientation normalization utilities.
//!
//! Image sources (camera, photo library, disk) store a bitmap together with
//! an orientation tag in their own convention; recognizers expect a single
//! canonical convention. This module provides the total, 1-to-1 mapping
//! between the two across the fixed set of 8 orientation values (4
//! rotations x mirrored/unmirrored), with an explicit default for anything
//! unrecognized, plus a helper that bakes an orientation into pixels.

use image::{RgbImage, imageops};
use tracing::warn;

/// Orientation tag as stored by the image source.
///
/// Values follow the EXIF convention: 4 rotations, each in a mirrored and
/// an unmirrored form. `Up` is the unrotated, unmirrored case and the
/// default for unrecognized metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoredOrientation {
    /// Row 0 at top, column 0 on the left (EXIF 1).
    #[default]
    Up,
    /// Mirrored along the vertical axis (EXIF 2).
    UpMirrored,
    /// Rotated 180 degrees (EXIF 3).
    Down,
    /// Mirrored along the horizontal axis (EXIF 4).
    DownMirrored,
    /// Mirrored, then rotated; row 0 on the left (EXIF 5).
    LeftMirrored,
    /// Rotated 90 degrees clockwise to display upright (EXIF 6).
    Right,
    /// Mirrored, then rotated; row 0 on the right (EXIF 7).
    RightMirrored,
    /// Rotated 270 degrees clockwise to display upright (EXIF 8).
    Left,
}

impl StoredOrientation {
    /// Parses an EXIF orientation value.
    ///
    /// Any value outside `1..=8` is treated as the unrotated, unmirrored
    /// case.
    pub fn from_exif(value: u16) -> Self {
        match value {
            1 => StoredOrientation::Up,
            2 => StoredOrientation::UpMirrored,
            3 => StoredOrientation::Down,
            4 => StoredOrientation::DownMirrored,
            5 => StoredOrientation::LeftMirrored,
            6 => StoredOrientation::Right,
            7 => StoredOrientation::RightMirrored,
            8 => StoredOrientation::Left,
            _ => {
                warn!("unrecognized EXIF orientation {}, defaulting to Up", value);
                StoredOrientation::Up
            }
        }
    }
}

/// Orientation in the canonical convention recognizers consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CanonicalOrientation {
    /// Content is upright.
    #[default]
    Up,
    /// Upright, mirrored along the vertical axis.
    UpMirrored,
    /// Rotated 180 degrees.
    Down,
    /// Rotated 180 degrees, mirrored.
    DownMirrored,
    /// Needs a 90 degree clockwise rotation to display upright.
    Right,
    /// Mirrored form of `Right`.
    RightMirrored,
    /// Needs a 270 degree clockwise rotation to display upright.
    Left,
    /// Mirrored form of `Left`.
    LeftMirrored,
}

/// Maps a stored orientation into the canonical convention.
///
/// The mapping is total and 1-to-1: the two conventions enumerate the same
/// 8 physical orientations under different encodings, so every stored value
/// has exactly one canonical counterpart.
pub fn normalize(stored: StoredOrientation) -> CanonicalOrientation {
    match stored {
        StoredOrientation::Up => CanonicalOrientation::Up,
        StoredOrientation::UpMirrored => CanonicalOrientation::UpMirrored,
        StoredOrientation::Down => CanonicalOrientation::Down,
        StoredOrientation::DownMirrored => CanonicalOrientation::DownMirrored,
        StoredOrientation::LeftMirrored => CanonicalOrientation::LeftMirrored,
        StoredOrientation::Right => CanonicalOrientation::Right,
        StoredOrientation::RightMirrored => CanonicalOrientation::RightMirrored,
        StoredOrientation::Left => CanonicalOrientation::Left,
    }
}

/// Bakes an orientation into pixels, producing an upright image.
///
/// Recognizer adapters that cannot consume an orientation tag directly can
/// use this to rotate/mirror the bitmap once before inference.
///
/// # Arguments
///
/// * `image` - The input image in storage order
/// * `orientation` - The canonical orientation of the image's content
///
/// # Returns
///
/// The upright image.
pub fn apply_orientation(image: RgbImage, orientation: CanonicalOrientation) -> RgbImage {
    match orientation {
        CanonicalOrientation::Up => image,
        CanonicalOrientation::UpMirrored => imageops::flip_horizontal(&image),
        CanonicalOrientation::Down => imageops::rotate180(&image),
        CanonicalOrientation::DownMirrored => imageops::flip_vertical(&image),
        CanonicalOrientation::Right => imageops::rotate90(&image),
        CanonicalOrientation::RightMirrored => imageops::flip_vertical(&imageops::rotate90(&image)),
        CanonicalOrientation::Left => imageops::rotate270(&image),
        CanonicalOrientation::LeftMirrored => imageops::flip_horizontal(&imageops::rotate90(&image)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);

    /// 2x2 image with a distinct corner pattern:
    /// red top-left, green top-right, blue bottom-left, yellow bottom-right.
    fn corner_image() -> RgbImage {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, RED);
        img.put_pixel(1, 0, GREEN);
        img.put_pixel(0, 1, BLUE);
        img.put_pixel(1, 1, YELLOW);
        img
    }

    #[test]
    fn test_from_exif_all_valid_values() {
        assert_eq!(StoredOrientation::from_exif(1), StoredOrientation::Up);
        assert_eq!(
            StoredOrientation::from_exif(2),
            StoredOrientation::UpMirrored
        );
        assert_eq!(StoredOrientation::from_exif(3), StoredOrientation::Down);
        assert_eq!(
            StoredOrientation::from_exif(4),
            StoredOrientation::DownMirrored
        );
        assert_eq!(
            StoredOrientation::from_exif(5),
            StoredOrientation::LeftMirrored
        );
        assert_eq!(StoredOrientation::from_exif(6), StoredOrientation::Right);
        assert_eq!(
            StoredOrientation::from_exif(7),
            StoredOrientation::RightMirrored
        );
        assert_eq!(StoredOrientation::from_exif(8), StoredOrientation::Left);
    }

    #[test]
    fn test_from_exif_unrecognized_defaults_to_up() {
        assert_eq!(StoredOrientation::from_exif(0), StoredOrientation::Up);
        assert_eq!(StoredOrientation::from_exif(9), StoredOrientation::Up);
        assert_eq!(StoredOrientation::from_exif(999), StoredOrientation::Up);
    }

    #[test]
    fn test_normalize_is_total_and_one_to_one() {
        let all = [
            StoredOrientation::Up,
            StoredOrientation::UpMirrored,
            StoredOrientation::Down,
            StoredOrientation::DownMirrored,
            StoredOrientation::LeftMirrored,
            StoredOrientation::Right,
            StoredOrientation::RightMirrored,
            StoredOrientation::Left,
        ];
        let mut mapped: Vec<CanonicalOrientation> = all.iter().map(|&s| normalize(s)).collect();
        mapped.sort_by_key(|c| *c as u8);
        mapped.dedup();
        assert_eq!(mapped.len(), all.len()); // Injective over a set of equal size.
    }

    #[test]
    fn test_apply_orientation_rotations() {
        let img = corner_image();

        // Up: unchanged.
        let out = apply_orientation(img.clone(), CanonicalOrientation::Up);
        assert_eq!(out.get_pixel(0, 0), &RED);

        // Down: 180 degrees, red moves to the bottom-right corner.
        let out = apply_orientation(img.clone(), CanonicalOrientation::Down);
        assert_eq!(out.get_pixel(1, 1), &RED);
        assert_eq!(out.get_pixel(0, 0), &YELLOW);

        // Right: 90 degrees clockwise, bottom-left moves to top-left.
        let out = apply_orientation(img.clone(), CanonicalOrientation::Right);
        assert_eq!(out.get_pixel(0, 0), &BLUE);
        assert_eq!(out.get_pixel(1, 0), &RED);

        // Left: 270 degrees clockwise, top-right moves to top-left.
        let out = apply_orientation(img.clone(), CanonicalOrientation::Left);
        assert_eq!(out.get_pixel(0, 0), &GREEN);
        assert_eq!(out.get_pixel(1, 0), &YELLOW);
    }

    #[test]
    fn test_apply_orientation_mirrors() {
        let img = corner_image();

        // UpMirrored: horizontal flip swaps left and right.
        let out = apply_orientation(img.clone(), CanonicalOrientation::UpMirrored);
        assert_eq!(out.get_pixel(0, 0), &GREEN);
        assert_eq!(out.get_pixel(1, 0), &RED);

        // DownMirrored: vertical flip swaps top and bottom.
        let out = apply_orientation(img.clone(), CanonicalOrientation::DownMirrored);
        assert_eq!(out.get_pixel(0, 0), &BLUE);
        assert_eq!(out.get_pixel(1, 0), &YELLOW);

        // LeftMirrored: transpose keeps top-left, swaps the off-diagonal.
        let out = apply_orientation(img.clone(), CanonicalOrientation::LeftMirrored);
        assert_eq!(out.get_pixel(0, 0), &RED);
        assert_eq!(out.get_pixel(1, 0), &BLUE);

        // RightMirrored: anti-transpose moves bottom-right to top-left.
        let out = apply_orientation(img.clone(), CanonicalOrientation::RightMirrored);
        assert_eq!(out.get_pixel(0, 0), &YELLOW);
        assert_eq!(out.get_pixel(1, 0), &GREEN);
    }

    #[test]
    fn test_apply_orientation_non_square_dimensions() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, RED);

        let out = apply_orientation(img.clone(), CanonicalOrientation::Right);
        assert_eq!(out.dimensions(), (2, 3));

        let out = apply_orientation(img.clone(), CanonicalOrientation::LeftMirrored);
        assert_eq!(out.dimensions(), (2, 3));

        let out = apply_orientation(img, CanonicalOrientation::Down);
        assert_eq!(out.dimensions(), (3, 2));
    }
}
