//! Pure calculation functions for thumbnail viewports.
//!
//! All functions here are pure and testable without any PDF or raster.

/// Natural size of a PDF page in points (scale 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// A scaled page viewport, sized in whole raster pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform scale applied to both page axes.
    pub scale: f32,
    pub width: u32,
    pub height: u32,
}

/// Scale a page so its width matches `target_width`, preserving aspect ratio.
///
/// Returns `None` for degenerate pages (non-finite or non-positive sides) and
/// for a zero target width. The height is rounded and never below one pixel.
///
/// # Examples
/// ```
/// # use pdf_gallery::thumbnail::{PageSize, fit_to_width};
/// // US Letter (612x792pt) at 200px wide → 200x259
/// let vp = fit_to_width(PageSize { width: 612.0, height: 792.0 }, 200).unwrap();
/// assert_eq!((vp.width, vp.height), (200, 259));
/// ```
pub fn fit_to_width(page: PageSize, target_width: u32) -> Option<Viewport> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(page.width) || !valid(page.height) || target_width == 0 {
        return None;
    }

    let scale = target_width as f32 / page.width;
    // Rounded rather than truncated: 612 * (200 / 612) may land a hair
    // below 200 in f32.
    let width = (page.width * scale).round().max(1.0) as u32;
    let height = (page.height * scale).round().max(1.0) as u32;

    Some(Viewport {
        scale,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(width: f32, height: f32) -> PageSize {
        PageSize { width, height }
    }

    #[test]
    fn letter_portrait() {
        let vp = fit_to_width(page(612.0, 792.0), 200).unwrap();
        assert_eq!((vp.width, vp.height), (200, 259));
    }

    #[test]
    fn a4_portrait() {
        // 595x842 → 200 x 283.02
        let vp = fit_to_width(page(595.0, 842.0), 200).unwrap();
        assert_eq!((vp.width, vp.height), (200, 283));
    }

    #[test]
    fn landscape_page() {
        // 842x595 → 200 x 141.33
        let vp = fit_to_width(page(842.0, 595.0), 200).unwrap();
        assert_eq!((vp.width, vp.height), (200, 141));
    }

    #[test]
    fn small_page_is_scaled_up() {
        let vp = fit_to_width(page(100.0, 50.0), 200).unwrap();
        assert_eq!(vp.scale, 2.0);
        assert_eq!((vp.width, vp.height), (200, 100));
    }

    #[test]
    fn extreme_landscape_keeps_one_pixel_height() {
        let vp = fit_to_width(page(100_000.0, 1.0), 200).unwrap();
        assert_eq!((vp.width, vp.height), (200, 1));
    }

    #[test]
    fn degenerate_pages_are_rejected() {
        assert!(fit_to_width(page(0.0, 792.0), 200).is_none());
        assert!(fit_to_width(page(612.0, 0.0), 200).is_none());
        assert!(fit_to_width(page(-612.0, 792.0), 200).is_none());
        assert!(fit_to_width(page(f32::NAN, 792.0), 200).is_none());
        assert!(fit_to_width(page(f32::INFINITY, 792.0), 200).is_none());
    }

    #[test]
    fn zero_target_is_rejected() {
        assert!(fit_to_width(page(612.0, 792.0), 0).is_none());
    }
}
