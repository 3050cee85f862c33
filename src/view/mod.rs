//! Coordinate mapping and hit-testing for interactive review.
//!
//! Maps normalized bounding boxes to on-screen pixel rectangles for a
//! given page image and viewport, and inverts the mapping for
//! click-to-element resolution. Runs on a single interaction thread;
//! a newly computed transform simply supersedes the previous one.

use crate::model::{BoundingBox, FormElement};

/// Fraction of the limiting viewport axis the fitted image occupies.
pub const DEFAULT_FIT_FRACTION: f32 = 0.9;

/// A rectangle in display (pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    /// Left edge in pixels
    pub x: f32,
    /// Top edge in pixels
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

/// Uniform fit-scale plus centering offset for one page image in one
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    image_width: f32,
    image_height: f32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl ViewTransform {
    /// Fit an image of natural size `(image_width, image_height)` into
    /// the viewport, occupying `fit_fraction` of the limiting axis and
    /// centered on both axes.
    pub fn fit(
        image_width: f32,
        image_height: f32,
        viewport_width: f32,
        viewport_height: f32,
        fit_fraction: f32,
    ) -> Self {
        let scale =
            fit_fraction * (viewport_width / image_width).min(viewport_height / image_height);
        let offset_x = (viewport_width - image_width * scale) / 2.0;
        let offset_y = (viewport_height - image_height * scale) / 2.0;
        Self {
            image_width,
            image_height,
            scale,
            offset_x,
            offset_y,
        }
    }

    /// The uniform scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The centering offset `(x, y)` in pixels.
    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    /// Map a normalized box to its display rectangle.
    pub fn to_display(&self, b: &BoundingBox) -> DisplayRect {
        DisplayRect {
            x: self.offset_x + b.left * self.image_width * self.scale,
            y: self.offset_y + b.top * self.image_height * self.scale,
            width: b.width * self.image_width * self.scale,
            height: b.height * self.image_height * self.scale,
        }
    }

    /// Map a display point back to normalized page coordinates.
    pub fn to_normalized(&self, mx: f32, my: f32) -> (f32, f32) {
        (
            (mx - self.offset_x) / (self.scale * self.image_width),
            (my - self.offset_y) / (self.scale * self.image_height),
        )
    }
}

/// Resolve a click to the struck element: the first element in list
/// order whose normalized box contains the point (inclusive bounds), or
/// `None` when the point misses every box.
pub fn hit_test<'a>(
    elements: &'a [FormElement],
    transform: &ViewTransform,
    mx: f32,
    my: f32,
) -> Option<&'a FormElement> {
    let (x, y) = transform.to_normalized(mx, my);
    elements.iter().find(|e| e.bounding_box.contains(x, y))
}
