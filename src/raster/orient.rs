use image::{ImageBuffer, Pixel, imageops};

use crate::layout::panel::PanelSpec;

/// Apply a panel's page transforms in order: quarter turn counter-clockwise when the working
/// and print orientations differ, then 180° rotation, vertical flip, horizontal flip.
///
/// Content, mask and border layers all go through this so they stay aligned.
pub(crate) fn orient<P>(
    img: ImageBuffer<P, Vec<P::Subpixel>>,
    spec: &PanelSpec,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    let mut out = if spec.needs_quarter_turn() {
        imageops::rotate270(&img)
    } else {
        img
    };
    if spec.rotated {
        imageops::rotate180_in_place(&mut out);
    }
    if spec.flip_v {
        imageops::flip_vertical_in_place(&mut out);
    }
    if spec.flip_h {
        imageops::flip_horizontal_in_place(&mut out);
    }
    out
}
