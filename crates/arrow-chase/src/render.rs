//! Debug renderings of the segmentation.

use arrow_chase_core::{ColorImage, LabelGrid, Rgb};
use arrow_chase_regions::RegionTable;

/// Deterministic false color for a region id; channels wrap modulo 256.
#[inline]
pub fn label_color(id: u32) -> Rgb {
    let id = id as u8;
    Rgb::new(
        255u8.wrapping_sub(id.wrapping_mul(5)),
        255u8.wrapping_sub(id.wrapping_mul(15)),
        255u8.wrapping_sub(id.wrapping_mul(30)),
    )
}

/// Paint every pixel with the color of its region.
pub fn render_labels(labels: &LabelGrid) -> ColorImage {
    ColorImage::from_fn(labels.width, labels.height, |x, y| {
        label_color(labels.labels[y * labels.width + x])
    })
}

/// Copy of `img` with every boundary pixel of every region drawn in black.
pub fn render_boundaries(img: &ColorImage, regions: &RegionTable) -> ColorImage {
    let mut out = img.clone();
    for p in regions.iter().flat_map(|r| r.boundary.iter()) {
        out.set(p.x, p.y, Rgb::BLACK);
    }
    out
}

/// Copy of `img` with every region centroid marked red.
pub fn render_centroids(img: &ColorImage, regions: &RegionTable) -> ColorImage {
    let mut out = img.clone();
    for r in regions.iter() {
        out.set(r.centroid.x, r.centroid.y, Rgb::RED);
    }
    out
}

/// Labels, boundaries and centroids in one image.
pub fn render_segmentation(labels: &LabelGrid, regions: &RegionTable) -> ColorImage {
    let with_edges = render_boundaries(&render_labels(labels), regions);
    render_centroids(&with_edges, regions)
}
