use std::collections::VecDeque;

use arrow_chase_core::{ColorImage, LabelGrid};

/// Label 4-connected components of identical pixel values.
///
/// Seeds are taken in raster order, so the region containing the top-left
/// pixel is always id `1`. Neighbours join a region only when their value is
/// exactly equal to the seed's, which makes this a general same-value pass
/// rather than a binary one.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn label_regions(img: &ColorImage) -> LabelGrid {
    let (w, h) = (img.width, img.height);
    let mut grid = LabelGrid::unvisited(w, h);
    let mut queue = VecDeque::new();
    let mut next = 0u32;

    for start in 0..w * h {
        if grid.labels[start] != 0 {
            continue;
        }
        next += 1;
        let value = img.data[start];
        grid.labels[start] = next;
        queue.push_back(start);

        while let Some(idx) = queue.pop_front() {
            let (x, y) = (idx % w, idx / w);
            let mut visit = |n: usize| {
                if grid.labels[n] == 0 && img.data[n] == value {
                    grid.labels[n] = next;
                    queue.push_back(n);
                }
            };
            if y > 0 {
                visit(idx - w);
            }
            if y + 1 < h {
                visit(idx + w);
            }
            if x > 0 {
                visit(idx - 1);
            }
            if x + 1 < w {
                visit(idx + 1);
            }
        }
    }

    grid.count = next;
    log::debug!("labeled {} regions in {}x{} image", next, w, h);
    grid
}
