/// Region id per pixel, produced by connected-component labeling.
///
/// Ids are dense and 1-based (`1..=count`). `0` only appears while a grid is
/// being filled and marks a pixel that has not been visited yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabelGrid {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<u32>, // row-major, len = w*h
    pub count: u32,
}

impl LabelGrid {
    /// All-unvisited grid.
    pub fn unvisited(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            labels: vec![0; width * height],
            count: 0,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y * self.width + x])
    }

    /// Label at a signed coordinate; `None` outside the grid.
    #[inline]
    pub fn at(&self, x: i64, y: i64) -> Option<u32> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.get(x, y)
    }

    /// Valid region ids, `1..=count`.
    pub fn ids(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.count
    }

    #[inline]
    pub fn is_valid_id(&self, id: u32) -> bool {
        id >= 1 && id <= self.count
    }

    /// Iterate `(x, y, label)` in raster order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let w = self.width.max(1);
        self.labels
            .iter()
            .enumerate()
            .map(move |(i, &l)| (i % w, i / w, l))
    }
}
