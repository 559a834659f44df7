//! Connected-component labeling.

use std::collections::VecDeque;

use crate::bitmap::Bitmap;

/// 8-connected labeling of a bitmap's foreground.
///
/// Labels start at 1 and are assigned in row-major scan order of each
/// component's first pixel; 0 marks background.
#[derive(Debug, Clone)]
pub struct Components {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    areas: Vec<usize>,
}

impl Components {
    /// Label every foreground pixel of `bitmap`.
    pub fn label(bitmap: &Bitmap) -> Self {
        let (width, height) = (bitmap.width(), bitmap.height());
        let mut labels = vec![0u32; width as usize * height as usize];
        let mut areas = Vec::new();
        let mut queue = VecDeque::new();
        let idx = |x: u32, y: u32| y as usize * width as usize + x as usize;

        for y in 0..height {
            for x in 0..width {
                if !bitmap.get(x, y) || labels[idx(x, y)] != 0 {
                    continue;
                }
                let label = areas.len() as u32 + 1;
                let mut area = 0usize;
                labels[idx(x, y)] = label;
                queue.push_back((x, y));
                while let Some((cx, cy)) = queue.pop_front() {
                    area += 1;
                    for (nx, ny) in bitmap.neighbors8(cx, cy) {
                        if bitmap.get(nx, ny) && labels[idx(nx, ny)] == 0 {
                            labels[idx(nx, ny)] = label;
                            queue.push_back((nx, ny));
                        }
                    }
                }
                areas.push(area);
            }
        }

        Self {
            width,
            height,
            labels,
            areas,
        }
    }

    /// Number of components found.
    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Label at (x, y); 0 for background.
    #[inline]
    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels[y as usize * self.width as usize + x as usize]
    }

    /// Pixel count of component `label` (0 for unknown labels).
    pub fn area(&self, label: u32) -> usize {
        label
            .checked_sub(1)
            .and_then(|i| self.areas.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Label of the largest component. Ties go to the earliest label.
    pub fn largest(&self) -> Option<u32> {
        let mut best: Option<(u32, usize)> = None;
        for (i, &area) in self.areas.iter().enumerate() {
            if best.map_or(true, |(_, a)| area > a) {
                best = Some((i as u32 + 1, area));
            }
        }
        best.map(|(label, _)| label)
    }

    /// Bitmap containing only component `label`.
    pub fn mask_of(&self, label: u32) -> Bitmap {
        Bitmap::from_fn(self.width, self.height, |x, y| self.label_at(x, y) == label)
    }
}

/// Keep only the largest 8-connected component of `bitmap`.
///
/// Returns an empty bitmap when there is no foreground.
pub fn largest_component(bitmap: &Bitmap) -> Bitmap {
    let components = Components::label(bitmap);
    match components.largest() {
        Some(label) => components.mask_of(label),
        None => Bitmap::new(bitmap.width(), bitmap.height()),
    }
}
