use crate::{linalg::vector::Vector2F, pattern::mask::PatternMask};

/// Normalized silhouette points of a [`PatternMask`] and their centroid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Silhouette {
    points: Vec<Vector2F>,
    centroid: Vector2F,
}

impl Silhouette {
    /// Collect the mask's on-cells and order them.
    ///
    /// Coordinates are divided by the larger mask dimension, so they land in `[0, 1]` with the
    /// aspect ratio kept. Points are then stably sorted by distance to the first collected point
    /// (row-major scan order). This is a radial ordering around that anchor, not a traversal of
    /// the outline. An empty mask yields no points and a zero centroid.
    #[tracing::instrument(skip(mask), fields(w = mask.width(), h = mask.height()))]
    pub fn from_mask(mask: &PatternMask) -> Self {
        let div = mask.width().max(mask.height()) as f32;
        let mut points = Vec::with_capacity(mask.count_on());
        let mut mass = Vector2F::ZERO;

        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.get(x, y) {
                    let p = Vector2F::new(x as f32 / div, y as f32 / div);
                    mass += p;
                    points.push(p);
                }
            }
        }

        let Some(&anchor) = points.first() else {
            return Self::default();
        };

        let centroid = mass * (1.0 / points.len() as f32);
        points.sort_by(|a, b| a.distance(anchor).total_cmp(&b.distance(anchor)));

        tracing::debug!(points = points.len(), "silhouette extracted");
        Self { points, centroid }
    }

    pub fn points(&self) -> &[Vector2F] {
        &self.points
    }

    pub fn centroid(&self) -> Vector2F {
        self.centroid
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/silhouette.rs"]
mod tests;
