use crate::{
    camera::projection::CameraFrame,
    foundation::core::{Canvas, Color},
    foundation::error::{WireError, WireResult},
    linalg::edge::Edge,
    raster::clip::clip_segment,
    raster::line::bresenham,
    raster::surface::PixelSurface,
};

/// Per-frame edge accounting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    pub edges_total: u64,
    pub edges_unassigned: u64,
    /// Fully collapsed edges (both endpoints equal).
    pub edges_collapsed: u64,
    pub edges_behind_camera: u64,
    pub edges_outside: u64,
    pub edges_drawn: u64,
    pub pixels_set: u64,
}

impl RenderStats {
    pub fn accumulate(&mut self, other: &RenderStats) {
        self.edges_total += other.edges_total;
        self.edges_unassigned += other.edges_unassigned;
        self.edges_collapsed += other.edges_collapsed;
        self.edges_behind_camera += other.edges_behind_camera;
        self.edges_outside += other.edges_outside;
        self.edges_drawn += other.edges_drawn;
        self.pixels_set += other.pixels_set;
    }
}

/// Project, clip and rasterize `edges` onto `surface` in `color`.
///
/// `None` entries (edges touching an unassigned vertex) and edges collapsed to a single point
/// are skipped. An edge is dropped when either endpoint lies behind the camera plane.
pub fn draw_edges<S: PixelSurface + ?Sized>(
    surface: &mut S,
    camera: &CameraFrame,
    edges: &[Option<Edge>],
    color: Color,
) -> WireResult<RenderStats> {
    let canvas = Canvas::new(surface.width(), surface.height())?;
    if canvas != camera.canvas {
        return Err(WireError::dimension(format!(
            "surface is {}x{} but camera frame was built for {}x{}",
            canvas.width, canvas.height, camera.canvas.width, camera.canvas.height
        )));
    }

    let mut stats = RenderStats::default();
    for edge in edges {
        stats.edges_total += 1;
        let Some(edge) = edge else {
            stats.edges_unassigned += 1;
            continue;
        };
        if edge.a == edge.b {
            stats.edges_collapsed += 1;
            continue;
        }

        let pa = camera.project(edge.a)?;
        let pb = camera.project(edge.b)?;
        if !pa.in_front() || !pb.in_front() {
            stats.edges_behind_camera += 1;
            continue;
        }

        let Some((from, to)) = clip_segment(pa.screen, pb.screen, canvas)? else {
            stats.edges_outside += 1;
            continue;
        };

        stats.edges_drawn += 1;
        bresenham(from, to, |x, y| {
            if canvas.contains(x, y) {
                surface.set_pixel(x as u32, y as u32, color);
                stats.pixels_set += 1;
            }
        });
    }

    tracing::trace!(
        drawn = stats.edges_drawn,
        pixels = stats.pixels_set,
        "edges rasterized"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/draw.rs"]
mod tests;
