//! Uniform acceleration grid for Poisson-disk separation checks.
//!
//! Cells are `radius / √2` wide so each holds at most one accepted point,
//! and a ±2 cell window around a candidate covers every point closer than
//! `radius`.

use std::f32::consts::SQRT_2;

use glam::Vec2;

/// Neighbour window half-width used by the sampler.
pub const NEIGHBOR_RING: usize = 2;

/// Upper bound on grid cells (about 128 MiB of occupancy slots).
pub const MAX_GRID_CELLS: usize = 1 << 23;

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Index of the point occupying each cell; last write wins.
    cells: Vec<Option<usize>>,
}

impl SpatialGrid {
    /// Grid covering `region` for separation `radius`.
    ///
    /// Returns `None` when the grid would need more than [`MAX_GRID_CELLS`]
    /// cells, or when the region is not finite.
    pub fn new(region: Vec2, radius: f32) -> Option<Self> {
        let cell_size = (radius / SQRT_2).max(f32::EPSILON);
        let cols = Self::axis_cells(region.x, cell_size)?;
        let rows = Self::axis_cells(region.y, cell_size)?;
        let count = cols.checked_mul(rows).filter(|&n| n <= MAX_GRID_CELLS)?;
        Some(Self {
            cell_size,
            cols,
            rows,
            cells: vec![None; count],
        })
    }

    fn axis_cells(extent: f32, cell_size: f32) -> Option<usize> {
        let cells = (extent / cell_size).ceil();
        if !cells.is_finite() || cells > MAX_GRID_CELLS as f32 {
            return None;
        }
        Some((cells as usize).max(1))
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Cell containing `point`, or `None` when it lies outside the grid.
    pub fn cell_of(&self, point: Vec2) -> Option<(usize, usize)> {
        if !(point.x >= 0.0 && point.y >= 0.0) {
            return None;
        }
        let cx = (point.x / self.cell_size) as usize;
        let cy = (point.y / self.cell_size) as usize;
        (cx < self.cols && cy < self.rows).then_some((cx, cy))
    }

    /// Record `index` as the occupant of `point`'s cell. Returns `false` if
    /// the point is outside the grid.
    pub fn insert(&mut self, point: Vec2, index: usize) -> bool {
        match self.cell_of(point) {
            Some((cx, cy)) => {
                self.cells[cy * self.cols + cx] = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn occupant(&self, cx: usize, cy: usize) -> Option<usize> {
        if cx < self.cols && cy < self.rows {
            self.cells[cy * self.cols + cx]
        } else {
            None
        }
    }

    /// Occupants of the `(2·ring + 1)²` window around `point`'s cell,
    /// clamped to the grid.
    pub fn query_neighbors(
        &self,
        point: Vec2,
        ring: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        let cx = ((point.x / self.cell_size).max(0.0) as usize).min(self.cols - 1);
        let cy = ((point.y / self.cell_size).max(0.0) as usize).min(self.rows - 1);
        let x0 = cx.saturating_sub(ring);
        let x1 = (cx + ring).min(self.cols - 1);
        let y0 = cy.saturating_sub(ring);
        let y1 = (cy + ring).min(self.rows - 1);
        (y0..=y1)
            .flat_map(move |y| (x0..=x1).filter_map(move |x| self.cells[y * self.cols + x]))
    }

    /// `true` when no recorded neighbour of `candidate` lies closer than
    /// `radius`.
    pub fn is_far_enough(&self, candidate: Vec2, radius: f32, points: &[Vec2]) -> bool {
        let radius_sq = radius * radius;
        self.query_neighbors(candidate, NEIGHBOR_RING)
            .filter_map(|index| points.get(index))
            .all(|p| p.distance_squared(candidate) >= radius_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_round_up() {
        let grid = SpatialGrid::new(Vec2::new(100.0, 50.0), 5.0).unwrap();
        let cell = 5.0 / SQRT_2;
        let expected = ((100.0 / cell).ceil() as usize, (50.0 / cell).ceil() as usize);
        assert_eq!(grid.dimensions(), expected);
    }

    #[test]
    fn test_cell_of_rejects_outside_points() {
        let grid = SpatialGrid::new(Vec2::new(10.0, 10.0), 2.0).unwrap();
        assert_eq!(grid.cell_of(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert!(grid.cell_of(Vec2::new(-0.1, 3.0)).is_none());
        assert!(grid.cell_of(Vec2::new(3.0, 200.0)).is_none());
    }

    #[test]
    fn test_insert_last_write_wins() {
        let mut grid = SpatialGrid::new(Vec2::new(10.0, 10.0), 2.0).unwrap();
        assert!(grid.insert(Vec2::new(0.1, 0.1), 0));
        assert!(grid.insert(Vec2::new(0.2, 0.2), 1));
        assert_eq!(grid.occupant(0, 0), Some(1));
        assert!(!grid.insert(Vec2::new(50.0, 50.0), 2));
    }

    #[test]
    fn test_query_neighbors_window_is_clamped() {
        let mut grid = SpatialGrid::new(Vec2::new(20.0, 20.0), 2.0).unwrap();
        let points = [Vec2::new(0.5, 0.5), Vec2::new(19.5, 19.5)];
        for (i, p) in points.iter().enumerate() {
            grid.insert(*p, i);
        }
        let near: Vec<usize> = grid
            .query_neighbors(Vec2::new(1.0, 1.0), NEIGHBOR_RING)
            .collect();
        assert_eq!(near, vec![0]);
    }

    #[test]
    fn test_is_far_enough() {
        let mut grid = SpatialGrid::new(Vec2::new(20.0, 20.0), 2.0).unwrap();
        let points = vec![Vec2::new(5.0, 5.0)];
        grid.insert(points[0], 0);
        assert!(!grid.is_far_enough(Vec2::new(6.0, 5.0), 2.0, &points));
        assert!(grid.is_far_enough(Vec2::new(7.5, 5.0), 2.0, &points));
    }

    #[test]
    fn test_oversized_grid_is_refused() {
        // 1e-5 spacing over 100x100 would need ~2e14 cells.
        assert!(SpatialGrid::new(Vec2::new(100.0, 100.0), 1e-5).is_none());
        assert!(SpatialGrid::new(Vec2::new(f32::INFINITY, 10.0), 1.0).is_none());
        let (cols, rows) = SpatialGrid::new(Vec2::new(100.0, 100.0), 0.1)
            .unwrap()
            .dimensions();
        assert!(cols * rows <= MAX_GRID_CELLS);
    }
}
