/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct used to find node pairs closer
 * than the connection distance without testing every pair. The surface is
 * divided into square cells as wide as the connection distance, so every
 * pair within range lies in the same or an adjacent cell.
 *
 * Optimized for performance by:
 * - Reusing cell buffers between frames instead of reallocating
 * - Using integer cell coordinates and clamping out-of-bounds nodes
 *   into the border cells
 */

use nannou::prelude::*;

use crate::surface::Bounds;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, bounds: Bounds) -> Self {
        let mut grid = Self {
            cell_size,
            columns: 0,
            rows: 0,
            cells: Vec::new(),
        };
        grid.rebuild(cell_size, bounds);
        grid
    }

    // Resize the grid for a new cell size or surface, keeping allocations
    pub fn rebuild(&mut self, cell_size: f32, bounds: Bounds) {
        self.cell_size = cell_size;
        self.columns = ((bounds.width / cell_size).ceil() as usize).max(1);
        self.rows = ((bounds.height / cell_size).ceil() as usize).max(1);
        self.cells.resize_with(self.columns * self.rows, Vec::new);
        self.clear();
    }

    // Whether the grid already matches this cell size and surface
    pub fn fits(&self, cell_size: f32, bounds: Bounds) -> bool {
        self.cell_size == cell_size
            && self.columns == ((bounds.width / cell_size).ceil() as usize).max(1)
            && self.rows == ((bounds.height / cell_size).ceil() as usize).max(1)
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    // Cell coordinates; nodes outside the surface land in the border cells
    #[inline]
    fn cell_of(&self, position: Point2) -> (usize, usize) {
        let column = (position.x / self.cell_size).floor().clamp(0.0, self.columns as f32 - 1.0) as usize;
        let row = (position.y / self.cell_size).floor().clamp(0.0, self.rows as f32 - 1.0) as usize;
        (column, row)
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: Point2) {
        let (column, row) = self.cell_of(position);
        self.cells[row * self.columns + column].push(index);
    }

    // Indices in the cell containing `position` and its eight neighbours
    pub fn nearby_indices(&self, position: Point2, out: &mut Vec<usize>) {
        out.clear();
        let (column, row) = self.cell_of(position);

        for check_row in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            let row_start = check_row * self.columns;
            for check_column in column.saturating_sub(1)..=(column + 1).min(self.columns - 1) {
                out.extend_from_slice(&self.cells[row_start + check_column]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_the_surface() {
        let grid = SpatialGrid::new(200.0, Bounds::new(1280.0, 250.0));
        assert_eq!(grid.columns, 7);
        assert_eq!(grid.rows, 2);
    }

    #[test]
    fn empty_surface_still_has_one_cell() {
        let grid = SpatialGrid::new(50.0, Bounds::new(0.0, 0.0));
        assert_eq!((grid.columns, grid.rows), (1, 1));
    }

    #[test]
    fn neighbours_include_adjacent_cells_only() {
        let mut grid = SpatialGrid::new(10.0, Bounds::new(100.0, 100.0));
        grid.insert(0, pt2(5.0, 5.0));
        grid.insert(1, pt2(15.0, 15.0));
        grid.insert(2, pt2(45.0, 45.0));

        let mut nearby = Vec::new();
        grid.nearby_indices(pt2(5.0, 5.0), &mut nearby);
        nearby.sort_unstable();
        assert_eq!(nearby, vec![0, 1]);
    }

    #[test]
    fn out_of_bounds_positions_are_clamped() {
        let mut grid = SpatialGrid::new(10.0, Bounds::new(30.0, 30.0));
        grid.insert(0, pt2(-4.0, 100.0));
        let mut nearby = Vec::new();
        grid.nearby_indices(pt2(0.0, 29.0), &mut nearby);
        assert_eq!(nearby, vec![0]);
    }

    #[test]
    fn rebuild_resets_contents() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut grid = SpatialGrid::new(10.0, bounds);
        grid.insert(3, pt2(1.0, 1.0));
        grid.rebuild(20.0, bounds);
        assert!(grid.fits(20.0, bounds));
        let mut nearby = Vec::new();
        grid.nearby_indices(pt2(1.0, 1.0), &mut nearby);
        assert!(nearby.is_empty());
    }
}
