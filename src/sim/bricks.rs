//! The brick grid
//!
//! Bricks are stored column-major (`columns x rows`) and never removed: a
//! broken brick keeps its slot and only its status changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scale::Geometry;

/// Whether a brick can still be hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Broken,
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner, refreshed by [`BrickField::layout_positions`]
    pub pos: Vec2,
    pub status: BrickStatus,
}

impl Brick {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }
}

/// Grid of bricks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickField {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl BrickField {
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut field = Self::default();
        field.rebuild(columns, rows);
        field
    }

    /// Reallocate the grid with every brick active
    pub fn rebuild(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.bricks.clear();
        self.bricks.resize(
            columns * rows,
            Brick {
                pos: Vec2::ZERO,
                status: BrickStatus::Active,
            },
        );
    }

    /// Recompute the position of every active brick
    pub fn layout_positions(&mut self, geo: &Geometry) {
        for c in 0..self.columns {
            for r in 0..self.rows {
                let idx = self.index(c, r);
                let brick = &mut self.bricks[idx];
                if brick.is_active() {
                    brick.pos = Vec2::new(
                        c as f32 * (geo.brick_width + geo.brick_padding) + geo.brick_offset_left,
                        r as f32 * (geo.brick_height + geo.brick_padding) + geo.brick_offset_top,
                    );
                }
            }
        }
    }

    /// Mark a brick broken. Returns false if it was already broken or out of range.
    pub fn break_cell(&mut self, column: usize, row: usize) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        let idx = self.index(column, row);
        let brick = &mut self.bricks[idx];
        if brick.is_active() {
            brick.status = BrickStatus::Broken;
            true
        } else {
            false
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get(self.index(column, row))
    }

    /// Active bricks with their grid coordinates, in column-major order
    pub fn active(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        self.bricks.iter().enumerate().filter_map(move |(idx, brick)| {
            brick
                .is_active()
                .then(|| (idx / self.rows.max(1), idx % self.rows.max(1), brick))
        })
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    /// Number of cells in the grid (broken or not)
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    #[inline]
    fn index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }
}
