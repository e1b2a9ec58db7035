//! Uniform grid acceleration structure.
//!
//! The bounds of all bounded primitives are split into equal cells and every
//! primitive is listed in each cell its bounding box overlaps. Rays walk the
//! cells they cross in order (3D-DDA), so the nearest query can stop at the
//! first cell that contains a hit. Unbounded primitives are tested linearly,
//! as in the BVH.

// Based on Physically Based Rendering 1st ed., GridAccel.

use crate::accelerator::{hit_primitive, Primitives};
use crate::hittable::{HitRecord, PrimitiveId};
use crate::Ray;
use lumen_math::{Aabb, Interval, Vec3};

/// Upper bound on cells along one axis.
const MAX_CELLS_PER_AXIS: usize = 64;

/// A regular grid over the bounded primitives of a scene.
#[derive(Debug)]
pub struct RegularGrid {
    bounds: Aabb,
    resolution: [usize; 3],
    cell_size: Vec3,
    cells: Vec<Vec<PrimitiveId>>,
    unbounded: Vec<PrimitiveId>,
}

impl RegularGrid {
    /// Build a grid over `primitives`.
    pub fn new(primitives: &Primitives) -> Self {
        let (bounded, unbounded): (Vec<_>, Vec<_>) = primitives
            .iter()
            .enumerate()
            .map(|(index, primitive)| (PrimitiveId(index), primitive.bounding_box()))
            .partition(|(_, bbox)| bbox.is_bounded());
        let unbounded = unbounded.into_iter().map(|(id, _)| id).collect();

        let bounds = bounded
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, b)| Aabb::surrounding(&acc, b));

        if bounded.is_empty() {
            return Self {
                bounds,
                resolution: [0; 3],
                cell_size: Vec3::ZERO,
                cells: Vec::new(),
                unbounded,
            };
        }

        // About three cells per cube root of the primitive count along the
        // longest axis, with cubic cells.
        let extent = bounds.max - bounds.min;
        let cells_per_unit = 3.0 * (bounded.len() as f32).cbrt() / extent.max_element();
        let mut resolution = [1; 3];
        for (axis, cells) in resolution.iter_mut().enumerate() {
            *cells =
                ((extent[axis] * cells_per_unit).round() as usize).clamp(1, MAX_CELLS_PER_AXIS);
        }
        let cell_size = extent
            / Vec3::new(
                resolution[0] as f32,
                resolution[1] as f32,
                resolution[2] as f32,
            );

        let mut grid = Self {
            bounds,
            resolution,
            cell_size,
            cells: vec![Vec::new(); resolution[0] * resolution[1] * resolution[2]],
            unbounded,
        };

        for (id, bbox) in bounded {
            let lo = grid.cell_of(bbox.min);
            let hi = grid.cell_of(bbox.max);
            for z in lo[2]..=hi[2] {
                for y in lo[1]..=hi[1] {
                    for x in lo[0]..=hi[0] {
                        let index = grid.cell_index([x, y, z]);
                        grid.cells[index].push(id);
                    }
                }
            }
        }

        grid
    }

    /// Number of cells along each axis.
    pub fn resolution(&self) -> [usize; 3] {
        self.resolution
    }

    /// Number of cells listing at least one primitive.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of primitives tested outside the grid.
    pub fn unbounded_count(&self) -> usize {
        self.unbounded.len()
    }

    /// Nearest hit inside `ray_t`.
    pub fn nearest(
        &self,
        primitives: &Primitives,
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<(PrimitiveId, HitRecord)> {
        let mut rec = HitRecord::default();
        let mut closest = None;
        let mut range = ray_t;

        for &id in &self.unbounded {
            if hit_primitive(primitives, id, ray, range, &mut rec) {
                range = range.clip_max(rec.t);
                closest = Some((id, rec));
            }
        }

        self.walk(ray, range, |cell, cell_exit| {
            for &id in cell {
                if hit_primitive(primitives, id, ray, range, &mut rec) {
                    range = range.clip_max(rec.t);
                    closest = Some((id, rec));
                }
            }
            // A hit inside the cells walked so far cannot be beaten by a
            // later cell.
            closest.is_some() && range.max <= cell_exit
        });

        closest
    }

    /// Returns true as soon as anything is hit inside `ray_t`.
    pub fn any_hit(&self, primitives: &Primitives, ray: &Ray, ray_t: Interval) -> bool {
        let mut rec = HitRecord::default();
        if self
            .unbounded
            .iter()
            .any(|&id| hit_primitive(primitives, id, ray, ray_t, &mut rec))
        {
            return true;
        }

        let mut found = false;
        self.walk(ray, ray_t, |cell, _| {
            found = cell
                .iter()
                .any(|&id| hit_primitive(primitives, id, ray, ray_t, &mut rec));
            found
        });
        found
    }

    /// Visit the cells `ray` crosses inside `ray_t`, front to back. `visit`
    /// gets each cell's primitives and the ray parameter where the ray leaves
    /// the cell, and returns true to stop the walk.
    fn walk<F>(&self, ray: &Ray, ray_t: Interval, mut visit: F)
    where
        F: FnMut(&[PrimitiveId], f32) -> bool,
    {
        if self.cells.is_empty() {
            return;
        }
        let Some(inside) = self
            .bounds
            .clip_ray(ray.origin(), ray.inv_direction(), ray_t)
        else {
            return;
        };

        let direction = ray.direction();
        let inv_direction = ray.inv_direction();
        let entry = ray.at(inside.min);
        let mut cell = self.cell_of(entry);

        let mut next_t = [f32::INFINITY; 3];
        let mut delta_t = [f32::INFINITY; 3];
        let mut step = [0isize; 3];
        for axis in 0..3 {
            if direction[axis] > 0.0 {
                let boundary =
                    self.bounds.min[axis] + (cell[axis] + 1) as f32 * self.cell_size[axis];
                next_t[axis] = inside.min + (boundary - entry[axis]) * inv_direction[axis];
                delta_t[axis] = self.cell_size[axis] * inv_direction[axis];
                step[axis] = 1;
            } else if direction[axis] < 0.0 {
                let boundary = self.bounds.min[axis] + cell[axis] as f32 * self.cell_size[axis];
                next_t[axis] = inside.min + (boundary - entry[axis]) * inv_direction[axis];
                delta_t[axis] = -self.cell_size[axis] * inv_direction[axis];
                step[axis] = -1;
            }
        }

        loop {
            let axis = if next_t[0] < next_t[1] && next_t[0] < next_t[2] {
                0
            } else if next_t[1] < next_t[2] {
                1
            } else {
                2
            };
            let cell_exit = next_t[axis].min(inside.max);

            if visit(&self.cells[self.cell_index(cell)], cell_exit) {
                return;
            }
            if next_t[axis] > inside.max {
                return;
            }

            let Some(moved) = cell[axis]
                .checked_add_signed(step[axis])
                .filter(|&c| c < self.resolution[axis])
            else {
                return;
            };
            cell[axis] = moved;
            next_t[axis] += delta_t[axis];
        }
    }

    /// Cell containing `point`, clamped into the grid.
    fn cell_of(&self, point: Vec3) -> [usize; 3] {
        let mut cell = [0; 3];
        for axis in 0..3 {
            let offset = (point[axis] - self.bounds.min[axis]) / self.cell_size[axis];
            let last = self.resolution[axis] - 1;
            cell[axis] = if offset.is_nan() || offset <= 0.0 {
                0
            } else {
                (offset as usize).min(last)
            };
        }
        cell
    }

    fn cell_index(&self, [x, y, z]: [usize; 3]) -> usize {
        x + self.resolution[0] * (y + self.resolution[1] * z)
    }
}
