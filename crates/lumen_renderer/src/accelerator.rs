//! Selection of the intersection-query back-end.
//!
//! The shaders only see nearest-hit and occlusion queries on the scene;
//! which structure answers them is picked once, at setup, with
//! [`Accelerator`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bvh::Bvh;
use crate::config::ConfigError;
use crate::grid::RegularGrid;
use crate::hittable::{HitRecord, Hittable, PrimitiveId};
use crate::Ray;
use lumen_math::Interval;

/// The primitive storage every back-end indexes into.
pub type Primitives = [Box<dyn Hittable>];

/// The available acceleration structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accelerator {
    /// Nothing is ever hit.
    None,
    /// Test every primitive.
    Naive,
    /// Uniform grid of cells.
    RegGrid,
    /// Bounding volume hierarchy.
    #[default]
    #[serde(rename = "BVH")]
    Bvh,
}

impl Accelerator {
    pub const ALL: [Accelerator; 4] = [
        Accelerator::None,
        Accelerator::Naive,
        Accelerator::RegGrid,
        Accelerator::Bvh,
    ];

    /// Display name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Accelerator::None => "None",
            Accelerator::Naive => "Naive",
            Accelerator::RegGrid => "RegGrid",
            Accelerator::Bvh => "BVH",
        }
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Accelerator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|accelerator| accelerator.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownAccelerator(s.to_owned()))
    }
}

/// A built acceleration structure.
#[derive(Debug, Default)]
pub(crate) enum AccelerationStructure {
    Disabled,
    #[default]
    Naive,
    Grid(RegularGrid),
    Bvh(Bvh),
}

impl AccelerationStructure {
    pub(crate) fn build(accelerator: Accelerator, primitives: &Primitives) -> Self {
        match accelerator {
            Accelerator::None => AccelerationStructure::Disabled,
            Accelerator::Naive => AccelerationStructure::Naive,
            Accelerator::RegGrid => {
                let grid = RegularGrid::new(primitives);
                let [x, y, z] = grid.resolution();
                log::info!(
                    "Built regular grid: {} primitives, {}x{}x{} cells ({} occupied), {} unbounded",
                    primitives.len(),
                    x,
                    y,
                    z,
                    grid.occupied_cells(),
                    grid.unbounded_count()
                );
                AccelerationStructure::Grid(grid)
            }
            Accelerator::Bvh => {
                let bvh = Bvh::new(primitives);
                log::info!(
                    "Built BVH: {} primitives, depth {}, {} unbounded",
                    primitives.len(),
                    bvh.depth(),
                    bvh.unbounded_count()
                );
                AccelerationStructure::Bvh(bvh)
            }
        }
    }

    pub(crate) fn nearest(
        &self,
        primitives: &Primitives,
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<(PrimitiveId, HitRecord)> {
        match self {
            AccelerationStructure::Disabled => None,
            AccelerationStructure::Naive => {
                let mut rec = HitRecord::default();
                let mut closest = None;
                let mut range = ray_t;

                for index in 0..primitives.len() {
                    let id = PrimitiveId(index);
                    if hit_primitive(primitives, id, ray, range, &mut rec) {
                        range = range.clip_max(rec.t);
                        closest = Some((id, rec));
                    }
                }
                closest
            }
            AccelerationStructure::Grid(grid) => grid.nearest(primitives, ray, ray_t),
            AccelerationStructure::Bvh(bvh) => bvh.nearest(primitives, ray, ray_t),
        }
    }

    pub(crate) fn any_hit(&self, primitives: &Primitives, ray: &Ray, ray_t: Interval) -> bool {
        match self {
            AccelerationStructure::Disabled => false,
            AccelerationStructure::Naive => {
                let mut rec = HitRecord::default();
                (0..primitives.len())
                    .any(|index| hit_primitive(primitives, PrimitiveId(index), ray, ray_t, &mut rec))
            }
            AccelerationStructure::Grid(grid) => grid.any_hit(primitives, ray, ray_t),
            AccelerationStructure::Bvh(bvh) => bvh.any_hit(primitives, ray, ray_t),
        }
    }
}

/// Test one primitive, skipping the one the ray was spawned from.
#[inline]
pub(crate) fn hit_primitive(
    primitives: &Primitives,
    id: PrimitiveId,
    ray: &Ray,
    ray_t: Interval,
    rec: &mut HitRecord,
) -> bool {
    ray.primitive() != Some(id) && primitives[id.0].hit(ray, ray_t, rec)
}
