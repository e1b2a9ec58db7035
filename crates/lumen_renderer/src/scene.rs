//! Scene container and the queries the shaders issue against it.
//!
//! A scene owns its materials, lights and primitives. Once handed to a
//! shader it is frozen behind an `Arc` and only read, so any number of
//! shading lanes can query it concurrently.

use thiserror::Error;

use crate::accelerator::{AccelerationStructure, Accelerator, Primitives};
use crate::hittable::{Hittable, PrimitiveId};
use crate::intersection::Intersection;
use crate::light::Light;
use crate::material::{Color, Material, MaterialId};
use crate::ray::EPSILON;
use crate::Ray;
use lumen_math::{Aabb, Interval, Vec3};

/// Errors raised while building a scene.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("{field} must be finite and nonnegative, got {value:?}")]
    InvalidChannel { field: &'static str, value: Color },

    #[error("refractive index must be finite and positive, got {0}")]
    InvalidRefractiveIndex(f32),

    #[error("light position must be finite, got {0:?}")]
    InvalidLightPosition(Vec3),

    #[error("degenerate {0}")]
    DegeneratePrimitive(&'static str),

    #[error("unknown material id {0}")]
    UnknownMaterial(usize),
}

/// Materials, lights and primitives plus the structure answering ray
/// queries over them.
#[derive(Default)]
pub struct Scene {
    materials: Vec<Material>,
    lights: Vec<Light>,
    primitives: Vec<Box<dyn Hittable>>,
    structure: AccelerationStructure,
}

impl Scene {
    /// Create an empty scene answering queries by linear scan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its id.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Add a primitive and return its id. Its material must already be in
    /// the scene.
    ///
    /// Adding a primitive drops any built acceleration structure back to a
    /// linear scan; call [`Scene::prepare`] again afterwards.
    pub fn add_primitive<H: Hittable + 'static>(
        &mut self,
        primitive: H,
    ) -> Result<PrimitiveId, SceneError> {
        let material = primitive.material();
        if material.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material.0));
        }
        self.primitives.push(Box::new(primitive));
        self.structure = AccelerationStructure::Naive;
        Ok(PrimitiveId(self.primitives.len() - 1))
    }

    /// Build the acceleration structure queries go through.
    pub fn prepare(&mut self, accelerator: Accelerator) {
        self.structure = AccelerationStructure::build(accelerator, &self.primitives);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn primitives(&self) -> &Primitives {
        &self.primitives
    }

    /// Bounding box of all bounded primitives; [`Aabb::EMPTY`] if there are
    /// none.
    pub fn bounds(&self) -> Aabb {
        self.primitives
            .iter()
            .map(|primitive| primitive.bounding_box())
            .filter(Aabb::is_bounded)
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b))
    }

    /// Get a material by id.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Nearest intersection past [`EPSILON`], skipping the primitive the ray
    /// was spawned from. The returned normal faces the incoming ray.
    pub fn trace<'a>(&'a self, ray: &'a Ray) -> Option<Intersection<'a>> {
        let (primitive, rec) =
            self.structure
                .nearest(&self.primitives, ray, Interval::new(EPSILON, f32::INFINITY))?;

        Some(Intersection {
            point: rec.p,
            normal: rec.normal,
            material: &self.materials[rec.material.0],
            ray,
            primitive,
            distance: rec.t,
        })
    }

    /// Returns true if anything other than the ray's origin primitive lies
    /// strictly between [`EPSILON`] and `max_distance` along the ray.
    pub fn occluded(&self, ray: &Ray, max_distance: f32) -> bool {
        self.structure.any_hit(
            &self.primitives,
            ray,
            Interval::new(EPSILON, max_distance),
        )
    }
}
