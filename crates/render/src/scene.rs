//! Scene registry: lights, owned instances and the category lists that the
//! render passes dispatch over.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use shoreline_common::{Light, MAX_LIGHTS, RenderTargetHandle, ShaderHandle};

use crate::backend::{PolygonMode, RenderBackend};
use crate::camera::Camera;
use crate::instance::Instance;

pub const SHADOW_BIAS_MIN: f32 = 0.001;
pub const SHADOW_BIAS_MAX: f32 = 0.01;
/// Half-extent of the sun's orthographic shadow volume on every axis.
pub const LIGHT_FRUSTUM_EXTENT: f32 = 10.0;

/// Maps clip space [-1, 1] to texture space [0, 1] on all three axes.
pub const TEXTURE_SPACE_OFFSET: Mat4 = Mat4::from_cols_array(&[
    0.5, 0.0, 0.0, 0.0, //
    0.0, 0.5, 0.0, 0.0, //
    0.0, 0.0, 0.5, 0.0, //
    0.5, 0.5, 0.5, 1.0,
]);

/// Errors from converting integer category tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("invalid instance category tag: {0}")]
    InvalidCategory(i32),
    #[error("invalid draw set selector: {0}")]
    InvalidDrawSet(i32),
}

/// Where an instance sits relative to the water plane. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Drawn only in full-scene passes: the water itself, overlays.
    AllOnly,
    Above,
    Below,
    /// Straddles the water plane.
    Both,
    /// Casts shadows and is drawn in the main view, but is neither
    /// reflected nor refracted.
    CasterOnly,
}

impl Category {
    pub fn is_above_water(self) -> bool {
        matches!(self, Category::Above | Category::Both)
    }

    pub fn is_below_water(self) -> bool {
        matches!(self, Category::Below | Category::Both)
    }

    pub fn casts_shadow(self) -> bool {
        self != Category::AllOnly
    }
}

impl TryFrom<i32> for Category {
    type Error = SceneError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Category::AllOnly),
            1 => Ok(Category::Above),
            -1 => Ok(Category::Below),
            2 => Ok(Category::Both),
            -2 => Ok(Category::CasterOnly),
            other => Err(SceneError::InvalidCategory(other)),
        }
    }
}

impl From<Category> for i32 {
    fn from(category: Category) -> i32 {
        match category {
            Category::AllOnly => 0,
            Category::Above => 1,
            Category::Below => -1,
            Category::Both => 2,
            Category::CasterOnly => -2,
        }
    }
}

/// Which membership list a draw call walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSet {
    All,
    AboveWater,
    BelowWater,
    NotWater,
}

impl TryFrom<i32> for DrawSet {
    type Error = SceneError;

    fn try_from(selector: i32) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(DrawSet::All),
            1 => Ok(DrawSet::AboveWater),
            -1 => Ok(DrawSet::BelowWater),
            2 => Ok(DrawSet::NotWater),
            other => Err(SceneError::InvalidDrawSet(other)),
        }
    }
}

/// Index of an instance owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub usize);

/// Which lists an instance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub all: bool,
    pub above_water: bool,
    pub below_water: bool,
    pub not_water: bool,
}

impl Membership {
    /// Count of the spatial lists (all, above, below) holding the instance.
    pub fn spatial_lists(&self) -> usize {
        [self.all, self.above_water, self.below_water]
            .into_iter()
            .filter(|m| *m)
            .count()
    }
}

/// The first [`MAX_LIGHTS`] point lights, copied out once per draw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointLightSamples {
    positions: [Vec3; MAX_LIGHTS],
    colours: [Vec3; MAX_LIGHTS],
    count: usize,
}

impl PointLightSamples {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions[..self.count]
    }

    pub fn colours(&self) -> &[Vec3] {
        &self.colours[..self.count]
    }

    fn refresh(&mut self, lights: &[Light]) {
        self.count = lights.len().min(MAX_LIGHTS);
        for (i, light) in lights.iter().take(MAX_LIGHTS).enumerate() {
            self.positions[i] = light.direction;
            self.colours[i] = light.colour;
        }
    }
}

/// Light-space (projection * view) matrix for a directional light.
///
/// The light looks from the normalised, negated direction towards the
/// origin through an orthographic volume of ±[`LIGHT_FRUSTUM_EXTENT`].
pub fn light_space_matrix(direction: Vec3) -> Mat4 {
    let eye = (-direction).try_normalize().unwrap_or(Vec3::Y);
    let up = if eye.cross(Vec3::Y).length_squared() < 1e-12 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let e = LIGHT_FRUSTUM_EXTENT;
    Mat4::orthographic_rh_gl(-e, e, -e, e, -e, e) * Mat4::look_at_rh(eye, Vec3::ZERO, up)
}

/// Owns every instance plus four index lists over them.
///
/// Lists are views in registration order; the category that placed an
/// instance in them never changes.
#[derive(Debug, Clone)]
pub struct Scene {
    window_size: Vec2,
    sunlight: Light,
    ambient_light: Vec3,
    point_lights: Vec<Light>,
    samples: PointLightSamples,
    light_matrix: Mat4,
    offset_light_matrix: Mat4,
    time: f32,
    wireframe: bool,
    shadow_target: Option<RenderTargetHandle>,
    instances: Vec<Instance>,
    all: Vec<InstanceId>,
    above_water: Vec<InstanceId>,
    under_water: Vec<InstanceId>,
    not_water: Vec<InstanceId>,
}

impl Scene {
    pub fn new(window_size: Vec2, sunlight: Light, ambient_light: Vec3) -> Self {
        Self {
            window_size,
            sunlight,
            ambient_light,
            point_lights: Vec::new(),
            samples: PointLightSamples::default(),
            light_matrix: Mat4::ZERO,
            offset_light_matrix: Mat4::ZERO,
            time: 0.0,
            wireframe: false,
            shadow_target: None,
            instances: Vec::new(),
            all: Vec::new(),
            above_water: Vec::new(),
            under_water: Vec::new(),
            not_water: Vec::new(),
        }
    }

    /// Take ownership of `instance` and file it under `category`.
    pub fn add_instance(&mut self, instance: Instance, category: Category) -> InstanceId {
        let id = InstanceId(self.instances.len());
        self.instances.push(instance);
        self.all.push(id);
        if category.is_above_water() {
            self.above_water.push(id);
        }
        if category.is_below_water() {
            self.under_water.push(id);
        }
        if category.casts_shadow() {
            self.not_water.push(id);
        }
        tracing::debug!(id = id.0, ?category, "instance registered");
        id
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id.0)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.instances.get_mut(id.0)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Ids in `set`, in registration order.
    pub fn members(&self, set: DrawSet) -> &[InstanceId] {
        match set {
            DrawSet::All => &self.all,
            DrawSet::AboveWater => &self.above_water,
            DrawSet::BelowWater => &self.under_water,
            DrawSet::NotWater => &self.not_water,
        }
    }

    pub fn membership(&self, id: InstanceId) -> Option<Membership> {
        self.instance(id)?;
        Some(Membership {
            all: self.all.contains(&id),
            above_water: self.above_water.contains(&id),
            below_water: self.under_water.contains(&id),
            not_water: self.not_water.contains(&id),
        })
    }

    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    pub fn set_window_size(&mut self, window_size: Vec2) {
        self.window_size = window_size;
    }

    pub fn sunlight(&self) -> &Light {
        &self.sunlight
    }

    pub fn sunlight_mut(&mut self) -> &mut Light {
        &mut self.sunlight
    }

    pub fn ambient_light(&self) -> Vec3 {
        self.ambient_light
    }

    pub fn point_lights(&self) -> &[Light] {
        &self.point_lights
    }

    /// Storage is unbounded; only the first [`MAX_LIGHTS`] are sampled.
    pub fn add_point_light(&mut self, light: Light) {
        self.point_lights.push(light);
    }

    pub fn sampled_point_lights(&self) -> &PointLightSamples {
        &self.samples
    }

    pub fn light_matrix(&self) -> Mat4 {
        self.light_matrix
    }

    pub fn offset_light_matrix(&self) -> Mat4 {
        self.offset_light_matrix
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, active: bool) {
        self.wireframe = active;
    }

    pub fn shadow_target(&self) -> Option<RenderTargetHandle> {
        self.shadow_target
    }

    pub fn set_shadow_target(&mut self, target: RenderTargetHandle) {
        self.shadow_target = Some(target);
    }

    pub fn shadow_bias(&self) -> (f32, f32) {
        (SHADOW_BIAS_MIN, SHADOW_BIAS_MAX)
    }

    /// Refresh per-frame lighting state, then draw every instance in `set`.
    pub fn draw<B>(
        &mut self,
        backend: &mut B,
        camera: &Camera,
        set: DrawSet,
        shader_override: Option<ShaderHandle>,
    ) where
        B: RenderBackend + ?Sized,
    {
        self.light_matrix = light_space_matrix(self.sunlight.direction);
        self.offset_light_matrix = TEXTURE_SPACE_OFFSET * self.light_matrix;
        self.samples.refresh(&self.point_lights);

        if self.wireframe {
            backend.set_polygon_mode(PolygonMode::Line);
        }

        let scene = &*self;
        for id in scene.members(set) {
            scene.instances[id.0].draw(backend, scene, camera, shader_override);
        }

        if self.wireframe {
            backend.set_polygon_mode(PolygonMode::Fill);
        }
        tracing::trace!(?set, drawn = self.members(set).len(), "scene draw");
    }

    /// Draw every instance in `set` with transforms only. Lighting state is
    /// left as the last [`Scene::draw`] computed it.
    pub fn draw_raw<B>(
        &self,
        backend: &mut B,
        camera: &Camera,
        set: DrawSet,
        shader_override: Option<ShaderHandle>,
    ) where
        B: RenderBackend + ?Sized,
    {
        for id in self.members(set) {
            self.instances[id.0].draw_raw(backend, self, camera, shader_override);
        }
        tracing::trace!(?set, drawn = self.members(set).len(), "scene raw draw");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Command, RecordingBackend};
    use crate::uniform::{Uniform, UniformValue};
    use glam::Vec4;
    use shoreline_common::{MeshHandle, MeshRef};

    fn sunlight() -> Light {
        Light::new(Vec3::new(0.25, -0.25, 0.25), Vec3::new(0.5, 0.5, 0.5), 1.0)
    }

    fn new_scene() -> Scene {
        Scene::new(Vec2::new(1280.0, 720.0), sunlight(), Vec3::splat(0.25))
    }

    fn camera() -> Camera {
        Camera::new(Vec3::new(10.0, 10.0, 10.0), -135.0, -34.0)
    }

    fn instance(backend: &mut RecordingBackend, name: &str, shader: ShaderHandle) -> Instance {
        let mesh = backend.create_mesh(name);
        Instance::new(Mat4::IDENTITY, MeshRef::Simple(mesh), shader)
    }

    fn drawn_meshes(commands: &[Command]) -> Vec<MeshHandle> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::DrawMesh(m) => Some(m.handle()),
                _ => None,
            })
            .collect()
    }

    fn bound(commands: &[Command], wanted: Uniform) -> Vec<UniformValue> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::SetUniform { uniform, value, .. } if *uniform == wanted => {
                    Some(value.clone())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn membership_follows_category() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("simple", &[]);
        let mut scene = new_scene();

        let both = scene.add_instance(instance(&mut backend, "a", shader), Category::Both);
        let above = scene.add_instance(instance(&mut backend, "b", shader), Category::Above);
        let below = scene.add_instance(instance(&mut backend, "c", shader), Category::Below);
        let only = scene.add_instance(instance(&mut backend, "d", shader), Category::AllOnly);
        let caster = scene.add_instance(instance(&mut backend, "e", shader), Category::CasterOnly);

        let m = scene.membership(both).unwrap();
        assert_eq!(m.spatial_lists(), 3);
        assert!(m.all && m.above_water && m.below_water && m.not_water);

        let m = scene.membership(above).unwrap();
        assert_eq!(m.spatial_lists(), 2);
        assert!(m.above_water && !m.below_water);

        let m = scene.membership(below).unwrap();
        assert_eq!(m.spatial_lists(), 2);
        assert!(m.below_water && !m.above_water);

        let m = scene.membership(only).unwrap();
        assert_eq!(m.spatial_lists(), 1);
        assert!(!m.not_water);

        let m = scene.membership(caster).unwrap();
        assert_eq!(m.spatial_lists(), 1);
        assert!(m.not_water);

        assert_eq!(scene.members(DrawSet::All).len(), 5);
        assert_eq!(scene.members(DrawSet::AboveWater), &[both, above]);
        assert_eq!(scene.members(DrawSet::BelowWater), &[both, below]);
        assert_eq!(scene.members(DrawSet::NotWater), &[both, above, below, caster]);
        assert_eq!(scene.membership(InstanceId(42)), None);
    }

    #[test]
    fn integer_tags_convert() {
        assert_eq!(Category::try_from(0), Ok(Category::AllOnly));
        assert_eq!(Category::try_from(-1), Ok(Category::Below));
        assert_eq!(Category::try_from(-2), Ok(Category::CasterOnly));
        assert_eq!(Category::try_from(3), Err(SceneError::InvalidCategory(3)));
        assert_eq!(i32::from(Category::Both), 2);

        assert_eq!(DrawSet::try_from(2), Ok(DrawSet::NotWater));
        assert_eq!(DrawSet::try_from(-2), Err(SceneError::InvalidDrawSet(-2)));
    }

    #[test]
    fn draw_walks_only_the_selected_list() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("simple", &[Uniform::ProjectionViewModel]);
        let mut scene = new_scene();
        let above = instance(&mut backend, "above", shader);
        let below = instance(&mut backend, "below", shader);
        let water = instance(&mut backend, "water", shader);
        let (above_mesh, below_mesh) = (above.mesh().handle(), below.mesh().handle());
        scene.add_instance(above, Category::Above);
        scene.add_instance(below, Category::Below);
        scene.add_instance(water, Category::AllOnly);

        scene.draw(&mut backend, &camera(), DrawSet::AboveWater, None);
        assert_eq!(drawn_meshes(&backend.take_commands()), vec![above_mesh]);

        scene.draw(&mut backend, &camera(), DrawSet::BelowWater, None);
        assert_eq!(drawn_meshes(&backend.take_commands()), vec![below_mesh]);

        scene.draw(&mut backend, &camera(), DrawSet::NotWater, None);
        assert_eq!(
            drawn_meshes(&backend.take_commands()),
            vec![above_mesh, below_mesh]
        );

        scene.draw(&mut backend, &camera(), DrawSet::All, None);
        assert_eq!(drawn_meshes(&backend.take_commands()).len(), 3);
    }

    #[test]
    fn only_first_four_point_lights_are_bound() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("phong", &Uniform::ALL);
        let mut scene = new_scene();
        for i in 0..6 {
            scene.add_point_light(Light::new(Vec3::splat(i as f32), Vec3::X, 1.0));
        }
        scene.add_instance(instance(&mut backend, "bunny", shader), Category::Above);

        scene.draw(&mut backend, &camera(), DrawSet::All, None);
        let commands = backend.take_commands();

        assert_eq!(bound(&commands, Uniform::LightCount), vec![UniformValue::Int(4)]);
        let expected: Vec<Vec3> = (0..4).map(|i| Vec3::splat(i as f32)).collect();
        assert_eq!(
            bound(&commands, Uniform::PointLightPositions),
            vec![UniformValue::Vec3Array(expected)]
        );
        assert_eq!(scene.point_lights().len(), 6);
        assert_eq!(scene.sampled_point_lights().colours().len(), 4);
    }

    #[test]
    fn fewer_lights_than_slots_bind_exact_count() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("phong", &Uniform::ALL);
        let mut scene = new_scene();
        scene.add_point_light(Light::new(Vec3::new(4.7, 0.5, 4.7), Vec3::new(1.0, 1.0, 0.0), 15.0));
        scene.add_instance(instance(&mut backend, "bunny", shader), Category::Above);

        scene.draw(&mut backend, &camera(), DrawSet::All, None);
        let commands = backend.take_commands();
        assert_eq!(bound(&commands, Uniform::LightCount), vec![UniformValue::Int(1)]);
        assert_eq!(
            bound(&commands, Uniform::PointLightColours),
            vec![UniformValue::Vec3Array(vec![Vec3::new(15.0, 15.0, 0.0)])]
        );
    }

    #[test]
    fn repeated_draw_is_identical() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("phong", &Uniform::ALL);
        let mut scene = new_scene();
        scene.add_point_light(Light::new(Vec3::ONE, Vec3::ONE, 2.0));
        scene.add_instance(instance(&mut backend, "a", shader), Category::Both);
        scene.add_instance(instance(&mut backend, "b", shader), Category::AllOnly);
        let cam = camera();

        scene.draw(&mut backend, &cam, DrawSet::All, None);
        let first = backend.take_commands();
        scene.draw(&mut backend, &cam, DrawSet::All, None);
        let second = backend.take_commands();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn single_instance_end_to_end() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("shadow_use", &[Uniform::LightMatrix]);
        let mut scene = new_scene();
        scene.add_instance(instance(&mut backend, "quad", shader), Category::AllOnly);

        let set = DrawSet::try_from(0).unwrap();
        scene.draw(&mut backend, &camera(), set, None);
        let commands = backend.take_commands();

        let eye = (-Vec3::new(0.25, -0.25, 0.25)).normalize();
        let expected = Mat4::orthographic_rh_gl(-10.0, 10.0, -10.0, 10.0, -10.0, 10.0)
            * Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);

        assert_eq!(drawn_meshes(&commands).len(), 1);
        assert_eq!(scene.light_matrix(), expected);
        assert_eq!(scene.offset_light_matrix(), TEXTURE_SPACE_OFFSET * expected);
        assert_eq!(
            bound(&commands, Uniform::LightMatrix),
            vec![UniformValue::Mat4(expected)]
        );
    }

    #[test]
    fn sun_edits_reach_the_next_draw() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader(
            "shadow_use",
            &[Uniform::LightMatrix, Uniform::OffsetLightMatrix, Uniform::LightColour],
        );
        let mut scene = new_scene();
        scene.add_instance(instance(&mut backend, "bunny", shader), Category::Above);
        let cam = camera();

        scene.draw(&mut backend, &cam, DrawSet::All, None);
        let before = backend.take_commands();
        let (light, offset) = (scene.light_matrix(), scene.offset_light_matrix());

        let sun = scene.sunlight_mut();
        sun.direction = Vec3::new(0.0, -1.0, 0.5);
        sun.colour = Vec3::new(1.0, 0.5, 0.0);
        scene.draw(&mut backend, &cam, DrawSet::All, None);
        let after = backend.take_commands();

        let moved = light_space_matrix(Vec3::new(0.0, -1.0, 0.5));
        assert_ne!(scene.light_matrix(), light);
        assert_ne!(scene.offset_light_matrix(), offset);
        assert_eq!(scene.light_matrix(), moved);
        assert_eq!(scene.offset_light_matrix(), TEXTURE_SPACE_OFFSET * moved);
        assert_ne!(bound(&before, Uniform::LightMatrix), bound(&after, Uniform::LightMatrix));
        assert_eq!(bound(&after, Uniform::LightMatrix), vec![UniformValue::Mat4(moved)]);
        assert_eq!(
            bound(&after, Uniform::LightColour),
            vec![UniformValue::Vec3(Vec3::new(1.0, 0.5, 0.0))]
        );
    }

    #[test]
    fn wireframe_wraps_the_dispatch() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("simple", &[]);
        let mut scene = new_scene();
        scene.add_instance(instance(&mut backend, "a", shader), Category::AllOnly);
        scene.set_wireframe(true);

        scene.draw(&mut backend, &camera(), DrawSet::All, None);
        let commands = backend.take_commands();
        assert_eq!(commands.first(), Some(&Command::SetPolygonMode(PolygonMode::Line)));
        assert_eq!(commands.last(), Some(&Command::SetPolygonMode(PolygonMode::Fill)));

        scene.set_wireframe(false);
        scene.draw(&mut backend, &camera(), DrawSet::All, None);
        assert!(
            !backend
                .commands()
                .iter()
                .any(|c| matches!(c, Command::SetPolygonMode(_)))
        );
    }

    #[test]
    fn raw_draw_binds_transforms_only() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("phong", &Uniform::ALL);
        let shadow_gen = backend.create_shader(
            "shadow_gen",
            &[Uniform::ProjectionViewModel, Uniform::ModelMatrix],
        );
        let mut scene = new_scene();
        scene.add_instance(instance(&mut backend, "a", shader), Category::Above);
        scene.add_instance(instance(&mut backend, "b", shader), Category::AllOnly);

        scene.draw_raw(&mut backend, &camera(), DrawSet::NotWater, Some(shadow_gen));
        let commands = backend.take_commands();

        assert_eq!(drawn_meshes(&commands).len(), 1);
        let uniforms: Vec<Uniform> = commands
            .iter()
            .filter_map(|c| match c {
                Command::SetUniform { shader, uniform, .. } => {
                    assert_eq!(*shader, shadow_gen);
                    Some(*uniform)
                }
                _ => None,
            })
            .collect();
        assert_eq!(uniforms, vec![Uniform::ProjectionViewModel, Uniform::ModelMatrix]);
        assert_eq!(scene.light_matrix(), Mat4::ZERO);
    }

    #[test]
    fn degenerate_light_directions_stay_finite() {
        assert!(light_space_matrix(Vec3::ZERO).is_finite());
        assert!(light_space_matrix(Vec3::new(0.0, -1.0, 0.0)).is_finite());
        assert!(light_space_matrix(Vec3::new(0.0, 1.0, 0.0)).is_finite());
    }

    #[test]
    fn texture_offset_maps_clip_to_unit_cube() {
        let low = TEXTURE_SPACE_OFFSET * Vec4::new(-1.0, -1.0, -1.0, 1.0);
        let high = TEXTURE_SPACE_OFFSET * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(low, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(high, Vec4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn instances_can_be_edited_after_registration() {
        let mut backend = RecordingBackend::new();
        let a = backend.create_shader("a", &[]);
        let b = backend.create_shader("b", &[]);
        let mut scene = new_scene();
        let id = scene.add_instance(instance(&mut backend, "quad", a), Category::AllOnly);
        scene.instance_mut(id).unwrap().swap_shader(b);
        assert_eq!(scene.instance(id).unwrap().shader(), b);
        assert_eq!(scene.instance_count(), 1);
    }
}
