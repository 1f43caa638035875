//! The headless water demo: a tiled pool, four statues, four coloured
//! corner lights and a reflective water plane, driven by scripted input.

use glam::{Quat, Vec2, Vec3};
use serde::Serialize;
use shoreline_common::{Light, Material, MeshRef, ShaderHandle};
use shoreline_input::{InputState, Key, MouseButton};
use shoreline_render::{
    Camera, Category, CommandStats, FrameOrchestrator, FrameSetup, FrameTime, Instance, Pass,
    PostEffectShaders, RecordingBackend, Scene, Uniform, WaterTargets, stats_of,
};

use crate::config::DemoConfig;

/// Fixed simulation step for scripted runs.
pub const FRAME_DELTA: f32 = 1.0 / 60.0;

const WATER_DIMENSIONS: i32 = 200;
const WALL_SIZE: f32 = 5.0;

const TRANSFORM: &[Uniform] = &[Uniform::ProjectionViewModel, Uniform::ModelMatrix];
const SUN: &[Uniform] = &[
    Uniform::AmbientColour,
    Uniform::LightColour,
    Uniform::LightDirection,
    Uniform::CameraPosition,
];
const POINT_LIGHTS: &[Uniform] = &[
    Uniform::LightCount,
    Uniform::PointLightPositions,
    Uniform::PointLightColours,
];
const MATERIAL: &[Uniform] = &[
    Uniform::AmbientCoefficient,
    Uniform::DiffuseCoefficient,
    Uniform::SpecularCoefficient,
    Uniform::SpecularPower,
];
const SHADOWS: &[Uniform] = &[
    Uniform::OffsetLightMatrix,
    Uniform::ShadowMap,
    Uniform::ShadowBiasMin,
    Uniform::ShadowBiasMax,
];

fn declared(groups: &[&[Uniform]]) -> Vec<Uniform> {
    groups.iter().flat_map(|g| g.iter().copied()).collect()
}

struct Shaders {
    phong: ShaderHandle,
    textured: ShaderHandle,
    normal_map: ShaderHandle,
    water: ShaderHandle,
    shadow_gen: ShaderHandle,
    shadow_use: ShaderHandle,
    post: PostEffectShaders,
}

impl Shaders {
    fn register(backend: &mut RecordingBackend) -> Self {
        let lit = declared(&[TRANSFORM, SUN, POINT_LIGHTS, MATERIAL, SHADOWS]);
        let mut textured = lit.clone();
        textured.push(Uniform::DiffuseTexture);

        let post_uniforms = [Uniform::ColourTarget];
        Self {
            phong: backend.create_shader("phong", &lit),
            textured: backend.create_shader("textured", &textured),
            normal_map: backend.create_shader("normalmap", &textured),
            water: backend.create_shader(
                "reflective_water",
                &declared(&[
                    TRANSFORM,
                    SUN,
                    MATERIAL,
                    &[
                        Uniform::Time,
                        Uniform::Dimensions,
                        Uniform::DiffuseTexture1,
                        Uniform::DiffuseTexture2,
                    ],
                ]),
            ),
            shadow_gen: backend.create_shader(
                "shadow_gen",
                &[Uniform::ModelMatrix, Uniform::ShadowCasterMatrix],
            ),
            shadow_use: backend.create_shader(
                "shadow_use",
                &declared(&[TRANSFORM, SUN, SHADOWS]),
            ),
            post: PostEffectShaders {
                box_blur: backend.create_shader("box_blur", &post_uniforms),
                sharpen: backend.create_shader("sharpen", &post_uniforms),
                chromatic: backend.create_shader("chromatic", &post_uniforms),
                depth: backend.create_shader("depth_buffer", &post_uniforms),
            },
        }
    }
}

/// Counts and pass order for one rendered frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSummary {
    pub frame: u64,
    pub passes: Vec<Pass>,
    pub stats: CommandStats,
    pub camera_position: Vec3,
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let passes: Vec<String> = self.passes.iter().map(|p| format!("{p:?}")).collect();
        let p = self.camera_position;
        write!(
            f,
            "frame {:>3}: [{}] {} camera=({:.2}, {:.2}, {:.2})",
            self.frame,
            passes.join(" > "),
            self.stats,
            p.x,
            p.y,
            p.z
        )
    }
}

/// Input for `frame`: walk forward, look around with the right mouse
/// button, then sprint sideways.
pub fn scripted_input(frame: u64, total: u64) -> InputState {
    let mut input = InputState::new();
    let third = (total / 3).max(1);
    match frame / third {
        0 => input.press(Key::W),
        1 => {
            input.press_button(MouseButton::Right);
            input.move_mouse(Vec2::new((frame - third) as f32 * 20.0, 0.0));
        }
        _ => {
            input.press(Key::LeftShift);
            input.press(Key::D);
        }
    }
    input
}

pub struct Demo {
    backend: RecordingBackend,
    scene: Scene,
    camera: Camera,
    orchestrator: FrameOrchestrator,
    sun_sweep: f32,
    frame: u64,
}

impl Demo {
    pub fn build(config: &DemoConfig) -> Self {
        let mut backend = RecordingBackend::new();
        let shaders = Shaders::register(&mut backend);
        let (width, height) = (config.window.width, config.window.height);

        let sun = Light::new(config.sun.direction, config.sun.colour, config.sun.intensity);
        let mut scene = Scene::new(
            Vec2::new(width as f32, height as f32),
            sun,
            config.ambient,
        );
        for (position, colour) in [
            (Vec3::new(4.7, 0.5, 4.7), Vec3::new(1.0, 1.0, 0.0)),
            (Vec3::new(4.7, 0.5, -4.7), Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(-4.7, 0.5, 4.7), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(-4.7, 0.5, -4.7), Vec3::new(0.0, 0.0, 1.0)),
        ] {
            scene.add_point_light(Light::new(position, colour, 15.0));
        }

        let shadow_target =
            backend.create_render_target("shadow", config.shadow_map_size, config.shadow_map_size);
        let post_target = backend.create_render_target("post", width, height);
        let load = config.load;

        let water = load.mirror.then(|| {
            let targets = WaterTargets {
                reflection: backend.create_render_target("reflection", width, height),
                refraction: backend.create_render_target("refraction", width, height),
            };
            let mesh = MeshRef::Simple(backend.create_mesh("water_grid"));
            let cells = WATER_DIMENSIONS as f32;
            let water = Instance::from_euler(
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::new(10.0 / cells, 1.0, 10.0 / cells),
                mesh,
                shaders.water,
            )
            .with_render_targets(targets.reflection, Some(targets.refraction))
            .with_material(Material::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, 128.0))
            .with_dimensions(WATER_DIMENSIONS);
            scene.add_instance(water, Category::AllOnly);
            targets
        });

        if load.quad {
            let mesh = MeshRef::Simple(backend.create_mesh("quad"));
            for euler in [Vec3::ZERO, Vec3::new(180.0, 0.0, 0.0)] {
                scene.add_instance(
                    Instance::from_euler(
                        Vec3::ZERO,
                        euler,
                        Vec3::new(20.0, 1.0, 20.0),
                        mesh,
                        shaders.shadow_use,
                    ),
                    Category::Above,
                );
            }
        }

        let statues = [
            (load.bunny, "bunny", Vec3::new(2.5, -0.1, -2.5), 0.3, shaders.phong),
            (load.buddha, "buddha", Vec3::new(-2.5, -0.1, 2.5), 0.3, shaders.phong),
            (load.dragon, "dragon", Vec3::new(-2.5, -0.1, -2.5), 0.3, shaders.phong),
            (load.spear, "soulspear", Vec3::new(2.5, 0.0, 2.5), 0.6, shaders.normal_map),
        ];
        for (enabled, name, position, scale, shader) in statues {
            if !enabled {
                continue;
            }
            let mesh = MeshRef::Loaded(backend.create_mesh(name));
            scene.add_instance(
                Instance::from_euler(
                    position,
                    Vec3::new(0.0, 45.0, 0.0),
                    Vec3::splat(scale),
                    mesh,
                    shader,
                ),
                Category::Above,
            );
        }

        if load.walls {
            add_pool_walls(&mut backend, &mut scene, shaders.textured);
        }

        let setup = FrameSetup {
            window_width: width,
            window_height: height,
            shadow_map_size: config.shadow_map_size,
            shadow_target,
            shadow_gen_shader: shaders.shadow_gen,
            water,
            post_target,
            post_quad: MeshRef::Simple(backend.create_mesh("fullscreen_quad")),
            post_shaders: shaders.post,
        };
        let mut orchestrator = FrameOrchestrator::new(setup, &mut scene);
        orchestrator.apply_effect(&mut scene, config.effect);
        orchestrator.set_show_grid(config.show_grid);

        let mut camera =
            Camera::new(config.camera.position, config.camera.theta, config.camera.phi);
        camera.bindings = config.camera.bindings;

        tracing::info!(
            instances = scene.instance_count(),
            point_lights = scene.point_lights().len(),
            water = load.mirror,
            "demo scene built"
        );

        Self {
            backend,
            scene,
            camera,
            orchestrator,
            sun_sweep: config.sun.sweep,
            frame: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orchestrator(&self) -> &FrameOrchestrator {
        &self.orchestrator
    }

    pub fn backend(&self) -> &RecordingBackend {
        &self.backend
    }

    /// Update and render one frame. The command log is kept until the next
    /// call so it can be inspected.
    pub fn step(&mut self, input: &InputState) -> FrameSummary {
        self.backend.take_commands();
        if self.sun_sweep != 0.0 {
            let turn = Quat::from_rotation_y((self.sun_sweep * FRAME_DELTA).to_radians());
            let sun = self.scene.sunlight_mut();
            sun.direction = turn * sun.direction;
        }
        let time = FrameTime {
            elapsed: self.frame as f32 * FRAME_DELTA,
            delta: FRAME_DELTA,
        };
        self.orchestrator
            .update(&mut self.scene, &mut self.camera, input, time);
        let report = self
            .orchestrator
            .render_frame(&mut self.backend, &mut self.scene, &mut self.camera);

        let summary = FrameSummary {
            frame: self.frame,
            passes: report.passes,
            stats: stats_of(self.backend.commands()),
            camera_position: self.camera.position,
        };
        tracing::debug!(frame = self.frame, draws = summary.stats.draws, "frame rendered");
        self.frame += 1;
        summary
    }

    /// Run `frames` frames of scripted input.
    pub fn run(&mut self, frames: u64) -> Vec<FrameSummary> {
        (0..frames)
            .map(|frame| self.step(&scripted_input(frame, frames)))
            .collect()
    }
}

/// Sixteen side panels and eight floor panels. Each side wall is a pair of
/// quads facing opposite ways: the inner face straddles the water, the
/// outer face only casts shadows. Floor tops sit below the water.
fn add_pool_walls(backend: &mut RecordingBackend, scene: &mut Scene, shader: ShaderHandle) {
    use Category::{Below, Both, CasterOnly};

    let tiles = backend.create_texture("tiles");
    let mesh = MeshRef::Simple(backend.create_mesh("tile"));
    let material = Material::new(Vec3::splat(0.1), Vec3::ONE, Vec3::splat(0.35), 34.0);
    let (s, h) = (WALL_SIZE, WALL_SIZE / 2.0);
    let side_y = -h + 0.5;
    let floor_y = -s + 0.5;

    let (z90, z270) = (Vec3::new(0.0, 0.0, 90.0), Vec3::new(0.0, 0.0, 270.0));
    let (x90, x270) = (Vec3::new(90.0, 0.0, 0.0), Vec3::new(270.0, 0.0, 0.0));
    let (up, down) = (Vec3::ZERO, Vec3::new(180.0, 0.0, 0.0));

    let panels = [
        (Vec3::new(-s, side_y, -h), z90, CasterOnly),
        (Vec3::new(-s, side_y, -h), z270, Both),
        (Vec3::new(-s, side_y, h), z90, CasterOnly),
        (Vec3::new(-s, side_y, h), z270, Both),
        (Vec3::new(s, side_y, -h), z90, Both),
        (Vec3::new(s, side_y, -h), z270, CasterOnly),
        (Vec3::new(s, side_y, h), z90, Both),
        (Vec3::new(s, side_y, h), z270, CasterOnly),
        (Vec3::new(-h, side_y, s), x90, CasterOnly),
        (Vec3::new(-h, side_y, s), x270, Both),
        (Vec3::new(h, side_y, s), x90, CasterOnly),
        (Vec3::new(h, side_y, s), x270, Both),
        (Vec3::new(-h, side_y, -s), x90, Both),
        (Vec3::new(-h, side_y, -s), x270, CasterOnly),
        (Vec3::new(h, side_y, -s), x90, Both),
        (Vec3::new(h, side_y, -s), x270, CasterOnly),
        (Vec3::new(h, floor_y, h), up, Below),
        (Vec3::new(h, floor_y, h), down, CasterOnly),
        (Vec3::new(h, floor_y, -h), up, Below),
        (Vec3::new(h, floor_y, -h), down, CasterOnly),
        (Vec3::new(-h, floor_y, h), up, Below),
        (Vec3::new(-h, floor_y, h), down, CasterOnly),
        (Vec3::new(-h, floor_y, -h), up, Below),
        (Vec3::new(-h, floor_y, -h), down, CasterOnly),
    ];
    for (position, euler, category) in panels {
        let panel = Instance::from_euler(position, euler, Vec3::new(s, 1.0, s), mesh, shader)
            .with_texture(tiles)
            .with_material(material);
        scene.add_instance(panel, category);
    }
}
