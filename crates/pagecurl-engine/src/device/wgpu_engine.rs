use std::sync::Arc;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::coords::SurfaceSize;
use crate::library;
use crate::scene::{MaterialInfo, MaterialParameter, SceneDesc};
use crate::view::{CameraUniform, View};

use super::frame::GpuFrame;
use super::surface;
use super::{Engine, EngineInit, SurfaceErrorAction};

/// Swap target of the wgpu engine: a surface configured for one window.
///
/// Holds the window so the surface can never outlive it.
pub struct WgpuSwapTarget {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,

    /// Whether `config` has been applied. A window created at zero size stays
    /// unconfigured until its first non-zero resize.
    configured: bool,
}

impl WgpuSwapTarget {
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.width, self.config.height)
    }
}

/// One vertex position of the scene buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Position([f32; 3]);

struct SceneResources {
    environment: wgpu::Texture,
    vertices: Option<wgpu::Buffer>,
    indirect_intensity: f32,
}

impl SceneResources {
    fn destroy(self) {
        self.environment.destroy();
        if let Some(vertices) = self.vertices {
            vertices.destroy();
        }
    }
}

/// `Engine` implementation on top of wgpu.
///
/// Owns Instance/Adapter/Device/Queue for the process lifetime. Surfaces are
/// created per window availability through `create_swap_target`.
pub struct WgpuEngine {
    init: EngineInit,
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Projection of the view being rendered.
    camera: wgpu::Buffer,

    frame: Option<GpuFrame>,
    scene: Option<SceneResources>,
    materials: Vec<wgpu::ShaderModule>,
}

impl WgpuEngine {
    /// Creates the engine without any surface.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: EngineInit) -> Result<Self> {
        library::init().context("cannot create an engine")?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("pagecurl device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let camera = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pagecurl camera"),
            size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!("engine created on {:?}", adapter.get_info().name);

        Ok(Self {
            init,
            instance,
            adapter,
            device,
            queue,
            camera,
            frame: None,
            scene: None,
            materials: Vec::new(),
        })
    }

    /// Blocking variant of [`WgpuEngine::new`] for use outside async code.
    pub fn new_blocking(init: EngineInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn configure(&self, target: &mut WgpuSwapTarget, width: u32, height: u32) {
        target.config.width = width;
        target.config.height = height;
        target.surface.configure(&self.device, &target.config);
        target.configured = true;
    }
}

impl Engine for WgpuEngine {
    type Surface = Arc<Window>;
    type SwapTarget = WgpuSwapTarget;

    fn create_swap_target(&mut self, window: Arc<Window>) -> Result<WgpuSwapTarget> {
        let surface = self
            .instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        anyhow::ensure!(
            self.adapter.is_surface_supported(&surface),
            "adapter cannot present to this window"
        );

        let caps = surface.get_capabilities(&self.adapter);
        let format = surface::choose_surface_format(&caps, self.init.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, self.init.alpha_mode);

        let size = SurfaceSize::from(window.inner_size());
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: self.init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.init.desired_maximum_frame_latency,
        };

        let mut target = WgpuSwapTarget {
            window,
            surface,
            config,
            configured: false,
        };

        if size.is_presentable() {
            self.configure(&mut target, size.width, size.height);
        }

        log::debug!("swap target created ({format:?}, {}x{})", size.width, size.height);
        Ok(target)
    }

    fn destroy_swap_target(&mut self, target: WgpuSwapTarget) {
        // An open frame holds a texture of this surface.
        if self.frame.take().is_some() {
            log::warn!("swap target destroyed with a frame still open; frame discarded");
        }
        drop(target);
        log::debug!("swap target destroyed");
    }

    fn resize_swap_target(&mut self, target: &mut WgpuSwapTarget, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.configure(target, width, height);
    }

    fn flush_and_wait(&mut self) {
        let poll = self.device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        });
        if let Err(e) = poll {
            log::warn!("device drain failed: {e}");
        }
    }

    fn begin_frame(&mut self, target: &mut WgpuSwapTarget) -> Result<(), SurfaceErrorAction> {
        if !target.configured {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        if self.frame.take().is_some() {
            log::warn!("begin_frame with a frame already open; previous frame discarded");
        }

        let surface_texture = match target.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                return Err(surface::map_surface_error(
                    &target.surface,
                    &self.device,
                    &target.config,
                    err,
                ));
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("pagecurl frame encoder"),
            });

        self.frame = Some(GpuFrame {
            window: target.window.clone(),
            surface_texture,
            view,
            encoder,
        });
        Ok(())
    }

    fn render(&mut self, view: &View) {
        let Some(frame) = self.frame.as_mut() else {
            log::warn!("render called outside of a frame");
            return;
        };

        let projection = view.camera().projection();
        log::trace!(
            "view {:?}: fov {:.1}x{:.1} deg, aspect {:.3}",
            view.viewport(),
            projection.horizontal_fov_degrees(),
            projection.vertical_fov_degrees(),
            projection.aspect
        );
        self.queue
            .write_buffer(&self.camera, 0, bytemuck::bytes_of(&view.camera().uniform()));

        let size = frame.surface_texture.texture.size();

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pagecurl view"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(view.clear_color().into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if let Some(vp) = view.viewport().clamped_to(size.width, size.height) {
            rpass.set_viewport(
                vp.x as f32,
                vp.y as f32,
                vp.width as f32,
                vp.height as f32,
                0.0,
                1.0,
            );
        }
    }

    fn end_frame(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };

        let GpuFrame {
            window,
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);

        window.pre_present_notify();
        surface_texture.present();
    }

    fn build_scene(&mut self, scene: &SceneDesc) -> Result<()> {
        let sky = &scene.skybox;
        anyhow::ensure!(
            sky.is_well_formed(),
            "skybox needs {} texels, got {}",
            sky.expected_texels(),
            sky.texels.len()
        );

        let extent = wgpu::Extent3d {
            width: sky.face_size,
            height: sky.face_size,
            depth_or_array_layers: 6,
        };

        let environment = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pagecurl environment"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &environment,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&sky.texels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(sky.face_size * 4),
                rows_per_image: Some(sky.face_size),
            },
            extent,
        );

        let vertex_count = scene.vertex_buffer.vertex_count as usize;
        let vertices = (vertex_count > 0).then(|| {
            let positions = vec![Position([0.0; 3]); vertex_count];
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("pagecurl positions"),
                    contents: bytemuck::cast_slice(&positions),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                })
        });

        if let Some(old) = self.scene.take() {
            old.destroy();
        }

        let resources = SceneResources {
            environment,
            vertices,
            indirect_intensity: scene.indirect_light.intensity,
        };

        log::debug!(
            "scene built: {}x{} environment (sun: {}), {} vertices, indirect light {} lx",
            sky.face_size,
            sky.face_size,
            sky.show_sun,
            vertex_count,
            resources.indirect_intensity
        );

        self.scene = Some(resources);
        Ok(())
    }

    fn load_material(&mut self, payload: &[u8]) -> Result<MaterialInfo> {
        use wgpu::naga;

        let source = std::str::from_utf8(payload).context("material payload is not UTF-8 WGSL")?;

        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| anyhow::anyhow!("material failed to parse: {e}"))?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .map_err(|e| anyhow::anyhow!("material failed validation: {e}"))?;

        let parameters = reflect_parameters(&module);

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pagecurl material"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        self.materials.push(shader);

        Ok(MaterialInfo { parameters })
    }

    fn release_view(&mut self, _view: &View) {
        if let Some(scene) = self.scene.take() {
            scene.destroy();
        }
    }

    fn release_renderer(&mut self) {
        self.frame = None;
        self.materials.clear();
    }
}

fn reflect_parameters(module: &wgpu::naga::Module) -> Vec<MaterialParameter> {
    use wgpu::naga::{ArraySize, TypeInner};

    module
        .global_variables
        .iter()
        .filter_map(|(_, var)| {
            let binding = var.binding.as_ref()?;

            let (kind, count) = match &module.types[var.ty].inner {
                TypeInner::Array {
                    base,
                    size: ArraySize::Constant(n),
                    ..
                }
                | TypeInner::BindingArray {
                    base,
                    size: ArraySize::Constant(n),
                } => (describe_type(module, *base), n.get()),
                _ => (describe_type(module, var.ty), 1),
            };

            Some(MaterialParameter {
                name: var.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
                kind,
                count,
                slot: Some((binding.group, binding.binding)),
            })
        })
        .collect()
}

fn describe_type(module: &wgpu::naga::Module, ty: wgpu::naga::Handle<wgpu::naga::Type>) -> String {
    use wgpu::naga::TypeInner;

    let ty = &module.types[ty];
    if let Some(name) = &ty.name {
        return name.clone();
    }

    match &ty.inner {
        TypeInner::Scalar(scalar) => scalar_name(*scalar),
        TypeInner::Vector { size, scalar } => format!("vec{}<{}>", *size as u8, scalar_name(*scalar)),
        TypeInner::Matrix { columns, rows, .. } => format!("mat{}x{}", *columns as u8, *rows as u8),
        TypeInner::Image { .. } => "texture".to_string(),
        TypeInner::Sampler { .. } => "sampler".to_string(),
        TypeInner::Struct { .. } => "struct".to_string(),
        TypeInner::Array { .. } | TypeInner::BindingArray { .. } => "array".to_string(),
        _ => "opaque".to_string(),
    }
}

fn scalar_name(scalar: wgpu::naga::Scalar) -> String {
    use wgpu::naga::ScalarKind;

    let bits = scalar.width as u32 * 8;
    match scalar.kind {
        ScalarKind::Float => format!("f{bits}"),
        ScalarKind::Sint => format!("i{bits}"),
        ScalarKind::Uint => format!("u{bits}"),
        ScalarKind::Bool => "bool".to_string(),
        _ => "abstract".to_string(),
    }
}
