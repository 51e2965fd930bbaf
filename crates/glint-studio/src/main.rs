use std::io::Write;

use anyhow::{bail, Context};

use glint_engine::coords::{ColorRgba, Rect, Transform, Vec2, Vec3};
use glint_engine::geom::GeomDraw;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::render::{DrawList, GpuTexture, RenderSurface, ZIndex};
use glint_engine::resources::ResourceRegistry;
use glint_engine::text::{Atlas, AtlasConfig, FontdueRasterizer, Text};
use glint_ui::{Group, Sprite};

const FONT_PX: f32 = 32.0;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let font = load_font();
    if font.is_empty() {
        bail!("no system font found; install DejaVu Sans or Noto Sans");
    }

    // ── resources ─────────────────────────────────────────────────────────
    let rasterizer = FontdueRasterizer::from_bytes(&font, FONT_PX).context("failed to load font")?;
    let atlas = Atlas::ascii(&rasterizer, &AtlasConfig::default()).context("failed to bake atlas")?;
    log::info!(
        "baked {} glyphs at {FONT_PX}px into a {}x{} atlas, line height {:.1}px",
        atlas.len(),
        atlas.size(),
        atlas.size(),
        atlas.line_height(),
    );

    let mut registry = ResourceRegistry::new();
    registry.add_atlas(atlas);
    let atlas = registry.default_atlas().context("atlas was not registered")?;
    let solid = registry.solid_material();

    let mut frame = DrawList::new();

    // ── shapes ────────────────────────────────────────────────────────────
    let mut geom = GeomDraw::new();
    geom.set_color(ColorRgba::new(0.3, 0.7, 1.0, 1.0));

    let border = geom.rectangle(Rect::new(20.0, 20.0, 620.0, 460.0), 4.0);
    let ring = geom.circle(Vec3::new(520.0, 360.0, 0.0), 60.0, 3.0)?;
    let ellipse = geom.ellipse(Vec3::new(380.0, 360.0, 0.0), Vec2::new(70.0, 35.0), 0.4, 2.0)?;

    geom.set_color(ColorRgba::new(1.0, 0.8, 0.2, 1.0));
    let hexagon: Vec<Vec3> = (0..6)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / 6.0;
            Vec3::new(120.0 + 50.0 * a.cos(), 360.0 + 50.0 * a.sin(), 0.0)
        })
        .collect();
    let hex = geom.polygon(&hexagon, 6.0);
    let zigzag = geom.line_strip(
        &[
            Vec3::new(200.0, 300.0, 0.0),
            Vec3::new(230.0, 340.0, 0.0),
            Vec3::new(260.0, 300.0, 0.0),
            Vec3::new(290.0, 340.0, 0.0),
        ],
        2.0,
    );

    frame.set_layer(ZIndex(-1));
    for mesh in [&border, &ring, &ellipse, &hex, &zigzag] {
        frame.add(mesh, Transform::IDENTITY, ColorRgba::white(), &solid);
    }
    frame.set_layer(ZIndex::DEFAULT);

    // ── text ──────────────────────────────────────────────────────────────
    let mut title = Text::new(atlas, "glint studio\nmeshes and glyphs")?;
    write!(title, " v{}", env!("CARGO_PKG_VERSION"))?;
    title.set_color(ColorRgba::new(0.9, 0.9, 0.95, 1.0));
    title.draw(&mut frame, Transform::translate(40.0, 200.0));
    log::info!(
        "title: {} glyph vertices, bounds {:?}, revision {}",
        title.mesh().map_or(0, |m| m.vertex_count()),
        title.bounds(),
        title.revision(),
    );

    // ── ui ────────────────────────────────────────────────────────────────
    let panel = Sprite::solid(registry.white_texture());
    let pointer = Vec2::new(500.0, 80.0);

    let mut ui = Group::new(atlas, solid.clone());
    ui.debug = log::log_enabled!(log::Level::Debug);
    ui.set_color(ColorRgba::new(0.15, 0.15, 0.2, 0.9));
    ui.panel(&panel, Rect::new(420.0, 40.0, 600.0, 120.0));
    ui.set_color(ColorRgba::white());
    ui.text("Score 42", Rect::new(430.0, 50.0, 590.0, 110.0), Vec2::new(0.5, 0.5))?;
    ui.fixed_text("hover me", Rect::new(430.0, 20.0, 590.0, 40.0), Vec2::new(0.0, 0.5), 0.5)?;
    ui.tooltip(&panel, "a tooltip", Rect::new(420.0, 40.0, 600.0, 120.0), Vec2::new(0.5, 0.0), pointer)?;
    ui.panelize_bounds(&panel, Rect::new(8.0, 8.0, 8.0, 8.0));
    log::info!("pointer {pointer:?} over ui: {}", ui.contains(pointer));
    ui.draw(&mut frame);

    let vertices: usize = frame.items().iter().map(|i| i.mesh.vertex_count()).sum();
    log::info!("frame: {} draw items, {vertices} vertices", frame.len());

    // ── gpu ───────────────────────────────────────────────────────────────
    match pollster::block_on(upload_textures(&registry)) {
        Ok(uploaded) => log::info!("uploaded {} textures to the GPU", uploaded.len()),
        Err(e) => log::warn!("skipping GPU upload: {e:#}"),
    }

    Ok(())
}

/// Uploads every registered texture to a headless device.
async fn upload_textures(registry: &ResourceRegistry) -> anyhow::Result<Vec<GpuTexture>> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a GPU adapter")?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("glint-studio device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;

    registry
        .textures()
        .map(|(id, image, sampling)| {
            GpuTexture::new(&device, &queue, image, sampling).with_context(|| format!("texture {id:?}"))
        })
        .collect()
}

fn load_font() -> Vec<u8> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .unwrap_or_default()
}
