use crate::error::Result;
use crate::image::{check_len, check_region, Image, Sampling};

/// An [`Image`] uploaded to the GPU as an `Rgba8UnormSrgb` texture.
///
/// Owns the texture, its default view and a sampler matching the requested
/// [`Sampling`]. GPU memory is released when this value is dropped.
pub struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    width: u32,
    height: u32,
    sampling: Sampling,
}

impl GpuTexture {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, image: &Image, sampling: Sampling) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        check_len(width, height, image.pixels().len())?;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint texture"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let filter = match sampling {
            Sampling::Linear => wgpu::FilterMode::Linear,
            Sampling::Nearest => wgpu::FilterMode::Nearest,
        };
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glint sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let gpu = Self { texture, view, sampler, width, height, sampling };
        gpu.upload(queue, 0, 0, width, height, image.pixels());

        log::debug!("uploaded {width}x{height} texture ({sampling:?})");
        Ok(gpu)
    }

    /// Replaces the `w` x `h` region at `(x, y)`. Row 0 is the top row.
    pub fn write(&self, queue: &wgpu::Queue, x: u32, y: u32, w: u32, h: u32, pixels: &[u8]) -> Result<()> {
        check_len(w, h, pixels.len())?;
        check_region(x, y, w, h, self.width, self.height)?;
        self.upload(queue, x, y, w, h, pixels);
        Ok(())
    }

    /// Replaces the whole texture with `image`, which must match its size.
    pub fn write_image(&self, queue: &wgpu::Queue, image: &Image) -> Result<()> {
        self.write(queue, 0, 0, image.width(), image.height(), image.pixels())
    }

    fn upload(&self, queue: &wgpu::Queue, x: u32, y: u32, w: u32, h: u32, pixels: &[u8]) {
        if w == 0 || h == 0 {
            return;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w * 4),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
    }

    #[inline]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }
}
