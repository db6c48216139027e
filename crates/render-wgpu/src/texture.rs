use noddy_core::{TextureBinding, TextureWrap, WrapMode};

use crate::RenderError;

pub fn address_mode(mode: WrapMode) -> wgpu::AddressMode {
    match mode {
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

pub fn sampler_descriptor(wrap: TextureWrap) -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("map_sampler"),
        address_mode_u: address_mode(wrap.u),
        address_mode_v: address_mode(wrap.v),
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    }
}

/// The world map on the GPU with a sampler matching its binding's wrap mode.
pub struct MapTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub dimensions: (u32, u32),
}

impl MapTexture {
    /// Decode the image at the binding's path and upload it.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        binding: &TextureBinding,
    ) -> Result<Self, RenderError> {
        let image = image::open(binding.path())?.to_rgba8();
        tracing::info!(
            path = %binding.path().display(),
            width = image.width(),
            height = image.height(),
            "map texture decoded"
        );
        Self::from_rgba(device, queue, &image, binding.wrap())
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &image::RgbaImage,
        wrap: TextureWrap,
    ) -> Result<Self, RenderError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroDimensions { width, height });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("map_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&sampler_descriptor(wrap));

        Ok(Self {
            texture,
            view,
            sampler,
            dimensions: (width, height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_modes_map_to_address_modes() {
        assert_eq!(address_mode(WrapMode::Repeat), wgpu::AddressMode::Repeat);
        assert_eq!(
            address_mode(WrapMode::ClampToEdge),
            wgpu::AddressMode::ClampToEdge
        );
    }

    #[test]
    fn world_map_sampler_repeats_horizontally_only() {
        let desc = sampler_descriptor(TextureWrap::HORIZONTAL_REPEAT);
        assert_eq!(desc.address_mode_u, wgpu::AddressMode::Repeat);
        assert_eq!(desc.address_mode_v, wgpu::AddressMode::ClampToEdge);
    }

    #[test]
    fn missing_image_is_an_error() {
        let err = image::open("does/not/exist.jpg").map(|_| ()).map_err(RenderError::from);
        assert!(matches!(err, Err(RenderError::Image(_))));
    }
}
