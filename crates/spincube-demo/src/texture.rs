//! Cube texture: async image load with a placeholder stand-in.
//!
//! The image decode runs on a background thread and hands its result to the
//! frame loop over a channel, so the swap from placeholder to real texture
//! happens in one indivisible step from the loop's point of view. A failed
//! load leaves the placeholder bound permanently; there is no retry.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context, Result};

/// Placeholder texel bound until the real image arrives: opaque blue.
pub const PLACEHOLDER_PIXEL: [u8; 4] = [0, 0, 255, 255];

/// Decoded RGBA8 pixels ready for upload.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Background image decode handle.
///
/// Poll [`try_take`](Self::try_take) once per frame; it yields the decoded
/// image at most once.
pub struct TextureLoader {
    rx: Receiver<Result<DecodedImage>>,
    done: bool,
}

impl TextureLoader {
    /// Kicks off the decode of `path` on a background thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may be gone if the app exits mid-load.
            let _ = tx.send(load_image(&path));
        });
        Self { rx, done: false }
    }

    /// Returns the decoded image if the background load has finished.
    ///
    /// A decode failure is logged once and the loader goes quiet; the caller
    /// keeps whatever texture it already has.
    pub fn try_take(&mut self) -> Option<DecodedImage> {
        if self.done {
            return None;
        }
        match self.rx.try_recv() {
            Ok(Ok(img)) => {
                self.done = true;
                Some(img)
            }
            Ok(Err(e)) => {
                self.done = true;
                log::warn!("texture load failed, keeping placeholder: {e:#}");
                None
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.done = true;
                None
            }
        }
    }
}

fn load_image(path: &std::path::Path) -> Result<DecodedImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to open texture image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// GPU texture + the sampler matching how it may legally be sampled.
pub struct CubeTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl CubeTexture {
    /// 1x1 opaque-blue stand-in so the draw loop never samples an
    /// incomplete resource.
    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        upload(device, queue, 1, 1, &PLACEHOLDER_PIXEL)
    }

    /// Uploads a decoded image.
    ///
    /// Power-of-two images get a full mip chain and repeat wrapping;
    /// non-power-of-two images must clamp to edge and stay mipless, or
    /// sampling is invalid on many backends. This branch is a correctness
    /// requirement, not a preference.
    pub fn from_image(device: &wgpu::Device, queue: &wgpu::Queue, img: &DecodedImage) -> Self {
        upload(device, queue, img.width, img.height, &img.pixels)
    }
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> CubeTexture {
    let pot = is_power_of_two(width) && is_power_of_two(height);
    let levels = if pot { mip_level_count(width, height) } else { 1 };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("spincube cube texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    write_level(queue, &texture, 0, width, height, pixels);

    if pot {
        // wgpu has no generateMipmap; build the chain on the CPU instead.
        let mut level = 1;
        let (mut w, mut h) = (width, height);
        let mut data = pixels.to_vec();
        while w > 1 || h > 1 {
            let (nw, nh, next) = downsample(&data, w, h);
            write_level(queue, &texture, level, nw, nh, &next);
            (w, h, data) = (nw, nh, next);
            level += 1;
        }
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let address_mode = if pot {
        wgpu::AddressMode::Repeat
    } else {
        wgpu::AddressMode::ClampToEdge
    };
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("spincube cube sampler"),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: if pot {
            wgpu::MipmapFilterMode::Linear
        } else {
            wgpu::MipmapFilterMode::Nearest
        },
        ..Default::default()
    });

    CubeTexture { view, sampler }
}

fn write_level(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    level: u32,
    width: u32,
    height: u32,
    pixels: &[u8],
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: level,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

pub(crate) fn is_power_of_two(v: u32) -> bool {
    v != 0 && (v & (v - 1)) == 0
}

/// Number of mip levels for a full chain down to 1x1.
pub(crate) fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// 2x2 box filter producing the next-smaller mip level.
///
/// Odd 1-wide/1-tall levels degenerate to averaging the remaining axis.
pub(crate) fn downsample(pixels: &[u8], width: u32, height: u32) -> (u32, u32, Vec<u8>) {
    let nw = (width / 2).max(1);
    let nh = (height / 2).max(1);
    let mut out = Vec::with_capacity((nw * nh * 4) as usize);

    for y in 0..nh {
        for x in 0..nw {
            let x0 = (x * 2).min(width - 1);
            let x1 = (x * 2 + 1).min(width - 1);
            let y0 = (y * 2).min(height - 1);
            let y1 = (y * 2 + 1).min(height - 1);

            for ch in 0..4 {
                let sum = texel(pixels, width, x0, y0, ch) as u32
                    + texel(pixels, width, x1, y0, ch) as u32
                    + texel(pixels, width, x0, y1, ch) as u32
                    + texel(pixels, width, x1, y1, ch) as u32;
                out.push(((sum + 2) / 4) as u8);
            }
        }
    }

    (nw, nh, out)
}

fn texel(pixels: &[u8], width: u32, x: u32, y: u32, ch: u32) -> u8 {
    pixels[((y * width + x) * 4 + ch) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── power-of-two predicate ────────────────────────────────────────────

    #[test]
    fn power_of_two_classification() {
        for v in [1u32, 2, 4, 64, 256, 1024] {
            assert!(is_power_of_two(v), "{v}");
        }
        for v in [0u32, 3, 6, 100, 255, 257] {
            assert!(!is_power_of_two(v), "{v}");
        }
    }

    #[test]
    fn mip_chain_length() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(512, 128), 10);
    }

    // ── downsampling ──────────────────────────────────────────────────────

    #[test]
    fn downsample_halves_dimensions() {
        let pixels = vec![0u8; 8 * 4 * 4];
        let (w, h, out) = downsample(&pixels, 8, 4);
        assert_eq!((w, h), (4, 2));
        assert_eq!(out.len(), (4 * 2 * 4) as usize);
    }

    #[test]
    fn downsample_preserves_solid_color() {
        let pixels: Vec<u8> = std::iter::repeat([10u8, 200, 30, 255])
            .take(4 * 4)
            .flatten()
            .collect();
        let (_, _, out) = downsample(&pixels, 4, 4);
        for px in out.chunks_exact(4) {
            assert_eq!(px, &[10, 200, 30, 255]);
        }
    }

    #[test]
    fn downsample_averages_quads() {
        // 2x2 image with channel-0 values 0, 4, 8, 12 averages to 6.
        let mut pixels = vec![0u8; 2 * 2 * 4];
        for (i, v) in [0u8, 4, 8, 12].iter().enumerate() {
            pixels[i * 4] = *v;
        }
        let (w, h, out) = downsample(&pixels, 2, 2);
        assert_eq!((w, h), (1, 1));
        assert_eq!(out[0], 6);
    }

    #[test]
    fn downsample_reaches_one_by_one() {
        let mut w = 256u32;
        let mut h = 128u32;
        let mut data = vec![128u8; (w * h * 4) as usize];
        let mut levels = 1;
        while w > 1 || h > 1 {
            let (nw, nh, next) = downsample(&data, w, h);
            (w, h, data) = (nw, nh, next);
            levels += 1;
        }
        assert_eq!((w, h), (1, 1));
        assert_eq!(levels, mip_level_count(256, 128));
    }

    // ── loader ────────────────────────────────────────────────────────────

    #[test]
    fn missing_file_degrades_to_placeholder() {
        let mut loader = TextureLoader::spawn(PathBuf::from("/nonexistent/cube.png"));
        // The decode thread reports an error; try_take never yields an image.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            assert!(loader.try_take().is_none());
            if loader.done || std::time::Instant::now() > deadline {
                break;
            }
            std::thread::yield_now();
        }
        assert!(loader.done);
        assert!(loader.try_take().is_none());
    }

    #[test]
    fn placeholder_pixel_is_opaque_blue() {
        assert_eq!(PLACEHOLDER_PIXEL, [0, 0, 255, 255]);
    }
}
