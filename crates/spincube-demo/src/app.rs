//! The demo application: poll the texture load, advance the spin, draw.

use std::path::PathBuf;

use spincube_engine::core::{App, AppControl, FrameCtx};

use crate::renderer::CubeRenderer;
use crate::texture::{CubeTexture, TextureLoader};
use crate::transform::{FrameMatrices, Spin};

/// Background clear color, RGBA.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.8,
    b: 0.0,
    a: 0.5,
};

pub struct CubeApp {
    texture_path: PathBuf,
    spin: Spin,
    loader: Option<TextureLoader>,
    renderer: CubeRenderer,
}

impl CubeApp {
    pub fn new(texture_path: PathBuf) -> Self {
        Self {
            texture_path,
            spin: Spin::new(),
            loader: None,
            renderer: CubeRenderer::new(),
        }
    }
}

impl App for CubeApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Kicked off on the first tick, i.e. only once a rendering context
        // exists. Early frames sample the placeholder texel until the decode
        // completes.
        let loader = self
            .loader
            .get_or_insert_with(|| TextureLoader::spawn(self.texture_path.clone()));

        // The one cross-thread hand-off: swap placeholder for the decoded
        // image in a single step, before any draw touches the texture.
        if let Some(img) = loader.try_take() {
            log::info!("texture loaded ({}x{})", img.width, img.height);
            let texture = CubeTexture::from_image(ctx.gpu.device(), ctx.gpu.queue(), &img);
            self.renderer.set_texture(texture);
        }

        self.spin.advance(ctx.time.dt);
        let angle = self.spin.angle();
        let renderer = &mut self.renderer;

        ctx.render(CLEAR_COLOR, |rctx, target| {
            let matrices = FrameMatrices::compute(angle, rctx.viewport.aspect());
            renderer.render(rctx, target, &matrices);
        })
    }
}
