use crate::descriptor::{Texture, TextureDesc};
use crate::view::Rect;

/// Facts about the host process that never change after startup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HostEnvironment {
	/// `false` for dedicated servers and other headless processes
	pub can_ever_render: bool,
	pub is_editor: bool,
}

impl Default for HostEnvironment {
	fn default() -> Self {
		Self {
			can_ever_render: true,
			is_editor: false,
		}
	}
}

#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub enum WindowKind {
	/// The standalone game window
	#[default]
	Game,
	/// An editor window playing the game
	PlayInEditor,
	/// Any other editor or tool window, never tagged
	Other,
}

impl WindowKind {
	pub fn is_tagged(&self) -> bool {
		matches!(self, WindowKind::Game | WindowKind::PlayInEditor)
	}
}

/// A window about to present its backbuffer.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WindowInfo {
	pub kind: WindowKind,
	/// The game viewport's rect within the window's client area
	pub client_rect: Rect,
	/// The editor renders views into an intermediate viewport render target instead of the backbuffer
	pub viewport_render_target: Option<Texture>,
}

/// A texture together with the rect of it a view renders to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScreenPassTexture {
	pub texture: Texture,
	pub view_rect: Rect,
}

impl ScreenPassTexture {
	pub fn new(texture: Texture, view_rect: Rect) -> Self {
		Self { texture, view_rect }
	}
}

/// Textures available at the post-processing injection point.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PostProcessInputs {
	pub scene_color: ScreenPassTexture,
	pub scene_depth: Texture,
	/// Velocity of moving objects, `None` if nothing moved this frame
	pub velocity: Option<Texture>,
	/// Where the host wants the pass output, if not in scene color itself
	pub override_output: Option<ScreenPassTexture>,
}

/// The host's render graph. Passes added here execute before any [`RenderCommand`] recorded afterward.
///
/// [`RenderCommand`]: crate::pipeline::RenderCommand
pub trait HostRenderer {
	fn create_texture(&self, desc: TextureDesc) -> Texture;

	fn add_copy_pass(&self, src: &Texture, dst: &Texture);

	/// Combines camera motion reconstructed from `depth` with object `velocity` into a single UAV compatible motion
	/// vector texture, optionally dilated.
	fn add_velocity_combine_pass(&self, depth: &Texture, velocity: Option<&Texture>, dilate: bool) -> Texture;

	/// Extracts the UI color and alpha from `backbuffer`, treating alpha below `alpha_threshold` as transparent.
	fn add_ui_hint_extraction_pass(&self, alpha_threshold: f32, backbuffer: &Texture) -> Texture;

	fn add_clear_alpha_pass(&self, texture: &Texture, rect: Rect);

	/// Whether the application currently has focus
	fn is_foreground(&self) -> bool;
}
