use crate::descriptor::NativeHandle;
use crate::view::{Rect, ViewInfo};
use smallvec::SmallVec;
use tracing::{error, info};

/// Debug names of view family render targets that are known to be (a copy of) the backbuffer.
pub const EXPECTED_RENDER_TARGET_NAMES: [&str; 3] =
	["BufferedRT", "BackbufferReference", "FD3D11Viewport::GetSwapChainSurface"];

/// Render target used by the editor for mouse picking, it never gets presented.
pub const IGNORED_RENDER_TARGET_NAME: &str = "HitProxyTexture";

/// A view we have seen this frame, waiting for the backbuffer it renders into to be presented.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TrackedView {
	pub view_key: u32,
	pub view_rect: Rect,
	pub unscaled_view_rect: Rect,
	pub unconstrained_view_rect: Rect,
	/// The render target this view renders into, compared by value against presented backbuffers
	pub backing: Option<NativeHandle>,
}

pub type ClaimedViews = SmallVec<[TrackedView; 4]>;

/// The set of views seen since their backbuffer was last presented.
#[derive(Debug, Default)]
pub struct ViewTracker {
	views: Vec<TrackedView>,
	log_tracked_views: bool,
}

impl ViewTracker {
	pub fn new(log_tracked_views: bool) -> Self {
		Self {
			views: Vec::new(),
			log_tracked_views,
		}
	}

	pub fn set_log_tracked_views(&mut self, log: bool) {
		self.log_tracked_views = log;
	}

	pub fn tracked_views(&self) -> &[TrackedView] {
		&self.views
	}

	pub fn len(&self) -> usize {
		self.views.len()
	}

	pub fn is_empty(&self) -> bool {
		self.views.is_empty()
	}

	/// Tracks `view` or updates its existing entry. Ineligible views are ignored.
	pub fn add_tracked_view(&mut self, view: &ViewInfo) {
		if let Some(reason) = view.ineligibility_reason() {
			if self.log_tracked_views {
				info!(view_key = view.view_key, ?reason, "View not tracked");
			}
			return;
		}

		let index = match self.views.iter().position(|tracked| tracked.view_key == view.view_key) {
			Some(index) => index,
			None => {
				self.views.push(TrackedView {
					view_key: view.view_key,
					..TrackedView::default()
				});
				self.views.len() - 1
			}
		};
		let tracked = &mut self.views[index];

		if let Some(target) = view.render_target.as_ref().filter(|t| t.name() != IGNORED_RENDER_TARGET_NAME) {
			if !EXPECTED_RENDER_TARGET_NAMES.contains(&target.name()) {
				error!(
					"Found unexpected view family render target \"{}\" {:?} {}x{}. This might cause instability when tagging.",
					target.name(),
					target.native,
					target.extent().x,
					target.extent().y
				);
			}
			tracked.backing = Some(target.native);
		}
		tracked.view_rect = view.view_rect;
		tracked.unscaled_view_rect = view.unscaled_view_rect;
		tracked.unconstrained_view_rect = view.unconstrained_view_rect;

		self.log("add_tracked_view");
	}

	/// Forgets all views rendering into `backbuffer`, since it is about to be resized or destroyed.
	pub fn untrack_views_for_backbuffer(&mut self, backbuffer: NativeHandle) {
		if backbuffer.is_null() {
			return;
		}
		let log = self.log_tracked_views;
		self.views.retain(|tracked| {
			let remove = tracked.backing == Some(backbuffer);
			if remove && log {
				info!(view_key = tracked.view_key, ?backbuffer, "Untracking backbuffer");
			}
			!remove
		});
	}

	/// Removes and returns the views rendering into `backbuffer`, keeping their order. Views of other backbuffers
	/// stay tracked, as each window presents separately.
	///
	/// If `tag_index` is set and the claimed views have an entry at that index, only that one is returned.
	pub fn claim_views_for_backbuffer(&mut self, backbuffer: NativeHandle, tag_index: Option<usize>) -> ClaimedViews {
		let mut claimed = ClaimedViews::new();
		if backbuffer.is_null() {
			return claimed;
		}
		self.views.retain(|tracked| {
			if tracked.backing == Some(backbuffer) {
				claimed.push(*tracked);
				false
			} else {
				true
			}
		});

		if let Some(view) = tag_index.and_then(|index| claimed.get(index).copied()) {
			claimed.clear();
			claimed.push(view);
		}

		if self.log_tracked_views {
			info!(
				?backbuffer,
				claimed = ?claimed.iter().map(|v| v.view_key).collect::<SmallVec<[u32; 4]>>(),
				"Views in this backbuffer"
			);
			self.log("claim_views_for_backbuffer");
		}
		claimed
	}

	fn log(&self, call_site: &str) {
		if !self.log_tracked_views {
			return;
		}
		let views = self
			.views
			.iter()
			.map(|v| {
				format!(
					"{} [{},{} -> {},{}] ({}x{}) {:?}",
					v.view_key,
					v.view_rect.min.x,
					v.view_rect.min.y,
					v.view_rect.max.x,
					v.view_rect.max.y,
					v.view_rect.width(),
					v.view_rect.height(),
					v.backing
				)
			})
			.collect::<Vec<_>>()
			.join(", ");
		info!("{:2} {} {}", self.views.len(), call_site, views);
	}
}
