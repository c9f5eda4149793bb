use crate::context::FrameGen;
use crate::descriptor::NativeHandle;
use crate::platform::GraphicsBackend;
use std::sync::atomic::Ordering;
use tracing::{error, info};

impl<B: GraphicsBackend> FrameGen<B> {
	/// Number of swapchains currently wrapped in an engine proxy.
	pub fn swapchain_proxy_count(&self) -> i32 {
		self.swapchain_proxies.load(Ordering::Relaxed)
	}

	/// Whether a swapchain created now may be wrapped in an engine proxy.
	pub fn is_swapchain_hooking_allowed(&self) -> bool {
		if !self.backend.supports_frame_generation() {
			return false;
		}

		let settings = self.settings();
		if let Some(max) = settings.max_swapchain_proxies() {
			if i64::from(self.swapchain_proxy_count()) >= i64::from(max) {
				return false;
			}
		}

		if self.host.is_editor {
			return self.is_play_in_editor_active() && settings.enabled_in_play_in_editor();
		}
		true
	}

	/// Call after the host created `swapchain`, possibly through the engine's proxy.
	pub fn on_swapchain_created(&self, swapchain: NativeHandle) {
		self.validate_swapchain_proxy_count("on_swapchain_created enter");
		if self.is_swapchain_proxy(swapchain) {
			let count = self.swapchain_proxies.fetch_add(1, Ordering::Relaxed) + 1;
			info!(?swapchain, count, "Swapchain proxy created");
		}
		self.validate_swapchain_proxy_count("on_swapchain_created leave");
	}

	/// Call before the host destroys `swapchain`.
	pub fn on_swapchain_destroyed(&self, swapchain: NativeHandle) {
		self.validate_swapchain_proxy_count("on_swapchain_destroyed enter");
		if self.is_swapchain_proxy(swapchain) {
			let count = self.swapchain_proxies.fetch_sub(1, Ordering::Relaxed) - 1;
			info!(?swapchain, count, "Swapchain proxy destroyed");
		}
		self.validate_swapchain_proxy_count("on_swapchain_destroyed leave");
	}

	fn is_swapchain_proxy(&self, swapchain: NativeHandle) -> bool {
		match self.engine.native_interface(swapchain) {
			Ok(native) => native != swapchain,
			Err(e) => {
				error!(?swapchain, "Failed to resolve the native swapchain interface: {}", e);
				false
			}
		}
	}

	/// The count going out of range is not fatal, but usually means a swapchain was created or destroyed without
	/// us being notified.
	fn validate_swapchain_proxy_count(&self, call_site: &str) {
		let count = self.swapchain_proxy_count();
		let max = self.settings().max_swapchain_proxies();
		let in_range = count >= 0 && max.map_or(true, |max| i64::from(count) <= i64::from(max));
		if !in_range {
			error!(
				"{} swapchain proxy count {} is outside of the valid range of [0, {}]. This can cause instability, \
				 particularly in the editor when multiple windows are created and destroyed.",
				call_site,
				count,
				max.map_or_else(|| "unlimited".to_string(), |max| max.to_string())
			);
		}
	}
}
