#![cfg(test)]

use crate::doubles::{CountingRenderer, backbuffer, post_process_inputs, view};
use crate::frame_gen;
use framegen_bridge_core::context::{FrameGenCreateInfo, WindowInfo, WindowKind};
use framegen_bridge_core::engine::ViewportHandle;
use framegen_bridge_core::pipeline::{CommandQueue, RenderCommand, ResourceRole};
use framegen_bridge_core::settings::Settings;
use framegen_bridge_core::view::Rect;
use glam::IVec2;

fn forced() -> FrameGenCreateInfo {
	FrameGenCreateInfo {
		settings: Settings {
			force_tagging: true,
			..Settings::default()
		},
		..FrameGenCreateInfo::default()
	}
}

fn tagged_views(queue: &CommandQueue) -> Vec<u32> {
	queue
		.iter()
		.filter_map(|command| match command {
			RenderCommand::TagTextures { view, inputs }
				if inputs.iter().any(|input| input.role == ResourceRole::Backbuffer) =>
			{
				Some(view.0)
			}
			_ => None,
		})
		.collect()
}

#[test]
fn test_each_window_presents_its_own_views() -> anyhow::Result<()> {
	let (engine, frame_gen) = frame_gen(forced());
	let renderer = CountingRenderer::default();
	let x = backbuffer(0x100);
	let y = backbuffer(0x200);
	let mut queue = CommandQueue::new();
	for (key, target) in [(1, &x), (2, &y), (3, &x)] {
		frame_gen.post_process(&renderer, &mut queue, 1, &view(key, 0, target), &post_process_inputs(u64::from(key)));
	}
	frame_gen.execute(&mut queue)?;

	let window = WindowInfo {
		kind: WindowKind::Game,
		client_rect: Rect::from_min_size(IVec2::new(0, 24), IVec2::new(1920, 1080)),
		viewport_render_target: None,
	};
	frame_gen.on_backbuffer_ready_to_present(&renderer, &mut queue, &window, &x);
	assert_eq!(tagged_views(&queue), [1, 3]);
	assert_eq!(
		frame_gen.tracked_views().iter().map(|v| v.view_key).collect::<Vec<_>>(),
		[2]
	);
	frame_gen.execute(&mut queue)?;

	frame_gen.on_backbuffer_ready_to_present(&renderer, &mut queue, &window, &y);
	assert_eq!(tagged_views(&queue), [2]);
	frame_gen.execute(&mut queue)?;
	assert!(frame_gen.tracked_views().is_empty());

	for (key, target) in [(1, &x), (2, &y), (3, &x)] {
		assert_eq!(
			engine.tagged(ViewportHandle(key), ResourceRole::Backbuffer),
			Some(target.native)
		);
	}
	Ok(())
}

#[test]
fn test_resized_backbuffer_is_untracked() -> anyhow::Result<()> {
	let (_, frame_gen) = frame_gen(forced());
	let renderer = CountingRenderer::default();
	let x = backbuffer(0x100);
	let mut queue = CommandQueue::new();
	frame_gen.post_process(&renderer, &mut queue, 1, &view(1, 0, &x), &post_process_inputs(1));
	frame_gen.execute(&mut queue)?;

	frame_gen.untrack_views_for_backbuffer(x.native);
	frame_gen.on_backbuffer_ready_to_present(&renderer, &mut queue, &WindowInfo::default(), &x);
	assert!(queue.is_empty());
	Ok(())
}
