use tracing::{error, info, warn};

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum EngineLogType {
	Info,
	Warn,
	Error,
}

/// Periodically logged by the engine when frame generation is not loaded
const MISSING_FRAME_GEN_NUISANCE: &str = "[operator ()] 'kFeatureDLSS_G' is missing";
const SAME_FRAME_ORIGIN: &str = "[streamline][error]commoninterface.h";
const SAME_FRAME_MESSAGE: &str = "same frame is NOT allowed!";

/// Callback handed to the engine for its log messages. Forwards them to `tracing`, dropping or downgrading known
/// nuisance messages.
pub fn engine_log_sink(log_type: EngineLogType, message: &str) {
	let Some(log_type) = filter_engine_log(log_type, message) else {
		return;
	};
	let message = message.trim_end();
	match log_type {
		EngineLogType::Info => info!(target: "framegen_engine", "[Info]: {}", message),
		EngineLogType::Warn => warn!(target: "framegen_engine", "[Warn]: {}", message),
		EngineLogType::Error => error!(target: "framegen_engine", "[Error]: {}", message),
	}
}

/// The severity a message should be logged with, or `None` if it should be dropped.
pub fn filter_engine_log(log_type: EngineLogType, message: &str) -> Option<EngineLogType> {
	if message.contains(MISSING_FRAME_GEN_NUISANCE) {
		None
	} else if message.contains(SAME_FRAME_ORIGIN) && message.contains(SAME_FRAME_MESSAGE) {
		Some(EngineLogType::Warn)
	} else {
		Some(log_type)
	}
}

/// DXGI success codes that the engine reports through its API error callback
const DXGI_STATUS_CODES: [u32; 7] = [
	0x087A0001, // OCCLUDED
	0x087A0002, // CLIPPED
	0x087A0004, // NO_REDIRECTION
	0x087A0005, // NO_DESKTOP_ACCESS
	0x087A0006, // GRAPHICS_VIDPN_SOURCE_IN_USE
	0x087A0007, // MODE_CHANGED
	0x087A0008, // MODE_CHANGE_IN_PROGRESS
];

pub fn is_dxgi_status(hresult: i32) -> bool {
	DXGI_STATUS_CODES.contains(&(hresult as u32))
}

/// Handles an HRESULT the engine got from a D3D or DXGI call it made on our behalf, like presenting a generated
/// frame. Returns whether it was an actual error.
pub fn handle_api_error(api: &str, hresult: i32) -> bool {
	if is_dxgi_status(hresult) {
		return false;
	}
	error!("Frame generation {}/DXGI error {:#x}", api, hresult as u32);
	true
}
