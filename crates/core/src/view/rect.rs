use glam::{IVec2, UVec2};

/// An integer pixel rectangle, `min` inclusive, `max` exclusive.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[must_use]
pub struct Rect {
	pub min: IVec2,
	pub max: IVec2,
}

impl Rect {
	pub const ZERO: Self = Self::new(IVec2::ZERO, IVec2::ZERO);

	#[inline]
	pub const fn new(min: IVec2, max: IVec2) -> Self {
		Self { min, max }
	}

	/// A rect starting at the origin
	#[inline]
	pub fn from_size(size: IVec2) -> Self {
		Self::new(IVec2::ZERO, size)
	}

	#[inline]
	pub fn from_min_size(min: IVec2, size: IVec2) -> Self {
		Self::new(min, min + size)
	}

	#[inline]
	pub fn width(&self) -> i32 {
		self.max.x - self.min.x
	}

	#[inline]
	pub fn height(&self) -> i32 {
		self.max.y - self.min.y
	}

	#[inline]
	pub fn size(&self) -> IVec2 {
		self.max - self.min
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.width() <= 0 || self.height() <= 0
	}

	#[inline]
	pub fn offset(self, by: IVec2) -> Self {
		Self::new(self.min + by, self.max + by)
	}
}

impl From<[i32; 4]> for Rect {
	fn from(value: [i32; 4]) -> Self {
		Rect::new(IVec2::new(value[0], value[1]), IVec2::new(value[2], value[3]))
	}
}

impl From<Rect> for [i32; 4] {
	fn from(value: Rect) -> Self {
		[value.min.x, value.min.y, value.max.x, value.max.y]
	}
}

impl From<UVec2> for Rect {
	fn from(value: UVec2) -> Self {
		Rect::from_size(value.as_ivec2())
	}
}
