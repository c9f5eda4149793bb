use std::fmt::{Debug, Formatter};

macro_rules! native_handle {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[repr(transparent)]
		#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
		pub struct $name(u64);

		impl $name {
			pub const NULL: Self = Self(0);

			#[inline]
			pub const fn new(raw: u64) -> Self {
				Self(raw)
			}

			#[inline]
			pub const fn raw(self) -> u64 {
				self.0
			}

			#[inline]
			pub const fn is_null(self) -> bool {
				self.0 == 0
			}

			/// Returns `None` for [`Self::NULL`].
			#[inline]
			pub fn non_null(self) -> Option<Self> {
				if self.is_null() {
					None
				} else {
					Some(self)
				}
			}
		}

		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				if self.is_null() {
					write!(f, concat!(stringify!($name), "(null)"))
				} else {
					write!(f, concat!(stringify!($name), "({:#x})"), self.0)
				}
			}
		}
	};
}

native_handle!(
	/// Identity of a native GPU resource, the raw pointer value of an `ID3D12Resource`, `ID3D11Texture2D` or
	/// `IDXGISwapChain`.
	///
	/// A handle never owns nor keeps alive what it points to, it is only ever compared by value. Holding on to one
	/// after the resource was destroyed is fine, it just won't compare equal to anything alive anymore (modulo the
	/// allocator reusing the address, which is why tracked views are dropped when their backbuffer is resized).
	NativeHandle
);

native_handle!(
	/// A native command buffer, `ID3D12GraphicsCommandList` or the immediate `ID3D11DeviceContext`.
	NativeCommandBuffer
);
