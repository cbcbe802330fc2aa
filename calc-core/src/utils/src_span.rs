use std::fmt::Display;

/// Byte range inside a preprocessed input line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	pub fn point(at: u32) -> Self {
		Self { start: at, end: at }
	}

	/// Smallest span covering both `self` and `other`.
	pub fn join(self, other: SrcSpan) -> Self {
		Self {
			start: self.start.min(other.start),
			end: self.end.max(other.end),
		}
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}
