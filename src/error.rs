use quick_error::quick_error;

quick_error! {
	/// Error emitted by fallible [`DynArr`](crate::DynArr) and [`Storage`](crate::Storage) operations
	#[derive(Debug, Clone, PartialEq, Eq)]
	pub enum Error {
		/// Storage failed to provide room for `requested` elements.
		/// Nothing was modified.
		OutOfMemory { requested: usize } {
			display("failed to allocate room for {} elements", requested)
		}
		/// Requested capacity does not fit into `usize`
		CapacityOverflow {
			display("capacity overflow")
		}
		OutOfBounds { index: usize, len: usize } {
			display("index {} is out of bounds for length {}", index, len)
		}
	}
}
