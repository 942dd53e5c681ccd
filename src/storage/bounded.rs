/*
Heap storage that refuses to hold more than `limit` slots.

Useful when an array has to live within a memory budget,
and it's also the only way to make allocation failures reproducible:
the global allocator rarely says no, and when it does it tends to say it
to everyone in the process.
*/
use crate::Error;
use super::{Storage, HeapStorage};

#[derive(Debug, Clone)]
pub struct BoundedStorage<T> {
	inner: HeapStorage<T>,
	limit: usize,
}
impl<T> BoundedStorage<T> {
	pub fn with_limit(limit: usize) -> Self {
		BoundedStorage {
			inner: HeapStorage::new(),
			limit,
		}
	}
	/// Maximum number of slots this storage will ever allocate
	pub fn limit(&self) -> usize {
		self.limit
	}
}
impl<T: Copy> Storage<T> for BoundedStorage<T> {
	fn slots(&self) -> &[T] {
		self.inner.slots()
	}
	fn slots_mut(&mut self) -> &mut [T] {
		self.inner.slots_mut()
	}
	fn capacity(&self) -> usize {
		self.inner.capacity()
	}
	fn reallocate(&mut self, cap: usize, fill: T) -> Result<(), Error> {
		if cap > self.limit {
			return Err(Error::OutOfMemory { requested: cap });
		}
		self.inner.reallocate(cap, fill)
	}
	fn release(&mut self) {
		self.inner.release()
	}
}
