use crate::Error;

/// Global allocator backed storage
#[derive(Debug, Clone)]
pub struct HeapStorage<T> {
	// every element of the vec is a slot, so `slots.len()` is the capacity
	// as far as the array is concerned; `slots.capacity()` is allocator's business
	slots: Vec<T>,
}
impl<T> HeapStorage<T> {
	pub fn new() -> Self {
		HeapStorage { slots: Vec::new() }
	}
}
impl<T> Default for HeapStorage<T> {
	fn default() -> Self {
		Self::new()
	}
}
impl<T: Copy> super::Storage<T> for HeapStorage<T> {
	fn slots(&self) -> &[T] {
		&self.slots
	}
	fn slots_mut(&mut self) -> &mut [T] {
		&mut self.slots
	}
	fn capacity(&self) -> usize {
		self.slots.len()
	}
	fn reallocate(&mut self, cap: usize, fill: T) -> Result<(), Error> {
		let old = self.slots.len();
		if cap > old {
			// reserve exactly what's asked for, the array does its own doubling;
			// resize() below won't allocate again after this succeeds
			self.slots.try_reserve_exact(cap - old)
				.map_err(|_| Error::OutOfMemory { requested: cap })?;
			self.slots.resize(cap, fill);
		} else {
			self.slots.truncate(cap);
			self.slots.shrink_to_fit();
		}
		Ok(())
	}
	fn release(&mut self) {
		self.slots = Vec::new();
	}
}
