/*!
Contiguous growable array of `Copy` elements.

Capacity always is either zero or a power of two, grows by doubling on demand
and only ever goes down when explicitly asked to via [`DynArr::shrink()`].
On top of the usual push/pop this array can insert and remove whole runs of elements at arbitrary positions,
either preserving the order of what's left ([`DynArr::remove_n()`])
or trading it for O(n) instead of O(len) work ([`DynArr::swap_remove_n()`]).

```
use dynarr::DynArr;

let mut a = DynArr::<u8>::new();
a.append_n(b"world").unwrap();
a.insert_n(0, b"hello, ").unwrap();
a.append(b'!').unwrap();
assert_eq!(a.as_slice(), b"hello, world!");
assert_eq!(a.capacity(), 16);
```
*/

use std::cmp;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
// https://github.com/rust-lang/rust/issues/54236
use copy_in_place::*;
use tracing::{debug, trace};

mod error;
pub use error::*;

mod storage;
pub use storage::*;

pub struct DynArr<T, S = HeapStorage<T>> {
	storage: S,
	// number of live elements at the start of `storage`
	len: usize,
	_item: PhantomData<T>,
}

pub struct DynArrBuilder {
	capacity: usize,
}
impl DynArrBuilder {
	pub fn new() -> Self {
		DynArrBuilder {
			capacity: 0,
		}
	}

	/// Allocate room for at least `cap` elements upfront
	pub fn capacity(mut self, cap: usize) -> Self {
		self.capacity = cap;
		self
	}

	pub fn build<T: Copy + Default>(self) -> Result<DynArr<T>, Error> {
		self.build_in(HeapStorage::new())
	}

	pub fn build_in<T, S>(self, storage: S) -> Result<DynArr<T, S>, Error>
	where T: Copy + Default, S: Storage<T>
	{
		let mut arr = DynArr::with_storage(storage);
		arr.ensure_capacity(self.capacity)?;
		Ok(arr)
	}
}
impl Default for DynArrBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// what goes into freshly opened slots
enum Fill<'a, T> {
	Items(&'a [T]),
	Default(usize),
}
impl<'a, T: Copy + Default> Fill<'a, T> {
	fn len(&self) -> usize {
		match self {
			Fill::Items(items) => items.len(),
			Fill::Default(n) => *n,
		}
	}
	fn write(self, dst: &mut [T]) {
		match self {
			Fill::Items(items) => dst.copy_from_slice(items),
			Fill::Default(_) => {
				for slot in dst { *slot = T::default(); }
			},
		}
	}
}

impl<T: Copy + Default, S: Storage<T> + Default> DynArr<T, S> {
	/// Create an empty array; nothing is allocated until first use
	pub fn new() -> Self {
		Self::with_storage(S::default())
	}
}

impl<T: Copy + Default, S: Storage<T> + Default> Default for DynArr<T, S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Copy + Default, S: Storage<T>> DynArr<T, S> {
	/**
	Create an empty array on top of `storage`.

	Slots already allocated by `storage` are reused as spare capacity if there's a power of two of them,
	otherwise they are released.
	*/
	pub fn with_storage(mut storage: S) -> Self {
		let cap = storage.capacity();
		if cap != 0 && !cap.is_power_of_two() {
			debug!(cap, "releasing storage with non power of two capacity");
			storage.release();
		}
		DynArr {
			storage,
			len: 0,
			_item: PhantomData,
		}
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of elements the array can hold without reallocating
	pub fn capacity(&self) -> usize {
		self.storage.capacity()
	}

	/// Size of a single element in bytes
	pub fn element_size(&self) -> usize {
		mem::size_of::<T>()
	}

	pub fn storage(&self) -> &S {
		&self.storage
	}

	/// Live elements of the array.
	/// This slice is only valid until another call to one of the array's methods that accepts `&mut self`.
	pub fn as_slice(&self) -> &[T] {
		&self.storage.slots()[ .. self.len ]
	}

	pub fn as_mut_slice(&mut self) -> &mut [T] {
		let len = self.len;
		&mut self.storage.slots_mut()[ .. len ]
	}

	/// Bounds-checked access, `None` if `index` is past the last element
	pub fn get(&self, index: usize) -> Option<&T> {
		self.as_slice().get(index)
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		self.as_mut_slice().get_mut(index)
	}

	/**
	Make sure the array can hold at least `n` elements.

	Does nothing if there's enough room already.
	Otherwise capacity is doubled (starting with 1) until it's at least `n`,
	just like rust's vec/raw_vec do, so that series of appends costs O(1) amortized.
	If allocation fails, the array remains untouched.
	*/
	pub fn ensure_capacity(&mut self, n: usize) -> Result<(), Error> {
		let cap = self.capacity();
		if n <= cap {
			return Ok(());
		}
		let mut new_cap = cmp::max(cap, 1);
		while new_cap < n {
			new_cap = new_cap.checked_mul(2).ok_or(Error::CapacityOverflow)?;
		}
		if let Err(err) = self.storage.reallocate(new_cap, T::default()) {
			debug!(%err, cap, "failed to grow storage");
			return Err(err);
		}
		trace!(from = cap, to = new_cap, "grew storage");
		Ok(())
	}

	/// Make sure the array can hold at least `n` more elements
	pub fn reserve(&mut self, n: usize) -> Result<(), Error> {
		let n = self.len.checked_add(n).ok_or(Error::CapacityOverflow)?;
		self.ensure_capacity(n)
	}

	fn append_with(&mut self, fill: Fill<T>) -> Result<&mut [T], Error> {
		let n = fill.len();
		self.reserve(n)?;
		let start = self.len;
		let region = &mut self.storage.slots_mut()[ start .. (start+n) ];
		fill.write(region);
		self.len += n;
		Ok(region)
	}

	/// Copy `items` past the last element, returning the newly appended part of the array
	pub fn append_n(&mut self, items: &[T]) -> Result<&mut [T], Error> {
		self.append_with(Fill::Items(items))
	}

	/// Append `n` default-valued (for plain numbers, zeroed) elements
	pub fn append_default(&mut self, n: usize) -> Result<&mut [T], Error> {
		self.append_with(Fill::Default(n))
	}

	pub fn append(&mut self, item: T) -> Result<&mut T, Error> {
		let region = self.append_n(&[item])?;
		Ok(&mut region[0])
	}

	/*
	before:
	|abcdef  |
	    |index

	after inserting n=2:
	|abcXYdef|
	    ||return value
	*/
	fn insert_with(&mut self, index: usize, fill: Fill<T>) -> Result<&mut [T], Error> {
		let len = self.len;
		if index >= len {
			return Err(Error::OutOfBounds { index, len });
		}
		let n = fill.len();
		if n == 0 {
			return Ok(&mut self.storage.slots_mut()[ index .. index ]);
		}
		self.reserve(n)?;
		let slots = self.storage.slots_mut();
		copy_in_place(slots, index..len, index + n);
		let gap = &mut slots[ index .. (index+n) ];
		fill.write(gap);
		self.len += n;
		Ok(gap)
	}

	/**
	Insert `items` in front of the element at `index`, shifting it and everything after it to the right.

	`index` must point to an existing element, use [`append_n()`](#method.append_n) to extend the tail.
	Returns the inserted part of the array.
	*/
	pub fn insert_n(&mut self, index: usize, items: &[T]) -> Result<&mut [T], Error> {
		self.insert_with(index, Fill::Items(items))
	}

	/// Like [`insert_n()`](#method.insert_n), but opens a gap of `n` default-valued elements
	pub fn insert_default(&mut self, index: usize, n: usize) -> Result<&mut [T], Error> {
		self.insert_with(index, Fill::Default(n))
	}

	pub fn insert(&mut self, index: usize, item: T) -> Result<&mut T, Error> {
		let region = self.insert_n(index, &[item])?;
		Ok(&mut region[0])
	}

	/**
	Remove up to `n` elements starting at `index`, shifting the rest to the left to close the gap.

	Order of remaining elements is preserved.
	Does nothing if `n` is zero or `index` is past the last element.
	*/
	pub fn remove_n(&mut self, index: usize, n: usize) {
		let len = self.len;
		if n == 0 || index >= len || self.capacity() == 0 {
			return;
		}
		if n >= len - index {
			// removed range covers the tail, nothing to move
			self.len = index;
			return;
		}
		copy_in_place(self.storage.slots_mut(), (index+n)..len, index);
		self.len -= n;
	}

	pub fn remove(&mut self, index: usize) -> Option<T> {
		let item = *self.get(index)?;
		self.remove_n(index, 1);
		Some(item)
	}

	/// Remove up to `n` last elements
	pub fn pop_n(&mut self, n: usize) {
		self.len = self.len.saturating_sub(n);
	}

	pub fn pop(&mut self) -> Option<T> {
		let item = *self.as_slice().last()?;
		self.len -= 1;
		Some(item)
	}

	/*
	before, removing n=2 at index=1:
	|abcdefg|
	  ||  ||moved
	  |gap

	after:
	|afgde|

	if there are fewer than n survivors past the gap, all of them are moved,
	which is the same as order-preserving removal:
	|abcde| → index=1, n=3 → |ae|
	*/
	/**
	Remove up to `n` elements starting at `index`, filling the gap with elements from the end of the array.

	This takes O(n) regardless of array length, but does not preserve order of remaining elements.
	Does nothing if `n` is zero or `index` is past the last element.
	*/
	pub fn swap_remove_n(&mut self, index: usize, n: usize) {
		let len = self.len;
		if n == 0 || index >= len || self.capacity() == 0 {
			return;
		}
		let n = cmp::min(n, len - index);
		let survivors = len - (index+n);
		let moved = cmp::min(n, survivors);
		if moved != 0 {
			copy_in_place(self.storage.slots_mut(), (len-moved)..len, index);
		}
		self.len -= n;
	}

	pub fn swap_remove(&mut self, index: usize) -> Option<T> {
		let item = *self.get(index)?;
		self.swap_remove_n(index, 1);
		Some(item)
	}

	/// Remove all elements, keeping allocated capacity
	pub fn clear(&mut self) {
		self.len = 0;
	}

	/**
	Reallocate to the smallest power of two that fits both `min_cap` and current elements.

	This is advisory: allocation failure is ignored and leaves capacity as it was.
	Array that has never allocated is left alone,
	and once allocated the array never goes below a single slot (use [`destroy()`](#method.destroy) for that).
	*/
	pub fn shrink(&mut self, min_cap: usize) {
		let cap = self.capacity();
		if cap == 0 {
			return;
		}
		let floor = cmp::max(min_cap, self.len);
		let mut new_cap: usize = 1;
		while new_cap < floor {
			new_cap = match new_cap.checked_mul(2) {
				Some(c) => c,
				None => return,
			};
		}
		if new_cap == cap {
			return;
		}
		match self.storage.reallocate(new_cap, T::default()) {
			Ok(()) => trace!(from = cap, to = new_cap, "reallocated storage"),
			Err(err) => debug!(%err, cap, "shrink refused, keeping current capacity"),
		}
	}

	/// Free the storage, leaving the array empty and ready for reuse
	pub fn destroy(&mut self) {
		self.storage.release();
		self.len = 0;
	}
}

impl<T: Copy + Default + fmt::Debug, S: Storage<T>> fmt::Debug for DynArr<T, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DynArr")
			.field("items", &self.as_slice())
			.field("capacity", &self.capacity())
			.finish()
	}
}
