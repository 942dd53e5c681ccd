/**
This trait abstracts the allocation behind a [`DynArr`](crate::DynArr) from the array's bookkeeping.

Storage only knows about slots: a contiguous run of `capacity()` initialized elements.
How many of those slots hold live elements is tracked by the array itself.

## Example usage

```
use dynarr::{Storage, HeapStorage};

let mut slots = HeapStorage::<u32>::new();
assert_eq!(slots.capacity(), 0);

// grow to exactly 4 slots, new slots are set to the fill value
slots.reallocate(4, 0).unwrap();
slots.slots_mut()[0] = 42;

// shrinking keeps the leading slots intact
slots.reallocate(1, 0).unwrap();
assert_eq!(slots.slots(), &[42]);

slots.release();
assert_eq!(slots.capacity(), 0);
```
*/
pub trait Storage<T: Copy> {
	/// All allocated slots, live or not
	fn slots(&self) -> &[T];
	fn slots_mut(&mut self) -> &mut [T];
	/**
	Number of allocated slots

	This is generally faster (and a bit more readable) than equivalent call to `.slots().len()`.
	*/
	fn capacity(&self) -> usize;
	/**
	Resize the allocation to exactly `cap` slots.

	The first `min(capacity(), cap)` slots keep their contents, slots past the old capacity are set to `fill`.
	On error the storage is left exactly as it was.
	*/
	fn reallocate(&mut self, cap: usize, fill: T) -> Result<(), crate::Error>;
	/// Free the allocation altogether, leaving zero slots behind
	fn release(&mut self);
}

mod heap;
pub use heap::*;

mod bounded;
pub use bounded::*;
