//! Fixed-capacity slot arena for particles and ambience primitives.
//!
//! A [`Pool`] owns a slot vector that is only ever reallocated through
//! [`Pool::reset_with`] or [`Pool::resize`]. Steady-state frames insert into
//! free slots and release them in place without touching the slot storage.

/// Slot arena with a fixed capacity.
#[derive(Clone, Debug)]
pub struct Pool<T> {
	slots: Vec<Option<T>>,
	live: usize,
}

impl<T> Default for Pool<T> {
	fn default() -> Self {
		Self::with_capacity(0)
	}
}

impl<T> Pool<T> {
	/// Creates an empty pool with `capacity` free slots.
	pub fn with_capacity(capacity: usize) -> Self {
		let mut pool = Self {
			slots: Vec::new(),
			live: 0,
		};
		pool.resize(capacity);
		pool
	}

	/// Reallocates to exactly `count` slots and fills every one of them.
	pub fn reset_with(&mut self, count: usize, mut make: impl FnMut() -> T) {
		self.slots = (0..count).map(|_| Some(make())).collect();
		self.live = count;
	}

	/// Discards every entry and reallocates to `capacity` empty slots.
	pub fn resize(&mut self, capacity: usize) {
		let mut slots = Vec::with_capacity(capacity);
		slots.resize_with(capacity, || None);
		self.slots = slots;
		self.live = 0;
	}

	/// Drops every live entry, keeping the capacity.
	pub fn clear(&mut self) {
		self.slots.iter_mut().for_each(|slot| *slot = None);
		self.live = 0;
	}

	/// Stores `value` in the first free slot. Returns `None` when the pool is full.
	pub fn insert(&mut self, value: T) -> Option<usize> {
		let index = self.slots.iter().position(Option::is_none)?;
		self.slots[index] = Some(value);
		self.live += 1;
		Some(index)
	}

	/// Keeps the entries for which `keep` returns `true` and frees the rest.
	pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
		for slot in &mut self.slots {
			if let Some(value) = slot {
				if !keep(value) {
					*slot = None;
					self.live -= 1;
				}
			}
		}
	}

	#[cfg(test)]
	pub fn get(&self, index: usize) -> Option<&T> {
		self.slots.get(index).and_then(Option::as_ref)
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		self.slots.get_mut(index).and_then(Option::as_mut)
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> {
		self.slots.iter().filter_map(Option::as_ref)
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
		self.slots.iter_mut().filter_map(Option::as_mut)
	}

	/// Number of live entries.
	pub fn len(&self) -> usize {
		self.live
	}

	pub fn is_empty(&self) -> bool {
		self.live == 0
	}

	pub fn is_full(&self) -> bool {
		self.live == self.slots.len()
	}

	#[cfg(test)]
	pub fn capacity(&self) -> usize {
		self.slots.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_until_full() {
		let mut pool = Pool::with_capacity(2);
		assert_eq!(pool.insert('a'), Some(0));
		assert_eq!(pool.insert('b'), Some(1));
		assert!(pool.is_full());
		assert_eq!(pool.insert('c'), None);
		assert_eq!(pool.len(), 2);
	}

	#[test]
	fn retain_frees_slots_for_reuse() {
		let mut pool = Pool::with_capacity(3);
		for v in [1, 2, 3] {
			pool.insert(v);
		}
		pool.retain(|v| *v != 2);
		assert_eq!(pool.len(), 2);
		assert_eq!(pool.get(1), None);
		assert_eq!(pool.insert(9), Some(1));
		assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![1, 9, 3]);
	}

	#[test]
	fn retain_can_mutate() {
		let mut pool = Pool::with_capacity(2);
		pool.insert(1.0);
		pool.insert(0.1);
		pool.retain(|life| {
			*life -= 0.5;
			*life > 0.0
		});
		assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![0.5]);
	}

	#[test]
	fn reset_with_fills_every_slot() {
		let mut pool = Pool::with_capacity(1);
		pool.insert(0);
		let mut next = 10;
		pool.reset_with(4, || {
			next += 1;
			next
		});
		assert_eq!(pool.capacity(), 4);
		assert_eq!(pool.len(), 4);
		assert!(pool.is_full());
		assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![11, 12, 13, 14]);
	}

	#[test]
	fn resize_and_clear_empty_the_pool() {
		let mut pool: Pool<u8> = Pool::default();
		assert_eq!(pool.insert(1), None);
		pool.resize(5);
		pool.insert(1);
		pool.insert(2);
		pool.clear();
		assert!(pool.is_empty());
		assert_eq!(pool.capacity(), 5);
		if let Some(v) = pool.get_mut(0) {
			*v = 3;
		}
		assert_eq!(pool.get(0), None);
	}

	#[test]
	fn with_capacity_starts_empty() {
		let pool: Pool<u8> = Pool::with_capacity(3);
		assert_eq!(pool.capacity(), 3);
		assert!(pool.is_empty());
		assert!(!pool.is_full());
	}
}
