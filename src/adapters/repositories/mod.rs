pub(crate) mod conversation_repository;

use std::marker::PhantomData;

use sqlx::SqlitePool;

/// Store for one kind of domain value. Queries live in per-type `impl` blocks.
pub struct Repository<A> {
	pub(crate) pool: SqlitePool,
	pub _phantom: PhantomData<A>,
}

impl<A> Repository<A> {
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			pool,
			_phantom: Default::default(),
		}
	}
}

impl<A> Clone for Repository<A> {
	fn clone(&self) -> Self {
		Self::new(self.pool.clone())
	}
}
