//! Database plumbing.
//!
//! The store contract itself lives in `store`; this module only provides
//! construction of the bounded PostgreSQL connection pool that every
//! concurrent domain operation shares.

pub mod pool;
