//! # Petsocial Repository
//!
//! Data access for the lookup tables:
//!
//! ```text
//! AdminService
//!   ↓  UnitOfWork               (one commit, then SaveChangesInterceptor hooks)
//!   ↓  Arc<dyn LookupRepository>
//! MySqlLookupRepository | InMemoryLookupRepository
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;
pub mod unit_of_work;

pub use memory::{InMemoryLookupRepository, InMemoryLookupRepositoryParameters, LookupTables};
pub use mysql::*;
pub use pool::*;
pub use traits::*;
pub use unit_of_work::UnitOfWork;
