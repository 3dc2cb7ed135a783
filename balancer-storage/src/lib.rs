//! Typed persistence core for balancer configuration entities.
//!
//! A [`Storage`] is configured once with a store location and hands out
//! independent [`Writer`] and [`Reader`] handles, each with its own
//! connection to the same SQLite file.
//!
//! # Semantics
//!
//! - Writing an identifier that already exists fails with
//!   [`StorageError::AlreadyExists`]; updating or reading one that does not
//!   exist fails with [`StorageError::NotFound`].
//! - Identifiers must be positive; anything else is a
//!   [`StorageError::Validation`] error.
//! - A real server's probe ids and a load balancer's device id are soft
//!   references and are never checked.
//! - The extra-attribute bag is always present on read, possibly empty.
//!
//! ```no_run
//! use balancer_model::{Device, EntityId};
//! use balancer_storage::{Storage, StorageConfig};
//!
//! # fn main() -> balancer_storage::StorageResult<()> {
//! let storage = Storage::new(StorageConfig::new("./db/balancer.db"));
//! storage.get_writer()?.write_device(&Device::new(111, "DeviceName001"))?;
//! let device = storage.get_reader()?.get_device_by_id(EntityId::new(111))?;
//! assert_eq!(device.name, "DeviceName001");
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod persist;
mod reader;
mod storage;
mod writer;

pub use config::{StorageConfig, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_PATH};
pub use error::{StorageError, StorageResult};
pub use persist::{table_for, Persist};
pub use reader::Reader;
pub use storage::Storage;
pub use writer::Writer;
