//! # tk205 I/O
//!
//! Getting ASHRAE 205 documents on and off disk.
//!
//! ```text
//! path ──FileFormat──▶ Value ──SchemaValidator──▶ Value ──Loader::bind──▶ Ashrae205
//!  .json / .cbor         (optional, by RS_ID)           factory + sink + config
//! ```
//!
//! The [`Loader`] owns the factory, the diagnostic sink and the
//! [`LoaderConfig`]; every load threads them through a fresh
//! [`BindingContext`](tk205_kernel::BindingContext).

pub mod compare;
pub mod config;
pub mod error;
pub mod format;
pub mod load;
pub mod schema;

pub use compare::{document_digest, near_equal};
pub use config::{LoaderConfig, Tk205Config};
pub use error::{ConfigError, LoadError};
pub use format::{FileFormat, read_document, translate, write_document};
pub use load::Loader;
pub use schema::{SchemaValidator, schema_path};
