//! # Waypost Opaque Identifier Crate
//!
//! Reversible encoding of integer row identifiers into short, URL-safe
//! opaque strings. URLs and API responses carry the opaque form; only the
//! backend, which holds the codec configuration, can map it back to the
//! underlying primary key.
//!
//! The codec is configured once (salt, minimum length, alphabet), validated
//! at construction, and immutable afterwards. Encoding never fails; decoding
//! returns `None` for anything the codec did not itself produce.
//!
//! ## Usage
//!
//! ```
//! use waypost_opaque_id::{OpaqueIdCodec, OpaqueIdConfig};
//!
//! let codec = OpaqueIdCodec::new(&OpaqueIdConfig::new("secret salt", 8)).unwrap();
//! let opaque = codec.encode(42);
//! assert!(opaque.len() >= 8);
//! assert_eq!(codec.decode(&opaque), Some(42));
//! assert_eq!(codec.decode("not-a-real-hash"), None);
//! ```

pub mod codec;
pub mod config;
pub mod entity;

pub use codec::OpaqueIdCodec;
pub use config::{CodecError, OpaqueIdConfig};
pub use entity::OpaqueKeyed;
