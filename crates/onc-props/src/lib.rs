//! Boot property glue for the onclite device family
//!
//! The Redmi 7 and Redmi Y3 share one vendor image; this crate decides at
//! boot which SKU the board actually is and stages the `ro.product.*`
//! overrides the platform publishes. The platform property service itself
//! is out of scope; callers hand in any [`PropertyStore`] backend.
//!
//! # Example
//!
//! ```
//! use onc_props::{MemoryStore, load_vendor_properties};
//!
//! let mut store = MemoryStore::new();
//! store.seed_from_cmdline("androidboot.product.cert=M1810F6LG");
//! let variant = load_vendor_properties(&mut store);
//! assert_eq!(variant.model(), "Redmi 7");
//! ```

pub mod store;
pub mod variant;

pub use store::{MemoryStore, PropertyStore, PropsError, override_property};
pub use variant::{
    BOOT_CERT_PROP, BOOT_HWVERSION_PROP, RO_PROP_SOURCES, Variant, apply_device_props,
    apply_model_props, load_vendor_properties, resolve, resolve_from_cert, resolve_from_hwversion,
};
