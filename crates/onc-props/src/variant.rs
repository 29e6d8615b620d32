//! Hardware variant resolution for the onclite board family.
//!
//! Redmi 7 (`onclite`) and Redmi Y3 (`onc`) ship the same image and are
//! told apart at boot by identification properties the bootloader
//! publishes. Depending on the host ROM family the discriminator is
//! either the product certificate or the hardware version string, so both
//! rules are kept; resolution never fails, each rule has a designated
//! fallback SKU.

use crate::store::{PropertyStore, override_property};

/// Boot-time identification properties.
pub const BOOT_CERT_PROP: &str = "ro.boot.product.cert";
pub const BOOT_HWVERSION_PROP: &str = "ro.boot.hwversion";

/// Certificates issued for Redmi 7 units.
const ONCLITE_CERTS: [&str; 3] = ["M1810F6LG", "M1810F6LH", "M1810F6LI"];

/// Only Redmi Y3 ships hardware version 1.19.0.
const ONC_HWVERSION: &str = "1.19.0";

/// Namespace prefixes the ro.product tree is replicated under.
pub const RO_PROP_SOURCES: [&str; 7] = [
    "",
    "odm.",
    "product.",
    "system.",
    "system_ext.",
    "vendor.",
    "vendor_dlkm.",
];

/// Retail SKU of an onclite-family board. Chosen once at boot, immutable
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Redmi 7
    Onclite,
    /// Redmi Y3
    Onc,
}

impl Variant {
    /// Device codename published as ro.product.*name / *device.
    pub fn device(self) -> &'static str {
        match self {
            Variant::Onclite => "onclite",
            Variant::Onc => "onc",
        }
    }

    /// Retail model name published as ro.product.*model.
    pub fn model(self) -> &'static str {
        match self {
            Variant::Onclite => "Redmi 7",
            Variant::Onc => "Redmi Y3",
        }
    }
}

/// Resolve by product certificate. Unknown certificates fall back to the
/// Redmi Y3 SKU.
pub fn resolve_from_cert(cert: &str) -> Variant {
    if ONCLITE_CERTS.contains(&cert) {
        Variant::Onclite
    } else {
        Variant::Onc
    }
}

/// Resolve by hardware version string. Anything but the Y3 version falls
/// back to the Redmi 7 SKU.
pub fn resolve_from_hwversion(hwversion: &str) -> Variant {
    if hwversion == ONC_HWVERSION {
        Variant::Onc
    } else {
        Variant::Onclite
    }
}

/// Resolve the SKU from the boot identification properties: the product
/// certificate when the bootloader published one, the hardware version
/// otherwise.
#[allow(clippy::collapsible_if)] // Avoid if-let chains for MSRV 1.85 compatibility
pub fn resolve(store: &dyn PropertyStore) -> Variant {
    if let Some(cert) = store.get(BOOT_CERT_PROP) {
        if !cert.is_empty() {
            let variant = resolve_from_cert(&cert);
            tracing::info!("Resolved variant {:?} from cert {}", variant, cert);
            return variant;
        }
    }

    let hwversion = store.get(BOOT_HWVERSION_PROP).unwrap_or_default();
    let variant = resolve_from_hwversion(&hwversion);
    tracing::info!(
        "Resolved variant {:?} from hwversion {:?}",
        variant,
        hwversion
    );
    variant
}

/// Override name, device and model across every namespace prefix.
pub fn apply_device_props(store: &mut dyn PropertyStore, variant: Variant) {
    for source in RO_PROP_SOURCES {
        override_property(
            store,
            &format!("ro.product.{}name", source),
            variant.device(),
        );
        override_property(
            store,
            &format!("ro.product.{}device", source),
            variant.device(),
        );
        override_property(
            store,
            &format!("ro.product.{}model", source),
            variant.model(),
        );
    }
}

/// Override only the model across every namespace prefix.
pub fn apply_model_props(store: &mut dyn PropertyStore, variant: Variant) {
    for source in RO_PROP_SOURCES {
        override_property(
            store,
            &format!("ro.product.{}model", source),
            variant.model(),
        );
    }
}

/// Boot entry point: resolve the SKU and publish the full product triple.
pub fn load_vendor_properties(store: &mut dyn PropertyStore) -> Variant {
    let variant = resolve(store);
    apply_device_props(store, variant);
    variant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_cert_table() {
        assert_eq!(resolve_from_cert("M1810F6LG"), Variant::Onclite);
        assert_eq!(resolve_from_cert("M1810F6LH"), Variant::Onclite);
        assert_eq!(resolve_from_cert("M1810F6LI"), Variant::Onclite);
    }

    #[test]
    fn test_cert_fallback() {
        assert_eq!(resolve_from_cert(""), Variant::Onc);
        assert_eq!(resolve_from_cert("M9999XXXX"), Variant::Onc);
        // exact match only
        assert_eq!(resolve_from_cert("m1810f6lg"), Variant::Onc);
    }

    #[test]
    fn test_hwversion_table() {
        assert_eq!(resolve_from_hwversion("1.19.0"), Variant::Onc);
        assert_eq!(resolve_from_hwversion("1.16.0"), Variant::Onclite);
        assert_eq!(resolve_from_hwversion(""), Variant::Onclite);
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::Onclite.device(), "onclite");
        assert_eq!(Variant::Onclite.model(), "Redmi 7");
        assert_eq!(Variant::Onc.device(), "onc");
        assert_eq!(Variant::Onc.model(), "Redmi Y3");
    }

    #[test]
    fn test_resolve_prefers_cert() {
        let mut store = MemoryStore::new();
        store.add(BOOT_CERT_PROP, "M1810F6LH");
        // contradictory hwversion must lose against the certificate
        store.add(BOOT_HWVERSION_PROP, "1.19.0");

        assert_eq!(resolve(&store), Variant::Onclite);
    }

    #[test]
    fn test_resolve_falls_back_to_hwversion() {
        let mut store = MemoryStore::new();
        store.add(BOOT_HWVERSION_PROP, "1.19.0");
        assert_eq!(resolve(&store), Variant::Onc);

        let mut store = MemoryStore::new();
        store.add(BOOT_CERT_PROP, "");
        assert_eq!(resolve(&store), Variant::Onclite);
    }

    #[test]
    fn test_resolve_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(resolve(&store), Variant::Onclite);
    }

    #[test]
    fn test_apply_device_props_writes_full_cross_product() {
        let mut store = MemoryStore::new();
        apply_device_props(&mut store, Variant::Onclite);

        assert_eq!(store.len(), 21);
        assert_eq!(store.get("ro.product.name").as_deref(), Some("onclite"));
        assert_eq!(store.get("ro.product.device").as_deref(), Some("onclite"));
        assert_eq!(store.get("ro.product.model").as_deref(), Some("Redmi 7"));
        assert_eq!(
            store.get("ro.product.vendor_dlkm.model").as_deref(),
            Some("Redmi 7")
        );
        assert_eq!(
            store.get("ro.product.system_ext.device").as_deref(),
            Some("onclite")
        );
    }

    #[test]
    fn test_apply_model_props_writes_model_only() {
        let mut store = MemoryStore::new();
        apply_model_props(&mut store, Variant::Onc);

        assert_eq!(store.len(), 7);
        assert_eq!(store.get("ro.product.model").as_deref(), Some("Redmi Y3"));
        assert_eq!(
            store.get("ro.product.odm.model").as_deref(),
            Some("Redmi Y3")
        );
        assert!(store.get("ro.product.name").is_none());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut store = MemoryStore::new();
        apply_device_props(&mut store, Variant::Onc);
        apply_device_props(&mut store, Variant::Onc);

        assert_eq!(store.len(), 21);
        assert_eq!(store.get("ro.product.model").as_deref(), Some("Redmi Y3"));
    }

    #[test]
    fn test_apply_overrides_existing_values() {
        let mut store = MemoryStore::new();
        store.add("ro.product.model", "placeholder");
        store.add("ro.product.system.name", "generic");

        apply_device_props(&mut store, Variant::Onclite);

        assert_eq!(store.get("ro.product.model").as_deref(), Some("Redmi 7"));
        assert_eq!(
            store.get("ro.product.system.name").as_deref(),
            Some("onclite")
        );
    }

    #[test]
    fn test_load_vendor_properties() {
        let mut store = MemoryStore::new();
        store.add(BOOT_CERT_PROP, "M1810F6LG");

        let variant = load_vendor_properties(&mut store);

        assert_eq!(variant, Variant::Onclite);
        assert_eq!(store.get("ro.product.device").as_deref(), Some("onclite"));
        // boot props plus the 21-key product cross product
        assert_eq!(store.len(), 22);
    }
}
