//! Read-only drift detection.

use std::collections::{BTreeMap, BTreeSet};

use excat_catalog::Catalog;
use excat_types::{MethodKey, RESERVED_KEYS, ScanResult, SyncReport, is_reserved};

/// Keys from `keys` that have no catalog entry, in input order.
///
/// A catalog whose backing file does not exist is empty, so every key is
/// reported.
pub fn check_missing(catalog: &Catalog, keys: &[MethodKey]) -> Vec<MethodKey> {
    keys.iter()
        .filter(|key| !catalog.contains(key.as_str()))
        .cloned()
        .collect()
}

/// Non-reserved catalog entries whose key is not in `valid`, with their messages.
pub fn check_unused(catalog: &Catalog, valid: &BTreeSet<MethodKey>) -> BTreeMap<String, String> {
    catalog
        .entries()
        .filter(|(key, _)| !is_reserved(key) && !valid.contains(*key))
        .map(|(key, message)| (key.to_string(), message.to_string()))
        .collect()
}

/// Reserved keys the catalog lacks, in canonical order.
pub fn missing_reserved(catalog: &Catalog) -> Vec<&'static str> {
    RESERVED_KEYS
        .into_iter()
        .filter(|key| !catalog.contains(key))
        .collect()
}

/// Both directions of drift in one pass.
pub fn report(catalog: &Catalog, scan: &ScanResult) -> SyncReport {
    SyncReport {
        missing: check_missing(catalog, &scan.flatten()),
        unused: check_unused(catalog, &scan.key_set()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<MethodKey> {
        raw.iter().map(|k| MethodKey::parse(k).unwrap()).collect()
    }

    #[test]
    fn missing_preserves_input_order() {
        let catalog = Catalog::from_text("b.B.two=2\n");
        let input = keys(&["c.C.three", "b.B.two", "a.A.one"]);
        assert_eq!(check_missing(&catalog, &input), keys(&["c.C.three", "a.A.one"]));
    }

    #[test]
    fn empty_catalog_reports_everything_missing() {
        let input = keys(&["a.A.one", "b.B.two"]);
        assert_eq!(check_missing(&Catalog::in_memory(), &input), input);
    }

    #[test]
    fn unused_skips_reserved_and_valid() {
        let catalog = Catalog::from_text(
            "DEBUG=true\ndefaultMessage=x\nline=l\nshop::Cart.checkout=ok\nshop::Old.gone=stale\n",
        );
        let valid: BTreeSet<MethodKey> = keys(&["shop::Cart.checkout"]).into_iter().collect();

        let unused = check_unused(&catalog, &valid);

        assert_eq!(unused.len(), 1);
        assert_eq!(unused.get("shop::Old.gone").map(String::as_str), Some("stale"));
    }

    #[test]
    fn missing_reserved_lists_absent_ones() {
        let catalog = Catalog::from_text("line=Line\n");
        assert_eq!(missing_reserved(&catalog), ["DEBUG", "defaultMessage"]);
    }

    #[test]
    fn report_combines_directions() {
        let catalog = Catalog::from_text("shop.open=Opening failed\nshop.closed=old\n");
        let mut scan = ScanResult::new();
        scan.insert("shop", "open");
        scan.insert("shop::Cart", "checkout");

        let report = report(&catalog, &scan);

        assert_eq!(report.missing, keys(&["shop::Cart.checkout"]));
        assert_eq!(report.unused.keys().collect::<Vec<_>>(), ["shop.closed"]);
        assert!(!report.is_clean());
    }
}
