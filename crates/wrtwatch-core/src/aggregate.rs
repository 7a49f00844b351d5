// ── Aggregator ──
//
// Folds one cycle's per-page results into a single snapshot. Pages are
// applied in fetch order so later pages overwrite earlier ones on key
// collision. A failed page is logged and skipped; the cycle only fails when
// nothing at all came back.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::CoreError;
use crate::model::{FieldMap, Snapshot};

/// A page that produced no field map this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: String,
    pub reason: String,
}

/// Merge page results in order.
pub fn merge<I>(results: I) -> Result<Snapshot, CoreError>
where
    I: IntoIterator<Item = Result<FieldMap, PageFailure>>,
{
    let mut fields = BTreeMap::new();
    let mut pages = 0_usize;

    for result in results {
        pages += 1;
        match result {
            Ok(map) => fields.extend(map),
            Err(failure) => {
                warn!(page = %failure.page, reason = %failure.reason, "skipping failed page");
            }
        }
    }

    if fields.is_empty() {
        return Err(CoreError::NoData { pages });
    }
    Ok(Snapshot::from_fields(fields))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::model::FieldValue;

    fn failed(page: &str) -> Result<FieldMap, PageFailure> {
        Err(PageFailure {
            page: page.into(),
            reason: "HTTP 500".into(),
        })
    }

    #[test]
    fn later_pages_overwrite() {
        let snap = merge([
            Ok(decode("{lan_ip::10.0.0.1}{uptime::a}")),
            Ok(decode("{uptime::b}")),
        ])
        .unwrap();
        assert_eq!(snap.scalar("uptime"), Some("b"));
        assert_eq!(snap.scalar("lan_ip"), Some("10.0.0.1"));
    }

    #[test]
    fn failed_page_is_skipped() {
        let snap = merge([failed("Status_Lan.live.asp"), Ok(decode("{wl_radio::active}"))]).unwrap();
        assert_eq!(snap.get("wl_radio"), Some(&FieldValue::from("active")));
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn all_failed_or_empty_is_no_data() {
        let err = merge([failed("a"), Ok(decode("<html></html>")), failed("b")]).unwrap_err();
        assert!(matches!(err, CoreError::NoData { pages: 3 }));

        let err = merge(std::iter::empty()).unwrap_err();
        assert!(matches!(err, CoreError::NoData { pages: 0 }));
    }
}
