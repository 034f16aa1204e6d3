use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::event::Check;
use crate::metrics::constants::{
    APP_NAME_KEY, APP_NAME_LABEL, CRITICAL_FALSE, CRITICAL_KEY, CRITICAL_LABEL, CRITICAL_TRUE,
    DEPLOYMENT_UID_KEY, DEPLOYMENT_UID_NONE, DISPLAY_NAME_LABEL, HOST_KEY, METRICS_SOURCE_KEY,
    NAME_KEY, PRODUCT_ID_KEY, PRODUCT_LABEL, RET_CODE_KEY, SENSU_SOURCE, SERVICE_LABEL,
    STATUS_KEY, SUBPRODUCT_KEY, SUBPRODUCT_LABEL, TAGS_PER_POINT, TARGET_ALIAS_KEY, TYPE_KEY,
};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct MetricTag {
    pub name: String,
    pub value: String,
}

impl MetricTag {
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> MetricTag {
        MetricTag {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Returns `primary` unless it is empty, in which case `fallback`.
#[inline]
#[must_use]
pub fn coalesce<'a>(primary: &'a str, fallback: &'a str) -> &'a str {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}

/// Whether the check carries `critical: "True"`. The comparison is exact, so
/// `"true"` or `"TRUE"` do not count.
#[must_use]
pub fn is_critical(check: &Check) -> bool {
    check.label(CRITICAL_LABEL) == CRITICAL_TRUE
}

/// Build the tag set shared by every point of one event.
///
/// The order is fixed so that output is reproducible; consumers should not
/// rely on it for meaning. No deduplication happens here.
#[must_use]
pub fn build_tags(check: &Check, hostname: &str) -> Arc<[MetricTag]> {
    let critical = if is_critical(check) {
        CRITICAL_TRUE
    } else {
        CRITICAL_FALSE
    };
    let status = check.status.to_string();
    let product = check.label(PRODUCT_LABEL);
    let service = check.label(SERVICE_LABEL);

    let mut tags = Vec::with_capacity(TAGS_PER_POINT);
    tags.push(MetricTag::new(CRITICAL_KEY, critical));
    tags.push(MetricTag::new(DEPLOYMENT_UID_KEY, DEPLOYMENT_UID_NONE));
    tags.push(MetricTag::new(HOST_KEY, hostname));
    tags.push(MetricTag::new(METRICS_SOURCE_KEY, SENSU_SOURCE));
    tags.push(MetricTag::new(
        NAME_KEY,
        coalesce(check.label(DISPLAY_NAME_LABEL), check.name()),
    ));
    tags.push(MetricTag::new(PRODUCT_ID_KEY, product));
    tags.push(MetricTag::new(RET_CODE_KEY, status.clone()));
    tags.push(MetricTag::new(STATUS_KEY, status));
    tags.push(MetricTag::new(TARGET_ALIAS_KEY, service));
    tags.push(MetricTag::new(TYPE_KEY, SENSU_SOURCE));
    tags.push(MetricTag::new(
        SUBPRODUCT_KEY,
        coalesce(check.label(SUBPRODUCT_LABEL), product),
    ));
    tags.push(MetricTag::new(
        APP_NAME_KEY,
        coalesce(check.label(APP_NAME_LABEL), service),
    ));

    tags.into()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::proptest;

    use super::*;
    use crate::event::ObjectMeta;

    fn check(name: &str, status: u32, labels: &[(&str, &str)]) -> Check {
        Check {
            metadata: ObjectMeta {
                name: name.to_string(),
                labels: labels
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect::<HashMap<_, _>>(),
                ..ObjectMeta::default()
            },
            status,
            ..Check::default()
        }
    }

    fn tag<'a>(tags: &'a [MetricTag], name: &str) -> &'a str {
        tags.iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
            .unwrap_or_else(|| panic!("missing tag {name}"))
    }

    #[test]
    fn test_coalesce() {
        assert_eq!(coalesce("a", "b"), "a");
        assert_eq!(coalesce("", "b"), "b");
        assert_eq!(coalesce("a", ""), "a");
        assert_eq!(coalesce("", ""), "");
    }

    proptest! {
        #[test]
        fn coalesce_prefers_non_empty_primary(primary in ".*", fallback in ".*") {
            let result = coalesce(&primary, &fallback);
            if primary.is_empty() {
                assert_eq!(result, fallback.as_str());
            } else {
                assert_eq!(result, primary.as_str());
            }
        }
    }

    #[test]
    fn test_tag_order() {
        let tags = build_tags(&check("disk", 2, &[]), "h1");
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "critical",
                "deployment_uid",
                "host",
                "metrics_source",
                "name",
                "product_id",
                "ret_code",
                "status",
                "target_alias",
                "type",
                "subproduct",
                "app_name",
            ]
        );
    }

    #[test]
    fn test_tags_without_labels() {
        let tags = build_tags(&check("disk", 1, &[]), "h1");

        assert_eq!(tag(&tags, "critical"), "False");
        assert_eq!(tag(&tags, "deployment_uid"), "none");
        assert_eq!(tag(&tags, "host"), "h1");
        assert_eq!(tag(&tags, "metrics_source"), "sensu");
        assert_eq!(tag(&tags, "name"), "disk");
        assert_eq!(tag(&tags, "product_id"), "");
        assert_eq!(tag(&tags, "ret_code"), "1");
        assert_eq!(tag(&tags, "status"), "1");
        assert_eq!(tag(&tags, "target_alias"), "");
        assert_eq!(tag(&tags, "type"), "sensu");
        assert_eq!(tag(&tags, "subproduct"), "");
        assert_eq!(tag(&tags, "app_name"), "");
    }

    #[test]
    fn test_tags_prefer_explicit_labels() {
        let tags = build_tags(
            &check(
                "disk",
                0,
                &[
                    ("display_name", "Disk usage"),
                    ("product", "svcA"),
                    ("subproduct", "storage"),
                    ("service", "api"),
                    ("app_name", "api-server"),
                ],
            ),
            "h1",
        );

        assert_eq!(tag(&tags, "name"), "Disk usage");
        assert_eq!(tag(&tags, "product_id"), "svcA");
        assert_eq!(tag(&tags, "subproduct"), "storage");
        assert_eq!(tag(&tags, "target_alias"), "api");
        assert_eq!(tag(&tags, "app_name"), "api-server");
    }

    #[test]
    fn test_tags_fall_back() {
        let tags = build_tags(
            &check("disk", 0, &[("product", "svcA"), ("service", "api")]),
            "h1",
        );

        assert_eq!(tag(&tags, "name"), "disk");
        assert_eq!(tag(&tags, "subproduct"), "svcA");
        assert_eq!(tag(&tags, "app_name"), "api");
    }

    #[test]
    fn test_empty_label_falls_back() {
        let tags = build_tags(&check("disk", 0, &[("display_name", "")]), "h1");
        assert_eq!(tag(&tags, "name"), "disk");
    }

    // Only the literal "True" marks a check critical. Other spellings are
    // deliberately treated as non-critical.
    #[test]
    fn test_critical_is_exact_match() {
        assert!(is_critical(&check("disk", 0, &[("critical", "True")])));
        for value in ["true", "TRUE", "yes", "1", " True", ""] {
            let check = check("disk", 0, &[("critical", value)]);
            assert!(!is_critical(&check), "{value:?} should not be critical");
            assert_eq!(tag(&build_tags(&check, "h1"), "critical"), "False");
        }
        assert!(!is_critical(&check("disk", 0, &[])));
    }
}
