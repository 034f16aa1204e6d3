/// Number of points appended to an event per invocation.
pub const POINTS_PER_EVENT: usize = 4;

/// Number of tags attached to every point.
pub const TAGS_PER_POINT: usize = 12;

pub const DURATION_SUFFIX: &str = ".integerType.duration";
pub const INTERVAL_SUFFIX: &str = ".integerType.interval";
pub const STATUS_INT_SUFFIX: &str = ".integerType.status_int";
pub const VALUE_SUFFIX: &str = ".integerType.value";

// Check labels read by the mutator
pub const CRITICAL_LABEL: &str = "critical";
pub const DISPLAY_NAME_LABEL: &str = "display_name";
pub const PRODUCT_LABEL: &str = "product";
pub const SUBPRODUCT_LABEL: &str = "subproduct";
pub const SERVICE_LABEL: &str = "service";
pub const APP_NAME_LABEL: &str = "app_name";

/// The only label value that marks a check critical. Matching is exact and
/// case-sensitive: `true` and `TRUE` are not critical.
pub const CRITICAL_TRUE: &str = "True";
pub const CRITICAL_FALSE: &str = "False";

// Tag keys, in emission order
pub const CRITICAL_KEY: &str = "critical";
pub const DEPLOYMENT_UID_KEY: &str = "deployment_uid";
pub const HOST_KEY: &str = "host";
pub const METRICS_SOURCE_KEY: &str = "metrics_source";
pub const NAME_KEY: &str = "name";
pub const PRODUCT_ID_KEY: &str = "product_id";
pub const RET_CODE_KEY: &str = "ret_code";
pub const STATUS_KEY: &str = "status";
pub const TARGET_ALIAS_KEY: &str = "target_alias";
pub const TYPE_KEY: &str = "type";
pub const SUBPRODUCT_KEY: &str = "subproduct";
pub const APP_NAME_KEY: &str = "app_name";

pub const DEPLOYMENT_UID_NONE: &str = "none";
pub const SENSU_SOURCE: &str = "sensu";
