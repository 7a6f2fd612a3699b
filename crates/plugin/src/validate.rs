//! Input validation: raw tool parameters in, typed requests out.
//!
//! Nothing here touches the network.  Missing, `null`, and non-string
//! values for required text parameters all count as empty.

use serde_json::Value;

use ab_domain::config::ActionbookConfig;
use ab_domain::fault::ValidationError;
use ab_domain::request::{AreaId, LookupRequest, ResultLimit, SearchRequest};

/// String argument, or `""` when absent / null / not a string.
fn str_arg<'a>(args: &'a Value, name: &str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or("")
}

/// Numeric view of the `limit` argument.  Accepts integers, integral
/// floats, and numeric strings; everything else is `None`.
fn limit_arg(args: &Value) -> Option<i64> {
    match args.get("limit")? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Resolve the result limit under the lenient policy: anything absent,
/// non-numeric, or outside `[1, max_limit]` becomes `default_limit`.
pub fn resolve_limit(raw: Option<i64>, cfg: &ActionbookConfig) -> ResultLimit {
    let fallback = ResultLimit::within(i64::from(cfg.default_limit), cfg.max_limit)
        .unwrap_or_default();
    match raw {
        None => fallback,
        Some(n) => ResultLimit::within(n, cfg.max_limit).unwrap_or_else(|| {
            tracing::debug!(
                requested = n,
                max = cfg.max_limit,
                used = fallback.get(),
                "limit out of range, using default"
            );
            fallback
        }),
    }
}

/// Validate typed search inputs.
pub fn search(
    query: &str,
    domain: Option<&str>,
    limit: Option<i64>,
    cfg: &ActionbookConfig,
) -> Result<SearchRequest, ValidationError> {
    SearchRequest::new(query, domain, resolve_limit(limit, cfg))
}

/// Validate `search_actions` parameters (`query`, `domain?`, `limit?`).
pub fn search_args(
    args: &Value,
    cfg: &ActionbookConfig,
) -> Result<SearchRequest, ValidationError> {
    if args.get("limit").is_some_and(|v| !v.is_null()) && limit_arg(args).is_none() {
        tracing::debug!(limit = %args["limit"], "non-numeric limit, using default");
    }
    let domain = args.get("domain").and_then(Value::as_str);
    search(str_arg(args, "query"), domain, limit_arg(args), cfg)
}

/// Validate a typed lookup input.
pub fn lookup(area_id: &str) -> Result<LookupRequest, ValidationError> {
    Ok(LookupRequest {
        area_id: AreaId::parse(area_id)?,
    })
}

/// Validate `get_action_by_area_id` parameters (`area_id`).
pub fn lookup_args(args: &Value) -> Result<LookupRequest, ValidationError> {
    lookup(str_arg(args, "area_id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> ActionbookConfig {
        ActionbookConfig::default()
    }

    #[test]
    fn search_requires_query() {
        for args in [
            json!({}),
            json!({"query": ""}),
            json!({"query": "   "}),
            json!({"query": null}),
            json!({"query": 42}),
        ] {
            assert_eq!(
                search_args(&args, &cfg()),
                Err(ValidationError::QueryRequired),
                "{args}"
            );
        }
    }

    #[test]
    fn search_passes_domain_and_limit() {
        let req = search_args(
            &json!({"query": "login", "domain": "github.com", "limit": 3}),
            &cfg(),
        )
        .unwrap();
        assert_eq!(req.query(), "login");
        assert_eq!(req.domain(), Some("github.com"));
        assert_eq!(req.limit().get(), 3);
    }

    #[test]
    fn out_of_range_and_junk_limits_clamp_to_ten() {
        for limit in [
            json!(0),
            json!(-1),
            json!(51),
            json!(1000),
            json!("abc"),
            json!(2.5),
            json!(true),
            json!(null),
        ] {
            let req = search_args(&json!({"query": "q", "limit": limit}), &cfg()).unwrap();
            assert_eq!(req.limit().get(), 10, "limit {limit}");
        }
    }

    #[test]
    fn numeric_strings_and_integral_floats_are_accepted() {
        let req = search_args(&json!({"query": "q", "limit": " 7 "}), &cfg()).unwrap();
        assert_eq!(req.limit().get(), 7);
        let req = search_args(&json!({"query": "q", "limit": 50.0}), &cfg()).unwrap();
        assert_eq!(req.limit().get(), 50);
    }

    #[test]
    fn lookup_requires_area_id() {
        for args in [json!({}), json!({"area_id": "   "}), json!({"area_id": null})] {
            assert_eq!(lookup_args(&args), Err(ValidationError::AreaIdRequired), "{args}");
        }
    }

    #[test]
    fn lookup_rejects_malformed_ids() {
        assert!(matches!(
            lookup_args(&json!({"area_id": "invalid-format"})),
            Err(ValidationError::InvalidAreaIdFormat(_))
        ));
        assert!(matches!(
            lookup_args(&json!({"area_id": "github.com:login"})),
            Err(ValidationError::InvalidAreaIdFormat(_))
        ));
        assert!(matches!(
            lookup_args(&json!({"area_id": ":::"})),
            Err(ValidationError::EmptyAreaIdSegment(_))
        ));
    }

    #[test]
    fn lookup_accepts_arbitrary_segment_characters() {
        let args = json!({"area_id": "example.com:/path?x=1&y=2:button[data-id='a b']"});
        let req = lookup_args(&args).unwrap();
        assert_eq!(req.area_id.site(), "example.com");
    }
}
