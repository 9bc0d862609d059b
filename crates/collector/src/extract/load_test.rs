// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Load-generator console summary extraction.
//!
//! The summary block sits at the end of the console output and its lines may
//! be wrapped with indented continuations. Extraction normalises the tail of
//! the log, then runs every field group of [`SCHEMA`] independently: a group
//! that fails to match leaves its fields absent and never affects the others.
//!
//! Each group holds an ordered list of patterns. When the tool's format
//! drifts, append a pattern to the group instead of editing existing ones.

use loadscope_core::MetricRecord;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

/// Collapses a newline followed by indentation into a single space.
static CONTINUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s+").expect("valid pattern"));

/// A named set of fields extracted from one summary line.
struct FieldGroup {
    name: &'static str,
    patterns: Vec<Regex>,
    apply: fn(&Captures<'_>, &mut MetricRecord),
}

impl FieldGroup {
    fn new<P: AsRef<str>>(
        name: &'static str,
        patterns: &[P],
        apply: fn(&Captures<'_>, &mut MetricRecord),
    ) -> Self {
        Self {
            name,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p.as_ref()).expect("valid pattern"))
                .collect(),
            apply,
        }
    }

    fn extract(&self, content: &str, record: &mut MetricRecord) -> bool {
        match self.patterns.iter().find_map(|re| re.captures(content)) {
            Some(caps) => {
                (self.apply)(&caps, record);
                true
            }
            None => false,
        }
    }
}

/// `<label>=<number><unit>` with named groups `<key>` and `<key>_unit`.
fn stat(label: &str, key: &str) -> String {
    format!(r"{label}=(?P<{key}>[\d.\-]+)(?P<{key}_unit>\w+)")
}

fn duration_line(order: &[(&str, &str)]) -> String {
    let stats: Vec<String> = order.iter().map(|(label, key)| stat(label, key)).collect();
    format!(r"http_req_duration.*?{}", stats.join(r"\s+"))
}

const MIN: (&str, &str) = ("min", "min");
const AVG: (&str, &str) = ("avg", "avg");
const MED: (&str, &str) = ("med", "med");
const MAX: (&str, &str) = ("max", "max");
const P90: (&str, &str) = (r"p\(90\)", "p90");
const P95: (&str, &str) = (r"p\(95\)", "p95");
const P99: (&str, &str) = (r"p\(99\)", "p99");

/// Recognised summary fields.
static SCHEMA: Lazy<Vec<FieldGroup>> = Lazy::new(|| {
    vec![
        FieldGroup::new(
            "http_req_duration",
            &[
                duration_line(&[MIN, AVG, MED, MAX, P90, P95]),
                duration_line(&[AVG, MIN, MED, MAX, P90, P95]),
            ],
            |caps, record| {
                record.min_duration_ms = duration(caps, "min");
                record.avg_duration_ms = duration(caps, "avg");
                record.median_duration_ms = duration(caps, "med");
                record.max_duration_ms = duration(caps, "max");
                record.p90_duration_ms = duration(caps, "p90");
                record.p95_duration_ms = duration(caps, "p95");
            },
        ),
        FieldGroup::new(
            "http_req_duration p(99)",
            &[format!(r"http_req_duration[^:]*:[^:]*?{}", stat(P99.0, P99.1))],
            |caps, record| record.p99_duration_ms = duration(caps, "p99"),
        ),
        FieldGroup::new(
            "http_reqs",
            &[r"http_reqs.*?(?P<total>\d+)\s+(?P<rate>[\d.]+)/s"],
            |caps, record| {
                record.total_requests = number(caps, "total");
                record.requests_per_second = number(caps, "rate");
            },
        ),
        FieldGroup::new(
            "checks",
            &[r"checks.*?(?P<pct>\d+(?:\.\d+)?)%"],
            |caps, record| record.success_rate_percent = number(caps, "pct"),
        ),
        FieldGroup::new(
            "http_req_failed",
            &[r"http_req_failed.*?(?P<pct>\d+(?:\.\d+)?)%"],
            |caps, record| record.failure_rate_percent = number(caps, "pct"),
        ),
        FieldGroup::new(
            "vus",
            &[r"vus.*?max=(?P<vus>\d+)", r"vus_max.*?(?P<vus>\d+)"],
            |caps, record| record.max_virtual_users = number(caps, "vus"),
        ),
        FieldGroup::new(
            "iterations",
            &[r"iterations\.{2,}:?\s*(?P<n>\d+)", r"iterations.*?(?P<n>\d+)"],
            |caps, record| record.iterations = number(caps, "n"),
        ),
    ]
});

fn number<T: std::str::FromStr>(caps: &Captures<'_>, key: &str) -> Option<T> {
    caps.name(key)?.as_str().parse().ok()
}

fn duration(caps: &Captures<'_>, key: &str) -> Option<f64> {
    let value: f64 = number(caps, key)?;
    let unit = caps.name(&format!("{key}_unit"))?.as_str();
    to_millis(value, unit)
}

/// Convert a duration with its reported unit to milliseconds.
///
/// Unknown units drop the field rather than guess.
pub fn to_millis(value: f64, unit: &str) -> Option<f64> {
    let factor = match unit {
        "ms" => return Some(value),
        "s" => 1_000.0,
        "us" | "µs" | "μs" => 0.001,
        "ns" => 0.000_001,
        "m" => 60_000.0,
        "h" => 3_600_000.0,
        other => {
            warn!(unit = other, value, "dropping duration with unrecognised unit");
            return None;
        }
    };
    debug!(unit, value, "converting non-millisecond duration");
    Some(value * factor)
}

/// Keep the last `lines` lines and join wrapped continuations.
pub fn normalize_tail(content: &str, lines: usize) -> String {
    let all: Vec<&str> = content.split_inclusive('\n').collect();
    let tail = all[all.len().saturating_sub(lines)..].concat();
    CONTINUATION.replace_all(&tail, " ").into_owned()
}

/// Extract a [`MetricRecord`] from load-generator console output.
///
/// Returns `None` for blank content or when no summary field is present.
/// The returned record always carries reconciled success/failure rates.
pub fn extract_load_test(content: &str, tail_lines: usize) -> Option<MetricRecord> {
    if content.trim().is_empty() {
        return None;
    }
    let summary = normalize_tail(content, tail_lines);

    let mut record = MetricRecord::default();
    for group in SCHEMA.iter() {
        if !group.extract(&summary, &mut record) {
            debug!(group = group.name, "summary field group not found");
        }
    }

    if record.is_empty() {
        debug!("no summary fields recognised in load-test output");
        return None;
    }
    Some(record.with_reconciled_rates())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "\
http_req_duration.....: min=12ms avg=45ms med=40ms max=210ms p(90)=80ms p(95)=120ms
http_reqs......: 15000 250.5/s
http_req_failed.....: 0.50%
";

    #[test]
    fn test_reference_summary() {
        let record = extract_load_test(SUMMARY, 100).unwrap();
        let expected = MetricRecord {
            min_duration_ms: Some(12.0),
            avg_duration_ms: Some(45.0),
            median_duration_ms: Some(40.0),
            max_duration_ms: Some(210.0),
            p90_duration_ms: Some(80.0),
            p95_duration_ms: Some(120.0),
            total_requests: Some(15000),
            requests_per_second: Some(250.5),
            failure_rate_percent: Some(0.50),
            success_rate_percent: Some(99.50),
            ..Default::default()
        };
        assert_eq!(record, expected);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        assert_eq!(extract_load_test(SUMMARY, 100), extract_load_test(SUMMARY, 100));
    }

    #[test]
    fn test_blank_content_yields_none() {
        assert_eq!(extract_load_test("", 100), None);
        assert_eq!(extract_load_test("  \n\t\n", 100), None);
    }

    #[test]
    fn test_unrecognised_content_yields_none() {
        assert_eq!(extract_load_test("hello\nworld\n", 100), None);
    }

    #[test]
    fn test_wrapped_lines_are_joined() {
        let wrapped = "\
     http_req_duration..............: min=1.5ms avg=3ms
       med=2.8ms max=30ms p(90)=5ms
       p(95)=7.25ms p(99)=12ms
";
        let record = extract_load_test(wrapped, 100).unwrap();
        assert_eq!(record.min_duration_ms, Some(1.5));
        assert_eq!(record.p95_duration_ms, Some(7.25));
        assert_eq!(record.p99_duration_ms, Some(12.0));
    }

    #[test]
    fn test_p99_comes_from_request_duration_only() {
        let summary = "\
     http_req_duration..............: avg=12ms min=1ms med=10ms max=80ms p(90)=20ms p(95)=30ms
     http_reqs......................: 1000   33.3/s
     iteration_duration.............: avg=1.1s min=1s med=1s max=2s p(90)=1.5s p(95)=1.7s p(99)=1.9s
";
        let record = extract_load_test(summary, 100).unwrap();
        assert_eq!(record.p95_duration_ms, Some(30.0));
        assert_eq!(record.p99_duration_ms, None);

        let both = summary.replace("p(95)=30ms", "p(95)=30ms p(99)=45ms");
        let record = extract_load_test(&both, 100).unwrap();
        assert_eq!(record.p99_duration_ms, Some(45.0));
    }

    #[test]
    fn test_native_stat_order() {
        let native = "http_req_duration......: avg=45ms min=12ms med=40ms max=210ms p(90)=80ms p(95)=120ms\n";
        let record = extract_load_test(native, 100).unwrap();
        assert_eq!(record.avg_duration_ms, Some(45.0));
        assert_eq!(record.min_duration_ms, Some(12.0));
        assert_eq!(record.p95_duration_ms, Some(120.0));
    }

    #[test]
    fn test_units_are_honoured() {
        let mixed = "http_req_duration: min=850µs avg=1.2s med=900ms max=2s p(90)=1.5s p(95)=1.75s\n";
        let record = extract_load_test(mixed, 100).unwrap();
        assert!((record.min_duration_ms.unwrap() - 0.85).abs() < 1e-9);
        assert_eq!(record.avg_duration_ms, Some(1200.0));
        assert_eq!(record.median_duration_ms, Some(900.0));
        assert_eq!(record.max_duration_ms, Some(2000.0));
    }

    #[test]
    fn test_unknown_unit_drops_only_that_field() {
        let odd = "http_req_duration: min=1ms avg=2ms med=3ms max=1m2s p(90)=5ms p(95)=6ms\n";
        let record = extract_load_test(odd, 100).unwrap();
        assert_eq!(record.max_duration_ms, None);
        assert_eq!(record.p95_duration_ms, Some(6.0));
    }

    #[test]
    fn test_only_tail_is_scanned() {
        let mut log = String::from("checks.....: 12.00% \n");
        for i in 0..150 {
            log.push_str(&format!("progress line {i}\n"));
        }
        log.push_str("http_req_failed....: 2.00%\n");
        let record = extract_load_test(&log, 100).unwrap();
        assert_eq!(record.failure_rate_percent, Some(2.0));
        // The checks line is beyond the tail window and is ignored.
        assert_eq!(record.success_rate_percent, Some(98.0));
    }

    #[test]
    fn test_checks_take_precedence_for_success() {
        let log = "\
checks.........................: 97.00% 970 30
http_req_failed................: 1.00%  10 990
";
        let record = extract_load_test(log, 100).unwrap();
        assert_eq!(record.success_rate_percent, Some(97.0));
        assert_eq!(record.failure_rate_percent, Some(1.0));
    }

    #[test]
    fn test_missing_failure_line_defaults_to_zero() {
        let record = extract_load_test("http_reqs...: 10 1.5/s\n", 100).unwrap();
        assert_eq!(record.failure_rate_percent, Some(0.0));
        assert_eq!(record.success_rate_percent, Some(100.0));
    }

    #[test]
    fn test_vus_and_iterations() {
        let log = "\
iteration_duration.............: avg=1s min=1s med=1s max=1s p(90)=1s p(95)=1s
iterations.....................: 1200   20/s
vus............................: 1      min=1  max=50
vus_max........................: 50     min=50 max=50
";
        let record = extract_load_test(log, 100).unwrap();
        assert_eq!(record.iterations, Some(1200));
        assert_eq!(record.max_virtual_users, Some(50));
    }

    #[test]
    fn test_vus_max_fallback() {
        let record = extract_load_test("vus_max: 200\n", 100).unwrap();
        assert_eq!(record.max_virtual_users, Some(200));
    }

    #[test]
    fn test_to_millis() {
        assert_eq!(to_millis(3.0, "ms"), Some(3.0));
        assert_eq!(to_millis(3.0, "s"), Some(3000.0));
        assert_eq!(to_millis(1.0, "m"), Some(60000.0));
        assert_eq!(to_millis(3.0, "fortnights"), None);
    }

    #[test]
    fn test_normalize_tail_keeps_last_lines() {
        assert_eq!(normalize_tail("a\nb\nc\n", 2), "b\nc\n");
        assert_eq!(normalize_tail("a\n  b\n", 10), "a b\n");
    }
}
