// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Plain-text summary report.
//!
//! Absent values print as `n/a`; they are never rendered as zero.

use crate::charts::ChartContext;
use crate::error::Result;
use chrono::{DateTime, Utc};
use loadscope_analysis::{ClusterSummary, ScenarioAnalysis, Scorecard, AXES};
use loadscope_core::{MetricRecord, ScenarioDataset, TestProfile, ViewMode};
use std::fmt::Write;

const SINGLE_WIDTH: usize = 70;
const MULTI_WIDTH: usize = 80;

/// Render the text report for a campaign.
pub fn render_text_report(ctx: &ChartContext<'_>, generated_at: DateTime<Utc>) -> Result<String> {
    let mut out = String::new();
    match ctx.view.mode() {
        ViewMode::SingleCampaign => single_report(&mut out, ctx, generated_at)?,
        ViewMode::MultiScenario => multi_report(&mut out, ctx, generated_at)?,
    }
    Ok(out)
}

fn rule(out: &mut String, ch: char, width: usize) -> Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(width))?;
    Ok(())
}

fn banner(out: &mut String, title: &str, width: usize) -> Result<()> {
    rule(out, '═', width)?;
    writeln!(out, "{title:^width$}")?;
    rule(out, '═', width)?;
    Ok(())
}

fn heading(out: &mut String, title: &str, width: usize) -> Result<()> {
    writeln!(out)?;
    rule(out, '─', width)?;
    writeln!(out, "{title}")?;
    rule(out, '─', width)?;
    Ok(())
}

fn footer(out: &mut String, width: usize) -> Result<()> {
    writeln!(out)?;
    banner(out, "END OF REPORT", width)
}

fn value(v: Option<f64>, precision: usize, unit: &str) -> String {
    match v {
        Some(v) => format!("{v:.precision$}{unit}"),
        None => "n/a".to_string(),
    }
}

fn count(v: Option<u64>) -> String {
    v.map(group_thousands).unwrap_or_else(|| "n/a".to_string())
}

/// `15000` -> `15,000`.
pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn stars(score: Option<u8>) -> String {
    match score {
        Some(n) => {
            let n = usize::from(n.min(5));
            format!("{}{}", "★".repeat(n), "☆".repeat(5 - n))
        }
        None => "n/a".to_string(),
    }
}

fn header_lines(out: &mut String, ctx: &ChartContext<'_>, generated_at: DateTime<Utc>) -> Result<()> {
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    if ctx.view.mode() == ViewMode::MultiScenario {
        writeln!(
            out,
            "Scenarios: {} | Cluster comparison profile: {}",
            ctx.view.len(),
            ctx.analysis.comparison_profile.label()
        )?;
    }
    writeln!(out, "All durations are normalised to milliseconds.")?;
    Ok(())
}

fn cluster_lines(out: &mut String, summary: &ClusterSummary) -> Result<()> {
    if summary.has_replica_data() {
        writeln!(out, "  Autoscaler replicas (pre -> post):")?;
        for change in &summary.replicas {
            if change.pre.is_none() && change.post.is_none() {
                writeln!(out, "    {}: n/a", change.display_name)?;
                continue;
            }
            let bounds = change
                .bounds
                .map(|b| format!(" (min={}, max={})", b.min_replicas, b.max_replicas))
                .unwrap_or_default();
            writeln!(
                out,
                "    {}: {} -> {} replicas{bounds}",
                change.display_name,
                value(change.pre.map(f64::from), 0, ""),
                value(change.post.map(f64::from), 0, ""),
            )?;
        }
    } else {
        writeln!(out, "  Autoscaler: HPA data not available, check cluster was running")?;
    }

    if summary.has_resource_data() {
        writeln!(out, "  Resource usage (post-load average):")?;
        for usage in &summary.resources {
            writeln!(
                out,
                "    {}: CPU {}, Mem {}",
                usage.display_name,
                value(usage.avg_cpu_millicores, 0, "m"),
                value(usage.avg_memory_mebibytes, 0, "Mi"),
            )?;
        }
    } else {
        writeln!(
            out,
            "  Resources: not available, check metrics-server installed (kubectl top pods)"
        )?;
    }
    Ok(())
}

fn estimate_lines(out: &mut String, ctx: &ChartContext<'_>, scenario: &ScenarioAnalysis) -> Result<()> {
    match &scenario.cost {
        Some(cost) => {
            writeln!(out, "  Cost estimate ({}):", ctx.analysis.pod_count_policy)?;
            writeln!(
                out,
                "    Pods: baseline {}, spike {}, blended {:.1}",
                cost.pods.baseline, cost.pods.spike, cost.pods.blended
            )?;
            writeln!(
                out,
                "    {:.2} pod-hours over a {:.0} min run",
                cost.pod_hours, cost.run_minutes
            )?;
        }
        None => writeln!(out, "  Cost estimate: n/a (no pod counts)")?,
    }
    scorecard_lines(out, ctx, &scenario.scorecard)
}

fn scorecard_lines(out: &mut String, ctx: &ChartContext<'_>, scorecard: &Scorecard) -> Result<()> {
    writeln!(out, "  Scorecard estimate ({}):", ctx.analysis.scoring_policy)?;
    for (axis, score) in AXES.iter().zip(scorecard.values()) {
        writeln!(out, "    {axis:<14} {}", stars(score))?;
    }
    Ok(())
}

fn summary_header(out: &mut String, first: &str, width: usize) -> Result<()> {
    writeln!(
        out,
        "{first:<25}{:>12}{:>10}{:>10}{:>8}{:>10}",
        "Throughput", "P95", "Success", "Pods", "Pod-h"
    )?;
    rule(out, '─', width)?;
    Ok(())
}

fn summary_row(
    out: &mut String,
    label: &str,
    record: Option<&MetricRecord>,
    pods: Option<u64>,
    pod_hours: Option<f64>,
) -> Result<()> {
    let success = record.map(|r| r.rates().success_percent);
    writeln!(
        out,
        "{:<25}{:>12}{:>10}{:>10}{:>8}{:>10}",
        truncate(label, 24),
        value(record.and_then(|r| r.requests_per_second), 1, ""),
        value(record.and_then(|r| r.p95_duration_ms), 1, ""),
        value(success, 1, "%"),
        pods.map(|p| p.to_string()).unwrap_or_else(|| "n/a".to_string()),
        value(pod_hours, 2, ""),
    )?;
    Ok(())
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        label.chars().take(max.saturating_sub(1)).chain(['…']).collect()
    }
}

fn single_report(out: &mut String, ctx: &ChartContext<'_>, generated_at: DateTime<Utc>) -> Result<()> {
    let width = SINGLE_WIDTH;
    banner(out, "LOAD TEST ANALYSIS REPORT", width)?;
    header_lines(out, ctx, generated_at)?;

    let Some(dataset) = ctx.view.scenarios().next() else {
        writeln!(out)?;
        writeln!(out, "No load-test output was found.")?;
        return footer(out, width);
    };
    let analysis = ctx.analysis.scenario(dataset.id());

    for profile in TestProfile::ALL {
        let Some(record) = dataset.record(profile) else {
            continue;
        };
        heading(out, &format!("{} TEST", profile.label()), width)?;
        profile_lines(out, record)?;
        if let Some(summary) = analysis.and_then(|a| a.cluster.get(&profile)) {
            writeln!(out)?;
            cluster_lines(out, summary)?;
        }
    }

    let missing: Vec<String> = TestProfile::ALL
        .into_iter()
        .filter(|p| dataset.record(*p).is_none())
        .map(|p| p.label())
        .collect();
    if !missing.is_empty() {
        writeln!(out)?;
        writeln!(out, "Profiles without output: {}", missing.join(", "))?;
    }

    if let Some(analysis) = analysis {
        heading(out, "ESTIMATES", width)?;
        estimate_lines(out, ctx, analysis)?;
    }

    heading(out, "SUMMARY", width)?;
    summary_header(out, "Profile", width)?;
    for (profile, record) in &dataset.profiles {
        let pods = analysis
            .and_then(|a| a.cluster.get(profile))
            .and_then(|c| c.post_total_replicas);
        summary_row(out, &profile.label(), Some(record), pods, None)?;
    }
    footer(out, width)
}

fn profile_lines(out: &mut String, record: &MetricRecord) -> Result<()> {
    let rates = record.rates();
    writeln!(out, "  Throughput:      {}", value(record.requests_per_second, 2, " req/s"))?;
    writeln!(out, "  Total requests:  {}", count(record.total_requests))?;
    writeln!(out, "  Avg latency:     {}", value(record.avg_duration_ms, 2, " ms"))?;
    writeln!(out, "  P95 latency:     {}", value(record.p95_duration_ms, 2, " ms"))?;
    writeln!(out, "  Success rate:    {:.2}%", rates.success_percent)?;
    writeln!(out, "  Failure rate:    {:.2}%", rates.failure_percent)?;
    writeln!(out, "  Max VUs:         {}", count(record.max_virtual_users))?;
    writeln!(out, "  Iterations:      {}", count(record.iterations))?;
    Ok(())
}

fn multi_report(out: &mut String, ctx: &ChartContext<'_>, generated_at: DateTime<Utc>) -> Result<()> {
    let width = MULTI_WIDTH;
    let comparison = ctx.analysis.comparison_profile;
    banner(out, "SCENARIO COMPARISON REPORT", width)?;
    header_lines(out, ctx, generated_at)?;

    for dataset in ctx.view.scenarios() {
        heading(
            out,
            &format!("{}  [{}]", dataset.scenario.display_name, dataset.scenario.dir_name()),
            width,
        )?;
        scenario_lines(out, ctx, dataset, comparison)?;
    }

    heading(out, &format!("SUMMARY ({} profile)", comparison.label()), width)?;
    summary_header(out, "Scenario", width)?;
    for dataset in ctx.view.scenarios() {
        let analysis = ctx.analysis.scenario(dataset.id());
        let pods = analysis
            .and_then(|a| a.cluster.get(&comparison))
            .and_then(|c| c.post_total_replicas);
        let pod_hours = analysis.and_then(|a| a.cost.as_ref()).map(|c| c.pod_hours);
        summary_row(
            out,
            &dataset.scenario.display_name,
            dataset.record(comparison),
            pods,
            pod_hours,
        )?;
    }
    footer(out, width)
}

fn scenario_lines(
    out: &mut String,
    ctx: &ChartContext<'_>,
    dataset: &ScenarioDataset,
    comparison: TestProfile,
) -> Result<()> {
    for profile in TestProfile::ALL {
        let Some(record) = dataset.record(profile) else {
            writeln!(out, "  {:<9} not run", profile.label())?;
            continue;
        };
        let rates = record.rates();
        writeln!(
            out,
            "  {:<9} {} | P95 {} | success {:.1}% | failure {:.2}%",
            profile.label(),
            value(record.requests_per_second, 1, " req/s"),
            value(record.p95_duration_ms, 1, " ms"),
            rates.success_percent,
            rates.failure_percent,
        )?;
    }

    let Some(analysis) = ctx.analysis.scenario(dataset.id()) else {
        return Ok(());
    };
    writeln!(
        out,
        "  Average throughput: {}",
        value(analysis.avg_throughput_rps, 1, " req/s")
    )?;
    writeln!(out)?;
    writeln!(out, "  Cluster at {} profile:", comparison.label())?;
    match analysis.cluster.get(&comparison) {
        Some(summary) => cluster_lines(out, summary)?,
        None => writeln!(
            out,
            "  Autoscaler: HPA data not available, check cluster was running"
        )?,
    }
    writeln!(out)?;
    estimate_lines(out, ctx, analysis)
}
