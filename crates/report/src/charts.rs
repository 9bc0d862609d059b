// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart builders.
//!
//! One builder per [`ChartKind`]. Builders never fail: when a chart's inputs
//! are missing they return placeholder panels instead.
//!
//! In the single-campaign view the compared series are test profiles; in the
//! multi-scenario view they are scenarios, with profiles as categories.

use crate::chart::{Category, Chart, ChartKind, Panel, PanelKind, Series};
use crate::style::Style;
use loadscope_analysis::{
    CampaignAnalysis, ClusterSummary, PodCounts, ReplicaChange, ResourceUsage, ScenarioAnalysis,
    AXES,
};
use loadscope_core::{CampaignView, Catalog, MetricRecord, ScenarioDataset, TestProfile, ViewMode};

/// Inputs shared by every chart builder.
#[derive(Debug, Clone, Copy)]
pub struct ChartContext<'a> {
    /// Collected data.
    pub view: &'a CampaignView,
    /// Derived values.
    pub analysis: &'a CampaignAnalysis,
    /// Identifier configuration.
    pub catalog: &'a Catalog,
    /// Palette and geometry.
    pub style: &'a Style,
}

type Field = fn(&MetricRecord) -> Option<f64>;

const NO_LOAD_TEST_DATA: &str =
    "Load-test data not available\nCheck that each profile directory holds output.txt";

/// Build one chart.
pub fn build_chart(kind: ChartKind, ctx: &ChartContext<'_>) -> Chart {
    match kind {
        ChartKind::LatencyComparison => latency_comparison(ctx),
        ChartKind::ThroughputComparison => throughput_comparison(ctx),
        ChartKind::SuccessRate => success_rate(ctx),
        ChartKind::AutoscalerScaling => autoscaler_scaling(ctx),
        ChartKind::ResourceUsage => resource_usage(ctx),
        ChartKind::LatencyPercentiles => latency_percentiles(ctx),
        ChartKind::CostEstimate => cost_estimate(ctx),
        ChartKind::ScenarioScorecard => scenario_scorecard(ctx),
    }
}

fn profile_categories(profiles: &[TestProfile]) -> Vec<Category> {
    profiles.iter().map(|p| Category::new(p.label())).collect()
}

fn colored_profile_categories(ctx: &ChartContext<'_>, profiles: &[TestProfile]) -> Vec<Category> {
    profiles
        .iter()
        .map(|p| Category::colored(p.label(), ctx.style.profile_color(*p)))
        .collect()
}

fn scenario_categories(ctx: &ChartContext<'_>) -> Vec<Category> {
    ctx.view
        .scenarios()
        .enumerate()
        .map(|(i, s)| Category::colored(&s.scenario.display_name, ctx.style.series_color(i)))
        .collect()
}

fn metric_values(dataset: &ScenarioDataset, profiles: &[TestProfile], field: Field) -> Vec<Option<f64>> {
    profiles
        .iter()
        .map(|p| dataset.record(*p).and_then(field))
        .collect()
}

/// Profiles as categories, one series per scenario.
fn per_profile_panel(
    ctx: &ChartContext<'_>,
    profiles: &[TestProfile],
    title: &str,
    y_label: &str,
    field: Field,
    unit: &str,
) -> Panel {
    let series = ctx
        .view
        .scenarios()
        .enumerate()
        .map(|(i, s)| {
            Series::new(
                &s.scenario.display_name,
                ctx.style.series_color(i),
                metric_values(s, profiles, field),
            )
        })
        .collect();
    Panel::new(
        title,
        y_label,
        PanelKind::Bars {
            categories: profile_categories(profiles),
            series,
            precision: 1,
            unit: unit.to_string(),
        },
    )
}

fn latency_comparison(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Latency comparison";
    let profiles = ctx.view.profiles();
    if profiles.is_empty() {
        return Chart::new(
            ChartKind::LatencyComparison,
            TITLE,
            vec![Panel::placeholder("Latency", NO_LOAD_TEST_DATA)],
        );
    }

    let stats: [(&str, usize, Field); 3] = [
        ("Mean", 0, |r: &MetricRecord| r.avg_duration_ms),
        ("p90", 3, |r: &MetricRecord| r.p90_duration_ms),
        ("p95", 2, |r: &MetricRecord| r.p95_duration_ms),
    ];

    let panels = match (ctx.view.mode(), ctx.view.scenarios().next()) {
        (ViewMode::SingleCampaign, Some(scenario)) => {
            let series = stats
                .iter()
                .map(|(name, color, field)| {
                    Series::new(
                        *name,
                        ctx.style.series_color(*color),
                        metric_values(scenario, &profiles, *field),
                    )
                })
                .collect();
            vec![Panel::new(
                "Mean, p90 and p95 latency by profile",
                "Latency (ms)",
                PanelKind::Bars {
                    categories: profile_categories(&profiles),
                    series,
                    precision: 1,
                    unit: "ms".to_string(),
                },
            )]
        }
        _ => stats
            .iter()
            .map(|(name, _, field)| {
                per_profile_panel(
                    ctx,
                    &profiles,
                    &format!("{name} latency by profile"),
                    "Latency (ms)",
                    *field,
                    "ms",
                )
            })
            .collect(),
    };
    Chart::new(ChartKind::LatencyComparison, TITLE, panels)
}

fn throughput_comparison(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Throughput comparison";
    let profiles = ctx.view.profiles();
    if profiles.is_empty() {
        return Chart::new(
            ChartKind::ThroughputComparison,
            TITLE,
            vec![Panel::placeholder("Throughput", NO_LOAD_TEST_DATA)],
        );
    }

    let panels = match (ctx.view.mode(), ctx.view.scenarios().next()) {
        (ViewMode::SingleCampaign, Some(scenario)) => vec![
            Panel::new(
                "Throughput by profile",
                "Requests/second",
                PanelKind::Bars {
                    categories: colored_profile_categories(ctx, &profiles),
                    series: vec![Series::new(
                        "req/s",
                        ctx.style.series_color(0),
                        metric_values(scenario, &profiles, |r: &MetricRecord| r.requests_per_second),
                    )],
                    precision: 1,
                    unit: String::new(),
                },
            ),
            Panel::new(
                "Total volume processed",
                "Requests",
                PanelKind::Bars {
                    categories: colored_profile_categories(ctx, &profiles),
                    series: vec![Series::new(
                        "requests",
                        ctx.style.series_color(0),
                        metric_values(scenario, &profiles, |r: &MetricRecord| {
                            r.total_requests.map(|n| n as f64)
                        }),
                    )],
                    precision: 0,
                    unit: String::new(),
                },
            ),
        ],
        _ => {
            let averages = ctx
                .analysis
                .scenarios
                .values()
                .map(|s| s.avg_throughput_rps)
                .collect();
            let volumes = ctx
                .view
                .scenarios()
                .map(|s| {
                    let totals: Vec<u64> =
                        s.profiles.values().filter_map(|r| r.total_requests).collect();
                    (!totals.is_empty()).then(|| totals.iter().sum::<u64>() as f64)
                })
                .collect();
            vec![
                per_profile_panel(
                    ctx,
                    &profiles,
                    "Throughput by profile",
                    "Requests/second",
                    |r: &MetricRecord| r.requests_per_second,
                    "",
                ),
                Panel::new(
                    "Average throughput (untested profiles excluded)",
                    "Requests/second",
                    PanelKind::Bars {
                        categories: scenario_categories(ctx),
                        series: vec![Series::new("avg req/s", ctx.style.series_color(0), averages)],
                        precision: 1,
                        unit: String::new(),
                    },
                ),
                Panel::new(
                    "Total volume across profiles",
                    "Requests",
                    PanelKind::Bars {
                        categories: scenario_categories(ctx),
                        series: vec![Series::new("requests", ctx.style.series_color(0), volumes)],
                        precision: 0,
                        unit: String::new(),
                    },
                ),
            ]
        }
    };
    Chart::new(ChartKind::ThroughputComparison, TITLE, panels)
}

fn stacked_rates(
    ctx: &ChartContext<'_>,
    title: String,
    categories: Vec<Category>,
    rates: Vec<Option<(f64, f64)>>,
) -> Panel {
    Panel::new(
        title,
        "Share of requests (%)",
        PanelKind::Stacked {
            categories,
            series: vec![
                Series::new(
                    "Success",
                    &ctx.style.success_color,
                    rates.iter().map(|r| r.map(|(s, _)| s)).collect(),
                ),
                Series::new(
                    "Failure",
                    &ctx.style.failure_color,
                    rates.iter().map(|r| r.map(|(_, f)| f)).collect(),
                ),
            ],
            max: 100.0,
        },
    )
}

fn success_rate(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Success vs failure";
    let profiles = ctx.view.profiles();
    if profiles.is_empty() {
        return Chart::new(
            ChartKind::SuccessRate,
            TITLE,
            vec![Panel::placeholder("Success rate", NO_LOAD_TEST_DATA)],
        );
    }

    let stacked = |scenario: &ScenarioAnalysis, profile: TestProfile| {
        scenario.rates.get(&profile).map(|rates| rates.stacked())
    };

    let panels = match (ctx.view.mode(), ctx.analysis.scenarios.values().next()) {
        (ViewMode::SingleCampaign, Some(scenario)) => vec![stacked_rates(
            ctx,
            "Success and failure share by profile".to_string(),
            profile_categories(&profiles),
            profiles.iter().map(|p| stacked(scenario, *p)).collect(),
        )],
        _ => profiles
            .iter()
            .map(|profile| {
                stacked_rates(
                    ctx,
                    format!("{} profile", profile.label()),
                    scenario_categories(ctx),
                    ctx.analysis
                        .scenarios
                        .values()
                        .map(|s| stacked(s, *profile))
                        .collect(),
                )
            })
            .collect(),
    };
    Chart::new(ChartKind::SuccessRate, TITLE, panels)
}

/// Captured runs with their category: profiles in the single-campaign view,
/// scenarios at the comparison profile otherwise.
fn cluster_runs<'a>(ctx: &ChartContext<'a>) -> Vec<(Category, &'a ClusterSummary)> {
    match ctx.analysis.mode {
        ViewMode::SingleCampaign => ctx
            .analysis
            .scenarios
            .values()
            .flat_map(|s| s.cluster.iter())
            .map(|(profile, summary)| {
                (
                    Category::colored(profile.label(), ctx.style.profile_color(*profile)),
                    summary,
                )
            })
            .collect(),
        ViewMode::MultiScenario => ctx
            .analysis
            .scenarios
            .values()
            .enumerate()
            .filter_map(|(i, s)| {
                s.cluster.get(&ctx.analysis.comparison_profile).map(|summary| {
                    (
                        Category::colored(&s.scenario.display_name, ctx.style.series_color(i)),
                        summary,
                    )
                })
            })
            .collect(),
    }
}

fn autoscaler_scaling(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Autoscaler replicas before and after load";
    let runs = cluster_runs(ctx);

    let mut panels: Vec<Panel> = ctx
        .catalog
        .autoscalers
        .iter()
        .map(|spec| {
            let changes: Vec<_> = runs
                .iter()
                .map(|(_, summary)| {
                    summary
                        .replicas
                        .iter()
                        .find(|change| change.autoscaler == spec.id)
                })
                .collect();
            let reported = changes
                .iter()
                .flatten()
                .any(|change| change.pre.is_some() || change.post.is_some());
            if !reported {
                return Panel::placeholder(
                    &spec.display_name,
                    format!(
                        "{}: autoscaler data not available\nCheck that the cluster was running during the test",
                        spec.display_name
                    ),
                );
            }

            let pick = |side: fn(&ReplicaChange) -> Option<u32>| -> Vec<Option<f64>> {
                changes
                    .iter()
                    .map(|change| change.and_then(side).map(f64::from))
                    .collect()
            };
            Panel::new(
                format!("{} ({})", spec.display_name, spec.id),
                "Replicas",
                PanelKind::Bars {
                    categories: runs.iter().map(|(category, _)| category.clone()).collect(),
                    series: vec![
                        Series::new("Pre-load", &ctx.style.pre_color, pick(|c: &ReplicaChange| c.pre)),
                        Series::new("Post-load", &ctx.style.post_color, pick(|c: &ReplicaChange| c.post)),
                    ],
                    precision: 0,
                    unit: String::new(),
                },
            )
        })
        .collect();

    if panels.is_empty() {
        panels.push(Panel::placeholder(
            "Autoscalers",
            "No autoscalers configured",
        ));
    }
    Chart::new(ChartKind::AutoscalerScaling, TITLE, panels)
}

fn resource_usage(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Resource usage after load";
    let runs = cluster_runs(ctx);
    let categories: Vec<Category> = ctx
        .catalog
        .services
        .iter()
        .map(|s| Category::new(&s.display_name))
        .collect();

    let panel = |title: &str, y_label: &str, unit: &str, field: fn(&ResourceUsage) -> Option<f64>| {
        let series: Vec<Series> = runs
            .iter()
            .map(|(run, summary)| {
                let values = ctx
                    .catalog
                    .services
                    .iter()
                    .map(|spec| {
                        summary
                            .resources
                            .iter()
                            .find(|usage| usage.service == spec.name)
                            .and_then(field)
                    })
                    .collect();
                Series::new(
                    &run.label,
                    run.color.as_deref().unwrap_or(&ctx.style.muted_color),
                    values,
                )
            })
            .collect();

        if series.iter().any(Series::has_values) {
            Panel::new(
                title,
                y_label,
                PanelKind::Bars {
                    categories: categories.clone(),
                    series,
                    precision: 0,
                    unit: unit.to_string(),
                },
            )
        } else {
            Panel::placeholder(
                title,
                format!(
                    "{title}: data not available\nCheck that metrics-server is installed (kubectl top pods)"
                ),
            )
        }
    };

    Chart::new(
        ChartKind::ResourceUsage,
        TITLE,
        vec![
            panel("CPU by service", "CPU (millicores)", "m", |u: &ResourceUsage| u.avg_cpu_millicores),
            panel("Memory by service", "Memory (Mi)", "Mi", |u: &ResourceUsage| u.avg_memory_mebibytes),
        ],
    )
}

fn ladder_series(
    ctx: &ChartContext<'_>,
    name: &str,
    color: &str,
    record: Option<&MetricRecord>,
) -> Option<Series> {
    let record = record?;
    let values: Vec<Option<f64>> = record
        .latency_ladder()
        .iter()
        .map(|(_, value)| value.map(|v| v.max(ctx.style.log_epsilon)))
        .collect();
    let series = Series::new(name, color, values);
    series.has_values().then_some(series)
}

fn ladder_panel(title: String, series: Vec<Series>) -> Panel {
    if series.is_empty() {
        return Panel::placeholder(title, NO_LOAD_TEST_DATA);
    }
    let categories = MetricRecord::default()
        .latency_ladder()
        .iter()
        .map(|(label, _)| Category::new(*label))
        .collect();
    Panel::new(
        title,
        "Latency (ms, log scale)",
        PanelKind::Lines {
            categories,
            series,
            log_scale: true,
        },
    )
}

fn latency_percentiles(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Latency percentile distribution";
    let profiles = ctx.view.profiles();

    let panels = match (ctx.view.mode(), ctx.view.scenarios().next()) {
        (ViewMode::SingleCampaign, Some(scenario)) => vec![ladder_panel(
            "Latency ladder by profile".to_string(),
            profiles
                .iter()
                .filter_map(|p| {
                    ladder_series(ctx, &p.label(), ctx.style.profile_color(*p), scenario.record(*p))
                })
                .collect(),
        )],
        _ if profiles.is_empty() => vec![ladder_panel("Latency ladder".to_string(), Vec::new())],
        _ => profiles
            .iter()
            .map(|profile| {
                ladder_panel(
                    format!("{} profile", profile.label()),
                    ctx.view
                        .scenarios()
                        .enumerate()
                        .filter_map(|(i, s)| {
                            ladder_series(
                                ctx,
                                &s.scenario.display_name,
                                ctx.style.series_color(i),
                                s.record(*profile),
                            )
                        })
                        .collect(),
                )
            })
            .collect(),
    };
    Chart::new(ChartKind::LatencyPercentiles, TITLE, panels)
        .with_note(format!(
            "Zero values drawn at {} ms to stay on the log scale",
            ctx.style.log_epsilon
        ))
}

fn cost_estimate(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Estimated pod-time cost";
    let note = format!(
        "Estimate ({}), {:.0} min run assumed; not a billing figure",
        ctx.analysis.pod_count_policy, ctx.analysis.run_minutes
    );
    let scenarios: Vec<&ScenarioAnalysis> = ctx.analysis.scenarios.values().collect();
    if scenarios.iter().all(|s| s.cost.is_none()) {
        return Chart::new(
            ChartKind::CostEstimate,
            TITLE,
            vec![Panel::placeholder(
                "Cost",
                "Pod counts not available\nObserved pod counts need autoscaler snapshots",
            )],
        )
        .with_note(note);
    }

    let categories = scenario_categories(ctx);
    let pods = |field: fn(&PodCounts) -> f64| -> Vec<Option<f64>> {
        scenarios
            .iter()
            .map(|s| s.cost.as_ref().map(|c| field(&c.pods)))
            .collect()
    };

    let phases = Panel::new(
        "Active pods by phase",
        "Pods",
        PanelKind::Bars {
            categories: categories
                .iter()
                .map(|c| Category::new(&c.label))
                .collect(),
            series: vec![
                Series::new(
                    "Baseline",
                    ctx.style.profile_color(TestProfile::Baseline),
                    pods(|p: &PodCounts| p.baseline as f64),
                ),
                Series::new(
                    "Spike",
                    ctx.style.profile_color(TestProfile::Spike),
                    pods(|p: &PodCounts| p.spike as f64),
                ),
                Series::new("Blended", ctx.style.series_color(4), pods(|p: &PodCounts| p.blended)),
            ],
            precision: 1,
            unit: String::new(),
        },
    );
    let hours = Panel::new(
        "Estimated pod-hours",
        "Pod-hours",
        PanelKind::Bars {
            categories,
            series: vec![Series::new(
                "pod-hours",
                ctx.style.series_color(0),
                scenarios
                    .iter()
                    .map(|s| s.cost.as_ref().map(|c| c.pod_hours))
                    .collect(),
            )],
            precision: 1,
            unit: "h".to_string(),
        },
    );
    Chart::new(ChartKind::CostEstimate, TITLE, vec![phases, hours]).with_note(note)
}

fn scenario_scorecard(ctx: &ChartContext<'_>) -> Chart {
    const TITLE: &str = "Scenario scorecard";
    let note = format!(
        "Estimate ({}); 5 stars = best",
        ctx.analysis.scoring_policy
    );
    let series: Vec<Series> = ctx
        .analysis
        .scenarios
        .values()
        .enumerate()
        .map(|(i, s)| {
            Series::new(
                &s.scenario.display_name,
                ctx.style.series_color(i),
                s.scorecard
                    .values()
                    .iter()
                    .map(|v| v.map(f64::from))
                    .collect(),
            )
        })
        .filter(Series::has_values)
        .collect();

    let panel = if series.is_empty() {
        Panel::placeholder("Scorecard", "No scenario could be scored")
    } else {
        Panel::new(
            "Multi-dimensional comparison",
            "Stars",
            PanelKind::Radar {
                axes: AXES.iter().map(|a| a.to_string()).collect(),
                max: 5.0,
                series,
            },
        )
    };
    Chart::new(ChartKind::ScenarioScorecard, TITLE, vec![panel]).with_note(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadscope_analysis::Aggregator;
    use loadscope_core::{AutoscalerSnapshot, ClusterCapture, ReplicaBounds, ScenarioSpec};

    fn record(avg: f64, p95: f64, rps: f64) -> MetricRecord {
        MetricRecord {
            min_duration_ms: Some(0.0),
            avg_duration_ms: Some(avg),
            p95_duration_ms: Some(p95),
            requests_per_second: Some(rps),
            total_requests: Some(1000),
            failure_rate_percent: Some(1.5),
            ..Default::default()
        }
        .with_reconciled_rates()
    }

    fn scenario(key: &str, with_cluster: bool) -> ScenarioDataset {
        let mut dataset = ScenarioDataset::new(ScenarioSpec::new(key, format!("S{key}")));
        dataset.profiles.insert(TestProfile::Baseline, record(20.0, 40.0, 100.0));
        dataset.profiles.insert(TestProfile::Spike, record(60.0, 150.0, 250.0));
        if with_cluster {
            let mut capture = ClusterCapture::default();
            let mut post = AutoscalerSnapshot::new();
            post.insert(
                "a-hpa",
                ReplicaBounds {
                    min_replicas: 1,
                    max_replicas: 10,
                    current_replicas: 5,
                },
            );
            capture.autoscaler.post = post;
            dataset.cluster.insert(TestProfile::Spike, capture);
        }
        dataset
    }

    fn build(view: &CampaignView, kind: ChartKind) -> Chart {
        let catalog = Catalog::default();
        let analysis = Aggregator::new(&catalog).analyze(view);
        let style = Style::default();
        build_chart(
            kind,
            &ChartContext {
                view,
                analysis: &analysis,
                catalog: &catalog,
                style: &style,
            },
        )
    }

    #[test]
    fn test_every_chart_builds_for_empty_view() {
        let view = CampaignView::new(ViewMode::MultiScenario, Vec::new());
        for kind in ChartKind::ALL {
            let chart = build(&view, kind);
            assert_eq!(chart.kind, kind);
            assert!(chart.is_placeholder(), "{kind:?} should be a placeholder");
        }
    }

    #[test]
    fn test_single_latency_uses_metric_series() {
        let view = CampaignView::new(ViewMode::SingleCampaign, vec![scenario("results", false)]);
        let chart = build(&view, ChartKind::LatencyComparison);
        assert_eq!(chart.panels.len(), 1);
        let PanelKind::Bars { categories, series, .. } = &chart.panels[0].kind else {
            panic!("expected bars");
        };
        assert_eq!(categories.len(), 2);
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mean", "p90", "p95"]);
        assert_eq!(series[1].values, vec![None, None]);
    }

    #[test]
    fn test_multi_latency_has_panel_per_statistic() {
        let view = CampaignView::new(
            ViewMode::MultiScenario,
            vec![scenario("1", true), scenario("2", false)],
        );
        let chart = build(&view, ChartKind::LatencyComparison);
        assert_eq!(chart.panels.len(), 3);
        let PanelKind::Bars { series, .. } = &chart.panels[2].kind else {
            panic!("expected bars");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].values, vec![Some(40.0), Some(150.0)]);
    }

    #[test]
    fn test_stacked_rates_sum_to_hundred() {
        let view = CampaignView::new(ViewMode::MultiScenario, vec![scenario("1", false)]);
        let chart = build(&view, ChartKind::SuccessRate);
        for panel in &chart.panels {
            let PanelKind::Stacked { series, .. } = &panel.kind else {
                panic!("expected stacked bars");
            };
            let total = series[0].values[0].unwrap() + series[1].values[0].unwrap();
            assert!((total - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_autoscaler_panels_fall_back_per_workload() {
        let view = CampaignView::new(
            ViewMode::MultiScenario,
            vec![scenario("1", true), scenario("2", false)],
        );
        let chart = build(&view, ChartKind::AutoscalerScaling);
        assert_eq!(chart.panels.len(), 3);
        assert!(!chart.is_placeholder());

        let a_hpa = chart.panels.iter().find(|p| p.title.contains("a-hpa")).unwrap();
        let PanelKind::Bars { categories, series, .. } = &a_hpa.kind else {
            panic!("expected bars");
        };
        assert_eq!(categories.len(), 1);
        assert_eq!(series[0].values, vec![None]);
        assert_eq!(series[1].values, vec![Some(5.0)]);
        assert_eq!(chart.panels.iter().filter(|p| p.is_placeholder()).count(), 2);
    }

    #[test]
    fn test_resource_chart_without_samples_is_placeholder() {
        let view = CampaignView::new(ViewMode::MultiScenario, vec![scenario("1", true)]);
        let chart = build(&view, ChartKind::ResourceUsage);
        assert!(chart.is_placeholder());
        assert!(chart.title.contains("data not available"));
    }

    #[test]
    fn test_percentiles_floor_zero_to_epsilon() {
        let view = CampaignView::new(ViewMode::SingleCampaign, vec![scenario("results", false)]);
        let chart = build(&view, ChartKind::LatencyPercentiles);
        let PanelKind::Lines { series, log_scale, .. } = &chart.panels[0].kind else {
            panic!("expected lines");
        };
        assert!(*log_scale);
        assert_eq!(series[0].values[0], Some(0.01));
        assert_eq!(series[0].values[2], None);
    }

    #[test]
    fn test_cost_chart_notes_estimate() {
        let view = CampaignView::new(ViewMode::MultiScenario, vec![scenario("1", true)]);
        let chart = build(&view, ChartKind::CostEstimate);
        assert_eq!(chart.panels.len(), 2);
        assert!(chart.note.as_deref().unwrap().contains("27 min"));
    }
}
