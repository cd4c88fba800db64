//! In-process analytics for the admin dashboard.
//!
//! Usage, AI and performance events are kept in bounded ring buffers and
//! aggregated on demand. Nothing is persisted: a restart clears everything.

mod ring;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

pub use ring::RingBuffer;

/// Events kept per kind before the oldest are dropped.
pub const DEFAULT_EVENT_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub user_id: String,
    pub action: String,
    pub at: DateTime<Utc>,
}

impl UsageEvent {
    pub fn new(user_id: &str, action: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            action: action.to_string(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEvent {
    pub model: String,
    pub success: bool,
    pub latency_ms: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub at: DateTime<Utc>,
}

impl AiEvent {
    pub fn new(model: &str, success: bool, latency_ms: u64) -> Self {
        Self {
            model: model.to_string(),
            success,
            latency_ms,
            input_tokens: 0,
            output_tokens: 0,
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEvent {
    pub endpoint: String,
    pub method: String,
    pub status: u16,
    pub duration_ms: u64,
    pub at: DateTime<Utc>,
}

impl PerformanceEvent {
    pub fn new(method: &str, endpoint: &str, status: u16, duration_ms: u64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            status,
            duration_ms,
            at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 500
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_events: usize,
    pub unique_users: usize,
    /// `YYYY-MM-DD` → events.
    pub by_day: BTreeMap<String, usize>,
    pub by_action: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStats {
    pub calls: usize,
    pub successes: usize,
    pub avg_latency_ms: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummary {
    pub total_calls: usize,
    pub successful_calls: usize,
    /// Fraction in `[0, 1]`; zero when there were no calls.
    pub success_rate: f64,
    pub by_model: BTreeMap<String, ModelStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointStats {
    pub count: usize,
    pub errors: usize,
    pub avg_ms: f64,
    pub p95_ms: u64,
    pub p99_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub total_requests: usize,
    pub error_count: usize,
    pub avg_ms: f64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    /// Keyed by `"<METHOD> <path>"`.
    pub by_endpoint: BTreeMap<String, EndpointStats>,
}

/// Everything the admin dashboard shows for a time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub days: u32,
    pub since: DateTime<Utc>,
    pub usage: UsageSummary,
    pub ai: AiSummary,
    pub performance: PerformanceSummary,
}

struct Buffers {
    usage: RingBuffer<UsageEvent>,
    ai: RingBuffer<AiEvent>,
    performance: RingBuffer<PerformanceEvent>,
}

/// Event recorder and aggregator. Safe to share across threads.
pub struct Analytics {
    buffers: Mutex<Buffers>,
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl Analytics {
    /// Keep at most `capacity` events of each kind.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: Mutex::new(Buffers {
                usage: RingBuffer::new(capacity),
                ai: RingBuffer::new(capacity),
                performance: RingBuffer::new(capacity),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Buffers> {
        self.buffers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_usage(&self, event: UsageEvent) {
        self.lock().usage.push(event);
    }

    pub fn record_ai(&self, event: AiEvent) {
        self.lock().ai.push(event);
    }

    pub fn record_performance(&self, event: PerformanceEvent) {
        self.lock().performance.push(event);
    }

    /// Number of stored (usage, ai, performance) events.
    pub fn counts(&self) -> (usize, usize, usize) {
        let buffers = self.lock();
        (buffers.usage.len(), buffers.ai.len(), buffers.performance.len())
    }

    pub fn usage_summary(&self, since: DateTime<Utc>) -> UsageSummary {
        let buffers = self.lock();
        let mut summary = UsageSummary::default();
        let mut users = HashSet::new();

        for event in buffers.usage.iter().filter(|e| e.at >= since) {
            summary.total_events += 1;
            users.insert(event.user_id.as_str());
            *summary
                .by_day
                .entry(event.at.format("%Y-%m-%d").to_string())
                .or_default() += 1;
            *summary.by_action.entry(event.action.clone()).or_default() += 1;
        }
        summary.unique_users = users.len();
        summary
    }

    pub fn ai_summary(&self, since: DateTime<Utc>) -> AiSummary {
        let buffers = self.lock();
        let mut summary = AiSummary::default();
        let mut latency_totals: BTreeMap<String, u64> = BTreeMap::new();

        for event in buffers.ai.iter().filter(|e| e.at >= since) {
            summary.total_calls += 1;
            if event.success {
                summary.successful_calls += 1;
            }
            let stats = summary.by_model.entry(event.model.clone()).or_default();
            stats.calls += 1;
            if event.success {
                stats.successes += 1;
            }
            stats.input_tokens += event.input_tokens;
            stats.output_tokens += event.output_tokens;
            *latency_totals.entry(event.model.clone()).or_default() += event.latency_ms;
        }

        for (model, stats) in summary.by_model.iter_mut() {
            let total = latency_totals.get(model).copied().unwrap_or(0);
            stats.avg_latency_ms = average(total, stats.calls);
        }
        if summary.total_calls > 0 {
            summary.success_rate = summary.successful_calls as f64 / summary.total_calls as f64;
        }
        summary
    }

    pub fn performance_summary(&self, since: DateTime<Utc>) -> PerformanceSummary {
        let buffers = self.lock();
        let mut summary = PerformanceSummary::default();
        let mut all: Vec<u64> = Vec::new();
        let mut per_endpoint: BTreeMap<String, (Vec<u64>, usize)> = BTreeMap::new();

        for event in buffers.performance.iter().filter(|e| e.at >= since) {
            all.push(event.duration_ms);
            let entry = per_endpoint
                .entry(format!("{} {}", event.method, event.endpoint))
                .or_default();
            entry.0.push(event.duration_ms);
            if event.is_error() {
                entry.1 += 1;
                summary.error_count += 1;
            }
        }
        drop(buffers);

        summary.total_requests = all.len();
        all.sort_unstable();
        summary.avg_ms = average(all.iter().sum(), all.len());
        summary.p95_ms = percentile(&all, 0.95);
        summary.p99_ms = percentile(&all, 0.99);

        for (endpoint, (mut durations, errors)) in per_endpoint {
            durations.sort_unstable();
            summary.by_endpoint.insert(
                endpoint,
                EndpointStats {
                    count: durations.len(),
                    errors,
                    avg_ms: average(durations.iter().sum(), durations.len()),
                    p95_ms: percentile(&durations, 0.95),
                    p99_ms: percentile(&durations, 0.99),
                },
            );
        }
        summary
    }

    /// Summaries for the last `days` days.
    pub fn metrics(&self, days: u32) -> Metrics {
        let since = Utc::now() - Duration::days(i64::from(days));
        Metrics {
            days,
            since,
            usage: self.usage_summary(since),
            ai: self.ai_summary(since),
            performance: self.performance_summary(since),
        }
    }
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Value at index `floor(n * q)` of an ascending slice, no interpolation.
pub fn percentile(sorted: &[u64], q: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((sorted.len() as f64 * q).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_days_ago(days: i64) -> DateTime<Utc> {
        Utc::now() - Duration::days(days)
    }

    #[test]
    fn test_percentile_uses_floor_index() {
        let values: Vec<u64> = (1..=20).collect();
        assert_eq!(percentile(&values, 0.95), 20); // floor(19.0) = 19
        assert_eq!(percentile(&values, 0.5), 11);
        assert_eq!(percentile(&[7], 0.99), 7);
        assert_eq!(percentile(&[], 0.95), 0);

        let hundred: Vec<u64> = (1..=100).collect();
        assert_eq!(percentile(&hundred, 0.95), 96);
        assert_eq!(percentile(&hundred, 0.99), 100);
    }

    #[test]
    fn test_usage_summary_buckets_and_window() {
        let analytics = Analytics::default();
        analytics.record_usage(UsageEvent::new("u1", "generate"));
        analytics.record_usage(UsageEvent::new("u1", "export"));
        analytics.record_usage(UsageEvent::new("u2", "generate"));
        analytics.record_usage(UsageEvent {
            user_id: "u3".to_string(),
            action: "generate".to_string(),
            at: at_days_ago(30),
        });

        let summary = analytics.usage_summary(at_days_ago(7));
        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.unique_users, 2);
        assert_eq!(summary.by_action["generate"], 2);
        assert_eq!(summary.by_day.values().sum::<usize>(), 3);

        assert_eq!(analytics.usage_summary(at_days_ago(60)).total_events, 4);
    }

    #[test]
    fn test_ai_summary() {
        let analytics = Analytics::default();
        analytics.record_ai(AiEvent::new("claude", true, 100));
        analytics.record_ai(AiEvent::new("claude", false, 300));
        analytics.record_ai(AiEvent {
            input_tokens: 50,
            output_tokens: 20,
            ..AiEvent::new("other", true, 40)
        });

        let summary = analytics.ai_summary(at_days_ago(1));
        assert_eq!(summary.total_calls, 3);
        assert_eq!(summary.successful_calls, 2);
        assert!((summary.success_rate - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.by_model["claude"].avg_latency_ms, 200.0);
        assert_eq!(summary.by_model["other"].input_tokens, 50);
    }

    #[test]
    fn test_performance_summary() {
        let analytics = Analytics::default();
        for ms in 1..=20 {
            analytics.record_performance(PerformanceEvent::new("GET", "/api/design-systems", 200, ms));
        }
        analytics.record_performance(PerformanceEvent::new("POST", "/api/generate", 500, 900));

        let summary = analytics.performance_summary(at_days_ago(1));
        assert_eq!(summary.total_requests, 21);
        assert_eq!(summary.error_count, 1);

        let list = &summary.by_endpoint["GET /api/design-systems"];
        assert_eq!(list.count, 20);
        assert_eq!(list.errors, 0);
        assert_eq!(list.avg_ms, 10.5);
        assert_eq!(list.p95_ms, 20);
        assert_eq!(summary.by_endpoint["POST /api/generate"].errors, 1);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let analytics = Analytics::new(3);
        for i in 0..5 {
            analytics.record_usage(UsageEvent::new(&format!("u{}", i), "generate"));
        }
        assert_eq!(analytics.counts(), (3, 0, 0));
        assert_eq!(analytics.usage_summary(at_days_ago(1)).unique_users, 3);
    }

    #[test]
    fn test_metrics_bundle_serializes() {
        let analytics = Analytics::default();
        analytics.record_usage(UsageEvent::new("u1", "generate"));
        let metrics = analytics.metrics(7);
        assert_eq!(metrics.days, 7);
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["usage"]["totalEvents"], 1);
        assert_eq!(json["ai"]["successRate"], 0.0);
    }
}
