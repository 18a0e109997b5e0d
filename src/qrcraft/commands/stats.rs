use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Utc};

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{ContentKind, QrRecord, ScanRecord};
use crate::store::{QrStore, StorageBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindCount {
    pub kind: ContentKind,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    /// Calendar month as "YYYY-MM"
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub created: usize,
    pub scanned: usize,
}

/// The data series behind the statistics view: totals, kind distribution,
/// per-month creation counts and the last week of activity.
#[derive(Debug, Clone, Default)]
pub struct StatsReport {
    pub total_codes: usize,
    pub total_downloads: u64,
    pub total_scans: usize,
    pub most_used_kind: Option<ContentKind>,
    pub kind_distribution: Vec<KindCount>,
    pub monthly: Vec<MonthlyCount>,
    pub last_week: Vec<DailyActivity>,
}

pub fn run<B: StorageBackend>(store: &QrStore<B>) -> Result<CmdResult> {
    let report = build_report(store.codes(), store.scans(), Utc::now().date_naive());
    Ok(CmdResult::default().with_stats(report))
}

fn build_report(codes: &[QrRecord], scans: &[ScanRecord], today: NaiveDate) -> StatsReport {
    let mut by_kind: HashMap<ContentKind, usize> = HashMap::new();
    for code in codes {
        *by_kind.entry(code.kind).or_default() += 1;
    }
    let kind_distribution: Vec<KindCount> = ContentKind::ALL
        .iter()
        .filter_map(|kind| {
            by_kind.get(kind).map(|&count| KindCount { kind: *kind, count })
        })
        .collect();
    let most_used_kind = kind_distribution
        .iter()
        .max_by_key(|kc| kc.count)
        .map(|kc| kc.kind);

    let mut by_month: HashMap<String, usize> = HashMap::new();
    for code in codes {
        let month = format!(
            "{:04}-{:02}",
            code.created_at.year(),
            code.created_at.month()
        );
        *by_month.entry(month).or_default() += 1;
    }
    let mut monthly: Vec<MonthlyCount> = by_month
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect();
    monthly.sort_by(|a, b| a.month.cmp(&b.month));

    let last_week = (0..7)
        .rev()
        .map(|i| {
            let date = today - Days::new(i);
            DailyActivity {
                date,
                created: codes
                    .iter()
                    .filter(|c| c.created_at.date_naive() == date)
                    .count(),
                scanned: scans
                    .iter()
                    .filter(|s| s.scanned_at.date_naive() == date)
                    .count(),
            }
        })
        .collect();

    StatsReport {
        total_codes: codes.len(),
        total_downloads: codes.iter().map(|c| u64::from(c.download_count)).sum(),
        total_scans: scans.len(),
        most_used_kind,
        kind_distribution,
        monthly,
        last_week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeDraft, QrStyle};
    use chrono::TimeZone;

    fn code_at(name: &str, kind: ContentKind, year: i32, month: u32, day: u32) -> QrRecord {
        let mut record = QrRecord::new(CodeDraft::new(
            name.to_string(),
            "payload".to_string(),
            kind,
            QrStyle::Classic,
        ));
        record.created_at = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap();
        record
    }

    #[test]
    fn empty_collections_yield_an_empty_report() {
        let report = build_report(&[], &[], NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
        assert_eq!(report.total_codes, 0);
        assert_eq!(report.most_used_kind, None);
        assert!(report.kind_distribution.is_empty());
        assert!(report.monthly.is_empty());
        assert_eq!(report.last_week.len(), 7);
    }

    #[test]
    fn totals_and_distribution_add_up() {
        let mut a = code_at("A", ContentKind::Url, 2026, 7, 1);
        a.download_count = 3;
        let b = code_at("B", ContentKind::Url, 2026, 7, 15);
        let c = code_at("C", ContentKind::Text, 2026, 8, 2);

        let report = build_report(
            &[a, b, c],
            &[],
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        );

        assert_eq!(report.total_codes, 3);
        assert_eq!(report.total_downloads, 3);
        assert_eq!(report.most_used_kind, Some(ContentKind::Url));
        assert_eq!(
            report.kind_distribution,
            vec![
                KindCount {
                    kind: ContentKind::Url,
                    count: 2
                },
                KindCount {
                    kind: ContentKind::Text,
                    count: 1
                },
            ]
        );
        assert_eq!(
            report.monthly,
            vec![
                MonthlyCount {
                    month: "2026-07".into(),
                    count: 2
                },
                MonthlyCount {
                    month: "2026-08".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn last_week_buckets_by_day() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let codes = [
            code_at("Today", ContentKind::Url, 2026, 8, 7),
            code_at("Midweek", ContentKind::Url, 2026, 8, 4),
            code_at("TooOld", ContentKind::Url, 2026, 7, 20),
        ];
        let mut scan = ScanRecord::new("hello".into(), ContentKind::Text);
        scan.scanned_at = Utc.with_ymd_and_hms(2026, 8, 4, 9, 0, 0).single().unwrap();

        let report = build_report(&codes, &[scan], today);

        assert_eq!(report.last_week.len(), 7);
        assert_eq!(report.last_week[6].date, today);
        assert_eq!(report.last_week[6].created, 1);
        let midweek = report
            .last_week
            .iter()
            .find(|d| d.date == NaiveDate::from_ymd_opt(2026, 8, 4).unwrap())
            .unwrap();
        assert_eq!(midweek.created, 1);
        assert_eq!(midweek.scanned, 1);
    }
}
