//! Integration tests for affroi-core
//!
//! These tests exercise the full import → normalize → filter → report
//! workflow through the public API.

use std::fs;

use affroi_core::{
    aggregate::{by_date, linear_trend, DailyCommission},
    db::Database,
    filter::filter_rows,
    goals::{goal_progress, Milestones},
    import::parse_csv,
    mapping::{FieldMapping, MappingConfig},
    models::{Channel, StatusCategory, NO_SUBID},
    normalize::normalize_rows,
    profit::CostInputs,
    session::Session,
    store::MemoryStore,
    FilterState, InsightType, OrderCounting, StatusFilter, TrendClass,
};

/// Order export in the default report layout
///
/// - two lines of the same Facebook order (same order id)
/// - a cancelled Line order
/// - a pending order with no SubID and a placeholder model id
/// - a completed Shopee Video order on a later day
fn order_export_csv() -> &'static str {
    "รหัสการสั่งซื้อ,สถานะการสั่งซื้อ,เวลาที่สั่งซื้อ,ชื่อรายการสินค้า,เลขที่ โมเดล,จำนวน,มูลค่าซื้อ(฿),ค่าคอมมิชชั่นสุทธิ(฿),คอมมิชชั่นคำสั่งซื้อจากผู้ขาย(฿),คอมมิชชั่นสินค้าโดยรวม(฿),อัตราคอมมิชชั่นร้านค้าของสินค้า,อัตราคอมมิชชั่นช้อปปี้ของสินค้า,Sub_id1,Sub_id2
1001,สำเร็จ,2025-01-05 10:00:00,เสื้อยืด,M1,2,\"1,000\",100,20,60,5%,3%,fb_01,
1001,สำเร็จ,2025-01-05 10:00:00,หมวก,M2,1,500,50,0,0,0,0,fb_01,
1002,ยกเลิก,2025-01-06 09:30:00,กระเป๋า,M3,1,800,40,0,0,0,0,line_01,
1003,รอดำเนินการ,2025/1/6 20:15,ถุงเท้า,-,0,200,10,10,12,4,2,,
1004,สำเร็จ,2025-01-07 11:00:00,เสื้อยืด,M1,1,500,60,15,30,5,3,,video_live
"
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[test]
fn test_same_order_lines_collapse() {
    let csv = "Sub_id1,ค่าคอมมิชชั่นสุทธิ(฿),สถานะการสั่งซื้อ,เวลาที่สั่งซื้อ,รหัสการสั่งซื้อ
fb_01,100,สำเร็จ,2025-01-05,1
fb_01,50,สำเร็จ,2025-01-05,1
";
    let raw = parse_csv(csv.as_bytes()).expect("Failed to parse CSV");
    let rows = normalize_rows(&raw, &FieldMapping::default());

    let mut session = Session::open(MemoryStore::new(), MappingConfig::default()).unwrap();
    session
        .replace_rows(affroi_core::ImportedFile {
            rows: raw,
            record: test_record(2),
        })
        .unwrap();
    let report = session.dashboard();

    assert_eq!(rows.len(), 2);
    assert_eq!(report.kpis.total_orders, 1);
    assert_eq!(report.kpis.total_commission, 150.0);
    assert_eq!(report.by_subid.len(), 1);
    assert_eq!(report.by_subid[0].subid, "fb_01");
    assert_eq!(report.by_subid[0].commission, 150.0);
    assert_eq!(report.by_subid[0].orders, 2);
}

#[test]
fn test_full_dashboard_workflow() {
    let raw = parse_csv(order_export_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(raw.len(), 5);

    let rows = normalize_rows(&raw, &FieldMapping::default());
    assert_eq!(rows.len(), raw.len());
    assert_eq!(rows[3].subid, NO_SUBID);
    assert_eq!(rows[3].order_date, "2025-01-06");
    assert_eq!(rows[4].subid, "video_live");
    assert_eq!(rows[4].channel, Channel::ShopeeVideo);

    let mut costs = CostInputs::default();
    costs.set_spend("fb_01", "100", "20");
    let report = affroi_core::build_report(
        &rows,
        &FilterState::new(),
        &costs,
        OrderCounting::default(),
    );

    assert_eq!(report.kpis.total_commission, 260.0);
    assert_eq!(report.kpis.total_orders, 4);
    assert_eq!(report.kpis.total_gmv, 3000.0);
    assert_eq!(report.kpis.approved, 3);
    assert_eq!(report.kpis.pending, 1);
    assert_eq!(report.kpis.rejected, 1);
    assert_eq!(report.date_range.as_ref().unwrap().to_string(), "2025-01-05 - 2025-01-07");

    // Rollup sums to the KPI total
    let rollup_total: f64 = report.by_subid.iter().map(|r| r.commission).sum();
    assert_eq!(rollup_total, report.kpis.total_commission);

    let fb = report.by_subid.iter().find(|r| r.subid == "fb_01").unwrap();
    assert_eq!(fb.spend, 120.0);
    assert_eq!(fb.profit, 30.0);
    assert_eq!(fb.roi, Some(0.25));
    assert!(report
        .by_subid
        .iter()
        .filter(|r| r.subid != "fb_01")
        .all(|r| r.roi.is_none()));

    // Cancelled and placeholder rows never rank as products
    let models: Vec<&str> = report.top_products.iter().map(|p| p.model_id.as_str()).collect();
    assert_eq!(models, vec!["M1", "M2"]);
    assert_eq!(report.top_products[0].units, 3.0);
    assert_eq!(report.top_products[0].commission, 160.0);

    // The no-SubID bucket still competes in the SubID ranking
    assert!(report.top_subids.iter().any(|r| r.subid == NO_SUBID));
    assert!(report.top_subids.iter().all(|r| r.subid != "line_01"));

    // 260 - 120 = 140 profit on 120 spend
    assert_eq!(report.roi_tier, Some(affroi_core::RoiTier::High));
    assert_eq!(report.insights[0].insight_type, InsightType::Trend);
}

#[test]
fn test_filter_axes_combine() {
    let raw = parse_csv(order_export_csv().as_bytes()).unwrap();
    let rows = normalize_rows(&raw, &FieldMapping::default());

    let completed = filter_rows(&rows, &StatusFilter::All, &[], &[StatusCategory::Completed]);
    assert_eq!(completed.len(), 3);

    let fb_completed = filter_rows(
        &rows,
        &"สำเร็จ".parse().unwrap(),
        &[Channel::Facebook],
        &[StatusCategory::Completed],
    );
    assert_eq!(fb_completed.len(), 2);

    // Idempotent and a subset of the input
    let again = filter_rows(
        &fb_completed,
        &"สำเร็จ".parse().unwrap(),
        &[Channel::Facebook],
        &[StatusCategory::Completed],
    );
    assert_eq!(again, fb_completed);
    assert!(again.iter().all(|r| rows.contains(r)));
}

#[test]
fn test_trend_classification() {
    let series = |values: &[f64]| -> Vec<DailyCommission> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DailyCommission {
                date: format!("2025-02-{:02}", i + 1),
                value: *v,
            })
            .collect()
    };

    let up = linear_trend(&series(&[10.0, 20.0, 30.0, 40.0]));
    assert!((up.slope - 10.0).abs() < 1e-9);
    assert_eq!(up.class, TrendClass::StrongUp);
    assert_eq!(linear_trend(&series(&[10.0, 10.0, 10.0])).class, TrendClass::Flat);

    let raw = parse_csv(order_export_csv().as_bytes()).unwrap();
    let rows = normalize_rows(&raw, &FieldMapping::default());
    let daily = by_date(&rows);
    let dates: Vec<&str> = daily.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-01-05", "2025-01-06", "2025-01-07"]);
}

#[test]
fn test_goal_progress_example() {
    let goals = Milestones::new(vec![1000.0, 5000.0]);

    let mid = goal_progress(&goals, 3000.0).unwrap();
    assert_eq!(mid.active_goal_index, 1);
    assert_eq!(mid.percentage, 50.0);
    assert!(!mid.is_complete);
    assert!(!mid.all_goals_achieved);

    let done = goal_progress(&goals, 6000.0).unwrap();
    assert_eq!(done.active_goal_index, 1);
    assert_eq!(done.percentage, 100.0);
    assert!(done.is_complete);
    assert!(done.all_goals_achieved);
}

// =============================================================================
// Session + Storage Integration Tests
// =============================================================================

fn test_record(row_count: usize) -> affroi_core::ImportRecord {
    affroi_core::ImportRecord {
        file_name: "orders.csv".to_string(),
        format: affroi_core::FileFormat::Csv,
        sha256: "ab".repeat(32),
        row_count,
        imported_at: chrono::Utc::now(),
    }
}

#[test]
fn test_import_file_into_database_session() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("orders.csv");
    fs::write(&csv_path, order_export_csv()).unwrap();

    {
        let db = Database::in_dir(dir.path()).expect("Failed to open database");
        let mut session = Session::open(db, MappingConfig::default()).unwrap();
        let record = session.import_path(&csv_path).unwrap().expect("csv is supported");
        assert_eq!(record.row_count, 5);

        session.add_goal("50").unwrap();
        session.add_goal("1,000").unwrap();
        session.set_total_ad_spend(Some("130")).unwrap();
    }

    let db = Database::in_dir(dir.path()).unwrap();
    let session = Session::open(db, MappingConfig::default()).unwrap();
    assert_eq!(session.raw_rows().len(), 5);
    assert_eq!(session.costs().total_spend(), 130.0);

    // Extracom rows: seller commission > 0 (three of five)
    let stats = session.extracom_stats();
    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.total_commission, 102.0);
    assert_eq!(stats.total_value, 1700.0);

    let progress = session.goal_progress().unwrap();
    assert_eq!(progress.active_goal, 1000.0);
    assert!(progress.all_goals_achieved);
}

#[test]
fn test_unsupported_import_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("orders.pdf");
    fs::write(&pdf, b"%PDF-1.4").unwrap();

    let mut session = Session::open(MemoryStore::new(), MappingConfig::default()).unwrap();
    session
        .replace_rows(affroi_core::ImportedFile {
            rows: parse_csv(order_export_csv().as_bytes()).unwrap(),
            record: test_record(5),
        })
        .unwrap();

    assert!(session.import_path(&pdf).unwrap().is_none());
    assert_eq!(session.raw_rows().len(), 5);
}

#[test]
fn test_reset_clears_everything_but_goals() {
    let db = Database::in_memory().unwrap();
    let mut session = Session::open(db.clone(), MappingConfig::default()).unwrap();
    session
        .replace_rows(affroi_core::ImportedFile {
            rows: parse_csv(order_export_csv().as_bytes()).unwrap(),
            record: test_record(5),
        })
        .unwrap();
    session.set_spend("fb_01", "10", "0").unwrap();
    session.add_income(affroi_core::IncomeSource::Tiktok).unwrap();
    session.add_goal("2000").unwrap();

    session.reset().unwrap();

    let reopened = Session::open(db, MappingConfig::default()).unwrap();
    assert!(reopened.raw_rows().is_empty());
    assert!(reopened.costs().spend_by_subid.is_empty());
    assert!(reopened.costs().other_incomes.is_empty());
    assert_eq!(reopened.goals().as_slice(), &[2000.0]);
    assert_eq!(reopened.dashboard().kpis.total_orders, 0);
}
