//! Integration tests for tally-core
//!
//! These tests exercise the full snapshot → derived-views workflow the way
//! the CLI and server drive it: load a normalized export, then compute
//! every dashboard view from the same data.

use tally_core::{
    aggregate, build_alerts, compute_insights, detect_recurring, evaluate_budgets,
    import::parse_transactions_csv, monthly_summary, AlertKind, AlertSeverity, AnalyticsConfig,
    Budget, BudgetState, Category, Period,
};

/// Normalized export covering three months with:
/// - a recurring 499.00 Bills charge (3 occurrences)
/// - a Travel spike in March (1000, 1000, then 4000)
/// - salary income each month
fn sample_csv() -> &'static str {
    "\
id,timestamp,text,category,amount,confidence,corrected
1,2024-01-02 09:00:00,Salary credit,Income,50000,1.0,false
2,2024-01-05 10:30:00,AUTOPAY 499.00 streaming,Bills,499.0,0.92,false
3,2024-01-12 13:00:00,Flight booking,Travel,1000.0,0.80,false
4,2024-01-20 19:45:00,Grocery run,Food,2100.0,0.88,false
5,2024-02-01 09:00:00,Salary credit,Income,50000,1.0,false
6,2024-02-05 10:30:00,AUTOPAY 499.00 streaming,Bills,499.0,0.92,false
7,2024-02-14 08:10:00,Cab to airport,Travel,1000.0,0.71,true
8,2024-02-18 20:30:00,Grocery run,Food,1900.0,0.90,false
9,2024-03-01 09:00:00,Salary credit,Income,50000,1.0,false
10,2024-03-05 10:30:00,AUTOPAY 499.00 streaming,Bills,499.0,0.92,false
11,2024-03-09 07:30:00,Holiday package,Travel,4000.0,0.66,false
12,2024-03-22 18:00:00,Grocery run,Food,2000.0,0.85,false
"
}

#[test]
fn test_full_dashboard_workflow() {
    let transactions = parse_transactions_csv(sample_csv().as_bytes()).unwrap();
    assert_eq!(transactions.len(), 12);

    // Aggregate: all time
    let summary = aggregate(&transactions, &Period::All);
    assert_eq!(summary.total_income, 150000.0);
    assert_eq!(summary.total_expense, 13497.0);
    assert_eq!(summary.net, 150000.0 - 13497.0);
    assert_eq!(
        summary.months_available,
        vec!["2024-03", "2024-02", "2024-01"]
    );

    // Aggregate: one month
    let march = aggregate(&transactions, &Period::Month("2024-03".into()));
    assert_eq!(march.total_income, 50000.0);
    assert_eq!(march.total_expense, 499.0 + 4000.0 + 2000.0);
    assert_eq!(march.category_totals[&Category::Travel], 4000.0);
    assert!(!march.category_totals.contains_key(&Category::Shopping));

    // Trend series
    let points = monthly_summary(&transactions);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].month, "2024-01");
    assert_eq!(points[0].spent, 3599.0);
    assert_eq!(points[2].month, "2024-03");
    assert_eq!(points[2].net, 50000.0 - 6499.0);

    // Recurring: the 499.00 Bills autopay
    let recurring = detect_recurring(&transactions, 2);
    assert_eq!(recurring.len(), 1);
    assert_eq!(recurring[0].category, Category::Bills);
    assert_eq!(recurring[0].amount, 499.0);
    assert_eq!(recurring[0].count, 3);

    // Insights: March Travel spike vs 1000/month baseline
    let insight = compute_insights(&transactions, &Period::Month("2024-03".into()));
    assert_eq!(insight.top_category.as_ref().unwrap().category, Category::Travel);
    let spike = insight
        .spikes
        .iter()
        .find(|s| s.category == Category::Travel)
        .expect("expected Travel spike");
    assert_eq!(spike.avg_previous, 1000.0);
    assert_eq!(spike.ratio, 4.0);
    // Food in March (2000) is exactly at its baseline (2000): no spike
    assert!(insight.spikes.iter().all(|s| s.category != Category::Food));
}

#[test]
fn test_budgets_and_alerts_over_snapshot() {
    let transactions = parse_transactions_csv(sample_csv().as_bytes()).unwrap();
    let budgets = vec![
        Budget {
            category: Category::Travel,
            monthly_limit: 2000.0,
        },
        Budget {
            category: Category::Food,
            monthly_limit: 2500.0,
        },
        Budget {
            category: Category::Shopping,
            monthly_limit: 0.0,
        },
    ];

    // Budget status for the latest month (March)
    let march = aggregate(&transactions, &Period::Month("2024-03".into()));
    let statuses = evaluate_budgets(&march.category_totals, &budgets);
    assert_eq!(statuses.len(), 3);
    assert_eq!(statuses[0].status, BudgetState::Over); // Travel 4000/2000
    assert_eq!(statuses[1].status, BudgetState::Warning); // Food 2000/2500
    assert_eq!(statuses[2].status, BudgetState::Ok); // no ceiling

    // Alerts combine the over/warning budgets with the recurring autopay
    let alerts = build_alerts(&transactions, &budgets, &AnalyticsConfig::default());
    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    assert_eq!(alerts[0].category, Category::Travel);
    assert_eq!(alerts[1].severity, AlertSeverity::Warning);
    assert_eq!(alerts[1].category, Category::Food);
    assert_eq!(alerts[2].kind, AlertKind::Recurring);
    assert_eq!(alerts[2].severity, AlertSeverity::Info);
}

#[test]
fn test_views_are_pure_and_order_independent() {
    let mut transactions = parse_transactions_csv(sample_csv().as_bytes()).unwrap();
    let period = Period::Month("2024-03".into());

    let summary = aggregate(&transactions, &period);
    let insight = compute_insights(&transactions, &period);
    let recurring = detect_recurring(&transactions, 2);

    // Same input, same output
    assert_eq!(aggregate(&transactions, &period), summary);
    assert_eq!(compute_insights(&transactions, &period), insight);

    // Permuted input, same output
    transactions.reverse();
    assert_eq!(aggregate(&transactions, &period), summary);
    assert_eq!(compute_insights(&transactions, &period), insight);
    assert_eq!(detect_recurring(&transactions, 2), recurring);
}
