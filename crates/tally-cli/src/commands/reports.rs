//! Report command implementations

use anyhow::Result;

use tally_core::{
    aggregate, build_alerts, compute_insights_with, detect_recurring, evaluate_budgets_with,
    latest_month, monthly_summary, AnalyticsConfig, Period, Snapshot,
};

use super::truncate;

/// Parse a period argument ("all" or YYYY-MM).
fn parse_period(period: &str) -> Result<Period> {
    period.parse::<Period>().map_err(|e| anyhow::anyhow!(e))
}

/// Resolve an optional month argument, defaulting to the latest month with
/// data. Returns None when the snapshot is empty.
fn resolve_month(snapshot: &Snapshot, period: Option<&str>) -> Result<Option<Period>> {
    match period {
        Some(raw) => Ok(Some(parse_period(raw)?)),
        None => Ok(latest_month(&snapshot.transactions).map(Period::Month)),
    }
}

pub fn cmd_summary(snapshot: &Snapshot, period: &str) -> Result<()> {
    let period = parse_period(period)?;
    let summary = aggregate(&snapshot.transactions, &period);

    println!();
    println!("📊 Summary ({})", period);
    println!("   ─────────────────────────────────────────────");
    println!("   Total Income:  {:>12.2}", summary.total_income);
    println!("   Total Spent:   {:>12.2}", summary.total_expense);
    println!("   Net:           {:>12.2}", summary.net);

    if summary.category_totals.is_empty() {
        println!();
        println!("   No transactions in this period.");
        return Ok(());
    }

    println!();
    println!("   {:15} │ {:>12}", "Category", "Amount");
    println!("   ────────────────┼─────────────");
    for (category, total) in &summary.category_totals {
        println!("   {:15} │ {:>12.2}", category.as_str(), total);
    }

    if !summary.months_available.is_empty() {
        println!();
        println!("   Months: {}", summary.months_available.join(", "));
    }

    Ok(())
}

pub fn cmd_trends(snapshot: &Snapshot) -> Result<()> {
    let points = monthly_summary(&snapshot.transactions);

    println!();
    println!("📈 Monthly Trends");
    println!("   ─────────────────────────────────────────────");

    if points.is_empty() {
        println!("   No transactions loaded.");
        return Ok(());
    }

    println!(
        "   {:7} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Spent", "Income", "Net"
    );
    println!("   ────────┼──────────────┼──────────────┼─────────────");
    for point in &points {
        println!(
            "   {:7} │ {:>12.2} │ {:>12.2} │ {:>12.2}",
            point.month, point.spent, point.income, point.net
        );
    }

    Ok(())
}

pub fn cmd_transactions(snapshot: &Snapshot, period: &str, limit: usize) -> Result<()> {
    let period = parse_period(period)?;

    let mut rows: Vec<_> = snapshot
        .transactions
        .iter()
        .filter(|tx| period.contains(&tx.month_key()))
        .collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    let total = rows.len();
    rows.truncate(limit);

    println!();
    println!("🧾 Transactions ({}, {} of {})", period, rows.len(), total);
    println!("   ─────────────────────────────────────────────────────────────");

    if rows.is_empty() {
        println!("   No transactions match.");
        return Ok(());
    }

    println!(
        "   {:>6} │ {:16} │ {:10} │ {:>10} │ {}",
        "ID", "Date", "Category", "Amount", "Text"
    );
    for tx in rows {
        println!(
            "   {:>6} │ {:16} │ {:10} │ {:>10.2} │ {}",
            tx.id,
            tx.timestamp.format("%Y-%m-%d %H:%M"),
            tx.category.as_str(),
            tx.amount,
            truncate(&tx.text, 40)
        );
    }

    Ok(())
}

pub fn cmd_budgets(
    snapshot: &Snapshot,
    period: Option<&str>,
    config: &AnalyticsConfig,
) -> Result<()> {
    let Some(period) = resolve_month(snapshot, period)? else {
        println!("No transactions loaded; nothing to evaluate budgets against.");
        return Ok(());
    };

    if snapshot.budgets.is_empty() {
        println!("No budgets defined.");
        return Ok(());
    }

    let summary = aggregate(&snapshot.transactions, &period);
    let statuses =
        evaluate_budgets_with(&summary.category_totals, &snapshot.budgets, &config.budget);

    println!();
    println!("💰 Budgets ({})", period);
    println!(
        "   {:15} │ {:>10} │ {:>10} │ {:>6} │ {}",
        "Category", "Spent", "Limit", "Used", "Status"
    );
    println!("   ────────────────┼────────────┼────────────┼────────┼─────────");
    for status in &statuses {
        let used = if status.limit > 0.0 {
            format!("{:>5.0}%", status.ratio * 100.0)
        } else {
            "    —".to_string()
        };
        println!(
            "   {:15} │ {:>10.2} │ {:>10.2} │ {} │ {}",
            status.category.as_str(),
            status.spent,
            status.limit,
            used,
            status.status
        );
    }

    Ok(())
}

pub fn cmd_recurring(
    snapshot: &Snapshot,
    min_occurrences: Option<usize>,
    config: &AnalyticsConfig,
) -> Result<()> {
    let min_occurrences = min_occurrences.unwrap_or(config.recurring.min_occurrences);
    let groups = detect_recurring(&snapshot.transactions, min_occurrences);

    println!();
    println!("🔁 Recurring Payments (≥{} occurrences)", min_occurrences);
    println!("   ─────────────────────────────────────────────────────────────");

    if groups.is_empty() {
        println!("   No recurring payments detected.");
        return Ok(());
    }

    println!(
        "   {:15} │ {:>10} │ {:>5} │ {:10} │ {:10}",
        "Category", "Amount", "Seen", "First", "Last"
    );
    println!("   ────────────────┼────────────┼───────┼────────────┼───────────");
    for group in &groups {
        println!(
            "   {:15} │ {:>10.2} │ {:>5} │ {:10} │ {:10}",
            group.category.as_str(),
            group.amount,
            group.count,
            group.first_seen.format("%Y-%m-%d"),
            group.last_seen.format("%Y-%m-%d")
        );
    }

    Ok(())
}

pub fn cmd_insights(
    snapshot: &Snapshot,
    period: Option<&str>,
    config: &AnalyticsConfig,
) -> Result<()> {
    let Some(period) = resolve_month(snapshot, period)? else {
        println!("No transactions loaded; nothing to analyze.");
        return Ok(());
    };

    let insight = compute_insights_with(&snapshot.transactions, &period, &config.insight);

    println!();
    println!("💡 Insights ({})", period);
    println!("   ─────────────────────────────────────────────");
    match &insight.top_category {
        Some(top) => println!(
            "   Top category: {} ({:.2})",
            top.category.as_str(),
            top.amount
        ),
        None => println!("   Top category: none (no expenses in period)"),
    }
    println!("   Net: {:.2}", insight.net);

    if insight.spikes.is_empty() {
        println!("   No spending spikes.");
        return Ok(());
    }

    println!();
    println!(
        "   {:15} │ {:>10} │ {:>12} │ {:>6}",
        "Spike", "Current", "Avg/Month", "Ratio"
    );
    println!("   ────────────────┼────────────┼──────────────┼───────");
    for spike in &insight.spikes {
        println!(
            "   {:15} │ {:>10.2} │ {:>12.2} │ {:>5.1}x",
            spike.category.as_str(),
            spike.current,
            spike.avg_previous,
            spike.ratio
        );
    }

    Ok(())
}

pub fn cmd_alerts(snapshot: &Snapshot, config: &AnalyticsConfig) -> Result<()> {
    let alerts = build_alerts(&snapshot.transactions, &snapshot.budgets, config);

    println!();
    println!("🔔 Alerts");
    println!("   ─────────────────────────────────────────────────────────────");

    if alerts.is_empty() {
        println!("   No active alerts.");
        return Ok(());
    }

    for alert in &alerts {
        let badge = match alert.severity {
            tally_core::AlertSeverity::Critical => "❗",
            tally_core::AlertSeverity::Warning => "⚠️ ",
            tally_core::AlertSeverity::Info => "ℹ️ ",
        };
        println!("   {} [{}] {}", badge, alert.severity, alert.message);
    }

    Ok(())
}
