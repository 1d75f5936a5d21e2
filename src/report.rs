//! Text, CSV, and JSON renderings of an evaluation
//!
//! Currency and percentage formatting happens here and nowhere else.

use std::io::Write;

use serde::Serialize;

use crate::projection::{CompetitorYearRecord, YearRecord};
use crate::scenario::{Evaluation, SweepPoint};
use crate::session::Snapshot;

/// `$12,345` / `-$1,234`, whole dollars
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}", sign, grouped)
}

/// One decimal and a percent sign; `n/a` when undefined
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.1}%", value),
        None => "n/a".to_string(),
    }
}

fn format_optional_currency(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "n/a".to_string())
}

/// Primary and competitor tables followed by the headline metrics
pub fn write_evaluation<W: Write>(out: &mut W, evaluation: &Evaluation) -> std::io::Result<()> {
    let projection = &evaluation.projection;

    writeln!(
        out,
        "Utilization: {} trips/day, {} trips/year, {} miles/year",
        projection.utilization.trips_per_day,
        projection.annual_trips(),
        projection.annual_miles()
    )?;
    writeln!(out)?;

    write_primary_table(out, &projection.primary)?;
    writeln!(out)?;
    write_competitor_table(out, &projection.primary, &projection.competitor)?;
    writeln!(out)?;
    write_summary(out, evaluation)
}

pub fn write_primary_table<W: Write>(out: &mut W, records: &[YearRecord]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4} {:>14} {:>14} {:>9} {:>14} {:>12} {:>14} {:>14} {:>9}",
        "Year", "Hardware", "Vehicle Value", "Fare/Mi", "Revenue", "Capital", "Expenses", "Profit", "ROI"
    )?;
    writeln!(out, "{}", "-".repeat(112))?;

    for record in records {
        writeln!(
            out,
            "{:>4} {:>14} {:>14} {:>9} {:>14} {:>12} {:>14} {:>14} {:>9}",
            record.year,
            format_currency(record.hardware_cost),
            format_currency(record.vehicle_value),
            format!("${:.2}", record.fare_per_mile),
            format_currency(record.annual_revenue),
            format_currency(record.capital_cost),
            format_currency(record.annual_expenses),
            format_currency(record.annual_profit),
            format_percent(record.roi),
        )?;
    }

    Ok(())
}

pub fn write_competitor_table<W: Write>(
    out: &mut W,
    primary: &[YearRecord],
    competitor: &[CompetitorYearRecord],
) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4} {:>10} {:>10} {:>12} {:>12} {:>14}",
        "Year", "Fare", "ROI", "Comp. Fare", "Comp. ROI", "Comp. Profit"
    )?;
    writeln!(out, "{}", "-".repeat(67))?;

    for (record, rival) in primary.iter().zip(competitor) {
        writeln!(
            out,
            "{:>4} {:>10} {:>10} {:>12} {:>12} {:>14}",
            record.year,
            format!("${:.2}", record.fare_per_mile),
            format_percent(record.roi),
            format!("${:.2}", rival.fare_per_mile),
            format_percent(rival.roi),
            format_currency(rival.annual_profit),
        )?;
    }

    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, evaluation: &Evaluation) -> std::io::Result<()> {
    let valuation = &evaluation.valuation;
    let projection = &evaluation.projection;
    let totals = projection.summary();
    let profitable = projection.primary.iter().filter(|r| r.is_profitable()).count();
    let competitor_profitable = projection.competitor.iter().filter(|r| r.is_profitable()).count();

    writeln!(out, "Summary:")?;
    writeln!(out, "  Initial Investment: {}", format_currency(valuation.initial_investment))?;
    writeln!(out, "  Total Profit:       {}", format_currency(totals.total_profit))?;
    writeln!(out, "  Competitor Profit:  {}", format_currency(totals.total_competitor_profit))?;
    writeln!(out, "  Final Book Value:   {}", format_currency(totals.final_vehicle_value))?;
    writeln!(
        out,
        "  Profitable Years:   {} of {} (competitor {})",
        profitable,
        totals.total_years,
        competitor_profitable
    )?;
    writeln!(out, "  Year 1 ROI:         {}", format_percent(valuation.year_one_roi))?;
    writeln!(out, "  Payback Period:     {}", valuation.payback)?;
    writeln!(out, "  NPV:                {}", format_optional_currency(valuation.npv))?;
    writeln!(
        out,
        "  IRR ({}): {}",
        valuation.solver,
        valuation
            .irr_pct
            .map(|irr| format!("{:.1}%", irr))
            .unwrap_or_else(|| "did not converge".to_string())
    )
}

/// Sensitivity table, one line per swept value
pub fn write_sweep<W: Write>(out: &mut W, parameter: &str, points: &[SweepPoint]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>14} {:>10} {:>18} {:>16} {:>14}",
        parameter, "Year 1 ROI", "Payback", "NPV", "IRR"
    )?;
    writeln!(out, "{}", "-".repeat(76))?;

    for point in points {
        match &point.outcome {
            Ok(evaluation) => {
                let valuation = &evaluation.valuation;
                writeln!(
                    out,
                    "{:>14} {:>10} {:>18} {:>16} {:>14}",
                    point.value,
                    format_percent(valuation.year_one_roi),
                    valuation.payback.to_string(),
                    format_optional_currency(valuation.npv),
                    format_percent(valuation.irr_pct),
                )?;
            }
            Err(err) => writeln!(out, "{:>14} {}", point.value, err)?,
        }
    }

    Ok(())
}

pub fn write_snapshots<'a, W, I>(out: &mut W, snapshots: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Snapshot>,
{
    for snapshot in snapshots {
        writeln!(
            out,
            "#{} {} {}: investment {}, year 1 ROI {}, payback {}, NPV {}",
            snapshot.sequence,
            snapshot.captured_at.format("%Y-%m-%d %H:%M:%S"),
            snapshot.label.as_deref().unwrap_or("-"),
            format_currency(snapshot.initial_investment),
            format_percent(snapshot.summary.year_one_roi),
            snapshot.summary.payback,
            format_optional_currency(snapshot.summary.npv),
        )?;
    }
    Ok(())
}

/// Flat CSV row: one projected year, primary and competitor side by side
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "HardwareCost")]
    hardware_cost: f64,
    #[serde(rename = "VehicleValue")]
    vehicle_value: f64,
    #[serde(rename = "Depreciation")]
    depreciation: f64,
    #[serde(rename = "FarePerMile")]
    fare_per_mile: f64,
    #[serde(rename = "Revenue")]
    annual_revenue: f64,
    #[serde(rename = "CapitalCost")]
    capital_cost: f64,
    #[serde(rename = "Expenses")]
    annual_expenses: f64,
    #[serde(rename = "Profit")]
    annual_profit: f64,
    #[serde(rename = "ROI")]
    roi: Option<f64>,
    #[serde(rename = "CompetitorFarePerMile")]
    competitor_fare_per_mile: f64,
    #[serde(rename = "CompetitorRevenue")]
    competitor_revenue: f64,
    #[serde(rename = "CompetitorExpenses")]
    competitor_expenses: f64,
    #[serde(rename = "CompetitorProfit")]
    competitor_profit: f64,
    #[serde(rename = "CompetitorROI")]
    competitor_roi: Option<f64>,
}

/// Write the projection as CSV
pub fn write_csv<W: Write>(out: W, evaluation: &Evaluation) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    let projection = &evaluation.projection;

    for (record, rival) in projection.primary.iter().zip(&projection.competitor) {
        writer.serialize(CsvRow {
            year: record.year,
            hardware_cost: record.hardware_cost,
            vehicle_value: record.vehicle_value,
            depreciation: record.depreciation,
            fare_per_mile: record.fare_per_mile,
            annual_revenue: record.annual_revenue,
            capital_cost: record.capital_cost,
            annual_expenses: record.annual_expenses,
            annual_profit: record.annual_profit,
            roi: record.roi,
            competitor_fare_per_mile: rival.fare_per_mile,
            competitor_revenue: rival.annual_revenue,
            competitor_expenses: rival.annual_expenses,
            competitor_profit: rival.annual_profit,
            competitor_roi: rival.roi,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the whole evaluation as pretty-printed JSON
pub fn write_json<W: Write>(out: W, evaluation: &Evaluation) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::valuation::IrrSolver;

    fn default_evaluation() -> Evaluation {
        Evaluation::run(&Assumptions::default_robotaxi(), IrrSolver::FixedStep).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(173_275.0), "$173,275");
        assert_eq!(format_currency(-1_234_567.0), "-$1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(12.345)), "12.3%");
        assert_eq!(format_percent(None), "n/a");
    }

    #[test]
    fn test_text_report_mentions_headline_figures() {
        let mut out = Vec::new();
        write_evaluation(&mut out, &default_evaluation()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("14976 trips/year"));
        assert!(text.contains("$173,275"));
        assert!(text.contains("Payback Period:     1 year"));
        assert!(text.contains("did not converge"));
        assert!(text.contains("Profitable Years:   5 of 5 (competitor 5)"));
    }

    #[test]
    fn test_summary_reports_totals() {
        let mut assumptions = Assumptions::default_robotaxi();
        assumptions.pricing.fare_per_mile = 0.5;
        assumptions.years = 2;
        let evaluation = Evaluation::run(&assumptions, IrrSolver::FixedStep).unwrap();
        let totals = evaluation.projection.summary();

        let mut out = Vec::new();
        write_summary(&mut out, &evaluation).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(totals.total_profit < 0.0);
        assert!(text.contains(&format!("Total Profit:       {}", format_currency(totals.total_profit))));
        assert!(text.contains(&format!(
            "Final Book Value:   {}",
            format_currency(totals.final_vehicle_value)
        )));
        assert!(text.contains("Profitable Years:   0 of 2"));
    }

    #[test]
    fn test_csv_has_one_row_per_year() {
        let mut out = Vec::new();
        write_csv(&mut out, &default_evaluation()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Year,HardwareCost,VehicleValue"));
        assert!(lines[1].starts_with("1,173275"));
        assert!(lines[5].starts_with("5,"));
    }

    #[test]
    fn test_json_round_trips_records() {
        let evaluation = default_evaluation();
        let mut out = Vec::new();
        write_json(&mut out, &evaluation).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let primary = value["projection"]["primary"].as_array().unwrap();
        assert_eq!(primary.len(), 5);
        assert_eq!(primary[0]["year"], 1);
        assert_eq!(value["valuation"]["payback"]["year"], 1);
        assert!(value["valuation"]["irr_pct"].is_null());
    }
}
