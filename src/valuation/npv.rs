//! Net Present Value

/// Discount annual cash flows to year 0
///
/// `cash_flows[0]` is the year-0 outlay and is not discounted; `cash_flows[i]`
/// is discounted by `(1 + rate)^i`. Returns `None` when `rate <= -1`, where
/// the discount factor is undefined.
pub fn npv(cash_flows: &[f64], rate: f64) -> Option<f64> {
    if !(rate > -1.0) {
        return None;
    }

    let growth = 1.0 + rate;
    let value = cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / growth.powi(t as i32))
        .sum();

    Some(value)
}
