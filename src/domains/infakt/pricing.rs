//! Line item price normalization.
//!
//! The inFakt API expects every amount as a decimal string with exactly two
//! fractional digits and a period as the decimal separator (`"1476.00"`).
//! Callers may hand in numbers or strings with either `.` or `,`; the output
//! always uses `.`. Rounding is half away from zero.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::error::{InfaktError, InfaktResult};
use super::models::{Amount, LineItem, NormalizedLineItem};

/// Fractional digits of every rendered amount.
const SCALE: u32 = 2;

/// Fields recomputed by the normalizer; stale caller copies are dropped.
const COMPUTED_FIELDS: [&str; 3] = ["net_price", "tax_price", "gross_price"];

/// Net, tax and gross totals of one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTotals {
    pub unit_net_price: Decimal,
    pub net: Decimal,
    pub tax: Decimal,
    pub gross: Decimal,
}

/// Parse a caller-supplied amount into an exact decimal.
pub fn parse_amount(amount: &Amount, field: &str) -> InfaktResult<Decimal> {
    match amount {
        Amount::Number(value) if value.is_finite() => Decimal::from_str(&value.to_string())
            .map_err(|_| InfaktError::invalid_amount(field, value.to_string())),
        Amount::Number(value) => Err(InfaktError::invalid_amount(field, value.to_string())),
        Amount::Text(raw) => parse_decimal_str(raw)
            .ok_or_else(|| InfaktError::invalid_amount(field, raw.as_str())),
    }
}

/// Parse a decimal string, accepting `,` as the decimal separator and
/// whitespace as a thousands separator.
///
/// When both `.` and `,` appear, the last one is the decimal separator.
fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let canonical = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    Decimal::from_str(&canonical).ok()
}

/// Round to two places and render with a period separator.
pub fn render_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    rounded.to_string()
}

/// Compute the totals of a line item.
///
/// `tax_rate` is a percentage; `None` marks an exempt item. Every value is
/// rounded to two places before the next one is derived from it, so
/// `gross == net + tax` holds exactly for the rendered strings.
///
/// Fails when a total cannot be represented with two fractional digits.
pub fn line_totals(
    unit_net_price: Decimal,
    quantity: u32,
    tax_rate: Option<Decimal>,
) -> InfaktResult<LineTotals> {
    let too_large = || InfaktError::invalid_amount("unit_net_price", unit_net_price.to_string());

    let unit_net_price = round(unit_net_price);
    let net = unit_net_price
        .checked_mul(Decimal::from(quantity))
        .map(round)
        .ok_or_else(too_large)?;
    let tax = match tax_rate {
        Some(rate) => net
            .checked_mul(rate)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .map(round)
            .ok_or_else(|| InfaktError::invalid_amount("tax_symbol", rate.to_string()))?,
        None => Decimal::ZERO,
    };
    let gross = net.checked_add(tax).ok_or_else(too_large)?;

    if ![unit_net_price, net, tax, gross].into_iter().all(fits_scale) {
        return Err(too_large());
    }

    Ok(LineTotals {
        unit_net_price,
        net,
        tax,
        gross,
    })
}

/// Parse and render a standalone amount (product or payment price).
pub fn normalize_amount(amount: &Amount, field: &str) -> InfaktResult<Amount> {
    let value = round(parse_amount(amount, field)?);
    if !fits_scale(value) {
        return Err(InfaktError::invalid_amount(field, value.to_string()));
    }
    Ok(Amount::Text(render_amount(value)))
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// Values close to Decimal::MAX have no room left for two fractional digits.
fn fits_scale(value: Decimal) -> bool {
    let mut scaled = value;
    scaled.rescale(SCALE);
    scaled.scale() == SCALE
}

/// Normalize a single line item.
pub fn normalize_line_item(item: LineItem) -> InfaktResult<NormalizedLineItem> {
    let unit_net_price = item.unit_net_price.to_decimal("unit_net_price")?;
    let quantity = item.quantity.filter(|q| *q > 0).unwrap_or(1);
    let totals = line_totals(unit_net_price, quantity, item.tax_symbol.rate())?;

    let mut extra = item.extra;
    for field in COMPUTED_FIELDS {
        extra.remove(field);
    }

    debug!(
        name = %item.name,
        quantity,
        unit_net_price = %totals.unit_net_price,
        net = %totals.net,
        tax = %totals.tax,
        gross = %totals.gross,
        "Normalized line item"
    );

    Ok(NormalizedLineItem {
        name: item.name,
        tax_symbol: item.tax_symbol.canonical(),
        quantity,
        unit_net_price: render_amount(totals.unit_net_price),
        net_price: render_amount(totals.net),
        tax_price: render_amount(totals.tax),
        gross_price: render_amount(totals.gross),
        unit: item.unit,
        extra,
    })
}

/// Normalize every line item, failing on the first unparseable price.
pub fn normalize(items: Vec<LineItem>) -> InfaktResult<Vec<NormalizedLineItem>> {
    items.into_iter().map(normalize_line_item).collect()
}
