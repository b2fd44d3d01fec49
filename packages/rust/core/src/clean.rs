//! Dataset preparation: raw order rows → cleaned, typed rows.
//!
//! Each step runs over the whole table before the next one starts, so a row
//! that a later step would drop still aborts the pass if an earlier coercion
//! cannot read it. Rows keep their input order throughout.

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use curry_shared::{
    CleanedOrderRecord, DashboardError, ORDER_DATE_FORMAT, RawOrderRecord, Result,
    TIME_TAKEN_MARKER, columns, is_missing,
};

/// A textual raw column: its header name and how to read it.
struct Field {
    column: &'static str,
    get: fn(&RawOrderRecord) -> &str,
}

const AGE: Field = Field {
    column: columns::DELIVERY_PERSON_AGE,
    get: |r| r.delivery_person_age.as_str(),
};
const RATING: Field = Field {
    column: columns::DELIVERY_PERSON_RATINGS,
    get: |r| r.delivery_person_rating.as_str(),
};
const ORDER_DATE: Field = Field {
    column: columns::ORDER_DATE,
    get: |r| r.order_date.as_str(),
};
const MULTIPLE_DELIVERIES: Field = Field {
    column: columns::MULTIPLE_DELIVERIES,
    get: |r| r.multiple_deliveries.as_str(),
};
const TRAFFIC: Field = Field {
    column: columns::ROAD_TRAFFIC_DENSITY,
    get: |r| r.road_traffic_density.as_str(),
};
const WEATHER: Field = Field {
    column: columns::WEATHER_CONDITIONS,
    get: |r| r.weather_conditions.as_str(),
};
const CITY: Field = Field {
    column: columns::CITY,
    get: |r| r.city.as_str(),
};
const FESTIVAL: Field = Field {
    column: columns::FESTIVAL,
    get: |r| r.festival.as_str(),
};
const TIME_TAKEN: Field = Field {
    column: columns::TIME_TAKEN,
    get: |r| r.time_taken.as_str(),
};

/// A raw row plus the values coerced so far.
struct Staged<T> {
    /// 1-based position in the input sequence.
    row: usize,
    raw: RawOrderRecord,
    typed: T,
}

/// Clean a raw table.
///
/// 1. Drop rows whose age is the sentinel, coerce age to `i64`
/// 2. Coerce rating to `f64`
/// 3. Parse order date (`dd-mm-yyyy`)
/// 4. Drop rows whose multiple-deliveries is the sentinel, coerce to `i64`
/// 5. – 8. Drop rows whose traffic, weather, city, or festival is the sentinel
/// 9. Trim id, traffic, order type, vehicle type, city, courier id, festival
/// 10. Extract the numeral after `"(min) "` as time taken
///
/// Any malformed non-sentinel value aborts the whole pass.
#[instrument(skip_all, fields(rows = raw.len()))]
pub fn clean(raw: Vec<RawOrderRecord>) -> Result<Vec<CleanedOrderRecord>> {
    let total = raw.len();
    let mut rows: Vec<Staged<()>> = raw
        .into_iter()
        .enumerate()
        .map(|(i, raw)| Staged {
            row: i + 1,
            raw,
            typed: (),
        })
        .collect();

    drop_missing(&mut rows, &AGE);
    let rows = coerce(rows, &AGE, parse_int, |(), age| age)?;
    let rows = coerce(rows, &RATING, parse_float, |age, rating| (age, rating))?;
    let mut rows = coerce(rows, &ORDER_DATE, parse_order_date, |(age, rating), date| {
        (age, rating, date)
    })?;

    drop_missing(&mut rows, &MULTIPLE_DELIVERIES);
    let mut rows = coerce(
        rows,
        &MULTIPLE_DELIVERIES,
        parse_int,
        |(age, rating, date), multiple| (age, rating, date, multiple),
    )?;

    for field in [&TRAFFIC, &WEATHER, &CITY, &FESTIVAL] {
        drop_missing(&mut rows, field);
    }

    let cleaned = rows
        .into_iter()
        .map(finish)
        .collect::<Result<Vec<_>>>()?;

    info!(
        rows_in = total,
        rows_out = cleaned.len(),
        dropped = total - cleaned.len(),
        "dataset cleaned"
    );
    Ok(cleaned)
}

/// Remove rows whose `field` holds the missing-value sentinel.
fn drop_missing<T>(rows: &mut Vec<Staged<T>>, field: &Field) {
    let before = rows.len();
    rows.retain(|s| !is_missing((field.get)(&s.raw)));
    debug!(
        column = field.column,
        dropped = before - rows.len(),
        "dropped missing-value rows"
    );
}

/// Coerce `field` on every row, attaching the result to the typed state.
fn coerce<T, V, N>(
    rows: Vec<Staged<T>>,
    field: &Field,
    parse: fn(usize, &'static str, &str) -> Result<V>,
    attach: impl Fn(T, V) -> N,
) -> Result<Vec<Staged<N>>> {
    rows.into_iter()
        .map(|s| {
            let value = parse(s.row, field.column, (field.get)(&s.raw))?;
            Ok(Staged {
                row: s.row,
                raw: s.raw,
                typed: attach(s.typed, value),
            })
        })
        .collect()
}

/// Trim the categorical text and extract time taken.
fn finish(s: Staged<(i64, f64, NaiveDate, i64)>) -> Result<CleanedOrderRecord> {
    let (age, rating, order_date, multiple_deliveries) = s.typed;
    let time_taken_min = parse_time_taken(s.row, TIME_TAKEN.column, (TIME_TAKEN.get)(&s.raw))?;
    let raw = s.raw;

    Ok(CleanedOrderRecord {
        id: raw.id.trim().to_string(),
        delivery_person_id: raw.delivery_person_id.trim().to_string(),
        delivery_person_age: age,
        delivery_person_rating: rating,
        restaurant_latitude: raw.restaurant_latitude,
        restaurant_longitude: raw.restaurant_longitude,
        delivery_latitude: raw.delivery_latitude,
        delivery_longitude: raw.delivery_longitude,
        order_date,
        time_ordered: raw.time_ordered,
        time_order_picked: raw.time_order_picked,
        weather_conditions: raw.weather_conditions,
        road_traffic_density: raw.road_traffic_density.trim().to_string(),
        vehicle_condition: raw.vehicle_condition,
        type_of_order: raw.type_of_order.trim().to_string(),
        type_of_vehicle: raw.type_of_vehicle.trim().to_string(),
        multiple_deliveries,
        festival: raw.festival.trim().to_string(),
        city: raw.city.trim().to_string(),
        time_taken_min,
    })
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

fn malformed(row: usize, column: &'static str, value: &str, reason: impl ToString) -> DashboardError {
    DashboardError::MalformedNumeric {
        row,
        column,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Integer, ignoring surrounding whitespace.
fn parse_int(row: usize, column: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| malformed(row, column, value, e))
}

/// Float, ignoring surrounding whitespace. `NaN` is a valid spelling and an
/// empty cell reads as NaN.
fn parse_float(row: usize, column: &'static str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed
        .parse::<f64>()
        .map_err(|e| malformed(row, column, value, e))
}

fn parse_order_date(row: usize, column: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, ORDER_DATE_FORMAT).map_err(|_| {
        DashboardError::MalformedDate {
            row,
            column,
            value: value.to_string(),
        }
    })
}

/// The numeral between the first `"(min) "` marker and the next one, if any.
fn parse_time_taken(row: usize, column: &'static str, value: &str) -> Result<i64> {
    let numeral = value
        .split(TIME_TAKEN_MARKER)
        .nth(1)
        .ok_or_else(|| malformed(row, column, value, format!("no {TIME_TAKEN_MARKER:?} marker")))?;
    parse_int(row, column, numeral).map_err(|_| {
        malformed(row, column, value, format!("{numeral:?} is not an integer"))
    })
}
