//! Plain-text rendering of the view reports.

use curry_core::PreparedView;
use curry_core::report::company::CompanyReport;
use curry_core::report::couriers::{CourierSpeed, CouriersReport, Ranking};
use curry_core::report::restaurants::RestaurantsReport;
use curry_core::report::{CityGroupSpread, GroupSpread};
use curry_shared::ViewConfig;

/// Left-aligned text table with columns sized to their widest cell.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn print(&self, title: &str) {
        println!("  {title}");
        if self.rows.is_empty() {
            println!("    (no orders)");
            println!();
            return;
        }

        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(h.len())
            })
            .collect();

        print_line(self.headers.iter().copied(), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        print_line(rule.iter().map(String::as_str), &widths);
        for row in &self.rows {
            print_line(row.iter().map(String::as_str), &widths);
        }
        println!();
    }
}

fn print_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}", w = *w))
        .collect();
    println!("    {}", padded.join("  ").trim_end());
}

fn num(v: f64) -> String {
    format!("{v:.2}")
}

fn opt_num(v: Option<f64>) -> String {
    v.map(num).unwrap_or_else(|| "-".into())
}

fn opt_int(v: Option<i64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

fn spread_table(title: &str, group: &'static str, spreads: &[GroupSpread]) {
    let mut table = Table::new(&[group, "mean", "std"]);
    for s in spreads {
        table.row(vec![s.group.clone(), num(s.mean), opt_num(s.std)]);
    }
    table.print(title);
}

fn city_spread_table(title: &str, group: &'static str, spreads: &[CityGroupSpread]) {
    let mut table = Table::new(&["city", group, "mean", "std"]);
    for s in spreads {
        table.row(vec![s.city.clone(), s.group.clone(), num(s.mean), opt_num(s.std)]);
    }
    table.print(title);
}

/// Heading shared by every view: filters in effect and row counts.
pub(crate) fn view_header(name: &str, config: &ViewConfig, prepared: &PreparedView) {
    let join = |set: &Option<std::collections::BTreeSet<String>>| match set {
        Some(values) => values.iter().cloned().collect::<Vec<_>>().join(", "),
        None => "any".into(),
    };

    println!();
    println!("  {name} view");
    println!(
        "  Cutoff:  {}",
        config
            .cutoff
            .map(|d| format!("before {d}"))
            .unwrap_or_else(|| "none".into())
    );
    println!("  Traffic: {}", join(&config.traffic));
    println!("  Weather: {}", join(&config.weather));
    println!(
        "  Orders:  {} read, {} cleaned, {} shown",
        prepared.raw_count,
        prepared.cleaned_count,
        prepared.rows.len()
    );
    println!();
}

pub(crate) fn company(report: &CompanyReport) {
    let mut table = Table::new(&["date", "orders"]);
    for d in &report.orders_by_day {
        table.row(vec![d.date.to_string(), d.orders.to_string()]);
    }
    table.print("Orders by day");

    let mut table = Table::new(&["traffic", "orders", "share"]);
    for t in &report.traffic_order_share {
        table.row(vec![t.traffic.clone(), t.orders.to_string(), num(t.share)]);
    }
    table.print("Orders by traffic");

    let mut table = Table::new(&["city", "traffic", "orders"]);
    for c in &report.traffic_order_city {
        table.row(vec![c.city.clone(), c.traffic.clone(), c.orders.to_string()]);
    }
    table.print("Orders by city and traffic");

    let mut table = Table::new(&["week", "orders"]);
    for w in &report.orders_by_week {
        table.row(vec![w.week.to_string(), w.orders.to_string()]);
    }
    table.print("Orders by week");

    let mut table = Table::new(&["week", "orders", "couriers", "per courier"]);
    for w in &report.order_share_by_week {
        table.row(vec![
            w.week.to_string(),
            w.orders.to_string(),
            w.couriers.to_string(),
            num(w.orders_per_courier),
        ]);
    }
    table.print("Orders per courier by week");

    let mut table = Table::new(&["city", "traffic", "latitude", "longitude"]);
    for l in &report.city_traffic_locations {
        table.row(vec![
            l.city.clone(),
            l.traffic.clone(),
            format!("{:.6}", l.latitude),
            format!("{:.6}", l.longitude),
        ]);
    }
    table.print("Central delivery location by city and traffic");
}

fn speed_table(ranking: Ranking, speeds: &[CourierSpeed]) {
    let mut table = Table::new(&["city", "courier", "mean time (min)"]);
    for s in speeds {
        table.row(vec![
            s.city.clone(),
            s.delivery_person_id.clone(),
            num(s.mean_time_min),
        ]);
    }
    table.print(&format!("Top {ranking} couriers per city"));
}

pub(crate) fn couriers(report: &CouriersReport) {
    let o = &report.overview;
    let mut table = Table::new(&["metric", "value"]);
    table.row(vec!["oldest courier".into(), opt_int(o.oldest_age)]);
    table.row(vec!["youngest courier".into(), opt_int(o.youngest_age)]);
    table.row(vec!["best vehicle condition".into(), opt_int(o.best_vehicle_condition)]);
    table.row(vec!["worst vehicle condition".into(), opt_int(o.worst_vehicle_condition)]);
    table.print("Overview");

    let mut table = Table::new(&["courier", "mean rating"]);
    for r in &report.avg_rating_per_courier {
        table.row(vec![r.delivery_person_id.clone(), num(r.mean_rating)]);
    }
    table.print("Mean rating per courier");

    spread_table("Rating by traffic", "traffic", &report.rating_by_traffic);
    spread_table("Rating by weather", "weather", &report.rating_by_weather);

    speed_table(Ranking::Fastest, &report.fastest);
    speed_table(Ranking::Slowest, &report.slowest);
}

pub(crate) fn restaurants(report: &RestaurantsReport) {
    let o = &report.overview;
    let mut table = Table::new(&["metric", "value"]);
    table.row(vec!["unique couriers".into(), o.unique_couriers.to_string()]);
    table.row(vec!["mean distance (km)".into(), opt_num(o.mean_distance_km)]);
    table.print("Overview");

    spread_table("Delivery time by festival", "festival", &o.festival_time);
    spread_table("Delivery time by city", "city", &report.time_by_city);
    city_spread_table(
        "Delivery time by city and order type",
        "order type",
        &report.time_by_city_order_type,
    );
    city_spread_table(
        "Delivery time by city and traffic",
        "traffic",
        &report.time_by_city_traffic,
    );

    let mut table = Table::new(&["city", "mean distance (km)"]);
    for d in &report.distance_by_city {
        table.row(vec![d.city.clone(), num(d.mean_distance_km)]);
    }
    table.print("Distance by city");
}
