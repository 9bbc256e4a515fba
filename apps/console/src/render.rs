//! Table rendering for the terminal. Consumes state snapshots only; no
//! business logic lives here.

use chrono::{DateTime, NaiveDateTime};
use dashboard_core::{DashboardState, LoadState, ResourceSlot, StatsSnapshot};
use shared::domain::{OrderRecord, ProductRecord, UserRecord};

pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();
    out.push_str(&render_stats(&state.stats));
    out.push('\n');
    out.push_str(&render_users(&state.users));
    out.push('\n');
    out.push_str(&render_products(&state.products));
    out.push('\n');
    out.push_str(&render_orders(&state.orders));
    out
}

pub fn render_stats(stats: &StatsSnapshot) -> String {
    format!(
        "Users: {} | Products: {} | Orders: {}\n",
        stats.user_count, stats.product_count, stats.order_count
    )
}

fn placeholder(display: &LoadState, label: &str) -> Option<String> {
    match display {
        LoadState::Idle | LoadState::Loading => Some(format!("  Loading {label}...")),
        LoadState::Empty => Some(format!("  No {label} found")),
        LoadState::Failed(_) => Some(format!("  Error loading {label}")),
        LoadState::Loaded => None,
    }
}

pub fn render_users(slot: &ResourceSlot<UserRecord>) -> String {
    let mut out = String::from("USERS\n");
    if let Some(line) = placeholder(slot.display(), "users") {
        out.push_str(&line);
        out.push('\n');
        return out;
    }
    out.push_str(&format!(
        "{:<6} {:<18} {:<30} {}\n",
        "ID", "USERNAME", "EMAIL", "CREATED"
    ));
    for user in slot.records() {
        out.push_str(&format!(
            "{:<6} {:<18} {:<30} {}\n",
            user.id,
            user.username,
            user.email,
            format_date(user.created_at.as_deref())
        ));
    }
    out
}

pub fn render_products(slot: &ResourceSlot<ProductRecord>) -> String {
    let mut out = String::from("PRODUCTS\n");
    if let Some(line) = placeholder(slot.display(), "products") {
        out.push_str(&line);
        out.push('\n');
        return out;
    }
    out.push_str(&format!(
        "{:<6} {:<20} {:<28} {:>10} {:>7}\n",
        "ID", "NAME", "DESCRIPTION", "PRICE", "STOCK"
    ));
    for product in slot.records() {
        let description = product
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("N/A");
        out.push_str(&format!(
            "{:<6} {:<20} {:<28} {:>10} {:>7}\n",
            product.id,
            product.name,
            description,
            format_price(product.price),
            product.stock_quantity
        ));
    }
    out
}

pub fn render_orders(slot: &ResourceSlot<OrderRecord>) -> String {
    let mut out = String::from("ORDERS\n");
    if let Some(line) = placeholder(slot.display(), "orders") {
        out.push_str(&line);
        out.push('\n');
        return out;
    }
    out.push_str(&format!(
        "{:<6} {:<6} {:>10} {:<11} {}\n",
        "ID", "USER", "TOTAL", "STATUS", "CREATED"
    ));
    for order in slot.records() {
        out.push_str(&format!(
            "{:<6} {:<6} {:>10} {:<11} {}\n",
            order.id,
            order.user_id,
            format_price(order.total_amount),
            order.status,
            format_date(order.created_at.as_deref())
        ));
    }
    out
}

pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

/// The backend emits ISO-8601 with or without an offset; fall back to the
/// raw string when neither form parses.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "N/A".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%b %e, %Y %H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%b %e, %Y %H:%M").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::LoadOutcome;
    use shared::domain::{ProductId, UserId};

    fn loaded_users(records: Vec<UserRecord>) -> ResourceSlot<UserRecord> {
        let mut slot = ResourceSlot::default();
        let seq = slot.begin_load();
        slot.apply(seq, LoadOutcome::Loaded(records));
        slot
    }

    #[test]
    fn formats_prices_to_two_decimals() {
        assert_eq!(format_price(19.9), "$19.90");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn formats_missing_and_naive_dates() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("2024-01-05T09:30:00")), "Jan  5, 2024 09:30");
        assert_eq!(format_date(Some("not a date")), "not a date");
    }

    #[test]
    fn empty_and_failed_slots_render_placeholders() {
        let mut slot: ResourceSlot<UserRecord> = ResourceSlot::default();
        let seq = slot.begin_load();
        slot.apply(seq, LoadOutcome::Empty);
        assert!(render_users(&slot).contains("No users found"));

        let seq = slot.begin_load();
        slot.apply(seq, LoadOutcome::Failed("boom".into()));
        assert!(render_users(&slot).contains("Error loading users"));
    }

    #[test]
    fn loaded_users_render_one_row_per_record() {
        let slot = loaded_users(vec![UserRecord {
            id: UserId(1),
            username: "alice".into(),
            email: "a@x.com".into(),
            created_at: None,
        }]);
        let table = render_users(&slot);
        assert!(table.contains("alice"));
        assert!(table.contains("a@x.com"));
        assert!(table.contains("N/A"));
    }

    #[test]
    fn missing_product_description_renders_na() {
        let mut slot: ResourceSlot<ProductRecord> = ResourceSlot::default();
        let seq = slot.begin_load();
        slot.apply(
            seq,
            LoadOutcome::Loaded(vec![ProductRecord {
                id: ProductId(4),
                name: "Widget".into(),
                description: None,
                price: 9.5,
                stock_quantity: 3,
            }]),
        );
        let table = render_products(&slot);
        assert!(table.contains("N/A"));
        assert!(table.contains("$9.50"));
    }
}
