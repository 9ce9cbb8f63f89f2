//! HTML fragments for the dashboard
//!
//! Every interpolated value is escaped.

use crate::application::dashboard::{ActivityRowView, StatCardView};
use crate::domain::services::escape_html;

/// Cards for `#statsGrid`
pub fn stats_html(cards: &[StatCardView]) -> String {
    let mut html = String::new();
    for card in cards {
        let class = card.change_class.unwrap_or_default();
        let change = match card.change_icon {
            Some(icon) => format!("{} {}", icon, escape_html(&card.change)),
            None => escape_html(&card.change),
        };
        html.push_str(&format!(
            concat!(
                r#"<div class="stats-card">"#,
                r#"<div class="stats-card__title">{title}</div>"#,
                r#"<div class="stats-card__value">{value}</div>"#,
                r#"<div class="stats-card__change {class}">{change} "#,
                r#"<span class="stats-card__period">from last month</span></div>"#,
                r#"</div>"#,
            ),
            title = escape_html(&card.title),
            value = escape_html(&card.value),
            class = class,
            change = change,
        ));
    }
    html
}

/// Rows for `#recentActivity tbody`
pub fn activity_rows_html(rows: &[ActivityRowView]) -> String {
    let mut html = String::new();
    for row in rows {
        html.push_str(&format!(
            concat!(
                "<tr>",
                "<td>{student}</td>",
                "<td>{degree}</td>",
                "<td>{date}</td>",
                r#"<td><span class="badge {badge}">{status}</span></td>"#,
                r#"<td><a href="{explorer}" target="_blank" rel="noopener" class="tx-link">{short}</a></td>"#,
                r#"<td><a href="{detail}" class="btn btn-sm btn-outline">View</a></td>"#,
                "</tr>",
            ),
            student = escape_html(&row.student),
            degree = escape_html(&row.degree),
            date = escape_html(&row.date_label),
            badge = row.badge_class,
            status = row.status,
            explorer = escape_html(&row.explorer_url),
            short = escape_html(&row.short_ref),
            detail = escape_html(&row.detail_url),
        ));
    }
    html
}
