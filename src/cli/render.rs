// Plain-text rendering of a browser snapshot
use crate::api::models::Recipe;
use crate::browser::{DisplayStatus, Mode, Snapshot};
use std::fmt::Write;

const MISSING: &str = "—";

/// One decimal, or "N/A" when the recipe is unrated.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{r:.1}"),
        None => "N/A".to_string(),
    }
}

/// Five-slot star bar with a half star for fractions of .5 and up.
pub fn stars(rating: Option<f64>) -> String {
    let rating = rating.unwrap_or(0.0).clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating.fract() >= 0.5;
    let empty = 5 - full - usize::from(half);

    format!(
        "{}{}{}",
        "★".repeat(full),
        if half { "½" } else { "" },
        "☆".repeat(empty)
    )
}

pub fn format_minutes(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{m} min"),
        _ => MISSING.to_string(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

fn or_missing(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => MISSING,
    }
}

/// Message shown instead of the table for every status without rows.
pub fn status_message(status: DisplayStatus, last_error: Option<&str>) -> Option<String> {
    match status {
        DisplayStatus::Idle => Some("Nothing loaded yet".to_string()),
        DisplayStatus::Loading => Some("Loading...".to_string()),
        DisplayStatus::NoResults => Some("No recipes matched your search".to_string()),
        DisplayStatus::NoData => Some("The database appears to be empty".to_string()),
        DisplayStatus::Error => Some(format!(
            "Something went wrong: {}",
            last_error.unwrap_or("Could not connect to the recipe server")
        )),
        DisplayStatus::Loaded => None,
    }
}

/// Recipe table with pagination footer.
pub fn render_list(snapshot: &Snapshot<'_>) -> String {
    if let Some(message) = status_message(snapshot.status, snapshot.last_error) {
        return format!("{message}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<6} {:<40} {:<14} {:<8} {:<11} {:<10}",
        "ID", "Title", "Cuisine", "Rating", "Total Time", "Serves"
    );
    let _ = writeln!(out, "{}", "-".repeat(96));

    for recipe in snapshot.items {
        let marker = if snapshot.selected_id == Some(recipe.id) {
            '>'
        } else {
            ' '
        };
        let serves = recipe
            .serves
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| MISSING.to_string());

        let _ = writeln!(
            out,
            "{} {:<6} {:<40} {:<14} {:<8} {:<11} {:<10}",
            marker,
            recipe.id,
            truncate(&recipe.title, 40),
            truncate(or_missing(recipe.cuisine.as_deref()), 14),
            format_rating(recipe.rating),
            format_minutes(recipe.total_time),
            truncate(&serves, 10)
        );
    }

    match (snapshot.mode, snapshot.pagination) {
        (Mode::Browse, Some(view)) => {
            let _ = writeln!(
                out,
                "\n{} total recipes    Page {} of {}",
                view.total, view.page, view.total_pages
            );
        }
        (Mode::Search, _) => {
            let _ = writeln!(out, "\n{} matching recipes", snapshot.total);
        }
        _ => {}
    }

    out
}

/// Detail panel for the selected recipe.
pub fn render_detail(recipe: &Recipe, expanded: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", or_missing(recipe.cuisine.as_deref()).to_uppercase());
    let _ = writeln!(out, "{}", recipe.title);

    if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n{description}\n");
    }

    let _ = writeln!(
        out,
        "  {:<12} {} {}",
        "Rating",
        stars(recipe.rating),
        format_rating(recipe.rating)
    );
    let serves = recipe
        .serves
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_else(|| MISSING.to_string());
    let _ = writeln!(out, "  {:<12} {}", "Serves", serves);
    let _ = writeln!(
        out,
        "  {:<12} {} {}",
        "Total Time",
        format_minutes(recipe.total_time),
        if expanded { "[-]" } else { "[+]" }
    );

    if expanded {
        let _ = writeln!(out, "    {:<10} {}", "Cook Time", format_minutes(recipe.cook_time));
        let _ = writeln!(out, "    {:<10} {}", "Prep Time", format_minutes(recipe.prep_time));
        if let Some(calories) = recipe.calories() {
            let _ = writeln!(out, "    {:<10} {calories}", "Calories");
        }
    }

    out
}

/// List followed by the detail panel when something is selected.
pub fn render(snapshot: &Snapshot<'_>) -> String {
    let mut out = render_list(snapshot);
    if let Some(recipe) = snapshot.selected {
        out.push('\n');
        out.push_str(&render_detail(recipe, snapshot.expanded));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe() -> Recipe {
        serde_json::from_value(json!({
            "id": 12,
            "title": "Sweet Potato Pie",
            "cuisine": "Southern Recipes",
            "rating": 4.8,
            "total_time": 115,
            "cook_time": 85,
            "prep_time": 15,
            "serves": "8 servings",
            "description": "Shared from a Southern recipe book.",
            "nutrients": {"calories": "389 kcal"}
        }))
        .unwrap()
    }

    #[test]
    fn test_rating_and_minutes() {
        assert_eq!(format_rating(Some(4.26)), "4.3");
        assert_eq!(format_rating(None), "N/A");
        assert_eq!(format_minutes(Some(30)), "30 min");
        assert_eq!(format_minutes(None), "—");
        assert_eq!(format_minutes(Some(0)), "—");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(Some(4.5)), "★★★★½");
        assert_eq!(stars(Some(3.2)), "★★★☆☆");
        assert_eq!(stars(None), "☆☆☆☆☆");
        assert_eq!(stars(Some(5.0)), "★★★★★");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Crème brûlée", 40), "Crème brûlée");
        assert_eq!(truncate("Crème brûlée au chocolat", 10), "Crème b...");
    }

    #[test]
    fn test_detail_hides_secondary_times_until_expanded() {
        let collapsed = render_detail(&recipe(), false);
        assert!(collapsed.contains("SOUTHERN RECIPES"));
        assert!(collapsed.contains("115 min [+]"));
        assert!(!collapsed.contains("Cook Time"));

        let expanded = render_detail(&recipe(), true);
        assert!(expanded.contains("Cook Time  85 min"));
        assert!(expanded.contains("Prep Time  15 min"));
        assert!(expanded.contains("Calories   389"));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            status_message(DisplayStatus::NoResults, None).unwrap(),
            "No recipes matched your search"
        );
        assert_eq!(
            status_message(DisplayStatus::NoData, None).unwrap(),
            "The database appears to be empty"
        );
        assert_eq!(
            status_message(DisplayStatus::Error, Some("Server error: boom")).unwrap(),
            "Something went wrong: Server error: boom"
        );
        assert!(status_message(DisplayStatus::Loaded, None).is_none());
    }
}
