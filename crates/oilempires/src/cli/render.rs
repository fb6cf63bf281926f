//! Text rendering for CLI output.
//!
//! Renderers return strings so the binary decides where they go.

use std::fmt::Write as _;
use std::path::Path;

use serde_json::json;

use crate::content::{CompanyTable, OilMap, ProfileAccordion, TabBar, Timeline};
use crate::error::Result;
use crate::feedback::{FeedbackSection, Notice, NoticeLevel};
use crate::model::Company;
use crate::store::{ContentStore, StoreStats};

use super::OutputFormat;

const STAR: char = '\u{2605}';
const EMPTY_STAR: char = '\u{2606}';

/// The current page of the companies table, plus the selected company.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn companies(table: &CompanyTable, format: OutputFormat) -> Result<String> {
    let rows = table.current_page_rows();
    let mut out = String::new();

    match format {
        OutputFormat::Json => {
            let value = json!({
                "page": table.page(),
                "page_count": table.page_count(),
                "total": table.all().len(),
                "companies": rows,
                "selected": table.selected(),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            for company in rows {
                let _ = writeln!(
                    out,
                    "{} | {} | {} | {}",
                    company.name,
                    company.region,
                    company.founded_label(),
                    company.control_method
                );
            }
        }
        OutputFormat::Table => {
            let headers = ["Company", "Region", "Founded", "Control Method", "Icon"];
            let cells: Vec<[String; 5]> = rows
                .iter()
                .map(|c| {
                    [
                        c.name.clone(),
                        c.region.clone(),
                        c.founded_label().to_string(),
                        c.control_method.clone(),
                        c.icon.to_string(),
                    ]
                })
                .collect();

            let mut widths = headers.map(|h| h.chars().count());
            for row in &cells {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            write_row(&mut out, &headers.map(str::to_string), &widths);
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            let _ = writeln!(out, "{}", rule.join("-+-"));
            for row in &cells {
                write_row(&mut out, row, &widths);
            }
        }
    }

    if rows.is_empty() {
        out.push_str("No companies. Run `oilempires seed` to load the reference set.\n");
    }
    if table.paginator().shows_controls() {
        let _ = writeln!(out, "\nPage {} of {}", table.page(), table.page_count());
    }
    if let Some(company) = table.selected() {
        out.push('\n');
        out.push_str(&company_detail(company));
    }
    Ok(out)
}

fn write_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// Detail card for one company.
#[must_use]
pub fn company_detail(company: &Company) -> String {
    format!(
        "{}\n{} \u{b7} Founded {}\n\nControl Method: {}\n\n{}\n",
        company.name,
        company.region,
        company.founded_label(),
        company.control_method,
        company.description
    )
}

/// Rating summary and comments for one section.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn feedback<S: ContentStore + ?Sized>(
    section: &FeedbackSection<S>,
    format: OutputFormat,
) -> Result<String> {
    let comments = section.comments();

    if format == OutputFormat::Json {
        let value = json!({
            "section": section.section(),
            "title": section.title(),
            "rating": section.rating_summary(),
            "comments": comments,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", section.title(), section.section());

    match section.rating_summary() {
        Some(summary) if summary.count() > 0 => {
            let _ = writeln!(out, "{STAR} {summary}");
        }
        Some(_) => out.push_str("No ratings yet\n"),
        None => out.push_str("Ratings unavailable\n"),
    }

    out.push('\n');
    if comments.is_empty() {
        out.push_str("No comments yet. Be the first to share your thoughts!\n");
    }
    for comment in comments {
        let _ = writeln!(
            out,
            "{} ({})\n  {}",
            comment.name,
            comment.created_at.format("%b %-d, %Y"),
            comment.body
        );
    }
    Ok(out)
}

/// Filled and empty stars for a 1-5 value.
#[must_use]
pub fn stars(filled: u8) -> String {
    (1..=5)
        .map(|i| if i <= filled { STAR } else { EMPTY_STAR })
        .collect()
}

/// One line per notice.
#[must_use]
pub fn notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            let marker = match n.level {
                NoticeLevel::Info => "ok",
                NoticeLevel::Error => "error",
            };
            format!("[{marker}] {}: {}\n", n.title, n.description)
        })
        .collect()
}

/// The active timeline event with its navigation.
#[must_use]
pub fn timeline(timeline: &Timeline) -> String {
    let event = timeline.active_event();
    let mut out = String::new();

    let dots: String = (0..timeline.events().len())
        .map(|i| if i == timeline.active_index() { 'o' } else { '.' })
        .collect();
    let _ = writeln!(
        out,
        "{} {dots} {}",
        if timeline.can_go_prev() { "<" } else { " " },
        if timeline.can_go_next() { ">" } else { " " }
    );
    let _ = writeln!(
        out,
        "\n{} ({}/{})\n{}\n\n{}\n",
        event.year,
        timeline.active_index() + 1,
        timeline.events().len(),
        event.title,
        event.description
    );
    let _ = writeln!(out, "Industry Impact: {}", event.impact);
    let _ = writeln!(out, "Control Methods: {}", event.control);
    out
}

/// Map regions, with the active one and its routes called out.
#[must_use]
pub fn map(map: &OilMap) -> String {
    let mut out = String::from("Global Oil Control Map\n\n");
    let active = map.active_region().map(|r| r.id);

    for region in map.regions() {
        let marker = if Some(region.id) == active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<22} {:<16} ({}%, {}%)",
            region.name, region.company, region.top, region.left
        );
    }

    out.push_str("\nRoutes\n");
    for route in map.routes() {
        let marker = if map.is_route_active(route) { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {} -> {}", route.from, route.to);
    }

    if let Some(region) = map.active_region() {
        let _ = writeln!(out, "\n{}: {}", region.name, region.details);
    }
    out
}

/// Profile headers, with the expanded one shown in full.
#[must_use]
pub fn profiles(accordion: &ProfileAccordion) -> String {
    let mut out = String::new();
    for profile in accordion.profiles() {
        let open = accordion.is_expanded(profile.id);
        let _ = writeln!(
            out,
            "{} {} ({} \u{b7} Est. {})",
            if open { "v" } else { ">" },
            profile.name,
            profile.region,
            profile.year
        );
        if open {
            let _ = writeln!(out, "    Founder:        {}", profile.founder);
            let _ = writeln!(out, "    Primary Region: {}", profile.region);
            let _ = writeln!(out, "    Control Method: {}", profile.control_method);
            let _ = writeln!(out, "    {}", profile.description);
        }
    }
    out
}

/// The tab strip, active tab bracketed, and the section key its feedback
/// is filed under.
#[must_use]
pub fn tabs(bar: &TabBar) -> String {
    let strip: Vec<String> = bar
        .tabs()
        .map(|(tab, active)| {
            if active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    format!(
        "{}
Feedback section: {}
",
        strip.join(" | "),
        bar.active().id()
    )
}

/// Store statistics.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn status(stats: &StoreStats, database: &Path, json: bool) -> Result<String> {
    let latest = stats
        .latest_feedback
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    if json {
        let value = json!({
            "database_path": database,
            "companies": stats.companies,
            "comments": stats.comments,
            "ratings": stats.ratings,
            "latest_feedback": latest,
            "db_size_bytes": stats.db_size_bytes,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::from("oilempires status\n-----------------\n");
    let _ = writeln!(out, "Database:      {}", database.display());
    let _ = writeln!(out, "Companies:     {}", stats.companies);
    let _ = writeln!(out, "Comments:      {}", stats.comments);
    let _ = writeln!(out, "Ratings:       {}", stats.ratings);
    let _ = writeln!(
        out,
        "Last feedback: {}",
        latest.as_deref().unwrap_or("never")
    );
    let _ = writeln!(out, "Size:          {} bytes", stats.db_size_bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::content::Tab;
    use crate::feedback::FeedbackOptions;
    use crate::model::{IconTag, SectionKey};
    use crate::store::SqliteStore;

    fn table_with(n: usize) -> CompanyTable {
        let mut table = CompanyTable::new(5);
        table.replace(
            (0..n)
                .map(|i| {
                    Company::new(
                        format!("Firm {i}"),
                        "Baku",
                        None,
                        "Production",
                        IconTag::Droplet,
                        "Drills.",
                    )
                })
                .collect(),
        );
        table
    }

    #[test]
    fn test_companies_table_has_header_and_pages() {
        let table = table_with(7);
        let out = companies(&table, OutputFormat::Table).unwrap();
        assert!(out.starts_with("Company"));
        assert!(out.contains("Unknown"));
        assert!(out.contains("Page 1 of 2"));
    }

    #[test]
    fn test_companies_single_page_hides_controls() {
        let out = companies(&table_with(3), OutputFormat::Plain).unwrap();
        assert!(!out.contains("Page"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_companies_json() {
        let mut table = table_with(12);
        table.go_to_page(3);
        let out = companies(&table, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["page_count"], 3);
        assert_eq!(value["companies"].as_array().unwrap().len(), 2);
        assert!(value["selected"].is_null());
    }

    #[test]
    fn test_companies_empty_hint() {
        let out = companies(&table_with(0), OutputFormat::Table).unwrap();
        assert!(out.contains("oilempires seed"));
    }

    #[tokio::test]
    async fn test_feedback_plain() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let mut section = FeedbackSection::new(Arc::clone(&store), FeedbackOptions::new("map"));
        section.load().await;

        let out = feedback(&section, OutputFormat::Plain).unwrap();
        assert!(out.contains("Visitor Feedback [map]"));
        assert!(out.contains("No ratings yet"));
        assert!(out.contains("No comments yet"));

        section.set_name("Ida");
        section.set_body("Good map");
        section.submit_comment().await.unwrap();
        section.submit_rating(4).await.unwrap();

        let out = feedback(&section, OutputFormat::Plain).unwrap();
        assert!(out.contains("4.0 (1 rating)"));
        assert!(out.contains("Ida ("));
        assert!(out.contains("  Good map"));
    }

    #[tokio::test]
    async fn test_feedback_json() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        store
            .insert_comment(&SectionKey::new("map"), "Ida", "Hi")
            .await
            .unwrap();
        let mut section = FeedbackSection::new(store, FeedbackOptions::new("map"));
        section.load().await;

        let out = feedback(&section, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["section"], "map");
        assert_eq!(value["rating"]["average"], "0.0");
        assert_eq!(value["comments"][0]["name"], "Ida");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(3), "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}");
        assert_eq!(stars(0).chars().filter(|c| *c == STAR).count(), 0);
    }

    #[test]
    fn test_tabs_render_marks_active() {
        let mut bar = TabBar::new();
        assert!(tabs(&bar).starts_with("[Overview] | Key Companies |"));

        bar.select(Tab::Methods);
        let out = tabs(&bar);
        assert!(out.contains("Key Companies | [Control Methods] | Timeline"));
        assert!(out.ends_with("Feedback section: methods\n"));
    }

    #[test]
    fn test_timeline_render() {
        let mut t = Timeline::new();
        t.select(11);
        let out = timeline(&t);
        assert!(out.contains("1911 (12/12)"));
        assert!(out.starts_with('<'));
    }

    #[test]
    fn test_map_render_marks_active() {
        let mut m = OilMap::new();
        m.hover("indonesia");
        let out = map(&m);
        assert!(out.contains("* burma -> indonesia"));
        assert!(out.contains("  us -> russia"));
        assert!(out.contains("Dutch East Indies: Royal Dutch dominated"));
    }

    #[test]
    fn test_profiles_render() {
        let out = profiles(&ProfileAccordion::new());
        assert!(out.contains("v Standard Oil"));
        assert!(out.contains("John D. Rockefeller"));
        assert!(!out.contains("Marcus Samuel"));
    }

    #[test]
    fn test_status_render() {
        let stats = StoreStats {
            companies: 6,
            comments: 2,
            ratings: 3,
            latest_feedback: None,
            db_size_bytes: 4096,
        };
        let out = status(&stats, Path::new("/tmp/content.db"), false).unwrap();
        assert!(out.contains("Companies:     6"));
        assert!(out.contains("never"));

        let out = status(&stats, Path::new("/tmp/content.db"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ratings"], 3);
    }

    #[test]
    fn test_notices_render() {
        let out = notices(&[Notice {
            level: NoticeLevel::Info,
            title: "Comment Added".to_string(),
            description: "Thank you for your feedback!".to_string(),
        }]);
        assert_eq!(out, "[ok] Comment Added: Thank you for your feedback!\n");
    }
}
