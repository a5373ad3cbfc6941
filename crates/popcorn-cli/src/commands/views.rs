//! Terminal renderings of the result list, detail pane and watched list.

use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use popcorn_core::{format_avg, RatingDraft, WatchedSummary};
use popcorn_models::{MovieDetail, SearchResultItem, UserRating, WatchedMovie};

fn styled(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(header);
    table
}

fn heading(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn results_table(
    items: &[SearchResultItem],
    selected: Option<&str>,
    is_watched: impl Fn(&str) -> bool,
) -> Table {
    let mut table = styled(vec![heading("#"), heading("Title"), heading("Year"), heading("IMDb id")]);
    for (index, item) in items.iter().enumerate() {
        let mut title = Cell::new(&item.title);
        if selected == Some(item.imdb_id.as_str()) {
            title = title.fg(Color::Yellow).add_attribute(Attribute::Bold);
        }
        let marker = if is_watched(&item.imdb_id) { " ✓" } else { "" };
        table.add_row(vec![
            Cell::new(format!("{}{}", index + 1, marker)),
            title,
            Cell::new(&item.year),
            Cell::new(&item.imdb_id),
        ]);
    }
    table
}

pub fn detail_table(detail: &MovieDetail, rated: Option<UserRating>, draft: Option<&RatingDraft>) -> Table {
    let mut table = styled(vec![heading(&detail.title), Cell::new(&detail.year)]);
    table.add_row(vec![Cell::new("Released"), Cell::new(format!("{} • {}", detail.released, detail.runtime))]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(&detail.genre)]);
    table.add_row(vec![Cell::new("IMDb rating"), Cell::new(format!("⭐ {}", detail.imdb_rating))]);
    table.add_row(vec![Cell::new("Plot"), Cell::new(&detail.plot)]);
    table.add_row(vec![Cell::new("Starring"), Cell::new(&detail.actors)]);
    table.add_row(vec![Cell::new("Directed by"), Cell::new(&detail.director)]);

    match (rated, draft) {
        (Some(rating), _) => {
            table.add_row(vec![
                Cell::new("Your rating"),
                Cell::new(format!("You rated this movie {} ⭐", rating)).fg(Color::Green),
            ]);
        }
        (None, Some(draft)) => {
            let value = draft
                .rating()
                .map(|r| format!("{} / {}", r, UserRating::MAX))
                .unwrap_or_else(|| "not rated yet".to_string());
            table.add_row(vec![Cell::new("Your rating"), Cell::new(value)]);
        }
        (None, None) => {}
    }
    table
}

pub fn summary_table(summary: &WatchedSummary) -> Table {
    let mut table = styled(vec![heading("Movies you watched"), Cell::new(summary.count)]);
    table.add_row(vec![Cell::new("Average IMDb rating"), Cell::new(format_avg(summary.avg_imdb_rating))]);
    table.add_row(vec![Cell::new("Average your rating"), Cell::new(format_avg(summary.avg_user_rating))]);
    table.add_row(vec![Cell::new("Average runtime"), Cell::new(format!("{} min", format_avg(summary.avg_runtime)))]);
    table
}

pub fn watched_table(movies: &[WatchedMovie]) -> Table {
    let mut table = styled(vec![
        heading("Title"),
        heading("IMDb"),
        heading("Yours"),
        heading("Runtime"),
        heading("IMDb id"),
    ]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(&movie.title),
            Cell::new(format!("⭐ {}", movie.imdb_rating)),
            Cell::new(format!("🌟 {}", movie.user_rating)),
            Cell::new(format!("{} min", movie.runtime)),
            Cell::new(&movie.imdb_id),
        ]);
    }
    table
}

/// Expanded/collapsed state of each pane in interactive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub results: bool,
    pub detail: bool,
    pub summary: bool,
    pub watched: bool,
}

impl Default for Panes {
    fn default() -> Self {
        Self { results: true, detail: true, summary: true, watched: true }
    }
}

impl Panes {
    /// Flip the named pane; returns its new state, or `None` for an unknown name
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let pane = match name.trim().to_lowercase().as_str() {
            "results" | "r" => &mut self.results,
            "detail" | "d" => &mut self.detail,
            "summary" | "s" => &mut self.summary,
            "watched" | "w" => &mut self.watched,
            _ => return None,
        };
        *pane = !*pane;
        Some(*pane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> SearchResultItem {
        SearchResultItem {
            imdb_id: id.to_string(),
            title: title.to_string(),
            year: "2005".to_string(),
            poster: "N/A".to_string(),
        }
    }

    #[test]
    fn test_results_table_marks_watched_titles() {
        let items = vec![item("tt0372784", "Batman Begins"), item("tt1877830", "The Batman")];
        let rendered = results_table(&items, None, |id| id == "tt1877830").to_string();
        assert!(rendered.contains("Batman Begins"));
        assert!(rendered.contains("2 ✓"));
        assert!(!rendered.contains("1 ✓"));
    }

    #[test]
    fn test_summary_table_uses_two_decimals() {
        let summary = WatchedSummary {
            count: 0,
            avg_imdb_rating: 0.0,
            avg_user_rating: 0.0,
            avg_runtime: 0.0,
        };
        let rendered = summary_table(&summary).to_string();
        assert!(rendered.contains("0.00 min"));
    }

    #[test]
    fn test_panes_toggle() {
        let mut panes = Panes::default();
        assert_eq!(panes.toggle("watched"), Some(false));
        assert_eq!(panes.toggle("W"), Some(true));
        assert_eq!(panes.toggle("r"), Some(false));
        assert!(!panes.results);
        assert_eq!(panes.toggle("poster"), None);
    }
}
