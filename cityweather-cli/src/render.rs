//! Terminal rendering of the four screens.

use std::io::{self, Write};

use cityweather_core::{
    DetailsView, SelectionView, TextContrast, Theme, ViewState,
    view::{ERROR_MESSAGE, LOADING_MESSAGE, NOT_FOUND_MESSAGE},
};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

const COLUMN: usize = 12;

pub fn selection_lines(view: &SelectionView) -> Vec<String> {
    let mut lines = vec![view.title.to_string(), view.subtitle.to_string(), String::new()];
    lines.extend(view.entries.iter().map(|e| format!("  {:<16}{}", e.label, e.route)));
    lines
}

pub fn details_lines(view: &DetailsView) -> Vec<String> {
    let mut lines = Vec::new();

    if view.show_back {
        lines.push("← Back".to_string());
        lines.push(String::new());
    }

    lines.push(view.city_label.to_string());
    lines.push(view.condition_text.clone());
    lines.push(String::new());
    lines.push(format!("{} °C    {}", view.temperature, view.high));
    let indent = view.temperature.to_string().len() + 7;
    lines.push(format!("{:<indent$}{}", "", view.low));
    lines.push(String::new());
    lines.push(format!("{}  {}", view.icon.glyph(), view.icon));
    lines.push(String::new());

    lines.push(row(view.hour_cards.iter().map(|c| c.label)));
    lines.push(row(view.hour_cards.iter().map(|c| c.icon.glyph())));
    lines.push(row(view.hour_cards.iter().map(|c| c.temperature.as_str())));
    lines.push(String::new());

    lines.push(row(["Wind speed", "Sunrise", "Sunset", "Humidity"]));
    lines.push(row([
        view.wind.as_str(),
        view.sunrise.as_str(),
        view.sunset.as_str(),
        view.humidity.as_str(),
    ]));

    lines
}

fn row<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(|c| format!("{c:<width$}", width = COLUMN))
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn background(theme: Theme) -> Color {
    let (r, g, b) = theme.background_rgb();
    Color::Rgb { r, g, b }
}

fn foreground(text: TextContrast) -> Color {
    match text {
        TextContrast::Light => Color::White,
        // gray-800
        TextContrast::Dark => Color::Rgb { r: 0x1F, g: 0x29, b: 0x37 },
    }
}

/// Write `lines`, painting them on the theme background when one is given.
pub fn paint<W: Write>(out: &mut W, lines: &[String], theme: Option<Theme>) -> io::Result<()> {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;

    for line in lines {
        match theme {
            Some(theme) => queue!(
                out,
                SetBackgroundColor(background(theme)),
                SetForegroundColor(foreground(theme.text_contrast())),
                Print(format!(" {line:<width$}", width = width - 1)),
                ResetColor,
                Print("\n"),
            )?,
            None => queue!(out, Print(line), Print("\n"))?,
        }
    }

    out.flush()
}

pub fn print_selection<W: Write>(out: &mut W, view: &SelectionView) -> io::Result<()> {
    paint(out, &selection_lines(view), None)
}

pub fn print_not_found<W: Write>(out: &mut W) -> io::Result<()> {
    paint(out, &[NOT_FOUND_MESSAGE.to_string()], None)
}

pub fn print_state<W: Write>(
    out: &mut W,
    state: &ViewState,
    selection: &SelectionView,
) -> io::Result<()> {
    match state {
        ViewState::Selection => print_selection(out, selection),
        ViewState::Loading { city } => {
            paint(out, &[format!("{} · {}", city.label, LOADING_MESSAGE)], None)
        }
        ViewState::Details(view) => paint(out, &details_lines(view), Some(view.theme)),
        ViewState::Error { .. } => paint(out, &[ERROR_MESSAGE.to_string()], None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityweather_core::{
        CITIES, CityRegistry, FetchError, HourSlots, Icon, Navigation, Navigator, view::HourCard,
    };

    fn details(show_back: bool) -> DetailsView {
        DetailsView {
            city_label: "Recife",
            condition_text: "Light rain".into(),
            temperature: 30,
            high: "↑ 30°".into(),
            low: "↓ 18°".into(),
            icon: Icon::CloudRain,
            hour_cards: ["Dawn", "Morning", "Afternoon", "Night"]
                .into_iter()
                .map(|label| HourCard { label, icon: Icon::CloudRain, temperature: "24°C".into() })
                .collect(),
            wind: "14.8 km/h".into(),
            sunrise: "05:01 AM".into(),
            sunset: "05:32 PM".into(),
            humidity: "79%".into(),
            theme: Theme::Overcast,
            text: TextContrast::Dark,
            show_back,
        }
    }

    fn printed(state: &ViewState) -> String {
        let mut out = Vec::new();
        let selection = SelectionView::from_registry(&CityRegistry::default());
        print_state(&mut out, state, &selection).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn selection_lists_labels_and_routes() {
        let lines = selection_lines(&SelectionView::from_registry(&CityRegistry::default()));
        assert_eq!(lines[0], "Weather");
        assert_eq!(lines[1], "Select a city");
        assert!(lines.iter().any(|l| l.contains("Londres") && l.contains("/city/londres")));
        assert_eq!(lines.len(), 3 + CITIES.len());
    }

    #[test]
    fn details_show_bounds_cards_and_strip() {
        let text = details_lines(&details(false)).join("\n");
        assert!(text.contains("Recife"));
        assert!(text.contains("Light rain"));
        assert!(text.contains("↑ 30°"));
        assert!(text.contains("↓ 18°"));
        assert!(text.contains("Afternoon"));
        assert!(text.contains("14.8 km/h"));
        assert!(text.contains("05:32 PM"));
        assert!(text.contains("79%"));
        assert!(!text.contains("Back"));
    }

    #[test]
    fn back_action_only_for_in_memory_navigation() {
        assert_eq!(details_lines(&details(true))[0], "← Back");
    }

    #[test]
    fn error_screen_is_generic() {
        let text = printed(&ViewState::Error { city: &CITIES[0] });
        assert_eq!(text.trim(), ERROR_MESSAGE);
    }

    #[test]
    fn rejected_key_renders_without_status_or_key() {
        const KEY: &str = "wk_live_5f2c9a";
        let mut nav =
            Navigator::new(CityRegistry::default(), HourSlots::default(), Navigation::Routed);
        let attempt = nav.select_slug("recife").unwrap();
        assert!(nav.resolve(&attempt, Err(FetchError::UpstreamHttp(403))));

        let text = printed(nav.state());
        assert_eq!(text.trim(), ERROR_MESSAGE);
        assert!(!text.contains("403"));
        assert!(!text.contains(KEY));
    }

    #[test]
    fn loading_screen_names_city() {
        let text = printed(&ViewState::Loading { city: &CITIES[3] });
        assert!(text.contains("Recife"));
        assert!(text.contains(LOADING_MESSAGE));
    }

    #[test]
    fn details_are_painted_on_theme_background() {
        let text = printed(&ViewState::Details(Box::new(details(false))));
        // 0xCC = 204, the overcast background
        assert!(text.contains("48;2;204;204;204"));
        assert!(text.contains("Recife"));
    }

    #[test]
    fn row_pads_cells_to_columns() {
        assert_eq!(row(["a", "b"]), format!("{:<12}b", "a"));
    }
}
