use cwb_core::{DisplayState, format_time};

const NO_DATA: &str = "--";

/// Plain-text weather card.
pub fn render_card(state: &DisplayState) -> String {
    let location = if state.location_name.is_empty() {
        NO_DATA
    } else {
        &state.location_name
    };
    let temperature = state
        .rounded_temperature()
        .map_or_else(|| NO_DATA.to_string(), |t| t.to_string());
    let observed = state.observation_time.as_deref().and_then(format_time);

    let mut lines = vec![
        location.to_string(),
        or_no_data(state.description.as_deref()).to_string(),
        String::new(),
        format!(
            "{temperature}°C  {}",
            or_no_data(state.sky_condition.as_deref())
        ),
        String::new(),
        format!("風速  {} m/h", or_no_data(state.wind_speed.as_deref())),
        format!("降雨  {}%", or_no_data(state.rain_possibility.as_deref())),
        String::new(),
        format!("最後觀測資料：{}", observed.as_deref().unwrap_or(NO_DATA)),
    ];

    if state.is_loading {
        lines.push("載入中…".to_string());
    }
    if let Some(err) = &state.last_error {
        lines.push(format!("錯誤：{err}"));
    }

    frame(&lines)
}

fn or_no_data(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(NO_DATA)
}

fn frame(lines: &[String]) -> String {
    let width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
    let border = "─".repeat(width + 2);

    let mut out = format!("┌{border}┐\n");
    for line in lines {
        let pad = " ".repeat(width - display_width(line));
        out.push_str(&format!("│ {line}{pad} │\n"));
    }
    out.push_str(&format!("└{border}┘"));
    out
}

/// Terminal column width, counting CJK characters as two columns.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> DisplayState {
        DisplayState {
            location_name: "臺北".into(),
            temperature: Some("23.70".into()),
            wind_speed: Some("3.50".into()),
            observation_time: Some("2022-12-12T14:00:00+08:00".into()),
            description: Some("舒適".into()),
            rain_possibility: Some("48".into()),
            sky_condition: Some("多雲".into()),
            weather_code: Some("4".into()),
            is_loading: false,
            last_error: None,
        }
    }

    #[test]
    fn renders_loaded_card() {
        let card = render_card(&loaded());

        assert!(card.contains("臺北"));
        assert!(card.contains("24°C  多雲"));
        assert!(card.contains("風速  3.50 m/h"));
        assert!(card.contains("降雨  48%"));
        assert!(card.contains("最後觀測資料：下午2:00"));
        assert!(!card.contains("載入中"));
    }

    #[test]
    fn initial_state_shows_placeholders() {
        let card = render_card(&DisplayState::default());

        assert!(card.contains("--°C"));
        assert!(card.contains("最後觀測資料：--"));
        assert!(card.contains("載入中"));
    }

    #[test]
    fn shows_last_error() {
        let state = DisplayState {
            last_error: Some("forecast: timeout".into()),
            ..loaded()
        };
        assert!(render_card(&state).contains("錯誤：forecast: timeout"));
    }

    #[test]
    fn frame_lines_are_equally_wide() {
        let card = render_card(&loaded());
        let widths: Vec<usize> = card.lines().map(display_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{card}");
    }
}
