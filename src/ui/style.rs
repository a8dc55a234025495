use iced::widget::text_input;
use iced::{Border, Color, Theme};

use super::app::FetchState;

/// URL-field border colors, one per fetch state. The idle state keeps the
/// theme's own border so the field looks ordinary until a fetch is underway.
pub fn url_input(state: FetchState) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    move |theme, status| {
        let mut style = text_input::default(theme, status);
        if let Some(color) = indicator_color(state) {
            style.border = Border {
                color,
                width: 2.0,
                ..style.border
            };
        }
        style
    }
}

fn indicator_color(state: FetchState) -> Option<Color> {
    match state {
        FetchState::Idle => None,
        FetchState::Pending => Some(Color::from_rgb(0.93, 0.76, 0.13)),
        FetchState::Succeeded => Some(Color::from_rgb(0.18, 0.72, 0.34)),
        FetchState::Failed => Some(Color::from_rgb(0.85, 0.22, 0.20)),
    }
}
