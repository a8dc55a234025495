use std::sync::Arc;

use anyhow::Result;
use iced::font::{Font, Weight};
use iced::widget::{column, container, image, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use tracing::warn;

use crate::config::Config;
use crate::media::{self, MediaInfo, MetadataFetcher};
use crate::utils::format_duration;

use super::style;

const URL_PLACEHOLDER: &str = "URL";

/// Default thumbnail shown before the first fetch, after clearing, and when
/// a preview image cannot be downloaded.
static DEFAULT_THUMBNAIL: &[u8] = include_bytes!("../../assets/placeholder.png");

pub fn run(config: Config) -> Result<()> {
    iced::application(Glimpse::title, Glimpse::update, Glimpse::view)
        .theme(Glimpse::theme)
        .window_size(Size::new(620.0, 700.0))
        .run_with(move || Glimpse::new(config))?;

    Ok(())
}

/// Visual fetch lifecycle of the URL field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Result of one completed fetch task: the parsed metadata plus the preview
/// image, when one could be downloaded.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub media: MediaInfo,
    pub image: Option<image::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    UrlChanged(String),
    DebounceElapsed(u64),
    FetchCompleted(u64, Result<FetchOutcome, String>),
    ExtractorChecked(Result<(), String>),
}

pub struct Glimpse {
    fetcher: Arc<MetadataFetcher>,
    debounce: std::time::Duration,
    url_input: String,
    fetch_state: FetchState,
    /// Bumped on every keystroke; task results carrying an older value were
    /// superseded and are dropped on arrival.
    generation: u64,
    media: Option<MediaInfo>,
    thumbnail: image::Handle,
    placeholder: image::Handle,
    status: String,
}

impl Glimpse {
    pub fn new(config: Config) -> (Self, Task<Message>) {
        let fetcher = Arc::new(MetadataFetcher::new(&config));
        let placeholder = image::Handle::from_bytes(DEFAULT_THUMBNAIL);

        let app = Self {
            fetcher: fetcher.clone(),
            debounce: config.debounce(),
            url_input: String::new(),
            fetch_state: FetchState::default(),
            generation: 0,
            media: None,
            thumbnail: placeholder.clone(),
            placeholder,
            status: String::new(),
        };

        let check = Task::perform(
            async move { fetcher.test_setup().await.map_err(|e| e.to_string()) },
            Message::ExtractorChecked,
        );

        (app, check)
    }

    pub fn title(&self) -> String {
        match &self.media {
            Some(media) => format!("Glimpse - {}", media.title),
            None => String::from("Glimpse"),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(value) => {
                self.url_input = value;
                self.media = None;
                self.thumbnail = self.placeholder.clone();
                self.generation += 1;

                if self.url_input.trim().is_empty() {
                    self.fetch_state = FetchState::Idle;
                    return Task::none();
                }

                self.fetch_state = FetchState::Pending;
                let generation = self.generation;
                let quiet = self.debounce;

                Task::perform(
                    async move {
                        tokio::time::sleep(quiet).await;
                        generation
                    },
                    Message::DebounceElapsed,
                )
            }
            Message::DebounceElapsed(generation) => {
                if generation != self.generation {
                    return Task::none();
                }

                let fetcher = self.fetcher.clone();
                let url = self.url_input.trim().to_string();

                Task::perform(fetch_media(fetcher, url), move |result| {
                    Message::FetchCompleted(generation, result)
                })
            }
            Message::FetchCompleted(generation, result) => {
                if generation != self.generation {
                    return Task::none();
                }

                match result {
                    Ok(outcome) => {
                        self.fetch_state = FetchState::Succeeded;
                        self.thumbnail = outcome
                            .image
                            .unwrap_or_else(|| self.placeholder.clone());
                        self.media = Some(outcome.media);
                    }
                    Err(e) => {
                        warn!("Metadata fetch failed: {}", e);
                        self.fetch_state = FetchState::Failed;
                        self.media = None;
                        self.thumbnail = self.placeholder.clone();
                    }
                }

                Task::none()
            }
            Message::ExtractorChecked(result) => {
                if let Err(e) = result {
                    warn!("Metadata fetcher self-check failed: {}", e);
                    self.status = e;
                }

                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let url_field = text_input(URL_PLACEHOLDER, &self.url_input)
            .on_input(Message::UrlChanged)
            .size(22)
            .padding(12)
            .style(style::url_input(self.fetch_state));

        let title = self.media.as_ref().map(|m| m.title.as_str()).unwrap_or("");
        let duration = self
            .media
            .as_ref()
            .map(|m| format_duration(m.duration_secs))
            .unwrap_or_default();
        let formats_line = self
            .media
            .as_ref()
            .map(|m| format!("{} formats available", m.formats.len()))
            .unwrap_or_default();
        let description = self
            .media
            .as_ref()
            .map(|m| m.description.as_str())
            .unwrap_or("");

        let info_panel = column![
            text(title).size(20).font(Font {
                weight: Weight::Bold,
                ..Font::DEFAULT
            }),
            image(self.thumbnail.clone())
                .width(Length::Fixed(320.0))
                .height(Length::Fixed(240.0)),
            text(duration).size(16),
            text(formats_line).size(13),
            scrollable(text(description).size(14).width(Length::Fill))
                .height(Length::Fixed(180.0)),
        ]
        .spacing(10)
        .align_x(Alignment::Center);

        let content = column![
            url_field,
            text("Information").size(13),
            container(info_panel)
                .style(container::bordered_box)
                .padding(16)
                .width(Length::Fill),
            text(&self.status).size(12).style(text::danger),
        ]
        .spacing(12)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

async fn fetch_media(fetcher: Arc<MetadataFetcher>, url: String) -> Result<FetchOutcome, String> {
    let media = match fetcher.fetch(&url).await {
        Ok(Some(media)) => media,
        Ok(None) => return Err("No URL to fetch".to_string()),
        Err(e) => return Err(e.to_string()),
    };

    let image = match media.thumbnail_url.as_deref() {
        Some(thumb_url) => match media::fetch_image(thumb_url).await {
            Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
            Err(e) => {
                warn!("Thumbnail download failed, keeping placeholder: {}", e);
                None
            }
        },
        None => None,
    };

    Ok(FetchOutcome { media, image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn app() -> Glimpse {
        let (app, _task) = Glimpse::new(Config::default());
        app
    }

    fn media() -> MediaInfo {
        MediaInfo {
            title: "A title".to_string(),
            description: "Some words".to_string(),
            duration_secs: 125,
            thumbnail_url: None,
            formats: Map::new(),
        }
    }

    fn succeed(app: &mut Glimpse) {
        let generation = app.generation;
        let _ = app.update(Message::FetchCompleted(
            generation,
            Ok(FetchOutcome {
                media: media(),
                image: None,
            }),
        ));
    }

    #[test]
    fn test_whitespace_input_stays_idle() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("   \t ".to_string()));
        assert_eq!(app.fetch_state, FetchState::Idle);
        assert!(app.media.is_none());
    }

    #[test]
    fn test_keystroke_goes_pending_and_clears_metadata() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://example.com/v".to_string()));
        succeed(&mut app);
        assert_eq!(app.fetch_state, FetchState::Succeeded);
        assert!(app.media.is_some());

        let _ = app.update(Message::UrlChanged("https://example.com/v2".to_string()));
        assert_eq!(app.fetch_state, FetchState::Pending);
        assert!(app.media.is_none());
    }

    #[test]
    fn test_failure_clears_all_displayed_state() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://example.com/v".to_string()));
        succeed(&mut app);

        let _ = app.update(Message::UrlChanged("https://example.com/v2".to_string()));
        let generation = app.generation;
        let _ = app.update(Message::FetchCompleted(
            generation,
            Err("extractor exploded".to_string()),
        ));
        assert_eq!(app.fetch_state, FetchState::Failed);
        assert!(app.media.is_none());
    }

    #[test]
    fn test_stale_fetch_result_is_dropped() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://example.com/v".to_string()));
        let stale = app.generation;
        let _ = app.update(Message::UrlChanged("https://example.com/v2".to_string()));

        let _ = app.update(Message::FetchCompleted(
            stale,
            Ok(FetchOutcome {
                media: media(),
                image: None,
            }),
        ));
        assert_eq!(app.fetch_state, FetchState::Pending);
        assert!(app.media.is_none());
    }

    #[test]
    fn test_stale_debounce_does_not_refetch() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://example.com/v".to_string()));
        let stale = app.generation;
        let _ = app.update(Message::UrlChanged(String::new()));

        let _ = app.update(Message::DebounceElapsed(stale));
        assert_eq!(app.fetch_state, FetchState::Idle);
    }

    #[test]
    fn test_clearing_input_after_success_resets_to_idle() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://example.com/v".to_string()));
        succeed(&mut app);

        let _ = app.update(Message::UrlChanged(String::new()));
        assert_eq!(app.fetch_state, FetchState::Idle);
        assert!(app.media.is_none());
    }

    #[test]
    fn test_extractor_check_failure_shows_status() {
        let mut app = app();
        let _ = app.update(Message::ExtractorChecked(Err(
            "No metadata extractors are available".to_string(),
        )));
        assert!(app.status.contains("No metadata extractors"));
    }
}
