use std::sync::Arc;

use factlens_core::{
    AnalysisBackend, AnalysisClient, AnalysisResult, ClientConfig, ClientError, Effect,
    ResultPresenter, Tab, UiEvent,
};
use iced::task::Handle;
use iced::widget::{button, column, row, text, text_input};
use iced::{Color, Element, Length, Task};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod panels;

const ERROR_COLOR: Color = Color::from_rgb(0.75, 0.22, 0.17);

fn main() -> iced::Result {
    init_tracing();
    iced::application(App::new, App::update, App::view)
        .title("factlens")
        .run()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("factlens_desktop=info,factlens_core=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();
}

struct App {
    presenter: ResultPresenter,
    client: Arc<AnalysisClient>,
    // aborts the in-flight analysis when the app is torn down
    in_flight: Option<Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    UrlChanged(String),
    Analyze,
    TabSelected(Tab),
    Analyzed(Result<AnalysisResult, Arc<ClientError>>),
    OpenLink(String),
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = ClientConfig::from_env().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default backend URL");
            ClientConfig::default()
        });

        (
            Self {
                presenter: ResultPresenter::new(),
                client: Arc::new(AnalysisClient::new(&config)),
                in_flight: None,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => {
                self.presenter.update(UiEvent::InputChanged(url));
            }
            Message::Analyze => {
                if let Effect::Dispatch(request) = self.presenter.update(UiEvent::Submit) {
                    let client = Arc::clone(&self.client);
                    let (task, handle) = Task::perform(
                        async move { client.analyze(&request).await.map_err(Arc::new) },
                        Message::Analyzed,
                    )
                    .abortable();
                    self.in_flight = Some(handle.abort_on_drop());
                    return task;
                }
            }
            Message::TabSelected(tab) => {
                self.presenter.update(UiEvent::TabSelected(tab));
            }
            Message::Analyzed(outcome) => {
                self.in_flight = None;
                match outcome {
                    Ok(result) => self.presenter.resolve(result),
                    Err(e) => self.presenter.reject(&e),
                }
            }
            Message::OpenLink(href) => {
                if let Err(e) = open::that_detached(&href) {
                    warn!(error = %e, href = %href, "could not open link, copying it instead");
                    return iced::clipboard::write(href);
                }
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let trigger_enabled = self.presenter.trigger_enabled();

        let input = text_input("Enter YouTube URL...", self.presenter.input())
            .on_input(Message::UrlChanged)
            .on_submit_maybe(trigger_enabled.then_some(Message::Analyze))
            .padding(10);
        let trigger = button("Analyze")
            .padding(10)
            .on_press_maybe(trigger_enabled.then_some(Message::Analyze));

        let mut content = column![
            text("factlens").size(24),
            row![input, trigger].spacing(10),
        ]
        .padding(20)
        .spacing(12)
        .width(Length::Fill);

        if self.presenter.busy_visible() {
            content = content.push(text("Analyzing video..."));
        }
        if let Some(error) = self.presenter.error_text() {
            content = content.push(text(error).color(ERROR_COLOR));
        }
        if let Some(result) = self.presenter.result() {
            content = content.push(panels::results(result, self.presenter.active_tab()));
        }

        content.into()
    }
}
