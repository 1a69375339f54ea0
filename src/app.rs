//! Application orchestration layer
//!
//! The [`Application`] owns the [`LogModel`] and the view. Input arrives from
//! the input thread and file changes from the watcher task; both are handled on
//! the application loop, which is the only place the model is touched.

pub mod runtime;
pub mod watcher;

use crate::error::Result;
use crate::format::{load_format, LogFormat};
use crate::input::{InputAction, ScrollDirection};
use crate::line_source::{FileLineProvider, LineProvider};
use crate::model::{LogModel, ModelEvent};
use crate::ui::{TableSnapshot, UIRenderer, ViewState};
use runtime::InputThread;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use watcher::{watch_loop, FormatWatch, WatchEvent};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const WATCH_CHANNEL_CAPACITY: usize = 64;

/// Startup options for [`Application`]
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_path: PathBuf,
    /// TOML format file; the plain one-column format is used without it
    pub format_path: Option<PathBuf>,
    pub poll_interval: Duration,
    /// Pick up lines appended to the log file
    pub follow: bool,
    /// Start with the view pinned to the last row
    pub auto_scroll: bool,
}

impl AppConfig {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            format_path: None,
            poll_interval: Duration::from_millis(250),
            follow: true,
            auto_scroll: false,
        }
    }
}

/// Application orchestrator
pub struct Application {
    config: AppConfig,
    provider: Arc<FileLineProvider>,
    model: LogModel,
    view_state: ViewState,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    /// Open the log file, load the format and wire the model to the view
    ///
    /// A format file that cannot be loaded at startup is an error; later
    /// reload failures only keep the previous format.
    pub fn new(config: AppConfig, ui_renderer: Box<dyn UIRenderer>) -> Result<Self> {
        let provider = Arc::new(FileLineProvider::open(&config.log_path)?);
        let format = match &config.format_path {
            Some(path) => load_format(path)?,
            None => LogFormat::plain(),
        };

        let (width, height) = ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(&config.log_path, width, height);
        view_state.format_name = format.name().to_string();
        view_state.auto_scroll = config.auto_scroll;

        let line_provider: Arc<dyn LineProvider> = provider.clone();
        let model = LogModel::with_format(line_provider, Arc::new(format));
        view_state.on_model_event(ModelEvent::Reset, model.row_count());

        Ok(Self {
            config,
            provider,
            model,
            view_state,
            ui_renderer,
        })
    }

    pub fn model(&self) -> &LogModel {
        &self.model
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let mut input_thread = InputThread::spawn(input_tx, INPUT_POLL_INTERVAL);

        let (watch_tx, mut watch_rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        let provider = self.config.follow.then(|| Arc::clone(&self.provider));
        let format_watch = self.config.format_path.as_ref().map(FormatWatch::new);
        let watcher = if provider.is_some() || format_watch.is_some() {
            Some(tokio::spawn(watch_loop(
                watch_tx,
                provider,
                format_watch,
                self.config.poll_interval,
            )))
        } else {
            None
        };

        let result = self.event_loop(&mut input_rx, &mut watch_rx).await;

        input_thread.stop();
        if let Some(watcher) = watcher {
            watcher.abort();
        }
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        input_rx: &mut mpsc::UnboundedReceiver<InputAction>,
        watch_rx: &mut mpsc::Receiver<WatchEvent>,
    ) -> Result<()> {
        self.render()?;
        loop {
            tokio::select! {
                action = input_rx.recv() => match action {
                    Some(action) => {
                        if !self.handle_action(action) {
                            break;
                        }
                    }
                    None => break,
                },
                Some(event) = watch_rx.recv() => {
                    self.handle_watch_event(event);
                    // apply everything already queued before drawing
                    while let Ok(event) = watch_rx.try_recv() {
                        self.handle_watch_event(event);
                    }
                },
            }
            self.render()?;
        }
        Ok(())
    }

    /// Apply one input action; returns false when the application should quit
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        if action == InputAction::ReloadFormat {
            self.reload_format();
            return true;
        }

        let view = &mut self.view_state;
        match action {
            InputAction::Quit => return false,
            InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines,
            } => view.scroll_down(lines),
            InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines,
            } => view.scroll_up(lines),
            InputAction::PageDown => view.page_down(),
            InputAction::PageUp => view.page_up(),
            InputAction::GoToStart => view.go_to_start(),
            InputAction::GoToEnd => view.go_to_end(),
            InputAction::ToggleAutoScroll => {
                let message = if view.toggle_auto_scroll() {
                    "Auto-scroll on"
                } else {
                    "Auto-scroll off"
                };
                view.status_line.set_message(message.to_string());
            }
            InputAction::Resize { width, height } => {
                view.update_terminal_size(width, height);
            }
            InputAction::ReloadFormat => {}
        }
        true
    }

    /// Apply a change reported by the watcher
    pub fn handle_watch_event(&mut self, event: WatchEvent) {
        match event {
            WatchEvent::Lines(change) => {
                let model_event = self.model.on_line_count_changed(change);
                self.view_state
                    .on_model_event(model_event, self.model.row_count());
            }
            WatchEvent::Format(format) => {
                self.install_format(format);
                self.view_state
                    .status_line
                    .set_message("Format reloaded".to_string());
            }
            WatchEvent::FormatError(message) => {
                self.view_state
                    .status_line
                    .set_message(format!("Format reload failed: {}", message));
            }
        }
    }

    fn reload_format(&mut self) {
        let Some(path) = self.config.format_path.clone() else {
            self.view_state
                .status_line
                .set_message("No format file".to_string());
            return;
        };
        match load_format(&path) {
            Ok(format) => {
                self.install_format(Arc::new(format));
                self.view_state
                    .status_line
                    .set_message("Format reloaded".to_string());
            }
            Err(e) => {
                log::warn!("Failed to reload format {}: {}", path.display(), e);
                self.view_state
                    .status_line
                    .set_message(format!("Format reload failed: {}", e));
            }
        }
    }

    fn install_format(&mut self, format: Arc<LogFormat>) {
        self.view_state.format_name = format.name().to_string();
        let model_event = self.model.set_format(format);
        self.view_state
            .on_model_event(model_event, self.model.row_count());
    }

    /// Rows currently on screen, pulled from the model
    pub fn snapshot(&mut self) -> TableSnapshot {
        TableSnapshot::capture(&mut self.model, self.view_state.visible_range())
    }

    fn render(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        self.ui_renderer.render(&self.view_state, &snapshot)?;
        self.view_state.status_line.clear_message();
        Ok(())
    }
}
