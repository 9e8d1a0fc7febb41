use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{
    config::{Config, ConfigManager},
    core::{LedgerStore, Session},
    storage::{JsonFileStore, MemoryStore, PersistenceAdapter},
    view::{ChartCapability, ChartProjector, ViewProjector},
};

use super::{
    commands,
    output::{self, current_preferences},
    paths,
    registry::{CommandEntry, CommandRegistry},
    ui::{
        bar_chart::{ChartCanvas, TerminalBarChart},
        terminal_surface::TerminalSurface,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything one shell run owns.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session<TerminalSurface>,
    pub chart_canvas: ChartCanvas,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub home: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Self {
        Self::with_home(mode, paths::app_data_dir())
    }

    /// Opens the ledger under `home`. A store that cannot be opened degrades
    /// to an in-memory session; an unreadable config falls back to defaults.
    pub fn with_home(mode: CliMode, home: PathBuf) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::new(paths::config_file(&home));
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "config unreadable, using defaults");
                output::warning(format!("Configuration ignored: {}", err));
                Config::default()
            }
        };

        let chart_canvas = ChartCanvas::new();
        let store = LedgerStore::open(open_adapter(&home));
        let view = ViewProjector::new(
            TerminalSurface::new(current_preferences().plain_mode),
            config.money_format(),
        );
        let chart = build_chart(&config, &chart_canvas);
        let session = Session::start(store, view, chart);

        Self {
            mode,
            registry,
            session,
            chart_canvas,
            config_manager,
            config,
            home,
            last_command: None,
            running: true,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("ledger {} > ", self.session.theme().icon())
    }

    /// Prints the current list frame and totals.
    pub fn show_frame(&self) {
        output::block(self.session.surface().frame());
        self.report_write_failure();
    }

    /// Prints the chart, if one is active.
    pub fn show_chart(&self) {
        if self.session.chart().is_available() {
            output::block("");
            output::block(&self.chart_canvas.snapshot());
        }
    }

    fn report_write_failure(&self) {
        if let Some(err) = self.session.store().last_write_error() {
            output::warning(format!("Changes were not saved: {}", err));
        }
    }

    /// Pushes the current config into the live session.
    pub fn apply_config(&mut self) {
        self.session.set_money_format(self.config.money_format());
        let chart = build_chart(&self.config, &self.chart_canvas);
        self.session.replace_chart(chart);
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

fn open_adapter(home: &Path) -> PersistenceAdapter {
    match JsonFileStore::new(paths::store_dir(home)) {
        Ok(store) => PersistenceAdapter::new(store),
        Err(err) => {
            warn!(error = %err, "durable store unavailable, keeping data in memory");
            output::warning(format!(
                "Storage unavailable ({}); changes will not survive a restart.",
                err
            ));
            PersistenceAdapter::new(MemoryStore::new())
        }
    }
}

fn build_chart(config: &Config, canvas: &ChartCanvas) -> ChartProjector {
    if !config.chart_enabled {
        return ChartProjector::disabled();
    }
    let canvas = canvas.clone();
    let width = config.chart_width;
    let plain = current_preferences().plain_mode;
    let currency = config.currency_suffix.clone();
    ChartProjector::initialize(move || {
        TerminalBarChart::new(canvas, width, plain, &currency)
            .map(|chart| Box::new(chart) as Box<dyn ChartCapability>)
    })
}
