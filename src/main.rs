//! sstview - view one month of a sea surface temperature dataset in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sstview::app::{App, ViewMode};
use sstview::config::ViewConfig;
use sstview::data::{DataReader, DatasetLayout};
use sstview::render::{ColorPalette, ColorScale};
use sstview::ui;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "sstview")]
#[command(
    about = "Fetch a sea surface temperature dataset and view one month as a heatmap or map",
    long_about = None
)]
struct Args {
    /// URL (OPeNDAP) or path of the NetCDF dataset
    #[arg(env = "SSTVIEW_SOURCE")]
    source: String,

    /// Time index to show, in months since January 1854
    #[arg(short = 't', long)]
    time_index: Option<usize>,

    /// Month to show as YYYY-MM (overrides --time-index)
    #[arg(long)]
    month: Option<String>,

    /// Lower bound of the color scale
    #[arg(long, default_value_t = ColorScale::DEFAULT_VMIN, allow_negative_numbers = true)]
    vmin: f64,

    /// Upper bound of the color scale
    #[arg(long, default_value_t = ColorScale::DEFAULT_VMAX, allow_negative_numbers = true)]
    vmax: f64,

    /// Color palette: viridis, plasma, rainbow or blue-red
    #[arg(long, default_value = "viridis")]
    palette: ColorPalette,

    /// Initial view: raster or map
    #[arg(long, default_value = "raster")]
    view: ViewMode,

    /// Do not draw coastlines on the map view
    #[arg(long)]
    no_coastlines: bool,

    /// Gridded variable to show
    #[arg(long, default_value = "sea_surface_temperature")]
    variable: String,

    /// Time bounds variable
    #[arg(long, default_value = "time_bounds")]
    time_bounds: String,

    /// Time dimension name
    #[arg(long, default_value = "time")]
    time_dim: String,

    /// Latitude dimension name
    #[arg(long, default_value = "latitude")]
    lat_dim: String,

    /// Longitude dimension name
    #[arg(long, default_value = "longitude")]
    lon_dim: String,

    /// Print the dataset summary and exit
    #[arg(long)]
    info: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn to_config(&self) -> sstview::Result<ViewConfig> {
        let mut config = ViewConfig::new(self.source.clone())
            .with_time(self.time_index, self.month.as_deref())?
            .with_scale(self.vmin, self.vmax, self.palette)?;

        config.layout = DatasetLayout {
            variable: self.variable.clone(),
            time_bounds: self.time_bounds.clone(),
            time_dim: self.time_dim.clone(),
            lat_dim: self.lat_dim.clone(),
            lon_dim: self.lon_dim.clone(),
        };
        config.view = self.view;
        config.coastlines = !self.no_coastlines;

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::File::create(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting sstview");
    }

    let config = args.to_config()?;

    let dataset = DataReader::open(&config.source)
        .with_context(|| format!("Could not load dataset from {}", config.source))?;

    if args.info {
        print!("{}", dataset);
        return Ok(());
    }

    // Select the first slice before touching the terminal so failures print plainly.
    let app = App::new(dataset, &config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app, poll_key);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("sstview exited");

    res.context("Terminal session failed")
}

fn run_app<B, F>(terminal: &mut Terminal<B>, mut app: App, mut next_key: F) -> Result<()>
where
    B: ratatui::backend::Backend,
    F: FnMut() -> io::Result<Option<KeyEvent>>,
{
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let Some(key) = next_key()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if !handle_key(&mut app, key) {
            return Ok(());
        }
    }
}

/// Wait briefly for a key press from the terminal.
fn poll_key() -> io::Result<Option<KeyEvent>> {
    if !event::poll(Duration::from_millis(100))? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Apply a key to the app. Returns false when the viewer should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q'))
        | (KeyModifiers::NONE, KeyCode::Esc)
        | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return false,

        // Switch between raster and map
        (KeyModifiers::NONE, KeyCode::Tab) => app.cycle_view_mode(),

        // Month navigation
        (KeyModifiers::NONE, KeyCode::Char(']'))
        | (KeyModifiers::NONE, KeyCode::Char('+'))
        | (KeyModifiers::NONE, KeyCode::Char('='))
        | (KeyModifiers::NONE, KeyCode::Right)
        | (KeyModifiers::NONE, KeyCode::PageUp) => app.next_month(),
        (KeyModifiers::NONE, KeyCode::Char('['))
        | (KeyModifiers::NONE, KeyCode::Char('-'))
        | (KeyModifiers::NONE, KeyCode::Left)
        | (KeyModifiers::NONE, KeyCode::PageDown) => app.prev_month(),

        // Appearance
        (KeyModifiers::NONE, KeyCode::Char('c')) => app.cycle_palette(),
        (KeyModifiers::NONE, KeyCode::Char('o')) => app.toggle_coastlines(),
        (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),

        _ => {},
    }
    true
}
