use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use ratewatch::app::App;
use ratewatch::data::{DeviceKind, Monitor};
use ratewatch::events;
use ratewatch::settings::Settings;
use ratewatch::ui::{self, Theme};

#[derive(Parser, Debug)]
#[command(name = "ratewatch")]
#[command(about = "Live throughput monitor for network interfaces and block devices")]
struct Args {
    /// Device to monitor (network interface or block device name)
    device: Option<String>,

    /// Treat the device as a block device instead of a network interface
    #[arg(short, long)]
    disk: bool,

    /// Update interval in milliseconds
    #[arg(short, long, value_name = "MS")]
    interval: Option<u64>,

    /// Fixed inbound maximum in KiB/s (disables automatic scaling)
    #[arg(long, value_name = "KIB")]
    max_in: Option<u64>,

    /// Fixed outbound maximum in KiB/s (disables automatic scaling)
    #[arg(long, value_name = "KIB")]
    max_out: Option<u64>,

    /// Settings file path
    #[arg(short, long, default_value = "ratewatch.json")]
    config: PathBuf,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,

    /// Sample for N ticks, print one JSON reading per line, and exit
    #[arg(long, value_name = "TICKS")]
    oneshot: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(&args.config)?;

    // Command-line arguments overlay the persisted settings
    if let Some(device) = &args.device {
        settings.device = device.clone();
    }
    if args.disk {
        settings.kind = DeviceKind::Disk;
    } else if args.device.is_some() {
        settings.kind = DeviceKind::Net;
    }
    if let Some(ms) = args.interval {
        settings.update_interval_ms = ms;
    }
    if let Some(kib) = args.max_in {
        settings.max_in_kib = kib;
        settings.auto_max = false;
    }
    if let Some(kib) = args.max_out {
        settings.max_out_kib = kib;
        settings.auto_max = false;
    }

    if args.save_config {
        settings.save(&args.config)?;
    }

    let monitor =
        Monitor::configure(settings.monitor_config()).context("invalid monitor configuration")?;

    if let Some(ticks) = args.oneshot {
        return run_oneshot(monitor, ticks);
    }

    let theme = Theme::auto_detect().with_bar_colors(&settings.color_in, &settings.color_out);
    run_tui(monitor, theme)
}

/// Sample for a fixed number of ticks and emit JSON-line readings.
///
/// Unlike the TUI, this mode can log: tracing output goes to stderr while
/// the readings go to stdout.
fn run_oneshot(mut monitor: Monitor, ticks: u32) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();

    for i in 0..ticks {
        if i > 0 {
            std::thread::sleep(monitor.interval());
        }
        let reading = monitor.tick();
        println!("{}", serde_json::to_string(reading)?);
    }

    Ok(())
}

/// Run the TUI around the given monitor
fn run_tui(monitor: Monitor, theme: Theme) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(monitor, theme);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Wake often enough to honor sub-second intervals without busy-waiting
    const POLL_TIMEOUT: Duration = Duration::from_millis(50);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(POLL_TIMEOUT)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Each tick runs to completion here before the loop can fire
        // another; ticks and key-driven reconfiguration never overlap.
        app.maybe_tick();
    }

    Ok(())
}
