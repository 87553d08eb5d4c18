use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::path::PathBuf;

use bufwords::config::{self, Config};
use bufwords::render::{render_json, render_text};
use bufwords::{BufferId, BufferSource, Context, Event, MemoryHost, Refresh};

/// Buffer keyword completion from files
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Buffer keyword completion: gathers cached words from files loaded as editor buffers"
)]
struct Args {
    /// Files to load as buffers, numbered from 1 in argument order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Filetype for every buffer instead of detecting it from the extension
    #[arg(long)]
    filetype: Option<String>,

    /// Buffer requesting completion
    #[arg(long, default_value_t = 1)]
    current: u32,

    /// Buffers visible in the current tab (defaults to the current buffer)
    #[arg(long, value_delimiter = ',')]
    tab: Vec<u32>,

    /// Buffers to unload before the current buffer is refreshed again
    #[arg(long, value_delimiter = ',')]
    unload: Vec<u32>,

    /// Offer words from every cached buffer regardless of filetype
    #[arg(long)]
    any_filetype: bool,

    /// Skip buffers larger than this many bytes
    #[arg(long)]
    size_limit: Option<usize>,

    /// Scan only the last N lines of each buffer
    #[arg(long)]
    max_lines: Option<usize>,

    /// Print candidates as JSON
    #[arg(long)]
    json: bool,

    /// Config file to use instead of ~/.config/bufwords/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Writes to /tmp/bufwords-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    init_debug_log();

    color_eyre::install()?;

    let args = Args::parse();

    let config_result = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    if let Some(warning) = &config_result.warning {
        eprintln!("Warning: {}", warning);
    }
    let config = apply_overrides(config_result.config, &args);

    let mut host = MemoryHost::new();
    for path in &args.files {
        host.open_file(path, args.filetype.as_deref())
            .wrap_err_with(|| format!("Failed to load {}", path.display()))?;
    }

    let current = BufferId(args.current);
    if !host.buffer_ids().contains(&current) {
        return Err(eyre!(
            "No buffer {} ({} files loaded)",
            current,
            args.files.len()
        ));
    }

    let mut source = BufferSource::new(&config);

    for id in host.buffer_ids() {
        host.set_current(id);
        dispatch(&mut source, &host, &config, Event::BufReadPost);
    }

    if !args.unload.is_empty() {
        for id in &args.unload {
            host.unload(BufferId(*id));
        }
        host.set_current(current);
        dispatch(&mut source, &host, &config, Event::BufWritePost);
    }

    let tab = if args.tab.is_empty() {
        vec![current]
    } else {
        args.tab.iter().copied().map(BufferId).collect()
    };
    host.set_tab(tab);
    host.set_current(current);

    let context = context_for(&host, &config, current);
    let result = source.gather_candidates(&host, &context);

    let output = if args.json {
        render_json(&result)?
    } else {
        render_text(&result)
    };
    if !output.is_empty() {
        println!("{}", output);
    }

    #[cfg(debug_assertions)]
    log::debug!("=== BUFWORDS DEBUG SESSION ENDED ===");

    Ok(())
}

#[cfg(debug_assertions)]
fn init_debug_log() {
    use std::io::Write;

    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/bufwords-debug.log")
    else {
        return;
    };

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== BUFWORDS DEBUG SESSION STARTED ===");
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if args.any_filetype {
        config.buffer.require_same_filetype = false;
    }
    if let Some(limit) = args.size_limit {
        config.buffer.size_limit = limit;
    }
    if let Some(max_lines) = args.max_lines {
        config.buffer.max_lines = max_lines;
    }
    config
}

fn context_for(host: &MemoryHost, config: &Config, id: BufferId) -> Context {
    let filetype = host.filetype_of(id).unwrap_or_default().to_string();
    let same_filetypes = config.same_filetypes_for(&filetype);
    Context::new(id, filetype).with_same_filetypes(same_filetypes)
}

/// Forwards an event for the host's current buffer if the source listens
/// for it
fn dispatch(source: &mut BufferSource, host: &MemoryHost, config: &Config, event: Event) {
    if !source.is_subscribed(event) {
        return;
    }
    let Some(id) = host.current() else {
        return;
    };

    let context = context_for(host, config, id);
    if let Refresh::Skipped(reason) = source.on_event(host, &context) {
        let path = host
            .path_of(id)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        log::warn!("{} on buffer {} ({}) skipped: {}", event, id, path, reason);
    }
}
