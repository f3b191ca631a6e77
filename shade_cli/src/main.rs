mod cli;
mod error_fmt;
mod run;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use eyre::WrapErr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(cli: &Cli, logging: &shade_config::Logging) -> eyre::Result<()> {
    // RUST_LOG wins over --log-level, which wins over config.
    let level = logging.level.as_deref().unwrap_or(&cli.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Console logs go to stderr so stdout stays parseable.
    let console = fmt::layer().with_writer(std::io::stderr).with_ansi(!cli.json);

    let file_layer = match &logging.file {
        Some(path) => {
            let path = std::path::Path::new(path);
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file has no file name: {:?}", path))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            // File logs are always JSON lines for post-hoc analysis.
            Some(fmt::layer().json().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        if JSON_MODE.get().copied().unwrap_or(false) {
            let payload = serde_json::json!({
                "event": "error",
                "message": err.to_string(),
                "detail": error_fmt::humanize(&err),
            });
            eprintln!("{payload}");
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        std::process::exit(1);
    }
}

fn try_main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let cfg = if cli.config.exists() {
        shade_config::load_path(&cli.config)?
    } else {
        // Missing config is only fatal when the user pointed at one.
        let default = std::path::Path::new("etc/shade_config.toml");
        if cli.config != default {
            eyre::bail!("config file not found: {:?}", cli.config);
        }
        shade_config::Config::default()
    };
    init_tracing(&cli, &cfg.logging)?;

    match cli.cmd {
        Commands::Run {
            ticks,
            seed,
            stdin_updates,
            stats,
        } => run::run_loop(&cfg, seed, ticks, stdin_updates, stats, cli.json)
            .wrap_err("shading run failed"),
        Commands::SelfCheck => run::self_check(&cfg, cli.json),
    }
}
