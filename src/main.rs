use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{debug, warn};
use vibecheck::{
    app_init::{AppComponents, InitOptions, initialize_app},
    config::{default_config_path, load_config, save_config},
    event::VibeEvent,
    id::{Handle, Slot},
    notice_service::{NoticeLevel, NoticeMessage},
    render::{render_cards, render_json},
    stores::{SlotState, log_event},
};

/// Compare up to three GitHub profiles side by side
#[derive(Debug, Parser)]
#[command(name = "vibecheck", version, about)]
struct Args {
    /// GitHub handles; the first one becomes the primary card
    #[arg(required_unless_present = "interactive", num_args = 1..=3)]
    handles: Vec<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the aggregated profiles as JSON
    #[arg(long)]
    json: bool,

    /// Keep a session open to add and remove profiles
    #[arg(short, long)]
    interactive: bool,

    /// Open the primary profile in the browser
    #[arg(long)]
    open: bool,

    /// Write raw API responses to disk
    #[arg(long)]
    debug: bool,

    /// Print logs to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Persist --api-url and --timeout to the configuration file
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path)?;
    if let Some(api_url) = &args.api_url {
        config.api_url = api_url.as_str().into();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    config.validate()?;

    if args.save_config {
        save_config(&config_path, &config)?;
    }

    let mut app = initialize_app(
        &config,
        InitOptions { debug: args.debug, verbose: args.verbose },
    )?;

    for input in &args.handles {
        submit(&mut app, input);
    }

    // the session keeps accepting handles while these are in flight
    if args.interactive && !args.open {
        return run_interactive(&mut app, args.json);
    }

    wait_for_pipelines(&mut app);
    if args.open {
        open_primary(&app);
    }

    if args.interactive {
        return run_interactive(&mut app, args.json);
    }

    print_notices(&mut app);
    if app.store.is_empty() {
        return Err(eyre!("no profile could be loaded"));
    }
    print_cards(&app, args.json)
}

/// Start a pipeline for `input` in the next free slot
fn submit(app: &mut AppComponents, input: &str) {
    let handle = match Handle::parse(input) {
        Ok(handle) => handle,
        Err(e) => {
            app.notices.apply_error(&e);
            return;
        },
    };

    let Some(slot) = app.store.next_free_slot() else {
        app.notices.push_notice(
            NoticeLevel::Error,
            NoticeMessage::GeneralMessage("All three slots are taken, remove one first".into()),
        );
        return;
    };

    app.service
        .spawn_aggregate(slot, handle, app.events.sender());
    drain_pending(app);
}

fn handle_event(app: &mut AppComponents, event: VibeEvent) {
    log_event(&event);
    app.store.apply(&event);
    app.notices.apply(&event);
}

fn drain_pending(app: &mut AppComponents) {
    while let Some(event) = app.events.try_next() {
        handle_event(app, event);
    }
}

fn wait_for_pipelines(app: &mut AppComponents) {
    drain_pending(app);
    while app.store.is_loading() {
        match tokio::task::block_in_place(|| app.events.next()) {
            Ok(event) => handle_event(app, event),
            Err(e) => {
                warn!(error = %e, "Event channel closed");
                break;
            },
        }
    }
}

fn print_notices(app: &mut AppComponents) {
    while let Some(notice) = app.notices.pop_notice() {
        match notice.level {
            NoticeLevel::Error => eprintln!("> {}", notice.message),
            NoticeLevel::Info => eprintln!("{}", notice.message),
        }
    }
}

fn print_cards(app: &AppComponents, json: bool) -> Result<()> {
    let views: Vec<_> = app.store.views().collect();
    if json {
        println!("{}", render_json(&views)?);
    } else if !views.is_empty() {
        println!("{}", render_cards(&views, Utc::now()));
    }
    Ok(())
}

fn print_loading(app: &AppComponents) {
    for slot in Slot::ALL {
        if let SlotState::Loading(handle) = app.store.state(slot) {
            eprintln!("Loading {handle} ({slot})...");
        }
    }
}

fn open_primary(app: &AppComponents) {
    if let Some(view) = app.store.get(Slot::Primary)
        && !view.profile.html_url.is_empty()
        && let Err(e) = open::that(view.profile.html_url.as_str())
    {
        warn!(url = %view.profile.html_url, error = %e, "Failed to open profile in browser");
    }
}

fn run_interactive(app: &mut AppComponents, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        drain_pending(app);
        print_notices(app);
        print_cards(app, json)?;
        print_loading(app);

        print!("\n[add <handle> | remove <1-3> | enter to refresh | quit]> ");
        io::stdout().flush()?;

        line.clear();
        let read = tokio::task::block_in_place(|| stdin.lock().read_line(&mut line))?;
        if read == 0 {
            break;
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) => continue,
            (Some("quit" | "exit" | "q"), _) => break,
            (Some("remove" | "rm"), Some(slot)) => match slot.parse::<Slot>() {
                Ok(slot) => {
                    debug!(slot = %slot, "Removing profile");
                    app.store.remove(slot);
                    drain_pending(app);
                },
                Err(e) => app.notices.apply_error(&e),
            },
            (Some("add"), Some(handle)) => submit(app, handle),
            (Some(command @ ("remove" | "rm" | "add")), None) => app.notices.push_notice(
                NoticeLevel::Error,
                NoticeMessage::GeneralMessage(format!("{command} needs an argument").into()),
            ),
            (Some(handle), None) => submit(app, handle),
            (Some(command), Some(_)) => app.notices.push_notice(
                NoticeLevel::Error,
                NoticeMessage::GeneralMessage(format!("Unknown command: {command}").into()),
            ),
        }
    }

    Ok(())
}
