use std::io::BufRead;

use live_weather_core::{Applied, Config, CycleOutcome, Poller, ViewState, provider_from_config, render};
use tokio::sync::mpsc;

use crate::render::render_screen;

/// A line typed while the dashboard is running.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Select(String),
    Quit,
    Ignore,
}

/// Accepts `q`/`quit`, a roster number (1-based) or a city name.
fn parse_input(line: &str, state: &ViewState, config: &Config) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Ignore;
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }

    if let Ok(n) = line.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| state.batch().get(i)) {
            Some(s) => Input::Select(s.city.clone()),
            None => Input::Ignore,
        };
    }

    let name = state
        .batch()
        .cities()
        .find(|c| c.eq_ignore_ascii_case(line))
        .map(str::to_string)
        .or_else(|| config.find_city(line).map(|c| c.name.clone()))
        .unwrap_or_else(|| line.to_string());
    Input::Select(name)
}

fn draw(state: &ViewState) {
    // Clear the terminal and home the cursor before each frame.
    print!("\x1b[2J\x1b[H{}", render_screen(&render(state), chrono::Local::now()));
}

/// Where the dashboard gets cycle results from.
trait Outcomes {
    async fn next_outcome(&mut self) -> Option<CycleOutcome>;
}

impl Outcomes for Poller {
    async fn next_outcome(&mut self) -> Option<CycleOutcome> {
        self.recv().await
    }
}

/// Read stdin lines on a plain thread. A blocked read there can't hold up
/// runtime shutdown the way `tokio::io::stdin` does.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel(8);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.blocking_send(line).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read from stdin");
                    return;
                }
            }
        }
    });

    line_rx
}

/// Resolves on Ctrl-C. If the handler can't be installed, never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Apply outcomes and selections until the outcomes end, the user quits or
/// `shutdown` resolves. `redraw` runs after every visible change.
async fn event_loop(
    state: &mut ViewState,
    outcomes: &mut impl Outcomes,
    lines: &mut mpsc::Receiver<String>,
    config: &Config,
    shutdown: impl Future<Output = ()>,
    mut redraw: impl FnMut(&ViewState),
) {
    tokio::pin!(shutdown);
    let mut input_open = true;

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => break,
            outcome = outcomes.next_outcome() => {
                let Some(outcome) = outcome else { break };
                if state.apply(outcome) != Applied::Stale {
                    redraw(state);
                }
            }
            line = lines.recv(), if input_open => {
                match line {
                    Some(line) => match parse_input(&line, state, config) {
                        Input::Select(city) => {
                            state.select(city);
                            redraw(state);
                        }
                        Input::Quit => break,
                        Input::Ignore => {}
                    },
                    None => input_open = false,
                }
            }
        }
    }
}

/// Run the dashboard until the user quits or presses Ctrl-C.
pub async fn run(config: &Config, selected: String) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let mut poller = Poller::spawn(provider, config.cities.clone(), config.refresh_interval());
    let mut state = ViewState::new(selected);
    let mut lines = spawn_stdin_reader();

    tracing::info!(
        cities = config.cities.len(),
        every_secs = config.refresh_interval_secs,
        "dashboard started"
    );
    draw(&state);

    event_loop(&mut state, &mut poller, &mut lines, config, ctrl_c(), draw).await;

    poller.shutdown();
    tracing::info!("dashboard stopped");
    Ok(())
}
