use std::io;
use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sakhatype::endpoints::{auth, health, leaderboard, results, words};
use sakhatype::models::TestResultCreate;
use sakhatype::storage::FileStorage;
use sakhatype::summary::ResultSummary;
use sakhatype::{ApiError, ClientConfig, ClientContext};

/// command line client for the sakhatype typing test service
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "Talks to a Sakhatype server: sign in, submit finished tests, and browse profiles, results and leaderboards. The session is kept between runs."
)]
struct Cli {
    /// base url of the api server (overrides SAKHATYPE_API_URL)
    #[clap(long, global = true)]
    api_url: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check that the server is up
    Health,
    /// create an account and log in
    Register {
        username: String,
        #[clap(short, long)]
        password: String,
    },
    /// log in to an existing account
    Login {
        username: String,
        #[clap(short, long)]
        password: String,
    },
    /// forget the stored session
    Logout,
    /// show the logged-in account
    Whoami,
    /// fetch words for a test prompt
    Words {
        #[clap(short, long, default_value_t = words::DEFAULT_WORD_LIMIT)]
        limit: NonZeroU32,
    },
    /// submit a finished test
    Submit {
        #[clap(long)]
        wpm: f64,
        #[clap(long)]
        raw_wpm: f64,
        #[clap(long)]
        accuracy: f64,
        #[clap(long)]
        burst_wpm: f64,
        #[clap(long)]
        errors: u32,
        /// test duration variant in seconds (15, 30 or 60)
        #[clap(long)]
        time_mode: u32,
        /// seconds actually typed
        #[clap(long)]
        duration: u32,
        #[clap(long, default_value_t = 0.0)]
        consistency: f64,
    },
    /// list recent results for a user (defaults to you)
    Results {
        username: Option<String>,
        #[clap(short, long, default_value_t = results::DEFAULT_RESULTS_LIMIT)]
        limit: u32,
        /// write csv instead of json
        #[clap(long, conflicts_with = "summary")]
        csv: bool,
        /// print averages instead of individual results
        #[clap(long)]
        summary: bool,
    },
    /// show a user's profile (defaults to you)
    Profile { username: Option<String> },
    /// show a leaderboard
    Leaderboard {
        #[clap(value_enum)]
        board: Board,
        /// time mode in seconds, for the time-mode and daily boards
        #[clap(short, long, default_value_t = 60)]
        mode: u32,
        #[clap(short, long, default_value_t = leaderboard::DEFAULT_LEADERBOARD_LIMIT)]
        limit: u32,
    },
    /// show or change the sound preference
    Sound {
        #[clap(value_enum)]
        state: Option<Toggle>,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
enum Board {
    Wpm,
    Accuracy,
    TimeMode,
    Daily,
    WeeklyXp,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
enum Toggle {
    On,
    Off,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn resolve_username(ctx: &ClientContext, username: Option<String>) -> anyhow::Result<String> {
    username
        .or_else(|| ctx.session().username())
        .context("no username given and not logged in (run `sakhatype login` first)")
}

// A rejected token means the stored session is dead.
fn forget_session_if_unauthorized(ctx: &ClientContext, err: &ApiError) {
    if err.is_unauthorized() && ctx.session().is_authenticated() {
        tracing::info!("server rejected the stored token; clearing session");
        ctx.logout();
    }
}

async fn run(cli: Cli, ctx: &ClientContext) -> anyhow::Result<()> {
    match cli.command {
        Command::Health => {
            let status = health::check(&ctx.api).await?;
            println!("{}", status.message);
        }
        Command::Register { username, password } => {
            let data = auth::register(&ctx.api, &username, &password)
                .await
                .context("registration failed")?;
            println!("registered and logged in as {}", data.username);
        }
        Command::Login { username, password } => {
            let data = auth::login(&ctx.api, &username, &password).await?;
            println!("logged in as {}", data.username);
        }
        Command::Logout => {
            ctx.logout();
            println!("logged out");
        }
        Command::Whoami => match auth::get_current_user(&ctx.api).await {
            Ok(user) => print_json(&user)?,
            Err(err) => {
                forget_session_if_unauthorized(ctx, &err);
                return Err(err.into());
            }
        },
        Command::Words { limit } => {
            let words = words::get_words(&ctx.api, limit).await?;
            println!("{}", words.join(" "));
        }
        Command::Submit {
            wpm,
            raw_wpm,
            accuracy,
            burst_wpm,
            errors,
            time_mode,
            duration,
            consistency,
        } => {
            let payload = TestResultCreate {
                wpm,
                raw_wpm,
                accuracy,
                burst_wpm,
                total_errors: errors,
                time_mode,
                test_duration: duration,
                consistency,
            };
            payload.validate()?;
            match results::save_test_result(&ctx.api, &payload).await {
                Ok(saved) => print_json(&saved)?,
                Err(err) => {
                    forget_session_if_unauthorized(ctx, &err);
                    return Err(err).context("could not save test result");
                }
            }
        }
        Command::Results {
            username,
            limit,
            csv,
            summary,
        } => {
            let username = resolve_username(ctx, username)?;
            let list = results::get_user_results(&ctx.api, &username, limit).await?;
            if csv {
                let mut writer = csv::Writer::from_writer(io::stdout());
                for result in &list {
                    writer.serialize(result)?;
                }
                writer.flush()?;
            } else if summary {
                match ResultSummary::from_results(&list) {
                    Some(summary) => print_json(&summary)?,
                    None => println!("{username} has no results yet"),
                }
            } else {
                print_json(&list)?;
            }
        }
        Command::Profile { username } => {
            let username = resolve_username(ctx, username)?;
            ctx.profile_cache.fetch_profile(&ctx.api, &username).await?;
            if let Some(profile) = ctx.profile_cache.profile() {
                print_json(&profile)?;
            }
        }
        Command::Leaderboard { board, mode, limit } => {
            tracing::debug!(%board, mode, limit, "fetching leaderboard");
            match board {
                Board::Wpm => print_json(&leaderboard::get_leaderboard_wpm(&ctx.api, limit).await?)?,
                Board::Accuracy => {
                    print_json(&leaderboard::get_leaderboard_accuracy(&ctx.api, limit).await?)?
                }
                Board::TimeMode => print_json(
                    &leaderboard::get_leaderboard_by_time_mode(&ctx.api, mode, limit).await?,
                )?,
                Board::Daily => print_json(
                    &leaderboard::get_daily_leaderboard_by_time_mode(&ctx.api, mode, limit).await?,
                )?,
                Board::WeeklyXp => {
                    print_json(&leaderboard::get_weekly_xp_leaderboard(&ctx.api, limit).await?)?
                }
            }
        }
        Command::Sound { state } => {
            if let Some(state) = state {
                ctx.preferences.set_sound_enabled(state == Toggle::On);
            }
            let current = if ctx.preferences.sound_enabled() {
                Toggle::On
            } else {
                Toggle::Off
            };
            println!("sound {current}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.api_url {
        Some(url) => ClientConfig::with_base_url(url.as_str()),
        None => ClientConfig::from_env(),
    };
    let storage = FileStorage::new();
    tracing::debug!(base_url = %config.base_url, storage = %storage.path().display(), "starting");

    let ctx = ClientContext::init(&config, Arc::new(storage))
        .context("failed to initialize http client")?;

    run(cli, &ctx).await
}
