//! Pulseboard CLI
//!
//! Usage:
//!   pulseboard health
//!   pulseboard analyze-video "https://youtube.com/watch?v=..." --comments 50
//!   pulseboard analyze-text "Loved this episode"
//!   pulseboard analyze-channel rustlang --max-videos 20
//!   pulseboard render --output ./out --live

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pulseboard::client::{
    AnalyticsClient, BatchAnalysisRequest, ChannelAnalysisRequest, TextAnalysisRequest,
    VideoAnalysisRequest,
};
use pulseboard::config::{generate_default_config, Config, LoggingConfig};
use pulseboard::dashboard::{Dashboard, DashboardShell, Session, UserProfile};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(version, about = "Pulseboard - social media analytics dashboard")]
#[command(long_about = "Query the analytics backend and render animated dashboard charts to SVG.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: platform config dir, then ./pulseboard.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Analytics backend URL, overrides the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the backend is up
    Health,

    /// Analyze a YouTube video and optionally its comments
    AnalyzeVideo {
        /// Video URL
        url: String,
        /// Also analyze up to N comments
        #[arg(long)]
        comments: Option<u32>,
    },

    /// Sentiment of a single text
    AnalyzeText {
        text: String,
    },

    /// Sentiment of several texts at once
    AnalyzeBatch {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Summarize a YouTube channel
    AnalyzeChannel {
        /// Channel name or handle
        name: String,
        #[arg(long, default_value = "50")]
        max_videos: u32,
    },

    /// Animate the dashboard to rest and write SVG files
    Render {
        /// Output directory (default: dashboard.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Performance metric to show (revenue, users, engagement)
        #[arg(short, long, default_value = "revenue")]
        metric: String,
        /// Fetch stats from the backend instead of rendering demo data only
        #[arg(long)]
        live: bool,
        /// Session token; channel analytics need a signed-in session
        #[arg(long)]
        token: Option<String>,
        /// Channel to analyze when signed in
        #[arg(long)]
        channel: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pulseboard={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.logging);

    tracing::debug!("Pulseboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Health => {
            let client = AnalyticsClient::new(&config.api)?;
            let status = client.test_connection().await;
            if !status.success {
                bail!(
                    "{} unreachable: {}",
                    client.root(),
                    status.error.unwrap_or_default()
                );
            }

            let health = client.health_check().await?;
            if cli.json {
                return print_json(&health);
            }
            println!("Pulseboard v{}", env!("CARGO_PKG_VERSION"));
            println!("Backend: {}", client.root());
            println!(
                "Status:  {}",
                health["status"].as_str().unwrap_or("unknown")
            );
            if let Ok(models) = client.models_status().await {
                println!("Models:  {}", models);
            }
        }

        Commands::AnalyzeVideo { url, comments } => {
            let client = AnalyticsClient::new(&config.api)?;
            let mut request = VideoAnalysisRequest::new(url);
            if let Some(n) = comments {
                request = request.with_comments(n);
            }

            let response = client.analyze_video(&request).await?;
            if cli.json {
                return print_json(&response);
            }
            let video = &response.data;
            println!("{}", video.title);
            println!("  Channel:   {}", video.channel);
            println!("  Views:     {}", video.view_count);
            println!("  Likes:     {}", video.like_count);
            println!(
                "  Sentiment: {} ({:.0}%)",
                video.description_sentiment,
                video.description_confidence * 100.0
            );
            if let Some(analysis) = &video.comment_analysis {
                let pct = &analysis.sentiment_distribution.percentages;
                println!(
                    "  Comments:  {} analyzed, {:.1}% positive / {:.1}% neutral / {:.1}% negative",
                    analysis.total_comments, pct.positive, pct.neutral, pct.negative
                );
            }
        }

        Commands::AnalyzeText { text } => {
            let client = AnalyticsClient::new(&config.api)?;
            let response = client.analyze_text(&TextAnalysisRequest { text }).await?;
            if cli.json {
                return print_json(&response);
            }
            println!(
                "{} ({:.0}%, {})",
                response.data.sentiment,
                response.data.confidence * 100.0,
                response.data.model_used
            );
        }

        Commands::AnalyzeBatch { texts } => {
            let client = AnalyticsClient::new(&config.api)?;
            let response = client
                .analyze_batch(&BatchAnalysisRequest { texts })
                .await?;
            if cli.json {
                return print_json(&response);
            }
            println!("{:<6} {:<10} {:>6}  TEXT", "ID", "SENTIMENT", "CONF");
            for result in &response.data.results {
                println!(
                    "{:<6} {:<10} {:>5.0}%  {}",
                    result.id,
                    result.sentiment,
                    result.confidence * 100.0,
                    result.text
                );
            }
        }

        Commands::AnalyzeChannel { name, max_videos } => {
            let client = AnalyticsClient::new(&config.api)?;
            let analysis = client
                .analyze_channel(&ChannelAnalysisRequest {
                    channel_name: name.clone(),
                    max_videos,
                })
                .await?;
            if cli.json {
                return print_json(&analysis);
            }
            if !analysis.success {
                bail!("Could not analyze channel: {}", name);
            }
            println!("{}", analysis.channel_info.title);
            if let Some(summary) = &analysis.analysis_summary {
                println!("  Videos:     {}", summary.total_videos);
                println!("  Views:      {}", summary.total_views);
                println!("  Likes:      {}", summary.total_likes);
                println!("  Engagement: {:.2}%", summary.avg_engagement_rate);
            }
        }

        Commands::Render {
            output,
            metric,
            live,
            token,
            channel,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.dashboard.output_dir));
            render(&config, &output, &metric, live, token, channel).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

async fn render(
    config: &Config,
    output: &Path,
    metric: &str,
    live: bool,
    token: Option<String>,
    channel: Option<String>,
) -> anyhow::Result<()> {
    let mut shell = DashboardShell::mount(&config.animation);
    if !shell.select_metric(metric).await {
        bail!("Unknown metric: {}", metric);
    }

    if live {
        let mut session = Session::new();
        if let Some(token) = token {
            session.sign_in(
                token,
                UserProfile {
                    youtube_channel: channel,
                    ..UserProfile::default()
                },
            );
        }

        let client = AnalyticsClient::new(&config.api)?;
        let dashboard = Dashboard::new(
            Arc::new(client),
            Arc::new(RwLock::new(session)),
            config.dashboard.clone(),
        );
        dashboard.refresh().await;

        let stats = dashboard.stats().await;
        if let Some(error) = &stats.error {
            tracing::warn!(error = %error, "Dashboard stats unavailable");
        }
        if let Some(error) = &dashboard.channel().await.error {
            tracing::warn!(error = %error, "Channel analytics unavailable");
        }
        if let Some(data) = &stats.data {
            shell.set_platforms(&data.platforms).await;
        }
        shell.set_stat_cards(dashboard.stat_cards().await).await;
    } else {
        shell
            .set_stat_cards(pulseboard::dashboard::stat_cards(None, None))
            .await;
    }

    let poll = config.animation.frame_period().max(Duration::from_millis(1));
    while !shell.is_settled() {
        tokio::time::sleep(poll).await;
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let files = [
        ("dashboard.svg", shell.render().await),
        ("stats.svg", shell.render_stats().await),
        ("engagement.svg", shell.render_engagement().await),
        ("user-engagement.svg", shell.render_user_engagement().await),
        ("performance.svg", shell.render_performance().await),
        ("revenue.svg", shell.render_revenue().await),
    ];
    for (name, surface) in &files {
        let path = output.join(name);
        surface.write_to(&path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
