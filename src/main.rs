mod error;
mod export;
mod fetch;
mod films;
mod followers;
mod parser;
mod pipeline;
mod ratings;
mod settings;
mod tags;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use fetch::HttpFetcher;
use settings::Settings;
use tags::TagSet;

#[derive(Parser)]
#[command(
    name = "boxd_awards",
    about = "Award-tagged films and friends' ratings from a Letterboxd group"
)]
struct Cli {
    /// TOML settings file (overridden by BOXD_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape tags, films and ratings, then write both CSV tables
    Run {
        /// Film table output path
        #[arg(long)]
        films_out: Option<PathBuf>,
        /// Ratings table output path
        #[arg(long)]
        ratings_out: Option<PathBuf>,
        /// Fetch each film's activity page once even if it is under several tags
        #[arg(long)]
        dedupe: bool,
    },
    /// List the tags that match the keyword
    Tags,
    /// List the group's followers
    Followers,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    let fetcher = HttpFetcher::new(settings.timeout()).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Run {
            films_out,
            ratings_out,
            dedupe,
        } => {
            if let Some(path) = films_out {
                settings.films_csv = path;
            }
            if let Some(path) = ratings_out {
                settings.ratings_csv = path;
            }
            settings.dedupe_slugs |= dedupe;

            let report = pipeline::run(&fetcher, &settings)?;

            // Encode both tables before touching the filesystem
            let films_csv = export::render_films(&report.films)?;
            let ratings_csv = export::render_ratings(&report.ratings)?;
            export::write_all(&[
                (settings.films_csv.as_path(), films_csv.as_slice()),
                (settings.ratings_csv.as_path(), ratings_csv.as_slice()),
            ])?;
            info!(
                "Wrote {} film rows to {} and {} rating rows to {}",
                report.films.len(),
                settings.films_csv.display(),
                report.ratings.len(),
                settings.ratings_csv.display()
            );
            println!("done");
        }
        Commands::Tags => {
            let tags = tags::discover(&fetcher, &settings)?;
            print_tags(&mut io::stdout().lock(), &tags)?;
        }
        Commands::Followers => {
            let names = followers::list(&fetcher, &settings)?;
            print_followers(&mut io::stdout().lock(), &names)?;
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Finished in {}", format_duration(elapsed));
    }
    Ok(())
}

/// One `name<TAB>link` line per tag.
fn print_tags(out: &mut impl Write, tags: &TagSet) -> io::Result<()> {
    for tag in tags.iter() {
        writeln!(out, "{}\t{}", tag.name, tag.link)?;
    }
    Ok(())
}

fn print_followers(out: &mut impl Write, names: &[String]) -> io::Result<()> {
    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
