//! jobscrape: scrape Indeed job listings and filter the saved results.
//!
//!   jobscrape scrape --job "data scientist" --loc Perth [--salary 90000] [--no-cache]
//!   jobscrape filter [--job Engineer] [--rating 4] [--salary 100000] [--save picks]
//!   jobscrape clear-cache

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use job_filter::{FilterCriteria, FilterOutcome, filter_records};
use job_scraper::{Fetcher, ResponseCache, ScrapePipeline, SearchQuery, Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jobscrape", version, about = "Scrape and filter Indeed job offers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Search for a job in a location and save every offer found.
    Scrape {
        /// Job title to search for.
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        job: String,
        /// Location of the job.
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        loc: String,
        /// Minimum salary to add to the search.
        #[arg(long)]
        salary: Option<String>,
        /// Skip the local response cache.
        #[arg(long)]
        no_cache: bool,
    },
    /// Filter the saved offers and print or save them.
    Filter {
        /// Substring the job title must contain (case-sensitive).
        #[arg(long)]
        job: Option<String>,
        /// Minimum company rating.
        #[arg(long)]
        rating: Option<i64>,
        /// Minimum salary.
        #[arg(long)]
        salary: Option<i64>,
        /// Save the result as JSON under this name instead of printing it.
        #[arg(long)]
        save: Option<String>,
    },
    /// Empty the response cache.
    ClearCache,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .init();
}

/// The cache file is left untouched when a scrape bypasses it.
fn fetcher(settings: &Settings, no_cache: bool) -> Result<Fetcher> {
    let cache = if no_cache {
        None
    } else {
        let cache = ResponseCache::open(&settings.cache_path)
            .context("failed to open response cache")?;
        Some(cache)
    };
    Ok(Fetcher::new(cache)?)
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Scrape {
            job,
            loc,
            salary,
            no_cache,
        } => {
            let mut query = SearchQuery::new(job, loc).bypass_cache(no_cache);
            if let Some(salary) = salary {
                query = query.with_salary(salary);
            }

            let mut fetcher = fetcher(settings, no_cache)?;
            let pipeline = ScrapePipeline::new()?;
            let offers = pipeline
                .run(&mut fetcher, &query, settings)
                .with_context(|| format!("scrape for {:?} in {:?} failed", query.job, query.location))?;
            info!(count = offers.len(), path = ?settings.results_path, "scrape complete");
        }
        Command::Filter {
            job,
            rating,
            salary,
            save,
        } => {
            let criteria = FilterCriteria {
                title: job,
                min_rating: rating,
                min_salary: salary,
            };
            match filter_records(&settings.results_path, &criteria, save.as_deref())? {
                FilterOutcome::Printed { count } => info!(count, "printed offers"),
                FilterOutcome::Saved { count, path } => {
                    info!(count, path = ?path, "saved offers")
                }
            }
        }
        Command::ClearCache => {
            info!("Clearing cache...");
            ResponseCache::clear_at(&settings.cache_path)
                .context("failed to clear response cache")?;
            info!("Done!");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("failed to load settings")?;
    run(cli.command, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("jobscrape").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scrape_flags() {
        assert_eq!(
            parse(&["scrape", "--job", "data scientist", "--loc", "Perth", "--no-cache"]),
            Command::Scrape {
                job: "data scientist".to_string(),
                loc: "Perth".to_string(),
                salary: None,
                no_cache: true,
            }
        );
    }

    #[test]
    fn test_scrape_requires_location() {
        assert!(Cli::try_parse_from(["jobscrape", "scrape", "--job", "data scientist"]).is_err());
    }

    #[test]
    fn test_scrape_rejects_empty_job() {
        assert!(Cli::try_parse_from(["jobscrape", "scrape", "--job", "", "--loc", "Perth"]).is_err());
    }

    #[test]
    fn test_filter_flags_are_optional() {
        assert_eq!(
            parse(&["filter"]),
            Command::Filter {
                job: None,
                rating: None,
                salary: None,
                save: None,
            }
        );
        assert_eq!(
            parse(&["filter", "--rating", "4", "--salary", "100000", "--save", "picks"]),
            Command::Filter {
                job: None,
                rating: Some(4),
                salary: Some(100000),
                save: Some("picks".to_string()),
            }
        );
    }

    #[test]
    fn test_filter_rating_must_be_integer() {
        assert!(Cli::try_parse_from(["jobscrape", "filter", "--rating", "four"]).is_err());
    }

    #[test]
    fn test_clear_cache_command() {
        assert_eq!(parse(&["clear-cache"]), Command::ClearCache);
    }

    #[test]
    fn test_clear_cache_removes_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            cache_path: dir.path().join("cache.json"),
            results_path: dir.path().join("results.json"),
            ..Settings::default()
        };
        let mut cache = ResponseCache::open(&settings.cache_path).unwrap();
        cache
            .insert(
                "k".to_string(),
                job_scraper::CachedResponse {
                    status: 200,
                    body: String::new(),
                },
            )
            .unwrap();

        run(Command::ClearCache, &settings).unwrap();

        assert!(!settings.cache_path.exists());
    }

    fn settings_with_corrupt_cache(dir: &tempfile::TempDir) -> Settings {
        let settings = Settings {
            cache_path: dir.path().join("cache.json"),
            results_path: dir.path().join("results.json"),
            ..Settings::default()
        };
        std::fs::write(&settings.cache_path, "{ truncated").unwrap();
        settings
    }

    #[test]
    fn test_clear_cache_removes_corrupt_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with_corrupt_cache(&dir);

        run(Command::ClearCache, &settings).unwrap();

        assert!(!settings.cache_path.exists());
    }

    #[test]
    fn test_no_cache_scrape_ignores_corrupt_cache() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with_corrupt_cache(&dir);

        let fetcher = fetcher(&settings, true).unwrap();

        assert!(fetcher.cache().is_none());
        assert!(settings.cache_path.exists());
    }

    #[test]
    fn test_cached_scrape_reports_corrupt_cache() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with_corrupt_cache(&dir);

        assert!(fetcher(&settings, false).is_err());
    }
}
