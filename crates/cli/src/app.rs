//! CLI application entry point and configuration.
//!
//! This module provides the main CLI application logic, including argument parsing,
//! configuration loading, and command dispatch.

use crate::commands::{AnalyzeArgs, Cli, Commands, OutputFormat, UsersArgs, View};
use crate::error::{CliError, Result};
use chatlens_analysis::engine::{
    activity_heatmap, daily_timeline, fetch_stats, month_activity_map, monthly_timeline,
    week_activity_map, AnalysisReport, BusyUsers, DailyPoint, DayCount, EmojiCount, Heatmap,
    MonthCount, MonthlyPoint, SentimentSummary, Stats, WordCloud, WordCount,
};
use chatlens_analysis::filter::{date_bounds, filter, selectable_users, user_list};
use chatlens_analysis::{AnalysisConfig, ChatAnalyzer};
use chatlens_core::config::LogLevel;
use chatlens_core::{ChatlensConfig, DateRange, MessageFilter, Transcript, UserScope};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};

/// Configuration for the CLI application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Path of the configuration file that was loaded, if any.
    pub config_path: Option<PathBuf>,
    /// Logging verbosity level.
    pub verbosity: u8,
    /// Settings read from the configuration file.
    pub settings: ChatlensConfig,
}

/// Main CLI application.
#[derive(Debug)]
pub struct App {
    /// Application configuration.
    pub config: AppConfig,
    /// Parsed CLI arguments.
    pub cli: Cli,
}

impl App {
    /// Create a new application instance from command line arguments.
    pub fn new() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Create an application instance from already parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let config = Self::load_config(&cli)?;
        Ok(Self { config, cli })
    }

    /// Load configuration from the explicit path or the default location.
    fn load_config(cli: &Cli) -> Result<AppConfig> {
        let mut config = AppConfig {
            verbosity: cli.verbose,
            ..AppConfig::default()
        };

        if let Some(config_path) = &cli.config {
            if !config_path.exists() {
                return Err(CliError::Config(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            config.settings = read_config_file(config_path)?;
            config.config_path = Some(config_path.clone());
        } else if let Ok(default_path) = ChatlensConfig::default_path() {
            if default_path.exists() {
                config.settings = read_config_file(&default_path)?;
                config.config_path = Some(default_path);
            }
        }

        Ok(config)
    }

    /// Run the application.
    pub fn run(self) -> Result<()> {
        self.setup_logging();
        if let Some(path) = &self.config.config_path {
            debug!("using configuration from {}", path.display());
        }

        match &self.cli.command {
            Commands::Analyze(args) => self.handle_analyze(args),
            Commands::Users(args) => self.handle_users(args),
        }
    }

    /// Set up logging based on verbosity level.
    fn setup_logging(&self) {
        let level = match self.config.verbosity {
            0 => match self.config.settings.logging.level {
                LogLevel::Error => Level::ERROR,
                LogLevel::Warn => Level::WARN,
                LogLevel::Info => Level::INFO,
                LogLevel::Debug => Level::DEBUG,
                LogLevel::Trace => Level::TRACE,
            },
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .ok(); // Ignore errors if a subscriber is already installed
    }

    fn analysis_config(&self, args: &AnalyzeArgs) -> AnalysisConfig {
        let mut config = AnalysisConfig::from(&self.config.settings.analysis);
        if let Some(placeholder) = &args.media_placeholder {
            config.media_placeholder = placeholder.clone();
        }
        if let Some(top) = args.top {
            apply_top_override(&mut config, args.view, top);
        }
        config
    }

    fn handle_analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let analyzer = ChatAnalyzer::new(self.analysis_config(args))?;
        let transcript = read_transcript(&analyzer, &args.input)?;
        let selection = build_filter(
            &transcript,
            &args.user,
            args.from.as_deref(),
            args.to.as_deref(),
        )?;
        let view = filter(transcript.messages(), &selection);
        info!("analyzing {} of {} messages", view.len(), transcript.len());

        match args.view {
            View::Stats => emit(args.format, &fetch_stats(&view), render_stats),
            View::Monthly => emit(args.format, &monthly_timeline(&view), |v| render_monthly(v)),
            View::Daily => emit(args.format, &daily_timeline(&view), |v| render_daily(v)),
            View::Weekdays => emit(args.format, &week_activity_map(&view), |v| {
                render_weekdays(v)
            }),
            View::Months => emit(args.format, &month_activity_map(&view), |v| render_months(v)),
            View::Heatmap => emit(args.format, &activity_heatmap(&view), render_heatmap),
            View::Users => {
                if !selection.user.is_overall() {
                    return Err(CliError::Argument(
                        "the users view is only available with --user Overall".to_string(),
                    ));
                }
                emit(args.format, &analyzer.busy_users(&view), render_busy_users)
            }
            View::Words => emit(args.format, &analyzer.common_words(&view), |v| {
                render_words(v)
            }),
            View::Wordcloud => emit(args.format, &analyzer.wordcloud(&view), render_wordcloud),
            View::Emoji => emit(args.format, &analyzer.emoji(&view), |v| render_emoji(v)),
            View::Sentiment => emit(args.format, &analyzer.sentiment(&view), render_sentiment),
            View::Report => emit(
                args.format,
                &analyzer.report(&transcript, &selection),
                render_report,
            ),
        }
    }

    fn handle_users(&self, args: &UsersArgs) -> Result<()> {
        let analyzer = ChatAnalyzer::from_settings(&self.config.settings)?;
        let transcript = read_transcript(&analyzer, &args.input)?;
        let listing = UserListing::from_transcript(&transcript);
        emit(args.format, &listing, render_user_listing)
    }
}

/// Parse the CLI arguments and run the selected command.
pub fn run() -> Result<()> {
    let app = App::new()?;
    app.run()
}

fn read_config_file(path: &Path) -> Result<ChatlensConfig> {
    ChatlensConfig::load(path).map_err(|e| {
        CliError::Config(format!(
            "failed to load config file {}: {}",
            path.display(),
            e
        ))
    })
}

fn read_transcript(analyzer: &ChatAnalyzer, input: &Path) -> Result<Transcript> {
    if !input.exists() {
        return Err(CliError::Argument(format!(
            "input path not found: {}",
            input.display()
        )));
    }
    Ok(analyzer.parser().parse_file(input)?)
}

fn apply_top_override(config: &mut AnalysisConfig, view: View, top: usize) {
    let rankings = &mut config.rankings;
    match view {
        View::Users => rankings.top_users = top,
        View::Words => rankings.top_words = top,
        View::Wordcloud => rankings.wordcloud_max_words = top,
        View::Emoji => rankings.top_emoji = Some(top),
        View::Sentiment => rankings.extreme_messages = top,
        View::Report => {
            rankings.top_users = top;
            rankings.top_words = top;
            rankings.top_emoji = Some(top);
            rankings.extreme_messages = top;
        }
        View::Stats
        | View::Monthly
        | View::Daily
        | View::Weekdays
        | View::Months
        | View::Heatmap => {}
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        CliError::Argument(format!(
            "invalid date '{}' (expected YYYY-MM-DD): {}",
            raw, e
        ))
    })
}

/// Build the author/date selection. An open end of the range is unbounded.
fn build_filter(
    transcript: &Transcript,
    user: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<MessageFilter> {
    let scope = UserScope::parse(user.trim());
    if let UserScope::Author(name) = &scope {
        if !user_list(transcript).iter().any(|known| known == name) {
            warn!("user '{}' does not appear in the transcript", name);
        }
    }

    let start = from.map(parse_date).transpose()?;
    let end = to.map(parse_date).transpose()?;
    let mut selection = MessageFilter::overall().with_user(scope);
    if start.is_some() || end.is_some() {
        selection = selection.with_date_range(DateRange::new(
            start.unwrap_or(NaiveDate::MIN),
            end.unwrap_or(NaiveDate::MAX),
        ));
    }
    Ok(selection)
}

fn emit<T, F>(format: OutputFormat, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", render(value)),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct UserListing {
    users: Vec<String>,
    messages: usize,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
}

impl UserListing {
    fn from_transcript(transcript: &Transcript) -> Self {
        let bounds = date_bounds(transcript.messages());
        Self {
            users: selectable_users(transcript),
            messages: transcript.len(),
            first_date: bounds.map(|b| b.start),
            last_date: bounds.map(|b| b.end),
        }
    }
}

fn render_user_listing(listing: &UserListing) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "messages: {}", listing.messages);
    match (listing.first_date, listing.last_date) {
        (Some(first), Some(last)) => {
            let _ = writeln!(out, "date range: {} .. {}", first, last);
        }
        _ => {
            let _ = writeln!(out, "date range: none");
        }
    }
    for user in &listing.users {
        let _ = writeln!(out, "- {}", user);
    }
    out
}

fn render_stats(stats: &Stats) -> String {
    format!(
        "messages: {}\nwords: {}\nmedia: {}\nlinks: {}\n",
        stats.messages, stats.words, stats.media, stats.links
    )
}

fn render_rows(rows: impl Iterator<Item = (String, String)>) -> String {
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<16} {}", label, value);
    }
    if out.is_empty() {
        out.push_str("no data\n");
    }
    out
}

fn render_monthly(points: &[MonthlyPoint]) -> String {
    render_rows(
        points
            .iter()
            .map(|p| (p.period.to_string(), p.messages.to_string())),
    )
}

fn render_daily(points: &[DailyPoint]) -> String {
    render_rows(
        points
            .iter()
            .map(|p| (p.date.to_string(), p.messages.to_string())),
    )
}

fn render_weekdays(days: &[DayCount]) -> String {
    render_rows(
        days.iter()
            .map(|d| (d.day.to_string(), d.messages.to_string())),
    )
}

fn render_months(months: &[MonthCount]) -> String {
    render_rows(
        months
            .iter()
            .map(|m| (m.month.clone(), m.messages.to_string())),
    )
}

fn render_heatmap(heatmap: &Heatmap) -> String {
    let mut out = format!("{:<10}", "");
    for band in &heatmap.bands {
        let _ = write!(out, " {:>5}", band.to_string());
    }
    out.push('\n');
    for (day, row) in heatmap.days.iter().zip(&heatmap.cells) {
        let _ = write!(out, "{:<10}", day.to_string());
        for cell in row {
            let _ = write!(out, " {:>5}", cell);
        }
        out.push('\n');
    }
    out
}

fn render_busy_users(busy: &BusyUsers) -> String {
    render_rows(busy.top.iter().map(|u| {
        (
            u.author.clone(),
            format!("{} ({:.2}%)", u.messages, u.percent),
        )
    }))
}

fn render_words(words: &[WordCount]) -> String {
    render_rows(words.iter().map(|w| (w.word.clone(), w.count.to_string())))
}

fn render_wordcloud(cloud: &WordCloud) -> String {
    render_rows(
        cloud
            .terms
            .iter()
            .map(|t| (t.word.clone(), format!("{} (weight {:.2})", t.count, t.weight))),
    )
}

fn render_emoji(emoji: &[EmojiCount]) -> String {
    render_rows(emoji.iter().map(|e| (e.emoji.clone(), e.count.to_string())))
}

fn render_sentiment(summary: &SentimentSummary) -> String {
    let mut out = String::from("distribution\n");
    out.push_str(&render_rows(
        summary
            .distribution
            .iter()
            .map(|c| (c.label.to_string(), c.count.to_string())),
    ));
    out.push_str("\ntrend\n");
    out.push_str(&render_rows(
        summary
            .trend
            .iter()
            .map(|p| (p.date.to_string(), format!("{:+.3}", p.mean_score))),
    ));
    out.push_str("\nmost positive\n");
    out.push_str(&render_rows(
        summary
            .extremes
            .most_positive
            .iter()
            .map(|m| (format!("{:+.3}", m.score), format!("{}: {}", m.author, m.text))),
    ));
    out.push_str("\nmost negative\n");
    out.push_str(&render_rows(
        summary
            .extremes
            .most_negative
            .iter()
            .map(|m| (format!("{:+.3}", m.score), format!("{}: {}", m.author, m.text))),
    ));
    out
}

fn render_report(report: &AnalysisReport) -> String {
    let mut sections = vec![
        ("Top statistics".to_string(), render_stats(&report.stats)),
        (
            "Monthly timeline".to_string(),
            render_monthly(&report.monthly_timeline),
        ),
        (
            "Daily timeline".to_string(),
            render_daily(&report.daily_timeline),
        ),
        (
            "Most busy day".to_string(),
            render_weekdays(&report.week_activity),
        ),
        (
            "Most busy month".to_string(),
            render_months(&report.month_activity),
        ),
        (
            "Weekly activity heatmap".to_string(),
            render_heatmap(&report.heatmap),
        ),
    ];
    if let Some(busy) = &report.busy_users {
        sections.push(("Most busy users".to_string(), render_busy_users(busy)));
    }
    sections.push((
        "Most common words".to_string(),
        render_words(&report.common_words),
    ));
    sections.push(("Wordcloud".to_string(), render_wordcloud(&report.wordcloud)));
    sections.push(("Emoji".to_string(), render_emoji(&report.emoji)));
    sections.push(("Sentiment".to_string(), render_sentiment(&report.sentiment)));

    let mut out = format!("Analysis for {}\n", report.scope);
    for (title, body) in sections {
        let _ = write!(out, "\n== {} ==\n{}", title, body);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_analysis::parse;

    const RAW: &str = "01/01/23, 10:00 - Alice: Hello\n\
                       01/01/23, 10:05 - Bob: Hi <Media omitted>\n\
                       02/01/23, 09:00 - Alice: How are you";

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn build_filter_leaves_open_ends_unbounded() {
        let transcript = parse(RAW);
        let selection =
            build_filter(&transcript, "Alice", Some("2023-01-02"), None).expect("valid filter");
        assert_eq!(selection.user, UserScope::Author("Alice".to_string()));
        let range = selection.date_range.expect("range set");
        assert_eq!(range.start, day(2023, 1, 2));
        assert_eq!(range.end, NaiveDate::MAX);
        assert_eq!(filter(transcript.messages(), &selection).len(), 1);
    }

    #[test]
    fn build_filter_without_dates_keeps_everything() {
        let transcript = parse(RAW);
        let selection = build_filter(&transcript, "Overall", None, None).expect("valid filter");
        assert_eq!(selection, MessageFilter::overall());
    }

    #[test]
    fn bad_dates_are_argument_errors() {
        let transcript = parse(RAW);
        let err = build_filter(&transcript, "Overall", Some("01/01/2023"), None)
            .expect_err("wrong date layout must fail");
        assert!(matches!(err, CliError::Argument(_)));
    }

    #[test]
    fn top_override_targets_the_selected_view() {
        let mut config = AnalysisConfig::default();
        apply_top_override(&mut config, View::Emoji, 3);
        assert_eq!(config.rankings.top_emoji, Some(3));
        assert_eq!(config.rankings.top_words, AnalysisConfig::default().rankings.top_words);

        apply_top_override(&mut config, View::Stats, 1);
        assert_eq!(config.rankings.top_users, AnalysisConfig::default().rankings.top_users);
    }

    #[test]
    fn stats_render_as_labelled_lines() {
        let transcript = parse(RAW);
        let view = filter(transcript.messages(), &MessageFilter::overall());
        assert_eq!(
            render_stats(&fetch_stats(&view)),
            "messages: 3\nwords: 5\nmedia: 1\nlinks: 0\n"
        );
    }

    #[test]
    fn empty_views_render_no_data() {
        assert_eq!(render_monthly(&[]), "no data\n");
        assert_eq!(render_emoji(&[]), "no data\n");
    }

    #[test]
    fn heatmap_renders_header_and_seven_rows() {
        let transcript = parse(RAW);
        let view = filter(transcript.messages(), &MessageFilter::overall());
        let rendered = render_heatmap(&activity_heatmap(&view));
        assert_eq!(rendered.lines().count(), 8);
        assert!(rendered.lines().next().is_some_and(|l| l.contains("13-14")));
    }

    #[test]
    fn report_text_contains_every_section_for_overall() {
        let analyzer = ChatAnalyzer::new(AnalysisConfig::default()).expect("valid config");
        let transcript = analyzer.parser().parse(RAW);
        let report = analyzer.report(&transcript, &MessageFilter::overall());
        let text = render_report(&report);
        assert!(text.starts_with("Analysis for Overall"));
        assert!(text.contains("== Most busy users =="));
        assert!(text.contains("== Wordcloud =="));
        assert!(text.contains("hello"));
        assert!(text.contains("== Sentiment =="));
    }

    #[test]
    fn user_listing_puts_overall_first() {
        let listing = UserListing::from_transcript(&parse(RAW));
        assert_eq!(listing.users, vec!["Overall", "Alice", "Bob"]);
        assert_eq!(listing.first_date, Some(day(2023, 1, 1)));
        assert_eq!(listing.last_date, Some(day(2023, 1, 2)));
        assert!(render_user_listing(&listing).contains("- Alice"));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let cli = Cli::try_parse_from([
            "chatlens",
            "--config",
            "/definitely/not/here/chatlens.toml",
            "users",
            "chat.txt",
        ])
        .expect("valid args");
        let err = App::from_cli(cli).expect_err("missing config must fail");
        assert!(matches!(err, CliError::Config(_)));
    }
}
