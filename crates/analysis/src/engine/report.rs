use chatlens_core::{ChatlensConfig, Message, MessageFilter, Transcript};
use serde::Serialize;
use tracing::info;

use super::{
    activity_heatmap, create_wordcloud, daily_timeline, emoji_helper, extreme_messages,
    fetch_stats, month_activity_map, monthly_timeline, most_busy_users, most_common_words,
    sentiment_analysis, sentiment_distribution, sentiment_trend, week_activity_map, BusyUsers,
    DailyPoint, DayCount, EmojiCount, Extremes, Heatmap, LabelCount, MonthCount, MonthlyPoint,
    ScoredMessage, Stats, TrendPoint, WordCloud, WordCount,
};
use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::filter::filter;
use crate::nlp::Stopwords;
use crate::normalizer::NormalizeOptions;
use crate::parsers::TranscriptParser;
use crate::sentiment::{LexiconScorer, SentimentScorer};

/// Per-message sentiment with its summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentSummary {
    /// Every scored participant message.
    pub messages: Vec<ScoredMessage>,
    /// Messages per label.
    pub distribution: Vec<LabelCount>,
    /// Mean score per day.
    pub trend: Vec<TrendPoint>,
    /// Highest and lowest scoring messages.
    pub extremes: Extremes,
}

/// Every view for one author/date selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Selected author, or `"Overall"`.
    pub scope: String,
    /// Headline counts.
    pub stats: Stats,
    /// Messages per month.
    pub monthly_timeline: Vec<MonthlyPoint>,
    /// Messages per day.
    pub daily_timeline: Vec<DailyPoint>,
    /// Messages per weekday.
    pub week_activity: Vec<DayCount>,
    /// Messages per month name.
    pub month_activity: Vec<MonthCount>,
    /// Weekday by hour matrix.
    pub heatmap: Heatmap,
    /// Busiest participants; only for the overall scope.
    pub busy_users: Option<BusyUsers>,
    /// Most frequent words.
    pub common_words: Vec<WordCount>,
    /// Word cloud terms.
    pub wordcloud: WordCloud,
    /// Emoji ranking.
    pub emoji: Vec<EmojiCount>,
    /// Sentiment views.
    pub sentiment: SentimentSummary,
}

impl AnalysisReport {
    /// One-shot report with the lexicon scorer. Fails on invalid configuration.
    pub fn build(
        transcript: &Transcript,
        selection: &MessageFilter,
        config: &AnalysisConfig,
    ) -> AnalysisResult<Self> {
        let analyzer = ChatAnalyzer::new(config.clone())?;
        Ok(analyzer.report(transcript, selection))
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the analytics engine with one configuration.
pub struct ChatAnalyzer {
    config: AnalysisConfig,
    stopwords: Stopwords,
    scorer: Box<dyn SentimentScorer>,
}

impl ChatAnalyzer {
    /// Analyzer using the lexicon scorer. Fails on invalid configuration.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        let scorer = LexiconScorer::from_config(&config.sentiment);
        Self::with_scorer(config, Box::new(scorer))
    }

    /// Analyzer using a custom sentiment backend.
    pub fn with_scorer(
        config: AnalysisConfig,
        scorer: Box<dyn SentimentScorer>,
    ) -> AnalysisResult<Self> {
        config.validate()?;
        let stopwords = if config.nlp.stopword_filtering {
            Stopwords::with_extra(&config.nlp.extra_stopwords)
        } else {
            Stopwords::disabled()
        };
        Ok(Self {
            config,
            stopwords,
            scorer,
        })
    }

    /// Analyzer configured from a loaded application config.
    pub fn from_settings(config: &ChatlensConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Self::new(AnalysisConfig::from(&config.analysis))
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parser that normalizes with this analyzer's media placeholder.
    pub fn parser(&self) -> TranscriptParser {
        TranscriptParser::with_options(NormalizeOptions {
            media_placeholder: self.config.media_placeholder.clone(),
        })
    }

    /// Busiest participants with the configured cutoff.
    pub fn busy_users(&self, view: &[&Message]) -> BusyUsers {
        most_busy_users(view, self.config.rankings.top_users)
    }

    /// Most common words with the configured stopwords and cutoff.
    pub fn common_words(&self, view: &[&Message]) -> Vec<WordCount> {
        most_common_words(
            view,
            &self.stopwords,
            self.config.nlp.min_word_length,
            self.config.rankings.top_words,
        )
    }

    /// Word cloud terms with the configured stopwords and cap.
    pub fn wordcloud(&self, view: &[&Message]) -> WordCloud {
        create_wordcloud(
            view,
            &self.stopwords,
            self.config.nlp.min_word_length,
            self.config.rankings.wordcloud_max_words,
        )
    }

    /// Emoji ranking, truncated when a cutoff is configured.
    pub fn emoji(&self, view: &[&Message]) -> Vec<EmojiCount> {
        let mut ranked = emoji_helper(view);
        if let Some(limit) = self.config.rankings.top_emoji {
            ranked.truncate(limit);
        }
        ranked
    }

    /// Scored messages plus distribution, trend, and extremes.
    pub fn sentiment(&self, view: &[&Message]) -> SentimentSummary {
        let messages = sentiment_analysis(view, self.scorer.as_ref());
        SentimentSummary {
            distribution: sentiment_distribution(&messages),
            trend: sentiment_trend(&messages),
            extremes: extreme_messages(&messages, self.config.rankings.extreme_messages),
            messages,
        }
    }

    /// Filter the transcript and compute every view.
    pub fn report(&self, transcript: &Transcript, selection: &MessageFilter) -> AnalysisReport {
        let view = filter(transcript.messages(), selection);
        info!(
            "building report for {} over {} of {} messages (sentiment: {})",
            selection.user,
            view.len(),
            transcript.len(),
            self.scorer.name()
        );

        AnalysisReport {
            scope: selection.user.to_string(),
            stats: fetch_stats(&view),
            monthly_timeline: monthly_timeline(&view),
            daily_timeline: daily_timeline(&view),
            week_activity: week_activity_map(&view),
            month_activity: month_activity_map(&view),
            heatmap: activity_heatmap(&view),
            busy_users: selection
                .user
                .is_overall()
                .then(|| self.busy_users(&view)),
            common_words: self.common_words(&view),
            wordcloud: self.wordcloud(&view),
            emoji: self.emoji(&view),
            sentiment: self.sentiment(&view),
        }
    }
}

impl std::fmt::Debug for ChatAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAnalyzer")
            .field("config", &self.config)
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_core::UserScope;

    const RAW: &str = "01/01/23, 10:00 - Alice: Hello 😀\n\
                       01/01/23, 10:05 - Bob: Hi <Media omitted>\n\
                       02/01/23, 09:00 - Alice: How are you";

    struct ConstantScorer;

    impl SentimentScorer for ConstantScorer {
        fn name(&self) -> &str {
            "constant"
        }

        fn score(&self, _text: &str) -> f64 {
            -0.5
        }
    }

    #[test]
    fn busy_users_only_for_overall_scope() {
        let analyzer = ChatAnalyzer::new(AnalysisConfig::default()).expect("valid config");
        let transcript = analyzer.parser().parse(RAW);

        let overall = analyzer.report(&transcript, &MessageFilter::overall());
        assert!(overall.busy_users.is_some());
        assert_eq!(overall.scope, "Overall");

        let alice = analyzer.report(
            &transcript,
            &MessageFilter::overall().with_user(UserScope::parse("Alice")),
        );
        assert!(alice.busy_users.is_none());
        assert_eq!(alice.stats.messages, 2);
        assert_eq!(alice.scope, "Alice");
    }

    #[test]
    fn build_matches_the_analyzer_report() {
        let config = AnalysisConfig::default();
        let transcript = crate::parsers::parse(RAW);
        let built = AnalysisReport::build(&transcript, &MessageFilter::overall(), &config)
            .expect("valid config");
        let analyzer = ChatAnalyzer::new(config).expect("valid config");
        assert_eq!(built, analyzer.report(&transcript, &MessageFilter::overall()));
    }

    #[test]
    fn custom_scorer_is_used() {
        let analyzer = ChatAnalyzer::with_scorer(AnalysisConfig::default(), Box::new(ConstantScorer))
            .expect("valid config");
        let transcript = analyzer.parser().parse(RAW);
        let report = analyzer.report(&transcript, &MessageFilter::overall());
        assert!(report.sentiment.messages.iter().all(|m| m.score == -0.5));
        assert_eq!(report.sentiment.distribution.len(), 1);
    }

    #[test]
    fn settings_errors_surface_as_core_errors() {
        let mut settings = ChatlensConfig::default();
        settings.analysis.media_placeholder = String::new();
        let err = ChatAnalyzer::from_settings(&settings).expect_err("empty placeholder");
        assert!(matches!(err, crate::error::AnalysisError::Core(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.rankings.top_words = 0;
        assert!(ChatAnalyzer::new(config).is_err());
    }

    #[test]
    fn emoji_cutoff_truncates() {
        let mut config = AnalysisConfig::default();
        config.rankings.top_emoji = Some(1);
        let analyzer = ChatAnalyzer::new(config).expect("valid config");
        let transcript = analyzer.parser().parse("01/01/23, 10:00 - Alice: 😀😀🎉👍");
        let view = filter(transcript.messages(), &MessageFilter::overall());
        assert_eq!(analyzer.emoji(&view).len(), 1);
    }

    #[test]
    fn report_serializes_to_json() {
        let analyzer = ChatAnalyzer::new(AnalysisConfig::default()).expect("valid config");
        let transcript = analyzer.parser().parse(RAW);
        let json = analyzer
            .report(&transcript, &MessageFilter::overall())
            .to_json_pretty()
            .expect("report should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["stats"]["messages"], 3);
        assert_eq!(value["monthly_timeline"][0]["period"], "Jan 2023");
        assert_eq!(value["week_activity"][0]["day"], "Sunday");
        assert_eq!(value["heatmap"]["bands"][13], "13-14");
    }
}
