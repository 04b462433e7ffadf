use anyhow::{Context, Result};
use log::{info, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::settings::InsightsSettings;
use crate::domain::{self, RoleStats};
use crate::http::RateLimitedClient;
use crate::rating::PositionMetrics;

const SECTION_HEADING: &str = "Win rate by position";

struct Selectors {
    section: Selector,
    heading: Selector,
    card_body: Selector,
    winrate: Selector,
    count: Selector,
}

impl Selectors {
    fn compile() -> Result<Self> {
        Ok(Self {
            section: parse_selector("div.mb-4")?,
            heading: parse_selector("h4")?,
            card_body: parse_selector("div.card-body.text-end")?,
            winrate: parse_selector("span.h3")?,
            count: parse_selector(r#"span[style="font-size: 1.2em"]"#)?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {:?}", css, e))
}

/// Reads the flank/pocket cards from a profile's stats page
pub struct PositionScraper {
    client: RateLimitedClient,
    base_url: String,
    selectors: Selectors,
    number_regex: Regex,
}

impl PositionScraper {
    pub fn new(settings: &InsightsSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            selectors: Selectors::compile()?,
            number_regex: Self::compile_regex()?,
        })
    }

    /// Position multipliers for a profile, or `None` when the page has no
    /// usable position section.
    pub async fn fetch_position_stats(&mut self, profile_id: i64) -> Result<Option<PositionMetrics>> {
        let url = self.build_url(profile_id);
        info!("Fetching position stats for profile {}", profile_id);

        let text = self.client.get_text(&url).await?;
        let html = Html::parse_document(&text);

        match self.extract_role_stats(&html) {
            Some((flank, pocket)) => Ok(Some(domain::calculate_position_multipliers(flank, pocket))),
            None => {
                warn!("No position section found for profile {}", profile_id);
                Ok(None)
            }
        }
    }

    // --- Construction Helpers ---

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"-?\d+(?:\.\d+)?").context("Failed to compile number regex")
    }

    fn build_url(&self, profile_id: i64) -> String {
        format!("{}/user/{}/stats/0/", self.base_url, profile_id)
    }

    // --- Extraction ---

    /// Flank card first, pocket card second.
    fn extract_role_stats(&self, html: &Html) -> Option<(RoleStats, RoleStats)> {
        let section = self.find_section(html)?;
        let mut cards = section.select(&self.selectors.card_body);

        let flank = self.parse_card(cards.next()?)?;
        let pocket = self.parse_card(cards.next()?)?;
        Some((flank, pocket))
    }

    // Innermost `div.mb-4` wrapping the heading; it is the last match in
    // document order.
    fn find_section<'a>(&self, html: &'a Html) -> Option<ElementRef<'a>> {
        html.select(&self.selectors.section)
            .filter(|div| {
                div.select(&self.selectors.heading)
                    .any(|h| h.text().collect::<String>().trim() == SECTION_HEADING)
            })
            .last()
    }

    fn parse_card(&self, card: ElementRef) -> Option<RoleStats> {
        let winrate_text = card.select(&self.selectors.winrate).next()?.text().collect::<String>();
        let winrate = self.parse_number(&winrate_text)?;

        let counts: Vec<u32> = card
            .select(&self.selectors.count)
            .filter_map(|span| self.parse_number(&span.text().collect::<String>()))
            .map(|n| n as u32)
            .collect();

        match counts.as_slice() {
            [matches, wins] => Some(RoleStats::new(winrate, *matches, *wins)),
            _ => None,
        }
    }

    fn parse_number(&self, text: &str) -> Option<f64> {
        self.number_regex.find(text)?.as_str().parse().ok()
    }
}
