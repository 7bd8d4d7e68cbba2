//! HTML job-board adapter: fetch a search page, pick job cards out with
//! CSS selectors.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::JobSource;
use crate::config::BoardConfig;
use crate::error::{SourceError, SourceResult};
use crate::types::{RawJob, ScrapedCard};

const USER_AGENT: &str = concat!("job-digest/", env!("CARGO_PKG_VERSION"));

fn parse_selector(selector: &str) -> SourceResult<Selector> {
    Selector::parse(selector).map_err(|e| SourceError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn parse_optional(selector: &Option<String>) -> SourceResult<Option<Selector>> {
    selector.as_deref().map(parse_selector).transpose()
}

/// Compiled selectors for one board.
#[derive(Debug)]
struct CardSelectors {
    card: Selector,
    title: Selector,
    company: Option<Selector>,
    location: Option<Selector>,
    link: Selector,
    posted: Option<Selector>,
    description: Option<Selector>,
}

pub struct BoardSource {
    name: String,
    client: reqwest::Client,
    url_template: String,
    selectors: CardSelectors,
    id_attribute: Option<String>,
    publisher: Option<String>,
}

impl BoardSource {
    pub fn from_config(config: &BoardConfig, timeout: Duration) -> SourceResult<Self> {
        let selectors = CardSelectors {
            card: parse_selector(&config.card_selector)?,
            title: parse_selector(&config.title_selector)?,
            company: parse_optional(&config.company_selector)?,
            location: parse_optional(&config.location_selector)?,
            link: parse_selector(config.link_selector.as_deref().unwrap_or("a[href]"))?,
            posted: parse_optional(&config.posted_selector)?,
            description: parse_optional(&config.description_selector)?,
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            name: config.name.clone(),
            client,
            url_template: config.url_template.clone(),
            selectors,
            id_attribute: config.id_attribute.clone(),
            publisher: config.publisher.clone(),
        })
    }

    fn search_url(&self, query: &str, location: &str) -> String {
        self.url_template
            .replace("{query}", &urlencoding::encode(query.trim()))
            .replace("{location}", &urlencoding::encode(location.trim()))
    }

    /// Extract every card on the page. Cards without a title are kept; the
    /// normalizer decides what a missing field means.
    fn parse_cards(&self, html: &str, page_url: &Url) -> Vec<ScrapedCard> {
        let document = Html::parse_document(html);
        let s = &self.selectors;

        document
            .select(&s.card)
            .map(|card| ScrapedCard {
                id: self
                    .id_attribute
                    .as_deref()
                    .and_then(|attr| card.value().attr(attr))
                    .map(str::to_string),
                title: select_text(card, Some(&s.title)),
                company: select_text(card, s.company.as_ref()),
                location: select_text(card, s.location.as_ref()),
                link: select_link(card, &s.link, page_url),
                posted: select_posted(card, s.posted.as_ref()),
                description: select_text(card, s.description.as_ref()),
                publisher: self.publisher.clone(),
            })
            .collect()
    }
}

/// Whitespace-collapsed text of an element; `None` when blank.
fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

fn select_text(card: ElementRef<'_>, selector: Option<&Selector>) -> Option<String> {
    card.select(selector?).next().and_then(element_text)
}

fn select_link(card: ElementRef<'_>, selector: &Selector, page_url: &Url) -> Option<String> {
    let href = card
        .select(selector)
        .find_map(|el| el.value().attr("href"))
        .or_else(|| card.value().attr("href"))?;
    page_url.join(href.trim()).ok().map(|u| u.to_string())
}

fn select_posted(card: ElementRef<'_>, selector: Option<&Selector>) -> Option<String> {
    let element = card.select(selector?).next()?;
    element
        .value()
        .attr("datetime")
        .map(str::to_string)
        .or_else(|| element_text(element))
}

#[async_trait]
impl JobSource for BoardSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &str, location: &str) -> SourceResult<Vec<RawJob>> {
        let url = self.search_url(query, location);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let page_url = response.url().clone();
        let html = response.text().await?;
        let cards = self.parse_cards(&html, &page_url);

        if cards.is_empty() {
            tracing::debug!(board = %self.name, url = %page_url, "No job cards matched");
        }

        Ok(cards.into_iter().map(RawJob::Scraped).collect())
    }
}
