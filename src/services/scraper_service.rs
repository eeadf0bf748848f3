use crate::error::Result;
use crate::utils::text::truncate_chars;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

pub const MAX_ARTICLE_CHARS: usize = 10_000;
pub const UNTITLED: &str = "Untitled";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// Elements whose text never reaches the article body.
const STRIPPED_TAGS: &[&str] = &[
    "sup", "table", "style", "script", "figure", "figcaption", "span",
];

static TITLE: Lazy<Selector> = Lazy::new(|| selector("h1.firstHeading, h1#firstHeading"));
static ANY_H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static CONTENT: Lazy<Selector> = Lazy::new(|| selector("div#mw-content-text"));
static PARSER_OUTPUT: Lazy<Selector> = Lazy::new(|| selector("div.mw-parser-output"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));

static CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").expect("citation pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Outcome of scraping one article. `text` is absent when nothing usable
/// was found; `title` is absent only when the page could not be fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedArticle {
    pub text: Option<String>,
    pub title: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn scrape(&self, url: &str) -> ScrapedArticle;
}

#[derive(Clone)]
pub struct WikipediaScraper {
    client: Client,
}

impl WikipediaScraper {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await?.error_for_status()?;
        Ok(res.text().await?)
    }
}

#[async_trait]
impl ArticleSource for WikipediaScraper {
    async fn scrape(&self, url: &str) -> ScrapedArticle {
        match self.fetch(url).await {
            Ok(body) => {
                let article = extract_article(&body);
                tracing::info!(
                    url,
                    title = article.title.as_deref().unwrap_or_default(),
                    chars = article.text.as_ref().map(|t| t.chars().count()).unwrap_or(0),
                    "Scraped article"
                );
                article
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Failed to fetch article");
                ScrapedArticle::default()
            }
        }
    }
}

/// Pulls the title and cleaned paragraph text out of a Wikipedia page.
pub fn extract_article(html: &str) -> ScrapedArticle {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .or_else(|| document.select(&ANY_H1).next())
        .map(|h1| collapse_whitespace(&h1.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let Some(content) = document.select(&CONTENT).next() else {
        return ScrapedArticle {
            text: None,
            title: Some(title),
        };
    };
    let main = content.select(&PARSER_OUTPUT).next().unwrap_or(content);

    let paragraphs: Vec<String> = main
        .select(&PARAGRAPH)
        .filter(|p| !inside_stripped(p, &main))
        .map(|p| {
            let mut text = String::new();
            visible_text(p, &mut text);
            collapse_whitespace(&text)
        })
        .filter(|t| !t.is_empty())
        .collect();

    let joined = paragraphs.join(" ");
    let cleaned = collapse_whitespace(&CITATION.replace_all(&joined, ""));

    let text = if cleaned.is_empty() {
        None
    } else {
        Some(truncate_chars(&cleaned, MAX_ARTICLE_CHARS).to_string())
    };

    ScrapedArticle {
        text,
        title: Some(title),
    }
}

fn visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !STRIPPED_TAGS.contains(&child_element.value().name()) {
                visible_text(child_element, out);
            }
        }
    }
}

/// True when any ancestor of `element`, below `stop`, is a stripped element.
fn inside_stripped(element: &ElementRef<'_>, stop: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .take_while(|a| a.id() != stop.id())
        .filter_map(|a| a.value().as_element())
        .any(|el| STRIPPED_TAGS.contains(&el.name()))
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}
