// src/enrich/naver.rs
//! Naver news search scraper. Each `ul.list_news > li` item maps to one article:
//! title from `a.news_tit[title]`, link from the first `a` whose class is exactly
//! `info`, excerpt from `a.api_txt_lines.dsc_txt_wrap`, thumbnail from
//! `img.thumb.api_get[src]`.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::enrich::ArticleEnricher;
use crate::html::{attr, classes, has_classes, inner_text};
use crate::trend::{Article, MAX_TOP_ARTICLES};

pub const DEFAULT_SEARCH_URL: &str =
    "https://search.naver.com/search.naver?where=news&sm=tab_jum";

pub struct NaverNewsEnricher {
    search_url: String,
    client: reqwest::Client,
}

impl NaverNewsEnricher {
    pub fn new(search_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            search_url: search_url.into(),
            client,
        }
    }

    fn query_url(&self, keyword: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.search_url)
            .with_context(|| format!("invalid search url {}", self.search_url))?;
        url.query_pairs_mut().append_pair("query", keyword);
        Ok(url)
    }
}

fn re_list_tag() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)<(/?)(ul|li)\b[^>]*>").expect("list tag regex"))
}

fn re_anchor() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)(<a\b[^>]*>)(.*?)</a>").expect("anchor regex"))
}

fn re_img() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)<img\b[^>]*>").expect("img regex"))
}

/// Parse one news list item; fields that are missing come back empty.
fn parse_item(item: &str) -> Article {
    let mut article = Article {
        title: String::new(),
        link: String::new(),
        content: String::new(),
        thumbnail: String::new(),
    };

    for caps in re_anchor().captures_iter(item) {
        let (Some(open), Some(body)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let open = open.as_str();
        if article.title.is_empty() && has_classes(open, &["news_tit"]) {
            article.title = attr(open, "title").unwrap_or_default();
        } else if article.link.is_empty() && classes(open) == ["info"] {
            article.link = attr(open, "href").unwrap_or_default();
        } else if article.content.is_empty()
            && has_classes(open, &["api_txt_lines", "dsc_txt_wrap"])
        {
            article.content = inner_text(body.as_str());
        }
    }

    if let Some(img) = re_img()
        .find_iter(item)
        .find(|m| has_classes(m.as_str(), &["thumb", "api_get"]))
    {
        article.thumbnail = attr(img.as_str(), "src").unwrap_or_default();
    }

    article
}

/// Direct `li` children of the first `ul.list_news`, as raw fragments.
/// Nested lists stay inside their item; an unclosed list runs to the end.
fn list_items(html: &str) -> Vec<&str> {
    let mut tags = re_list_tag().captures_iter(html);
    let opened = tags.by_ref().find(|caps| {
        caps[1].is_empty() && caps[2].eq_ignore_ascii_case("ul") && has_classes(&caps[0], &["list_news"])
    });
    if opened.is_none() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut depth = 1usize;
    let mut item_start: Option<usize> = None;
    for caps in tags {
        let Some(tag) = caps.get(0) else { continue };
        let closing = &caps[1] == "/";
        let is_ul = caps[2].eq_ignore_ascii_case("ul");
        match (is_ul, closing) {
            (true, false) => depth += 1,
            (true, true) => {
                depth -= 1;
                if depth == 0 {
                    if let Some(from) = item_start.take() {
                        items.push(&html[from..tag.start()]);
                    }
                    return items;
                }
            }
            (false, false) if depth == 1 => {
                if let Some(from) = item_start.replace(tag.start()) {
                    items.push(&html[from..tag.start()]);
                }
            }
            (false, true) if depth == 1 => {
                if let Some(from) = item_start.take() {
                    items.push(&html[from..tag.end()]);
                }
            }
            _ => {}
        }
    }
    if let Some(from) = item_start {
        items.push(&html[from..]);
    }
    items
}

/// Complete articles from a search result page, at most `max`.
pub fn parse_naver_articles(html: &str, max: usize) -> Vec<Article> {
    list_items(html)
        .into_iter()
        .map(parse_item)
        .filter(Article::is_complete)
        .take(max)
        .collect()
}

#[async_trait]
impl ArticleEnricher for NaverNewsEnricher {
    async fn top_articles(&self, keyword: &str) -> Result<Vec<Article>> {
        let url = self.query_url(keyword)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("naver http get()")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("naver returned status {status}");
        }
        let body = resp.text().await.context("naver http .text()")?;
        Ok(parse_naver_articles(&body, MAX_TOP_ARTICLES))
    }

    fn name(&self) -> &str {
        "naver"
    }
}
