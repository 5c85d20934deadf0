//! Command entry
//!
//! Parses the invocation, runs the search, and fans out into direct-send
//! mode or the first canvas page. Per-item failures stay contained; only
//! messenger failures propagate to the host.

use chrono::Utc;

use super::{ImageSearchCommand, Invocation, Messenger};
use crate::canvas::Candidate;
use crate::error::Result;
use crate::fetch::FetchUrl;
use crate::search::SearchApi;
use crate::session::{PageSpec, ReplyCorrelator, SessionState, page_slice, total_pages};
use crate::types::identifiers::{MessageId, UserId};
use crate::types::outbound::{Attachment, OutgoingMessage};

/// Invocation text split into the search query and the optional count flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedInvocation {
    pub query: String,
    pub direct_count: Option<u32>,
}

/// Split off a `-<digits>` token selecting direct-send mode.
///
/// Only the first matching token is consumed; the rest of the tokens,
/// joined by single spaces, form the query.
pub(crate) fn parse_invocation(text: &str) -> ParsedInvocation {
    let mut direct_count = None;
    let mut query_tokens = Vec::new();

    for token in text.split_whitespace() {
        if direct_count.is_none()
            && let Some(digits) = token.strip_prefix('-')
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && let Ok(count) = digits.parse::<u32>()
            && count > 0
        {
            direct_count = Some(count);
            continue;
        }
        query_tokens.push(token);
    }

    ParsedInvocation {
        query: query_tokens.join(" "),
        direct_count,
    }
}

impl<S, F, M, C> ImageSearchCommand<S, F, M, C>
where
    S: SearchApi,
    F: FetchUrl,
    M: Messenger,
    C: ReplyCorrelator,
{
    /// Handle a fresh command invocation.
    ///
    /// Sends a status message, queries the search API, and either bundles
    /// direct attachments or renders page 1 and attaches a session to it.
    /// The returned error is always a messenger failure; every other failure
    /// ends in a user-facing notice.
    pub async fn handle_invocation(&self, invocation: Invocation) -> Result<()> {
        let parsed = parse_invocation(&invocation.text);
        if parsed.query.is_empty() {
            self.send_text("Please provide a search query.").await?;
            return Ok(());
        }

        log::info!(
            "image search \"{}\" from {} (direct: {:?})",
            parsed.query,
            invocation.sender.as_str(),
            parsed.direct_count
        );
        self.send_text("Searching images...").await?;

        let urls = match self.search.search(&parsed.query, self.config.result_cap).await {
            Ok(urls) => urls,
            Err(e) => {
                log::warn!("search for \"{}\" failed: {e}", parsed.query);
                self.send_text("Image search failed.").await?;
                return Ok(());
            }
        };

        if urls.is_empty() {
            self.send_text(&format!("No images found for \"{}\".", parsed.query))
                .await?;
            return Ok(());
        }

        match parsed.direct_count {
            Some(count) => self.send_direct(&parsed.query, &urls, count).await,
            None => {
                if let Err(e) = self
                    .send_page(invocation.sender, parsed.query.clone(), urls, 1, None)
                    .await
                {
                    log::warn!("page 1 for \"{}\" failed: {e}", parsed.query);
                    self.send_text("Failed to render image results.").await?;
                }
                Ok(())
            }
        }
    }

    /// Direct-send mode: resolve the first `count` URLs independently and
    /// bundle the successes into one message. No session is created.
    async fn send_direct(&self, query: &str, urls: &[String], count: u32) -> Result<()> {
        let take = (count as usize).min(urls.len());
        let resolved = crate::fetch::fetch_batch(&self.fetcher, &urls[..take]).await;

        let attachments: Vec<Attachment> = resolved
            .into_iter()
            .enumerate()
            .map(|(i, bytes)| Attachment::new(format!("image_{}.jpg", i + 1), bytes))
            .collect();

        let body = format!("{} image(s) for \"{query}\"", attachments.len());
        self.messenger
            .send(OutgoingMessage::with_attachments(body, attachments))
            .await?;
        Ok(())
    }

    /// Render one page, send it, and swap the session binding onto the new
    /// message. `supersedes` is the previous page's message, invalidated
    /// only after the new page went out.
    pub(crate) async fn send_page(
        &self,
        owner: UserId,
        query: String,
        all_urls: Vec<String>,
        page: u32,
        supersedes: Option<MessageId>,
    ) -> Result<()> {
        let spec = PageSpec {
            page_number: page,
            page_size: self.config.page_size,
            total_pages: total_pages(all_urls.len(), self.config.page_size),
        };
        let total = spec.total_pages;
        let (slice, base) = page_slice(&all_urls, spec.page_number, spec.page_size);
        let candidates: Vec<Candidate> = slice
            .iter()
            .enumerate()
            .map(|(i, url)| Candidate {
                url: url.clone(),
                source_index: base + i,
            })
            .collect();

        let rendered = self
            .compositor
            .render(&self.fetcher, &candidates, &query, page, total)
            .await?;

        let body = if page == 1 {
            format!(
                "{} images found for \"{query}\".\nReply with a number (from canvas) or \"next\".",
                all_urls.len()
            )
        } else {
            format!("Page {page}/{total}\nReply with a number or \"next\".")
        };

        let message_id = self
            .messenger
            .send(OutgoingMessage::with_attachment(
                body,
                Attachment::new("results.png", rendered.png),
            ))
            .await?;

        if let Some(old) = supersedes {
            self.correlator.invalidate(&old).await;
        }
        self.correlator
            .attach(
                message_id,
                SessionState {
                    owner,
                    query,
                    all_urls,
                    page_size: spec.page_size,
                    current_page: spec.page_number,
                    total_pages: spec.total_pages,
                    displayed_map: rendered.displayed_map,
                    created_at: Utc::now(),
                },
            )
            .await;

        log::info!("page {page}/{total} sent, session attached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_query() {
        let parsed = parse_invocation("fluffy cats");
        assert_eq!(parsed.query, "fluffy cats");
        assert_eq!(parsed.direct_count, None);
    }

    #[test]
    fn test_parse_count_flag_stripped() {
        let parsed = parse_invocation("dogs -5");
        assert_eq!(parsed.query, "dogs");
        assert_eq!(parsed.direct_count, Some(5));
    }

    #[test]
    fn test_parse_flag_position_does_not_matter() {
        let parsed = parse_invocation("-3 red pandas");
        assert_eq!(parsed.query, "red pandas");
        assert_eq!(parsed.direct_count, Some(3));
    }

    #[test]
    fn test_parse_non_numeric_dash_token_kept() {
        let parsed = parse_invocation("t-rex skeleton");
        assert_eq!(parsed.query, "t-rex skeleton");
        assert_eq!(parsed.direct_count, None);
    }

    #[test]
    fn test_parse_zero_count_not_a_flag() {
        let parsed = parse_invocation("cats -0");
        assert_eq!(parsed.query, "cats -0");
        assert_eq!(parsed.direct_count, None);
    }

    #[test]
    fn test_parse_only_first_flag_consumed() {
        let parsed = parse_invocation("cats -5 -7");
        assert_eq!(parsed.query, "cats -7");
        assert_eq!(parsed.direct_count, Some(5));
    }

    #[test]
    fn test_parse_empty_text() {
        let parsed = parse_invocation("   ");
        assert!(parsed.query.is_empty());
        assert_eq!(parsed.direct_count, None);
    }
}
