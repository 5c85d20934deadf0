//! Reply handling
//!
//! Re-enters the feature on every correlated reply. A reply either turns the
//! page, resolves a numbered selection, or earns a corrective notice; every
//! transition replaces the session binding wholesale or leaves it untouched.

use super::{ImageSearchCommand, IncomingReply, Messenger};
use crate::error::Result;
use crate::fetch::FetchUrl;
use crate::search::SearchApi;
use crate::session::ReplyCorrelator;
use crate::types::outbound::{Attachment, OutgoingMessage};

impl<S, F, M, C> ImageSearchCommand<S, F, M, C>
where
    S: SearchApi,
    F: FetchUrl,
    M: Messenger,
    C: ReplyCorrelator,
{
    /// Handle a reply to one of our paginated messages.
    ///
    /// Transition rules, in order:
    /// 1. no live binding for the replied-to message: silent no-op (stale
    ///    pages behave exactly like foreign messages)
    /// 2. reply from a non-owner: silent no-op
    /// 3. `next`: advance a page, or notice when already on the last one
    /// 4. a parsed integer: resolve the selected tile, or an "invalid
    ///    number" notice when it maps to nothing
    /// 5. anything else: usage hint
    pub async fn handle_reply(&self, reply: IncomingReply) -> Result<()> {
        let Some(state) = self.correlator.lookup(&reply.replied_to).await else {
            log::debug!(
                "reply to {} has no live session, ignoring",
                reply.replied_to.as_str()
            );
            return Ok(());
        };

        if state.owner != reply.sender {
            log::debug!(
                "ignoring reply from {} on a session owned by {}",
                reply.sender.as_str(),
                state.owner.as_str()
            );
            return Ok(());
        }

        let text = reply.text.trim().to_lowercase();

        if text == "next" {
            if state.on_last_page() {
                self.send_text("You are already on the last page.").await?;
                return Ok(());
            }
            let next = state.current_page + 1;
            log::info!("turning \"{}\" to page {next}/{}", state.query, state.total_pages);
            if let Err(e) = self
                .send_page(
                    state.owner.clone(),
                    state.query.clone(),
                    state.all_urls.clone(),
                    next,
                    Some(reply.replied_to),
                )
                .await
            {
                log::warn!("page {next} for \"{}\" failed: {e}", state.query);
                self.send_text("Failed to render the next page.").await?;
            }
            return Ok(());
        }

        if let Ok(n) = text.parse::<i64>() {
            let Some(url) = usize::try_from(n)
                .ok()
                .filter(|n| *n > 0)
                .and_then(|n| state.url_for_ordinal(n))
            else {
                self.send_text("Invalid image number.").await?;
                return Ok(());
            };

            match self.fetcher.fetch(url).await {
                Err(e) => {
                    log::warn!("selection #{n} for \"{}\" failed: {e}", state.query);
                    self.send_text("Failed to fetch image.").await?;
                }
                Ok(bytes) => {
                    // terminal transition: consume the binding, then reply
                    self.correlator.invalidate(&reply.replied_to).await;
                    let body = format!("Image #{n} for \"{}\"", state.query);
                    self.messenger
                        .send(OutgoingMessage::with_attachment(
                            body,
                            Attachment::new(format!("image_{n}.jpg"), bytes),
                        ))
                        .await?;
                    log::info!("selection #{n} for \"{}\" resolved", state.query);
                }
            }
            return Ok(());
        }

        self.send_text("Reply with a number (from canvas) or \"next\".")
            .await?;
        Ok(())
    }
}
