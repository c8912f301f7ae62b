use streamfinder_model::ResultPage;
use tracing::debug;

use super::accumulator::FetchTicket;
use crate::gateway::{GatewayError, MetadataGateway};
use crate::query::RequestSpec;

/// Performs the fetch a ticket describes.
///
/// A blank search is answered with [`ResultPage::empty`] without touching the
/// gateway.
pub async fn dispatch<G>(
    gateway: &G,
    ticket: &FetchTicket,
) -> Result<ResultPage, GatewayError>
where
    G: MetadataGateway + ?Sized,
{
    match ticket.request() {
        RequestSpec::Search(search) if search.is_blank() => {
            debug!(token = ticket.token(), "blank search; returning empty page");
            Ok(ResultPage::empty())
        }
        RequestSpec::Search(search) => {
            gateway
                .fetch_search_page(&search.text, search.media_kind, search.page)
                .await
        }
        RequestSpec::Discover(discover) => gateway.fetch_discover_page(&discover).await,
    }
}
