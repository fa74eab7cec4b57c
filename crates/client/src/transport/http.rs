//! One-shot HTTP command submission.
//!
//! Used when inbound delivery runs over the push stream: the command goes
//! out as a form-encoded POST and the reply, if any, arrives on the stream.

use url::Url;

use taleway_protocol::OutboundCommand;

use crate::error::SendError;

pub(crate) async fn post_command(
    client: &reqwest::Client,
    url: Url,
    command: &OutboundCommand,
) -> Result<(), SendError> {
    client
        .post(url)
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8",
        )
        .body(command.to_form_body())
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
