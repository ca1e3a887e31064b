//! Request construction for the HR backend.
//!
//! Browser (`browser` feature): real HTTP calls via `gloo-net`.
//! Everywhere else only the URL and body builders exist; they are what the
//! controllers and tests use.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use url::form_urlencoded;

/// Action discriminator the backend expects for deletion.
pub const DELETE_EMPLOYEE_ACTION: &str = "delete_employee";

/// Url-encode `pairs` in order, as a browser would serialize a form.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Employee lookup for one duty station.
pub fn employees_lookup_url(endpoint: &str, duty_station_id: &str) -> String {
    let query = encode_pairs([("duty_station_id", duty_station_id)]);
    format!("{endpoint}?{query}")
}

/// Body of a delete request. The token field is omitted when the page has
/// no anti-forgery input.
pub fn delete_employee_body(employee_id: &str, csrf_token: Option<&str>) -> String {
    let mut pairs = vec![("action", DELETE_EMPLOYEE_ACTION), ("employee_id", employee_id)];
    if let Some(token) = csrf_token {
        pairs.push(("csrf_token", token));
    }
    encode_pairs(pairs)
}

/// [`Transport`](crate::net::transport::Transport) over `fetch`, sending
/// multipart bodies as the browser's own `FormData`.
#[cfg(feature = "browser")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "browser")]
mod gloo {
    use gloo_net::http::{Request, Response};

    use super::GlooTransport;
    use crate::net::transport::{HttpReply, RequestBody, SubmitError, Transport, TransportFuture};
    use crate::state::submission::FORM_URLENCODED;

    fn network(err: gloo_net::Error) -> SubmitError {
        SubmitError::Network(err.to_string())
    }

    async fn read_reply(resp: Response) -> Result<HttpReply, SubmitError> {
        let status = resp.status();
        let body = resp.text().await.map_err(network)?;
        Ok(HttpReply { status, body })
    }

    impl Transport for GlooTransport {
        type Multipart = web_sys::FormData;

        fn post(&self, url: &str, body: RequestBody<web_sys::FormData>) -> TransportFuture {
            let url = url.to_owned();
            Box::pin(async move {
                let builder = Request::post(&url)
                    .header("Accept", "application/json")
                    .header("X-Requested-With", "XMLHttpRequest");
                // Multipart leaves Content-Type unset so fetch adds the boundary.
                let request = match body {
                    RequestBody::UrlEncoded(encoded) => builder.header("Content-Type", FORM_URLENCODED).body(encoded),
                    RequestBody::Multipart(form) => builder.body(form),
                }
                .map_err(network)?;
                let resp = request.send().await.map_err(network)?;
                read_reply(resp).await
            })
        }

        fn get(&self, url: &str) -> TransportFuture {
            let url = url.to_owned();
            Box::pin(async move {
                let resp = Request::get(&url)
                    .header("Accept", "application/json")
                    .send()
                    .await
                    .map_err(network)?;
                read_reply(resp).await
            })
        }
    }
}
