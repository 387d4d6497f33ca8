//! Response handling shared by the droplet endpoints.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use super::ProviderError;
use super::wire::ApiErrorBody;

/// Sends a request and decodes a JSON success body.
pub(super) async fn send_json<T: DeserializeOwned>(
    builder: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }
    Err(api_error(status.as_u16(), &body))
}

/// Sends a request whose success response carries no body.
pub(super) async fn send_empty(builder: RequestBuilder) -> Result<(), ProviderError> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.bytes().await?;
    Err(api_error(status.as_u16(), &body))
}

fn api_error(status: u16, body: &[u8]) -> ProviderError {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) => ProviderError::Api {
            status,
            id: parsed.id,
            message: parsed.message,
        },
        Err(_) => ProviderError::Api {
            status,
            id: String::new(),
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

/// Extracts the `page` query parameter from a pagination link.
pub(super) fn page_number(link: &str) -> Option<u32> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.digitalocean.com/v2/droplets?page=2&per_page=1", Some(2))]
    #[case("https://api.digitalocean.com/v2/droplets?per_page=20&page=14", Some(14))]
    #[case("https://api.digitalocean.com/v2/droplets?per_page=20", None)]
    #[case("not a url", None)]
    fn page_number_reads_query(#[case] link: &str, #[case] expected: Option<u32>) {
        assert_eq!(page_number(link), expected);
    }

    #[test]
    fn api_error_keeps_raw_body_when_not_json() {
        let err = api_error(502, b"<html>bad gateway</html>");
        assert_eq!(
            err,
            ProviderError::Api {
                status: 502,
                id: String::new(),
                message: String::from("<html>bad gateway</html>"),
            }
        );
    }
}
