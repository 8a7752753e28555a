use crate::jokes::model::ApiResponse;
use crate::jokes::model::Joke;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::RequestBuilder;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum JokeApiError {
    #[error("Joke API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Joke API answered with status {0}")]
    StatusError(u16),

    #[error("Joke API reported an error: {0}")]
    ApiError(String),
}

/// Where jokes come from.
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Joke>, JokeApiError>;
}

/// Client of the JokeAPI `joke` endpoint.
#[derive(Clone, Debug)]
pub struct JokeApiClient {
    client: Client,
    url: String,
    amount: u32,
    kind: String,
}

impl JokeApiClient {
    pub fn new(url: impl Into<String>, amount: u32, kind: impl Into<String>) -> Self {
        JokeApiClient {
            client: Client::new(),
            url: url.into(),
            amount,
            kind: kind.into(),
        }
    }

    fn request(&self) -> RequestBuilder {
        self.client
            .get(&self.url)
            .query(&[("type", self.kind.as_str())])
            .query(&[("amount", self.amount)])
    }
}

#[async_trait]
impl JokeSource for JokeApiClient {
    async fn fetch(&self) -> Result<Vec<Joke>, JokeApiError> {
        let response = self.request().send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JokeApiError::StatusError(status.as_u16()));
        }
        let jokes = into_jokes(response.json::<ApiResponse>().await?)?;
        debug!(url = %self.url, count = jokes.len(), "fetched jokes");
        Ok(jokes)
    }
}

/// Maps an API answer to storable jokes; an error body becomes [`JokeApiError::ApiError`].
pub fn into_jokes(response: ApiResponse) -> Result<Vec<Joke>, JokeApiError> {
    match response {
        ApiResponse::Batch { jokes } => Ok(jokes.into_iter().map(Joke::from).collect()),
        ApiResponse::Single(joke) => Ok(vec![Joke::from(joke)]),
        ApiResponse::Failure(failure) => {
            let message = match failure.additional_info {
                Some(info) => format!("{} ({info})", failure.message),
                None => failure.message,
            };
            Err(JokeApiError::ApiError(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jokes::model::ApiFailure;
    use serde_json::json;

    #[test]
    fn request_carries_type_and_amount() {
        let client = JokeApiClient::new("https://v2.jokeapi.dev/joke/Any", 100, "twopart");
        let request = client.request().build().unwrap();
        assert_eq!(request.url().as_str(), "https://v2.jokeapi.dev/joke/Any?type=twopart&amount=100");
    }

    #[test]
    fn batch_and_single_answers_become_jokes() {
        let batch = serde_json::from_value(json!({
            "error": false,
            "amount": 2,
            "jokes": [
                { "category": "Pun", "type": "twopart", "setup": "a", "delivery": "b", "lang": "en" },
                { "category": "Dark", "type": "single", "joke": "c", "lang": "en" }
            ]
        })).unwrap();
        let jokes = into_jokes(batch).unwrap();
        assert_eq!(jokes.len(), 2);
        assert_eq!(jokes[1].joke.as_deref(), Some("c"));

        let single = serde_json::from_value(json!({ "category": "Pun", "type": "single", "joke": "d", "lang": "en" })).unwrap();
        assert_eq!(into_jokes(single).unwrap().len(), 1);
    }

    #[test]
    fn error_answer_is_an_upstream_failure() {
        let failure = ApiResponse::Failure(ApiFailure {
            error: true,
            message: "No matching joke found".to_owned(),
            additional_info: Some("Try other filters".to_owned()),
        });
        let error = into_jokes(failure).unwrap_err();
        assert_eq!(error.to_string(), "Joke API reported an error: No matching joke found (Try other filters)");
    }
}
