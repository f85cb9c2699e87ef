use crate::config::DEFAULT_API_BASE_URL;
use crate::error::FetchError;
use crate::record::{MealsEnvelope, RawMeal};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

/// A provider of raw meal records.
///
/// [`MealDbClient`] talks to TheMealDB. Other implementations can serve records from memory,
/// which keeps the generation logic independent of the network.
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Returns a single random meal.
    async fn random_meal(&self) -> Result<RawMeal, FetchError>;

    /// Returns all meals whose name starts with `letter`. An unknown letter yields no meal.
    async fn meals_by_first_letter(&self, letter: char) -> Result<Vec<RawMeal>, FetchError>;
}

/// HTTP client for TheMealDB's JSON API.
#[derive(Clone, Debug)]
pub struct MealDbClient {
    client: reqwest::Client,
    base_url: Url,
}

impl MealDbClient {
    /// Creates a client for the public API.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    /// Creates a client for the API rooted at `base_url` (e.g. a mirror or a local stub).
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        // Endpoints are joined relative to the base, which must therefore end with a slash.
        let normalized = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|_| FetchError::InvalidUrl(base_url.to_owned()))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("recipe-graph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| FetchError::Transport {
                url: base_url.to_string(),
                error,
            })?;
        Ok(Self { client, base_url })
    }

    /// Returns the base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|_| FetchError::InvalidUrl(format!("{}{path}", self.base_url)))
    }

    async fn get_meals(&self, url: Url) -> Result<Vec<RawMeal>, FetchError> {
        debug!(%url, "Requesting meals");
        let transport = |error| FetchError::Transport {
            url: url.to_string(),
            error,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        let envelope: MealsEnvelope =
            serde_json::from_slice(&body).map_err(|error| FetchError::Decode {
                url: url.to_string(),
                error,
            })?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    async fn random_meal(&self) -> Result<RawMeal, FetchError> {
        let url = self.endpoint("random.php")?;
        let mut meals = self.get_meals(url.clone()).await?;
        if meals.is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }
        Ok(meals.swap_remove(0))
    }

    async fn meals_by_first_letter(&self, letter: char) -> Result<Vec<RawMeal>, FetchError> {
        let mut url = self.endpoint("search.php")?;
        url.query_pairs_mut()
            .append_pair("f", letter.encode_utf8(&mut [0; 4]));
        self.get_meals(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(endpoint: &str, response: ResponseTemplate) -> (MockServer, MealDbClient) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(response)
            .mount(&server)
            .await;
        let client = MealDbClient::with_base_url(&server.uri()).unwrap();
        (server, client)
    }

    #[test]
    fn base_url_without_trailing_slash_is_normalized() {
        let client = MealDbClient::with_base_url("http://localhost:8080/api").unwrap();
        assert_eq!(
            client.endpoint("random.php").unwrap().as_str(),
            "http://localhost:8080/api/random.php"
        );
    }

    #[test]
    fn default_client_targets_the_public_api() {
        let client = MealDbClient::new().unwrap();
        assert_eq!(
            client.endpoint("search.php").unwrap().as_str(),
            "https://www.themealdb.com/api/json/v1/1/search.php"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            MealDbClient::with_base_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn search_sends_the_letter_and_decodes_meals() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.php"))
            .and(query_param("f", "c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meals": [
                    {"idMeal": "52982", "strMeal": "Carbonara", "strIngredient1": "Egg"},
                    {"idMeal": "52795", "strMeal": "Chicken Handi"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = MealDbClient::with_base_url(&server.uri()).unwrap();

        let meals = client.meals_by_first_letter('c').await.unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].name.as_deref(), Some("Carbonara"));
        assert_eq!(meals[1].id.as_deref(), Some("52795"));
    }

    #[tokio::test]
    async fn search_without_match_returns_no_meal() {
        let (_server, client) = serve(
            "/search.php",
            ResponseTemplate::new(200).set_body_json(json!({ "meals": null })),
        )
        .await;

        assert!(client.meals_by_first_letter('x').await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (_server, client) = serve("/random.php", ResponseTemplate::new(503)).await;

        let error = client.random_meal().await.unwrap_err();
        assert!(
            matches!(error, FetchError::Status { status, ref url } if status.as_u16() == 503 && url.ends_with("/random.php")),
            "{error:?}"
        );
    }

    #[tokio::test]
    async fn malformed_payload_is_reported() {
        let (_server, client) = serve(
            "/random.php",
            ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        )
        .await;

        assert!(matches!(
            client.random_meal().await,
            Err(FetchError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn random_meal_without_meal_is_empty() {
        let (_server, client) = serve(
            "/random.php",
            ResponseTemplate::new(200).set_body_json(json!({ "meals": null })),
        )
        .await;

        assert!(matches!(
            client.random_meal().await,
            Err(FetchError::Empty { .. })
        ));
    }
}
