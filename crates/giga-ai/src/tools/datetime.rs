//! Current date/time lookup backed by the tool server's `/datetime` route.

use async_trait::async_trait;
use serde_json::json;

use super::{ToolArguments, ToolDescriptor, ToolHandler};

pub const DATETIME_TOOL_NAME: &str = "get_current_datetime";

pub struct DateTimeTool {
    http: reqwest::Client,
    base_url: String,
}

impl DateTimeTool {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: DATETIME_TOOL_NAME.to_string(),
            description: "Returns the current date and time in the given time zone. \
                          Uses UTC when no time zone is given."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "timezone": {
                        "type": "string",
                        "description": "IANA time zone, e.g. \"Europe/Moscow\" or \"America/New_York\". Defaults to UTC."
                    }
                },
                "required": []
            }),
        }
    }
}

#[async_trait]
impl ToolHandler for DateTimeTool {
    async fn call(&self, arguments: ToolArguments) -> Result<String, String> {
        let timezone = arguments
            .get("timezone")
            .and_then(|v| v.as_str())
            .filter(|tz| !tz.is_empty())
            .unwrap_or("UTC");

        let response = self
            .http
            .get(format!("{}/datetime", self.base_url))
            .query(&[("timezone", timezone)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| format!("datetime server unreachable: {e}"))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(format!("datetime server returned HTTP {status}: {body}"));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn args(timezone: Option<&str>) -> ToolArguments {
        let mut map = ToolArguments::new();
        if let Some(tz) = timezone {
            map.insert("timezone".into(), json!(tz));
        }
        map
    }

    #[tokio::test]
    async fn passes_timezone_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datetime"))
            .and(query_param("timezone", "Europe/Moscow"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_datetime": "2026-10-19T15:00:00Z",
                "timezone": "Europe/Moscow",
                "timestamp": 1792414800000u64,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = DateTimeTool::new(reqwest::Client::new(), format!("{}/", server.uri()));
        let out = tool.call(args(Some("Europe/Moscow"))).await.unwrap();
        assert!(out.contains("\"timezone\":\"Europe/Moscow\""));
    }

    #[tokio::test]
    async fn defaults_to_utc() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datetime"))
            .and(query_param("timezone", "UTC"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"timezone\":\"UTC\"}"))
            .expect(1)
            .mount(&server)
            .await;

        let tool = DateTimeTool::new(reqwest::Client::new(), server.uri());
        assert!(tool.call(args(None)).await.unwrap().contains("UTC"));
    }

    #[tokio::test]
    async fn server_error_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"error\":\"unknown zone\"}"))
            .mount(&server)
            .await;

        let tool = DateTimeTool::new(reqwest::Client::new(), server.uri());
        let err = tool.call(args(Some("Mars/Olympus"))).await.unwrap_err();
        assert!(err.contains("400"));
        assert!(err.contains("unknown zone"));
    }
}
