//! 金耳朵验证接口客户端
//!
//! 拉取题目与验证答案共用同一个接口，通过表单内容区分

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use tracing::{debug, warn};

use crate::clients::oracle::{is_affirmative, FetchForm, Oracle, Probe, CHECK_ACTION};
use crate::config::Config;
use crate::error::NetworkError;
use crate::models::Test;

/// 基于 reqwest 的验证服务客户端
pub struct HttpOracle {
    client: reqwest::Client,
    endpoint: String,
    cookie: Option<HeaderValue>,
}

impl HttpOracle {
    /// 创建新的客户端，所有请求使用同一个超时
    pub fn new(base_url: &str, endpoint_path: &str, timeout: Duration) -> Result<Self, NetworkError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), endpoint_path);

        let mut headers = HeaderMap::new();
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::from_reqwest(endpoint.clone(), e))?;

        Ok(Self {
            client,
            endpoint,
            cookie: None,
        })
    }

    pub fn from_config(config: &Config, base_url: &str) -> Result<Self, NetworkError> {
        Self::new(base_url, &config.endpoint_path, config.request_timeout())
    }

    /// 附带浏览器中的会话 Cookie
    ///
    /// Cookie 中含有非法字符时不附带，并记录警告
    pub fn with_cookie(mut self, cookie: &str) -> Self {
        match HeaderValue::from_str(cookie) {
            Ok(value) => self.cookie = Some(value),
            Err(e) => {
                warn!("⚠️ 会话 Cookie 无法作为请求头发送，已忽略: {}", e);
                self.cookie = None;
            }
        }
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_form<T: serde::Serialize + ?Sized>(&self, form: &T) -> Result<String, NetworkError> {
        let mut request = self.client.post(&self.endpoint).form(form);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(self.endpoint.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::BadStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| NetworkError::from_reqwest(self.endpoint.clone(), e))
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn fetch_test(&self, test_id: &str) -> Result<Test, NetworkError> {
        debug!("拉取挑战题目: {}", test_id);
        let body = self
            .post_form(&FetchForm {
                test_item_id: test_id,
                action: CHECK_ACTION,
            })
            .await?;

        let test: Test = serde_json::from_str(&body).map_err(|e| NetworkError::DecodeFailed {
            source: Box::new(e),
        })?;
        debug!("共拉取到 {} 道题目", test.len());
        Ok(test)
    }

    async fn verify(&self, probe: &Probe<'_>) -> Result<bool, NetworkError> {
        let body = self.post_form(&probe.to_form()).await?;
        let correct = is_affirmative(&body);
        debug!(
            "验证 musicId={} isIncrease={:?} affectValue={:?} => {}",
            probe.choice.examine_sub_id,
            probe.modifiers.is_increase,
            probe.modifiers.affect_value,
            correct
        );
        Ok(correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::oracle::Modifiers;
    use crate::models::{Choice, TestType};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/ajax/ears.ashx";

    fn choice() -> Choice {
        Choice {
            examine_sub_id: "sub1".into(),
            encode_music_id: "enc1".into(),
            music_path: "/music/a.mp3".into(),
            examine_id: "9".into(),
        }
    }

    fn probe(choice: &Choice) -> Probe<'_> {
        Probe {
            test_id: "42",
            test_type: TestType::SingleChoice,
            examine_id: "q1",
            timestamp: "1500",
            choice,
            modifiers: Modifiers::none(),
        }
    }

    #[tokio::test]
    async fn literal_one_means_correct() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("X-Requested-With", "XMLHttpRequest"))
            .and(body_string_contains("musicId=sub1"))
            .and(body_string_contains("isIncrease=&"))
            .and(body_string_contains("affectValue=&action=checkexamoptionsright"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1"))
            .mount(&server)
            .await;

        let oracle = HttpOracle::new(&server.uri(), ENDPOINT, Duration::from_secs(5)).unwrap();
        let choice = choice();
        assert!(oracle.verify(&probe(&choice)).await.unwrap());
    }

    #[tokio::test]
    async fn anything_else_means_incorrect_and_is_stable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_string("0"))
            .mount(&server)
            .await;

        let oracle = HttpOracle::new(&server.uri(), ENDPOINT, Duration::from_secs(5)).unwrap();
        let choice = choice();
        let first = oracle.verify(&probe(&choice)).await.unwrap();
        let second = oracle.verify(&probe(&choice)).await.unwrap();
        assert!(!first);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn slow_response_is_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("1")
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(&server)
            .await;

        let oracle = HttpOracle::new(&server.uri(), ENDPOINT, Duration::from_millis(100)).unwrap();
        let choice = choice();
        let err = oracle.verify(&probe(&choice)).await.unwrap_err();
        assert!(matches!(err, NetworkError::Timeout { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn server_error_is_bad_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let oracle = HttpOracle::new(&server.uri(), ENDPOINT, Duration::from_secs(5)).unwrap();
        let choice = choice();
        let err = oracle.verify(&probe(&choice)).await.unwrap_err();
        assert!(matches!(err, NetworkError::BadStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn fetch_test_decodes_question_records() {
        let server = MockServer::start().await;

        let body = serde_json::json!([{
            "examineId": 7,
            "timestamp": 1234,
            "gearsExamOptionsList": [
                {"ExamineSubIdStr": "s", "EncodeMusicId": "e", "MusicPath": "/m/x.mp3", "ExamineId": 70}
            ]
        }]);

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(body_string_contains("testItemId=42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let oracle = HttpOracle::new(&server.uri(), ENDPOINT, Duration::from_secs(5))
            .unwrap()
            .with_cookie("ASP.NET_SessionId=abc");
        let test = oracle.fetch_test("42").await.unwrap();
        assert_eq!(test.len(), 1);
        assert_eq!(test.questions[0].timestamp, "1234");
        assert_eq!(test.questions[0].choices[0].file_name(), "x.mp3");
    }

    #[tokio::test]
    async fn malformed_quiz_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let oracle = HttpOracle::new(&server.uri(), ENDPOINT, Duration::from_secs(5)).unwrap();
        let err = oracle.fetch_test("42").await.unwrap_err();
        assert!(matches!(err, NetworkError::DecodeFailed { .. }));
    }

    #[test]
    fn invalid_cookie_is_not_attached() {
        let oracle = HttpOracle::new("http://127.0.0.1:1", ENDPOINT, Duration::from_secs(5))
            .unwrap()
            .with_cookie("ASP.NET_SessionId=abc\n");
        assert!(oracle.cookie.is_none());

        let oracle = oracle.with_cookie("ASP.NET_SessionId=abc");
        assert_eq!(
            oracle.cookie.as_ref().and_then(|v| v.to_str().ok()),
            Some("ASP.NET_SessionId=abc")
        );
    }
}
