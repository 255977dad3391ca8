use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracker_core::model::{Contest, Problem, SharedProblem, Submission};
use url::Url;

use super::JudgeApi;
use super::wire::{
    Envelope, ProblemsetResult, WireContest, WireSubmission, contest_from_wire,
    problems_from_wire, submission_from_wire,
};
use crate::config::TrackerConfig;
use crate::error::JudgeError;

/// `JudgeApi` over the public Codeforces JSON API.
#[derive(Clone)]
pub struct CodeforcesClient {
    client: Client,
    api_base: Url,
    shared_problems_url: Option<Url>,
}

impl CodeforcesClient {
    #[must_use]
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.clone(),
            shared_problems_url: config.shared_problems_url.clone(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base.as_str().trim_end_matches('/'))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> Result<T, JudgeError> {
        let response = self
            .client
            .get(self.method_url(method))
            .query(query)
            .send()
            .await?;

        // FAILED envelopes (unknown handle, bad params) come with 4xx statuses.
        let status = response.status();
        let body: Result<Envelope<T>, reqwest::Error> = response.json().await;
        match body {
            Ok(envelope) => envelope.into_result(),
            Err(_) if !status.is_success() => Err(JudgeError::HttpStatus(status)),
            Err(err) => Err(JudgeError::Http(err)),
        }
    }
}

#[async_trait]
impl JudgeApi for CodeforcesClient {
    async fn fetch_problems(&self) -> Result<Vec<Problem>, JudgeError> {
        let result: ProblemsetResult = self.call("problemset.problems", &[]).await?;
        Ok(problems_from_wire(result))
    }

    async fn fetch_contests(&self) -> Result<Vec<Contest>, JudgeError> {
        let result: Vec<WireContest> = self.call("contest.list", &[]).await?;
        Ok(result.into_iter().map(contest_from_wire).collect())
    }

    async fn fetch_user_submissions(&self, handle: &str) -> Result<Vec<Submission>, JudgeError> {
        let result: Vec<WireSubmission> = self.call("user.status", &[("handle", handle)]).await?;
        Ok(result.into_iter().filter_map(submission_from_wire).collect())
    }

    async fn fetch_shared_problems(&self) -> Result<Vec<SharedProblem>, JudgeError> {
        let Some(url) = self.shared_problems_url.clone() else {
            return Ok(Vec::new());
        };
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(JudgeError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_ignores_trailing_slash() {
        let config = TrackerConfig::default()
            .with_api_base("https://mirror.example/api/")
            .unwrap();
        let client = CodeforcesClient::new(&config);
        assert_eq!(
            client.method_url("contest.list"),
            "https://mirror.example/api/contest.list"
        );
    }

    #[tokio::test]
    async fn shared_problems_default_to_empty_without_url() {
        let client = CodeforcesClient::new(&TrackerConfig::default());
        assert!(client.fetch_shared_problems().await.unwrap().is_empty());
    }
}
