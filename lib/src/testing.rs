//! Test doubles shared by the unit tests.

use crate::{client::ApiRequest, prompt::Prompter, ApplianceApi, Error, Result};
use serde_json::Value;
use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

/// An appliance `API` that answers from canned responses.
///
/// Responses are keyed by the request display string. When more than one response is queued
/// for a request they are returned in order, the last one is repeated.
#[derive(Debug, Default)]
pub struct MockApi {
    responses: RefCell<HashMap<String, VecDeque<Value>>>,
    requests: RefCell<Vec<ApiRequest>>,
}
impl MockApi {
    /// Queue a response for a request.
    pub fn with(self, request: &str, response: Value) -> Self {
        self.responses.borrow_mut().entry(request.to_string()).or_default().push_back(response);
        self
    }
    /// The requests that have been made.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
    /// How many times a request was made.
    pub fn calls(&self, request: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.to_string() == request).count()
    }
}
impl ApplianceApi for MockApi {
    fn get(&self, request: &ApiRequest) -> Result<Value> {
        self.requests.borrow_mut().push(request.clone());
        let key = request.to_string();
        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => Ok(queue.pop_front().unwrap()),
            Some(queue) if queue.len() == 1 => Ok(queue[0].clone()),
            _ => Err(Error::Failed(format!("mock: no response for {key}"))),
        }
    }
}

/// A prompter that answers from a script and remembers what it showed.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub shown: Vec<String>,
}
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self { answers: answers.iter().map(|a| a.to_string()).collect(), ..Default::default() }
    }
}
impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| Error::from("prompt: end of input"))
    }
    fn read_password(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }
    fn show(&mut self, message: &str) -> Result<()> {
        self.shown.push(message.to_string());
        Ok(())
    }
}
