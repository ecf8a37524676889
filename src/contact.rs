//! Contact-form submission

use std::collections::HashMap;

use reqwest::Client;

use crate::error::Error;
use crate::fetch::Fetch;

/// Client for the contact-form endpoint of the portal backend.
pub struct ContactClient {
    url: String,
    client: Client,
}

impl ContactClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Send a contact-form message to the church office.
    pub async fn send(&self, first_name: &str, email: &str, message: &str) -> Result<(), Error> {
        let mut body = HashMap::new();
        body.insert("first_name", first_name);
        body.insert("email", email);
        body.insert("message", message);

        Fetch::post(&self.client, &format!("{}/contact-us", self.url))
            .json(&body)?
            .execute_empty()
            .await
    }
}
