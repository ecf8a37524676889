//! Payment-provider boundary calls
//!
//! The portal creates orders and subscriptions through the backend and
//! hands the returned id to the provider's button script. Provider
//! semantics stay server-side; the client only sees opaque ids.

use reqwest::Client;
use serde::Deserialize;

use crate::error::Error;
use crate::fetch::Fetch;

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

/// Client for the donation endpoints of the portal backend.
pub struct DonationsClient {
    url: String,
    client: Client,
}

impl DonationsClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a one-time donation order; returns the provider's order id.
    pub async fn create_order(
        &self,
        amount: f64,
        currency: &str,
        custom_id: &str,
    ) -> Result<String, Error> {
        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "custom_id": custom_id,
        });

        let created: CreatedResource =
            Fetch::post(&self.client, &format!("{}/create-paypal-order", self.url))
                .json(&body)?
                .execute()
                .await?;

        Ok(created.id)
    }

    /// Create a recurring-giving subscription; returns the subscription id.
    pub async fn create_subscription(&self, plan_id: &str) -> Result<String, Error> {
        let body = serde_json::json!({ "plan_id": plan_id });

        let created: CreatedResource = Fetch::post(
            &self.client,
            &format!("{}/create-paypal-subscription", self.url),
        )
        .json(&body)?
        .execute()
        .await?;

        Ok(created.id)
    }
}
