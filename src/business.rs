//! Business registry
//!
//! Registration and featured listings for reviewed businesses. Like the
//! rest of the simulated surfaces, registration outcomes flow through the
//! policy source; nothing is persisted.

use crate::policy::PolicySource;
use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Injected registration failure rate
const REGISTRATION_FAILURE_RATE: f64 = 0.05;

/// Registered business listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub rating: f64,
    pub review_count: u32,
    pub featured: bool,
}

/// Submission payload for registering a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRegistration {
    pub name: String,
    pub description: String,
    pub category: String,
    pub owner_address: String,
}

/// Registration and discovery for reviewed businesses
pub struct BusinessRegistry {
    policy: Arc<dyn PolicySource>,
}

impl BusinessRegistry {
    pub fn new(policy: Arc<dyn PolicySource>) -> Self {
        Self { policy }
    }

    /// Register a business, returning its new identifier
    pub async fn register_business(&self, registration: &BusinessRegistration) -> Result<String> {
        if registration.name.trim().is_empty() {
            return Err(anyhow!("Business name cannot be empty"));
        }

        if self.policy.unit() < REGISTRATION_FAILURE_RATE {
            return Err(anyhow!("Business registration failed. Please try again."));
        }

        let business_id = format!(
            "biz_{}_{}",
            Utc::now().timestamp_millis(),
            self.policy.hex_bytes(4)
        );

        info!(
            %business_id,
            name = %registration.name,
            owner = %registration.owner_address,
            "Registered business"
        );
        Ok(business_id)
    }

    /// Featured business listings shown on the landing surface
    pub async fn featured_businesses(&self) -> Vec<BusinessProfile> {
        vec![
            BusinessProfile {
                id: "biz_1".to_string(),
                name: "Café Blockchain".to_string(),
                description: "Specialty coffee house with a cozy atmosphere".to_string(),
                category: "Restaurants".to_string(),
                rating: 4.5,
                review_count: 28,
                featured: true,
            },
            BusinessProfile {
                id: "biz_2".to_string(),
                name: "Tech Solutions".to_string(),
                description: "Repair services and technical support".to_string(),
                category: "Services".to_string(),
                rating: 4.2,
                review_count: 42,
                featured: true,
            },
            BusinessProfile {
                id: "biz_3".to_string(),
                name: "Crypto Market".to_string(),
                description: "Organic and locally sourced groceries".to_string(),
                category: "Shops".to_string(),
                rating: 4.8,
                review_count: 56,
                featured: true,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FixedPolicy;

    fn registration() -> BusinessRegistration {
        BusinessRegistration {
            name: "Test Bakery".to_string(),
            description: "Sourdough and pastries".to_string(),
            category: "Restaurants".to_string(),
            owner_address: "0xabc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_business_succeeds() {
        let registry = BusinessRegistry::new(Arc::new(FixedPolicy::new(0.5)));
        let id = registry.register_business(&registration()).await.unwrap();
        assert!(id.starts_with("biz_"));
    }

    #[tokio::test]
    async fn test_register_business_injected_failure() {
        let registry = BusinessRegistry::new(Arc::new(FixedPolicy::new(0.01)));
        assert!(registry.register_business(&registration()).await.is_err());
    }

    #[tokio::test]
    async fn test_register_business_rejects_empty_name() {
        let registry = BusinessRegistry::new(Arc::new(FixedPolicy::new(0.5)));
        let mut reg = registration();
        reg.name = "  ".to_string();
        assert!(registry.register_business(&reg).await.is_err());
    }

    #[tokio::test]
    async fn test_featured_businesses_are_featured() {
        let registry = BusinessRegistry::new(Arc::new(FixedPolicy::new(0.5)));
        let listed = registry.featured_businesses().await;
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|b| b.featured));
    }
}
