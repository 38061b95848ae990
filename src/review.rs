//! Review data model and canonical message construction
//!
//! A review is immutable once signed: the signature is computed over the
//! canonical message derived from its fields, so any later mutation would
//! invalidate it.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Maximum review body length in characters
pub const MAX_REVIEW_TEXT_CHARS: usize = 280;

/// Valid rating range (inclusive)
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A business review prior to signing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: String,
    pub business_id: String,
    /// Account identifier of the author (hex address string)
    pub reviewer_address: String,
    /// Star rating, 1-5
    pub rating: u8,
    pub review_text: String,
    /// Submission time in epoch milliseconds
    pub timestamp: i64,
}

impl Review {
    /// Create a review, validating the rating range and text length
    pub fn new(
        review_id: impl Into<String>,
        business_id: impl Into<String>,
        reviewer_address: impl Into<String>,
        rating: u8,
        review_text: impl Into<String>,
        timestamp: i64,
    ) -> Result<Self> {
        let review_text = review_text.into();

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(anyhow!(
                "rating {} out of range ({}-{})",
                rating,
                MIN_RATING,
                MAX_RATING
            ));
        }

        if review_text.chars().count() > MAX_REVIEW_TEXT_CHARS {
            return Err(anyhow!(
                "review text exceeds {} characters",
                MAX_REVIEW_TEXT_CHARS
            ));
        }

        Ok(Self {
            review_id: review_id.into(),
            business_id: business_id.into(),
            reviewer_address: reviewer_address.into(),
            rating,
            review_text,
            timestamp,
        })
    }

    /// Build the exact string that gets signed to authenticate this review.
    ///
    /// The format is a stable wire contract: two implementations given the
    /// same fields must produce byte-identical messages, since signatures
    /// are computed over this string.
    pub fn canonical_message(&self) -> String {
        format!(
            "Aletheum X Verification\n\nBusiness: {}\nRating: {}\nReview: {}\nTimestamp: {}",
            self.business_id, self.rating, self.review_text, self.timestamp
        )
    }

    /// Attach a signature, consuming the review
    pub fn into_signed(self, signature: impl Into<String>) -> SignedReview {
        SignedReview {
            review: self,
            signature: signature.into(),
        }
    }
}

/// A review plus the detached signature over its canonical message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedReview {
    pub review: Review,
    /// Opaque hex signature string
    pub signature: String,
}
