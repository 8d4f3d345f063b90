//! Product review record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{ProductId, ReviewId};

/// A customer review for a product. Rating is 1-5 inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author: String,
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub verified: bool,
    /// Helpful-vote counter.
    pub helpful: u32,
}
