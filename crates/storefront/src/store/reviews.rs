//! Product review store.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;
use webshop_core::{ProductId, Review, ReviewId};

use super::{Store, Subscription, derive, load_or, persist_on_change};
use crate::kv::{SharedKv, keys};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
}

/// Input for a new review; the store assigns the identifier and timestamp.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub author: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
    pub verified: bool,
}

/// Per-product review statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductReviewStats {
    pub total: usize,
    /// Mean rating rounded to one decimal.
    pub average: f64,
    /// Counts indexed by rating 1 through 5.
    pub histogram: [usize; 5],
    /// Share of reviews rated 4 or above, as a rounded percentage.
    pub recommended_percent: u32,
}

/// Global review aggregate, recomputed reactively.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewAggregate {
    pub total_reviews: usize,
    pub global_average: f64,
    pub products_reviewed: usize,
}

pub struct ReviewsStore {
    reviews: Store<Vec<Review>>,
    aggregate: Store<ReviewAggregate>,
    _subscriptions: Vec<Subscription<Vec<Review>>>,
}

impl ReviewsStore {
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        let reviews = Store::new(load_or(&kv, keys::REVIEWS, Vec::new));
        let persist = persist_on_change(&reviews, kv, keys::REVIEWS);
        let (aggregate, aggregate_sub) = derive(&reviews, |reviews: &Vec<Review>| {
            let total = reviews.len();
            let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            let mut products: Vec<&ProductId> = reviews.iter().map(|r| &r.product_id).collect();
            products.sort_unstable();
            products.dedup();
            ReviewAggregate {
                total_reviews: total,
                global_average: round_one_decimal(sum, total),
                products_reviewed: products.len(),
            }
        });
        Self {
            reviews,
            aggregate,
            _subscriptions: vec![persist, aggregate_sub],
        }
    }

    #[must_use]
    pub fn list(&self) -> Vec<Review> {
        self.reviews.snapshot()
    }

    #[must_use]
    pub fn observe(&self) -> Store<Vec<Review>> {
        self.reviews.clone()
    }

    #[must_use]
    pub fn aggregate(&self) -> ReviewAggregate {
        self.aggregate.snapshot()
    }

    /// Add a review, assigning its identifier and timestamp.
    ///
    /// # Errors
    ///
    /// Rejects ratings outside 1 to 5.
    pub fn add(&self, input: NewReview) -> Result<Review, ReviewError> {
        if !(1..=5).contains(&input.rating) {
            return Err(ReviewError::RatingOutOfRange);
        }
        let review = Review {
            id: ReviewId::new(Uuid::new_v4().to_string()),
            product_id: input.product_id,
            author: input.author,
            rating: input.rating,
            title: input.title,
            comment: input.comment,
            created_at: Utc::now(),
            verified: input.verified,
            helpful: 0,
        };
        self.reviews.update(|reviews| reviews.push(review.clone()));
        Ok(review)
    }

    /// A product's reviews, newest first.
    #[must_use]
    pub fn by_product(&self, product_id: &ProductId) -> Vec<Review> {
        self.reviews.read(|reviews| {
            let mut matched: Vec<Review> = reviews
                .iter()
                .filter(|r| &r.product_id == product_id)
                .cloned()
                .collect();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            matched
        })
    }

    /// Increment a review's helpful counter. No-op when absent.
    pub fn mark_helpful(&self, review_id: &ReviewId) {
        self.reviews.update(|reviews| {
            if let Some(review) = reviews.iter_mut().find(|r| &r.id == review_id) {
                review.helpful += 1;
            }
        });
    }

    /// Delete a review (admin).
    pub fn remove(&self, review_id: &ReviewId) {
        self.reviews
            .update(|reviews| reviews.retain(|r| &r.id != review_id));
    }

    /// Average, count, rating histogram, and recommended share for a product.
    #[must_use]
    pub fn product_stats(&self, product_id: &ProductId) -> ProductReviewStats {
        self.reviews.read(|reviews| {
            let matched: Vec<&Review> = reviews
                .iter()
                .filter(|r| &r.product_id == product_id)
                .collect();
            let total = matched.len();
            if total == 0 {
                return ProductReviewStats::default();
            }
            let mut histogram = [0_usize; 5];
            let mut sum: u32 = 0;
            let mut recommended: usize = 0;
            for review in &matched {
                sum += u32::from(review.rating);
                histogram[usize::from(review.rating) - 1] += 1;
                if review.rating >= 4 {
                    recommended += 1;
                }
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let recommended_percent = (recommended as f64 / total as f64 * 100.0).round() as u32;
            ProductReviewStats {
                total,
                average: round_one_decimal(sum, total),
                histogram,
                recommended_percent,
            }
        })
    }

    pub fn clear(&self) {
        self.reviews.set(Vec::new());
    }
}

#[allow(clippy::cast_precision_loss)]
fn round_one_decimal(sum: u32, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (f64::from(sum) / count as f64 * 10.0).round() / 10.0
}
