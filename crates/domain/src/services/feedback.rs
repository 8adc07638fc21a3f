//! Feedback aggregation.

use crate::models::feedback::{Feedback, FeedbackStats};

/// Computes rating and helpfulness statistics.
pub fn feedback_stats<'a, I>(feedback: I) -> FeedbackStats
where
    I: IntoIterator<Item = &'a Feedback>,
{
    let mut total = 0i64;
    let mut rating_sum = 0i64;
    let mut helpful = 0i64;

    for item in feedback {
        total += 1;
        rating_sum += item.rating as i64;
        if item.was_helpful {
            helpful += 1;
        }
    }

    if total == 0 {
        return FeedbackStats::default();
    }

    let average = rating_sum as f64 / total as f64;

    FeedbackStats {
        total_ratings: total,
        average_rating: (average * 10.0).round() / 10.0,
        helpful_count: helpful,
        helpful_percentage: ((helpful as f64 / total as f64) * 100.0).round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn feedback(rating: i32, was_helpful: bool) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rating,
            comment: "Well organized event".to_string(),
            was_helpful,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = feedback_stats(&Vec::<Feedback>::new());
        assert_eq!(stats, FeedbackStats::default());
        assert_eq!(stats.average_rating, 0.0);
    }

    #[test]
    fn test_average_rounded_to_one_decimal() {
        let items = vec![feedback(5, true), feedback(4, false), feedback(4, true)];
        let stats = feedback_stats(&items);
        assert_eq!(stats.total_ratings, 3);
        assert_eq!(stats.average_rating, 4.3);
        assert_eq!(stats.helpful_count, 2);
        assert_eq!(stats.helpful_percentage, 67);
    }

    #[test]
    fn test_all_helpful() {
        let items = vec![feedback(2, true), feedback(3, true)];
        let stats = feedback_stats(&items);
        assert_eq!(stats.average_rating, 2.5);
        assert_eq!(stats.helpful_percentage, 100);
    }
}
