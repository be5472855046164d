use serde::Deserialize;
use validator::Validate;

use crate::domain::lawyer::NewReview;
use crate::domain::types::Rating;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Review left on a lawyer profile.
pub struct ReviewForm {
    pub rating: u8,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

impl TryFrom<ReviewForm> for NewReview {
    type Error = FormError;

    fn try_from(form: ReviewForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let rating = Rating::new(form.rating).map_err(|_| FormError::InvalidRating)?;
        Ok(NewReview {
            rating: rating.get(),
            comment: form
                .comment
                .map(|comment| comment.trim().to_string())
                .filter(|comment| !comment.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_range_is_enforced() {
        let form = ReviewForm {
            rating: 6,
            comment: None,
        };
        assert!(matches!(NewReview::try_from(form), Err(FormError::InvalidRating)));
    }

    #[test]
    fn blank_comment_is_dropped() {
        let review = NewReview::try_from(ReviewForm {
            rating: 4,
            comment: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(review.comment, None);
        assert_eq!(review.rating, 4);
    }
}
