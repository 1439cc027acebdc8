use crate::types::{ReviewRecord, ReviewSource};

/// Two canned reviews mentioning `company`, for exercising the output shape
/// without touching the network.
pub fn demo_reviews(company: &str) -> Vec<ReviewRecord> {
    vec![
        ReviewRecord {
            title: "Excellent collaboration tool".to_string(),
            review_text: format!("{} has significantly improved our team communication.", company),
            date: "2024-03-15".to_string(),
            rating: 4.5,
            source: ReviewSource::Demo,
            reviewer_name: Some("John D.".to_string()),
            reviewer_title: Some("Product Manager".to_string()),
            company_size: Some("50-200 employees".to_string()),
            industry: Some("Technology".to_string()),
            pros: Some("Easy to use, great integrations".to_string()),
            cons: Some("Can be expensive for large teams".to_string()),
            verified_reviewer: true,
            helpful_count: Some(12),
            review_url: "https://example.com/review/1".to_string(),
            incentivized: false,
        },
        ReviewRecord {
            title: "Good but needs improvement".to_string(),
            review_text: format!("{} is reliable but notifications can be noisy.", company),
            date: "2024-07-10".to_string(),
            rating: 3.8,
            source: ReviewSource::Demo,
            reviewer_name: Some("Sarah K.".to_string()),
            reviewer_title: Some("Software Engineer".to_string()),
            company_size: Some("200-500 employees".to_string()),
            industry: Some("IT Services".to_string()),
            pros: Some("Stable platform".to_string()),
            cons: Some("Too many alerts".to_string()),
            verified_reviewer: false,
            helpful_count: Some(5),
            review_url: "https://example.com/review/2".to_string(),
            incentivized: false,
        },
    ]
}
