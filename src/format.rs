//! Display helpers shared by the dashboard and store views.

use storerate_shared::Store;

const ADDRESS_PREVIEW_CHARS: usize = 50;

/// Qualitative band of an average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl RatingTier {
    pub fn of(average: f64) -> Self {
        if average >= 4.5 {
            RatingTier::Excellent
        } else if average >= 3.5 {
            RatingTier::Good
        } else if average >= 2.5 {
            RatingTier::Average
        } else {
            RatingTier::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::Excellent => "Excellent",
            RatingTier::Good => "Good",
            RatingTier::Average => "Average",
            RatingTier::NeedsImprovement => "Needs Improvement",
        }
    }

    /// CSS utility class for the tier colour.
    pub fn css_class(&self) -> &'static str {
        match self {
            RatingTier::Excellent => "text-success",
            RatingTier::Good => "text-warning",
            RatingTier::Average => "text-info",
            RatingTier::NeedsImprovement => "text-error",
        }
    }
}

/// Tier label, or "No Ratings" before anyone rated.
pub fn tier_label(average: Option<f64>) -> &'static str {
    average.map_or("No Ratings", |a| RatingTier::of(a).label())
}

/// One decimal place, or `fallback` when there is no average yet.
pub fn average_or(average: Option<f64>, fallback: &'static str) -> String {
    match average {
        Some(a) if a > 0.0 => format!("{:.1}", a),
        _ => fallback.to_string(),
    }
}

pub fn rating_count(count: u64) -> String {
    if count == 1 {
        "1 rating".to_string()
    } else {
        format!("{} ratings", count)
    }
}

/// First 50 characters, with an ellipsis when cut; "Not provided" if blank.
pub fn address_preview(address: Option<&str>) -> String {
    let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
        return "Not provided".to_string();
    };
    let mut chars = address.chars();
    let head: String = chars.by_ref().take(ADDRESS_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

pub fn owner_label(store: &Store) -> &str {
    store.owner_name.as_deref().unwrap_or("No owner assigned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(RatingTier::of(4.5), RatingTier::Excellent);
        assert_eq!(RatingTier::of(4.49), RatingTier::Good);
        assert_eq!(RatingTier::of(3.5), RatingTier::Good);
        assert_eq!(RatingTier::of(2.5), RatingTier::Average);
        assert_eq!(RatingTier::of(2.4), RatingTier::NeedsImprovement);
        assert_eq!(tier_label(None), "No Ratings");
    }

    #[test]
    fn averages_and_counts() {
        assert_eq!(average_or(Some(4.26), "N/A"), "4.3");
        assert_eq!(average_or(Some(3.0), "N/A"), "3.0");
        assert_eq!(average_or(None, "No ratings"), "No ratings");
        assert_eq!(rating_count(0), "0 ratings");
        assert_eq!(rating_count(1), "1 rating");
        assert_eq!(rating_count(12), "12 ratings");
    }

    #[test]
    fn address_preview_cuts_at_fifty_chars() {
        let long = "a".repeat(51);
        assert_eq!(address_preview(Some(&long)), format!("{}...", "a".repeat(50)));
        assert_eq!(address_preview(Some(&"b".repeat(50))), "b".repeat(50));
        assert_eq!(address_preview(Some("  ")), "Not provided");
        assert_eq!(address_preview(None), "Not provided");
    }
}
