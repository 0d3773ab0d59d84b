//! Heuristic channel and status classification
//!
//! Both classifiers are ordered lists of `(patterns, category)` tuples. Channel
//! rules are evaluated top-down and the first match wins, so a SubID containing
//! both "line" and "shopee" is a Line SubID. Status rules are evaluated
//! independently: one raw status can land in several categories.

use crate::models::{Channel, StatusCategory, NO_SUBID};

/// Case-insensitive substring rules for SubID → channel, in precedence order
pub const CHANNEL_RULES: &[(&[&str], Channel)] = &[
    (&["fb", "facebook"], Channel::Facebook),
    (&["line"], Channel::Line),
    (&["shopee", "video"], Channel::ShopeeVideo),
];

/// Substring rules for raw status → category
pub const STATUS_RULES: &[(&[&str], StatusCategory)] = &[
    (&["ยกเลิก"], StatusCategory::Cancelled),
    (&["ยังไม่ชำระเงิน"], StatusCategory::Unpaid),
    (&["รอดำเนินการ"], StatusCategory::Pending),
    (
        &["สำเร็จ", "สำเร็จแล้ว", "สำเร็จสมบูรณ์"],
        StatusCategory::Completed,
    ),
];

/// Statuses that count as rejected in the KPI status breakdown
const REJECTED_PATTERNS: &[&str] = &["ยกเลิก", "ปฏิเสธ"];

/// Bucket a SubID into a channel
pub fn classify_channel(subid: &str) -> Channel {
    let subid = subid.trim();
    if subid.is_empty() || subid == NO_SUBID {
        return Channel::Others;
    }
    let lower = subid.to_lowercase();
    CHANNEL_RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| lower.contains(p)))
        .map(|(_, channel)| *channel)
        .unwrap_or(Channel::Others)
}

impl StatusCategory {
    /// True when the raw status contains any pattern of this category
    pub fn matches(&self, status: &str) -> bool {
        STATUS_RULES
            .iter()
            .filter(|(_, category)| category == self)
            .any(|(patterns, _)| patterns.iter().any(|p| status.contains(p)))
    }
}

/// Every category a raw status falls into, in rule order
pub fn status_categories(status: &str) -> Vec<StatusCategory> {
    STATUS_RULES
        .iter()
        .filter(|(patterns, _)| patterns.iter().any(|p| status.contains(p)))
        .map(|(_, category)| *category)
        .collect()
}

pub fn is_cancelled(status: &str) -> bool {
    StatusCategory::Cancelled.matches(status)
}

pub fn is_pending(status: &str) -> bool {
    StatusCategory::Pending.matches(status)
}

pub fn is_approved(status: &str) -> bool {
    StatusCategory::Completed.matches(status)
}

/// Cancelled or refused by the platform
pub fn is_rejected(status: &str) -> bool {
    REJECTED_PATTERNS.iter().any(|p| status.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_channel() {
        assert_eq!(classify_channel("fb_01"), Channel::Facebook);
        assert_eq!(classify_channel("MyFacebookAd"), Channel::Facebook);
        assert_eq!(classify_channel("LINE-oa"), Channel::Line);
        assert_eq!(classify_channel("shopee_live"), Channel::ShopeeVideo);
        assert_eq!(classify_channel("tiktok_video"), Channel::ShopeeVideo);
        assert_eq!(classify_channel("ig_story"), Channel::Others);
        assert_eq!(classify_channel(""), Channel::Others);
        assert_eq!(classify_channel(NO_SUBID), Channel::Others);
    }

    #[test]
    fn test_channel_precedence_is_fixed() {
        // Listed order decides, not specificity
        assert_eq!(classify_channel("line_shopee"), Channel::Line);
        assert_eq!(classify_channel("shopee_line"), Channel::Line);
        assert_eq!(classify_channel("fb_line_video"), Channel::Facebook);
    }

    #[test]
    fn test_status_categories_overlap() {
        assert_eq!(
            status_categories("สำเร็จแล้ว"),
            vec![StatusCategory::Completed]
        );
        assert_eq!(
            status_categories("ยกเลิก (รอดำเนินการคืนเงิน)"),
            vec![StatusCategory::Cancelled, StatusCategory::Pending]
        );
        assert!(status_categories("unknown").is_empty());
    }

    #[test]
    fn test_kpi_status_predicates() {
        assert!(is_pending("รอดำเนินการ"));
        assert!(is_approved("สำเร็จสมบูรณ์"));
        assert!(is_rejected("ยกเลิก"));
        assert!(is_rejected("ถูกปฏิเสธ"));
        assert!(!is_cancelled("ถูกปฏิเสธ"));
        assert!(!is_approved("ยังไม่ชำระเงิน"));
    }
}
