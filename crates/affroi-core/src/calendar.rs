//! Monthly shopping campaign calendar

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignKind {
    /// Day number equals the month number (3.3, 11.11, ...)
    DoubleDay,
    MidMonth,
    Payday,
}

impl CampaignKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DoubleDay => "double_day",
            Self::MidMonth => "mid_month",
            Self::Payday => "payday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Today,
    Ended,
    Upcoming,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Today => "today",
            Self::Ended => "ended",
            Self::Upcoming => "upcoming",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Campaign {
    pub kind: CampaignKind,
    pub title: String,
    pub date: NaiveDate,
    pub status: CampaignStatus,
    /// Days until the campaign; 0 unless upcoming
    pub days_left: u32,
}

/// Campaigns in the month of `today`, sorted by date
pub fn campaigns_for(today: NaiveDate) -> Vec<Campaign> {
    let (year, month) = (today.year(), today.month());

    let mut list = Vec::with_capacity(3);
    if let Some(date) = NaiveDate::from_ymd_opt(year, month, month) {
        list.push((
            CampaignKind::DoubleDay,
            format!("{}.{} Double Day", month, month),
            date,
        ));
    }
    for (kind, title, day) in [
        (CampaignKind::MidMonth, "Mid-Month Sale", 15),
        (CampaignKind::Payday, "Payday Sale", 25),
    ] {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            list.push((kind, title.to_string(), date));
        }
    }

    let mut campaigns: Vec<Campaign> = list
        .into_iter()
        .map(|(kind, title, date)| {
            let (status, days_left) = match today.day().cmp(&date.day()) {
                std::cmp::Ordering::Equal => (CampaignStatus::Today, 0),
                std::cmp::Ordering::Greater => (CampaignStatus::Ended, 0),
                std::cmp::Ordering::Less => (CampaignStatus::Upcoming, date.day() - today.day()),
            };
            Campaign {
                kind,
                title,
                date,
                status,
                days_left,
            }
        })
        .collect();
    campaigns.sort_by_key(|c| c.date);
    campaigns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_november() {
        let campaigns = campaigns_for(date(2025, 11, 12));
        let kinds: Vec<CampaignKind> = campaigns.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CampaignKind::DoubleDay,
                CampaignKind::MidMonth,
                CampaignKind::Payday
            ]
        );
        assert_eq!(campaigns[0].title, "11.11 Double Day");
        assert_eq!(campaigns[0].status, CampaignStatus::Ended);
        assert_eq!(campaigns[1].status, CampaignStatus::Upcoming);
        assert_eq!(campaigns[1].days_left, 3);
        assert_eq!(campaigns[2].days_left, 13);
    }

    #[test]
    fn test_double_day_sorted_after_mid_month() {
        let campaigns = campaigns_for(date(2025, 12, 20));
        assert_eq!(campaigns[0].kind, CampaignKind::DoubleDay);
        assert_eq!(campaigns[0].date, date(2025, 12, 12));
        assert_eq!(campaigns[2].status, CampaignStatus::Upcoming);
        assert_eq!(campaigns[1].status, CampaignStatus::Ended);
    }

    #[test]
    fn test_today() {
        let campaigns = campaigns_for(date(2025, 3, 15));
        let mid = campaigns
            .iter()
            .find(|c| c.kind == CampaignKind::MidMonth)
            .unwrap();
        assert_eq!(mid.status, CampaignStatus::Today);
        assert_eq!(mid.days_left, 0);
        assert_eq!(campaigns[0].date, date(2025, 3, 3));
    }
}
