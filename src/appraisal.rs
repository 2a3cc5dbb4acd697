// 💰 Valuation Aggregator - Records × unit values + coins = net worth

use crate::deduplication::{CollapseResult, DeduplicationFilter};
use crate::extractor::OwnershipRecord;
use crate::valuation::{SkinValuer, ValueSource};
use serde::{Deserialize, Serialize};

// ============================================================================
// NET WORTH
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWorth {
    pub coins: u64,
    pub skin_total: u64,
}

impl NetWorth {
    pub fn new(coins: u64, skin_total: u64) -> Self {
        NetWorth { coins, skin_total }
    }

    pub fn total(&self) -> u64 {
        self.coins.saturating_add(self.skin_total)
    }

    /// Chat reply for a player's appraisal
    pub fn summary(&self, username: &str) -> String {
        format!(
            "💰 **{}** has {} coins + {} skins = **{}**",
            username,
            format_thousands(self.coins),
            format_thousands(self.skin_total),
            format_thousands(self.total())
        )
    }
}

// ============================================================================
// ITEMIZED BREAKDOWN
// ============================================================================

/// One extracted record with its valuation and collapse status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub identifier: String,
    pub count: u64,
    pub unit_value: u64,
    pub subtotal: u64,
    pub kept: bool,
    pub source: ValueSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appraisal {
    pub items: Vec<LineItem>,
    pub net_worth: NetWorth,
}

impl Appraisal {
    pub fn kept_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.kept)
    }
}

// ============================================================================
// AGGREGATOR
// ============================================================================

/// Sum of unit value × count over records already filtered
pub fn skin_total(records: &[OwnershipRecord], valuer: &SkinValuer) -> u64 {
    records.iter().fold(0u64, |total, record| {
        total.saturating_add(valuer.value(&record.identifier).saturating_mul(record.count))
    })
}

/// Full pipeline over raw page records: collapse upgrades, value, add coins
pub fn appraise(raw: &[OwnershipRecord], coins: u64, valuer: &SkinValuer) -> Appraisal {
    let collapse: CollapseResult = DeduplicationFilter::new().collapse(raw);

    let items = raw
        .iter()
        .map(|record| {
            let valuation = valuer.resolve(&record.identifier);
            LineItem {
                identifier: record.identifier.clone(),
                count: record.count,
                unit_value: valuation.value,
                subtotal: valuation.value.saturating_mul(record.count),
                kept: collapse.is_kept(&record.identifier),
                source: valuation.source,
            }
        })
        .collect();

    Appraisal {
        items,
        net_worth: NetWorth::new(coins, skin_total(&collapse.kept, valuer)),
    }
}

/// Group digits by thousands: 1234567 → "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
