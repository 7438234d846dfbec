//! Hot Board
//!
//! Shapes hot-list and rising-list snapshots for display, and maps item
//! interactions onto workspace commands.

use serde::Serialize;

use crate::format::format_hot;
use crate::types::{HotWordItem, RisingItem};

/// Most rising entries shown at once
pub const RISING_DISPLAY_LIMIT: usize = 20;

/// A ranked hot-list row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// 1-based position within the ranked subset
    pub rank: usize,
    pub word: String,
    pub hot_value: u64,
    /// `format_hot` rendering of the hot value
    pub hot_label: String,
    /// Source tag marks this item as trending hard
    pub elevated: bool,
}

/// An unranked "new entry"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEntry {
    pub word: String,
    pub elevated: bool,
}

/// A hot-list snapshot split into its two display groups
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HotBoard {
    pub ranked: Vec<RankedEntry>,
    pub new_entries: Vec<NewEntry>,
}

impl HotBoard {
    /// Nothing to show at all
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty() && self.new_entries.is_empty()
    }

    /// The new-entries section is hidden when it has nothing in it
    pub fn shows_new_entries(&self) -> bool {
        !self.new_entries.is_empty()
    }
}

/// Split `items` by `hot_value == 0`, keeping source order in each group
pub fn partition(items: &[HotWordItem]) -> HotBoard {
    let (fresh, ranked): (Vec<&HotWordItem>, Vec<&HotWordItem>) =
        items.iter().partition(|item| item.is_new_entry());

    HotBoard {
        ranked: ranked
            .into_iter()
            .enumerate()
            .map(|(idx, item)| RankedEntry {
                rank: idx + 1,
                word: item.word.clone(),
                hot_value: item.hot_value,
                hot_label: format_hot(item.hot_value),
                elevated: item.is_elevated(),
            })
            .collect(),
        new_entries: fresh
            .into_iter()
            .map(|item| NewEntry {
                word: item.word.clone(),
                elevated: item.is_elevated(),
            })
            .collect(),
    }
}

/// A rising-list row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RisingEntry {
    pub word: String,
    /// 🚀 for big jumps, ⚡ otherwise
    pub icon: &'static str,
    /// e.g. `↑12` or `↑TOP`
    pub label: String,
}

/// Shape the rising list, capped at [`RISING_DISPLAY_LIMIT`]
pub fn rising_entries(items: &[RisingItem]) -> Vec<RisingEntry> {
    items
        .iter()
        .take(RISING_DISPLAY_LIMIT)
        .map(|item| RisingEntry {
            word: item.word.clone(),
            icon: if item.rank_change.is_surging() {
                "🚀"
            } else {
                "⚡"
            },
            label: format!("↑{}", item.rank_change),
        })
        .collect()
}

// ============================================
// Input adapters
// ============================================

/// Ways the user can act on a listed item or the manual input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemInteraction {
    /// Click anywhere on the item except its add button
    Click(String),
    /// Click on the item's explicit add button
    AddButton(String),
    /// Item dragged onto the drop target
    Drop(String),
    /// Text typed into the manual input
    ManualEntry(String),
}

/// The two workspace commands every interaction reduces to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceCommand {
    Add(String),
    QuickPreview(String),
}

impl ItemInteraction {
    /// Map to a workspace command.
    ///
    /// Blank manual input maps to nothing.
    pub fn command(self) -> Option<WorkspaceCommand> {
        match self {
            ItemInteraction::Click(word) => Some(WorkspaceCommand::QuickPreview(word)),
            ItemInteraction::AddButton(word) | ItemInteraction::Drop(word) => {
                Some(WorkspaceCommand::Add(word))
            }
            ItemInteraction::ManualEntry(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(WorkspaceCommand::Add(text.to_string()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankChange;

    #[test]
    fn test_ranked_and_new_scenario() {
        let items = vec![HotWordItem::new("A", 500_000), HotWordItem::new("B", 0)];
        let board = partition(&items);

        assert_eq!(board.ranked.len(), 1);
        assert_eq!(board.ranked[0].word, "A");
        assert_eq!(board.ranked[0].rank, 1);
        assert_eq!(board.ranked[0].hot_label, "50.0万");
        assert_eq!(
            board.new_entries,
            vec![NewEntry {
                word: "B".to_string(),
                elevated: false
            }]
        );
        assert!(board.shows_new_entries());
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let items: Vec<HotWordItem> = (0..20u64)
            .map(|i| HotWordItem::new(format!("w{}", i), if i % 3 == 0 { 0 } else { i * 1000 }))
            .collect();
        let board = partition(&items);

        assert_eq!(board.ranked.len() + board.new_entries.len(), items.len());
        for item in &items {
            let in_ranked = board.ranked.iter().any(|e| e.word == item.word);
            let in_new = board.new_entries.iter().any(|e| e.word == item.word);
            assert!(in_ranked != in_new, "{} must be in exactly one group", item.word);
            assert_eq!(in_new, item.hot_value == 0);
        }
    }

    #[test]
    fn test_rank_is_position_within_ranked_subset() {
        let items = vec![
            HotWordItem::new("new1", 0),
            HotWordItem::new("x", 300),
            HotWordItem::new("new2", 0),
            HotWordItem::new("y", 200),
        ];
        let board = partition(&items);

        let ranks: Vec<(usize, &str)> = board
            .ranked
            .iter()
            .map(|e| (e.rank, e.word.as_str()))
            .collect();
        assert_eq!(ranks, vec![(1, "x"), (2, "y")]);
    }

    #[test]
    fn test_new_entries_hidden_when_empty() {
        let board = partition(&[HotWordItem::new("A", 1)]);
        assert!(!board.shows_new_entries());
        assert!(partition(&[]).is_empty());
    }

    #[test]
    fn test_elevated_flag() {
        let board = partition(&[HotWordItem::new("A", 1).tag("爆")]);
        assert!(board.ranked[0].elevated);
    }

    #[test]
    fn test_rising_entries() {
        let mut items: Vec<RisingItem> = (0..25)
            .map(|i| RisingItem {
                word: format!("w{}", i),
                rank_change: RankChange::Delta(i),
            })
            .collect();
        items[0].rank_change = RankChange::Marker("TOP".to_string());
        items[1].rank_change = RankChange::Marker("+345".to_string());

        let entries = rising_entries(&items);
        assert_eq!(entries.len(), RISING_DISPLAY_LIMIT);
        assert_eq!(entries[0].label, "↑TOP");
        assert_eq!(entries[0].icon, "⚡");
        assert_eq!(entries[1].icon, "🚀");
        assert_eq!(entries[10].icon, "⚡");
        assert_eq!(entries[11].icon, "🚀");
        assert_eq!(entries[11].label, "↑11");
    }

    #[test]
    fn test_interactions_map_to_two_commands() {
        assert_eq!(
            ItemInteraction::Click("a".into()).command(),
            Some(WorkspaceCommand::QuickPreview("a".into()))
        );
        assert_eq!(
            ItemInteraction::AddButton("a".into()).command(),
            Some(WorkspaceCommand::Add("a".into()))
        );
        assert_eq!(
            ItemInteraction::Drop("a".into()).command(),
            Some(WorkspaceCommand::Add("a".into()))
        );
        assert_eq!(
            ItemInteraction::ManualEntry("  b ".into()).command(),
            Some(WorkspaceCommand::Add("b".into()))
        );
        assert_eq!(ItemInteraction::ManualEntry("   ".into()).command(), None);
    }
}
