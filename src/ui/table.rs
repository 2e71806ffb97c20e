//! View-model for the product table: column metadata, sorting and
//! grouping. Everything here works on row *positions* into the live
//! dataset, so a commit from a sorted or grouped view still lands on
//! the right record.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::state::data::Record;

/// The seven table columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Image,
    Category,
    Label,
    Price,
    Description,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Name,
        Column::Image,
        Column::Category,
        Column::Label,
        Column::Price,
        Column::Description,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "Name",
            Column::Image => "Image",
            Column::Category => "Category",
            Column::Label => "Label",
            Column::Price => "Price",
            Column::Description => "Description",
        }
    }

    pub fn sortable(self) -> bool {
        !matches!(self, Column::Image)
    }

    /// Rows can only be grouped by their category
    pub fn groupable(self) -> bool {
        matches!(self, Column::Category)
    }

    /// Relative width of the column in the table layout
    pub fn width_portion(self) -> u16 {
        match self {
            Column::Id => 1,
            Column::Description => 4,
            _ => 2,
        }
    }
}

/// One active sort: a column and a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRule {
    pub column: Column,
    pub descending: bool,
}

/// Initial sort: price ascending, ties broken by name
pub fn default_sort() -> Vec<SortRule> {
    vec![
        SortRule {
            column: Column::Price,
            descending: false,
        },
        SortRule {
            column: Column::Name,
            descending: false,
        },
    ]
}

/// Advance the sort state for a header click:
/// ascending -> descending -> unsorted, and a click on a different
/// column starts over ascending on that column.
pub fn cycle_sort(rules: &[SortRule], column: Column) -> Vec<SortRule> {
    match rules.first() {
        Some(rule) if rule.column == column => {
            if rule.descending {
                Vec::new()
            } else {
                vec![SortRule {
                    column,
                    descending: true,
                }]
            }
        }
        _ => vec![SortRule {
            column,
            descending: false,
        }],
    }
}

fn compare(a: &Record, b: &Record, column: Column) -> Ordering {
    match column {
        Column::Id => a.id.cmp(&b.id),
        Column::Name => a.name.cmp(&b.name),
        Column::Image => Ordering::Equal,
        Column::Category => a.category.cmp(&b.category),
        Column::Label => a.display_label().cmp(b.display_label()),
        Column::Price => a.price.total_cmp(&b.price),
        Column::Description => a.description.cmp(&b.description),
    }
}

/// Dataset positions in display order. The sort is stable, so rows
/// that compare equal keep their dataset order.
pub fn sorted_indices(rows: &[Record], rules: &[SortRule]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        for rule in rules {
            let ord = compare(&rows[a], &rows[b], rule.column);
            let ord = if rule.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
    order
}

/// One line of the rendered table
#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    /// Collapsible per-category header with its row count
    GroupHeader {
        category: String,
        count: usize,
        expanded: bool,
    },
    /// A product row, addressed by dataset position
    Item { index: usize },
}

/// Fold the sorted rows into category groups. Groups appear where
/// their first row appears in the sorted order; collapsed groups hide
/// their items.
pub fn grouped(rows: &[Record], order: &[usize], expanded: &HashSet<String>) -> Vec<TableRow> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();

    for &index in order {
        let category = &rows[index].category;
        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, members)) => members.push(index),
            None => groups.push((category.clone(), vec![index])),
        }
    }

    let mut lines = Vec::new();
    for (category, members) in groups {
        let is_expanded = expanded.contains(&category);
        lines.push(TableRow::GroupHeader {
            category,
            count: members.len(),
            expanded: is_expanded,
        });
        if is_expanded {
            lines.extend(members.into_iter().map(|index| TableRow::Item { index }));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, category: &str, price: f64) -> Record {
        Record {
            id,
            name: name.into(),
            image: format!("https://cdn.example/{id}.png"),
            category: category.into(),
            label: None,
            price,
            description: String::new(),
        }
    }

    fn rows() -> Vec<Record> {
        vec![
            record(1, "Sourdough", "Bakery", 9.99),
            record(2, "Brie", "Dairy", 12.5),
            record(3, "Baguette", "Bakery", 3.25),
            record(4, "Gouda", "Dairy", 3.25),
        ]
    }

    #[test]
    fn test_default_sort_is_price_then_name() {
        let rows = rows();
        let order = sorted_indices(&rows, &default_sort());
        // Both 3.25 rows sort by name: Baguette before Gouda
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_descending_sort_reverses() {
        let rows = rows();
        let rules = vec![SortRule {
            column: Column::Price,
            descending: true,
        }];
        let order = sorted_indices(&rows, &rules);
        assert_eq!(order, vec![1, 0, 2, 3]); // equal prices keep dataset order
    }

    #[test]
    fn test_unsorted_keeps_dataset_order() {
        let rows = rows();
        assert_eq!(sorted_indices(&rows, &[]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_cycle_sort_transitions() {
        let asc = cycle_sort(&[], Column::Name);
        assert_eq!(
            asc,
            vec![SortRule {
                column: Column::Name,
                descending: false
            }]
        );

        let desc = cycle_sort(&asc, Column::Name);
        assert!(desc[0].descending);

        let cleared = cycle_sort(&desc, Column::Name);
        assert!(cleared.is_empty());

        // Clicking another column starts over ascending
        let other = cycle_sort(&desc, Column::Price);
        assert_eq!(
            other,
            vec![SortRule {
                column: Column::Price,
                descending: false
            }]
        );
    }

    #[test]
    fn test_grouping_collapsed_shows_headers_only() {
        let rows = rows();
        let order = sorted_indices(&rows, &default_sort());
        let lines = grouped(&rows, &order, &HashSet::new());

        assert_eq!(
            lines,
            vec![
                TableRow::GroupHeader {
                    category: "Bakery".into(),
                    count: 2,
                    expanded: false
                },
                TableRow::GroupHeader {
                    category: "Dairy".into(),
                    count: 2,
                    expanded: false
                },
            ]
        );
    }

    #[test]
    fn test_expanded_group_lists_its_rows_in_sort_order() {
        let rows = rows();
        let order = sorted_indices(&rows, &default_sort());
        let expanded: HashSet<String> = ["Bakery".to_string()].into();
        let lines = grouped(&rows, &order, &expanded);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], TableRow::Item { index: 2 });
        assert_eq!(lines[2], TableRow::Item { index: 0 });
    }
}
